//! Content mutation
//!
//! Two algorithms: concatenating change contents into a whole file
//! (`create_file`, `rewrite_file`) and ordered exact-substring replacement
//! (`modify_file`).

use crate::error::{EditError, EditResult};
use indexmap::IndexMap;

/// Join change contents into file content
///
/// Each non-empty content is trimmed and followed by a newline, then the
/// whole accumulation is trimmed.
pub fn concatenate_contents<'a, I>(contents: I) -> String
where
    I: IntoIterator<Item = &'a str>,
{
    let mut accumulated = String::new();
    for content in contents.into_iter().filter(|c| !c.is_empty()) {
        accumulated.push_str(content.trim());
        accumulated.push('\n');
    }
    accumulated.trim().to_string()
}

/// Apply each search/replacement pair to `original`, in map order
///
/// Every occurrence of a search string is replaced, case-sensitively. A search
/// string that is absent at the time it is applied leaves the content as is.
pub fn apply_replacements(
    original: &str,
    replacements: &IndexMap<String, String>,
) -> EditResult<String> {
    if replacements.is_empty() {
        return Err(EditError::invalid_request("no replacements provided"));
    }

    let mut content = original.to_string();
    for (search, replacement) in replacements {
        if search.is_empty() {
            return Err(EditError::invalid_request(
                "search text must not be empty",
            ));
        }
        if content.contains(search.as_str()) {
            content = content.replace(search.as_str(), replacement);
        }
    }
    Ok(content)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn map(pairs: &[(&str, &str)]) -> IndexMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_concatenate_trims_each_and_whole() {
        assert_eq!(
            concatenate_contents(["  a  ", "", "\nb\n", "   "]),
            "a\nb"
        );
        assert_eq!(concatenate_contents(Vec::<&str>::new()), "");
    }

    #[test]
    fn test_concatenate_keeps_interior_blank_from_whitespace_content() {
        assert_eq!(concatenate_contents(["a", " ", "b"]), "a\n\nb");
    }

    #[test]
    fn test_replacements_apply_all_occurrences_in_order() {
        let result = apply_replacements(
            "foo bar foo",
            &map(&[("foo", "bar"), ("bar", "baz")]),
        )
        .unwrap();
        assert_eq!(result, "baz baz baz");
    }

    #[test]
    fn test_missing_search_is_noop() {
        let result = apply_replacements("Hello world!", &map(&[("planet", "x")])).unwrap();
        assert_eq!(result, "Hello world!");
    }

    #[test]
    fn test_replacements_are_case_sensitive() {
        let result = apply_replacements("Hello hello", &map(&[("hello", "bye")])).unwrap();
        assert_eq!(result, "Hello bye");
    }

    #[test]
    fn test_invalid_replacement_maps() {
        assert!(matches!(
            apply_replacements("x", &IndexMap::new()).unwrap_err(),
            EditError::InvalidRequest { .. }
        ));
        assert!(matches!(
            apply_replacements("x", &map(&[("", "y")])).unwrap_err(),
            EditError::InvalidRequest { .. }
        ));
    }

    proptest! {
        #[test]
        fn prop_concatenation_law(contents in prop::collection::vec("[ \\na-z]{1,12}", 0..6)) {
            let expected = contents
                .iter()
                .map(|c| format!("{}\n", c.trim()))
                .collect::<String>()
                .trim()
                .to_string();
            prop_assert_eq!(concatenate_contents(contents.iter().map(String::as_str)), expected);
        }

        #[test]
        fn prop_absent_search_leaves_content_unchanged(original in "[a-m ]{0,40}", search in "[n-z]{1,5}") {
            let result = apply_replacements(&original, &map(&[(search.as_str(), "X")])).unwrap();
            prop_assert_eq!(result, original);
        }
    }
}
