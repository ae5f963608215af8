//! On-disk content laws for the XML protocol, checked through `FileEditor`

use code_assist_edit::{FileEditor, IndexMap, PathResolver};
use proptest::prelude::*;
use std::fs;
use tempfile::TempDir;

fn editor_in(temp: &TempDir) -> (std::path::PathBuf, FileEditor) {
    let root = temp.path().canonicalize().unwrap();
    let editor = FileEditor::new(PathResolver::new([&root]).unwrap(), ".trash");
    (root, editor)
}

fn escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn created_content_follows_concatenation_law(
        contents in prop::collection::vec("[a-z<&> \\n]{0,10}[a-z][a-z \\n]{0,10}", 1..5)
    ) {
        let runtime = tokio::runtime::Runtime::new().unwrap();
        let temp = TempDir::new().unwrap();
        let (root, editor) = editor_in(&temp);
        let file = root.join("out.txt");

        let changes: String = contents
            .iter()
            .map(|c| format!("<change><content>{}</content></change>", escape(c)))
            .collect();
        let xml = format!(
            r#"<file path="{}" action="create_file">{changes}</file>"#,
            file.display()
        );

        runtime
            .block_on(editor.create_file(&file.to_string_lossy(), None, Some(&xml)))
            .unwrap();

        let expected = contents
            .iter()
            .map(|c| format!("{}\n", c.trim()))
            .collect::<String>()
            .trim()
            .to_string();
        prop_assert_eq!(fs::read_to_string(&file).unwrap(), expected);
    }

    #[test]
    fn modified_content_follows_sequential_replacement(
        original in "[a-f ]{1,40}",
        pairs in prop::collection::vec(("[a-f]{1,3}", "[g-k]{1,3}"), 1..4)
    ) {
        let runtime = tokio::runtime::Runtime::new().unwrap();
        let temp = TempDir::new().unwrap();
        let (root, editor) = editor_in(&temp);
        let file = root.join("in.txt");
        fs::write(&file, &original).unwrap();

        let replacements: IndexMap<String, String> = pairs.into_iter().collect();
        let mut expected = original.clone();
        for (search, replacement) in &replacements {
            expected = expected.replace(search.as_str(), replacement);
        }

        let result = runtime.block_on(editor.modify_file(
            &file.to_string_lossy(),
            Some(&replacements),
            None,
        ));

        if expected == original {
            prop_assert!(result.is_err());
            prop_assert_eq!(fs::read_to_string(&file).unwrap(), original);
        } else {
            prop_assert!(result.unwrap().contains("--- original"));
            prop_assert_eq!(fs::read_to_string(&file).unwrap(), expected);
        }
    }
}
