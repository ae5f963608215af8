//! Unified diff generation

use similar::TextDiff;

/// Header name for the pre-edit side
pub const ORIGINAL_LABEL: &str = "original";
/// Header name for the post-edit side
pub const MODIFIED_LABEL: &str = "modified";

const CONTEXT_LINES: usize = 3;

/// Unified diff between two texts, or an empty string when they are identical
///
/// An empty result means the edit is a no-op.
pub fn unified_diff(original: &str, modified: &str) -> String {
    if original == modified {
        return String::new();
    }

    TextDiff::from_lines(original, modified)
        .unified_diff()
        .context_radius(CONTEXT_LINES)
        .header(ORIGINAL_LABEL, MODIFIED_LABEL)
        .to_string()
}
