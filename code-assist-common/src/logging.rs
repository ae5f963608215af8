//! Logging utilities

use serde::Serialize;
use std::fmt::Debug;

/// Wrapper for pretty-printing types in logs as YAML
///
/// ```ignore
/// use code_assist_common::Pretty;
/// use tracing::info;
///
/// info!("Effective configuration: {}", Pretty(&config));
/// ```
///
/// Outputs YAML with a leading newline. Debug is used as a fallback if YAML
/// serialization fails.
pub struct Pretty<T>(pub T);

impl<T: Serialize + Debug> std::fmt::Display for Pretty<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match serde_yaml_ng::to_string(&self.0) {
            Ok(yaml) => write!(f, "\n{}", yaml),
            Err(_) => write!(f, "\n{:#?}", self.0),
        }
    }
}

impl<T: Serialize + Debug> std::fmt::Debug for Pretty<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        std::fmt::Display::fmt(self, f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Serialize)]
    struct Sample {
        name: &'static str,
        count: u32,
    }

    #[test]
    fn test_pretty_renders_yaml_with_leading_newline() {
        let rendered = format!("{}", Pretty(&Sample { name: "a", count: 2 }));
        assert!(rendered.starts_with('\n'));
        assert!(rendered.contains("name: a"));
        assert!(rendered.contains("count: 2"));
    }

    #[test]
    fn test_pretty_handles_json_values() {
        let value = serde_json::json!({"roots": ["/tmp/a"]});
        let rendered = format!("{:?}", Pretty(&value));
        assert!(rendered.contains("roots:"));
        assert!(rendered.contains("/tmp/a"));
    }
}
