//! Configuration types

use crate::{ConfigError, ConfigResult};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Default name of the hidden soft-delete directory created next to deleted files
pub const DEFAULT_TRASH_DIR_NAME: &str = ".mcp_server_code_assist_trash";

/// Default chat-completions endpoint for the internet question tool
pub const DEFAULT_INTERNET_BASE_URL: &str = "https://api.perplexity.ai/chat/completions";

/// Default model for the internet question tool
pub const DEFAULT_INTERNET_MODEL: &str = "llama-3.1-sonar-huge-128k-online";

/// Default system prompt for the internet question tool
pub const DEFAULT_INTERNET_SYSTEM_PROMPT: &str = "Be concise and direct in your answers.";

/// Effective configuration for a Code Assist process
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CodeAssistConfig {
    /// Directories every file operation must stay inside
    pub allowed_roots: Vec<PathBuf>,
    /// Name of the sibling directory used for soft deletes
    pub trash_dir_name: String,
    /// Write logs to this file instead of stderr
    pub log_file: Option<PathBuf>,
    /// Settings for the internet question tool
    pub internet: InternetConfig,
}

impl Default for CodeAssistConfig {
    fn default() -> Self {
        Self {
            allowed_roots: Vec::new(),
            trash_dir_name: DEFAULT_TRASH_DIR_NAME.to_string(),
            log_file: None,
            internet: InternetConfig::default(),
        }
    }
}

impl CodeAssistConfig {
    /// Check values that figment cannot check by type alone
    pub fn validate(&self) -> ConfigResult<()> {
        let name = self.trash_dir_name.trim();
        if name.is_empty() {
            return Err(ConfigError::validation("trash_dir_name must not be empty"));
        }
        if name == "." || name == ".." || name.contains('/') || name.contains('\\') {
            return Err(ConfigError::validation(format!(
                "trash_dir_name must be a single directory name, got '{}'",
                self.trash_dir_name
            )));
        }

        for root in &self.allowed_roots {
            if root.exists() && !root.is_dir() {
                return Err(ConfigError::InvalidRoot {
                    path: root.clone(),
                    message: "not a directory".to_string(),
                });
            }
        }

        if self.internet.timeout_secs == 0 {
            return Err(ConfigError::validation(
                "internet.timeout_secs must be greater than zero",
            ));
        }

        Ok(())
    }

    /// Allowed roots as absolute paths, defaulting to the current directory
    ///
    /// Relative roots are joined onto the current directory. Order is kept:
    /// the first root is the base for relative paths inside XML directives.
    pub fn effective_allowed_roots(&self) -> ConfigResult<Vec<PathBuf>> {
        let cwd = std::env::current_dir().map_err(|_| ConfigError::CurrentDirectoryNotFound)?;
        if self.allowed_roots.is_empty() {
            return Ok(vec![cwd]);
        }
        Ok(self
            .allowed_roots
            .iter()
            .map(|root| absolutize(&cwd, root))
            .collect())
    }
}

fn absolutize(base: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        base.join(path)
    }
}

/// Settings for the internet question tool
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InternetConfig {
    /// Bearer token for the chat-completions endpoint; never serialized
    #[serde(skip_serializing)]
    pub api_key: Option<String>,
    pub base_url: String,
    pub model: String,
    pub system_prompt: String,
    pub timeout_secs: u64,
}

impl Default for InternetConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: DEFAULT_INTERNET_BASE_URL.to_string(),
            model: DEFAULT_INTERNET_MODEL.to_string(),
            system_prompt: DEFAULT_INTERNET_SYSTEM_PROMPT.to_string(),
            timeout_secs: 60,
        }
    }
}

/// Values supplied on the command line; only set fields override lower layers
#[derive(Debug, Clone, Default, Serialize)]
pub struct ConfigOverrides {
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub allowed_roots: Vec<PathBuf>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub log_file: Option<PathBuf>,
}
