//! # Code Assist Configuration
//!
//! Layered configuration built with [figment](https://docs.rs/figment):
//! built-in defaults, then `~/.code-assist/code-assist.*`, then
//! `./.code-assist/code-assist.*`, then `CODE_ASSIST_*` environment variables,
//! then command line overrides.
//!
//! ```no_run
//! use code_assist_config::ConfigProvider;
//!
//! let config = ConfigProvider::new().load()?;
//! let roots = config.effective_allowed_roots()?;
//! # Ok::<(), code_assist_config::ConfigError>(())
//! ```

pub mod discovery;
pub mod error;
pub mod provider;
pub mod types;

pub use discovery::{ConfigFile, ConfigFormat, ConfigScope, FileDiscovery};
pub use error::ConfigError;
pub use provider::{ConfigProvider, ENV_PREFIX, LEGACY_API_KEY_VAR};
pub use types::{
    CodeAssistConfig, ConfigOverrides, InternetConfig, DEFAULT_INTERNET_BASE_URL,
    DEFAULT_INTERNET_MODEL, DEFAULT_INTERNET_SYSTEM_PROMPT, DEFAULT_TRASH_DIR_NAME,
};

/// Result type for configuration operations
pub type ConfigResult<T> = Result<T, ConfigError>;
