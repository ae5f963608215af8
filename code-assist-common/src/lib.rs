//! # Code Assist Common
//!
//! Foundational pieces shared by every Code Assist crate:
//!
//! - [`error`] - severity classification for domain errors and error-chain formatting
//! - [`logging`] - the [`Pretty`] wrapper for structured values in log lines

pub mod error;
pub mod logging;

pub use error::{ErrorChain, ErrorChainExt, ErrorSeverity, Severity};
pub use logging::Pretty;
