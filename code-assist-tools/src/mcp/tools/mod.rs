//! Tool implementations, one module per category

pub mod dirs;
pub mod files;
pub mod git;
pub mod internet;
