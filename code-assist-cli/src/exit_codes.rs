//! Process exit codes

/// Command completed
pub const EXIT_SUCCESS: i32 = 0;

/// Command failed; the error chain was printed to stderr
pub const EXIT_ERROR: i32 = 2;
