//! Process exit codes
//!
//! - 0: success
//! - 1: warnings, or a command that failed after starting
//! - 2: errors, including a missing `LINEAR_API_KEY`

/// Successful execution
pub const EXIT_SUCCESS: i32 = 0;

/// Warnings found, or the command failed part way
pub const EXIT_WARNING: i32 = 1;

/// Errors found or a prerequisite is missing
pub const EXIT_ERROR: i32 = 2;
