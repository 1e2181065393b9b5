//! Linear Kanban CLI Library
//!
//! Command-line definitions, diagnostics and log setup for the
//! `linear-kanban-mcp` binary.

/// Command-line interface definitions and argument parsing
pub mod cli;
/// Configuration and connectivity diagnostics
pub mod doctor;
/// Exit codes used by the CLI application
pub mod exit_codes;
/// Log sink setup
pub mod logging;
/// Test milestone creation
pub mod test_milestone;
