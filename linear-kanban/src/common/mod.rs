//! Common utilities module
//!
//! Shared helpers used by the configuration layer and the CLI.

/// Environment variable loading utilities
pub mod env_loader;

pub use env_loader::EnvLoader;
