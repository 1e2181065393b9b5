//! Utility functions for the doctor module

use std::ffi::OsStr;
use std::path::PathBuf;

/// Name of the installed binary
pub const BINARY_NAME: &str = "linear-kanban-mcp";

/// Name the server is registered under in Claude Code
pub const MCP_SERVER_NAME: &str = "linear-kanban";

/// Get the Claude add command
pub fn get_claude_add_command() -> String {
    format!(
        r#"Add linear-kanban to Claude Code using this command:

claude mcp add --scope user {MCP_SERVER_NAME} -e LINEAR_API_KEY=<your key> -- {BINARY_NAME} serve

Or if {BINARY_NAME} is not in your PATH, use the full path:

claude mcp add --scope user {MCP_SERVER_NAME} -e LINEAR_API_KEY=<your key> -- /path/to/{BINARY_NAME} serve"#
    )
}

/// First directory of a `PATH`-style list that contains `exe_name`
pub fn find_in_path(exe_name: &str, path_var: &OsStr) -> Option<PathBuf> {
    std::env::split_paths(path_var)
        .map(|dir| dir.join(exe_name))
        .find(|candidate| candidate.is_file())
}

/// Mask all but the last four characters of a secret
pub fn mask_secret(secret: &str) -> String {
    let chars: Vec<char> = secret.chars().collect();
    if chars.len() <= 4 {
        return "*".repeat(chars.len());
    }
    let visible: String = chars[chars.len() - 4..].iter().collect();
    format!("{}{visible}", "*".repeat(chars.len() - 4))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::ffi::OsString;
    use tempfile::TempDir;

    #[test]
    fn test_find_in_path() {
        let empty = TempDir::new().unwrap();
        let with_binary = TempDir::new().unwrap();
        std::fs::write(with_binary.path().join(BINARY_NAME), b"").unwrap();

        let path_var =
            std::env::join_paths([empty.path(), with_binary.path()]).unwrap_or_default();
        assert_eq!(
            find_in_path(BINARY_NAME, &path_var),
            Some(with_binary.path().join(BINARY_NAME))
        );
        assert_eq!(find_in_path(BINARY_NAME, &OsString::new()), None);
    }

    #[test]
    fn test_mask_secret() {
        assert_eq!(mask_secret("lin_api_abcd1234"), "************1234");
        assert_eq!(mask_secret("abc"), "***");
    }

    #[test]
    fn test_claude_add_command_names_binary() {
        let command = get_claude_add_command();
        assert!(command.contains("claude mcp add --scope user linear-kanban"));
        assert!(command.contains("linear-kanban-mcp serve"));
    }
}
