use clap::{Parser, Subcommand};
use is_terminal::IsTerminal;
use std::io;

/// Project name searched for when `test-milestone` gets no `--project`
pub const DEFAULT_TEST_PROJECT: &str = "21app";

#[derive(Parser, Debug)]
#[command(name = "linear-kanban-mcp")]
#[command(version)]
#[command(about = "An MCP server exposing a Linear workspace as a kanban board")]
#[command(long_about = "
linear-kanban-mcp is an MCP (Model Context Protocol) server that gives AI
assistants access to a Linear workspace: teams, projects, issues, workflow
states, milestones, comments and project updates.

The LINEAR_API_KEY environment variable must hold a Linear personal API key.

Example usage:
  linear-kanban-mcp serve            # Run as MCP server
  linear-kanban-mcp doctor           # Check configuration and connectivity
  linear-kanban-mcp test-milestone   # Create a test milestone
")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,

    /// Enable debug logging
    #[arg(short, long)]
    pub debug: bool,

    /// Suppress all output except errors
    #[arg(short, long)]
    pub quiet: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run as MCP server (default when invoked via stdio)
    #[command(long_about = "
Runs linear-kanban-mcp as an MCP server over stdio. This is the default mode
when stdin is not a terminal (e.g., when launched by Claude Code). The server
exposes:

- Tools for reading and changing teams, projects, issues and milestones
- Resources with read-only snapshots under linear://
- Prompts that guide common kanban workflows

Logs are written to ~/.linear-kanban/mcp.log while serving.

Example:
  linear-kanban-mcp serve
  # Or configure in Claude Code's MCP settings
")]
    Serve,
    /// Diagnose configuration and connectivity issues
    #[command(long_about = "
Runs diagnostics to help troubleshoot setup issues.
The doctor command will check:

- That LINEAR_API_KEY is set
- The configuration file and API URL
- If linear-kanban-mcp is in your PATH
- Claude Code MCP configuration
- That the Linear API answers with the configured key

Exit codes:
  0 - All checks passed
  1 - Warnings found
  2 - Errors found

Example:
  linear-kanban-mcp doctor
")]
    Doctor,
    /// Find a project by name and create a test milestone in it
    #[command(long_about = "
Searches the workspace for a project whose name contains the given text
(case-insensitive, spaces ignored) and creates a milestone named
\"Test Milestone\" in it, due in 30 days.

When no project matches, the available projects are listed and the command
fails.

Examples:
  linear-kanban-mcp test-milestone
  linear-kanban-mcp test-milestone --project roadmap
")]
    TestMilestone {
        /// Text the project name must contain
        #[arg(long, default_value = DEFAULT_TEST_PROJECT)]
        project: String,
    },
}

impl Cli {
    pub fn parse_args() -> Self {
        Self::parse()
    }

    #[allow(dead_code)]
    pub fn try_parse_from_args<I, T>(args: I) -> Result<Self, clap::Error>
    where
        I: IntoIterator<Item = T>,
        T: Into<std::ffi::OsString> + Clone,
    {
        <Self as Parser>::try_parse_from(args)
    }

    pub fn is_tty() -> bool {
        io::stdout().is_terminal()
    }

    pub fn should_use_color() -> bool {
        Self::is_tty() && std::env::var("NO_COLOR").is_err()
    }
}
