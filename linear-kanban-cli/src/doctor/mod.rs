//! Doctor module for linear-kanban diagnostics
//!
//! Checks the pieces a working setup needs:
//!
//! - The Linear API key and configuration values
//! - Binary location and Claude Code MCP registration
//! - A live call against the Linear API
//!
//! # Usage
//!
//! ```no_run
//! use linear_kanban::config::Config;
//! use linear_kanban_cli::doctor::Doctor;
//!
//! # async fn run() -> anyhow::Result<()> {
//! let mut doctor = Doctor::new();
//! let exit_code = doctor.run_diagnostics(&Config::new()).await?;
//! # Ok(())
//! # }
//! ```
//!
//! The doctor returns exit codes:
//! - 0: All checks passed
//! - 1: Some warnings detected
//! - 2: Errors detected, or no API key at all

use anyhow::Result;
use colored::*;
use linear_kanban::config::Config;
use linear_kanban::linear::{GraphqlLinearClient, LinearApi};

use crate::exit_codes::EXIT_ERROR;

pub use types::*;

pub mod checks;
pub mod types;
pub mod utils;

/// Accumulates diagnostic results and prints a summary
pub struct Doctor {
    checks: Vec<Check>,
}

impl Doctor {
    /// Create a new Doctor instance for running diagnostics
    pub fn new() -> Self {
        Self { checks: Vec::new() }
    }

    /// Run all diagnostic checks against the live Linear API
    ///
    /// Without an API key nothing else is worth checking, so the doctor
    /// reports that and returns [`EXIT_ERROR`] straight away.
    pub async fn run_diagnostics(&mut self, config: &Config) -> Result<i32> {
        if !config.has_api_key() {
            eprintln!("Error: LINEAR_API_KEY environment variable is required");
            return Ok(EXIT_ERROR);
        }

        println!("{}", "Linear Kanban Doctor".bold().blue());
        println!("{}", "Running diagnostics...".dimmed());
        println!();

        let client = GraphqlLinearClient::from_config(config)?;
        self.run_checks(config, &client).await;

        self.print_results();

        Ok(self.get_exit_code())
    }

    /// Run every check, using `api` for the ones that talk to Linear
    pub async fn run_checks(&mut self, config: &Config, api: &dyn LinearApi) {
        checks::check_api_key(&mut self.checks, config);
        checks::check_config(&mut self.checks, config);
        checks::check_in_path(&mut self.checks);
        checks::check_claude_config(&mut self.checks);
        checks::check_connectivity(&mut self.checks, api).await;
    }

    /// Checks collected so far
    pub fn checks(&self) -> &[Check] {
        &self.checks
    }

    /// Print the results grouped by [`CheckCategory`], then a summary
    pub fn print_results(&self) {
        let use_color = crate::cli::Cli::should_use_color();

        for category in CheckCategory::ALL {
            let in_category: Vec<&Check> = self
                .checks
                .iter()
                .filter(|c| c.category == category)
                .collect();
            print_check_category(&in_category, category.heading(), use_color);
        }

        self.print_summary(use_color);
    }

    fn print_summary(&self, use_color: bool) {
        let counts = self.count_check_statuses();

        if use_color {
            println!("{}", "Summary:".bold().green());
        } else {
            println!("Summary:");
        }

        match (counts.error_count, counts.warning_count) {
            (0, 0) => println!("  All checks passed!"),
            (0, _) if use_color => println!(
                "  {} checks passed, {} warnings",
                counts.ok_count.to_string().green(),
                counts.warning_count.to_string().yellow()
            ),
            (0, _) => println!(
                "  {} checks passed, {} warnings",
                counts.ok_count, counts.warning_count
            ),
            _ if use_color => println!(
                "  {} checks passed, {} warnings, {} errors",
                counts.ok_count.to_string().green(),
                counts.warning_count.to_string().yellow(),
                counts.error_count.to_string().red()
            ),
            _ => println!(
                "  {} checks passed, {} warnings, {} errors",
                counts.ok_count, counts.warning_count, counts.error_count
            ),
        }
    }

    fn count_check_statuses(&self) -> CheckCounts {
        self.checks
            .iter()
            .fold(CheckCounts::default(), |mut counts, check| {
                match check.status {
                    CheckStatus::Ok => counts.ok_count += 1,
                    CheckStatus::Warning => counts.warning_count += 1,
                    CheckStatus::Error => counts.error_count += 1,
                }
                counts
            })
    }

    /// Get exit code based on check results
    ///
    /// - 0: All checks passed
    /// - 1: At least one warning detected
    /// - 2: At least one error detected
    pub fn get_exit_code(&self) -> i32 {
        let has_error = self.checks.iter().any(|c| c.status == CheckStatus::Error);
        let has_warning = self.checks.iter().any(|c| c.status == CheckStatus::Warning);

        let exit_code = if has_error {
            ExitCode::Error
        } else if has_warning {
            ExitCode::Warning
        } else {
            ExitCode::Success
        };

        exit_code.into()
    }
}

impl Default for Doctor {
    fn default() -> Self {
        Self::new()
    }
}

fn print_check_category(checks: &[&Check], heading: &str, use_color: bool) {
    if checks.is_empty() {
        return;
    }
    if use_color {
        println!("{}", heading.bold().yellow());
    } else {
        println!("{heading}");
    }
    for check in checks {
        print_check(check, use_color);
    }
    println!();
}

fn print_check(check: &Check, use_color: bool) {
    let (symbol, color_fn): (&str, fn(&str) -> ColoredString) = match check.status {
        CheckStatus::Ok => ("✓", |s: &str| s.green()),
        CheckStatus::Warning => ("⚠", |s: &str| s.yellow()),
        CheckStatus::Error => ("✗", |s: &str| s.red()),
    };

    if use_color {
        println!(
            "  {} {} - {}",
            color_fn(symbol),
            check.name.bold(),
            check.message
        );
    } else {
        println!("  {} {} - {}", symbol, check.name, check.message);
    }

    if let Some(fix) = &check.fix {
        if use_color {
            println!("    {} {}", "→".dimmed(), fix.dimmed());
        } else {
            println!("    → {fix}");
        }
    }
}
