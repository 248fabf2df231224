//! Check command handler.
//!
//! Runs the readiness checks and prints the report.

use crate::diagnostics::{render_human, run_checks};
use clap::Args;
use listin_core::{AppConfig, AppResult};

/// Validate files, store data, environment and the instruction template
#[derive(Args, Debug)]
pub struct CheckCommand {
    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

impl CheckCommand {
    /// Returns whether every check passed.
    pub fn execute(&self, config: &AppConfig) -> AppResult<bool> {
        tracing::info!("Executing check command");

        let report = run_checks(config, |key| std::env::var(key).ok());

        if self.json {
            println!("{}", serde_json::to_string_pretty(&report)?);
        } else {
            println!("{}", render_human(&report));
        }

        tracing::debug!("Checks passed: {}/{}", report.passed, report.total);
        Ok(report.success)
    }
}
