//! Render command handler.
//!
//! Prints the compiled instruction text.

use super::emit;
use clap::Args;
use listin_core::{AppConfig, AppResult};
use listin_prompt::bootstrap;
use std::path::PathBuf;

/// Compile the instruction from the knowledge document
#[derive(Args, Debug)]
pub struct RenderCommand {
    /// Write the instruction to a file instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Output as JSON, including how the instruction was produced
    #[arg(long)]
    pub json: bool,
}

impl RenderCommand {
    pub fn execute(&self, config: &AppConfig) -> AppResult<()> {
        tracing::info!("Executing render command");

        let boot = bootstrap(config)?;

        let contents = if self.json {
            let output = serde_json::json!({
                "instruction": boot.instruction,
                "knowledge": {
                    "path": boot.knowledge_path,
                    "degraded": boot.load_status != listin_knowledge::LoadStatus::Loaded,
                },
            });
            serde_json::to_string_pretty(&output)?
        } else {
            boot.instruction.text
        };

        emit(self.output.as_deref(), &contents)
    }
}
