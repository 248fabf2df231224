//! Templates command handler.

use clap::Args;
use listin_core::config::DEFAULT_TEMPLATE_ID;
use listin_core::{AppConfig, AppResult};
use listin_prompt::list_templates;

/// List available instruction templates
#[derive(Args, Debug)]
pub struct TemplatesCommand {
    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

impl TemplatesCommand {
    pub fn execute(&self, config: &AppConfig) -> AppResult<()> {
        tracing::info!("Executing templates command");

        let workspace_ids = list_templates(&config.workspace)?;

        if self.json {
            let output = serde_json::json!({
                "active": config.template_id,
                "builtin": DEFAULT_TEMPLATE_ID,
                "workspace": workspace_ids,
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
            return Ok(());
        }

        let mut ids = workspace_ids;
        if !ids.iter().any(|id| id == DEFAULT_TEMPLATE_ID) {
            ids.push(DEFAULT_TEMPLATE_ID.to_string());
            ids.sort();
        }

        for id in ids {
            let marker = if id == config.template_id { "*" } else { " " };
            let origin = if id == DEFAULT_TEMPLATE_ID
                && !listin_prompt::template_path(&config.workspace, &id).exists()
            {
                " (builtin)"
            } else {
                ""
            };
            println!("{} {}{}", marker, id, origin);
        }

        Ok(())
    }
}
