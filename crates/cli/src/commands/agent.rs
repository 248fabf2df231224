//! Agent command handler.
//!
//! Emits the agent definition consumed by the hosting framework.

use super::emit;
use clap::{Args, ValueEnum};
use listin_core::{AppConfig, AppResult};
use listin_prompt::bootstrap;
use std::path::PathBuf;

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum DefinitionFormat {
    Json,
    Yaml,
}

/// Emit the agent definition (name, model, description, instruction, tools)
#[derive(Args, Debug)]
pub struct AgentCommand {
    /// Serialization format
    #[arg(short, long, value_enum, default_value = "json")]
    pub format: DefinitionFormat,

    /// Write the definition to a file instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

impl AgentCommand {
    pub fn execute(&self, config: &AppConfig) -> AppResult<()> {
        tracing::info!("Executing agent command");

        let boot = bootstrap(config)?;
        if let listin_knowledge::LoadStatus::Degraded(reason) = &boot.load_status {
            tracing::warn!(
                "Agent definition built without store data ({}): {:?}",
                reason,
                boot.knowledge_path
            );
        }

        let contents = match self.format {
            DefinitionFormat::Json => serde_json::to_string_pretty(&boot.definition)?,
            DefinitionFormat::Yaml => serde_yaml::to_string(&boot.definition)?,
        };

        emit(self.output.as_deref(), &contents)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use listin_prompt::AgentDefinition;
    use tempfile::TempDir;

    #[test]
    fn test_yaml_definition_written_to_file() {
        let dir = TempDir::new().unwrap();
        let config = AppConfig {
            workspace: dir.path().to_path_buf(),
            ..Default::default()
        };
        let output = dir.path().join("agent.yaml");

        let command = AgentCommand {
            format: DefinitionFormat::Yaml,
            output: Some(output.clone()),
        };
        command.execute(&config).unwrap();

        let written = std::fs::read_to_string(&output).unwrap();
        let definition: AgentDefinition = serde_yaml::from_str(&written).unwrap();
        assert_eq!(definition.name, "listin_agent");
        assert!(definition.instruction.contains("Magazin"));
    }
}
