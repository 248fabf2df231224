//! Agent bootstrap.
//!
//! Produces everything the external agent framework needs at construction
//! time. Nothing here runs implicitly: callers invoke [`bootstrap`] once
//! during their own initialization.

use crate::compiler::{PromptCompiler, RenderOptions};
use crate::loader::resolve_template;
use crate::types::CompiledInstruction;
use listin_core::{AgentSettings, AppConfig, AppResult};
use listin_knowledge::{load, LoadStatus};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Construction parameters for the hosted conversational agent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgentDefinition {
    pub name: String,
    pub model: String,
    pub description: String,
    pub instruction: String,
    #[serde(default)]
    pub tools: Vec<String>,
}

impl AgentDefinition {
    pub fn new(settings: &AgentSettings, instruction: &CompiledInstruction) -> Self {
        Self {
            name: settings.name.clone(),
            model: settings.model.clone(),
            description: settings.description.clone(),
            instruction: instruction.text.clone(),
            tools: Vec::new(),
        }
    }
}

/// Output of [`bootstrap`].
#[derive(Debug, Clone)]
pub struct AgentBootstrap {
    /// Knowledge document that was loaded
    pub knowledge_path: PathBuf,

    /// Whether the knowledge document loaded or degraded to empty
    pub load_status: LoadStatus,

    pub instruction: CompiledInstruction,

    pub definition: AgentDefinition,
}

/// Load the knowledge document, compile the instruction and assemble the
/// agent definition.
///
/// A missing or malformed knowledge document does not fail the bootstrap;
/// check `load_status`. Template problems do.
pub fn bootstrap(config: &AppConfig) -> AppResult<AgentBootstrap> {
    let knowledge_path = config.knowledge_path();
    tracing::info!(
        "Bootstrapping agent '{}' with template '{}'",
        config.agent.name,
        config.template_id
    );

    let template = resolve_template(&config.workspace, &config.template_id)?;
    let compiler = PromptCompiler::new(
        template,
        RenderOptions {
            fallback_store_name: config.fallback_store_name.clone(),
        },
    )?;

    let outcome = load(&knowledge_path);
    let instruction = compiler.render(&outcome.document)?;
    let definition = AgentDefinition::new(&config.agent, &instruction);

    tracing::debug!(
        "Compiled instruction: {} bytes, store name '{}' ({:?})",
        instruction.text.len(),
        instruction.store_name,
        instruction.store_name_source
    );

    Ok(AgentBootstrap {
        knowledge_path,
        load_status: outcome.status,
        instruction,
        definition,
    })
}
