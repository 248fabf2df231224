//! Instruction system for the Listin store assistant.
//!
//! This crate turns the store knowledge document into the instruction text
//! handed to the external agent framework:
//! - YAML instruction templates with a declared variable set
//! - Strict Handlebars rendering (`PromptCompiler`)
//! - Agent definition bootstrap

pub mod agent;
pub mod compiler;
pub mod loader;
pub mod types;

// Re-export main types
pub use agent::{bootstrap, AgentBootstrap, AgentDefinition};
pub use compiler::{render_instruction, PromptCompiler, RenderOptions};
pub use loader::{builtin_template, list_templates, load_template, resolve_template, template_path};
pub use types::{CompiledInstruction, InstructionTemplate, StoreNameSource, TemplateVariable};
