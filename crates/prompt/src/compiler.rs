//! Instruction compiler: renders a template against a knowledge document.

use crate::types::{CompiledInstruction, InstructionTemplate, StoreNameSource, TemplateVariable};
use handlebars::Handlebars;
use listin_core::config::DEFAULT_FALLBACK_STORE_NAME;
use listin_core::{AppError, AppResult};
use listin_knowledge::KnowledgeDocument;
use std::collections::BTreeMap;

const TEMPLATE_NAME: &str = "instruction";

/// Options affecting variable resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderOptions {
    /// Store name used when the document has no usable `store_name`
    pub fallback_store_name: String,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            fallback_store_name: DEFAULT_FALLBACK_STORE_NAME.to_string(),
        }
    }
}

/// A template registered once and rendered against any number of
/// documents.
///
/// Rendering is strict: a placeholder that is not one of the template's
/// declared variables fails the render instead of producing blank text.
pub struct PromptCompiler {
    registry: Handlebars<'static>,
    template: InstructionTemplate,
    options: RenderOptions,
}

impl PromptCompiler {
    /// Register `template` for rendering.
    ///
    /// Fails if the template text is not valid Handlebars.
    pub fn new(template: InstructionTemplate, options: RenderOptions) -> AppResult<Self> {
        let mut registry = Handlebars::new();

        // Plain text output, no HTML escaping
        registry.register_escape_fn(handlebars::no_escape);
        registry.set_strict_mode(true);

        registry
            .register_template_string(TEMPLATE_NAME, &template.template)
            .map_err(|e| {
                AppError::Prompt(format!(
                    "Failed to register template '{}': {}",
                    template.id, e
                ))
            })?;

        Ok(Self {
            registry,
            template,
            options,
        })
    }

    /// Render the instruction for `document`.
    ///
    /// Only the template's declared variables are resolved from the
    /// document; nothing else in it is consulted. The same document always
    /// yields the same text.
    pub fn render(&self, document: &KnowledgeDocument) -> AppResult<CompiledInstruction> {
        tracing::debug!("Rendering template: {}", self.template.id);

        let (store_name, store_name_source) = self.resolve_store_name(document);

        let mut variables = BTreeMap::new();
        for variable in &self.template.variables {
            let value = match variable {
                TemplateVariable::StoreName => store_name.clone(),
            };
            variables.insert(variable.name().to_string(), value);
        }

        let text = self
            .registry
            .render(TEMPLATE_NAME, &variables)
            .map_err(|e| {
                AppError::Prompt(format!(
                    "Failed to render template '{}': {}",
                    self.template.id, e
                ))
            })?;

        Ok(CompiledInstruction {
            text,
            template_id: self.template.id.clone(),
            template_version: self.template.api_version.clone(),
            store_name,
            store_name_source,
            resolved_variables: variables,
        })
    }

    fn resolve_store_name(&self, document: &KnowledgeDocument) -> (String, StoreNameSource) {
        match document.store_name() {
            Some(name) if !name.trim().is_empty() => (name.to_string(), StoreNameSource::Document),
            _ => {
                tracing::warn!(
                    "Knowledge document has no store_name; using fallback '{}'",
                    self.options.fallback_store_name
                );
                (
                    self.options.fallback_store_name.clone(),
                    StoreNameSource::Fallback,
                )
            }
        }
    }
}

/// Register and render in one step.
///
/// # Example
/// ```no_run
/// use listin_knowledge::KnowledgeDocument;
/// use listin_prompt::{builtin_template, render_instruction, RenderOptions};
///
/// # fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let template = builtin_template()?;
/// let compiled = render_instruction(template, &KnowledgeDocument::empty(), RenderOptions::default())?;
/// println!("{}", compiled.text);
/// # Ok(())
/// # }
/// ```
pub fn render_instruction(
    template: InstructionTemplate,
    document: &KnowledgeDocument,
    options: RenderOptions,
) -> AppResult<CompiledInstruction> {
    PromptCompiler::new(template, options)?.render(document)
}
