//! Instruction template and compiled instruction types.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// An instruction template loaded from YAML.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InstructionTemplate {
    /// Unique template identifier
    pub id: String,

    /// Human-readable title
    pub title: String,

    /// Template version, `x.y`
    #[serde(rename = "apiVersion")]
    pub api_version: String,

    #[serde(default)]
    pub description: String,

    /// Variables the template is allowed to reference
    #[serde(default)]
    pub variables: Vec<TemplateVariable>,

    /// Template string with Handlebars syntax
    pub template: String,
}

/// Substitution variables a template may declare.
///
/// Each variable is resolved from the knowledge document by the compiler.
/// Adding a document field to the render contract means adding a variant
/// here and its resolution in `PromptCompiler`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TemplateVariable {
    StoreName,
}

impl TemplateVariable {
    pub const ALL: [TemplateVariable; 1] = [TemplateVariable::StoreName];

    /// Placeholder name used inside templates.
    pub fn name(&self) -> &'static str {
        match self {
            TemplateVariable::StoreName => "store_name",
        }
    }
}

impl fmt::Display for TemplateVariable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Where the rendered store name came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StoreNameSource {
    /// `store_name` in the knowledge document
    Document,
    /// Configured fallback, because the document had no usable name
    Fallback,
}

/// Rendered instruction text plus how it was produced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompiledInstruction {
    /// Final instruction text
    pub text: String,

    #[serde(rename = "templateId")]
    pub template_id: String,

    #[serde(rename = "templateVersion")]
    pub template_version: String,

    #[serde(rename = "storeName")]
    pub store_name: String,

    #[serde(rename = "storeNameSource")]
    pub store_name_source: StoreNameSource,

    /// Values substituted for each declared variable
    #[serde(rename = "resolvedVariables")]
    pub resolved_variables: BTreeMap<String, String>,
}
