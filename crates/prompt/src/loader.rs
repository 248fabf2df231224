//! Instruction template loader.

use crate::types::InstructionTemplate;
use listin_core::config::DEFAULT_TEMPLATE_ID;
use listin_core::{AppError, AppResult};
use std::path::{Path, PathBuf};

/// Workspace directory holding template files.
pub const PROMPTS_DIR: &str = ".listin/prompts";

const BUILTIN_TEMPLATE: &str = include_str!("../templates/listin.agent.instruction.yml");

/// Location of the template file `<id>.yml` inside the workspace.
pub fn template_path(workspace_path: &Path, template_id: &str) -> PathBuf {
    workspace_path
        .join(PROMPTS_DIR)
        .join(format!("{}.yml", template_id))
}

/// The instruction template bundled with the binary.
pub fn builtin_template() -> AppResult<InstructionTemplate> {
    let definition: InstructionTemplate = serde_yaml::from_str(BUILTIN_TEMPLATE)
        .map_err(|e| AppError::Prompt(format!("Failed to parse builtin template: {}", e)))?;
    validate_template(&definition)?;
    Ok(definition)
}

/// Load a template definition by ID from the workspace.
///
/// Reads `.listin/prompts/<id>.yml`.
///
/// # Example
/// ```no_run
/// use listin_prompt::load_template;
/// use std::path::Path;
///
/// # fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let template = load_template(Path::new("."), "listin.agent.instruction")?;
/// println!("Loaded template: {}", template.title);
/// # Ok(())
/// # }
/// ```
pub fn load_template(workspace_path: &Path, template_id: &str) -> AppResult<InstructionTemplate> {
    let template_file = template_path(workspace_path, template_id);

    tracing::debug!("Loading template from: {:?}", template_file);

    if !template_file.exists() {
        return Err(AppError::Prompt(format!(
            "Template file not found: {:?}",
            template_file
        )));
    }

    let contents = std::fs::read_to_string(&template_file).map_err(|e| {
        AppError::Prompt(format!(
            "Failed to read template file {:?}: {}",
            template_file, e
        ))
    })?;

    let definition: InstructionTemplate = serde_yaml::from_str(&contents).map_err(|e| {
        AppError::Prompt(format!(
            "Failed to parse template YAML {:?}: {}",
            template_file, e
        ))
    })?;

    validate_template(&definition)?;

    if definition.id != template_id {
        tracing::warn!(
            "Template file {:?} declares id '{}'",
            template_file,
            definition.id
        );
    }

    tracing::info!("Loaded template: {} ({})", definition.id, definition.title);

    Ok(definition)
}

/// Resolve a template: a workspace file wins, otherwise the builtin
/// template when the id matches it.
pub fn resolve_template(workspace_path: &Path, template_id: &str) -> AppResult<InstructionTemplate> {
    if template_path(workspace_path, template_id).exists() {
        return load_template(workspace_path, template_id);
    }

    if template_id == DEFAULT_TEMPLATE_ID {
        tracing::debug!("Using builtin template '{}'", template_id);
        return builtin_template();
    }

    Err(AppError::Prompt(format!(
        "Unknown template '{}': no file at {:?} and no builtin with that id",
        template_id,
        template_path(workspace_path, template_id)
    )))
}

/// List all template IDs available in the workspace.
pub fn list_templates(workspace_path: &Path) -> AppResult<Vec<String>> {
    let prompts_dir = workspace_path.join(PROMPTS_DIR);

    if !prompts_dir.exists() {
        return Ok(Vec::new());
    }

    let mut template_ids = Vec::new();

    for entry in walkdir::WalkDir::new(&prompts_dir)
        .max_depth(1)
        .into_iter()
        .filter_map(|e| e.ok())
    {
        let path = entry.path();
        if path.is_file() && path.extension().and_then(|s| s.to_str()) == Some("yml") {
            if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
                template_ids.push(stem.to_string());
            }
        }
    }

    template_ids.sort();
    Ok(template_ids)
}

/// Validate a template definition.
fn validate_template(def: &InstructionTemplate) -> AppResult<()> {
    if def.id.is_empty() {
        return Err(AppError::Prompt("Template ID cannot be empty".to_string()));
    }

    if def.title.is_empty() {
        return Err(AppError::Prompt("Template title cannot be empty".to_string()));
    }

    if def.template.trim().is_empty() {
        return Err(AppError::Prompt(
            "Template text cannot be empty".to_string(),
        ));
    }

    let version_ok = def
        .api_version
        .split_once('.')
        .map(|(major, minor)| {
            !major.is_empty()
                && !minor.is_empty()
                && major.chars().all(|c| c.is_ascii_digit())
                && minor.chars().all(|c| c.is_ascii_digit())
        })
        .unwrap_or(false);

    if !version_ok {
        return Err(AppError::Prompt(format!(
            "Invalid apiVersion format: {}. Expected format: 'x.y'",
            def.api_version
        )));
    }

    Ok(())
}
