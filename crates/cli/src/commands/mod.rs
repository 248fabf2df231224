//! Command handlers for the Listin CLI.
//!
//! This module organizes all CLI commands into separate submodules.

pub mod agent;
pub mod check;
pub mod render;
pub mod templates;

// Re-export command types for convenience
pub use agent::AgentCommand;
pub use check::CheckCommand;
pub use render::RenderCommand;
pub use templates::TemplatesCommand;

use listin_core::{AppError, AppResult};
use std::path::Path;

/// Write command output to `output`, or stdout when no file is given.
pub(crate) fn emit(output: Option<&Path>, contents: &str) -> AppResult<()> {
    match output {
        Some(path) => {
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                std::fs::create_dir_all(parent)?;
            }
            std::fs::write(path, contents).map_err(|e| {
                AppError::Other(format!("Failed to write {:?}: {}", path, e))
            })?;
            tracing::info!("Wrote {} bytes to {:?}", contents.len(), path);
        }
        None => println!("{}", contents),
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_emit_creates_parent_directories() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("out/agent.json");

        emit(Some(&path), "{}").unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "{}");
    }
}
