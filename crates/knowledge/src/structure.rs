//! Structure check for knowledge documents.
//!
//! The loader accepts any JSON object; this check reports which of the
//! required sections are missing so operators can fix the data file.

use crate::types::{KnowledgeDocument, KnowledgeSection};
use serde::Serialize;

/// Presence of one required section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldCheck {
    pub section: KnowledgeSection,
    pub present: bool,
}

/// Result of [`check_structure`], one entry per required section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StructureReport {
    pub fields: Vec<FieldCheck>,
}

impl StructureReport {
    /// True only when every required section is present.
    pub fn is_healthy(&self) -> bool {
        self.fields.iter().all(|f| f.present)
    }

    pub fn missing(&self) -> Vec<KnowledgeSection> {
        self.fields
            .iter()
            .filter(|f| !f.present)
            .map(|f| f.section)
            .collect()
    }
}

/// Check `document` for the required top-level sections.
pub fn check_structure(document: &KnowledgeDocument) -> StructureReport {
    let fields = KnowledgeSection::REQUIRED
        .iter()
        .map(|&section| FieldCheck {
            section,
            present: document.contains(section),
        })
        .collect();

    let report = StructureReport { fields };
    if !report.is_healthy() {
        tracing::debug!("Knowledge document is missing sections: {:?}", report.missing());
    }
    report
}
