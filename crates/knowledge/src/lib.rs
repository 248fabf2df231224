//! Store knowledge document handling.
//!
//! The knowledge document is the JSON file every assistant answer is
//! grounded in: store identity, policies and the product catalog. Loading
//! is fail-soft; a missing or malformed file yields an empty document and a
//! [`LoadStatus::Degraded`] status instead of an error.

pub mod loader;
pub mod structure;
pub mod types;

// Re-export commonly used types
pub use loader::{load, parse_document, DegradedReason, LoadOutcome, LoadStatus};
pub use structure::{check_structure, FieldCheck, StructureReport};
pub use types::{KnowledgeDocument, KnowledgeSection, Product, StoreInfo};
