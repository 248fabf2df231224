//! Fail-soft knowledge document loader.

use crate::types::KnowledgeDocument;
use listin_core::{AppError, AppResult};
use serde_json::Value;
use std::fmt;
use std::io::ErrorKind;
use std::path::Path;

/// Why a load fell back to the empty document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DegradedReason {
    /// The file does not exist
    NotFound,
    /// The file exists but could not be read
    Unreadable(String),
    /// The contents are not a JSON object
    Malformed(String),
}

impl fmt::Display for DegradedReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DegradedReason::NotFound => f.write_str("file not found"),
            DegradedReason::Unreadable(e) => write!(f, "unreadable: {}", e),
            DegradedReason::Malformed(e) => write!(f, "malformed: {}", e),
        }
    }
}

/// Which path a load took.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadStatus {
    Loaded,
    Degraded(DegradedReason),
}

/// Result of [`load`]: the document plus how it was obtained.
#[derive(Debug, Clone, PartialEq)]
pub struct LoadOutcome {
    pub document: KnowledgeDocument,
    pub status: LoadStatus,
}

impl LoadOutcome {
    fn degraded(reason: DegradedReason) -> Self {
        Self {
            document: KnowledgeDocument::empty(),
            status: LoadStatus::Degraded(reason),
        }
    }

    pub fn is_loaded(&self) -> bool {
        self.status == LoadStatus::Loaded
    }

    pub fn is_degraded(&self) -> bool {
        !self.is_loaded()
    }
}

/// Load the knowledge document at `path`.
///
/// Never fails: a missing, unreadable or malformed file produces an empty
/// document with a [`LoadStatus::Degraded`] status, and a warning is logged.
///
/// # Example
/// ```no_run
/// use listin_knowledge::load;
/// use std::path::Path;
///
/// let outcome = load(Path::new("agent/listin_seller_data.json"));
/// if outcome.is_degraded() {
///     eprintln!("running without store data");
/// }
/// println!("store: {:?}", outcome.document.store_name());
/// ```
pub fn load(path: &Path) -> LoadOutcome {
    tracing::debug!("Loading knowledge document from {:?}", path);

    let contents = match std::fs::read_to_string(path) {
        Ok(contents) => contents,
        Err(e) => {
            let reason = match e.kind() {
                ErrorKind::NotFound => DegradedReason::NotFound,
                // Not UTF-8 text
                ErrorKind::InvalidData => DegradedReason::Malformed(e.to_string()),
                _ => DegradedReason::Unreadable(e.to_string()),
            };
            tracing::warn!("Could not load {:?} ({}); using empty store data", path, reason);
            return LoadOutcome::degraded(reason);
        }
    };

    match parse_document(&contents) {
        Ok(document) => {
            tracing::info!(
                "Loaded knowledge document {:?} ({} sections)",
                path,
                document.len()
            );
            LoadOutcome {
                document,
                status: LoadStatus::Loaded,
            }
        }
        Err(e) => {
            let reason = DegradedReason::Malformed(e.to_string());
            tracing::warn!("Could not load {:?} ({}); using empty store data", path, reason);
            LoadOutcome::degraded(reason)
        }
    }
}

/// Parse document text strictly. The top-level value must be a JSON object.
pub fn parse_document(contents: &str) -> AppResult<KnowledgeDocument> {
    let value: Value = serde_json::from_str(contents)?;

    match value {
        Value::Object(map) => Ok(KnowledgeDocument::from_map(map)),
        other => Err(AppError::Knowledge(format!(
            "expected a JSON object at the top level, found {}",
            json_kind(&other)
        ))),
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::KnowledgeSection;
    use serde_json::{json, Map};
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_missing_file_degrades_to_empty() {
        let temp = TempDir::new().unwrap();
        let outcome = load(&temp.path().join("missing.json"));

        assert!(outcome.document.is_empty());
        assert_eq!(outcome.status, LoadStatus::Degraded(DegradedReason::NotFound));
    }

    #[test]
    fn test_invalid_json_degrades_to_empty() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("store.json");
        fs::write(&path, "{\"store_name\": \"EcoWear\",").unwrap();

        let outcome = load(&path);
        assert!(outcome.document.is_empty());
        assert!(matches!(
            outcome.status,
            LoadStatus::Degraded(DegradedReason::Malformed(_))
        ));
    }

    #[test]
    fn test_invalid_utf8_is_malformed() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("store.json");
        fs::write(&path, [b'{', 0xff, 0xfe, b'}']).unwrap();

        let outcome = load(&path);
        assert!(outcome.document.is_empty());
        assert!(matches!(
            outcome.status,
            LoadStatus::Degraded(DegradedReason::Malformed(_))
        ));
    }

    #[test]
    fn test_non_object_degrades_to_empty() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("store.json");
        fs::write(&path, "[1, 2, 3]").unwrap();

        let outcome = load(&path);
        assert!(outcome.is_degraded());
        match outcome.status {
            LoadStatus::Degraded(DegradedReason::Malformed(msg)) => assert!(msg.contains("an array")),
            other => panic!("unexpected status: {:?}", other),
        }
    }

    #[test]
    fn test_directory_is_unreadable_not_missing() {
        let temp = TempDir::new().unwrap();
        let outcome = load(temp.path());
        assert!(outcome.document.is_empty());
        assert!(matches!(
            outcome.status,
            LoadStatus::Degraded(DegradedReason::Unreadable(_))
        ));
    }

    #[test]
    fn test_load_is_repeatable() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("store.json");
        fs::write(&path, r#"{"store_name": "EcoWear Collective"}"#).unwrap();

        let first = load(&path);
        let second = load(&path);
        assert!(first.is_loaded());
        assert_eq!(first, second);
    }

    #[test]
    fn test_required_sections_survive_write_and_load() {
        let mut original = Map::new();
        original.insert("store_name".into(), json!("EcoWear Collective"));
        original.insert(
            "store_info".into(),
            json!({"name": "EcoWear Collective", "contact": {"telegram": "@ecowear"}}),
        );
        original.insert(
            "products".into(),
            json!([{"name": "Organic Cotton Oversized T-shirt", "price": 180000, "sizes": ["S", "M"]}]),
        );
        original.insert(
            "delivery_policy".into(),
            json!({"tashkent": "1-3 ish kuni", "international": "5-10 ish kuni"}),
        );
        original.insert(
            "payment_policy".into(),
            json!({"methods": ["Payme", "Click", "UzCard", "Humo", "PayPal"], "cash_on_delivery": true}),
        );
        original.insert("return_policy".into(), json!({"days": 30, "condition": "original"}));

        let temp = TempDir::new().unwrap();
        let path = temp.path().join("listin_seller_data.json");
        fs::write(&path, serde_json::to_string_pretty(&original).unwrap()).unwrap();

        let outcome = load(&path);
        assert!(outcome.is_loaded());
        for section in KnowledgeSection::REQUIRED {
            assert_eq!(
                outcome.document.section(section),
                original.get(section.key()),
                "section {} changed",
                section
            );
        }
    }

    #[test]
    fn test_parse_document_is_strict() {
        assert!(parse_document("not json").is_err());
        assert!(matches!(parse_document("\"text\""), Err(AppError::Knowledge(_))));
        assert!(parse_document("{}").unwrap().is_empty());
    }
}
