//! Knowledge document type definitions.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};
use std::fmt;

/// Top-level sections of a knowledge document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum KnowledgeSection {
    StoreName,
    StoreInfo,
    Products,
    DeliveryPolicy,
    PaymentPolicy,
    ReturnPolicy,
    SellerInfo,
}

impl KnowledgeSection {
    /// Sections a healthy document must contain, in report order.
    pub const REQUIRED: [KnowledgeSection; 6] = [
        KnowledgeSection::StoreName,
        KnowledgeSection::StoreInfo,
        KnowledgeSection::Products,
        KnowledgeSection::DeliveryPolicy,
        KnowledgeSection::PaymentPolicy,
        KnowledgeSection::ReturnPolicy,
    ];

    /// JSON key of the section.
    pub fn key(&self) -> &'static str {
        match self {
            KnowledgeSection::StoreName => "store_name",
            KnowledgeSection::StoreInfo => "store_info",
            KnowledgeSection::Products => "products",
            KnowledgeSection::DeliveryPolicy => "delivery_policy",
            KnowledgeSection::PaymentPolicy => "payment_policy",
            KnowledgeSection::ReturnPolicy => "return_policy",
            KnowledgeSection::SellerInfo => "seller_info",
        }
    }
}

impl fmt::Display for KnowledgeSection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Parsed store knowledge document.
///
/// Every section is optional: accessors return `None` or an empty
/// collection when a section is absent or has an unexpected shape. Keys
/// outside the known sections are kept as-is. The document exposes no
/// mutating API; reload the file to replace it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct KnowledgeDocument {
    fields: Map<String, Value>,
}

impl KnowledgeDocument {
    /// The degenerate document used when the source cannot be loaded.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn from_map(fields: Map<String, Value>) -> Self {
        Self { fields }
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.fields.get(key)
    }

    pub fn section(&self, section: KnowledgeSection) -> Option<&Value> {
        self.fields.get(section.key())
    }

    pub fn contains(&self, section: KnowledgeSection) -> bool {
        self.fields.contains_key(section.key())
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Store name, if present as a string. Blank values are returned as-is.
    pub fn store_name(&self) -> Option<&str> {
        self.section(KnowledgeSection::StoreName)
            .and_then(Value::as_str)
    }

    /// Store identity block, if present and shaped like a mapping.
    pub fn store_info(&self) -> Option<StoreInfo> {
        let value = self.section(KnowledgeSection::StoreInfo)?;
        match StoreInfo::deserialize(value) {
            Ok(info) => Some(info),
            Err(e) => {
                tracing::debug!("Ignoring malformed store_info: {}", e);
                None
            }
        }
    }

    pub fn delivery_policy(&self) -> Option<&Map<String, Value>> {
        self.mapping(KnowledgeSection::DeliveryPolicy)
    }

    pub fn payment_policy(&self) -> Option<&Map<String, Value>> {
        self.mapping(KnowledgeSection::PaymentPolicy)
    }

    pub fn return_policy(&self) -> Option<&Map<String, Value>> {
        self.mapping(KnowledgeSection::ReturnPolicy)
    }

    pub fn seller_info(&self) -> Option<&Map<String, Value>> {
        self.mapping(KnowledgeSection::SellerInfo)
    }

    /// Product catalog in document order.
    ///
    /// Records that are not objects, or whose known fields have the wrong
    /// type, are skipped.
    pub fn products(&self) -> Vec<Product> {
        let Some(items) = self
            .section(KnowledgeSection::Products)
            .and_then(Value::as_array)
        else {
            return Vec::new();
        };

        items
            .iter()
            .enumerate()
            .filter_map(|(idx, item)| match Product::deserialize(item) {
                Ok(product) => Some(product),
                Err(e) => {
                    tracing::debug!("Skipping product #{}: {}", idx, e);
                    None
                }
            })
            .collect()
    }

    fn mapping(&self, section: KnowledgeSection) -> Option<&Map<String, Value>> {
        self.section(section).and_then(Value::as_object)
    }
}

/// Store identity: name, description, contacts and social links.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StoreInfo {
    #[serde(default)]
    pub name: Option<String>,

    #[serde(default)]
    pub description: Option<String>,

    /// Contact details (phone, email, address...) in whatever shape the
    /// store provides
    #[serde(default)]
    pub contact: Option<Value>,

    #[serde(default, alias = "social_media", alias = "socials")]
    pub social_links: Option<Value>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// A catalog entry.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Product {
    #[serde(default)]
    pub name: Option<String>,

    /// Price as written in the document (number or formatted string)
    #[serde(default)]
    pub price: Option<Value>,

    #[serde(default, deserialize_with = "one_or_many")]
    pub sizes: Vec<String>,

    #[serde(default, alias = "material", deserialize_with = "one_or_many")]
    pub materials: Vec<String>,

    /// Availability flag or description (`true`, `"in stock"`, ...)
    #[serde(default)]
    pub availability: Option<Value>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Accept either a single string or a list of strings.
fn one_or_many<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum OneOrMany {
        One(String),
        Many(Vec<String>),
    }

    Ok(match Option::<OneOrMany>::deserialize(deserializer)? {
        Some(OneOrMany::One(value)) => vec![value],
        Some(OneOrMany::Many(values)) => values,
        None => Vec::new(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn document(value: Value) -> KnowledgeDocument {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_empty_document_tolerates_every_accessor() {
        let doc = KnowledgeDocument::empty();
        assert!(doc.is_empty());
        assert_eq!(doc.store_name(), None);
        assert_eq!(doc.store_info(), None);
        assert!(doc.products().is_empty());
        assert!(doc.delivery_policy().is_none());
        assert!(doc.seller_info().is_none());
    }

    #[test]
    fn test_typed_accessors() {
        let doc = document(json!({
            "store_name": "EcoWear Collective",
            "store_info": {
                "name": "EcoWear Collective",
                "description": "Sustainable clothing",
                "contact": {"phone": "+998 90 123 45 67"},
                "social_media": {"instagram": "@ecowear"}
            },
            "delivery_policy": {"tashkent": "1-3 days"},
            "products": [
                {
                    "name": "Organic Cotton Oversized T-shirt",
                    "price": 180000,
                    "sizes": ["S", "M", "L", "XL"],
                    "material": "organic cotton",
                    "availability": true
                }
            ]
        }));

        assert_eq!(doc.store_name(), Some("EcoWear Collective"));

        let info = doc.store_info().unwrap();
        assert_eq!(info.description.as_deref(), Some("Sustainable clothing"));
        assert_eq!(info.social_links, Some(json!({"instagram": "@ecowear"})));

        let products = doc.products();
        assert_eq!(products.len(), 1);
        assert_eq!(products[0].sizes, vec!["S", "M", "L", "XL"]);
        assert_eq!(products[0].materials, vec!["organic cotton"]);
        assert_eq!(products[0].price, Some(json!(180000)));

        assert_eq!(
            doc.delivery_policy().and_then(|p| p.get("tashkent")),
            Some(&json!("1-3 days"))
        );
    }

    #[test]
    fn test_malformed_products_are_skipped() {
        let doc = document(json!({
            "products": [
                "not a record",
                {"name": "Linen Shirt", "sizes": 42},
                {"name": "Wool Scarf"}
            ]
        }));

        let products = doc.products();
        assert_eq!(products.len(), 1);
        assert_eq!(products[0].name.as_deref(), Some("Wool Scarf"));
    }

    #[test]
    fn test_non_string_store_name_is_absent() {
        let doc = document(json!({"store_name": 42}));
        assert!(doc.contains(KnowledgeSection::StoreName));
        assert_eq!(doc.store_name(), None);
    }

    #[test]
    fn test_unknown_keys_are_preserved() {
        let doc = document(json!({"store_name": "A", "faq": [1, 2]}));
        assert_eq!(doc.get("faq"), Some(&json!([1, 2])));
        assert_eq!(doc.keys().collect::<Vec<_>>(), vec!["store_name", "faq"]);
    }
}
