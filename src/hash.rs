//! Content fingerprints for schema identity
//!
//! A [`SchemaHash`] is a short, deterministic fingerprint of a schema
//! document: the document is serialized in canonical form (object keys
//! sorted at every nesting level), digested with SHA-256, and truncated
//! to 16 hex characters. Two structurally identical schemas always hash
//! identically, regardless of key order in the source files.
//!
//! This is an identity token for registry bookkeeping, not an integrity
//! proof against tampering.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use sha2::{Digest, Sha256};
use std::fmt;

use crate::loader::SchemaMap;

/// Length of the hex fingerprint
pub const FINGERPRINT_LEN: usize = 16;

/// Truncated SHA-256 fingerprint of a canonicalized schema document
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SchemaHash(String);

impl SchemaHash {
    /// Compute the fingerprint of a schema document
    pub fn of(schema: &Value) -> Self {
        let canonical = canonical_json(schema);
        let digest = Sha256::digest(canonical.as_bytes());
        let hex = format!("{:x}", digest);
        Self(hex[..FINGERPRINT_LEN].to_string())
    }

    /// Get the hex string representation
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Verify that a schema document matches this fingerprint
    pub fn verify(&self, schema: &Value) -> bool {
        Self::of(schema).0 == self.0
    }
}

impl fmt::Display for SchemaHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for SchemaHash {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// Serialize a JSON value with object keys sorted at every nesting level.
///
/// Key order in the input is irrelevant to the output, so documents that
/// differ only in key ordering canonicalize identically.
pub fn canonical_json(value: &Value) -> String {
    serde_json::to_string(&canonicalize(value)).unwrap_or_default()
}

fn canonicalize(value: &Value) -> Value {
    match value {
        Value::Object(map) => {
            let mut keys: Vec<&String> = map.keys().collect();
            keys.sort();
            let mut sorted = serde_json::Map::new();
            for key in keys {
                if let Some(inner) = map.get(key) {
                    sorted.insert(key.clone(), canonicalize(inner));
                }
            }
            Value::Object(sorted)
        }
        Value::Array(items) => Value::Array(items.iter().map(canonicalize).collect()),
        other => other.clone(),
    }
}

/// Compute the name -> fingerprint table for a loaded schema registry
pub fn schema_hashes(schemas: &SchemaMap) -> IndexMap<String, SchemaHash> {
    schemas
        .iter()
        .map(|(name, schema)| (name.clone(), SchemaHash::of(schema)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_hash_is_fixed_length_hex() {
        let hash = SchemaHash::of(&json!({"type": "object"}));
        assert_eq!(hash.as_str().len(), FINGERPRINT_LEN);
        assert!(hash.as_str().chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn test_top_level_key_order_is_irrelevant() {
        let a: Value = serde_json::from_str(r#"{"type": "object", "title": "Admin"}"#).unwrap();
        let b: Value = serde_json::from_str(r#"{"title": "Admin", "type": "object"}"#).unwrap();
        assert_eq!(SchemaHash::of(&a), SchemaHash::of(&b));
    }

    #[test]
    fn test_nested_key_order_is_irrelevant() {
        let a: Value = serde_json::from_str(
            r#"{"properties": {"adminId": {"type": "string", "format": "uri"}}}"#,
        )
        .unwrap();
        let b: Value = serde_json::from_str(
            r#"{"properties": {"adminId": {"format": "uri", "type": "string"}}}"#,
        )
        .unwrap();
        assert_eq!(SchemaHash::of(&a), SchemaHash::of(&b));
    }

    #[test]
    fn test_different_content_hashes_differently() {
        let a = json!({"type": "object"});
        let b = json!({"type": "string"});
        assert_ne!(SchemaHash::of(&a), SchemaHash::of(&b));
    }

    #[test]
    fn test_verify() {
        let schema = json!({"type": "object", "required": ["adminId"]});
        let hash = SchemaHash::of(&schema);
        assert!(hash.verify(&schema));
        assert!(!hash.verify(&json!({"type": "string"})));
    }

    #[test]
    fn test_canonical_json_sorts_keys() {
        let value: Value = serde_json::from_str(r#"{"b": 1, "a": {"d": 2, "c": 3}}"#).unwrap();
        assert_eq!(canonical_json(&value), r#"{"a":{"c":3,"d":2},"b":1}"#);
    }
}
