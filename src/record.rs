//! Trust registry record construction
//!
//! Thin helpers for the BFF integration layer: a record envelope pairing
//! a schema fingerprint with a record id, a data payload, and ledger
//! synchronization metadata. The wire shape is camelCase.

use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{Result, SchemaError};
use crate::hash::SchemaHash;

/// Ledger synchronization state for a record
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlockchainSync {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_synced: Option<DateTime<Utc>>,
    pub pending_changes: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub blockchain_resource_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sync_error: Option<String>,
}

impl BlockchainSync {
    /// State for a freshly created record: changes pending, never synced
    pub fn pending() -> Self {
        Self {
            last_synced: None,
            pending_changes: true,
            blockchain_resource_id: None,
            sync_error: None,
        }
    }
}

/// Provenance metadata attached to a record
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecordMetadata {
    pub schema_name: String,
    pub created_by: String,
    pub created_at: DateTime<Utc>,
}

/// A trust registry record envelope
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrustRegistryRecord {
    pub schema_hash: SchemaHash,
    pub record_id: String,
    pub data: Value,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<RecordMetadata>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub blockchain_sync: Option<BlockchainSync>,
}

/// Build a record for a named schema, looking its fingerprint up in the
/// name -> hash table produced by [`crate::hash::schema_hashes`].
pub fn create_trust_registry_record(
    hashes: &IndexMap<String, SchemaHash>,
    schema_name: &str,
    record_id: impl Into<String>,
    data: Value,
    created_by: &str,
) -> Result<TrustRegistryRecord> {
    let schema_hash = hashes
        .get(schema_name)
        .cloned()
        .ok_or_else(|| SchemaError::UnknownSchema(schema_name.to_string()))?;

    Ok(TrustRegistryRecord {
        schema_hash,
        record_id: record_id.into(),
        data,
        metadata: Some(RecordMetadata {
            schema_name: schema_name.to_string(),
            created_by: created_by.to_string(),
            created_at: Utc::now(),
        }),
        blockchain_sync: Some(BlockchainSync::pending()),
    })
}

/// Derive a record id from the payload's `id` or `did` field.
///
/// A payload with neither is an error; silently inventing an identifier
/// would produce records that cannot be correlated with their source.
pub fn derive_record_id(data: &Value) -> Result<String> {
    for key in ["id", "did"] {
        if let Some(id) = data.get(key).and_then(Value::as_str) {
            if !id.is_empty() {
                return Ok(id.to_string());
            }
        }
    }
    Err(SchemaError::MissingRecordId)
}
