//! Error types for the schema tooling

use thiserror::Error;

/// Result type for schema operations
pub type Result<T> = std::result::Result<T, SchemaError>;

/// Schema tooling errors
#[derive(Error, Debug)]
pub enum SchemaError {
    #[error("Unknown schema layer: {0}")]
    UnknownLayer(String),

    #[error("Unknown language: {0}")]
    UnknownLanguage(String),

    #[error("Unknown schema: {0}")]
    UnknownSchema(String),

    #[error("Record data has no usable identifier (expected an 'id' or 'did' field)")]
    MissingRecordId,

    #[error("Invalid schema {name}: {message}")]
    InvalidSchema { name: String, message: String },

    #[error("Invalid {schema} data: {detail}")]
    Validation { schema: String, detail: String },

    #[error("Type generation failed for {language}: {message}")]
    Codegen { language: String, message: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
