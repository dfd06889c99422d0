//! Runtime schema validation
//!
//! Compiles every schema in a loaded registry once, then answers boolean
//! conformance checks and assert-style checks whose errors carry the
//! schema name and the underlying validation detail.

use indexmap::IndexMap;
use jsonschema::JSONSchema;
use serde_json::Value;

use crate::error::{Result, SchemaError};
use crate::loader::SchemaMap;

/// Compiled validators for a loaded schema registry
pub struct SchemaValidators {
    validators: IndexMap<String, JSONSchema>,
}

impl SchemaValidators {
    /// Compile all schemas in the registry.
    ///
    /// A schema that fails to compile aborts with an error naming it;
    /// a registry with unloadable schemas should be fixed, not partially
    /// validated against.
    pub fn compile(schemas: &SchemaMap) -> Result<Self> {
        let mut validators = IndexMap::new();
        for (name, schema) in schemas {
            let compiled = JSONSchema::compile(schema).map_err(|e| SchemaError::InvalidSchema {
                name: name.clone(),
                message: e.to_string(),
            })?;
            validators.insert(name.clone(), compiled);
        }
        Ok(Self { validators })
    }

    /// Names of all compiled schemas, in registry order
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.validators.keys().map(String::as_str)
    }

    /// Check data against a named schema; unknown names validate nothing
    pub fn is_valid(&self, schema_name: &str, data: &Value) -> bool {
        self.validators
            .get(schema_name)
            .map(|validator| validator.is_valid(data))
            .unwrap_or(false)
    }

    /// Check data against a named schema, with failure detail
    pub fn assert_valid(&self, schema_name: &str, data: &Value) -> Result<()> {
        let validator = self
            .validators
            .get(schema_name)
            .ok_or_else(|| SchemaError::UnknownSchema(schema_name.to_string()))?;

        if let Err(errors) = validator.validate(data) {
            let detail = errors
                .map(|e| e.to_string())
                .collect::<Vec<_>>()
                .join("; ");
            return Err(SchemaError::Validation {
                schema: schema_name.to_string(),
                detail,
            });
        }
        Ok(())
    }
}
