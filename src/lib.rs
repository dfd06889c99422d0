//! OriginVault Schema Registry Tooling
//!
//! Multi-language type generation for the OriginVault trust-registry
//! schema catalog: loads a layer of JSON Schema documents, computes
//! content fingerprints for schema identity, and emits per-language
//! type definitions, runtime validation helpers, and package manifests.
//!
//! ## Features
//!
//! - **Deterministic identity**: schemas are canonicalized (recursive key
//!   sort) and fingerprinted with truncated SHA-256, so identical content
//!   always yields the identical hash
//! - **Layered sources**: named schema layers select which schema set
//!   feeds a run; layers may inherit from another layer's package
//! - **Multi-language output**: TypeScript, Python, Rust, and Go, each
//!   with its own renderer options and package metadata
//! - **Partial-failure tolerance**: a bad schema file or a failing
//!   language never aborts the batch
//!
//! ## Pipeline
//!
//! ```text
//! drafts/*.json
//!     │  loader (name -> document registry, insertion-ordered)
//!     ▼
//! SchemaMap ──► hash (SCHEMA_HASHES)
//!     │
//!     ├──► codegen  ──► generated/<lang>/types.<ext>
//!     ├──► helpers  ──► generated/<lang>/validation.<ext>
//!     └──► manifest ──► generated/<lang>/package.json | setup.py | ...
//! ```

pub mod codegen;
pub mod config;
pub mod error;
pub mod hash;
pub mod helpers;
pub mod loader;
pub mod manifest;
pub mod pipeline;
pub mod record;
pub mod validate;

pub use codegen::{BuiltinCompiler, CompileRequest, SchemaSource, TypeCompiler};
pub use config::{GeneratorConfig, Language, LanguageConfig, SchemaLayer, DEFAULT_LAYER};
pub use error::{Result, SchemaError};
pub use hash::{canonical_json, schema_hashes, SchemaHash};
pub use loader::{load_schemas, LoadReport, SchemaMap, SourceStatus};
pub use pipeline::{generate, GeneratedFile, RunSummary};
pub use record::{create_trust_registry_record, derive_record_id, TrustRegistryRecord};
pub use validate::SchemaValidators;
