//! Schema loading
//!
//! Reads every `*.json` file from a source directory (non-recursive) into
//! an insertion-ordered name -> document registry. Files are visited in
//! sorted order so the registry, and everything generated from it, is
//! deterministic across runs.
//!
//! Loading is partial-failure tolerant: an unparseable file is skipped and
//! reported, a missing directory or an `http` source yields an empty
//! registry with the condition flagged on the report. None of these abort
//! the run.

use std::fs;
use std::path::{Path, PathBuf};

use indexmap::IndexMap;
use serde_json::Value;
use tracing::{error, info, warn};

/// Insertion-ordered schema name -> schema document registry
pub type SchemaMap = IndexMap<String, Value>;

/// How the source location was handled
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceStatus {
    /// Directory existed and was read
    Loaded,
    /// Directory does not exist; treated as zero schemas
    MissingDirectory,
    /// `http`-prefixed source; remote loading is not implemented
    RemoteUnsupported,
}

/// A file that could not be loaded
#[derive(Debug, Clone)]
pub struct LoadError {
    pub file: String,
    pub message: String,
}

/// Outcome of loading one schema source
#[derive(Debug)]
pub struct LoadReport {
    pub schemas: SchemaMap,
    pub errors: Vec<LoadError>,
    pub status: SourceStatus,
}

impl LoadReport {
    fn empty(status: SourceStatus) -> Self {
        Self {
            schemas: SchemaMap::new(),
            errors: Vec::new(),
            status,
        }
    }
}

/// Load all schema documents from a source location.
///
/// The schema name is the file basename without its `.json` extension;
/// a trailing `.schema` suffix is also stripped, so `Admin.schema.json`
/// registers as `Admin`.
pub fn load_schemas(source: &str) -> LoadReport {
    if source.starts_with("http") {
        warn!(%source, "remote schema loading not yet implemented, skipping");
        return LoadReport::empty(SourceStatus::RemoteUnsupported);
    }

    let dir = Path::new(source);
    if !dir.exists() {
        warn!(%source, "source directory does not exist, skipping");
        return LoadReport::empty(SourceStatus::MissingDirectory);
    }

    let mut report = LoadReport::empty(SourceStatus::Loaded);
    let mut files: Vec<PathBuf> = Vec::new();

    match fs::read_dir(dir) {
        Ok(entries) => {
            for entry in entries.filter_map(|e| e.ok()) {
                let path = entry.path();
                if path.is_file() && path.extension().map_or(false, |ext| ext == "json") {
                    files.push(path);
                }
            }
        }
        Err(e) => {
            error!(%source, error = %e, "failed to read source directory");
            report.errors.push(LoadError {
                file: source.to_string(),
                message: e.to_string(),
            });
            return report;
        }
    }

    files.sort();

    for path in files {
        let file_name = path
            .file_name()
            .map(|f| f.to_string_lossy().to_string())
            .unwrap_or_default();

        let loaded = fs::read_to_string(&path)
            .map_err(|e| e.to_string())
            .and_then(|text| serde_json::from_str::<Value>(&text).map_err(|e| e.to_string()));

        match loaded {
            Ok(schema) => {
                report.schemas.insert(schema_name(&file_name), schema);
            }
            Err(message) => {
                error!(file = %file_name, %message, "error loading schema");
                report.errors.push(LoadError { file: file_name, message });
            }
        }
    }

    info!(count = report.schemas.len(), %source, "loaded schemas");
    report
}

fn schema_name(file_name: &str) -> String {
    file_name
        .trim_end_matches(".json")
        .trim_end_matches(".schema")
        .to_string()
}
