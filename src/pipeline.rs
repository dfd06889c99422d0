//! Run orchestration
//!
//! Drives one generation run: resolve the requested layer, load its
//! schemas, then for each selected language render and write the type
//! definitions, validation helpers, and package metadata.
//!
//! Error discipline (single-threaded, strictly sequential):
//! - unknown layer name: fatal, returned as an error
//! - zero schemas loaded: graceful short-circuit, no output files
//! - per-language failure: logged, recorded on the summary, and the
//!   remaining languages still run

use std::fs;
use std::path::PathBuf;

use tracing::{error, info, warn};

use crate::codegen::{CompileRequest, SchemaSource, TypeCompiler};
use crate::config::{GeneratorConfig, Language, LanguageConfig};
use crate::error::{Result, SchemaError};
use crate::helpers;
use crate::loader::{self, SchemaMap, SourceStatus};
use crate::manifest;

/// One generated output file, prior to being written to disk
#[derive(Debug, Clone)]
pub struct GeneratedFile {
    pub name: String,
    pub contents: String,
}

/// Per-language outcome of a run
#[derive(Debug)]
pub struct LanguageReport {
    pub language: Language,
    pub files: Vec<PathBuf>,
    pub error: Option<String>,
}

/// Summary of one generation run
#[derive(Debug)]
pub struct RunSummary {
    pub layer: String,
    pub schema_count: usize,
    pub languages: Vec<LanguageReport>,
}

/// Run type generation for one layer across the selected languages.
///
/// Only the listed languages run; an empty list generates nothing. Pass
/// [`Language::ALL`] to generate every configured language.
pub fn generate(
    config: &GeneratorConfig,
    compiler: &dyn TypeCompiler,
    languages: &[Language],
    layer_name: &str,
) -> Result<RunSummary> {
    let layer = config
        .find_layer(layer_name)
        .ok_or_else(|| SchemaError::UnknownLayer(layer_name.to_string()))?;

    let source = config.resolve_source(layer);
    let report = loader::load_schemas(&source);
    if report.status == SourceStatus::RemoteUnsupported {
        warn!(layer = %layer.name, "layer uses a remote source, which is not yet supported");
    }

    let mut summary = RunSummary {
        layer: layer.name.clone(),
        schema_count: report.schemas.len(),
        languages: Vec::new(),
    };

    if report.schemas.is_empty() {
        warn!(layer = %layer.name, "no schemas loaded, skipping generation");
        return Ok(summary);
    }

    for language_config in config.select_languages(languages) {
        info!(language = %language_config.language, layer = %layer.name, "generating types");
        match generate_language(config, compiler, language_config, &report.schemas, &layer.name) {
            Ok(files) => {
                info!(
                    language = %language_config.language,
                    files = files.len(),
                    "generation complete"
                );
                summary.languages.push(LanguageReport {
                    language: language_config.language,
                    files,
                    error: None,
                });
            }
            Err(e) => {
                error!(
                    language = %language_config.language,
                    layer = %layer.name,
                    error = %e,
                    "error generating types"
                );
                summary.languages.push(LanguageReport {
                    language: language_config.language,
                    files: Vec::new(),
                    error: Some(e.to_string()),
                });
            }
        }
    }

    Ok(summary)
}

/// Render every output file for one language, without touching the disk
pub fn render_language(
    compiler: &dyn TypeCompiler,
    config: &LanguageConfig,
    schemas: &SchemaMap,
    layer: &str,
) -> Result<Vec<GeneratedFile>> {
    let sources: Vec<SchemaSource> = schemas
        .iter()
        .map(|(name, schema)| SchemaSource::new(name.as_str(), schema.clone()))
        .collect();

    let leading_comments = vec![
        format!("Generated from {} schemas", layer),
        format!("Package: {}", config.package_name),
        "DO NOT EDIT MANUALLY - regenerate with schema-typegen".to_string(),
    ];

    let request = CompileRequest {
        sources: &sources,
        language: config.language,
        renderer_options: &config.renderer_options,
        leading_comments: &leading_comments,
    };

    let mut files = vec![GeneratedFile {
        name: format!("types.{}", config.language.extension()),
        contents: compiler.compile(&request)?,
    }];

    if let Some(helper_source) = helpers::emit_validation_helpers(config, schemas)? {
        files.push(GeneratedFile {
            name: format!("validation.{}", config.language.extension()),
            contents: helper_source,
        });
    }

    files.extend(manifest::emit_package_metadata(config, layer)?);
    Ok(files)
}

fn generate_language(
    config: &GeneratorConfig,
    compiler: &dyn TypeCompiler,
    language_config: &LanguageConfig,
    schemas: &SchemaMap,
    layer: &str,
) -> Result<Vec<PathBuf>> {
    let files = render_language(compiler, language_config, schemas, layer)?;

    let out_dir = config.root.join(&language_config.output_dir);
    fs::create_dir_all(&out_dir)?;

    let mut written = Vec::with_capacity(files.len());
    for file in files {
        let path = out_dir.join(&file.name);
        fs::write(&path, &file.contents)?;
        written.push(path);
    }
    Ok(written)
}
