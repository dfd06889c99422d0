//! Generation configuration
//!
//! Language and layer tables are explicit immutable structs built at
//! start-up and passed by parameter through the pipeline, so tests can
//! inject alternate configurations. [`GeneratorConfig::originvault`]
//! builds the production tables.

use std::collections::BTreeMap;
use std::fmt;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::error::{Result, SchemaError};

/// The layer generated when no `--layer` selector is given
pub const DEFAULT_LAYER: &str = "originvault-schemas";

/// Supported target languages
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    Typescript,
    Python,
    Rust,
    Go,
}

impl Language {
    pub const ALL: [Language; 4] = [
        Language::Typescript,
        Language::Python,
        Language::Rust,
        Language::Go,
    ];

    /// Stable language identifier, as used by the `--lang` selector
    pub fn id(&self) -> &'static str {
        match self {
            Language::Typescript => "typescript",
            Language::Python => "python",
            Language::Rust => "rust",
            Language::Go => "go",
        }
    }

    /// File extension for generated sources
    pub fn extension(&self) -> &'static str {
        match self {
            Language::Typescript => "ts",
            Language::Python => "py",
            Language::Rust => "rs",
            Language::Go => "go",
        }
    }

    /// Parse a language identifier
    pub fn parse(id: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|lang| lang.id() == id)
            .ok_or_else(|| SchemaError::UnknownLanguage(id.to_string()))
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.id())
    }
}

/// Static configuration for one target language
#[derive(Debug, Clone)]
pub struct LanguageConfig {
    pub language: Language,
    /// Published package name (e.g. "@originvault/types")
    pub package_name: String,
    /// Output directory, relative to the run root
    pub output_dir: PathBuf,
    /// Named toggles passed through to the type compiler
    pub renderer_options: BTreeMap<String, Value>,
    /// Whether a validation-helper source file is emitted
    pub validation_helpers: bool,
}

/// A named, ordered source of schema documents
#[derive(Debug, Clone)]
pub struct SchemaLayer {
    pub name: String,
    /// Directory path (relative to the run root) or an `http` URL
    pub source: String,
    /// Package the layer publishes as
    pub package: String,
    /// Package of the layer this one inherits from
    pub inherits_from: Option<String>,
}

/// Immutable configuration for one generation run
#[derive(Debug, Clone)]
pub struct GeneratorConfig {
    /// Root directory for resolving layer sources and output dirs
    pub root: PathBuf,
    pub languages: Vec<LanguageConfig>,
    pub layers: Vec<SchemaLayer>,
}

impl GeneratorConfig {
    /// The production language and layer tables
    pub fn originvault(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            languages: vec![
                LanguageConfig {
                    language: Language::Typescript,
                    package_name: "@originvault/types".to_string(),
                    output_dir: PathBuf::from("generated/typescript"),
                    renderer_options: renderer_options(&[
                        ("just-types", json!(false)),
                        ("runtime-typecheck", json!(true)),
                        ("nice-property-names", json!(true)),
                        ("prefer-unions", json!(true)),
                        ("prefer-const-values", json!(true)),
                    ]),
                    validation_helpers: true,
                },
                LanguageConfig {
                    language: Language::Python,
                    package_name: "originvault_types".to_string(),
                    output_dir: PathBuf::from("generated/python"),
                    renderer_options: renderer_options(&[
                        ("python-version", json!("3.8")),
                        ("just-types", json!(false)),
                        ("use-nice-names", json!(true)),
                        ("nice-property-names", json!(true)),
                    ]),
                    validation_helpers: true,
                },
                LanguageConfig {
                    language: Language::Rust,
                    package_name: "originvault-types".to_string(),
                    output_dir: PathBuf::from("generated/rust"),
                    renderer_options: renderer_options(&[
                        ("derive-debug", json!(true)),
                        ("derive-clone", json!(true)),
                        ("derive-partial-eq", json!(true)),
                        ("derive-serialize", json!(true)),
                        ("derive-deserialize", json!(true)),
                        ("visibility", json!("public")),
                    ]),
                    validation_helpers: true,
                },
                LanguageConfig {
                    language: Language::Go,
                    package_name: "originvault-types".to_string(),
                    output_dir: PathBuf::from("generated/go"),
                    renderer_options: renderer_options(&[
                        ("package", json!("originvault")),
                        ("just-types", json!(false)),
                        ("nice-property-names", json!(true)),
                    ]),
                    validation_helpers: false,
                },
            ],
            layers: vec![
                SchemaLayer {
                    name: "dif-schemas".to_string(),
                    source:
                        "https://raw.githubusercontent.com/decentralized-identity/credential-schemas/main"
                            .to_string(),
                    package: "@openverifiable/dif-types".to_string(),
                    inherits_from: None,
                },
                SchemaLayer {
                    name: "open-verifiable-schemas".to_string(),
                    source: "../open-verifiable-schema-registry/schemas".to_string(),
                    package: "@openverifiable/types".to_string(),
                    inherits_from: None,
                },
                SchemaLayer {
                    name: DEFAULT_LAYER.to_string(),
                    source: "./drafts".to_string(),
                    package: "@originvault/types".to_string(),
                    inherits_from: Some("@openverifiable/types".to_string()),
                },
            ],
        }
    }

    /// Look up a layer by name
    pub fn find_layer(&self, name: &str) -> Option<&SchemaLayer> {
        self.layers.iter().find(|layer| layer.name == name)
    }

    /// Select language configs matching a filter.
    ///
    /// Only listed languages are selected; a filter that matches nothing
    /// selects nothing. "All languages" is spelled [`Language::ALL`].
    pub fn select_languages(&self, filter: &[Language]) -> Vec<&LanguageConfig> {
        self.languages
            .iter()
            .filter(|config| filter.contains(&config.language))
            .collect()
    }

    /// Resolve a layer's source against the run root; `http` URLs pass through
    pub fn resolve_source(&self, layer: &SchemaLayer) -> String {
        if layer.source.starts_with("http") {
            layer.source.clone()
        } else {
            self.root.join(&layer.source).to_string_lossy().into_owned()
        }
    }
}

fn renderer_options(pairs: &[(&str, Value)]) -> BTreeMap<String, Value> {
    pairs
        .iter()
        .map(|(key, value)| (key.to_string(), value.clone()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_language_parse_roundtrip() {
        for lang in Language::ALL {
            assert_eq!(Language::parse(lang.id()).unwrap(), lang);
        }
        assert!(Language::parse("cobol").is_err());
    }

    #[test]
    fn test_default_layer_exists() {
        let config = GeneratorConfig::originvault(".");
        let layer = config.find_layer(DEFAULT_LAYER).unwrap();
        assert_eq!(layer.package, "@originvault/types");
        assert_eq!(layer.inherits_from.as_deref(), Some("@openverifiable/types"));
    }

    #[test]
    fn test_go_has_no_validation_helpers() {
        let config = GeneratorConfig::originvault(".");
        let go = config
            .languages
            .iter()
            .find(|c| c.language == Language::Go)
            .unwrap();
        assert!(!go.validation_helpers);
    }

    #[test]
    fn test_select_languages() {
        let config = GeneratorConfig::originvault(".");
        assert_eq!(config.select_languages(&Language::ALL).len(), 4);
        let selected = config.select_languages(&[Language::Go]);
        assert_eq!(selected.len(), 1);
        assert_eq!(selected[0].language, Language::Go);
    }

    #[test]
    fn test_empty_filter_selects_no_languages() {
        let config = GeneratorConfig::originvault(".");
        assert!(config.select_languages(&[]).is_empty());
    }

    #[test]
    fn test_resolve_source() {
        let config = GeneratorConfig::originvault("/repo");
        let layer = config.find_layer(DEFAULT_LAYER).unwrap();
        assert!(config.resolve_source(layer).starts_with("/repo"));

        let remote = config.find_layer("dif-schemas").unwrap();
        assert!(config.resolve_source(remote).starts_with("https://"));
    }
}
