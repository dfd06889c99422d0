//! End-to-end generation runs against a tempdir-backed schema layer

use std::fs;
use std::path::Path;

use originvault_schema_registry::{
    pipeline, BuiltinCompiler, CompileRequest, GeneratorConfig, Language, Result, SchemaError,
    TypeCompiler, DEFAULT_LAYER,
};
use serde_json::json;
use tempfile::TempDir;

/// A repository root with a drafts/ directory holding the Admin schema
fn repo_with_admin_schema() -> TempDir {
    let root = tempfile::tempdir().unwrap();
    let drafts = root.path().join("drafts");
    fs::create_dir_all(&drafts).unwrap();
    let admin = json!({
        "$id": "https://schemas.originvault.box/Admin",
        "type": "object",
        "description": "A DID-managed admin with vault and node governance rights",
        "properties": {
            "adminId": {"type": "string"},
            "governsVaults": {"type": "array", "items": {"type": "string"}},
            "managesNodes": {"type": "array", "items": {"type": "string"}},
            "policyApprovals": {"type": "array", "items": {"type": "string"}},
            "trustLevel": {"type": "string", "enum": ["verified", "community"]}
        },
        "required": ["adminId", "governsVaults", "managesNodes", "policyApprovals"]
    });
    fs::write(
        drafts.join("Admin.schema.json"),
        serde_json::to_string_pretty(&admin).unwrap(),
    )
    .unwrap();
    root
}

fn read(path: &Path) -> String {
    fs::read_to_string(path).unwrap_or_else(|e| panic!("missing {:?}: {}", path, e))
}

#[test]
fn test_typescript_run_produces_types_validation_and_manifest() {
    let root = repo_with_admin_schema();
    let config = GeneratorConfig::originvault(root.path());

    let summary = pipeline::generate(
        &config,
        &BuiltinCompiler,
        &[Language::Typescript],
        DEFAULT_LAYER,
    )
    .unwrap();

    assert_eq!(summary.schema_count, 1);
    assert_eq!(summary.languages.len(), 1);
    assert!(summary.languages[0].error.is_none());

    let out = root.path().join("generated/typescript");
    let types = read(&out.join("types.ts"));
    assert!(types.contains("export interface Admin {"));
    assert!(types.contains("adminId: string;"));

    let validation = read(&out.join("validation.ts"));
    assert!(validation.contains("export const SCHEMAS = {"));
    assert!(validation.contains("export const SCHEMA_HASHES = {"));
    assert!(validation.contains("export function validateAdmin"));
    assert!(validation.contains("export function assertAdmin"));

    let package = read(&out.join("package.json"));
    assert!(package.contains("\"@originvault/types\""));
    assert!(out.join("index.ts").exists());
}

#[test]
fn test_go_run_has_no_validation_helpers() {
    let root = repo_with_admin_schema();
    let config = GeneratorConfig::originvault(root.path());

    pipeline::generate(&config, &BuiltinCompiler, &[Language::Go], DEFAULT_LAYER).unwrap();

    let out = root.path().join("generated/go");
    let types = read(&out.join("types.go"));
    assert!(types.contains("package originvault"));
    assert!(types.contains("type Admin struct {"));
    assert!(out.join("go.mod").exists());
    assert!(!out.join("validation.go").exists());
}

#[test]
fn test_unknown_layer_is_fatal() {
    let root = repo_with_admin_schema();
    let config = GeneratorConfig::originvault(root.path());

    let result = pipeline::generate(&config, &BuiltinCompiler, &[], "no-such-layer");
    match result {
        Err(SchemaError::UnknownLayer(name)) => assert_eq!(name, "no-such-layer"),
        other => panic!("expected UnknownLayer, got {:?}", other.map(|s| s.layer)),
    }
}

#[test]
fn test_unrecognized_language_selector_generates_nothing() {
    let root = repo_with_admin_schema();
    let config = GeneratorConfig::originvault(root.path());

    // The CLI drops unrecognized --lang ids before calling generate; a
    // selector that matched nothing must not fan out to all languages.
    let languages: Vec<Language> = ["cobol"]
        .iter()
        .filter_map(|id| Language::parse(id).ok())
        .collect();
    let summary = pipeline::generate(&config, &BuiltinCompiler, &languages, DEFAULT_LAYER).unwrap();

    assert_eq!(summary.schema_count, 1);
    assert!(summary.languages.is_empty());
    assert!(!root.path().join("generated").exists());
}

#[test]
fn test_zero_schemas_short_circuits_without_output() {
    let root = tempfile::tempdir().unwrap();
    fs::create_dir_all(root.path().join("drafts")).unwrap();
    let config = GeneratorConfig::originvault(root.path());

    let summary = pipeline::generate(&config, &BuiltinCompiler, &[], DEFAULT_LAYER).unwrap();
    assert_eq!(summary.schema_count, 0);
    assert!(summary.languages.is_empty());
    assert!(!root.path().join("generated").exists());
}

#[test]
fn test_missing_drafts_directory_is_not_an_error() {
    let root = tempfile::tempdir().unwrap();
    let config = GeneratorConfig::originvault(root.path());

    let summary = pipeline::generate(&config, &BuiltinCompiler, &[], DEFAULT_LAYER).unwrap();
    assert_eq!(summary.schema_count, 0);
}

#[test]
fn test_remote_layer_is_skipped() {
    let root = tempfile::tempdir().unwrap();
    let config = GeneratorConfig::originvault(root.path());

    let summary = pipeline::generate(&config, &BuiltinCompiler, &[], "dif-schemas").unwrap();
    assert_eq!(summary.schema_count, 0);
    assert!(!root.path().join("generated").exists());
}

#[test]
fn test_regeneration_is_byte_identical() {
    let root = repo_with_admin_schema();
    let config = GeneratorConfig::originvault(root.path());

    pipeline::generate(&config, &BuiltinCompiler, &[Language::Typescript], DEFAULT_LAYER).unwrap();
    let first = read(&root.path().join("generated/typescript/validation.ts"));

    pipeline::generate(&config, &BuiltinCompiler, &[Language::Typescript], DEFAULT_LAYER).unwrap();
    let second = read(&root.path().join("generated/typescript/validation.ts"));

    assert_eq!(first, second);
}

/// A compiler that fails for one language, to exercise batch isolation
struct FailingFor(Language);

impl TypeCompiler for FailingFor {
    fn compile(&self, request: &CompileRequest<'_>) -> Result<String> {
        if request.language == self.0 {
            return Err(SchemaError::Codegen {
                language: request.language.to_string(),
                message: "injected failure".to_string(),
            });
        }
        BuiltinCompiler.compile(request)
    }
}

#[test]
fn test_one_language_failing_does_not_abort_the_batch() {
    let root = repo_with_admin_schema();
    let config = GeneratorConfig::originvault(root.path());

    let summary = pipeline::generate(
        &config,
        &FailingFor(Language::Rust),
        &[Language::Rust, Language::Go],
        DEFAULT_LAYER,
    )
    .unwrap();

    let rust = summary
        .languages
        .iter()
        .find(|r| r.language == Language::Rust)
        .unwrap();
    assert!(rust.error.as_deref().unwrap().contains("injected failure"));
    assert!(!root.path().join("generated/rust/types.rs").exists());

    let go = summary
        .languages
        .iter()
        .find(|r| r.language == Language::Go)
        .unwrap();
    assert!(go.error.is_none());
    assert!(root.path().join("generated/go/types.go").exists());
}

#[test]
fn test_invalid_schema_file_is_skipped_but_run_continues() {
    let root = repo_with_admin_schema();
    fs::write(root.path().join("drafts/Broken.json"), "{oops").unwrap();
    let config = GeneratorConfig::originvault(root.path());

    let summary = pipeline::generate(
        &config,
        &BuiltinCompiler,
        &[Language::Typescript],
        DEFAULT_LAYER,
    )
    .unwrap();

    assert_eq!(summary.schema_count, 1);
    assert!(root
        .path()
        .join("generated/typescript/types.ts")
        .exists());
}
