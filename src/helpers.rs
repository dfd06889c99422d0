//! Validation helper emission
//!
//! For each language flagged with `validation_helpers`, emits one source
//! file containing the full schema registry (`SCHEMAS`), the fingerprint
//! registry (`SCHEMA_HASHES`), and a `validate`/`assert` pair per schema.
//! Function names derive from schema names via the same capitalize-first
//! transformation as the type names, so regenerated output is diffable.
//!
//! The validate/assert contract is portable; the validation library is
//! per-language idiom: Ajv for TypeScript, `jsonschema` for Python, the
//! `jsonschema` crate for Rust.

use serde::Serialize;
use serde_json::Value;

use crate::codegen::{snake_case, type_name};
use crate::config::{Language, LanguageConfig};
use crate::error::Result;
use crate::hash::SchemaHash;
use crate::loader::SchemaMap;

/// Emit the validation-helper source for a language, if it supports one
pub fn emit_validation_helpers(
    config: &LanguageConfig,
    schemas: &SchemaMap,
) -> Result<Option<String>> {
    if !config.validation_helpers {
        return Ok(None);
    }
    let text = match config.language {
        Language::Typescript => typescript_helpers(&config.package_name, schemas)?,
        Language::Python => python_helpers(&config.package_name, schemas)?,
        Language::Rust => rust_helpers(&config.package_name, schemas)?,
        Language::Go => return Ok(None),
    };
    Ok(Some(text))
}

fn typescript_helpers(package: &str, schemas: &SchemaMap) -> Result<String> {
    let mut out = String::new();
    out.push_str("/**\n");
    out.push_str(&format!(" * Runtime validation helpers for {}\n", package));
    out.push_str(" * Generated validation functions for type-safe runtime checking\n");
    out.push_str(" */\n\n");
    out.push_str("import Ajv from 'ajv';\n");
    out.push_str("import addFormats from 'ajv-formats';\n\n");
    out.push_str("const ajv = new Ajv({ allErrors: true });\naddFormats(ajv);\n\n");

    out.push_str("// Schema registry\n");
    out.push_str("export const SCHEMAS = {\n");
    let entries: Result<Vec<String>> = schemas
        .iter()
        .map(|(name, schema)| Ok(format!("  \"{}\": {}", name, pretty_json(schema)?)))
        .collect();
    out.push_str(&entries?.join(",\n"));
    out.push_str("\n} as const;\n\n");

    out.push_str("// Hash registry for BFF integration\n");
    out.push_str("export const SCHEMA_HASHES = {\n");
    let hashes: Vec<String> = schemas
        .iter()
        .map(|(name, schema)| format!("  \"{}\": \"{}\"", name, SchemaHash::of(schema)))
        .collect();
    out.push_str(&hashes.join(",\n"));
    out.push_str("\n} as const;\n\n");

    out.push_str("// Validation functions\n");
    for name in schemas.keys() {
        let ty = type_name(name);
        out.push_str(&format!(
            "export function validate{}(data: unknown): boolean {{\n",
            ty
        ));
        out.push_str(&format!(
            "  const validate = ajv.compile(SCHEMAS[\"{}\"]);\n",
            name
        ));
        out.push_str("  return validate(data) as boolean;\n}\n\n");

        // Ajv only records errors on the compiled function, so the assert
        // keeps it in scope instead of delegating to the boolean check.
        out.push_str(&format!(
            "export function assert{}(data: unknown): void {{\n",
            ty
        ));
        out.push_str(&format!(
            "  const validate = ajv.compile(SCHEMAS[\"{}\"]);\n",
            name
        ));
        out.push_str("  if (!validate(data)) {\n");
        out.push_str(&format!(
            "    throw new Error(`Invalid {} data: ${{JSON.stringify(validate.errors)}}`);\n",
            ty
        ));
        out.push_str("  }\n}\n\n");
    }

    out.push_str("export type SchemaName = keyof typeof SCHEMAS;\n");
    Ok(out)
}

fn python_helpers(package: &str, schemas: &SchemaMap) -> Result<String> {
    let mut out = String::new();
    out.push_str("\"\"\"\n");
    out.push_str(&format!("Runtime validation helpers for {}\n", package));
    out.push_str("Generated validation functions for type-safe runtime checking\n");
    out.push_str("\"\"\"\n\n");
    out.push_str("import json\nfrom typing import Any\n\n");
    out.push_str("from jsonschema import ValidationError, validate\n\n");

    out.push_str("# Schema registry\n");
    out.push_str("SCHEMAS = {\n");
    for (name, schema) in schemas {
        // JSON literals (true/false/null) are not Python literals, so the
        // documents are embedded as json.loads of a raw string.
        out.push_str(&format!(
            "    \"{}\": json.loads(r\"\"\"{}\"\"\"),\n",
            name,
            serde_json::to_string(schema)?
        ));
    }
    out.push_str("}\n\n");

    out.push_str("# Hash registry for BFF integration\n");
    out.push_str("SCHEMA_HASHES = {\n");
    for (name, schema) in schemas {
        out.push_str(&format!("    \"{}\": \"{}\",\n", name, SchemaHash::of(schema)));
    }
    out.push_str("}\n\n\n");

    out.push_str("def validate_schema(data: Any, schema_name: str) -> bool:\n");
    out.push_str("    \"\"\"Check data against a named schema.\"\"\"\n");
    out.push_str("    try:\n");
    out.push_str("        validate(data, SCHEMAS[schema_name])\n");
    out.push_str("        return True\n");
    out.push_str("    except (ValidationError, KeyError):\n");
    out.push_str("        return False\n\n\n");

    for name in schemas.keys() {
        let ty = type_name(name);
        let fn_name = snake_case(name);
        out.push_str(&format!("def validate_{}(data: Any) -> bool:\n", fn_name));
        out.push_str(&format!("    \"\"\"Validate {} data.\"\"\"\n", ty));
        out.push_str(&format!(
            "    return validate_schema(data, \"{}\")\n\n\n",
            name
        ));

        out.push_str(&format!("def assert_{}(data: Any) -> None:\n", fn_name));
        out.push_str(&format!(
            "    \"\"\"Raise ValueError when data is not a valid {}.\"\"\"\n",
            ty
        ));
        out.push_str("    try:\n");
        out.push_str(&format!("        validate(data, SCHEMAS[\"{}\"])\n", name));
        out.push_str("    except ValidationError as exc:\n");
        out.push_str(&format!(
            "        raise ValueError(f\"Invalid {} data: {{exc.message}}\") from exc\n\n\n",
            ty
        ));
    }

    Ok(out)
}

fn rust_helpers(package: &str, schemas: &SchemaMap) -> Result<String> {
    let mut out = String::new();
    out.push_str(&format!("//! Runtime validation helpers for {}\n", package));
    out.push_str("//! Generated validation functions for type-safe runtime checking\n\n");
    out.push_str("use jsonschema::JSONSchema;\n");
    out.push_str("use lazy_static::lazy_static;\n");
    out.push_str("use serde_json::Value;\n");
    out.push_str("use std::collections::HashMap;\n\n");

    out.push_str("lazy_static! {\n");
    out.push_str("    static ref SCHEMAS: HashMap<&'static str, JSONSchema> = {\n");
    out.push_str("        let mut m = HashMap::new();\n");
    for (name, schema) in schemas {
        let payload = serde_json::to_string(schema)?;
        let guard = raw_string_guard(&payload);
        out.push_str("        {\n");
        out.push_str(&format!(
            "            let schema: Value = serde_json::from_str(r{g}\"{p}\"{g}).unwrap();\n",
            g = guard,
            p = payload
        ));
        out.push_str(&format!(
            "            m.insert(\"{}\", JSONSchema::compile(&schema).unwrap());\n",
            name
        ));
        out.push_str("        }\n");
    }
    out.push_str("        m\n    };\n\n");

    out.push_str("    static ref SCHEMA_HASHES: HashMap<&'static str, &'static str> = {\n");
    out.push_str("        let mut m = HashMap::new();\n");
    for (name, schema) in schemas {
        out.push_str(&format!(
            "        m.insert(\"{}\", \"{}\");\n",
            name,
            SchemaHash::of(schema)
        ));
    }
    out.push_str("        m\n    };\n}\n\n");

    for name in schemas.keys() {
        let ty = type_name(name);
        let fn_name = snake_case(name);
        out.push_str(&format!("pub fn validate_{}(data: &Value) -> bool {{\n", fn_name));
        out.push_str(&format!("    SCHEMAS[\"{}\"].is_valid(data)\n}}\n\n", name));

        out.push_str(&format!(
            "pub fn assert_{}(data: &Value) -> Result<(), String> {{\n",
            fn_name
        ));
        out.push_str(&format!("    match SCHEMAS[\"{}\"].validate(data) {{\n", name));
        out.push_str("        Ok(()) => Ok(()),\n");
        out.push_str("        Err(errors) => Err(format!(\n");
        out.push_str(&format!("            \"Invalid {} data: {{}}\",\n", ty));
        out.push_str(
            "            errors.map(|e| e.to_string()).collect::<Vec<_>>().join(\"; \")\n",
        );
        out.push_str("        )),\n    }\n}\n\n");
    }

    Ok(out)
}

/// Pick a `#` guard that cannot terminate a raw string early: one more
/// than the longest run of `#` immediately following a `"` in the payload.
fn raw_string_guard(payload: &str) -> String {
    let mut max_run = 0;
    let mut run = 0;
    let mut after_quote = false;
    for c in payload.chars() {
        if c == '"' {
            after_quote = true;
            run = 0;
        } else if after_quote && c == '#' {
            run += 1;
            max_run = max_run.max(run);
        } else {
            after_quote = false;
        }
    }
    "#".repeat(max_run + 1)
}

/// Pretty-print a JSON value with 4-space indentation (registry literals)
fn pretty_json(value: &Value) -> Result<String> {
    let mut buf = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
    let mut ser = serde_json::Serializer::with_formatter(&mut buf, formatter);
    value.serialize(&mut ser)?;
    Ok(String::from_utf8_lossy(&buf).into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GeneratorConfig;
    use serde_json::json;

    fn admin_schemas() -> SchemaMap {
        let mut schemas = SchemaMap::new();
        schemas.insert(
            "Admin".to_string(),
            json!({
                "type": "object",
                "properties": {"adminId": {"type": "string"}},
                "required": ["adminId"]
            }),
        );
        schemas
    }

    fn language_config(language: Language) -> LanguageConfig {
        GeneratorConfig::originvault(".")
            .languages
            .iter()
            .find(|c| c.language == language)
            .cloned()
            .unwrap()
    }

    #[test]
    fn test_typescript_helpers_contract() {
        let schemas = admin_schemas();
        let out = emit_validation_helpers(&language_config(Language::Typescript), &schemas)
            .unwrap()
            .unwrap();
        assert!(out.contains("export const SCHEMAS = {"));
        assert!(out.contains("export const SCHEMA_HASHES = {"));
        assert!(out.contains("export function validateAdmin(data: unknown): boolean {"));
        assert!(out.contains("export function assertAdmin(data: unknown): void {"));
        assert!(out.contains("Invalid Admin data:"));
        // The failure detail comes from the compiled validator; the Ajv
        // instance never records errors on the compile() path.
        assert!(out.contains("JSON.stringify(validate.errors)"));
        assert!(!out.contains("ajv.errors"));
        assert!(out.contains(SchemaHash::of(&schemas["Admin"]).as_str()));
    }

    #[test]
    fn test_python_helpers_contract() {
        let schemas = admin_schemas();
        let out = emit_validation_helpers(&language_config(Language::Python), &schemas)
            .unwrap()
            .unwrap();
        assert!(out.contains("def validate_admin(data: Any) -> bool:"));
        assert!(out.contains("def assert_admin(data: Any) -> None:"));
        assert!(out.contains("json.loads(r\"\"\""));
    }

    #[test]
    fn test_rust_helpers_contract() {
        let schemas = admin_schemas();
        let out = emit_validation_helpers(&language_config(Language::Rust), &schemas)
            .unwrap()
            .unwrap();
        assert!(out.contains("pub fn validate_admin(data: &Value) -> bool {"));
        assert!(out.contains("pub fn assert_admin(data: &Value) -> Result<(), String> {"));
        assert!(out.contains("JSONSchema::compile"));
    }

    #[test]
    fn test_raw_string_guard_widens_past_payload_hashes() {
        assert_eq!(raw_string_guard(r#"{"a":1}"#), "#");
        assert_eq!(raw_string_guard(r###"{"d":"## Notes"}"###), "###");
    }

    #[test]
    fn test_rust_helpers_embed_hash_leading_strings() {
        let mut schemas = SchemaMap::new();
        schemas.insert(
            "Doc".to_string(),
            json!({"type": "object", "description": "## Notes"}),
        );
        let out = emit_validation_helpers(&language_config(Language::Rust), &schemas)
            .unwrap()
            .unwrap();
        // "## inside the payload must not close the embedded raw string
        assert!(out.contains("serde_json::from_str(r###\""));
        assert!(out.contains("\"###).unwrap()"));
    }

    #[test]
    fn test_go_has_no_helpers() {
        let schemas = admin_schemas();
        let out = emit_validation_helpers(&language_config(Language::Go), &schemas).unwrap();
        assert!(out.is_none());
    }

    #[test]
    fn test_regeneration_is_byte_identical() {
        let schemas = admin_schemas();
        let config = language_config(Language::Typescript);
        let first = emit_validation_helpers(&config, &schemas).unwrap().unwrap();
        let second = emit_validation_helpers(&config, &schemas).unwrap().unwrap();
        assert_eq!(first, second);
    }
}
