//! Rust type rendering
//!
//! Derive list follows the `derive-*` renderer options; fields are
//! snake_case with `#[serde(rename)]` back to the wire name where the
//! two differ.

use super::{pascal_case, snake_case, CompileRequest, Field, Shape, TypeDef, TypeDefKind};

const KEYWORDS: &[&str] = &[
    "type", "ref", "use", "pub", "move", "box", "self", "super", "crate", "mod", "fn", "impl",
    "match", "loop", "true", "false",
];

pub(crate) fn render(defs: &[TypeDef], request: &CompileRequest<'_>) -> String {
    let mut out = String::new();
    for comment in request.leading_comments {
        out.push_str(&format!("//! {}\n", comment));
    }
    out.push('\n');

    let derives = derive_list(request);
    let needs_map = defs.iter().any(uses_map);
    let needs_serde = derives.iter().any(|d| *d == "Serialize" || *d == "Deserialize");

    if needs_serde {
        out.push_str("use serde::{Deserialize, Serialize};\n");
    }
    if needs_map {
        out.push_str("use std::collections::HashMap;\n");
    }
    if needs_serde || needs_map {
        out.push('\n');
    }

    for def in defs {
        if let Some(doc) = &def.doc {
            out.push_str(&format!("/// {}\n", doc));
        }
        match &def.kind {
            TypeDefKind::Struct(fields) => {
                out.push_str(&format!("#[derive({})]\n", derives.join(", ")));
                out.push_str(&format!("pub struct {} {{\n", def.name));
                for field in fields {
                    render_field(&mut out, field);
                }
                out.push_str("}\n\n");
            }
            TypeDefKind::StringEnum(values) => {
                out.push_str(&format!("#[derive({})]\n", derives.join(", ")));
                out.push_str(&format!("pub enum {} {{\n", def.name));
                for value in values {
                    out.push_str(&format!("    #[serde(rename = \"{}\")]\n", value));
                    out.push_str(&format!("    {},\n", pascal_case(value)));
                }
                out.push_str("}\n\n");
            }
            TypeDefKind::Alias(shape) => {
                out.push_str(&format!("pub type {} = {};\n\n", def.name, rust_type(shape)));
            }
        }
    }

    out
}

fn render_field(out: &mut String, field: &Field) {
    if let Some(doc) = &field.doc {
        out.push_str(&format!("    /// {}\n", doc));
    }
    let name = field_name(&field.json_name);
    let mut serde_attrs = Vec::new();
    if name.trim_start_matches("r#") != field.json_name {
        serde_attrs.push(format!("rename = \"{}\"", field.json_name));
    }
    if !field.required {
        serde_attrs.push("skip_serializing_if = \"Option::is_none\"".to_string());
    }
    if !serde_attrs.is_empty() {
        out.push_str(&format!("    #[serde({})]\n", serde_attrs.join(", ")));
    }

    let base = rust_type(&field.shape);
    let ty = if field.required {
        base
    } else {
        format!("Option<{}>", base)
    };
    out.push_str(&format!("    pub {}: {},\n", name, ty));
}

fn field_name(json_name: &str) -> String {
    let name = snake_case(json_name);
    if KEYWORDS.contains(&name.as_str()) {
        format!("r#{}", name)
    } else {
        name
    }
}

fn derive_list(request: &CompileRequest<'_>) -> Vec<&'static str> {
    let mut derives = Vec::new();
    if request.option_bool("derive-debug", true) {
        derives.push("Debug");
    }
    if request.option_bool("derive-clone", true) {
        derives.push("Clone");
    }
    if request.option_bool("derive-partial-eq", true) {
        derives.push("PartialEq");
    }
    if request.option_bool("derive-serialize", true) {
        derives.push("Serialize");
    }
    if request.option_bool("derive-deserialize", true) {
        derives.push("Deserialize");
    }
    derives
}

fn uses_map(def: &TypeDef) -> bool {
    fn shape_uses_map(shape: &Shape) -> bool {
        match shape {
            Shape::Map(_) => true,
            Shape::Array(inner) => shape_uses_map(inner),
            _ => false,
        }
    }
    match &def.kind {
        TypeDefKind::Struct(fields) => fields.iter().any(|f| shape_uses_map(&f.shape)),
        TypeDefKind::Alias(shape) => shape_uses_map(shape),
        TypeDefKind::StringEnum(_) => false,
    }
}

fn rust_type(shape: &Shape) -> String {
    match shape {
        Shape::String => "String".to_string(),
        Shape::Integer => "i64".to_string(),
        Shape::Number => "f64".to_string(),
        Shape::Boolean => "bool".to_string(),
        Shape::Any => "serde_json::Value".to_string(),
        Shape::Array(inner) => format!("Vec<{}>", rust_type(inner)),
        Shape::Map(inner) => format!("HashMap<String, {}>", rust_type(inner)),
        Shape::Ref(name) => name.clone(),
        Shape::Literals(_) => "String".to_string(),
    }
}
