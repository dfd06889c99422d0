//! Python type rendering
//!
//! Emits dataclasses with snake_case fields. Optional fields default to
//! `None` and are ordered after required fields so the dataclass stays
//! constructible.

use super::{pascal_case, snake_case, CompileRequest, Field, Shape, TypeDef, TypeDefKind};

pub(crate) fn render(defs: &[TypeDef], request: &CompileRequest<'_>) -> String {
    let mut out = String::new();
    out.push_str("\"\"\"\n");
    for comment in request.leading_comments {
        out.push_str(&format!("{}\n", comment));
    }
    out.push_str("\"\"\"\n\n");
    out.push_str("from __future__ import annotations\n\n");
    out.push_str("from dataclasses import dataclass\n");
    out.push_str("from enum import Enum\n");
    out.push_str("from typing import Any, Dict, List, Optional\n\n");

    for def in defs {
        match &def.kind {
            TypeDefKind::Struct(fields) => render_class(&mut out, def, fields),
            TypeDefKind::StringEnum(values) => render_enum(&mut out, def, values),
            TypeDefKind::Alias(shape) => {
                out.push_str(&format!("{} = {}\n\n", def.name, py_type(shape)));
            }
        }
    }

    out
}

fn render_class(out: &mut String, def: &TypeDef, fields: &[Field]) {
    out.push_str("@dataclass\n");
    out.push_str(&format!("class {}:\n", def.name));
    if let Some(doc) = &def.doc {
        out.push_str(&format!("    \"\"\"{}\"\"\"\n", doc));
    }
    if fields.is_empty() {
        out.push_str("    pass\n\n");
        return;
    }

    // Required fields first; defaulted fields must come last in a dataclass.
    for field in fields.iter().filter(|f| f.required) {
        out.push_str(&format!(
            "    {}: {}\n",
            snake_case(&field.json_name),
            py_type(&field.shape)
        ));
    }
    for field in fields.iter().filter(|f| !f.required) {
        out.push_str(&format!(
            "    {}: Optional[{}] = None\n",
            snake_case(&field.json_name),
            py_type(&field.shape)
        ));
    }
    out.push('\n');
}

fn render_enum(out: &mut String, def: &TypeDef, values: &[String]) {
    out.push_str(&format!("class {}(str, Enum):\n", def.name));
    if let Some(doc) = &def.doc {
        out.push_str(&format!("    \"\"\"{}\"\"\"\n", doc));
    }
    for value in values {
        out.push_str(&format!("    {} = \"{}\"\n", variant_name(value), value));
    }
    out.push('\n');
}

fn variant_name(value: &str) -> String {
    let name = pascal_case(value).to_uppercase();
    let name: String = name
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { '_' })
        .collect();
    if name.chars().next().map_or(true, |c| c.is_ascii_digit()) {
        format!("_{}", name)
    } else {
        name
    }
}

fn py_type(shape: &Shape) -> String {
    match shape {
        Shape::String => "str".to_string(),
        Shape::Integer => "int".to_string(),
        Shape::Number => "float".to_string(),
        Shape::Boolean => "bool".to_string(),
        Shape::Any => "Any".to_string(),
        Shape::Array(inner) => format!("List[{}]", py_type(inner)),
        Shape::Map(inner) => format!("Dict[str, {}]", py_type(inner)),
        Shape::Ref(name) => name.clone(),
        Shape::Literals(_) => "str".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codegen::lower_schema;
    use crate::config::Language;
    use serde_json::json;
    use std::collections::BTreeMap;

    #[test]
    fn test_dataclass_rendering() {
        let schema = json!({
            "type": "object",
            "properties": {
                "adminId": {"type": "string"},
                "policyApprovals": {"type": "array", "items": {"type": "string"}},
                "notes": {"type": "string"}
            },
            "required": ["adminId", "policyApprovals"]
        });
        let defs = vec![lower_schema("Admin", &schema)];
        let options = BTreeMap::new();
        let request = CompileRequest {
            sources: &[],
            language: Language::Python,
            renderer_options: &options,
            leading_comments: &[],
        };
        let out = render(&defs, &request);

        assert!(out.contains("@dataclass\nclass Admin:"));
        assert!(out.contains("    admin_id: str\n"));
        assert!(out.contains("    policy_approvals: List[str]\n"));
        assert!(out.contains("    notes: Optional[str] = None\n"));
        // Defaulted fields must follow required ones
        let required_pos = out.find("admin_id").unwrap();
        let optional_pos = out.find("notes").unwrap();
        assert!(required_pos < optional_pos);
    }

    #[test]
    fn test_enum_variant_names() {
        assert_eq!(variant_name("dao"), "DAO");
        assert_eq!(variant_name("content-authenticity"), "CONTENTAUTHENTICITY");
        assert_eq!(variant_name("3d"), "_3D");
    }
}
