//! TypeScript type rendering

use super::{CompileRequest, Field, Shape, TypeDef, TypeDefKind};

pub(crate) fn render(defs: &[TypeDef], request: &CompileRequest<'_>) -> String {
    let mut out = String::new();
    for comment in request.leading_comments {
        out.push_str(&format!("// {}\n", comment));
    }
    out.push('\n');

    for def in defs {
        if let Some(doc) = &def.doc {
            out.push_str(&format!("/**\n * {}\n */\n", doc));
        }
        match &def.kind {
            TypeDefKind::Struct(fields) => {
                out.push_str(&format!("export interface {} {{\n", def.name));
                for field in fields {
                    render_field(&mut out, field);
                }
                out.push_str("}\n\n");
            }
            TypeDefKind::StringEnum(values) => {
                let union = values
                    .iter()
                    .map(|v| format!("\"{}\"", v))
                    .collect::<Vec<_>>()
                    .join(" | ");
                out.push_str(&format!("export type {} = {};\n\n", def.name, union));
            }
            TypeDefKind::Alias(shape) => {
                out.push_str(&format!(
                    "export type {} = {};\n\n",
                    def.name,
                    ts_type(shape)
                ));
            }
        }
    }

    out
}

fn render_field(out: &mut String, field: &Field) {
    if let Some(doc) = &field.doc {
        out.push_str(&format!("  /** {} */\n", doc));
    }
    let optional = if field.required { "" } else { "?" };
    out.push_str(&format!(
        "  {}{}: {};\n",
        property_name(&field.json_name),
        optional,
        ts_type(&field.shape)
    ));
}

fn ts_type(shape: &Shape) -> String {
    match shape {
        Shape::String => "string".to_string(),
        Shape::Integer | Shape::Number => "number".to_string(),
        Shape::Boolean => "boolean".to_string(),
        Shape::Any => "any".to_string(),
        Shape::Array(inner) => {
            let inner_ts = ts_type(inner);
            if inner_ts.contains(' ') {
                format!("({})[]", inner_ts)
            } else {
                format!("{}[]", inner_ts)
            }
        }
        Shape::Map(inner) => format!("{{ [key: string]: {} }}", ts_type(inner)),
        Shape::Ref(name) => name.clone(),
        Shape::Literals(values) => values
            .iter()
            .map(|v| format!("\"{}\"", v))
            .collect::<Vec<_>>()
            .join(" | "),
    }
}

/// Quote property names that are not valid TypeScript identifiers
fn property_name(name: &str) -> String {
    let plain = name
        .chars()
        .enumerate()
        .all(|(i, c)| c == '_' || c == '$' || if i == 0 { c.is_alphabetic() } else { c.is_alphanumeric() });
    if plain && !name.is_empty() {
        name.to_string()
    } else {
        format!("\"{}\"", name)
    }
}
