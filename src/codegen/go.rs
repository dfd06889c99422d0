//! Go type rendering
//!
//! The `package` renderer option names the emitted Go package. Optional
//! scalar fields become pointers with `omitempty`; slices and maps stay
//! nilable value types.

use super::{pascal_case, CompileRequest, Field, Shape, TypeDef, TypeDefKind};

pub(crate) fn render(defs: &[TypeDef], request: &CompileRequest<'_>) -> String {
    let mut out = String::new();
    for comment in request.leading_comments {
        out.push_str(&format!("// {}\n", comment));
    }
    out.push('\n');
    let package = request.option_str("package").unwrap_or("types");
    out.push_str(&format!("package {}\n\n", package));

    for def in defs {
        if let Some(doc) = &def.doc {
            out.push_str(&format!("// {}: {}\n", def.name, doc));
        }
        match &def.kind {
            TypeDefKind::Struct(fields) => {
                out.push_str(&format!("type {} struct {{\n", def.name));
                for field in fields {
                    render_field(&mut out, field);
                }
                out.push_str("}\n\n");
            }
            TypeDefKind::StringEnum(values) => {
                out.push_str(&format!("type {} string\n\n", def.name));
                out.push_str("const (\n");
                for value in values {
                    out.push_str(&format!(
                        "\t{}{} {} = \"{}\"\n",
                        def.name,
                        pascal_case(value),
                        def.name,
                        value
                    ));
                }
                out.push_str(")\n\n");
            }
            TypeDefKind::Alias(shape) => {
                out.push_str(&format!("type {} = {}\n\n", def.name, go_type(shape)));
            }
        }
    }

    out
}

fn render_field(out: &mut String, field: &Field) {
    let name = pascal_case(&field.json_name);
    let (ty, omitempty) = if field.required {
        (go_type(&field.shape), "")
    } else {
        match field.shape {
            // Slices, maps and interface{} are already nilable
            Shape::Array(_) | Shape::Map(_) | Shape::Any => (go_type(&field.shape), ",omitempty"),
            _ => (format!("*{}", go_type(&field.shape)), ",omitempty"),
        }
    };
    out.push_str(&format!(
        "\t{} {} `json:\"{}{}\"`\n",
        name, ty, field.json_name, omitempty
    ));
}

fn go_type(shape: &Shape) -> String {
    match shape {
        Shape::String => "string".to_string(),
        Shape::Integer => "int64".to_string(),
        Shape::Number => "float64".to_string(),
        Shape::Boolean => "bool".to_string(),
        Shape::Any => "interface{}".to_string(),
        Shape::Array(inner) => format!("[]{}", go_type(inner)),
        Shape::Map(inner) => format!("map[string]{}", go_type(inner)),
        Shape::Ref(name) => name.clone(),
        Shape::Literals(_) => "string".to_string(),
    }
}
