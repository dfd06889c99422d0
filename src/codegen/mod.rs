//! Multi-language type generation
//!
//! Architecture:
//! - [`TypeCompiler`]: the boundary to the schema-to-types compiler. Inputs
//!   are a set of named schema sources, a target language, a renderer-options
//!   map, and leading comments; output is generated source text.
//! - [`BuiltinCompiler`]: the in-tree implementation. Schemas are lowered
//!   once into a small language-agnostic [`TypeDef`] IR, then rendered by
//!   one pure function per language.
//!
//! The key constraint: renderers never read raw schema JSON - only the
//! lowered IR.

pub mod go;
pub mod python;
pub mod rust;
pub mod typescript;

use std::collections::BTreeMap;
use std::collections::HashSet;

use serde_json::Value;

use crate::config::Language;
use crate::error::Result;

// =============================================================================
// Compiler boundary
// =============================================================================

/// A named schema registered with the compiler.
///
/// The synthetic `<name>.schema.json` URI lets internal `$ref`s resolve
/// to sibling schemas by name.
#[derive(Debug, Clone)]
pub struct SchemaSource {
    pub name: String,
    pub uri: String,
    pub schema: Value,
}

impl SchemaSource {
    pub fn new(name: impl Into<String>, schema: Value) -> Self {
        let name = name.into();
        let uri = format!("{}.schema.json", name);
        Self { name, uri, schema }
    }
}

/// One compilation request: everything the compiler needs for one language
#[derive(Debug)]
pub struct CompileRequest<'a> {
    pub sources: &'a [SchemaSource],
    pub language: Language,
    pub renderer_options: &'a BTreeMap<String, Value>,
    pub leading_comments: &'a [String],
}

impl CompileRequest<'_> {
    /// Read a boolean renderer option, with a default for absent toggles
    pub fn option_bool(&self, key: &str, default: bool) -> bool {
        self.renderer_options
            .get(key)
            .and_then(Value::as_bool)
            .unwrap_or(default)
    }

    /// Read a string renderer option
    pub fn option_str(&self, key: &str) -> Option<&str> {
        self.renderer_options.get(key).and_then(Value::as_str)
    }
}

/// Boundary to the schema-to-types compiler
pub trait TypeCompiler {
    /// Generate type-definition source text for one language
    fn compile(&self, request: &CompileRequest<'_>) -> Result<String>;
}

/// The in-tree schema-to-types compiler
pub struct BuiltinCompiler;

impl TypeCompiler for BuiltinCompiler {
    fn compile(&self, request: &CompileRequest<'_>) -> Result<String> {
        let defs: Vec<TypeDef> = request
            .sources
            .iter()
            .map(|source| lower_schema(&source.name, &source.schema))
            .collect();

        Ok(match request.language {
            Language::Typescript => typescript::render(&defs, request),
            Language::Python => python::render(&defs, request),
            Language::Rust => rust::render(&defs, request),
            Language::Go => go::render(&defs, request),
        })
    }
}

// =============================================================================
// Lowered IR
// =============================================================================

/// A single named type lowered from one schema document
#[derive(Debug, Clone)]
pub(crate) struct TypeDef {
    pub name: String,
    pub doc: Option<String>,
    pub kind: TypeDefKind,
}

#[derive(Debug, Clone)]
pub(crate) enum TypeDefKind {
    Struct(Vec<Field>),
    StringEnum(Vec<String>),
    Alias(Shape),
}

#[derive(Debug, Clone)]
pub(crate) struct Field {
    /// Property name as it appears on the wire
    pub json_name: String,
    pub shape: Shape,
    pub required: bool,
    pub doc: Option<String>,
}

/// Language-agnostic type shape of a schema property
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Shape {
    String,
    Integer,
    Number,
    Boolean,
    Any,
    Array(Box<Shape>),
    Map(Box<Shape>),
    /// Reference to another named type in the same batch
    Ref(String),
    /// Union of string literal values
    Literals(Vec<String>),
}

/// Lower one schema document into the IR
pub(crate) fn lower_schema(name: &str, schema: &Value) -> TypeDef {
    let doc = schema
        .get("description")
        .and_then(Value::as_str)
        .map(String::from);

    if let Some(values) = string_enum_values(schema) {
        return TypeDef {
            name: type_name(name),
            doc,
            kind: TypeDefKind::StringEnum(values),
        };
    }

    if let Some(properties) = schema.get("properties").and_then(Value::as_object) {
        let required: HashSet<&str> = schema
            .get("required")
            .and_then(Value::as_array)
            .map(|items| items.iter().filter_map(Value::as_str).collect())
            .unwrap_or_default();

        let fields = properties
            .iter()
            .map(|(key, prop)| Field {
                json_name: key.clone(),
                shape: shape_of(prop),
                required: required.contains(key.as_str()),
                doc: prop
                    .get("description")
                    .and_then(Value::as_str)
                    .map(String::from),
            })
            .collect();

        return TypeDef {
            name: type_name(name),
            doc,
            kind: TypeDefKind::Struct(fields),
        };
    }

    TypeDef {
        name: type_name(name),
        doc,
        kind: TypeDefKind::Alias(shape_of(schema)),
    }
}

fn string_enum_values(schema: &Value) -> Option<Vec<String>> {
    let values = schema.get("enum")?.as_array()?;
    let strings: Option<Vec<String>> = values
        .iter()
        .map(|v| v.as_str().map(String::from))
        .collect();
    strings.filter(|s| !s.is_empty())
}

fn shape_of(schema: &Value) -> Shape {
    if let Some(target) = schema.get("$ref").and_then(Value::as_str) {
        return match ref_schema_name(target) {
            Some(name) => Shape::Ref(type_name(&name)),
            None => Shape::Any,
        };
    }

    if let Some(values) = string_enum_values(schema) {
        return Shape::Literals(values);
    }

    match schema.get("type").and_then(Value::as_str) {
        Some("string") => Shape::String,
        Some("integer") => Shape::Integer,
        Some("number") => Shape::Number,
        Some("boolean") => Shape::Boolean,
        Some("array") => {
            let items = schema.get("items").map(shape_of).unwrap_or(Shape::Any);
            Shape::Array(Box::new(items))
        }
        Some("object") => match schema.get("additionalProperties") {
            Some(additional) if additional.is_object() => {
                Shape::Map(Box::new(shape_of(additional)))
            }
            _ => Shape::Any,
        },
        _ => Shape::Any,
    }
}

/// Extract the sibling schema name from a `$ref` like `Admin.schema.json`
fn ref_schema_name(target: &str) -> Option<String> {
    let path = target.split('#').next().unwrap_or("");
    let base = path.rsplit('/').next()?;
    if !base.ends_with(".json") {
        return None;
    }
    let name = base.trim_end_matches(".json").trim_end_matches(".schema");
    if name.is_empty() {
        None
    } else {
        Some(name.to_string())
    }
}

// =============================================================================
// Name casing
// =============================================================================

/// Derive the generated type name from a schema name.
///
/// Only the first character is capitalized; the rest of the name is kept
/// as-is so regenerated output is stable and diffable.
pub fn type_name(schema_name: &str) -> String {
    let mut chars = schema_name.chars();
    match chars.next() {
        None => String::new(),
        Some(first) => first.to_uppercase().chain(chars).collect(),
    }
}

/// Convert a property name to snake_case (Python and Rust field names)
pub(crate) fn snake_case(name: &str) -> String {
    let mut out = String::with_capacity(name.len() + 4);
    let mut prev_lower = false;
    for c in name.chars() {
        if c == '-' || c == '.' || c == ' ' {
            out.push('_');
            prev_lower = false;
        } else if c.is_ascii_uppercase() {
            if prev_lower {
                out.push('_');
            }
            out.push(c.to_ascii_lowercase());
            prev_lower = false;
        } else {
            out.push(c);
            prev_lower = c.is_ascii_lowercase() || c.is_ascii_digit();
        }
    }
    out
}

/// Convert a property name to PascalCase (Go field names, enum variants)
pub(crate) fn pascal_case(name: &str) -> String {
    name.split(['_', '-', '.', ' '])
        .filter(|part| !part.is_empty())
        .map(|part| {
            let mut chars = part.chars();
            match chars.next() {
                None => String::new(),
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
            }
        })
        .collect()
}
