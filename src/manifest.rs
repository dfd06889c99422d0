//! Package metadata emission
//!
//! Writes the manifest and entry/re-export file for each generated
//! language package. Pure string templating; no business logic.

use serde_json::json;

use crate::config::{Language, LanguageConfig};
use crate::error::Result;
use crate::pipeline::GeneratedFile;

/// Emit the manifest and entry file for one language package
pub fn emit_package_metadata(config: &LanguageConfig, layer: &str) -> Result<Vec<GeneratedFile>> {
    Ok(match config.language {
        Language::Typescript => typescript_metadata(config, layer)?,
        Language::Python => python_metadata(config, layer),
        Language::Rust => rust_metadata(config, layer),
        Language::Go => go_metadata(config),
    })
}

fn typescript_metadata(config: &LanguageConfig, layer: &str) -> Result<Vec<GeneratedFile>> {
    let package_json = json!({
        "name": config.package_name,
        "version": "1.0.0",
        "description": format!("Generated TypeScript types for {}", layer),
        "main": "index.js",
        "types": "index.d.ts",
        "scripts": {
            "build": "tsc",
            "test": "jest"
        },
        "dependencies": {
            "ajv": "^8.12.0",
            "ajv-formats": "^2.1.1"
        },
        "devDependencies": {
            "typescript": "^5.0.0",
            "@types/node": "^20.0.0",
            "jest": "^29.0.0"
        }
    });

    Ok(vec![
        GeneratedFile {
            name: "package.json".to_string(),
            contents: format!("{}\n", serde_json::to_string_pretty(&package_json)?),
        },
        GeneratedFile {
            name: "index.ts".to_string(),
            contents: "export * from './types';\nexport * from './validation';\n".to_string(),
        },
    ])
}

fn python_metadata(config: &LanguageConfig, layer: &str) -> Vec<GeneratedFile> {
    let setup_py = format!(
        r#"from setuptools import setup, find_packages

setup(
    name="{}",
    version="1.0.0",
    description="Generated Python types for {}",
    packages=find_packages(),
    install_requires=[
        "jsonschema>=4.17.0",
        "typing-extensions>=4.0.0"
    ],
    python_requires=">=3.8"
)
"#,
        config.package_name, layer
    );

    vec![
        GeneratedFile {
            name: "setup.py".to_string(),
            contents: setup_py,
        },
        GeneratedFile {
            name: "__init__.py".to_string(),
            contents: "from .types import *\nfrom .validation import *\n\n__version__ = \"1.0.0\"\n"
                .to_string(),
        },
    ]
}

fn rust_metadata(config: &LanguageConfig, layer: &str) -> Vec<GeneratedFile> {
    let cargo_toml = format!(
        r#"[package]
name = "{}"
version = "1.0.0"
edition = "2021"
description = "Generated Rust types for {}"

[dependencies]
serde = {{ version = "1.0", features = ["derive"] }}
serde_json = "1.0"
jsonschema = "0.17"
lazy_static = "1.4"
"#,
        config.package_name, layer
    );

    vec![
        GeneratedFile {
            name: "Cargo.toml".to_string(),
            contents: cargo_toml,
        },
        GeneratedFile {
            name: "lib.rs".to_string(),
            contents: "pub mod types;\npub mod validation;\n\npub use types::*;\npub use validation::*;\n"
                .to_string(),
        },
    ]
}

fn go_metadata(config: &LanguageConfig) -> Vec<GeneratedFile> {
    vec![GeneratedFile {
        name: "go.mod".to_string(),
        contents: format!("module {}\n\ngo 1.21\n", config.package_name),
    }]
}
