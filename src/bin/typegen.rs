//! Multi-Language Type Generation CLI
//!
//! Generates type definitions, validation helpers, and package metadata
//! from a named schema layer. Exits non-zero only for configuration
//! errors (an unknown layer); per-language generation failures are logged
//! and the remaining languages still run.

use std::path::PathBuf;

use clap::Parser;
use originvault_schema_registry::{
    pipeline, BuiltinCompiler, GeneratorConfig, Language, DEFAULT_LAYER,
};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "schema-typegen")]
#[command(about = "Generate multi-language types from the OriginVault schema registry")]
struct Cli {
    /// Comma-separated target languages (default: all configured)
    #[arg(long, value_delimiter = ',')]
    lang: Vec<String>,

    /// Schema layer to generate from
    #[arg(long, default_value = DEFAULT_LAYER)]
    layer: String,

    /// Repository root containing schema sources and generated output
    #[arg(long, default_value = ".")]
    root: PathBuf,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    println!("🚀 Starting multi-language type generation...");
    println!(
        "📋 Target languages: {}",
        if cli.lang.is_empty() {
            "all".to_string()
        } else {
            cli.lang.join(", ")
        }
    );
    println!("🏗️  Target layer: {}", cli.layer);

    // Unrecognized ids are dropped, never widened to the full set: a
    // selector that matches no configured language generates nothing.
    let languages = if cli.lang.is_empty() {
        Language::ALL.to_vec()
    } else {
        let mut languages = Vec::new();
        for id in &cli.lang {
            match Language::parse(id) {
                Ok(language) => languages.push(language),
                Err(_) => tracing::warn!(%id, "unknown language, ignoring"),
            }
        }
        languages
    };

    let config = GeneratorConfig::originvault(cli.root.clone());
    let summary = pipeline::generate(&config, &BuiltinCompiler, &languages, &cli.layer)?;

    println!();
    println!(
        "📚 Loaded {} schemas from layer {}",
        summary.schema_count, summary.layer
    );
    for report in &summary.languages {
        match &report.error {
            None => println!("✅ {}: {} files", report.language, report.files.len()),
            Some(message) => println!("❌ {}: {}", report.language, message),
        }
    }
    println!("✅ Type generation complete!");
    Ok(())
}
