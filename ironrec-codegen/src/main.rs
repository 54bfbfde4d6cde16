//! IronRec code generator
//!
//! Reads a record schema and writes the generated Rust module.

use anyhow::{Context, Result};
use clap::Parser;
use ironrec_codegen::{DEFAULT_RUNTIME_PATH, Generator, GeneratorConfig};
use ironrec_schema::SchemaIr;
use std::io::{Read, Write};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "ironrec-codegen")]
#[command(about = "Generate Rust record types and wire codecs from a schema")]
struct Args {
    /// Schema file to read instead of stdin
    #[arg(short, long)]
    input: Option<PathBuf>,

    /// File to write instead of stdout
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Override the generated module name
    #[arg(short, long)]
    module: Option<String>,

    /// Path of the runtime crate used by generated code
    #[arg(long, default_value = DEFAULT_RUNTIME_PATH)]
    runtime: String,
}

fn main() -> ExitCode {
    // Logs go to stderr; stdout carries only generated code.
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(args: &Args) -> Result<()> {
    let json = match &args.input {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?,
        None => {
            let mut json = String::new();
            std::io::stdin()
                .read_to_string(&mut json)
                .context("failed to read schema from stdin")?;
            json
        }
    };

    let schema = ironrec_schema::parse_schema(&json).context("invalid schema document")?;
    let ir = SchemaIr::from_schema(&schema)?;

    let mut config = GeneratorConfig::new().runtime_path(args.runtime.clone());
    if let Some(module) = &args.module {
        config = config.module_name(module.clone());
    }
    if let Some(path) = &args.input {
        config = config.source(path.display().to_string());
    }
    let code = Generator::with_config(&ir, config).generate()?;
    tracing::info!(records = ir.records.len(), bytes = code.len(), "generated");

    match &args.output {
        Some(path) => std::fs::write(path, &code)
            .with_context(|| format!("failed to write {}", path.display()))?,
        None => {
            let mut stdout = std::io::stdout().lock();
            stdout.write_all(code.as_bytes())?;
            stdout.flush()?;
        }
    }
    Ok(())
}
