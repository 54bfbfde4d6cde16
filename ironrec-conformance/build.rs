//! Generates the conformance fixtures into `OUT_DIR`.

use ironrec_codegen::{GeneratorConfig, generate_to_file};
use std::path::PathBuf;

const SCHEMAS: &[&str] = &["frames", "nested", "legacy"];

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let manifest_dir = PathBuf::from(std::env::var("CARGO_MANIFEST_DIR")?);
    let out_dir = PathBuf::from(std::env::var("OUT_DIR")?);

    for name in SCHEMAS {
        let schema = manifest_dir.join("schemas").join(format!("{name}.json"));
        println!("cargo:rerun-if-changed={}", schema.display());
        generate_to_file(
            &schema,
            &out_dir.join(format!("{name}.rs")),
            GeneratorConfig::new(),
        )?;
    }
    Ok(())
}
