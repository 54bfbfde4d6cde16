//! # IronRec Codegen
//!
//! Code generation from record schemas.
//!
//! This crate provides:
//! - Record layout planning (storage, zero-initialization, allocate routines)
//! - Encode/decode planning with counted and self-describing sequences
//! - Rust rendering of records and their `WireEncode`/`WireDecode` impls
//! - Build script integration
//!
//! # Example
//! ```
//! let json = r#"{ "records": [ { "name": "Frame", "fields": [
//!     { "name": "count", "type": "uint32" },
//!     { "name": "items", "type": "sequence<uint32>" }
//! ] } ] }"#;
//! let code = ironrec_codegen::generate_from_json(json).unwrap();
//! assert!(code.contains("pub fn allocate_items(&mut self)"));
//! ```

pub mod codec;
pub mod error;
pub mod generator;
pub mod layout;
pub mod rust;

use std::io::Read;
use std::path::Path;

pub use error::CodegenError;
pub use generator::{DEFAULT_RUNTIME_PATH, Generator, GeneratorConfig};

use ironrec_schema::SchemaIr;

/// Generates Rust code from a schema document string.
///
/// # Arguments
/// * `json` - Schema document content
///
/// # Returns
/// Generated Rust code as a string.
///
/// # Errors
/// Returns `CodegenError` if parsing, validation or generation fails.
pub fn generate_from_json(json: &str) -> Result<String, CodegenError> {
    generate_with_config(json, GeneratorConfig::default())
}

/// Generates Rust code from a schema document string with a configuration.
///
/// # Errors
/// Returns `CodegenError` if parsing, validation or generation fails.
pub fn generate_with_config(json: &str, config: GeneratorConfig) -> Result<String, CodegenError> {
    let schema = ironrec_schema::parse_schema(json)?;
    let ir = SchemaIr::from_schema(&schema)?;
    Generator::with_config(&ir, config).generate()
}

/// Generates Rust code from a schema document read from `reader`.
///
/// # Errors
/// Returns `CodegenError` if reading, parsing, validation or generation fails.
pub fn generate_from_reader<R: Read>(reader: R) -> Result<String, CodegenError> {
    let schema = ironrec_schema::parse_reader(reader)?;
    let ir = SchemaIr::from_schema(&schema)?;
    Generator::new(&ir).generate()
}

/// Generates Rust code from a schema file.
///
/// # Arguments
/// * `path` - Path to the schema document
///
/// # Returns
/// Generated Rust code as a string.
///
/// # Errors
/// Returns `CodegenError` if reading, parsing, validation or generation fails.
pub fn generate_from_file(path: &Path) -> Result<String, CodegenError> {
    let json = std::fs::read_to_string(path)?;
    generate_with_config(&json, GeneratorConfig::new().source(path.display().to_string()))
}

/// Generates code for a schema file and writes it to `output`.
///
/// Intended for build scripts. The output file is written only once the
/// complete artifact has been generated.
///
/// # Arguments
/// * `schema` - Path to the schema document
/// * `output` - Path of the generated Rust file
/// * `config` - Generator configuration
///
/// # Errors
/// Returns `CodegenError` if reading, parsing, generation or writing fails.
pub fn generate_to_file(
    schema: &Path,
    output: &Path,
    config: GeneratorConfig,
) -> Result<(), CodegenError> {
    let json = std::fs::read_to_string(schema)?;
    let config = match config.source {
        Some(_) => config,
        None => config.source(file_label(schema)),
    };
    let code = generate_with_config(&json, config)?;
    std::fs::write(output, code)?;
    Ok(())
}

fn file_label(path: &Path) -> String {
    path.file_name()
        .map_or_else(|| path.display().to_string(), |n| n.to_string_lossy().into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const FRAME_JSON: &str = r#"{ "records": [ { "name": "Frame", "fields": [
        { "name": "count", "type": "uint32" },
        { "name": "items", "type": "sequence<uint32>" },
        { "name": "tag", "type": "char", "length": 8 }
    ] } ] }"#;

    #[test]
    fn test_generate_from_json() {
        let code = generate_from_json(FRAME_JSON).expect("generate");
        assert!(code.contains("pub struct Frame"));
        assert!(code.contains("pub fn allocate_items(&mut self)"));
        assert!(code.contains("writer.put_raw(&self.tag);"));
    }

    #[test]
    fn test_generate_from_json_reports_errors() {
        assert!(matches!(
            generate_from_json("not json"),
            Err(CodegenError::Parse(_))
        ));

        let cyclic = r#"{ "records": [ { "name": "A", "fields": [ { "name": "a", "type": "A" } ] } ] }"#;
        assert!(matches!(
            generate_from_json(cyclic),
            Err(CodegenError::Schema(_))
        ));
    }

    #[test]
    fn test_generate_from_reader() {
        let code = generate_from_reader(FRAME_JSON.as_bytes()).expect("generate");
        assert!(code.contains("pub mod generated_structs {"));
    }

    #[test]
    fn test_generate_from_file() {
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        file.write_all(FRAME_JSON.as_bytes()).expect("write schema");

        let code = generate_from_file(file.path()).expect("generate");
        assert!(code.contains("pub struct Frame"));
        assert!(code.starts_with("// @generated by ironrec-codegen from "));
    }

    #[test]
    fn test_generate_from_missing_file() {
        let result = generate_from_file(Path::new("/nonexistent/schema.json"));
        assert!(matches!(result, Err(CodegenError::Io(_))));
    }

    #[test]
    fn test_generate_to_file() {
        let dir = tempfile::tempdir().expect("temp dir");
        let schema = dir.path().join("frame.json");
        let output = dir.path().join("frame.rs");
        std::fs::write(&schema, FRAME_JSON).expect("write schema");

        generate_to_file(&schema, &output, GeneratorConfig::new().module_name("frames"))
            .expect("generate");

        let code = std::fs::read_to_string(&output).expect("read output");
        assert!(code.starts_with("// @generated by ironrec-codegen from frame.json.\n"));
        assert!(code.contains("pub mod frames {"));
    }

    #[test]
    fn test_generate_to_file_writes_nothing_on_error() {
        let dir = tempfile::tempdir().expect("temp dir");
        let schema = dir.path().join("bad.json");
        let output = dir.path().join("bad.rs");
        std::fs::write(&schema, r#"{ "records": [ { "name": "A", "fields": [ { "name": "x", "type": "u8", "length": 0 } ] } ] }"#)
            .expect("write schema");

        assert!(generate_to_file(&schema, &output, GeneratorConfig::new()).is_err());
        assert!(!output.exists());
    }
}
