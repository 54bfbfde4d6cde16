//! Top-level code generator.
//!
//! Assembles the generated artifact: banner, one module per schema, the byte
//! order constant, then every record in document order.

use crate::codec::CodecPlan;
use crate::error::CodegenError;
use crate::layout::RecordLayout;
use crate::rust::{CodecGenerator, RecordGenerator};
use ironrec_schema::ir::{SchemaIr, is_keyword, rust_ident};

/// Default path of the runtime crate used by generated code.
pub const DEFAULT_RUNTIME_PATH: &str = "ironrec_core";

/// Names imported into every generated module.
const RUNTIME_IMPORTS: &[&str] = &[
    "ByteOrder",
    "SequenceLen",
    "WireDecode",
    "WireEncode",
    "WireReader",
    "WireWriter",
];

/// Prelude names generated code relies on.
const PRELUDE_NAMES: &[&str] = &["Default", "Ok", "Vec"];

/// Name of the tool written into the generated banner.
const TOOL_NAME: &str = "ironrec-codegen";

/// Generator configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratorConfig {
    /// Overrides the module name declared by the schema.
    pub module_name: Option<String>,
    /// Path of the runtime crate as seen from the generated code.
    pub runtime_path: String,
    /// Source of truth named in the banner, usually the schema file.
    pub source: Option<String>,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            module_name: None,
            runtime_path: DEFAULT_RUNTIME_PATH.to_string(),
            source: None,
        }
    }
}

impl GeneratorConfig {
    /// Creates a configuration with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the generated module name.
    #[must_use]
    pub fn module_name(mut self, name: impl Into<String>) -> Self {
        self.module_name = Some(name.into());
        self
    }

    /// Sets the runtime crate path, e.g. `ironrec::core`.
    #[must_use]
    pub fn runtime_path(mut self, path: impl Into<String>) -> Self {
        self.runtime_path = path.into();
        self
    }

    /// Sets the source named in the banner.
    #[must_use]
    pub fn source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }
}

/// Main code generator.
pub struct Generator<'a> {
    ir: &'a SchemaIr,
    config: GeneratorConfig,
}

impl<'a> Generator<'a> {
    /// Creates a new generator with default settings.
    #[must_use]
    pub fn new(ir: &'a SchemaIr) -> Self {
        Self::with_config(ir, GeneratorConfig::default())
    }

    /// Creates a new generator with the given configuration.
    #[must_use]
    pub fn with_config(ir: &'a SchemaIr, config: GeneratorConfig) -> Self {
        Self { ir, config }
    }

    /// Returns the effective module name.
    #[must_use]
    pub fn module_name(&self) -> &str {
        self.config.module_name.as_deref().unwrap_or(&self.ir.module)
    }

    /// Generates the complete output.
    ///
    /// # Errors
    /// Returns [`CodegenError::Generation`] if the module name or runtime path
    /// is not a valid Rust path, or if a record type would shadow a name the
    /// generated code uses.
    pub fn generate(&self) -> Result<String, CodegenError> {
        let module = self.module_name();
        if !is_ident(module) {
            return Err(CodegenError::generation(format!(
                "invalid module name '{module}'"
            )));
        }
        let module = rust_ident(module);
        let runtime = self.config.runtime_path.as_str();
        if !is_runtime_path(runtime) {
            return Err(CodegenError::generation(format!(
                "invalid runtime path '{runtime}'"
            )));
        }

        if let Some(record) = self.ir.records.iter().find(|r| {
            let name = r.type_name.as_str();
            RUNTIME_IMPORTS.contains(&name) || PRELUDE_NAMES.contains(&name)
        }) {
            return Err(CodegenError::generation(format!(
                "record '{}' clashes with the type name '{}' used by generated code",
                record.name, record.type_name
            )));
        }

        let mut body = String::new();
        body.push_str(&format!(
            "use {runtime}::{{self as wire, {}}};\n\n",
            RUNTIME_IMPORTS.join(", ")
        ));
        body.push_str("/// Byte order of the encoded stream.\n");
        body.push_str(&format!(
            "pub const BYTE_ORDER: ByteOrder = ByteOrder::{};\n\n",
            self.ir.byte_order.variant_name()
        ));

        for record in &self.ir.records {
            let layout = RecordLayout::build(record);
            let plan = CodecPlan::build(record);
            tracing::debug!(
                record = %record.name,
                type_name = %layout.type_name,
                packed = layout.packed,
                fields = layout.slots.len(),
                allocators = layout.allocators.len(),
                "generating record"
            );
            body.push_str(&RecordGenerator::new(&layout).generate());
            body.push_str(&CodecGenerator::new(&layout.type_name, &plan).generate());
        }

        let mut output = String::new();
        output.push_str(&self.banner());
        output.push_str("#[allow(dead_code, unused_imports, clippy::all)]\n");
        output.push_str(&format!("pub mod {module} {{\n"));
        for line in body.trim_end().lines() {
            if line.is_empty() {
                output.push('\n');
            } else {
                output.push_str("    ");
                output.push_str(line);
                output.push('\n');
            }
        }
        output.push_str("}\n");

        tracing::debug!(
            module = %module,
            records = self.ir.records.len(),
            bytes = output.len(),
            "generation complete"
        );
        Ok(output)
    }

    fn banner(&self) -> String {
        let mut banner = match &self.config.source {
            Some(source) => format!("// @generated by {TOOL_NAME} from {source}.\n"),
            None => format!("// @generated by {TOOL_NAME}.\n"),
        };
        banner.push_str("// Do not edit by hand; edit the schema and regenerate.\n\n");
        banner
    }
}

fn is_ident(s: &str) -> bool {
    let s = s.strip_prefix("r#").unwrap_or(s);
    let mut chars = s.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    s != "_" && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

/// Checks a `use` path prefix: `crate`/`self` may only lead, `super` may
/// only follow `self` or `super`, other keywords need the `r#` form.
fn is_runtime_path(path: &str) -> bool {
    let mut leading = true;
    path.split("::").enumerate().all(|(i, segment)| {
        let valid = match segment {
            "crate" | "self" => i == 0,
            "super" => leading,
            _ => is_ident(segment) && !is_keyword(segment),
        };
        leading &= matches!(segment, "self" | "super");
        valid
    })
}
