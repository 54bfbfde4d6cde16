//! # IronRec Schema
//!
//! Record schema parser and type definitions.
//!
//! This crate provides:
//! - JSON schema parsing into a document model
//! - Field type classification (primitive, record, fixed array, sequence, opaque)
//! - Schema validation and dependency ordering with cycle detection
//! - Intermediate representation for code generation

pub mod classify;
pub mod error;
pub mod ir;
pub mod parser;
pub mod records;
pub mod types;
pub mod validation;

pub use classify::{ElementType, FieldKind, TypeClassifier};
pub use error::{ParseError, SchemaError};
pub use ir::{ResolvedField, ResolvedRecord, SchemaIr};
pub use parser::{parse_reader, parse_schema};
pub use records::{FieldDef, RecordDef};
pub use types::{DEFAULT_MODULE_NAME, PrimitiveType, Schema};
pub use validation::validate_schema;

pub use ironrec_core::ByteOrder;
