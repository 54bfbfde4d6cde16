//! Intermediate representation for code generation.
//!
//! This module provides a resolved view of the schema: every field carries
//! its classification, its Rust identifier and, for sequences, the index of
//! the sibling that sizes it. Code generators read these stored facts and
//! never re-derive them.

use crate::classify::{ElementType, FieldKind};
use crate::error::SchemaError;
use crate::records::{FieldDef, RecordDef};
use crate::types::Schema;
use crate::validation::{classify_schema, dependency_order, validate_names};
use ironrec_core::ByteOrder;
use std::collections::HashMap;

/// Identifiers that must be written as raw identifiers in generated code.
const RUST_KEYWORDS: &[&str] = &[
    "abstract", "as", "async", "await", "become", "box", "break", "const", "continue", "do",
    "dyn", "else", "enum", "extern", "false", "final", "fn", "for", "gen", "if", "impl", "in",
    "let", "loop", "macro", "match", "mod", "move", "mut", "override", "priv", "pub", "ref",
    "return", "static", "struct", "trait", "true", "try", "type", "typeof", "unsafe", "unsized",
    "use", "virtual", "where", "while", "yield",
];

/// Keywords that cannot be raw identifiers.
const RESERVED_IDENTS: &[&str] = &["crate", "self", "Self", "super"];

/// Intermediate representation of a complete schema.
#[derive(Debug, Clone)]
pub struct SchemaIr {
    /// Name of the generated module.
    pub module: String,
    /// Byte order for encoding.
    pub byte_order: ByteOrder,
    /// Resolved records, in document order.
    pub records: Vec<ResolvedRecord>,
    /// Record indices ordered so that embedded records come first.
    pub dependency_order: Vec<usize>,
    record_map: HashMap<String, usize>,
}

impl SchemaIr {
    /// Creates IR from a parsed schema.
    ///
    /// Validates names, classifies fields, infers count relations and orders
    /// records by composition.
    ///
    /// # Errors
    /// Returns `SchemaError` if names are invalid or duplicated, a field
    /// cannot be classified, or records contain each other circularly.
    pub fn from_schema(schema: &Schema) -> Result<Self, SchemaError> {
        validate_names(schema)?;
        let kinds = classify_schema(schema)?;
        let dependency_order = dependency_order(schema, &kinds)?;

        let mut records: Vec<ResolvedRecord> = schema
            .records
            .iter()
            .zip(kinds)
            .map(|(record, kinds)| ResolvedRecord::from_record_def(record, kinds))
            .collect();

        let record_map: HashMap<String, usize> = records
            .iter()
            .enumerate()
            .map(|(idx, r)| (r.name.clone(), idx))
            .collect();

        // Embedded records are resolved before their containers.
        for &idx in &dependency_order {
            let fixed = records[idx].fields.iter().all(|field| {
                is_fixed_kind(&field.kind, |name| {
                    record_map
                        .get(name)
                        .is_some_and(|&inner| records[inner].fixed_layout)
                })
            });
            records[idx].fixed_layout = fixed;
        }

        Ok(Self {
            module: schema.module.clone(),
            byte_order: schema.byte_order,
            records,
            dependency_order,
            record_map,
        })
    }

    /// Gets a resolved record by schema name.
    #[must_use]
    pub fn get_record(&self, name: &str) -> Option<&ResolvedRecord> {
        self.record_map.get(name).map(|&idx| &self.records[idx])
    }

    /// Iterates records so that every record follows the records it embeds.
    pub fn records_in_dependency_order(&self) -> impl Iterator<Item = &ResolvedRecord> {
        self.dependency_order.iter().map(|&idx| &self.records[idx])
    }

    /// Returns the distinct opaque type names used by the schema.
    pub fn opaque_types(&self) -> Vec<&str> {
        let mut names: Vec<&str> = Vec::new();
        for field in self.records.iter().flat_map(|r| &r.fields) {
            if let Some(name) = field.kind.opaque_name() {
                if !names.contains(&name) {
                    names.push(name);
                }
            }
        }
        names
    }
}

fn is_fixed_kind(kind: &FieldKind, record_is_fixed: impl Fn(&str) -> bool) -> bool {
    match kind {
        FieldKind::Primitive(_) => true,
        FieldKind::Record(name) => record_is_fixed(name),
        FieldKind::FixedArray { element, .. } => match element {
            ElementType::Primitive(_) => true,
            ElementType::Record(name) => record_is_fixed(name),
            ElementType::Opaque(_) => false,
        },
        FieldKind::Sequence(_) | FieldKind::Opaque(_) => false,
    }
}

/// Resolved record definition.
#[derive(Debug, Clone)]
pub struct ResolvedRecord {
    /// Record name as written in the schema.
    pub name: String,
    /// Rust type name (PascalCase).
    pub type_name: String,
    /// Description.
    pub comment: Option<String>,
    /// Resolved fields in declared order.
    pub fields: Vec<ResolvedField>,
    /// True if the record holds no sequence or opaque type anywhere in its
    /// composition.
    pub fixed_layout: bool,
}

impl ResolvedRecord {
    /// Creates a resolved record from a definition and its field kinds.
    ///
    /// `fixed_layout` starts out false; [`SchemaIr::from_schema`] settles it
    /// once embedded records are known.
    #[must_use]
    pub fn from_record_def(record: &RecordDef, kinds: Vec<FieldKind>) -> Self {
        let mut fields: Vec<ResolvedField> = record
            .fields
            .iter()
            .zip(kinds)
            .map(|(field, kind)| ResolvedField::from_field_def(field, kind))
            .collect();

        for idx in 1..fields.len() {
            if fields[idx].kind.is_sequence() && fields[idx - 1].kind.count_primitive().is_some() {
                fields[idx].count_field = Some(idx - 1);
            }
        }

        for field in &fields {
            if let Some(opaque) = field.kind.opaque_name() {
                tracing::warn!(
                    record = %record.name,
                    field = %field.name,
                    type_name = %opaque,
                    "unknown type, emitted verbatim as an opaque type"
                );
            }
        }

        Self {
            name: record.name.clone(),
            type_name: type_ident(&record.name),
            comment: record.comment.clone(),
            fields,
            fixed_layout: false,
        }
    }

    /// Iterates over counted sequences together with their count field.
    pub fn counted_sequences(&self) -> impl Iterator<Item = (&ResolvedField, &ResolvedField)> {
        self.fields
            .iter()
            .filter_map(|f| f.count_field.map(|idx| (f, &self.fields[idx])))
    }
}

/// Resolved field definition.
#[derive(Debug, Clone)]
pub struct ResolvedField {
    /// Field name as written in the schema.
    pub name: String,
    /// Field name in snake_case, without raw identifier prefix.
    pub snake_name: String,
    /// Rust identifier of the field (may be a raw identifier).
    pub ident: String,
    /// Declared type name.
    pub type_name: String,
    /// Description.
    pub comment: Option<String>,
    /// Classification of the field.
    pub kind: FieldKind,
    /// Index of the sibling that sizes this sequence, if any.
    pub count_field: Option<usize>,
}

impl ResolvedField {
    /// Creates a resolved field from a definition and its classification.
    #[must_use]
    pub fn from_field_def(field: &FieldDef, kind: FieldKind) -> Self {
        let snake_name = to_snake_case(&field.name);
        Self {
            name: field.name.clone(),
            ident: rust_ident(&snake_name),
            snake_name,
            type_name: field.type_name.clone(),
            comment: field.comment.clone(),
            kind,
            count_field: None,
        }
    }

    /// Returns the Rust type used to store this field.
    #[must_use]
    pub fn rust_type(&self) -> String {
        self.kind.rust_type()
    }

    /// Returns the name of the generated allocate routine, if any.
    #[must_use]
    pub fn allocator_name(&self) -> Option<String> {
        self.count_field
            .map(|_| format!("allocate_{}", self.snake_name))
    }
}

/// Converts a string to snake_case.
#[must_use]
pub fn to_snake_case(s: &str) -> String {
    let chars: Vec<char> = s.chars().collect();
    let mut result = String::with_capacity(s.len() + 4);
    for (i, &c) in chars.iter().enumerate() {
        if c == '-' || c == ' ' {
            result.push('_');
            continue;
        }
        if c.is_uppercase() && i > 0 {
            let prev = chars[i - 1];
            let next_lower = chars.get(i + 1).is_some_and(|n| n.is_lowercase());
            let boundary = prev.is_lowercase()
                || prev.is_ascii_digit()
                || (prev.is_uppercase() && next_lower);
            if boundary && !result.ends_with('_') {
                result.push('_');
            }
        }
        result.push(c.to_ascii_lowercase());
    }
    result
}

/// Converts a string to PascalCase.
#[must_use]
pub fn to_pascal_case(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    let mut capitalize_next = true;

    for c in s.chars() {
        if c == '_' || c == '-' {
            capitalize_next = true;
        } else if capitalize_next {
            result.push(c.to_ascii_uppercase());
            capitalize_next = false;
        } else {
            result.push(c);
        }
    }

    result
}

/// Returns true if `name` is a Rust keyword, including `self`, `Self`,
/// `crate` and `super`.
#[must_use]
pub fn is_keyword(name: &str) -> bool {
    RUST_KEYWORDS.contains(&name) || RESERVED_IDENTS.contains(&name)
}

/// Turns a snake_case name into a usable Rust field identifier.
///
/// Keywords become raw identifiers; `self`, `crate` and `super` get a
/// trailing underscore.
#[must_use]
pub fn rust_ident(name: &str) -> String {
    if RESERVED_IDENTS.contains(&name) {
        format!("{name}_")
    } else if RUST_KEYWORDS.contains(&name) {
        format!("r#{name}")
    } else {
        name.to_string()
    }
}

/// Turns a schema record name into a Rust type identifier.
#[must_use]
pub fn type_ident(name: &str) -> String {
    let pascal = to_pascal_case(name);
    if RESERVED_IDENTS.contains(&pascal.as_str()) {
        format!("{pascal}_")
    } else {
        pascal
    }
}
