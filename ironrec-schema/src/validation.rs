//! Schema validation utilities.
//!
//! This module checks names, classifies every field and orders records so
//! that each record comes after every record it embeds. Circular
//! composition is reported with the offending path.

use crate::classify::{FieldKind, TypeClassifier};
use crate::error::SchemaError;
use crate::ir::{to_pascal_case, to_snake_case};
use crate::types::{PrimitiveType, Schema};
use std::collections::HashMap;

/// Validates a parsed schema for correctness.
///
/// # Arguments
/// * `schema` - The schema to validate
///
/// # Returns
/// Ok(()) if valid, or SchemaError describing the issue.
///
/// # Errors
/// Returns `SchemaError` if validation fails.
pub fn validate_schema(schema: &Schema) -> Result<(), SchemaError> {
    validate_names(schema)?;
    let kinds = classify_schema(schema)?;
    dependency_order(schema, &kinds)?;
    Ok(())
}

/// Validates the module, record and field names.
///
/// The module name must be a plain identifier. Record names must be unique,
/// also after conversion to PascalCase. Field names must be unique within
/// their record, also after conversion to snake_case.
///
/// # Errors
/// Returns `SchemaError` for empty, malformed or duplicate names.
pub fn validate_names(schema: &Schema) -> Result<(), SchemaError> {
    if !is_plain_identifier(&schema.module) {
        return Err(SchemaError::invalid_name("module", &schema.module));
    }

    let mut seen_records: HashMap<String, &str> = HashMap::new();

    for record in &schema.records {
        if record.name.trim().is_empty() {
            return Err(SchemaError::empty_name("record", &schema.module));
        }
        if !is_identifier(&record.name) || !is_plain_identifier(&to_pascal_case(&record.name)) {
            return Err(SchemaError::invalid_name("record", &record.name));
        }
        if let Some(previous) = seen_records.insert(to_pascal_case(&record.name), &record.name) {
            return Err(SchemaError::duplicate(
                "record",
                duplicate_label(previous, &record.name),
            ));
        }
        if PrimitiveType::from_type_name(&record.name).is_some() {
            tracing::warn!(
                record = %record.name,
                "record name shadows a primitive type; fields of this type resolve to the primitive"
            );
        }

        let mut seen_fields: HashMap<String, &str> = HashMap::new();
        for field in &record.fields {
            if field.name.trim().is_empty() {
                return Err(SchemaError::empty_name("field", &record.name));
            }
            if field.type_name.is_empty() {
                return Err(SchemaError::empty_name(
                    "type",
                    format!("{}.{}", record.name, field.name),
                ));
            }
            if !is_identifier(&field.name) || !is_plain_identifier(&to_snake_case(&field.name)) {
                return Err(SchemaError::invalid_name(
                    "field",
                    format!("{}.{}", record.name, field.name),
                ));
            }
            if let Some(previous) = seen_fields.insert(to_snake_case(&field.name), &field.name) {
                return Err(SchemaError::duplicate(
                    "field",
                    format!("{}.{}", record.name, duplicate_label(previous, &field.name)),
                ));
            }
        }
    }

    Ok(())
}

/// Classifies every field of every record.
///
/// The result is indexed like `schema.records` and each record's fields.
///
/// # Errors
/// Returns the first classification error in document order.
pub fn classify_schema(schema: &Schema) -> Result<Vec<Vec<FieldKind>>, SchemaError> {
    let classifier = TypeClassifier::new(schema.records.iter().map(|r| r.name.as_str()));
    schema
        .records
        .iter()
        .map(|record| {
            record
                .fields
                .iter()
                .map(|field| classifier.classify(&record.name, field))
                .collect::<Result<Vec<_>, _>>()
        })
        .collect()
}

/// Computes an order in which every record follows the records it embeds.
///
/// References through fixed arrays and sequences count as edges. Ties are
/// broken by document order, so the result is deterministic.
///
/// # Arguments
/// * `schema` - The schema whose records are ordered
/// * `kinds` - Field classifications as returned by [`classify_schema`]
///
/// # Errors
/// Returns [`SchemaError::CircularReference`] naming the cycle if a record
/// contains itself directly or transitively.
pub fn dependency_order(
    schema: &Schema,
    kinds: &[Vec<FieldKind>],
) -> Result<Vec<usize>, SchemaError> {
    let edges: Vec<Vec<usize>> = kinds
        .iter()
        .map(|fields| {
            fields
                .iter()
                .filter_map(FieldKind::referenced_record)
                .filter_map(|name| schema.record_index(name))
                .collect()
        })
        .collect();

    let mut sorter = TopoSort {
        edges: &edges,
        marks: vec![Mark::Unvisited; edges.len()],
        path: Vec::new(),
        order: Vec::with_capacity(edges.len()),
    };
    for index in 0..edges.len() {
        sorter.visit(index).map_err(|cycle| SchemaError::CircularReference {
            path: cycle
                .iter()
                .map(|&i| schema.records[i].name.as_str())
                .collect::<Vec<_>>()
                .join(" -> "),
        })?;
    }
    Ok(sorter.order)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mark {
    Unvisited,
    InProgress,
    Done,
}

struct TopoSort<'a> {
    edges: &'a [Vec<usize>],
    marks: Vec<Mark>,
    path: Vec<usize>,
    order: Vec<usize>,
}

impl TopoSort<'_> {
    /// Depth-first visit; on a back edge returns the cycle as record indices.
    fn visit(&mut self, node: usize) -> Result<(), Vec<usize>> {
        match self.marks[node] {
            Mark::Done => return Ok(()),
            Mark::InProgress => {
                let start = self.path.iter().position(|&n| n == node).unwrap_or(0);
                let mut cycle = self.path[start..].to_vec();
                cycle.push(node);
                return Err(cycle);
            }
            Mark::Unvisited => {}
        }

        self.marks[node] = Mark::InProgress;
        self.path.push(node);
        for &next in &self.edges[node] {
            self.visit(next)?;
        }
        self.path.pop();
        self.marks[node] = Mark::Done;
        self.order.push(node);
        Ok(())
    }
}

fn duplicate_label(previous: &str, current: &str) -> String {
    if previous == current {
        current.to_string()
    } else {
        format!("{current} (collides with {previous})")
    }
}

fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    name != "_" && chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
}

/// Returns true for a Rust identifier without dashes; `_` alone is rejected.
fn is_plain_identifier(name: &str) -> bool {
    is_identifier(name) && !name.contains('-')
}
