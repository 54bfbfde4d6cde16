//! JSON schema parser.
//!
//! This module turns a schema document into the [`Schema`] model. The
//! document shape is a single object with an optional `module`, an optional
//! `byteOrder` and a `records` array; the older `structs` / `members` /
//! `arraySize` spellings are accepted as aliases. Unknown keys are ignored.

use crate::error::ParseError;
use crate::records::{FieldDef, RecordDef};
use crate::types::{DEFAULT_MODULE_NAME, Schema};
use ironrec_core::ByteOrder;
use serde::Deserialize;
use std::io::Read;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawSchema {
    #[serde(default)]
    module: Option<String>,
    #[serde(default)]
    byte_order: Option<String>,
    #[serde(alias = "structs")]
    records: Vec<RawRecord>,
}

#[derive(Debug, Deserialize)]
struct RawRecord {
    name: String,
    #[serde(default)]
    comment: Option<String>,
    #[serde(alias = "members", default)]
    fields: Vec<RawField>,
}

#[derive(Debug, Deserialize)]
struct RawField {
    name: String,
    #[serde(rename = "type")]
    type_name: String,
    #[serde(alias = "arraySize", default)]
    length: Option<usize>,
    #[serde(default)]
    comment: Option<String>,
}

/// Parses a schema document from a string.
///
/// # Arguments
/// * `json` - Schema document content
///
/// # Returns
/// Parsed schema or parse error.
///
/// # Errors
/// Returns `ParseError` if the document is malformed JSON, does not match the
/// schema grammar, or names an unknown byte order.
pub fn parse_schema(json: &str) -> Result<Schema, ParseError> {
    let raw: RawSchema = serde_json::from_str(json)?;
    build_schema(raw)
}

/// Parses a schema document from a reader.
///
/// # Errors
/// Returns `ParseError` if reading fails or the content is not a valid schema
/// document.
pub fn parse_reader<R: Read>(mut reader: R) -> Result<Schema, ParseError> {
    let mut content = String::new();
    reader.read_to_string(&mut content)?;
    parse_schema(&content)
}

fn build_schema(raw: RawSchema) -> Result<Schema, ParseError> {
    let module = raw
        .module
        .filter(|m| !m.trim().is_empty())
        .unwrap_or_else(|| DEFAULT_MODULE_NAME.to_string());

    let byte_order = match raw.byte_order {
        Some(value) => ByteOrder::parse(&value)
            .ok_or_else(|| ParseError::invalid_attr("schema", "byteOrder", value))?,
        None => ByteOrder::default(),
    };

    let mut schema = Schema::new(module, byte_order);
    for raw_record in raw.records {
        schema.add_record(build_record(raw_record));
    }
    Ok(schema)
}

fn build_record(raw: RawRecord) -> RecordDef {
    let mut record = RecordDef::new(raw.name);
    record.comment = non_empty(raw.comment);
    for raw_field in raw.fields {
        record.add_field(FieldDef {
            name: raw_field.name,
            type_name: raw_field.type_name.trim().to_string(),
            array_length: raw_field.length,
            comment: non_empty(raw_field.comment),
        });
    }
    record
}

fn non_empty(comment: Option<String>) -> Option<String> {
    comment.filter(|c| !c.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_simple_schema() {
        let json = r#"{
            "module": "telemetry",
            "byteOrder": "littleEndian",
            "records": [
                {
                    "name": "Frame",
                    "comment": "one frame",
                    "fields": [
                        { "name": "count", "type": "uint32", "comment": "item count" },
                        { "name": "items", "type": "sequence<uint32>" },
                        { "name": "tag", "type": "char", "length": 8 }
                    ]
                }
            ]
        }"#;

        let schema = parse_schema(json).expect("Failed to parse schema");
        assert_eq!(schema.module, "telemetry");
        assert_eq!(schema.byte_order, ByteOrder::LittleEndian);
        assert_eq!(schema.records.len(), 1);

        let frame = schema.get_record("Frame").expect("Frame record");
        assert_eq!(frame.comment.as_deref(), Some("one frame"));
        assert_eq!(frame.fields.len(), 3);
        assert_eq!(frame.fields[0].comment.as_deref(), Some("item count"));
        assert_eq!(frame.fields[1].type_name, "sequence<uint32>");
        assert_eq!(frame.fields[2].array_length, Some(8));
    }

    #[test]
    fn test_parse_defaults() {
        let json = r#"{ "records": [ { "name": "Empty", "fields": [] } ] }"#;
        let schema = parse_schema(json).expect("Failed to parse schema");
        assert_eq!(schema.module, DEFAULT_MODULE_NAME);
        assert_eq!(schema.byte_order, ByteOrder::BigEndian);
        assert!(schema.records[0].fields.is_empty());
        assert!(schema.records[0].comment.is_none());
    }

    #[test]
    fn test_parse_legacy_aliases() {
        let json = r#"{
            "structs": [
                {
                    "name": "Header",
                    "comment": "",
                    "members": [
                        { "name": "id", "type": "quint16", "comment": "" },
                        { "name": "label", "type": "char", "arraySize": 4 }
                    ]
                }
            ]
        }"#;

        let schema = parse_schema(json).expect("Failed to parse schema");
        let header = &schema.records[0];
        assert!(header.comment.is_none());
        assert_eq!(header.fields[0].type_name, "quint16");
        assert!(header.fields[0].comment.is_none());
        assert_eq!(header.fields[1].array_length, Some(4));
    }

    #[test]
    fn test_parse_ignores_unknown_keys() {
        let json = r#"{
            "version": 3,
            "records": [
                { "name": "A", "extra": true, "fields": [ { "name": "x", "type": "i32", "unit": "ms" } ] }
            ]
        }"#;
        let schema = parse_schema(json).expect("Failed to parse schema");
        assert_eq!(schema.records[0].fields[0].name, "x");
    }

    #[test]
    fn test_parse_malformed_json() {
        let result = parse_schema("{ \"records\": [ ");
        assert!(matches!(result, Err(ParseError::Json(_))));
    }

    #[test]
    fn test_parse_missing_type() {
        let json = r#"{ "records": [ { "name": "A", "fields": [ { "name": "x" } ] } ] }"#;
        assert!(matches!(parse_schema(json), Err(ParseError::Json(_))));
    }

    #[test]
    fn test_parse_negative_length() {
        let json = r#"{ "records": [ { "name": "A", "fields": [ { "name": "x", "type": "char", "length": -1 } ] } ] }"#;
        assert!(matches!(parse_schema(json), Err(ParseError::Json(_))));
    }

    #[test]
    fn test_parse_invalid_byte_order() {
        let json = r#"{ "byteOrder": "middleEndian", "records": [] }"#;
        let err = parse_schema(json).expect_err("byte order must be rejected");
        assert!(matches!(err, ParseError::InvalidAttribute { .. }));
        assert!(err.to_string().contains("middleEndian"));
    }

    #[test]
    fn test_parse_reader() {
        let json = br#"{ "records": [ { "name": "A", "fields": [ { "name": "x", "type": "u8" } ] } ] }"#;
        let schema = parse_reader(&json[..]).expect("Failed to parse schema");
        assert!(schema.has_record("A"));
    }
}
