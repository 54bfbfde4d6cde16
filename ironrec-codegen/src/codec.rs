//! Encode/decode planning.
//!
//! Produces mirror-image step lists for a record. Both lists visit fields in
//! declared order; decode additionally sizes sequences before reading their
//! elements, either through the generated allocate routine (counted
//! sequences) or from a 32-bit length prefix (self-describing sequences).
//! The plan also carries the record's minimum encoded size, which decoders
//! of enclosing sequences check against the remaining input.

use ironrec_schema::classify::{ElementType, FieldKind};
use ironrec_schema::ir::{ResolvedField, ResolvedRecord};

/// How generated code reaches a field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    /// Borrow the field in place.
    Reference,
    /// Copy the field out (encode) and assign it back (decode).
    ///
    /// Used for fields of packed records whose alignment exceeds one byte.
    Copy,
}

/// One encode step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EncodeStep {
    /// Encode a scalar, record or opaque value.
    WriteValue {
        /// Field identifier.
        field: String,
        /// Field access mode.
        access: Access,
    },
    /// Write a byte block verbatim.
    WriteBlock {
        /// Field identifier.
        field: String,
    },
    /// Encode every element in order.
    WriteElements {
        /// Field identifier.
        field: String,
        /// Field access mode.
        access: Access,
    },
    /// Write the 32-bit length prefix of a self-describing sequence.
    WriteLengthPrefix {
        /// Field identifier.
        field: String,
    },
}

/// One decode step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DecodeStep {
    /// Decode a scalar, record or opaque value.
    ReadValue {
        /// Field identifier.
        field: String,
        /// Field access mode.
        access: Access,
    },
    /// Read a byte block verbatim.
    ReadBlock {
        /// Field identifier.
        field: String,
    },
    /// Decode every element in order.
    ReadElements {
        /// Field identifier.
        field: String,
        /// Field access mode.
        access: Access,
    },
    /// Size a counted sequence from its already decoded count field.
    Allocate {
        /// Count field identifier.
        count: String,
        /// Allocate routine name.
        allocator: String,
        /// Rust type of one element.
        element: String,
    },
    /// Read a length prefix and resize the sequence to it.
    ReadLengthPrefix {
        /// Field identifier.
        field: String,
        /// Rust type of one element.
        element: String,
    },
}

/// Lower bound on the encoded size of a record.
///
/// Known byte counts are summed at generation time; records and opaque types
/// contribute their own `MIN_WIRE_SIZE`, multiplied by their repeat count.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WireSize {
    /// Bytes known at generation time.
    pub fixed: usize,
    /// `(repeat, type)` pairs resolved by the compiler.
    pub terms: Vec<(usize, String)>,
}

impl WireSize {
    fn add_fixed(&mut self, bytes: usize) {
        self.fixed = self.fixed.saturating_add(bytes);
    }

    fn add_element(&mut self, element: &ElementType, repeat: usize) {
        match element {
            ElementType::Primitive(prim) => self.add_fixed(prim.size().saturating_mul(repeat)),
            ElementType::Record(_) | ElementType::Opaque(_) => {
                self.terms.push((repeat, element.rust_type()));
            }
        }
    }

    /// Renders the size as a constant expression.
    #[must_use]
    pub fn expression(&self) -> String {
        let mut parts = Vec::with_capacity(self.terms.len() + 1);
        if self.fixed > 0 || self.terms.is_empty() {
            parts.push(self.fixed.to_string());
        }
        for (repeat, ty) in &self.terms {
            let size = format!("<{ty} as WireDecode>::MIN_WIRE_SIZE");
            if *repeat == 1 {
                parts.push(size);
            } else {
                parts.push(format!("{repeat} * {size}"));
            }
        }
        parts.join(" + ")
    }
}

/// Encode and decode plan of one record.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CodecPlan {
    /// Encode steps in wire order.
    pub encode: Vec<EncodeStep>,
    /// Decode steps in wire order.
    pub decode: Vec<DecodeStep>,
    /// Minimum encoded size of the record.
    pub min_wire_size: WireSize,
}

impl CodecPlan {
    /// Plans the codec of a resolved record.
    #[must_use]
    pub fn build(record: &ResolvedRecord) -> Self {
        let mut plan = Self::default();
        for field in &record.fields {
            plan.push_field(record, field);
        }
        plan
    }

    fn push_field(&mut self, record: &ResolvedRecord, field: &ResolvedField) {
        let ident = field.ident.clone();
        let access = access_for(&field.kind, record.fixed_layout);

        match &field.kind {
            FieldKind::Primitive(prim) => {
                self.min_wire_size.add_fixed(prim.size());
                self.push_value(ident, access);
            }
            FieldKind::Opaque(_) | FieldKind::Record(_) => {
                self.min_wire_size.terms.push((1, field.rust_type()));
                self.push_value(ident, access);
            }
            FieldKind::FixedArray {
                element: ElementType::Primitive(prim),
                length,
            } if prim.is_byte() => {
                self.min_wire_size.add_fixed(*length);
                self.encode.push(EncodeStep::WriteBlock {
                    field: ident.clone(),
                });
                self.decode.push(DecodeStep::ReadBlock { field: ident });
            }
            FieldKind::FixedArray { element, length } => {
                self.min_wire_size.add_element(element, *length);
                self.push_elements(ident, access);
            }
            FieldKind::Sequence(element) => {
                let element = element.rust_type();
                let counted = field
                    .count_field
                    .map(|idx| &record.fields[idx])
                    .zip(field.allocator_name());
                match counted {
                    Some((count, allocator)) => {
                        self.decode.push(DecodeStep::Allocate {
                            count: count.ident.clone(),
                            allocator,
                            element,
                        });
                    }
                    None => {
                        self.min_wire_size.add_fixed(4);
                        self.encode.push(EncodeStep::WriteLengthPrefix {
                            field: ident.clone(),
                        });
                        self.decode.push(DecodeStep::ReadLengthPrefix {
                            field: ident.clone(),
                            element,
                        });
                    }
                }
                self.push_elements(ident, access);
            }
        }
    }

    fn push_value(&mut self, field: String, access: Access) {
        self.encode.push(EncodeStep::WriteValue {
            field: field.clone(),
            access,
        });
        self.decode.push(DecodeStep::ReadValue { field, access });
    }

    fn push_elements(&mut self, field: String, access: Access) {
        self.encode.push(EncodeStep::WriteElements {
            field: field.clone(),
            access,
        });
        self.decode.push(DecodeStep::ReadElements { field, access });
    }
}

/// Returns the access mode of a field.
///
/// Packed records only hold primitives, byte blocks and packed records.
/// Primitives and non-byte primitive arrays may be misaligned there and are
/// copied; everything else has alignment one and is borrowed.
#[must_use]
pub fn access_for(kind: &FieldKind, packed: bool) -> Access {
    if !packed {
        return Access::Reference;
    }
    match kind {
        FieldKind::Primitive(prim) if prim.size() > 1 => Access::Copy,
        FieldKind::FixedArray {
            element: ElementType::Primitive(prim),
            ..
        } if prim.size() > 1 => Access::Copy,
        _ => Access::Reference,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ironrec_schema::ir::SchemaIr;
    use ironrec_schema::parser::parse_schema;

    fn build_ir(json: &str) -> SchemaIr {
        let schema = parse_schema(json).expect("Failed to parse schema");
        SchemaIr::from_schema(&schema).expect("Failed to build IR")
    }

    #[test]
    fn test_counted_sequence_plan() {
        let ir = build_ir(
            r#"{ "records": [ { "name": "Frame", "fields": [
                { "name": "count", "type": "uint32" },
                { "name": "items", "type": "sequence<uint32>" }
            ] } ] }"#,
        );
        let plan = CodecPlan::build(&ir.records[0]);
        assert_eq!(
            plan.encode,
            vec![
                EncodeStep::WriteValue {
                    field: "count".to_string(),
                    access: Access::Reference
                },
                EncodeStep::WriteElements {
                    field: "items".to_string(),
                    access: Access::Reference
                },
            ]
        );
        assert_eq!(
            plan.decode,
            vec![
                DecodeStep::ReadValue {
                    field: "count".to_string(),
                    access: Access::Reference
                },
                DecodeStep::Allocate {
                    count: "count".to_string(),
                    allocator: "allocate_items".to_string(),
                    element: "u32".to_string()
                },
                DecodeStep::ReadElements {
                    field: "items".to_string(),
                    access: Access::Reference
                },
            ]
        );
    }

    #[test]
    fn test_self_describing_sequence_plan() {
        let ir = build_ir(
            r#"{ "records": [ { "name": "Frame", "fields": [
                { "name": "items", "type": "sequence<uint32>" }
            ] } ] }"#,
        );
        let plan = CodecPlan::build(&ir.records[0]);
        assert_eq!(
            plan.encode[0],
            EncodeStep::WriteLengthPrefix {
                field: "items".to_string()
            }
        );
        assert_eq!(
            plan.decode[0],
            DecodeStep::ReadLengthPrefix {
                field: "items".to_string(),
                element: "u32".to_string()
            }
        );
        assert_eq!(plan.encode.len(), 2);
        assert_eq!(plan.decode.len(), 2);
    }

    #[test]
    fn test_byte_block_and_packed_access() {
        let ir = build_ir(
            r#"{ "records": [ { "name": "Tagged", "fields": [
                { "name": "tag", "type": "char", "length": 8 },
                { "name": "flag", "type": "uint8" },
                { "name": "id", "type": "uint64" },
                { "name": "gains", "type": "float", "length": 2 }
            ] } ] }"#,
        );
        let plan = CodecPlan::build(&ir.records[0]);
        assert_eq!(
            plan.encode,
            vec![
                EncodeStep::WriteBlock {
                    field: "tag".to_string()
                },
                EncodeStep::WriteValue {
                    field: "flag".to_string(),
                    access: Access::Reference
                },
                EncodeStep::WriteValue {
                    field: "id".to_string(),
                    access: Access::Copy
                },
                EncodeStep::WriteElements {
                    field: "gains".to_string(),
                    access: Access::Copy
                },
            ]
        );
    }

    #[test]
    fn test_unpacked_records_use_references() {
        let ir = build_ir(
            r#"{ "records": [ { "name": "Mixed", "fields": [
                { "name": "id", "type": "uint64" },
                { "name": "stamp", "type": "Timestamp" }
            ] } ] }"#,
        );
        let plan = CodecPlan::build(&ir.records[0]);
        assert!(plan.encode.iter().all(|step| !matches!(
            step,
            EncodeStep::WriteValue {
                access: Access::Copy,
                ..
            }
        )));
    }

    #[test]
    fn test_min_wire_size() {
        let ir = build_ir(
            r#"{ "records": [
                { "name": "Block", "fields": [ { "name": "data", "type": "char", "length": 16 } ] },
                { "name": "Holder", "fields": [
                    { "name": "id", "type": "uint16" },
                    { "name": "pair", "type": "Block", "length": 2 },
                    { "name": "stamp", "type": "Timestamp" },
                    { "name": "count", "type": "uint32" },
                    { "name": "blocks", "type": "sequence<Block>" },
                    { "name": "extra", "type": "sequence<double>" }
                ] },
                { "name": "Empty", "fields": [] }
            ] }"#,
        );

        let block = CodecPlan::build(&ir.records[0]);
        assert_eq!(block.min_wire_size.fixed, 16);
        assert_eq!(block.min_wire_size.expression(), "16");

        let holder = CodecPlan::build(&ir.records[1]);
        assert_eq!(
            holder.min_wire_size.expression(),
            "10 + 2 * <Block as WireDecode>::MIN_WIRE_SIZE + <Timestamp as WireDecode>::MIN_WIRE_SIZE"
        );

        let empty = CodecPlan::build(&ir.records[2]);
        assert_eq!(empty.min_wire_size.expression(), "0");
    }

    #[test]
    fn test_decode_mirrors_encode_order() {
        let ir = build_ir(
            r#"{ "records": [ { "name": "R", "fields": [
                { "name": "a", "type": "i16" },
                { "name": "b", "type": "char", "length": 2 },
                { "name": "n", "type": "u8" },
                { "name": "c", "type": "sequence<i16>" },
                { "name": "d", "type": "sequence<u8>" }
            ] } ] }"#,
        );
        let plan = CodecPlan::build(&ir.records[0]);
        let encoded: Vec<&str> = plan
            .encode
            .iter()
            .filter_map(|step| match step {
                EncodeStep::WriteValue { field, .. }
                | EncodeStep::WriteBlock { field }
                | EncodeStep::WriteElements { field, .. } => Some(field.as_str()),
                EncodeStep::WriteLengthPrefix { .. } => None,
            })
            .collect();
        let decoded: Vec<&str> = plan
            .decode
            .iter()
            .filter_map(|step| match step {
                DecodeStep::ReadValue { field, .. }
                | DecodeStep::ReadBlock { field }
                | DecodeStep::ReadElements { field, .. } => Some(field.as_str()),
                DecodeStep::Allocate { .. } | DecodeStep::ReadLengthPrefix { .. } => None,
            })
            .collect();
        assert_eq!(encoded, vec!["a", "b", "n", "c", "d"]);
        assert_eq!(encoded, decoded);
    }
}
