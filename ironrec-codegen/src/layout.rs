//! Record layout planning.
//!
//! Turns a resolved record into storage slots, zero-initialization rules and
//! the allocate routines derived from count relations. The result is pure
//! data; rendering happens in [`crate::rust`].

use ironrec_schema::classify::{ElementType, FieldKind};
use ironrec_schema::ir::ResolvedRecord;

/// Zero-initialization rule for one storage slot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ZeroInit {
    /// Primitive zero literal (`0` or `0.0`).
    Zero(&'static str),
    /// Byte block filled with zero bytes.
    ZeroBlock {
        /// Block length in bytes.
        length: usize,
    },
    /// Primitive array filled with the element zero.
    FillArray {
        /// Element zero literal.
        zero: &'static str,
        /// Number of elements.
        length: usize,
    },
    /// Array whose elements are each default-constructed.
    DefaultArray,
    /// Embedded record built from its own default.
    Record(String),
    /// Opaque type built from its `Default` impl.
    Default,
    /// Sequence starting empty.
    Empty,
}

impl ZeroInit {
    /// Renders the initializer expression.
    #[must_use]
    pub fn expression(&self) -> String {
        match self {
            Self::Zero(zero) => (*zero).to_string(),
            Self::ZeroBlock { length } => format!("[0u8; {length}]"),
            Self::FillArray { zero, length } => format!("[{zero}; {length}]"),
            Self::DefaultArray => "::core::array::from_fn(|_| Default::default())".to_string(),
            Self::Record(type_name) => format!("{type_name}::default()"),
            Self::Default => "Default::default()".to_string(),
            Self::Empty => "Vec::new()".to_string(),
        }
    }
}

/// Storage slot of one field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldSlot {
    /// Rust field identifier.
    pub ident: String,
    /// Rust storage type.
    pub rust_type: String,
    /// Zero-initialization rule.
    pub init: ZeroInit,
    /// Field description.
    pub comment: Option<String>,
}

/// Generated routine that sizes a sequence from its count field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Allocator {
    /// Routine name, `allocate_<field>`.
    pub name: String,
    /// Identifier of the sequence field.
    pub sequence: String,
    /// Identifier of the count field.
    pub count: String,
}

/// Memory layout of one record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordLayout {
    /// Rust type name.
    pub type_name: String,
    /// Record description.
    pub comment: Option<String>,
    /// True if the record is declared byte-tight (`repr(C, packed)`).
    pub packed: bool,
    /// Storage slots in declared order.
    pub slots: Vec<FieldSlot>,
    /// Allocate routines in declared order of their sequences.
    pub allocators: Vec<Allocator>,
}

impl RecordLayout {
    /// Builds the layout of a resolved record.
    #[must_use]
    pub fn build(record: &ResolvedRecord) -> Self {
        let slots = record
            .fields
            .iter()
            .map(|field| FieldSlot {
                ident: field.ident.clone(),
                rust_type: field.rust_type(),
                init: zero_init(&field.kind),
                comment: field.comment.clone(),
            })
            .collect();

        let allocators = record
            .fields
            .iter()
            .filter_map(|field| {
                let count = &record.fields[field.count_field?];
                Some(Allocator {
                    name: field.allocator_name()?,
                    sequence: field.ident.clone(),
                    count: count.ident.clone(),
                })
            })
            .collect();

        Self {
            type_name: record.type_name.clone(),
            comment: record.comment.clone(),
            packed: record.fixed_layout,
            slots,
            allocators,
        }
    }

    /// Returns the derive list for the record.
    #[must_use]
    pub fn derives(&self) -> &'static str {
        if self.packed {
            "Debug, Clone, Copy, PartialEq"
        } else {
            "Debug, Clone, PartialEq"
        }
    }

    /// Returns the repr attribute arguments for the record.
    #[must_use]
    pub fn repr(&self) -> &'static str {
        if self.packed { "C, packed" } else { "C" }
    }
}

/// Returns the zero-initialization rule for a field kind.
#[must_use]
pub fn zero_init(kind: &FieldKind) -> ZeroInit {
    match kind {
        FieldKind::Primitive(prim) => ZeroInit::Zero(prim.zero_literal()),
        FieldKind::Opaque(_) => ZeroInit::Default,
        FieldKind::Record(_) => ZeroInit::Record(kind.rust_type()),
        FieldKind::Sequence(_) => ZeroInit::Empty,
        FieldKind::FixedArray { element, length } => match element {
            ElementType::Primitive(prim) if prim.is_byte() => ZeroInit::ZeroBlock { length: *length },
            ElementType::Primitive(prim) => ZeroInit::FillArray {
                zero: prim.zero_literal(),
                length: *length,
            },
            ElementType::Record(_) | ElementType::Opaque(_) => ZeroInit::DefaultArray,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ironrec_schema::ir::SchemaIr;
    use ironrec_schema::parser::parse_schema;

    fn create_test_ir() -> SchemaIr {
        let json = r#"{ "records": [
            { "name": "Point", "fields": [
                { "name": "x", "type": "double" },
                { "name": "y", "type": "double" }
            ] },
            { "name": "Frame", "comment": "A frame", "fields": [
                { "name": "count", "type": "uint32" },
                { "name": "items", "type": "sequence<uint32>" },
                { "name": "tag", "type": "char", "length": 8 },
                { "name": "gains", "type": "float", "length": 3 },
                { "name": "corners", "type": "Point", "length": 4 },
                { "name": "origin", "type": "Point" },
                { "name": "stamp", "type": "Timestamp" },
                { "name": "notes", "type": "sequence<Point>" }
            ] }
        ] }"#;
        let schema = parse_schema(json).expect("Failed to parse schema");
        SchemaIr::from_schema(&schema).expect("Failed to build IR")
    }

    #[test]
    fn test_zero_init_per_kind() {
        let ir = create_test_ir();
        let layout = RecordLayout::build(ir.get_record("Frame").expect("Frame"));
        let inits: Vec<String> = layout.slots.iter().map(|s| s.init.expression()).collect();
        assert_eq!(
            inits,
            vec![
                "0",
                "Vec::new()",
                "[0u8; 8]",
                "[0.0; 3]",
                "::core::array::from_fn(|_| Default::default())",
                "Point::default()",
                "Default::default()",
                "Vec::new()",
            ]
        );
    }

    #[test]
    fn test_storage_types() {
        let ir = create_test_ir();
        let layout = RecordLayout::build(ir.get_record("Frame").expect("Frame"));
        let types: Vec<&str> = layout.slots.iter().map(|s| s.rust_type.as_str()).collect();
        assert_eq!(
            types,
            vec![
                "u32",
                "Vec<u32>",
                "[u8; 8]",
                "[f32; 3]",
                "[Point; 4]",
                "Point",
                "Timestamp",
                "Vec<Point>",
            ]
        );
    }

    #[test]
    fn test_allocators_only_for_counted_sequences() {
        let ir = create_test_ir();
        let layout = RecordLayout::build(ir.get_record("Frame").expect("Frame"));
        assert_eq!(
            layout.allocators,
            vec![Allocator {
                name: "allocate_items".to_string(),
                sequence: "items".to_string(),
                count: "count".to_string(),
            }]
        );
    }

    #[test]
    fn test_packing() {
        let ir = create_test_ir();
        let point = RecordLayout::build(ir.get_record("Point").expect("Point"));
        assert!(point.packed);
        assert_eq!(point.repr(), "C, packed");
        assert!(point.derives().contains("Copy"));

        let frame = RecordLayout::build(ir.get_record("Frame").expect("Frame"));
        assert!(!frame.packed);
        assert_eq!(frame.repr(), "C");
        assert!(!frame.derives().contains("Copy"));
        assert_eq!(frame.comment.as_deref(), Some("A frame"));
    }
}
