//! Schema type definitions.
//!
//! This module contains the data structures representing a parsed schema
//! and the fixed-width primitive types of the schema language.

use crate::records::RecordDef;
use ironrec_core::ByteOrder;
use std::collections::HashMap;

/// Default name of the generated module.
pub const DEFAULT_MODULE_NAME: &str = "generated_structs";

/// Complete schema definition.
#[derive(Debug, Clone)]
pub struct Schema {
    /// Name of the generated module.
    pub module: String,
    /// Byte order for encoding.
    pub byte_order: ByteOrder,
    /// Record definitions, in document order.
    pub records: Vec<RecordDef>,
    /// Record lookup map (built during parsing).
    record_map: HashMap<String, usize>,
}

impl Schema {
    /// Creates a new empty schema.
    #[must_use]
    pub fn new(module: String, byte_order: ByteOrder) -> Self {
        Self {
            module,
            byte_order,
            records: Vec::new(),
            record_map: HashMap::new(),
        }
    }

    /// Adds a record definition to the schema.
    ///
    /// If a record with the same name already exists, the lookup map keeps
    /// pointing at the first one; validation reports the duplicate.
    pub fn add_record(&mut self, record: RecordDef) {
        let index = self.records.len();
        self.record_map.entry(record.name.clone()).or_insert(index);
        self.records.push(record);
    }

    /// Looks up a record by name.
    #[must_use]
    pub fn get_record(&self, name: &str) -> Option<&RecordDef> {
        self.record_map.get(name).map(|&idx| &self.records[idx])
    }

    /// Returns the index of a record by name.
    #[must_use]
    pub fn record_index(&self, name: &str) -> Option<usize> {
        self.record_map.get(name).copied()
    }

    /// Returns true if a record with the given name exists.
    #[must_use]
    pub fn has_record(&self, name: &str) -> bool {
        self.record_map.contains_key(name)
    }
}

impl Default for Schema {
    fn default() -> Self {
        Self::new(DEFAULT_MODULE_NAME.to_string(), ByteOrder::default())
    }
}

/// Fixed-width primitive types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PrimitiveType {
    /// Single character (1 byte).
    Char,
    /// Signed 8-bit integer.
    Int8,
    /// Signed 16-bit integer.
    Int16,
    /// Signed 32-bit integer.
    Int32,
    /// Signed 64-bit integer.
    Int64,
    /// Unsigned 8-bit integer.
    Uint8,
    /// Unsigned 16-bit integer.
    Uint16,
    /// Unsigned 32-bit integer.
    Uint32,
    /// Unsigned 64-bit integer.
    Uint64,
    /// 32-bit floating point.
    Float,
    /// 64-bit floating point.
    Double,
}

impl PrimitiveType {
    /// Returns the size of the primitive type in bytes.
    #[must_use]
    pub const fn size(&self) -> usize {
        match self {
            Self::Char | Self::Int8 | Self::Uint8 => 1,
            Self::Int16 | Self::Uint16 => 2,
            Self::Int32 | Self::Uint32 | Self::Float => 4,
            Self::Int64 | Self::Uint64 | Self::Double => 8,
        }
    }

    /// Returns the Rust type name for this primitive.
    #[must_use]
    pub const fn rust_type(&self) -> &'static str {
        match self {
            Self::Char => "u8",
            Self::Int8 => "i8",
            Self::Int16 => "i16",
            Self::Int32 => "i32",
            Self::Int64 => "i64",
            Self::Uint8 => "u8",
            Self::Uint16 => "u16",
            Self::Uint32 => "u32",
            Self::Uint64 => "u64",
            Self::Float => "f32",
            Self::Double => "f64",
        }
    }

    /// Parses a primitive type from a schema type name.
    ///
    /// Accepts the canonical names (`uint32`), the Qt spellings (`quint32`)
    /// and the Rust spellings (`u32`).
    #[must_use]
    pub fn from_type_name(name: &str) -> Option<Self> {
        match name {
            "char" => Some(Self::Char),
            "int8" | "qint8" | "i8" => Some(Self::Int8),
            "int16" | "qint16" | "i16" => Some(Self::Int16),
            "int32" | "qint32" | "i32" => Some(Self::Int32),
            "int64" | "qint64" | "i64" => Some(Self::Int64),
            "uint8" | "quint8" | "u8" => Some(Self::Uint8),
            "uint16" | "quint16" | "u16" => Some(Self::Uint16),
            "uint32" | "quint32" | "u32" => Some(Self::Uint32),
            "uint64" | "quint64" | "u64" => Some(Self::Uint64),
            "float" | "f32" => Some(Self::Float),
            "double" | "f64" => Some(Self::Double),
            _ => None,
        }
    }

    /// Returns true if this is a signed integer type.
    #[must_use]
    pub const fn is_signed(&self) -> bool {
        matches!(self, Self::Int8 | Self::Int16 | Self::Int32 | Self::Int64)
    }

    /// Returns true if this is an unsigned integer type.
    #[must_use]
    pub const fn is_unsigned(&self) -> bool {
        matches!(
            self,
            Self::Uint8 | Self::Uint16 | Self::Uint32 | Self::Uint64
        )
    }

    /// Returns true if this is a fixed-width integer, i.e. usable as a count.
    #[must_use]
    pub const fn is_integer(&self) -> bool {
        self.is_signed() || self.is_unsigned()
    }

    /// Returns true if this is a floating point type.
    #[must_use]
    pub const fn is_float(&self) -> bool {
        matches!(self, Self::Float | Self::Double)
    }

    /// Returns true if arrays of this type are stored as raw byte blocks.
    #[must_use]
    pub const fn is_byte(&self) -> bool {
        matches!(self, Self::Char | Self::Uint8)
    }

    /// Returns the Rust literal for this type's zero value.
    #[must_use]
    pub const fn zero_literal(&self) -> &'static str {
        if self.is_float() { "0.0" } else { "0" }
    }
}
