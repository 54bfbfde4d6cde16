//! Field type classification.
//!
//! Every field is assigned exactly one [`FieldKind`] from its declared type
//! name, its optional array length and the set of record names in the
//! schema. Rules are applied in priority order: fixed array, sequence,
//! primitive, record, and finally the opaque fallback.

use crate::error::SchemaError;
use crate::ir::type_ident;
use crate::records::FieldDef;
use crate::types::PrimitiveType;
use std::collections::HashSet;

/// Spellings of the variable-length sequence syntax.
const SEQUENCE_PREFIXES: [&str; 2] = ["sequence<", "QVector<"];

/// Type of a fixed array or sequence element.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ElementType {
    /// Fixed-width primitive.
    Primitive(PrimitiveType),
    /// Another record of the schema, by schema name.
    Record(String),
    /// Unknown type name, used verbatim.
    Opaque(String),
}

impl ElementType {
    /// Returns the Rust type used to store one element.
    #[must_use]
    pub fn rust_type(&self) -> String {
        match self {
            Self::Primitive(prim) => prim.rust_type().to_string(),
            Self::Record(name) => type_ident(name),
            Self::Opaque(name) => name.clone(),
        }
    }

    /// Returns the referenced record name, if any.
    #[must_use]
    pub fn record_name(&self) -> Option<&str> {
        match self {
            Self::Record(name) => Some(name),
            _ => None,
        }
    }

    /// Returns the primitive type, if this is a primitive element.
    #[must_use]
    pub const fn primitive(&self) -> Option<PrimitiveType> {
        match self {
            Self::Primitive(prim) => Some(*prim),
            _ => None,
        }
    }
}

/// Classification of a field.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum FieldKind {
    /// Single fixed-width primitive.
    Primitive(PrimitiveType),
    /// Unknown type name, serialized through the type's own codec.
    Opaque(String),
    /// Fixed number of elements, no length on the wire.
    FixedArray {
        /// Element type.
        element: ElementType,
        /// Number of elements.
        length: usize,
    },
    /// Variable-length sequence.
    Sequence(ElementType),
    /// Embedded record, by schema name.
    Record(String),
}

impl FieldKind {
    /// Returns the name of the record this field embeds, if any.
    ///
    /// Looks through fixed arrays and sequences.
    #[must_use]
    pub fn referenced_record(&self) -> Option<&str> {
        match self {
            Self::Record(name) => Some(name),
            Self::FixedArray { element, .. } | Self::Sequence(element) => element.record_name(),
            Self::Primitive(_) | Self::Opaque(_) => None,
        }
    }

    /// Returns the primitive type if this field can size a following sequence.
    #[must_use]
    pub const fn count_primitive(&self) -> Option<PrimitiveType> {
        match self {
            Self::Primitive(prim) if prim.is_integer() => Some(*prim),
            _ => None,
        }
    }

    /// Returns true if this is a variable-length sequence.
    #[must_use]
    pub const fn is_sequence(&self) -> bool {
        matches!(self, Self::Sequence(_))
    }

    /// Returns true if the field, or its element, is an opaque type.
    #[must_use]
    pub const fn is_opaque(&self) -> bool {
        match self {
            Self::Opaque(_) => true,
            Self::FixedArray { element, .. } | Self::Sequence(element) => {
                matches!(element, ElementType::Opaque(_))
            }
            _ => false,
        }
    }

    /// Returns the name of the opaque type used by this field, if any.
    #[must_use]
    pub fn opaque_name(&self) -> Option<&str> {
        match self {
            Self::Opaque(name)
            | Self::FixedArray {
                element: ElementType::Opaque(name),
                ..
            }
            | Self::Sequence(ElementType::Opaque(name)) => Some(name),
            _ => None,
        }
    }

    /// Returns the Rust type used to store the field.
    #[must_use]
    pub fn rust_type(&self) -> String {
        match self {
            Self::Primitive(prim) => prim.rust_type().to_string(),
            Self::Opaque(name) => name.clone(),
            Self::FixedArray { element, length } => format!("[{}; {length}]", element.rust_type()),
            Self::Sequence(element) => format!("Vec<{}>", element.rust_type()),
            Self::Record(name) => type_ident(name),
        }
    }
}

/// Returns the element type name if `type_name` uses the sequence syntax.
#[must_use]
pub fn sequence_element(type_name: &str) -> Option<&str> {
    let type_name = type_name.trim();
    SEQUENCE_PREFIXES.iter().find_map(|prefix| {
        type_name
            .strip_prefix(prefix)
            .and_then(|rest| rest.strip_suffix('>'))
            .map(str::trim)
    })
}

/// Classifies fields against the record names of one schema.
#[derive(Debug, Clone)]
pub struct TypeClassifier<'a> {
    records: HashSet<&'a str>,
}

impl<'a> TypeClassifier<'a> {
    /// Creates a classifier that knows the given record names.
    #[must_use]
    pub fn new(record_names: impl IntoIterator<Item = &'a str>) -> Self {
        Self {
            records: record_names.into_iter().collect(),
        }
    }

    /// Returns true if `name` is a record of the schema.
    #[must_use]
    pub fn is_record(&self, name: &str) -> bool {
        self.records.contains(name)
    }

    /// Classifies one field of `record`.
    ///
    /// # Errors
    /// Returns [`SchemaError::InvalidArrayLength`] for a zero-length array and
    /// [`SchemaError::UnsupportedElement`] for arrays of sequences and nested
    /// sequences.
    pub fn classify(&self, record: &str, field: &FieldDef) -> Result<FieldKind, SchemaError> {
        let type_name = field.type_name.trim();

        if let Some(length) = field.array_length {
            if length == 0 {
                return Err(SchemaError::InvalidArrayLength {
                    record: record.to_string(),
                    field: field.name.clone(),
                    length,
                });
            }
            if sequence_element(type_name).is_some() {
                return Err(SchemaError::unsupported_element(
                    record,
                    &field.name,
                    type_name,
                ));
            }
            return Ok(FieldKind::FixedArray {
                element: self.classify_element(type_name),
                length,
            });
        }

        if let Some(inner) = sequence_element(type_name) {
            if sequence_element(inner).is_some() {
                return Err(SchemaError::unsupported_element(
                    record,
                    &field.name,
                    type_name,
                ));
            }
            return Ok(FieldKind::Sequence(self.classify_element(inner)));
        }

        Ok(match self.classify_element(type_name) {
            ElementType::Primitive(prim) => FieldKind::Primitive(prim),
            ElementType::Record(name) => FieldKind::Record(name),
            ElementType::Opaque(name) => FieldKind::Opaque(name),
        })
    }

    /// Classifies a scalar type name as primitive, record or opaque.
    #[must_use]
    pub fn classify_element(&self, type_name: &str) -> ElementType {
        let type_name = type_name.trim();
        if let Some(prim) = PrimitiveType::from_type_name(type_name) {
            ElementType::Primitive(prim)
        } else if self.is_record(type_name) {
            ElementType::Record(type_name.to_string())
        } else {
            ElementType::Opaque(type_name.to_string())
        }
    }
}
