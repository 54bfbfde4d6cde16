//! Error types for schema parsing and validation.

use thiserror::Error;

/// Error type for schema parsing operations.
#[derive(Debug, Error)]
pub enum ParseError {
    /// The document is not valid JSON or does not match the schema grammar.
    #[error("JSON decode error: {0}")]
    Json(#[from] serde_json::Error),

    /// Invalid attribute value.
    #[error("invalid value '{value}' for attribute '{attribute}' on element '{element}'")]
    InvalidAttribute {
        /// Element name.
        element: String,
        /// Attribute name.
        attribute: String,
        /// Invalid value.
        value: String,
    },

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Error type for schema validation.
#[derive(Debug, Error)]
pub enum SchemaError {
    /// A record or field has an empty name.
    #[error("empty name for {kind} in '{context}'")]
    EmptyName {
        /// Kind of the unnamed element (record or field).
        kind: String,
        /// Enclosing element.
        context: String,
    },

    /// A record or field name cannot be turned into a Rust identifier.
    #[error("invalid {kind} name: '{name}'")]
    InvalidName {
        /// Kind of the element (record or field).
        kind: String,
        /// Offending name.
        name: String,
    },

    /// Duplicate definition.
    #[error("duplicate {kind} definition: '{name}'")]
    DuplicateDefinition {
        /// Kind of definition (record, field).
        kind: String,
        /// Name of the duplicate.
        name: String,
    },

    /// Fixed array with a non-positive length.
    #[error("field '{record}.{field}' declares invalid array length {length}")]
    InvalidArrayLength {
        /// Record name.
        record: String,
        /// Field name.
        field: String,
        /// Declared length.
        length: usize,
    },

    /// Sequence or fixed array whose element is itself a sequence.
    #[error("field '{record}.{field}' has unsupported element type '{type_name}'")]
    UnsupportedElement {
        /// Record name.
        record: String,
        /// Field name.
        field: String,
        /// Declared type name.
        type_name: String,
    },

    /// Circular record composition.
    #[error("circular type reference detected: {path}")]
    CircularReference {
        /// Path of the circular reference.
        path: String,
    },
}

impl ParseError {
    /// Creates an invalid attribute error.
    pub fn invalid_attr(
        element: impl Into<String>,
        attribute: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        Self::InvalidAttribute {
            element: element.into(),
            attribute: attribute.into(),
            value: value.into(),
        }
    }
}

impl SchemaError {
    /// Creates a duplicate definition error.
    pub fn duplicate(kind: impl Into<String>, name: impl Into<String>) -> Self {
        Self::DuplicateDefinition {
            kind: kind.into(),
            name: name.into(),
        }
    }

    /// Creates an invalid name error.
    pub fn invalid_name(kind: impl Into<String>, name: impl Into<String>) -> Self {
        Self::InvalidName {
            kind: kind.into(),
            name: name.into(),
        }
    }

    /// Creates an empty name error.
    pub fn empty_name(kind: impl Into<String>, context: impl Into<String>) -> Self {
        Self::EmptyName {
            kind: kind.into(),
            context: context.into(),
        }
    }

    /// Creates an unsupported element error.
    pub fn unsupported_element(
        record: impl Into<String>,
        field: impl Into<String>,
        type_name: impl Into<String>,
    ) -> Self {
        Self::UnsupportedElement {
            record: record.into(),
            field: field.into(),
            type_name: type_name.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_duplicate_display() {
        let err = SchemaError::duplicate("record", "Frame");
        assert_eq!(err.to_string(), "duplicate record definition: 'Frame'");
    }

    #[test]
    fn test_circular_display() {
        let err = SchemaError::CircularReference {
            path: "A -> B -> A".to_string(),
        };
        assert!(err.to_string().contains("A -> B -> A"));
    }

    #[test]
    fn test_invalid_attribute_display() {
        let err = ParseError::invalid_attr("schema", "byteOrder", "middle");
        assert_eq!(
            err.to_string(),
            "invalid value 'middle' for attribute 'byteOrder' on element 'schema'"
        );
    }
}
