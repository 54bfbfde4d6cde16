//! Record definitions for schemas.
//!
//! This module contains the document-level data structures for records and
//! their fields, exactly as declared in the schema document.

/// Record definition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordDef {
    /// Record name as written in the schema.
    pub name: String,
    /// Description, emitted as a doc comment.
    pub comment: Option<String>,
    /// Fields in declared order.
    pub fields: Vec<FieldDef>,
}

impl RecordDef {
    /// Creates a new record definition with no fields.
    #[must_use]
    pub fn new(name: String) -> Self {
        Self {
            name,
            comment: None,
            fields: Vec::new(),
        }
    }

    /// Adds a field to the record.
    pub fn add_field(&mut self, field: FieldDef) {
        self.fields.push(field);
    }

    /// Sets the record comment.
    #[must_use]
    pub fn with_comment(mut self, comment: impl Into<String>) -> Self {
        self.comment = Some(comment.into());
        self
    }
}

/// Field definition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldDef {
    /// Field name as written in the schema.
    pub name: String,
    /// Declared type name.
    pub type_name: String,
    /// Fixed array length, if the field is a fixed array.
    pub array_length: Option<usize>,
    /// Description, emitted as a doc comment.
    pub comment: Option<String>,
}

impl FieldDef {
    /// Creates a new scalar field definition.
    #[must_use]
    pub fn new(name: String, type_name: String) -> Self {
        Self {
            name,
            type_name,
            array_length: None,
            comment: None,
        }
    }

    /// Turns the field into a fixed array of `length` elements.
    #[must_use]
    pub fn with_length(mut self, length: usize) -> Self {
        self.array_length = Some(length);
        self
    }

    /// Sets the field comment.
    #[must_use]
    pub fn with_comment(mut self, comment: impl Into<String>) -> Self {
        self.comment = Some(comment.into());
        self
    }

    /// Returns true if the field declares a fixed array length.
    #[must_use]
    pub const fn is_array(&self) -> bool {
        self.array_length.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_def_builder() {
        let mut record = RecordDef::new("Frame".to_string()).with_comment("a frame");
        record.add_field(FieldDef::new("count".to_string(), "uint32".to_string()));
        record.add_field(
            FieldDef::new("tag".to_string(), "char".to_string())
                .with_length(8)
                .with_comment("label"),
        );

        assert_eq!(record.comment.as_deref(), Some("a frame"));
        assert_eq!(record.fields.len(), 2);
        assert!(!record.fields[0].is_array());

        let tag = &record.fields[1];
        assert!(tag.is_array());
        assert_eq!(tag.array_length, Some(8));
        assert_eq!(tag.comment.as_deref(), Some("label"));
    }
}
