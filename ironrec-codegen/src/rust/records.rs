//! Record type code generation.

use crate::layout::RecordLayout;

/// Generator for record structs, their `Default` impls and allocate routines.
pub struct RecordGenerator<'a> {
    layout: &'a RecordLayout,
}

impl<'a> RecordGenerator<'a> {
    /// Creates a new record generator.
    #[must_use]
    pub fn new(layout: &'a RecordLayout) -> Self {
        Self { layout }
    }

    /// Generates the struct, `Default` impl and inherent impl.
    #[must_use]
    pub fn generate(&self) -> String {
        let mut output = String::new();
        output.push_str(&self.generate_struct());
        output.push_str(&self.generate_default());
        output.push_str(&self.generate_allocators());
        output
    }

    /// Generates the struct definition.
    fn generate_struct(&self) -> String {
        let layout = self.layout;
        let mut output = String::new();

        match &layout.comment {
            Some(comment) => push_doc(&mut output, "", comment),
            None => output.push_str(&format!("/// {} record.\n", layout.type_name)),
        }
        output.push_str(&format!("#[repr({})]\n", layout.repr()));
        output.push_str(&format!("#[derive({})]\n", layout.derives()));
        output.push_str(&format!("pub struct {} {{\n", layout.type_name));
        for slot in &layout.slots {
            if let Some(comment) = &slot.comment {
                push_doc(&mut output, "    ", comment);
            }
            output.push_str(&format!("    pub {}: {},\n", slot.ident, slot.rust_type));
        }
        output.push_str("}\n\n");

        output
    }

    /// Generates the zero-initializing `Default` impl.
    fn generate_default(&self) -> String {
        let layout = self.layout;
        let mut output = String::new();

        output.push_str(&format!("impl Default for {} {{\n", layout.type_name));
        output.push_str("    fn default() -> Self {\n");
        if layout.slots.is_empty() {
            output.push_str("        Self {}\n");
        } else {
            output.push_str("        Self {\n");
            for slot in &layout.slots {
                output.push_str(&format!(
                    "            {}: {},\n",
                    slot.ident,
                    slot.init.expression()
                ));
            }
            output.push_str("        }\n");
        }
        output.push_str("    }\n");
        output.push_str("}\n\n");

        output
    }

    /// Generates the allocate routines, if the record has counted sequences.
    fn generate_allocators(&self) -> String {
        let layout = self.layout;
        if layout.allocators.is_empty() {
            return String::new();
        }

        let mut output = String::new();
        output.push_str(&format!("impl {} {{\n", layout.type_name));
        for (i, alloc) in layout.allocators.iter().enumerate() {
            if i > 0 {
                output.push('\n');
            }
            output.push_str(&format!(
                "    /// Resizes `{}` to the current value of `{}`.\n",
                alloc.sequence.trim_start_matches("r#"),
                alloc.count.trim_start_matches("r#")
            ));
            output.push_str(&format!("    pub fn {}(&mut self) {{\n", alloc.name));
            output.push_str(&format!(
                "        let len = SequenceLen::sequence_len(&self.{});\n",
                alloc.count
            ));
            output.push_str(&format!(
                "        self.{}.resize_with(len, Default::default);\n",
                alloc.sequence
            ));
            output.push_str("    }\n");
        }
        output.push_str("}\n\n");

        output
    }
}

/// Appends a comment as `///` lines at the given indentation.
pub(crate) fn push_doc(output: &mut String, indent: &str, comment: &str) {
    for line in comment.lines() {
        let line = line.trim_end();
        if line.is_empty() {
            output.push_str(&format!("{indent}///\n"));
        } else {
            output.push_str(&format!("{indent}/// {line}\n"));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ironrec_schema::ir::SchemaIr;
    use ironrec_schema::parser::parse_schema;

    fn layout_of(json: &str, name: &str) -> RecordLayout {
        let schema = parse_schema(json).expect("Failed to parse schema");
        let ir = SchemaIr::from_schema(&schema).expect("Failed to build IR");
        RecordLayout::build(ir.get_record(name).expect("record"))
    }

    #[test]
    fn test_generate_packed_struct() {
        let layout = layout_of(
            r#"{ "records": [ { "name": "point", "comment": "A point", "fields": [
                { "name": "x", "type": "double", "comment": "X axis" },
                { "name": "label", "type": "char", "length": 4 }
            ] } ] }"#,
            "point",
        );
        let output = RecordGenerator::new(&layout).generate();

        assert!(output.contains("/// A point\n#[repr(C, packed)]\n"));
        assert!(output.contains("#[derive(Debug, Clone, Copy, PartialEq)]"));
        assert!(output.contains("pub struct Point {"));
        assert!(output.contains("    /// X axis\n    pub x: f64,"));
        assert!(output.contains("pub label: [u8; 4],"));
        assert!(output.contains("impl Default for Point {"));
        assert!(output.contains("x: 0.0,"));
        assert!(output.contains("label: [0u8; 4],"));
        assert!(!output.contains("allocate_"));
    }

    #[test]
    fn test_generate_allocator() {
        let layout = layout_of(
            r#"{ "records": [ { "name": "Frame", "fields": [
                { "name": "count", "type": "int16" },
                { "name": "items", "type": "sequence<uint32>" }
            ] } ] }"#,
            "Frame",
        );
        let output = RecordGenerator::new(&layout).generate();

        assert!(output.contains("#[repr(C)]\n"));
        assert!(output.contains("pub items: Vec<u32>,"));
        assert!(output.contains("items: Vec::new(),"));
        assert!(output.contains("impl Frame {"));
        assert!(output.contains("pub fn allocate_items(&mut self) {"));
        assert!(output.contains("let len = SequenceLen::sequence_len(&self.count);"));
        assert!(output.contains("self.items.resize_with(len, Default::default);"));
    }

    #[test]
    fn test_generate_empty_record() {
        let layout = layout_of(r#"{ "records": [ { "name": "Empty", "fields": [] } ] }"#, "Empty");
        let output = RecordGenerator::new(&layout).generate();
        assert!(output.contains("/// Empty record.\n"));
        assert!(output.contains("pub struct Empty {\n}"));
        assert!(output.contains("Self {}"));
    }

    #[test]
    fn test_push_doc_multiline() {
        let mut output = String::new();
        push_doc(&mut output, "    ", "first\n\nthird");
        assert_eq!(output, "    /// first\n    ///\n    /// third\n");
    }
}
