//! Encode/decode impl code generation.

use crate::codec::{Access, CodecPlan, DecodeStep, EncodeStep};

/// Generator for `WireEncode` and `WireDecode` impls.
pub struct CodecGenerator<'a> {
    type_name: &'a str,
    plan: &'a CodecPlan,
}

impl<'a> CodecGenerator<'a> {
    /// Creates a new codec generator.
    #[must_use]
    pub fn new(type_name: &'a str, plan: &'a CodecPlan) -> Self {
        Self { type_name, plan }
    }

    /// Generates both impls.
    #[must_use]
    pub fn generate(&self) -> String {
        let mut output = String::new();
        output.push_str(&self.generate_encode());
        output.push_str(&self.generate_decode());
        output
    }

    /// Generates the `WireEncode` impl.
    fn generate_encode(&self) -> String {
        let mut output = String::new();
        let writer = if self.plan.encode.is_empty() {
            "_writer"
        } else {
            "writer"
        };

        output.push_str(&format!("impl WireEncode for {} {{\n", self.type_name));
        output.push_str(&format!(
            "    fn encode(&self, {writer}: &mut WireWriter) -> wire::Result<()> {{\n"
        ));
        for step in &self.plan.encode {
            output.push_str(&encode_step(step));
        }
        output.push_str("        Ok(())\n");
        output.push_str("    }\n");
        output.push_str("}\n\n");

        output
    }

    /// Generates the `WireDecode` impl.
    fn generate_decode(&self) -> String {
        let mut output = String::new();
        let reader = if self.plan.decode.is_empty() {
            "_reader"
        } else {
            "reader"
        };

        output.push_str(&format!("impl WireDecode for {} {{\n", self.type_name));
        output.push_str(&format!(
            "    const MIN_WIRE_SIZE: usize = {};\n\n",
            self.plan.min_wire_size.expression()
        ));
        output.push_str(&format!(
            "    fn decode_from(&mut self, {reader}: &mut WireReader<'_>) -> wire::Result<()> {{\n"
        ));
        for step in &self.plan.decode {
            output.push_str(&decode_step(step));
        }
        output.push_str("        Ok(())\n");
        output.push_str("    }\n");
        output.push_str("}\n\n");

        output
    }
}

fn encode_step(step: &EncodeStep) -> String {
    match step {
        EncodeStep::WriteValue {
            field,
            access: Access::Reference,
        } => format!("        WireEncode::encode(&self.{field}, writer)?;\n"),
        EncodeStep::WriteValue {
            field,
            access: Access::Copy,
        } => format!("        WireEncode::encode(&{{ self.{field} }}, writer)?;\n"),
        EncodeStep::WriteBlock { field } => format!("        writer.put_raw(&self.{field});\n"),
        EncodeStep::WriteElements {
            field,
            access: Access::Reference,
        } => format!(
            "        for item in self.{field}.iter() {{\n\
             \x20           WireEncode::encode(item, writer)?;\n\
             \x20       }}\n"
        ),
        EncodeStep::WriteElements {
            field,
            access: Access::Copy,
        } => format!(
            "        let elements = self.{field};\n\
             \x20       for item in elements.iter() {{\n\
             \x20           WireEncode::encode(item, writer)?;\n\
             \x20       }}\n"
        ),
        EncodeStep::WriteLengthPrefix { field } => {
            format!("        writer.put_len(self.{field}.len())?;\n")
        }
    }
}

fn decode_step(step: &DecodeStep) -> String {
    match step {
        DecodeStep::ReadValue {
            field,
            access: Access::Reference,
        } => format!("        WireDecode::decode_from(&mut self.{field}, reader)?;\n"),
        DecodeStep::ReadValue {
            field,
            access: Access::Copy,
        } => format!("        self.{field} = WireDecode::decode(reader)?;\n"),
        DecodeStep::ReadBlock { field } => format!("        reader.get_raw(&mut self.{field})?;\n"),
        DecodeStep::ReadElements {
            field,
            access: Access::Reference,
        } => format!(
            "        for item in self.{field}.iter_mut() {{\n\
             \x20           WireDecode::decode_from(item, reader)?;\n\
             \x20       }}\n"
        ),
        DecodeStep::ReadElements {
            field,
            access: Access::Copy,
        } => format!(
            "        let mut elements = self.{field};\n\
             \x20       for item in elements.iter_mut() {{\n\
             \x20           WireDecode::decode_from(item, reader)?;\n\
             \x20       }}\n\
             \x20       self.{field} = elements;\n"
        ),
        DecodeStep::Allocate {
            count,
            allocator,
            element,
        } => format!(
            "        reader.check_sequence::<{element}>(SequenceLen::sequence_len(&self.{count}))?;\n\
             \x20       self.{allocator}();\n"
        ),
        DecodeStep::ReadLengthPrefix { field, element } => format!(
            "        let len = reader.get_len()?;\n\
             \x20       reader.check_sequence::<{element}>(len)?;\n\
             \x20       self.{field}.resize_with(len, Default::default);\n"
        ),
    }
}
