//! Debug printer generation
//!
//! Emits a `<name>_to_string` function per enum and struct, printing
//! through the runtime's `OutputHandler` interface. Struct printers carry
//! an indentation parameter and recurse into nested aggregates; bounded
//! collections print element by element.

use schemabridge_model::{Enumeration, Field, Module, Primitive, Struct, Type};
use tracing::debug;

use crate::ctypes::{c_type_for_enum, c_type_for_struct};
use crate::error::{CodegenError, CodegenResult};
use crate::naming::pascal_to_snake_case;
use crate::style::BraceStyle;
use crate::writer::{CodeWriter, WriterMode};

/// Generates debug printers for one module.
pub struct CToStringGenerator<'m> {
    module: &'m Module,
    style: BraceStyle,
    header_out: CodeWriter,
    module_out: CodeWriter,
}

impl<'m> CToStringGenerator<'m> {
    pub fn new(module: &'m Module) -> Self {
        Self::with_style(module, BraceStyle::default())
    }

    pub fn with_style(module: &'m Module, style: BraceStyle) -> Self {
        CToStringGenerator {
            module,
            style,
            header_out: CodeWriter::new(WriterMode::C),
            module_out: CodeWriter::new(WriterMode::C),
        }
    }

    /// Emit a printer for every enum and struct.
    pub fn run(&mut self) -> CodegenResult<()> {
        let module = self.module;
        for enumeration in module.enums() {
            debug!(declaration = enumeration.name(), "emitting enum printer");
            self.write_enum_to_string(enumeration)?;
        }
        for struct_decl in module.structs() {
            debug!(declaration = struct_decl.name(), "emitting struct printer");
            self.write_struct_to_string(struct_decl)?;
        }
        Ok(())
    }

    /// The generated (declarations, definitions) pair. Valid once `run`
    /// has completed.
    pub fn result(self) -> CodegenResult<(String, String)> {
        Ok((self.header_out.result()?, self.module_out.result()?))
    }

    fn write_enum_to_string(&mut self, enumeration: &Enumeration) -> CodegenResult<()> {
        let signature = format!(
            "void {}_to_string({} value, struct OutputHandler *out)",
            pascal_to_snake_case(enumeration.name()),
            c_type_for_enum(enumeration)
        );
        self.header_out.writeln(&format!("{signature};"));

        let style = self.style;
        style.introduce_block(&mut self.module_out, &signature);
        self.module_out.block(
            |out| {
                style.introduce_block(out, "switch (value)");
                out.block(
                    |out| {
                        for value in enumeration.values() {
                            out.writeln(&format!("case {value}:"));
                            out.indent();
                            out.writeln(&format!(
                                "OutputHandler_process(out, \"%s\", \"{value}\");"
                            ));
                            out.writeln("break;");
                            out.unindent();
                        }
                        out.writeln("default:");
                        out.indent();
                        out.writeln(&format!(
                            "OutputHandler_process(out, \"Unknown %s value: %d\", \"{}\", value);",
                            enumeration.name()
                        ));
                        out.unindent();
                        Ok(())
                    },
                    "",
                )
            },
            "",
        )?;
        self.module_out.writeln("");
        Ok(())
    }

    fn write_struct_to_string(&mut self, struct_decl: &Struct) -> CodegenResult<()> {
        let signature = format!(
            "void {}_to_string({} value, struct OutputHandler *out, size_t indentation)",
            pascal_to_snake_case(struct_decl.name()),
            c_type_for_struct(struct_decl)
        );
        self.header_out.writeln(&format!("{signature};"));

        let style = self.style;
        style.introduce_block(&mut self.module_out, &signature);
        self.module_out.block(
            |out| {
                out.writeln(&format!(
                    "OutputHandler_process(out, \"{} {{\\n\");",
                    struct_decl.name()
                ));
                for field in struct_decl.fields() {
                    write_field_to_string(out, style, struct_decl, field)?;
                }
                out.writeln("OutputHandler_indent(out, indentation);");
                out.writeln("OutputHandler_process(out, \"}\");");
                Ok(())
            },
            "",
        )?;
        self.module_out.writeln("");
        Ok(())
    }
}

fn write_field_to_string(
    out: &mut CodeWriter,
    style: BraceStyle,
    struct_decl: &Struct,
    field: &Field,
) -> CodegenResult<()> {
    out.writeln("OutputHandler_indent(out, indentation + 1);");
    out.writeln(&format!(
        "OutputHandler_process(out, \"%s: \", \"{}\");",
        field.name()
    ));
    match field.ty() {
        Type::Struct(nested) => {
            out.writeln(&format!(
                "{}_to_string(value.{}, out, indentation + 1);",
                pascal_to_snake_case(nested.name()),
                field.name()
            ));
        }
        Type::Enum(nested) => {
            out.writeln(&format!(
                "{}_to_string(value.{}, out);",
                pascal_to_snake_case(nested.name()),
                field.name()
            ));
        }
        Type::Primitive(primitive) => {
            out.writeln(&format!(
                "OutputHandler_process(out, \"{}\", value.{});",
                printf_code(*primitive),
                field.name()
            ));
        }
        Type::Array(array) => {
            let upper_bound = array.length().name().to_string();
            write_elements_to_string(out, style, field, array.element_type(), &upper_bound)?;
        }
        Type::List(list) => {
            let bound = list
                .maximum_length()
                .ok_or_else(|| {
                    CodegenError::for_field(
                        struct_decl.name(),
                        field.name(),
                        CodegenError::UnboundedList {
                            element: list.element_type().name().to_string(),
                        },
                    )
                })?;
            let upper_bound = format!(
                "{} && index < value.{}_length",
                bound.name(),
                field.name()
            );
            write_elements_to_string(out, style, field, list.element_type(), &upper_bound)?;
        }
        Type::Set(_) | Type::Map(_) => {
            return Err(CodegenError::for_field(
                struct_decl.name(),
                field.name(),
                CodegenError::UnsupportedType {
                    type_name: field.ty().name().to_string(),
                },
            ));
        }
    }
    out.writeln("OutputHandler_process(out, \",\\n\");");
    Ok(())
}

fn write_elements_to_string(
    out: &mut CodeWriter,
    style: BraceStyle,
    field: &Field,
    element_type: &Type,
    upper_bound: &str,
) -> CodegenResult<()> {
    out.writeln("OutputHandler_process(out, \"[\\n\");");
    style.introduce_block(
        out,
        &format!("for (size_t index = 0; index < {upper_bound}; ++index)"),
    );
    out.block(
        |out| {
            out.writeln("OutputHandler_indent(out, indentation + 2);");
            match element_type {
                Type::Struct(nested) => {
                    out.writeln(&format!(
                        "{}_to_string(value.{}[index], out, indentation + 2);",
                        pascal_to_snake_case(nested.name()),
                        field.name()
                    ));
                }
                Type::Enum(nested) => {
                    out.writeln(&format!(
                        "{}_to_string(value.{}[index], out);",
                        pascal_to_snake_case(nested.name()),
                        field.name()
                    ));
                }
                Type::Primitive(primitive) => {
                    out.writeln(&format!(
                        "OutputHandler_process(out, \"{}\", value.{}[index]);",
                        printf_code(*primitive),
                        field.name()
                    ));
                }
                Type::List(_) | Type::Array(_) | Type::Set(_) | Type::Map(_) => {
                    return Err(CodegenError::UnsupportedType {
                        type_name: format!("collection of {}", element_type.name()),
                    });
                }
            }
            out.writeln("OutputHandler_process(out, \",\\n\");");
            Ok(())
        },
        "",
    )?;
    out.writeln("OutputHandler_indent(out, indentation + 1);");
    out.writeln("OutputHandler_process(out, \"]\");");
    Ok(())
}

fn printf_code(primitive: Primitive) -> &'static str {
    match primitive {
        Primitive::Int64 => "%lld",
        Primitive::UInt64 => "%llu",
        Primitive::Int32 => "%ld",
        Primitive::UInt32 => "%lu",
        Primitive::Int16 | Primitive::Int8 => "%d",
        Primitive::UInt16 | Primitive::UInt8 => "%u",
        Primitive::Float | Primitive::Double => "%f",
        Primitive::Boolean => "%d",
        Primitive::String => "%s",
    }
}
