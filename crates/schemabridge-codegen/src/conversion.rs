//! Bidirectional C↔Python conversion generation
//!
//! For every enumeration and struct of a module this generator emits a
//! `<Name>_to_c` and a `<Name>_to_python` function. Field conversion logic
//! is lowered through the marshalling tree builder; nested structs and
//! enums convert by calling their own generated functions rather than
//! inlining their field lists.
//!
//! The `_to_python` functions resolve the dynamic class handle once through
//! a function-local static and reuse it on every later call. Failure paths
//! in the emitted code (illegal ordinal, failed class lookup, failed
//! instantiation) abort through `fail_with_message` with the offending
//! value interpolated; they never proceed with a corrupt value.
//!
//! Declarations and definitions accumulate in two separate buffers so the
//! caller can write a header and an implementation file. Enums are visited
//! before structs, matching the forward-reference assumption of the header
//! generator.

use schemabridge_model::{Enumeration, Field, Module, Primitive, Struct, Type};
use tracing::debug;

use crate::ctypes::{c_type_for_enum, c_type_for_struct};
use crate::error::{CodegenError, CodegenResult};
use crate::marshal::{
    MacroArg, MacroCall, quote, with_array_attribute_elements, with_attribute,
    with_bool_attribute, with_float_attribute, with_int64_attribute,
    with_list_attribute_elements, with_string_attribute,
};
use crate::writer::{CodeWriter, WriterMode};

/// Generates the conversion functions between the native and dynamic
/// representations of one module.
pub struct CPythonConversionGenerator<'m> {
    module: &'m Module,
    module_prefix: String,
    protocol_name: String,
    header: CodeWriter,
    code: CodeWriter,
}

impl<'m> CPythonConversionGenerator<'m> {
    pub fn new(module: &'m Module) -> Self {
        Self::with_module_prefix(module, "")
    }

    /// `module_prefix` qualifies the Python module the dynamic classes are
    /// loaded from (e.g. a package path ending in `.`).
    pub fn with_module_prefix(module: &'m Module, module_prefix: &str) -> Self {
        CPythonConversionGenerator {
            module,
            module_prefix: module_prefix.to_string(),
            protocol_name: format!("python_{}_protocol", module.name()),
            header: CodeWriter::new(WriterMode::C),
            code: CodeWriter::new(WriterMode::C),
        }
    }

    /// Emit both conversion functions for every enum and struct.
    pub fn run(&mut self) -> CodegenResult<()> {
        let module = self.module;
        for enumeration in module.enums() {
            debug!(declaration = enumeration.name(), "emitting enum conversions");
            self.write_enum_python_to_c(enumeration)?;
            self.write_enum_c_to_python(enumeration)?;
        }
        for struct_decl in module.structs() {
            debug!(declaration = struct_decl.name(), "emitting struct conversions");
            self.write_struct_python_to_c(struct_decl)?;
            self.write_struct_c_to_python(struct_decl)?;
        }
        Ok(())
    }

    /// The generated (declarations, definitions) pair. Valid once `run`
    /// has completed.
    pub fn result(self) -> CodegenResult<(String, String)> {
        Ok((self.header.result()?, self.code.result()?))
    }

    fn write_signature(&mut self, signature: &str) {
        self.header.write(signature);
        self.header.writeln(";");
        self.code.write(signature);
        self.code.write(" ");
    }

    fn qualified_protocol(&self) -> String {
        format!("{}{}", self.module_prefix, self.protocol_name)
    }

    fn write_enum_python_to_c(&mut self, enumeration: &Enumeration) -> CodegenResult<()> {
        let signature = format!(
            "{} {}_to_c(PyObject *python_enum)",
            c_type_for_enum(enumeration),
            enumeration.name()
        );
        self.write_signature(&signature);

        self.code.block(
            |out| {
                out.writeln("int ordinal;");
                with_int64_attribute("python_enum", "value", MacroArg::literal("ordinal = value"))
                    .write_statement(out);
                out.writeln("switch (ordinal) {");
                for value in enumeration.values() {
                    out.writeln(&format!("    case {value}:"));
                    out.writeln(&format!("        return {value};"));
                }
                out.writeln("    default:");
                out.writeln(&format!(
                    "        fail_with_message(\"Illegal ordinal value for enum {} [%d]\", ordinal);",
                    enumeration.name()
                ));
                out.writeln("}");
                Ok(())
            },
            "",
        )?;
        self.code.writeln("");
        Ok(())
    }

    fn write_enum_c_to_python(&mut self, enumeration: &Enumeration) -> CodegenResult<()> {
        let signature = format!(
            "PyObject * {}_to_python({} value)",
            enumeration.name(),
            c_type_for_enum(enumeration)
        );
        self.write_signature(&signature);
        let protocol = self.qualified_protocol();

        self.code.block(
            |out| {
                out.writeln("static PyObject *enum_class = nullptr;");
                out.write("if (enum_class == nullptr) ");
                out.block(
                    |out| {
                        out.writeln(&format!(
                            "enum_class = load_class(\"{}\", \"{}\");",
                            protocol,
                            enumeration.name()
                        ));
                        Ok(())
                    },
                    "",
                )?;
                out.writeln("PyObject *result = PyObject_CallFunction(enum_class, \"i\", value);");
                out.write("if (result == NULL) ");
                out.block(
                    |out| {
                        out.writeln(&format!(
                            "fail_with_message(\"Unable to convert ordinal value [%d] to enum {}\", value);",
                            enumeration.name()
                        ));
                        Ok(())
                    },
                    "",
                )?;
                out.writeln("return result;");
                Ok(())
            },
            "",
        )?;
        self.code.writeln("");
        Ok(())
    }

    fn write_struct_python_to_c(&mut self, struct_decl: &Struct) -> CodegenResult<()> {
        let struct_c_type = c_type_for_struct(struct_decl);
        let signature = format!(
            "{} {}_to_c(PyObject *python_struct)",
            struct_c_type,
            struct_decl.name()
        );
        self.write_signature(&signature);

        self.code.block(
            |out| {
                out.writeln(&format!("{struct_c_type} result = {{}};"));
                for field in struct_decl.fields() {
                    let tree = assignment(
                        &format!("result.{}", field.name()),
                        field.name(),
                        field.ty(),
                    )
                    .map_err(|err| {
                        CodegenError::for_field(struct_decl.name(), field.name(), err)
                    })?;
                    tree.write_statement(out);
                }
                out.writeln("return result;");
                Ok(())
            },
            "",
        )?;
        self.code.writeln("");
        Ok(())
    }

    fn write_struct_c_to_python(&mut self, struct_decl: &Struct) -> CodegenResult<()> {
        let signature = format!(
            "PyObject * {}_to_python({} c_struct)",
            struct_decl.name(),
            c_type_for_struct(struct_decl)
        );
        self.write_signature(&signature);
        let protocol = self.qualified_protocol();

        self.code.block(
            |out| {
                out.writeln("static PyObject *struct_class = nullptr;");
                out.write("if (struct_class == nullptr) ");
                out.block(
                    |out| {
                        out.writeln(&format!(
                            "struct_class = load_class(\"{}\", \"{}\");",
                            protocol,
                            struct_decl.name()
                        ));
                        Ok(())
                    },
                    "",
                )?;
                out.writeln("PyObject *result = PyObject_CallFunction(struct_class, \"\");");
                out.write("if (result == NULL) ");
                out.block(
                    |out| {
                        out.writeln(&format!(
                            "fail_with_message(\"Unable to instantiate struct {}\");",
                            struct_decl.name()
                        ));
                        Ok(())
                    },
                    "",
                )?;
                for field in struct_decl.fields() {
                    let tree = to_python_attribute(field).map_err(|err| {
                        CodegenError::for_field(struct_decl.name(), field.name(), err)
                    })?;
                    tree.write_statement(out);
                }
                out.writeln("return result;");
                Ok(())
            },
            "",
        )?;
        self.code.writeln("");
        Ok(())
    }
}

/// Build the dynamic→native marshalling tree assigning one value into
/// `target`. Recurses through bounded collections, parameterizing the
/// per-element target by `item_index`.
fn assignment(target: &str, field_name: &str, value_type: &Type) -> CodegenResult<MacroCall> {
    match value_type {
        Type::Enum(enumeration) => Ok(with_attribute(
            "python_struct",
            field_name,
            MacroArg::literal(format!(
                "{target} = {}_to_c(python_value)",
                enumeration.name()
            )),
        )),
        Type::Struct(struct_decl) => Ok(with_attribute(
            "python_struct",
            field_name,
            MacroArg::literal(format!(
                "{target} = {}_to_c(python_value)",
                struct_decl.name()
            )),
        )),
        Type::Primitive(primitive) => {
            let action = MacroArg::literal(format!("{target} = {field_name}"));
            Ok(match primitive {
                Primitive::Boolean => with_bool_attribute("python_struct", field_name, action),
                Primitive::String => with_string_attribute("python_struct", field_name, action),
                Primitive::Float | Primitive::Double => {
                    with_float_attribute("python_struct", field_name, action)
                }
                Primitive::Int8
                | Primitive::UInt8
                | Primitive::Int16
                | Primitive::UInt16
                | Primitive::Int32
                | Primitive::UInt32
                | Primitive::Int64
                | Primitive::UInt64 => {
                    with_int64_attribute("python_struct", field_name, action)
                }
            })
        }
        Type::List(list) => {
            let element = assignment(
                &format!("{target}[item_index]"),
                &format!("{field_name}_item"),
                list.element_type(),
            )?;
            with_list_attribute_elements(
                "python_struct",
                field_name,
                list,
                MacroArg::call(element),
            )
        }
        Type::Array(array) => {
            let element = assignment(
                &format!("{target}[item_index]"),
                &format!("{field_name}_item"),
                array.element_type(),
            )?;
            with_array_attribute_elements(
                "python_struct",
                field_name,
                array,
                MacroArg::call(element),
            )
        }
        Type::Set(_) | Type::Map(_) => Err(CodegenError::UnsupportedType {
            type_name: value_type.name().to_string(),
        }),
    }
}

/// Build the native→dynamic marshalling tree storing one field of
/// `c_struct` into the freshly built Python object as a named attribute.
fn to_python_attribute(field: &Field) -> CodegenResult<MacroCall> {
    let set_attribute = |value: &str| {
        MacroCall::new(
            "set_python_attribute_and_decref",
            vec![
                MacroArg::literal("result"),
                MacroArg::literal(quote(field.name())),
                MacroArg::literal(value),
            ],
        )
    };

    match field.ty() {
        Type::Enum(enumeration) => Ok(set_attribute(&format!(
            "{}_to_python(c_struct.{})",
            enumeration.name(),
            field.name()
        ))),
        Type::Struct(struct_decl) => Ok(set_attribute(&format!(
            "{}_to_python(c_struct.{})",
            struct_decl.name(),
            field.name()
        ))),
        Type::Primitive(primitive) => {
            let wrapper = match primitive {
                Primitive::Boolean => "with_pybool",
                Primitive::String => "with_string_as_pystring",
                Primitive::Float | Primitive::Double => "with_double_as_pyfloat",
                Primitive::Int8
                | Primitive::UInt8
                | Primitive::Int16
                | Primitive::UInt16
                | Primitive::Int32
                | Primitive::UInt32
                | Primitive::Int64
                | Primitive::UInt64 => "with_int64_as_pylong",
            };
            Ok(MacroCall::new(
                wrapper,
                vec![
                    MacroArg::literal(format!("c_struct.{}", field.name())),
                    MacroArg::literal("value"),
                    MacroArg::call(set_attribute("value")),
                ],
            ))
        }
        Type::List(list) => Ok(element_list_to_python(field, list.element_type())),
        Type::Array(array) => Ok(element_list_to_python(field, array.element_type())),
        Type::Set(_) | Type::Map(_) => Err(CodegenError::UnsupportedType {
            type_name: field.ty().name().to_string(),
        }),
    }
}

fn element_list_to_python(field: &Field, element_type: &Type) -> MacroCall {
    MacroCall::new(
        "with_array_as_pylist",
        vec![
            MacroArg::literal(format!("c_struct.{}", field.name())),
            MacroArg::literal(format!("{}_to_python", element_type.name())),
            MacroArg::call(MacroCall::new(
                "set_python_attribute_and_decref",
                vec![
                    MacroArg::literal("result"),
                    MacroArg::literal(quote(field.name())),
                    MacroArg::literal("pylist"),
                ],
            )),
        ],
    )
}

#[cfg(test)]
#[path = "conversion/conversion_tests.rs"]
mod conversion_tests;
