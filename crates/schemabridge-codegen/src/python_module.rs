//! Python module generation
//!
//! Emits the dynamic counterpart of a module: one `Enum` subclass per
//! enumeration and one `@dataclass` per struct, with defaulted fields. The
//! conversion functions load these classes by name at runtime.
//!
//! Aggregate types already written are referenced bare; declared-but-later
//! ones are quoted, which is the Python spelling for a forward annotation.

use std::collections::HashSet;

use schemabridge_model::{Enumeration, Module, Primitive, Struct, Type};
use tracing::debug;

use crate::error::CodegenResult;
use crate::writer::{CodeWriter, WriterMode};

/// Generates the Python protocol module for one schema module.
pub struct PythonModuleGenerator<'m> {
    module: &'m Module,
    out: CodeWriter,
    complex_types_written: HashSet<String>,
}

impl<'m> PythonModuleGenerator<'m> {
    pub fn new(module: &'m Module) -> Self {
        PythonModuleGenerator {
            module,
            out: CodeWriter::new(WriterMode::Python),
            complex_types_written: HashSet::new(),
        }
    }

    /// Emit every enum and struct of the module, enums first.
    pub fn run(&mut self) -> CodegenResult<()> {
        let module = self.module;
        for enumeration in module.enums() {
            debug!(declaration = enumeration.name(), "emitting Python enum");
            self.write_enum(enumeration)?;
            self.complex_types_written
                .insert(enumeration.name().to_string());
        }
        for struct_decl in module.structs() {
            debug!(declaration = struct_decl.name(), "emitting Python dataclass");
            self.write_struct(struct_decl)?;
            self.complex_types_written
                .insert(struct_decl.name().to_string());
        }
        Ok(())
    }

    /// The generated Python source. Valid once `run` has completed.
    pub fn result(self) -> CodegenResult<String> {
        self.out.result()
    }

    fn write_enum(&mut self, enumeration: &Enumeration) -> CodegenResult<()> {
        self.out
            .write(&format!("class {}(Enum):", enumeration.name()));
        self.out.block(
            |out| {
                let mut ordinal = enumeration.first_ordinal();
                for value in enumeration.values() {
                    out.writeln(&format!("{value} = {ordinal}"));
                    ordinal += 1;
                }
                Ok(())
            },
            "",
        )?;
        self.out.writeln("");
        Ok(())
    }

    fn write_struct(&mut self, struct_decl: &Struct) -> CodegenResult<()> {
        self.out.writeln("@dataclass");
        self.out.write(&format!("class {}:", struct_decl.name()));
        let written = &self.complex_types_written;
        self.out.block(
            |out| {
                for field in struct_decl.fields() {
                    out.writeln(&format!(
                        "{}: {} = {}",
                        field.name(),
                        python_type_for(written, field.ty()),
                        default_value_for(field.ty())
                    ));
                }
                Ok(())
            },
            "",
        )?;
        self.out.writeln("");
        Ok(())
    }
}

fn python_type_for(written: &HashSet<String>, ty: &Type) -> String {
    match ty {
        Type::Primitive(primitive) => match primitive {
            Primitive::Boolean => "bool".to_string(),
            Primitive::Float | Primitive::Double => "float".to_string(),
            Primitive::String => "str".to_string(),
            Primitive::Int8
            | Primitive::UInt8
            | Primitive::Int16
            | Primitive::UInt16
            | Primitive::Int32
            | Primitive::UInt32
            | Primitive::Int64
            | Primitive::UInt64 => "int".to_string(),
        },
        Type::List(list) => format!("list[{}]", python_type_for(written, list.element_type())),
        Type::Array(array) => format!("list[{}]", python_type_for(written, array.element_type())),
        Type::Set(set) => format!("set[{}]", python_type_for(written, set.element_type())),
        Type::Map(map) => format!(
            "dict[{}, {}]",
            python_type_for(written, map.key_type()),
            python_type_for(written, map.value_type())
        ),
        Type::Enum(enumeration) => reference(written, enumeration.name()),
        Type::Struct(struct_decl) => reference(written, struct_decl.name()),
    }
}

fn reference(written: &HashSet<String>, name: &str) -> String {
    if written.contains(name) {
        name.to_string()
    } else {
        format!("'{name}'")
    }
}

fn default_value_for(ty: &Type) -> &'static str {
    match ty {
        Type::Primitive(Primitive::Boolean) => "False",
        Type::Primitive(Primitive::Float | Primitive::Double) => "0.0",
        Type::Primitive(primitive) if primitive.is_integer() => "0",
        _ => "None",
    }
}
