//! C header generation
//!
//! Emits, in module order: one `#define` per constant, one declaration per
//! enumeration, one declaration per struct. Order matters: later
//! declarations may reference earlier ones.

use schemabridge_model::{Constant, ConstantValue, Enumeration, Module, Struct, Type};
use tracing::debug;

use crate::ctypes::{c_type_for, typedef_token};
use crate::error::{CodegenError, CodegenResult};
use crate::naming::pascal_to_snake_case;
use crate::style::BraceStyle;
use crate::writer::{CodeWriter, WriterMode};

/// Generates the native declaration header for one module.
pub struct CHeaderGenerator<'m> {
    module: &'m Module,
    style: BraceStyle,
    out: CodeWriter,
}

impl<'m> CHeaderGenerator<'m> {
    pub fn new(module: &'m Module) -> Self {
        Self::with_style(module, BraceStyle::default())
    }

    pub fn with_style(module: &'m Module, style: BraceStyle) -> Self {
        CHeaderGenerator {
            module,
            style,
            out: CodeWriter::new(WriterMode::C),
        }
    }

    /// Emit every declaration of the module into the output buffer.
    pub fn run(&mut self) -> CodegenResult<()> {
        let module = self.module;
        for constant in module.constants() {
            debug!(constant = constant.name(), "emitting constant definition");
            self.write_constant(constant);
        }
        for enumeration in module.enums() {
            debug!(declaration = enumeration.name(), "emitting enum declaration");
            self.write_enum(enumeration)?;
        }
        for struct_decl in module.structs() {
            debug!(declaration = struct_decl.name(), "emitting struct declaration");
            self.write_struct(struct_decl)?;
        }
        Ok(())
    }

    /// The generated header text. Valid once `run` has completed.
    pub fn result(self) -> CodegenResult<String> {
        self.out.result()
    }

    fn write_constant(&mut self, constant: &Constant) {
        self.out.writeln(&format!(
            "#define {} {}",
            constant.name(),
            literal_for_value(constant.value())
        ));
        self.out.writeln("");
    }

    fn write_enum(&mut self, enumeration: &Enumeration) -> CodegenResult<()> {
        if enumeration.is_typedef() {
            self.style.introduce_block(&mut self.out, "typedef enum");
        } else {
            let snake = pascal_to_snake_case(enumeration.name());
            self.style
                .introduce_block(&mut self.out, &format!("enum {snake}"));
        }

        let suffix = if enumeration.is_typedef() {
            format!(
                " {};",
                typedef_token(enumeration.name(), enumeration.typedef_postfix())
            )
        } else {
            ";".to_string()
        };

        self.out.block(
            |out| {
                let mut ordinal = enumeration.first_ordinal();
                let mut first = true;
                for value in enumeration.values() {
                    if !first {
                        out.writeln(",");
                    }
                    out.write(&format!("{value} = {ordinal}"));
                    ordinal += 1;
                    first = false;
                }
                out.writeln("");
                Ok(())
            },
            &suffix,
        )?;
        self.out.writeln("");
        Ok(())
    }

    fn write_struct(&mut self, struct_decl: &Struct) -> CodegenResult<()> {
        if struct_decl.is_typedef() {
            self.style.introduce_block(&mut self.out, "typedef struct");
        } else {
            let snake = pascal_to_snake_case(struct_decl.name());
            self.style
                .introduce_block(&mut self.out, &format!("struct {snake}"));
        }

        let suffix = if struct_decl.is_typedef() {
            format!(
                " {};",
                typedef_token(struct_decl.name(), struct_decl.typedef_postfix())
            )
        } else {
            ";".to_string()
        };

        self.out.block(
            |out| {
                for field in struct_decl.fields() {
                    let c_type = c_type_for(field.ty()).map_err(|err| {
                        CodegenError::for_field(struct_decl.name(), field.name(), err)
                    })?;
                    out.write(&c_type.declaration(field.name()));
                    out.write(";");
                    let comment_lines = field.comment_lines();
                    if comment_lines.is_empty() {
                        out.writeln("");
                    } else {
                        for line in comment_lines {
                            out.writeln(&format!(" /* {line} */"));
                        }
                    }
                    if matches!(field.ty(), Type::List(_)) {
                        out.writeln(&format!("size_t {}_length;", field.name()));
                    }
                }
                Ok(())
            },
            &suffix,
        )?;
        self.out.writeln("");
        Ok(())
    }
}

fn literal_for_value(value: &ConstantValue) -> String {
    match value {
        ConstantValue::Integer(integer) => integer.to_string(),
        ConstantValue::Boolean(boolean) => boolean.to_string(),
        ConstantValue::Float(float) => format!("{float:?}"),
        ConstantValue::Str(text) => quote(text),
    }
}

fn quote(text: &str) -> String {
    format!("\"{}\"", escape(text))
}

fn escape(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '"' => escaped.push_str("\\\""),
            '\\' => escaped.push_str("\\\\"),
            '\n' => escaped.push_str("\\n"),
            '\r' => escaped.push_str("\\r"),
            '\t' => escaped.push_str("\\t"),
            '\x0C' => escaped.push_str("\\f"),
            '\x08' => escaped.push_str("\\b"),
            '\x07' => escaped.push_str("\\a"),
            '\x0B' => escaped.push_str("\\v"),
            other => escaped.push(other),
        }
    }
    escaped
}
