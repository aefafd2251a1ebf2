//! Native type mapping
//!
//! Maps a model [`Type`] to its C declaration spelling. Scalars map to a
//! single token sequence; bounded lists and arrays map to a base type plus
//! an array suffix carrying the bound constant's name, so the generated
//! header sizes the backing array with the `#define` emitted alongside it.
//!
//! # Type Mappings
//!
//! | Schema | C |
//! |--------|---|
//! | `Boolean` | `bool` |
//! | `Int8`..`UInt64` | `int8_t`..`uint64_t` |
//! | `Float` / `Double` | `float` / `double` |
//! | `String` | `const char *` |
//! | `Struct` / `Enumeration` | `struct <name>` / `enum <name>`, or the typedef token |
//! | bounded `List`, `Array` | element type + `[<CONSTANT>]` |
//!
//! `Set`, `Map`, and unbounded lists have no native representation and are
//! rejected with a descriptive error.

use std::fmt;

use schemabridge_model::{Enumeration, Primitive, Struct, Type};

use crate::error::{CodegenError, CodegenResult};
use crate::naming::pascal_to_snake_case;

/// The C spelling of a mapped type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CType {
    /// A plain type usable as-is in declarations and signatures.
    Scalar(String),
    /// A fixed-capacity array: base element type plus length token.
    Array { element: String, length: String },
}

impl CType {
    /// Spell a declaration of `name` with this type (without the
    /// terminating semicolon).
    pub fn declaration(&self, name: &str) -> String {
        match self {
            CType::Scalar(spelling) => format!("{spelling} {name}"),
            CType::Array { element, length } => format!("{element} {name}[{length}]"),
        }
    }
}

impl fmt::Display for CType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CType::Scalar(spelling) => write!(f, "{spelling}"),
            CType::Array { element, length } => write!(f, "{element}[{length}]"),
        }
    }
}

/// Map a model type to its C spelling.
pub fn c_type_for(ty: &Type) -> CodegenResult<CType> {
    match ty {
        Type::Primitive(primitive) => Ok(CType::Scalar(primitive_spelling(*primitive).to_string())),
        Type::Enum(enumeration) => Ok(CType::Scalar(c_type_for_enum(enumeration))),
        Type::Struct(struct_decl) => Ok(CType::Scalar(c_type_for_struct(struct_decl))),
        Type::List(list) => match list.maximum_length() {
            Some(bound) => Ok(CType::Array {
                element: scalar_element(list.element_type())?,
                length: bound.name().to_string(),
            }),
            None => Err(CodegenError::UnboundedList {
                element: list.element_type().name().to_string(),
            }),
        },
        Type::Array(array) => Ok(CType::Array {
            element: scalar_element(array.element_type())?,
            length: array.length().name().to_string(),
        }),
        Type::Set(_) | Type::Map(_) => Err(CodegenError::UnsupportedType {
            type_name: ty.name().to_string(),
        }),
    }
}

/// The C spelling of an enumeration: `enum <snake>` when tagged, the
/// postfixed typedef token otherwise.
pub fn c_type_for_enum(enumeration: &Enumeration) -> String {
    aggregate_spelling(
        "enum",
        enumeration.name(),
        enumeration.is_typedef(),
        enumeration.typedef_postfix(),
    )
}

/// The C spelling of a struct: `struct <snake>` when tagged, the postfixed
/// typedef token otherwise.
pub fn c_type_for_struct(struct_decl: &Struct) -> String {
    aggregate_spelling(
        "struct",
        struct_decl.name(),
        struct_decl.is_typedef(),
        struct_decl.typedef_postfix(),
    )
}

/// The postfixed typedef token of a declaration (`color_e`, `car_t`).
pub(crate) fn typedef_token(name: &str, postfix: Option<&str>) -> String {
    let snake = pascal_to_snake_case(name);
    match postfix {
        Some(postfix) if !postfix.is_empty() => format!("{snake}_{postfix}"),
        _ => snake,
    }
}

fn aggregate_spelling(keyword: &str, name: &str, typedef: bool, postfix: Option<&str>) -> String {
    if typedef {
        typedef_token(name, postfix)
    } else {
        format!("{keyword} {}", pascal_to_snake_case(name))
    }
}

fn scalar_element(element_type: &Type) -> CodegenResult<String> {
    match c_type_for(element_type)? {
        CType::Scalar(spelling) => Ok(spelling),
        CType::Array { .. } => Err(CodegenError::UnsupportedType {
            type_name: format!("collection of {}", element_type.name()),
        }),
    }
}

fn primitive_spelling(primitive: Primitive) -> &'static str {
    match primitive {
        Primitive::Boolean => "bool",
        Primitive::Int8 => "int8_t",
        Primitive::UInt8 => "uint8_t",
        Primitive::Int16 => "int16_t",
        Primitive::UInt16 => "uint16_t",
        Primitive::Int32 => "int32_t",
        Primitive::UInt32 => "uint32_t",
        Primitive::Int64 => "int64_t",
        Primitive::UInt64 => "uint64_t",
        Primitive::Float => "float",
        Primitive::Double => "double",
        Primitive::String => "const char *",
    }
}
