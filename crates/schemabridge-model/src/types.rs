//! The closed set of type variants
//!
//! Every type a field can carry is one variant of [`Type`]. Generators
//! dispatch with exhaustive matches, so an unhandled variant is a compile
//! error rather than a runtime surprise. The two deliberate exceptions are
//! [`Set`] and [`Map`], which the dynamic emitter supports but the native
//! path rejects with a descriptive error.

use std::rc::Rc;

use crate::declarations::{Constant, Enumeration, Struct};
use crate::error::{ModelError, ModelResult};

/// The fixed set of primitive types.
///
/// A fieldless `Copy` enum: two primitives of the same kind are always the
/// same value, which gives the "one singleton per kind, compared by
/// identity" contract for free.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Primitive {
    Boolean,
    Int8,
    UInt8,
    Int16,
    UInt16,
    Int32,
    UInt32,
    Int64,
    UInt64,
    Float,
    Double,
    String,
}

impl Primitive {
    /// The schema-level name of this primitive (e.g. `UInt16`).
    pub fn name(self) -> &'static str {
        match self {
            Primitive::Boolean => "Boolean",
            Primitive::Int8 => "Int8",
            Primitive::UInt8 => "UInt8",
            Primitive::Int16 => "Int16",
            Primitive::UInt16 => "UInt16",
            Primitive::Int32 => "Int32",
            Primitive::UInt32 => "UInt32",
            Primitive::Int64 => "Int64",
            Primitive::UInt64 => "UInt64",
            Primitive::Float => "Float",
            Primitive::Double => "Double",
            Primitive::String => "String",
        }
    }

    /// Whether the numeric-narrowing conversion path applies to this kind.
    pub fn is_integer(self) -> bool {
        matches!(
            self,
            Primitive::Int8
                | Primitive::UInt8
                | Primitive::Int16
                | Primitive::UInt16
                | Primitive::Int32
                | Primitive::UInt32
                | Primitive::Int64
                | Primitive::UInt64
        )
    }
}

/// A type as referenced by a field or a container argument.
///
/// Aggregate and container variants hold their declarations behind `Rc`, so
/// a module and every field referencing one of its declarations share a
/// single value.
#[derive(Debug, Clone)]
pub enum Type {
    Primitive(Primitive),
    Enum(Rc<Enumeration>),
    Struct(Rc<Struct>),
    List(Rc<List>),
    Array(Rc<Array>),
    Set(Rc<Set>),
    Map(Rc<Map>),
}

impl Type {
    /// The name of this type: the primitive or declaration name, or the
    /// container kind for container variants.
    pub fn name(&self) -> &str {
        match self {
            Type::Primitive(primitive) => primitive.name(),
            Type::Enum(enumeration) => enumeration.name(),
            Type::Struct(struct_type) => struct_type.name(),
            Type::List(_) => "List",
            Type::Array(_) => "Array",
            Type::Set(_) => "Set",
            Type::Map(_) => "Map",
        }
    }

    /// The element/key/value types of container variants, empty otherwise.
    pub fn type_arguments(&self) -> Vec<&Type> {
        match self {
            Type::Primitive(_) | Type::Enum(_) | Type::Struct(_) => Vec::new(),
            Type::List(list) => vec![list.element_type()],
            Type::Array(array) => vec![array.element_type()],
            Type::Set(set) => vec![set.element_type()],
            Type::Map(map) => vec![map.key_type(), map.value_type()],
        }
    }
}

/// A sequence whose length varies at runtime up to a schema-defined bound.
///
/// A bounded list is backed by a fixed-capacity native array sized by its
/// `maximum_length` constant, together with a companion length counter
/// emitted next to the field. An unbounded list is representable in the
/// model but has no native declaration.
#[derive(Debug)]
pub struct List {
    element_type: Type,
    maximum_length: Option<Rc<Constant>>,
}

impl List {
    /// A list without a capacity bound. Supported by the dynamic emitter
    /// only; the native mapper rejects it.
    pub fn unbounded(element_type: Type) -> Self {
        List {
            element_type,
            maximum_length: None,
        }
    }

    /// A list bounded by an integer constant.
    pub fn bounded(element_type: Type, maximum_length: Rc<Constant>) -> ModelResult<Self> {
        require_integer_bound(&maximum_length)?;
        Ok(List {
            element_type,
            maximum_length: Some(maximum_length),
        })
    }

    pub fn element_type(&self) -> &Type {
        &self.element_type
    }

    pub fn maximum_length(&self) -> Option<&Rc<Constant>> {
        self.maximum_length.as_ref()
    }
}

/// A sequence whose length is fixed and always fully populated.
#[derive(Debug)]
pub struct Array {
    element_type: Type,
    length: Rc<Constant>,
}

impl Array {
    pub fn new(element_type: Type, length: Rc<Constant>) -> ModelResult<Self> {
        require_integer_bound(&length)?;
        Ok(Array {
            element_type,
            length,
        })
    }

    pub fn element_type(&self) -> &Type {
        &self.element_type
    }

    pub fn length(&self) -> &Rc<Constant> {
        &self.length
    }
}

/// An unordered collection of distinct elements.
#[derive(Debug)]
pub struct Set {
    element_type: Type,
}

impl Set {
    pub fn new(element_type: Type) -> Self {
        Set { element_type }
    }

    pub fn element_type(&self) -> &Type {
        &self.element_type
    }
}

/// A key/value mapping.
#[derive(Debug)]
pub struct Map {
    key_type: Type,
    value_type: Type,
}

impl Map {
    pub fn new(key_type: Type, value_type: Type) -> Self {
        Map {
            key_type,
            value_type,
        }
    }

    pub fn key_type(&self) -> &Type {
        &self.key_type
    }

    pub fn value_type(&self) -> &Type {
        &self.value_type
    }
}

fn require_integer_bound(bound: &Constant) -> ModelResult<()> {
    if bound.value().is_integer() {
        Ok(())
    } else {
        Err(ModelError::NonIntegerBound {
            constant: bound.name().to_string(),
            value_type: bound.value_type().name().to_string(),
        })
    }
}

#[cfg(test)]
#[path = "types/types_tests.rs"]
mod types_tests;
