//! Schema declarations: enumerations, structs, fields, constants
//!
//! Constructors validate the invariants the generators rely on, so a value
//! of any of these types is always well formed: enums and structs are
//! non-empty, field comments contain at least one non-blank line, and a
//! constant knows the primitive type of its value.

use crate::error::{ModelError, ModelResult};
use crate::types::{Primitive, Type};

/// The value carried by a [`Constant`].
#[derive(Debug, Clone, PartialEq)]
pub enum ConstantValue {
    Integer(i64),
    Boolean(bool),
    Float(f64),
    Str(String),
}

impl ConstantValue {
    /// The primitive type inferred from the value kind.
    pub fn primitive(&self) -> Primitive {
        match self {
            ConstantValue::Integer(_) => Primitive::Int64,
            ConstantValue::Boolean(_) => Primitive::Boolean,
            ConstantValue::Float(_) => Primitive::Double,
            ConstantValue::Str(_) => Primitive::String,
        }
    }

    pub fn is_integer(&self) -> bool {
        matches!(self, ConstantValue::Integer(_))
    }
}

/// A named constant. Its type is fixed by the value kind at construction.
#[derive(Debug, Clone, PartialEq)]
pub struct Constant {
    name: String,
    value: ConstantValue,
}

impl Constant {
    pub fn new(name: impl Into<String>, value: ConstantValue) -> Self {
        Constant {
            name: name.into(),
            value,
        }
    }

    /// Shorthand for the integer constants used as collection bounds.
    pub fn integer(name: impl Into<String>, value: i64) -> Self {
        Constant::new(name, ConstantValue::Integer(value))
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn value(&self) -> &ConstantValue {
        &self.value
    }

    pub fn value_type(&self) -> Primitive {
        self.value.primitive()
    }
}

/// A field of a [`Struct`].
#[derive(Debug, Clone)]
pub struct Field {
    name: String,
    ty: Type,
    comment: Option<String>,
}

impl Field {
    pub fn new(name: impl Into<String>, ty: Type) -> Self {
        Field {
            name: name.into(),
            ty,
            comment: None,
        }
    }

    /// A field with a trailing comment. The comment must contain at least
    /// one non-blank line.
    pub fn with_comment(
        name: impl Into<String>,
        ty: Type,
        comment: impl Into<String>,
    ) -> ModelResult<Self> {
        let name = name.into();
        let comment = comment.into();
        if comment.lines().all(|line| line.trim().is_empty()) {
            return Err(ModelError::EmptyFieldComment { field: name });
        }
        Ok(Field {
            name,
            ty,
            comment: Some(comment),
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn ty(&self) -> &Type {
        &self.ty
    }

    pub fn comment(&self) -> Option<&str> {
        self.comment.as_deref()
    }

    /// The trimmed non-blank lines of the comment, in order.
    pub fn comment_lines(&self) -> Vec<&str> {
        self.comment
            .as_deref()
            .map(|comment| {
                comment
                    .lines()
                    .map(str::trim)
                    .filter(|line| !line.is_empty())
                    .collect()
            })
            .unwrap_or_default()
    }
}

/// An enumeration declaration.
#[derive(Debug, Clone)]
pub struct Enumeration {
    name: String,
    values: Vec<String>,
    first_ordinal: i64,
    typedef: bool,
    typedef_postfix: Option<String>,
}

impl Enumeration {
    /// A tagged (`enum <name>`) enumeration with ordinals starting at 1.
    pub fn new(
        name: impl Into<String>,
        values: impl IntoIterator<Item = impl Into<String>>,
    ) -> ModelResult<Self> {
        let name = name.into();
        let values: Vec<String> = values.into_iter().map(Into::into).collect();
        if values.is_empty() {
            return Err(ModelError::EmptyEnumeration { name });
        }
        for (index, value) in values.iter().enumerate() {
            if values[..index].contains(value) {
                return Err(ModelError::DuplicateEnumerationValue {
                    name,
                    value: value.clone(),
                });
            }
        }
        Ok(Enumeration {
            name,
            values,
            first_ordinal: 1,
            typedef: false,
            typedef_postfix: Some("e".to_string()),
        })
    }

    /// Set the ordinal of the first member; the rest increase by one.
    pub fn with_first_ordinal(mut self, first_ordinal: i64) -> Self {
        self.first_ordinal = first_ordinal;
        self
    }

    /// Declare as an anonymous typedef'd enum instead of a tagged one.
    pub fn as_typedef(mut self) -> Self {
        self.typedef = true;
        self
    }

    /// Override the postfix appended to the typedef token. `None` drops it.
    pub fn with_typedef_postfix(mut self, postfix: Option<String>) -> Self {
        self.typedef_postfix = postfix;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn values(&self) -> &[String] {
        &self.values
    }

    pub fn first_ordinal(&self) -> i64 {
        self.first_ordinal
    }

    pub fn is_typedef(&self) -> bool {
        self.typedef
    }

    pub fn typedef_postfix(&self) -> Option<&str> {
        self.typedef_postfix.as_deref()
    }
}

/// A struct declaration.
#[derive(Debug, Clone)]
pub struct Struct {
    name: String,
    fields: Vec<Field>,
    typedef: bool,
    typedef_postfix: Option<String>,
}

impl Struct {
    /// A tagged (`struct <name>`) struct.
    pub fn new(name: impl Into<String>, fields: Vec<Field>) -> ModelResult<Self> {
        let name = name.into();
        if fields.is_empty() {
            return Err(ModelError::EmptyStruct { name });
        }
        Ok(Struct {
            name,
            fields,
            typedef: false,
            typedef_postfix: Some("t".to_string()),
        })
    }

    /// Declare as an anonymous typedef'd struct instead of a tagged one.
    pub fn as_typedef(mut self) -> Self {
        self.typedef = true;
        self
    }

    /// Override the postfix appended to the typedef token. `None` drops it.
    pub fn with_typedef_postfix(mut self, postfix: Option<String>) -> Self {
        self.typedef_postfix = postfix;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn fields(&self) -> &[Field] {
        &self.fields
    }

    pub fn is_typedef(&self) -> bool {
        self.typedef
    }

    pub fn typedef_postfix(&self) -> Option<&str> {
        self.typedef_postfix.as_deref()
    }
}
