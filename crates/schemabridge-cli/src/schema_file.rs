//! Schema description parsing and validation
//!
//! A schema.toml file describes one module:
//!
//! ```toml
//! [module]
//! name = "tiny"
//!
//! [[constants]]
//! name = "MAX_POINTS"
//! integer = 16
//!
//! [[enums]]
//! name = "Color"
//! values = ["Red", "Green", "Blue"]
//!
//! [[structs]]
//! name = "Car"
//!
//! [[structs.fields]]
//! name = "color"
//! type = "Color"
//!
//! [[structs.fields]]
//! name = "points"
//! list = "UInt16"
//! maximum_length = "MAX_POINTS"
//! ```
//!
//! A field carries exactly one of `type`, `list`, or `array`. Type names
//! are the primitive names (`Boolean`, `Int8`..`UInt64`, `Float`, `Double`,
//! `String`) or the name of an enum or struct declared earlier in the file.

use std::collections::HashMap;
use std::path::Path;
use std::rc::Rc;

use anyhow::{Context, Result};
use schemabridge_model::{
    Array, Constant, ConstantValue, Enumeration, Field, List, Module, ModuleItem, Primitive,
    Struct, Type,
};
use serde::Deserialize;

/// schema.toml file structure
#[derive(Debug, Clone, Deserialize)]
pub struct SchemaFile {
    pub module: ModuleSection,

    #[serde(default)]
    pub constants: Vec<ConstantSection>,

    #[serde(default)]
    pub enums: Vec<EnumSection>,

    #[serde(default)]
    pub structs: Vec<StructSection>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ModuleSection {
    pub name: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ConstantSection {
    pub name: String,

    #[serde(default)]
    pub integer: Option<i64>,

    #[serde(default)]
    pub float: Option<f64>,

    #[serde(default)]
    pub boolean: Option<bool>,

    #[serde(default)]
    pub string: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct EnumSection {
    pub name: String,
    pub values: Vec<String>,

    #[serde(default)]
    pub first_ordinal: Option<i64>,

    #[serde(default)]
    pub typedef: bool,

    #[serde(default)]
    pub typedef_postfix: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct StructSection {
    pub name: String,
    pub fields: Vec<FieldSection>,

    #[serde(default)]
    pub typedef: bool,

    #[serde(default)]
    pub typedef_postfix: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct FieldSection {
    pub name: String,

    #[serde(rename = "type", default)]
    pub ty: Option<String>,

    #[serde(default)]
    pub list: Option<String>,

    #[serde(default)]
    pub array: Option<String>,

    #[serde(default)]
    pub maximum_length: Option<String>,

    #[serde(default)]
    pub length: Option<String>,

    #[serde(default)]
    pub comment: Option<String>,
}

impl SchemaFile {
    /// Load a schema description from a file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())
            .with_context(|| format!("Failed to read schema: {:?}", path.as_ref()))?;

        Self::from_str(&content)
    }

    /// Parse a schema description from a string
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(content: &str) -> Result<Self> {
        toml::from_str(content).context("Failed to parse schema")
    }

    /// Convert the description into a validated module
    pub fn into_module(self) -> Result<Module> {
        let mut items = Vec::new();
        let mut constants = HashMap::new();
        let mut declared = HashMap::new();

        for section in self.constants {
            let constant = Rc::new(section.into_constant()?);
            constants.insert(constant.name().to_string(), Rc::clone(&constant));
            items.push(ModuleItem::from(constant));
        }

        for section in self.enums {
            let mut enumeration = Enumeration::new(&section.name, section.values)?;
            if let Some(first_ordinal) = section.first_ordinal {
                enumeration = enumeration.with_first_ordinal(first_ordinal);
            }
            if section.typedef {
                enumeration = enumeration.as_typedef();
            }
            if let Some(postfix) = section.typedef_postfix {
                enumeration = enumeration.with_typedef_postfix(Some(postfix));
            }
            let enumeration = Rc::new(enumeration);
            declared.insert(
                enumeration.name().to_string(),
                Type::Enum(Rc::clone(&enumeration)),
            );
            items.push(ModuleItem::from(enumeration));
        }

        for section in self.structs {
            let mut fields = Vec::with_capacity(section.fields.len());
            for field in &section.fields {
                fields.push(build_field(&section.name, field, &declared, &constants)?);
            }
            let mut struct_decl = Struct::new(&section.name, fields)?;
            if section.typedef {
                struct_decl = struct_decl.as_typedef();
            }
            if let Some(postfix) = section.typedef_postfix {
                struct_decl = struct_decl.with_typedef_postfix(Some(postfix));
            }
            let struct_decl = Rc::new(struct_decl);
            declared.insert(
                struct_decl.name().to_string(),
                Type::Struct(Rc::clone(&struct_decl)),
            );
            items.push(ModuleItem::from(struct_decl));
        }

        Ok(Module::new(self.module.name, items)?)
    }
}

impl ConstantSection {
    fn into_constant(self) -> Result<Constant> {
        let value = match (self.integer, self.float, self.boolean, self.string) {
            (Some(integer), None, None, None) => ConstantValue::Integer(integer),
            (None, Some(float), None, None) => ConstantValue::Float(float),
            (None, None, Some(boolean), None) => ConstantValue::Boolean(boolean),
            (None, None, None, Some(string)) => ConstantValue::Str(string),
            _ => anyhow::bail!(
                "constant '{}' must carry exactly one of integer, float, boolean, string",
                self.name
            ),
        };
        Ok(Constant::new(self.name, value))
    }
}

fn build_field(
    struct_name: &str,
    section: &FieldSection,
    declared: &HashMap<String, Type>,
    constants: &HashMap<String, Rc<Constant>>,
) -> Result<Field> {
    let ty = match (&section.ty, &section.list, &section.array) {
        (Some(name), None, None) => resolve_type(struct_name, &section.name, name, declared)?,
        (None, Some(element), None) => {
            let element_type = resolve_type(struct_name, &section.name, element, declared)?;
            match &section.maximum_length {
                Some(bound) => {
                    let bound = lookup_constant(struct_name, &section.name, bound, constants)?;
                    Type::List(Rc::new(List::bounded(element_type, bound)?))
                }
                None => Type::List(Rc::new(List::unbounded(element_type))),
            }
        }
        (None, None, Some(element)) => {
            let element_type = resolve_type(struct_name, &section.name, element, declared)?;
            let length = section.length.as_ref().with_context(|| {
                format!(
                    "array field '{}.{}' requires a length constant",
                    struct_name, section.name
                )
            })?;
            let length = lookup_constant(struct_name, &section.name, length, constants)?;
            Type::Array(Rc::new(Array::new(element_type, length)?))
        }
        _ => anyhow::bail!(
            "field '{}.{}' must carry exactly one of type, list, array",
            struct_name,
            section.name
        ),
    };

    match &section.comment {
        Some(comment) => Ok(Field::with_comment(&section.name, ty, comment)?),
        None => Ok(Field::new(&section.name, ty)),
    }
}

fn resolve_type(
    struct_name: &str,
    field: &str,
    name: &str,
    declared: &HashMap<String, Type>,
) -> Result<Type> {
    if let Some(primitive) = primitive_named(name) {
        return Ok(Type::Primitive(primitive));
    }
    declared.get(name).cloned().with_context(|| {
        format!(
            "field '{struct_name}.{field}' references unknown type '{name}' \
             (enums and structs must be declared before use)"
        )
    })
}

fn lookup_constant(
    struct_name: &str,
    field: &str,
    name: &str,
    constants: &HashMap<String, Rc<Constant>>,
) -> Result<Rc<Constant>> {
    constants.get(name).cloned().with_context(|| {
        format!("field '{struct_name}.{field}' references unknown constant '{name}'")
    })
}

fn primitive_named(name: &str) -> Option<Primitive> {
    match name {
        "Boolean" => Some(Primitive::Boolean),
        "Int8" => Some(Primitive::Int8),
        "UInt8" => Some(Primitive::UInt8),
        "Int16" => Some(Primitive::Int16),
        "UInt16" => Some(Primitive::UInt16),
        "Int32" => Some(Primitive::Int32),
        "UInt32" => Some(Primitive::UInt32),
        "Int64" => Some(Primitive::Int64),
        "UInt64" => Some(Primitive::UInt64),
        "Float" => Some(Primitive::Float),
        "Double" => Some(Primitive::Double),
        "String" => Some(Primitive::String),
        _ => None,
    }
}

/// Validate a schema file and report what it declares
pub fn check(schema: &str) -> Result<()> {
    let module = SchemaFile::from_file(schema)?.into_module()?;

    println!(
        "Schema OK: module '{}' with {} constant(s), {} enum(s), {} struct(s)",
        module.name(),
        module.constants().len(),
        module.enums().len(),
        module.structs().len()
    );

    Ok(())
}

#[cfg(test)]
mod tests {
    #![allow(non_snake_case)]

    use super::*;

    const TINY: &str = r#"
        [module]
        name = "tiny"

        [[constants]]
        name = "MAX_POINTS"
        integer = 16

        [[enums]]
        name = "Color"
        values = ["Red", "Green", "Blue"]

        [[structs]]
        name = "Car"

        [[structs.fields]]
        name = "color"
        type = "Color"

        [[structs.fields]]
        name = "x"
        type = "UInt16"
        comment = "position in mm"

        [[structs.fields]]
        name = "points"
        list = "UInt16"
        maximum_length = "MAX_POINTS"
    "#;

    #[test]
    fn SchemaFile___tiny_schema___builds_a_module() {
        let module = SchemaFile::from_str(TINY).unwrap().into_module().unwrap();

        assert_eq!(module.name(), "tiny");
        assert_eq!(module.constants().len(), 1);
        assert_eq!(module.enums().len(), 1);
        assert_eq!(module.structs().len(), 1);
        let car = module.struct_named("Car").unwrap();
        assert_eq!(car.fields().len(), 3);
        assert_eq!(car.fields()[1].comment(), Some("position in mm"));
    }

    #[test]
    fn SchemaFile___unknown_field_type___fails_naming_the_field() {
        let schema = r#"
            [module]
            name = "tiny"

            [[structs]]
            name = "Car"

            [[structs.fields]]
            name = "color"
            type = "Colour"
        "#;

        let err = SchemaFile::from_str(schema)
            .unwrap()
            .into_module()
            .unwrap_err();

        let message = err.to_string();
        assert!(message.contains("Car.color"));
        assert!(message.contains("Colour"));
    }

    #[test]
    fn SchemaFile___list_with_unknown_bound___fails() {
        let schema = r#"
            [module]
            name = "tiny"

            [[structs]]
            name = "Path"

            [[structs.fields]]
            name = "points"
            list = "UInt16"
            maximum_length = "MAX_POINTS"
        "#;

        let err = SchemaFile::from_str(schema)
            .unwrap()
            .into_module()
            .unwrap_err();

        assert!(err.to_string().contains("MAX_POINTS"));
    }

    #[test]
    fn SchemaFile___constant_with_two_values___fails() {
        let schema = r#"
            [module]
            name = "tiny"

            [[constants]]
            name = "MAX"
            integer = 1
            float = 2.0
        "#;

        let err = SchemaFile::from_str(schema)
            .unwrap()
            .into_module()
            .unwrap_err();

        assert!(err.to_string().contains("exactly one"));
    }

    #[test]
    fn SchemaFile___field_with_type_and_list___fails() {
        let schema = r#"
            [module]
            name = "tiny"

            [[structs]]
            name = "Car"

            [[structs.fields]]
            name = "x"
            type = "UInt16"
            list = "UInt16"
        "#;

        let err = SchemaFile::from_str(schema)
            .unwrap()
            .into_module()
            .unwrap_err();

        assert!(err.to_string().contains("exactly one of type, list, array"));
    }
}
