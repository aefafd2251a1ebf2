//! Modules: ordered collections of declarations with name resolution
//!
//! A module is built from a single heterogeneous item sequence. Declaration
//! order is preserved because it is significant: later declarations may
//! reference earlier ones by name, and the generators emit in module order.
//!
//! Construction resolves every reference up front. A field whose struct or
//! enumeration type is not declared in the module, or whose collection
//! bound constant is not declared in the module, is a hard error; the
//! generators can therefore assume a fully resolvable graph.

use std::collections::HashMap;
use std::collections::HashSet;
use std::rc::Rc;

use crate::declarations::{Constant, Enumeration, Struct};
use crate::error::{ModelError, ModelResult};
use crate::types::Type;

/// One declaration handed to [`Module::new`].
///
/// The item kinds a module accepts form a closed set; anything else is
/// unrepresentable rather than a runtime rejection.
#[derive(Debug, Clone)]
pub enum ModuleItem {
    Constant(Rc<Constant>),
    Enumeration(Rc<Enumeration>),
    Struct(Rc<Struct>),
}

impl From<Rc<Constant>> for ModuleItem {
    fn from(constant: Rc<Constant>) -> Self {
        ModuleItem::Constant(constant)
    }
}

impl From<Rc<Enumeration>> for ModuleItem {
    fn from(enumeration: Rc<Enumeration>) -> Self {
        ModuleItem::Enumeration(enumeration)
    }
}

impl From<Rc<Struct>> for ModuleItem {
    fn from(struct_decl: Rc<Struct>) -> Self {
        ModuleItem::Struct(struct_decl)
    }
}

/// A named schema module.
#[derive(Debug)]
pub struct Module {
    name: String,
    constants: Vec<Rc<Constant>>,
    enums: Vec<Rc<Enumeration>>,
    structs: Vec<Rc<Struct>>,
    constant_for_name: HashMap<String, Rc<Constant>>,
    enum_for_name: HashMap<String, Rc<Enumeration>>,
    struct_for_name: HashMap<String, Rc<Struct>>,
}

impl Module {
    /// Build a module from a heterogeneous declaration sequence.
    ///
    /// Fails on duplicate declaration names and on any field reference that
    /// does not resolve within the module.
    pub fn new(
        name: impl Into<String>,
        items: impl IntoIterator<Item = ModuleItem>,
    ) -> ModelResult<Self> {
        let name = name.into();
        let mut module = Module {
            name,
            constants: Vec::new(),
            enums: Vec::new(),
            structs: Vec::new(),
            constant_for_name: HashMap::new(),
            enum_for_name: HashMap::new(),
            struct_for_name: HashMap::new(),
        };

        let mut declared_names = HashSet::new();
        for item in items {
            let declared = match &item {
                ModuleItem::Constant(constant) => constant.name().to_string(),
                ModuleItem::Enumeration(enumeration) => enumeration.name().to_string(),
                ModuleItem::Struct(struct_decl) => struct_decl.name().to_string(),
            };
            if !declared_names.insert(declared.clone()) {
                return Err(ModelError::DuplicateDeclaration {
                    module: module.name,
                    name: declared,
                });
            }
            match item {
                ModuleItem::Constant(constant) => {
                    module
                        .constant_for_name
                        .insert(declared, Rc::clone(&constant));
                    module.constants.push(constant);
                }
                ModuleItem::Enumeration(enumeration) => {
                    module
                        .enum_for_name
                        .insert(declared, Rc::clone(&enumeration));
                    module.enums.push(enumeration);
                }
                ModuleItem::Struct(struct_decl) => {
                    module
                        .struct_for_name
                        .insert(declared, Rc::clone(&struct_decl));
                    module.structs.push(struct_decl);
                }
            }
        }

        module.resolve_references()?;
        Ok(module)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn constants(&self) -> &[Rc<Constant>] {
        &self.constants
    }

    pub fn enums(&self) -> &[Rc<Enumeration>] {
        &self.enums
    }

    pub fn structs(&self) -> &[Rc<Struct>] {
        &self.structs
    }

    pub fn constant_named(&self, name: &str) -> Option<&Rc<Constant>> {
        self.constant_for_name.get(name)
    }

    pub fn enum_named(&self, name: &str) -> Option<&Rc<Enumeration>> {
        self.enum_for_name.get(name)
    }

    pub fn struct_named(&self, name: &str) -> Option<&Rc<Struct>> {
        self.struct_for_name.get(name)
    }

    fn resolve_references(&self) -> ModelResult<()> {
        for struct_decl in &self.structs {
            for field in struct_decl.fields() {
                self.resolve_field_type(struct_decl.name(), field.name(), field.ty())?;
            }
        }
        Ok(())
    }

    fn resolve_field_type(&self, struct_name: &str, field: &str, ty: &Type) -> ModelResult<()> {
        match ty {
            Type::Primitive(_) => Ok(()),
            Type::Enum(enumeration) => {
                self.require_declared(struct_name, field, enumeration.name())
            }
            Type::Struct(referenced) => self.require_declared(struct_name, field, referenced.name()),
            Type::List(list) => {
                if let Some(bound) = list.maximum_length() {
                    self.require_constant(struct_name, field, bound.name())?;
                }
                self.resolve_field_type(struct_name, field, list.element_type())
            }
            Type::Array(array) => {
                self.require_constant(struct_name, field, array.length().name())?;
                self.resolve_field_type(struct_name, field, array.element_type())
            }
            Type::Set(set) => self.resolve_field_type(struct_name, field, set.element_type()),
            Type::Map(map) => {
                self.resolve_field_type(struct_name, field, map.key_type())?;
                self.resolve_field_type(struct_name, field, map.value_type())
            }
        }
    }

    fn require_declared(&self, struct_name: &str, field: &str, type_name: &str) -> ModelResult<()> {
        if self.enum_for_name.contains_key(type_name) || self.struct_for_name.contains_key(type_name)
        {
            Ok(())
        } else {
            Err(ModelError::UnresolvedReference {
                module: self.name.clone(),
                struct_name: struct_name.to_string(),
                field: field.to_string(),
                type_name: type_name.to_string(),
            })
        }
    }

    fn require_constant(&self, struct_name: &str, field: &str, constant: &str) -> ModelResult<()> {
        if self.constant_for_name.contains_key(constant) {
            Ok(())
        } else {
            Err(ModelError::UnresolvedConstant {
                module: self.name.clone(),
                struct_name: struct_name.to_string(),
                field: field.to_string(),
                constant: constant.to_string(),
            })
        }
    }
}

#[cfg(test)]
#[path = "module/module_tests.rs"]
mod module_tests;
