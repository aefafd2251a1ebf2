//! schemabridge-model - The schema type model
//!
//! This crate defines the immutable value graph every schemabridge generator
//! consumes:
//! - [`Type`] closed sum of all type variants
//! - [`Enumeration`], [`Struct`], [`Field`], [`Constant`] declarations
//! - [`Module`] an ordered collection of declarations with name resolution
//! - [`ModelError`] for construction-time validation failures
//!
//! The model is built once, validated during construction, and then read by
//! the generators without further checks. Container variants share their
//! element declarations through [`std::rc::Rc`], so the graph is acyclic by
//! construction: a declaration can only reference declarations that already
//! exist.

mod declarations;
mod error;
mod module;
mod types;

pub use declarations::{Constant, ConstantValue, Enumeration, Field, Struct};
pub use error::{ModelError, ModelResult};
pub use module::{Module, ModuleItem};
pub use types::{Array, List, Map, Primitive, Set, Type};
