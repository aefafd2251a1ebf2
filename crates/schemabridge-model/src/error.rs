//! Error types for schema model construction

use thiserror::Error;

/// Result type alias for model construction
pub type ModelResult<T> = Result<T, ModelError>;

/// Error type for schema construction failures
///
/// All variants are fatal: a schema that fails to construct cannot be
/// generated from, and the caller must fix the input.
#[derive(Error, Debug)]
pub enum ModelError {
    /// Enumeration declared without any values
    #[error("enumeration {name} has no values")]
    EmptyEnumeration { name: String },

    /// Enumeration declares the same value name twice
    #[error("enumeration {name} declares duplicate value {value}")]
    DuplicateEnumerationValue { name: String, value: String },

    /// Struct declared without any fields
    #[error("struct {name} has no fields")]
    EmptyStruct { name: String },

    /// Field comment contains no non-blank line
    #[error("comment of field {field} has no non-blank line")]
    EmptyFieldComment { field: String },

    /// Bounded collection length references a non-integer constant
    #[error("length constant {constant} of a bounded collection is not an integer (found {value_type})")]
    NonIntegerBound { constant: String, value_type: String },

    /// Two module declarations share one name
    #[error("module {module} declares {name} more than once")]
    DuplicateDeclaration { module: String, name: String },

    /// Field references a struct or enumeration the module does not declare
    #[error("field {field} of struct {struct_name} references undeclared type {type_name} in module {module}")]
    UnresolvedReference {
        module: String,
        struct_name: String,
        field: String,
        type_name: String,
    },

    /// Field references a length constant the module does not declare
    #[error("field {field} of struct {struct_name} references undeclared length constant {constant} in module {module}")]
    UnresolvedConstant {
        module: String,
        struct_name: String,
        field: String,
        constant: String,
    },
}

#[cfg(test)]
#[path = "error/error_tests.rs"]
mod error_tests;
