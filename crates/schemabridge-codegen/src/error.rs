//! Error types for code generation

use thiserror::Error;

/// Result type alias for generator operations
pub type CodegenResult<T> = Result<T, CodegenError>;

/// Error type for generation failures
///
/// Generation errors are unrecoverable for the run: no partial output is
/// produced, and the schema input must be fixed before retrying.
#[derive(Error, Debug)]
pub enum CodegenError {
    /// Output was requested while a block was still open
    #[error("generated output requested at indentation level {level}")]
    UnbalancedIndentation { level: usize },

    /// Type has no native representation
    #[error("type {type_name} has no C representation")]
    UnsupportedType { type_name: String },

    /// List without a maximum length reached the native mapper
    #[error("list of {element} has no maximum length; arbitrary length C lists are not supported")]
    UnboundedList { element: String },

    /// A nested error annotated with the struct field it occurred in
    #[error("field {struct_name}.{field}: {source}")]
    FieldContext {
        struct_name: String,
        field: String,
        #[source]
        source: Box<CodegenError>,
    },
}

impl CodegenError {
    /// Annotate an error with the struct field being generated, so schema
    /// authors can locate the defect without reading generator internals.
    pub fn for_field(struct_name: &str, field: &str, source: CodegenError) -> Self {
        CodegenError::FieldContext {
            struct_name: struct_name.to_string(),
            field: field.to_string(),
            source: Box::new(source),
        }
    }
}

#[cfg(test)]
#[path = "error/error_tests.rs"]
mod error_tests;
