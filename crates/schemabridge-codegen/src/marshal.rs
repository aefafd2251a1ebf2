//! Marshalling trees: the intermediate form of one field's conversion
//!
//! A [`MacroCall`] is a named operation with ordered arguments; each
//! argument is a literal source fragment, a nested operation, or a deferred
//! body callback that writes through the emitter when rendered. The
//! conversion generator lowers every struct field into such a tree and
//! renders it as a correctly nested multi-line macro invocation.
//!
//! Rendering saves the indentation level of the call's opening line and
//! restores it afterwards, so each argument line of a nested call aligns
//! under its own call rather than drifting with the surrounding text. That
//! save/restore discipline is what keeps trees three or more levels deep
//! readable.
//!
//! The `with_*` builders cover the operation families the generated support
//! header provides: attribute extraction, numeric narrowing, boolean and
//! string passthrough, and bounded collection iteration.

use schemabridge_model::{Array, List};

use crate::ctypes::{CType, c_type_for};
use crate::error::{CodegenError, CodegenResult};
use crate::writer::CodeWriter;

/// A deferred body: renders by writing through the emitter at the
/// indentation level current at render time.
pub type BodyFn = Box<dyn Fn(&mut CodeWriter)>;

/// One argument of a [`MacroCall`].
pub enum MacroArg {
    Literal(String),
    Call(Box<MacroCall>),
    Body(BodyFn),
}

impl std::fmt::Debug for MacroArg {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MacroArg::Literal(text) => f.debug_tuple("Literal").field(text).finish(),
            MacroArg::Call(call) => f.debug_tuple("Call").field(call).finish(),
            MacroArg::Body(_) => f.debug_tuple("Body").field(&"..").finish(),
        }
    }
}

impl MacroArg {
    pub fn literal(text: impl Into<String>) -> Self {
        MacroArg::Literal(text.into())
    }

    pub fn call(call: MacroCall) -> Self {
        MacroArg::Call(Box::new(call))
    }

    pub fn body(body: impl Fn(&mut CodeWriter) + 'static) -> Self {
        MacroArg::Body(Box::new(body))
    }
}

impl From<&str> for MacroArg {
    fn from(text: &str) -> Self {
        MacroArg::literal(text)
    }
}

impl From<String> for MacroArg {
    fn from(text: String) -> Self {
        MacroArg::Literal(text)
    }
}

impl From<MacroCall> for MacroArg {
    fn from(call: MacroCall) -> Self {
        MacroArg::call(call)
    }
}

/// A named operation node of a marshalling tree.
#[derive(Debug)]
pub struct MacroCall {
    name: String,
    arguments: Vec<MacroArg>,
}

impl MacroCall {
    pub fn new(name: impl Into<String>, arguments: Vec<MacroArg>) -> Self {
        MacroCall {
            name: name.into(),
            arguments,
        }
    }

    /// Render the call: name and `(` on the opening line, one argument per
    /// line with leading-line commas, `)` at the end, indentation restored
    /// to the opening line's level.
    pub fn write(&self, out: &mut CodeWriter) {
        let original_indentation = out.indentation();
        out.writeln(&format!("{}(", self.name));
        out.indent();
        let mut first = true;
        for argument in &self.arguments {
            if !first {
                out.writeln(",");
            }
            match argument {
                MacroArg::Literal(text) => out.write(text),
                MacroArg::Call(call) => call.write(out),
                MacroArg::Body(body) => body(out),
            }
            first = false;
        }
        out.write(")");
        out.set_indentation(original_indentation);
    }

    /// Render the call as a statement, terminated with `;`.
    pub fn write_statement(&self, out: &mut CodeWriter) {
        self.write(out);
        out.writeln(";");
    }
}

/// Quote a text fragment as a C string literal.
pub fn quote(text: &str) -> String {
    format!("\"{}\"", text.replace('"', "\\\""))
}

/// Bind the named attribute of `owner` as `python_value`, then run
/// `action` with it in scope.
pub fn with_attribute(owner: &str, attribute_name: &str, action: MacroArg) -> MacroCall {
    MacroCall::new(
        "with_attribute",
        vec![
            MacroArg::literal(owner),
            MacroArg::literal(quote(attribute_name)),
            MacroArg::literal("python_value"),
            action,
        ],
    )
}

/// Bind a Python integer as an `int64_t` named `value_name`.
pub fn with_int64(python_name: &str, value_name: &str, action: MacroArg) -> MacroCall {
    MacroCall::new(
        "with_pylong_as_int64",
        vec![
            MacroArg::literal(python_name),
            MacroArg::literal(value_name),
            action,
        ],
    )
}

/// Extract an attribute and narrow it to an `int64_t` before `action` runs.
pub fn with_int64_attribute(owner: &str, attribute_name: &str, action: MacroArg) -> MacroCall {
    with_attribute(
        owner,
        attribute_name,
        MacroArg::call(with_int64("python_value", attribute_name, action)),
    )
}

/// Bind a Python float as a `double` named `value_name`.
pub fn with_float(python_name: &str, value_name: &str, action: MacroArg) -> MacroCall {
    MacroCall::new(
        "with_pyfloat_as_double",
        vec![
            MacroArg::literal(python_name),
            MacroArg::literal(value_name),
            action,
        ],
    )
}

/// Extract an attribute and narrow it to a `double` before `action` runs.
pub fn with_float_attribute(owner: &str, attribute_name: &str, action: MacroArg) -> MacroCall {
    with_attribute(
        owner,
        attribute_name,
        MacroArg::call(with_float("python_value", attribute_name, action)),
    )
}

/// Bind a Python boolean as a C `bool` named `value_name`.
pub fn with_bool(python_name: &str, value_name: &str, action: MacroArg) -> MacroCall {
    MacroCall::new(
        "with_pybool_as_bool",
        vec![
            MacroArg::literal(python_name),
            MacroArg::literal(value_name),
            action,
        ],
    )
}

/// Extract an attribute and bind it as a C `bool` before `action` runs.
pub fn with_bool_attribute(owner: &str, attribute_name: &str, action: MacroArg) -> MacroCall {
    with_attribute(
        owner,
        attribute_name,
        MacroArg::call(with_bool("python_value", attribute_name, action)),
    )
}

/// Bind a Python string as a C string named `value_name`.
pub fn with_string(python_name: &str, value_name: &str, action: MacroArg) -> MacroCall {
    MacroCall::new(
        "with_pystring_as_string",
        vec![
            MacroArg::literal(python_name),
            MacroArg::literal(value_name),
            action,
        ],
    )
}

/// Extract an attribute and bind it as a C string before `action` runs.
pub fn with_string_attribute(owner: &str, attribute_name: &str, action: MacroArg) -> MacroCall {
    with_attribute(
        owner,
        attribute_name,
        MacroArg::call(with_string("python_value", attribute_name, action)),
    )
}

/// Iterate the elements of a bounded Python list, running `action` once
/// per element with `item_index` in scope. The loop is bounded by both the
/// list's capacity constant and its runtime length.
pub fn with_list_elements(
    value_name: &str,
    list: &List,
    action: MacroArg,
) -> CodegenResult<MacroCall> {
    let bound = list
        .maximum_length()
        .ok_or_else(|| CodegenError::UnboundedList {
            element: list.element_type().name().to_string(),
        })?;
    Ok(MacroCall::new(
        "with_list_elements",
        vec![
            MacroArg::literal(value_name),
            MacroArg::literal(element_spelling(list.element_type())?),
            MacroArg::literal(bound.name()),
            action,
        ],
    ))
}

/// Extract a list attribute and iterate its elements.
pub fn with_list_attribute_elements(
    owner: &str,
    attribute_name: &str,
    list: &List,
    action: MacroArg,
) -> CodegenResult<MacroCall> {
    Ok(with_attribute(
        owner,
        attribute_name,
        MacroArg::call(with_list_elements("python_value", list, action)?),
    ))
}

/// Iterate the elements of a fixed-length Python sequence, running
/// `action` once per element with `item_index` in scope.
pub fn with_array_elements(
    value_name: &str,
    array: &Array,
    action: MacroArg,
) -> CodegenResult<MacroCall> {
    Ok(MacroCall::new(
        "with_array_elements",
        vec![
            MacroArg::literal(value_name),
            MacroArg::literal(element_spelling(array.element_type())?),
            MacroArg::literal(array.length().name()),
            action,
        ],
    ))
}

/// Extract an array attribute and iterate its elements.
pub fn with_array_attribute_elements(
    owner: &str,
    attribute_name: &str,
    array: &Array,
    action: MacroArg,
) -> CodegenResult<MacroCall> {
    Ok(with_attribute(
        owner,
        attribute_name,
        MacroArg::call(with_array_elements("python_value", array, action)?),
    ))
}

fn element_spelling(element_type: &schemabridge_model::Type) -> CodegenResult<String> {
    match c_type_for(element_type)? {
        CType::Scalar(spelling) => Ok(spelling),
        CType::Array { .. } => Err(CodegenError::UnsupportedType {
            type_name: format!("collection of {}", element_type.name()),
        }),
    }
}
