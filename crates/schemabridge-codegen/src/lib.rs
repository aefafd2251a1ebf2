//! schemabridge-codegen - Multi-target code generation
//!
//! This crate turns a [`schemabridge_model::Module`] into synchronized
//! source artifacts:
//!
//! - [`CHeaderGenerator`]: native C declarations (constants, enums, structs)
//! - [`PythonModuleGenerator`]: the dynamic dataclass/enum module
//! - [`CPythonConversionGenerator`]: the bidirectional C↔Python marshalling
//!   functions
//! - [`CToStringGenerator`]: debug printers for the native structs
//!
//! # Architecture
//!
//! ```text
//! Module (schemabridge-model)
//!     ↓
//!  ├─→ [CHeaderGenerator]          → <module>_protocol.h
//!  ├─→ [PythonModuleGenerator]     → python_<module>_protocol.py
//!  ├─→ [CPythonConversionGenerator]→ <module>_conversion.{h,c}
//!  └─→ [CToStringGenerator]        → <module>_to_string.{h,c}
//! ```
//!
//! All generators share the same primitives: the identifier normalizer
//! ([`naming`]), the indentation-aware [`CodeWriter`], the native type
//! mapper ([`ctypes`]), and — for the conversion generator — the
//! marshalling tree ([`marshal`]).
//!
//! Generation is pure tree traversal: no I/O, single-threaded, each
//! generator owns its output buffers. Any error aborts the run; there is no
//! partial output.

mod conversion;
mod ctypes;
mod error;
mod header;
pub mod marshal;
pub mod naming;
mod python_module;
mod style;
mod to_string;
mod writer;

pub use conversion::CPythonConversionGenerator;
pub use ctypes::{CType, c_type_for, c_type_for_enum, c_type_for_struct};
pub use error::{CodegenError, CodegenResult};
pub use header::CHeaderGenerator;
pub use marshal::{MacroArg, MacroCall};
pub use python_module::PythonModuleGenerator;
pub use style::BraceStyle;
pub use to_string::CToStringGenerator;
pub use writer::{CodeWriter, WriterMode};
