//! Core library components.
//!
//! Everything here is independent of the command line: the variable model,
//! the document codec, encryption backends and the pipeline that applies
//! them, command interpolation and execution, and export formats.

pub mod backend;
pub mod constants;
pub mod document;
pub mod execution;
pub mod export;
pub mod interpolate;
pub mod pipeline;
pub mod variable;

pub use document::{dump_variables, dump_variables_to, load_variables, load_variables_from};
pub use execution::{execute_with_variables, Execution};
pub use export::{export_variables, ExportTarget};
pub use pipeline::{
    decrypt_variable, decrypt_variables, encrypt_variable, encrypt_variables, replace_variable,
    set_variable,
};
pub use variable::{Variable, VariableType, Variables, Visibility};
