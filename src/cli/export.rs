//! Export command - print decrypted variables for another tool.

use std::path::Path;

use crate::cli::output;
use crate::core::backend::{Backend, ConfigMap};
use crate::core::document::load_variables_from;
use crate::core::export::{export_variables, ExportTarget};
use crate::core::pipeline::decrypt_variables;
use crate::error::Result;

/// Export `file` in the `target` format to stdout.
pub fn execute(backend: &dyn Backend, file: &Path, target: &str, config: &ConfigMap) -> Result<()> {
    let target: ExportTarget = target.parse()?;
    let variables = load_variables_from(file)?;
    let variables = decrypt_variables(backend, &variables, false)?;
    output::raw(&export_variables(&variables, target, config)?);
    Ok(())
}
