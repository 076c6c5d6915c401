//! Set command.

use std::io::Read;
use std::path::Path;

use tracing::debug;

use crate::core::backend::Backend;
use crate::core::document::{dump_variables_to, load_variables_from};
use crate::core::pipeline::{encrypt_variable, replace_variable, set_variable};
use crate::core::variable::{VariableType, Variables, Visibility};
use crate::error::Result;

const STDIN_VALUE: &str = "-";

/// Upsert `name` in `file`.
///
/// The backend is only opened when the resulting variable is secret, which
/// is then encrypted on its own before the file is written.
pub fn execute<F>(
    open_backend: F,
    file: &Path,
    name: &str,
    value: &str,
    visibility: Option<Visibility>,
    kind: Option<VariableType>,
) -> Result<()>
where
    F: FnOnce() -> Result<Box<dyn Backend>>,
{
    let value = if value == STDIN_VALUE {
        let mut buffer = String::new();
        std::io::stdin().read_to_string(&mut buffer)?;
        buffer
    } else {
        value.to_string()
    };

    let variables = if file.exists() {
        load_variables_from(file)?
    } else {
        debug!(path = %file.display(), "creating variables file");
        Variables::new()
    };

    let mut variables = set_variable(&variables, name, &value, visibility, kind);

    if let Some(variable) = variables.by_name(name).filter(|v| v.is_secret()).cloned() {
        let backend = open_backend()?;
        let encrypted = encrypt_variable(backend.as_ref(), &variable)?;
        variables = replace_variable(&variables, name, &encrypted);
    }

    dump_variables_to(&variables, file)
}
