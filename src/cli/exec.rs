//! Exec command.
//!
//! Loads, prefixes and decrypts each file in order, then runs the command.
//! The process exits with the child's exit code.

use tracing::debug;

use crate::cli::args::VariablesFile;
use crate::core::backend::Backend;
use crate::core::document::load_variables_from;
use crate::core::execution::execute_with_variables;
use crate::core::pipeline::decrypt_variables;
use crate::core::variable::Variables;
use crate::error::{Error, Result};

/// Run `command` with the variables from `files`.
pub fn execute(
    backend: &dyn Backend,
    files: &[VariablesFile],
    auto_prefixes: bool,
    command: &[String],
) -> Result<()> {
    let variables = collect(backend, files, auto_prefixes)?;

    match execute_with_variables(command, &variables) {
        Ok(_) => Ok(()),
        Err(Error::CommandFailed { program, code }) => {
            debug!(program = %program, code = ?code, "command failed");
            // A child killed by a signal has no code
            std::process::exit(code.unwrap_or(1));
        }
        Err(e) => Err(e),
    }
}

/// Load and decrypt `files`, merged in order.
pub fn collect(
    backend: &dyn Backend,
    files: &[VariablesFile],
    auto_prefixes: bool,
) -> Result<Variables> {
    let mut variables = Variables::new();
    for file in files {
        let mut loaded = load_variables_from(&file.path)?;
        if let Some(prefix) = file.effective_prefix(auto_prefixes) {
            debug!(path = %file.path.display(), prefix = %prefix, "prefixing variables");
            loaded = loaded.with_prefix(&prefix);
        }
        variables = variables.merge(decrypt_variables(backend, &loaded, false)?);
    }
    Ok(variables)
}
