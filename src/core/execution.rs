//! Command execution with variables.
//!
//! An [`Execution`] turns a store into a ready-to-launch command: encrypted
//! leftovers are skipped, file-typed variables are written to temporary
//! files, command arguments are interpolated, and the remaining values are
//! layered over the inherited environment.
//!
//! Temporary files live exactly as long as the `Execution`. Launching
//! consumes it, so they are gone once the child has exited, whatever the
//! outcome.

use std::collections::BTreeMap;
use std::io::Write;
use std::process::{Command, ExitStatus, Output, Stdio};

use tempfile::NamedTempFile;
use tracing::{debug, warn};
use zeroize::Zeroizing;

use super::constants::TEMP_FILE_PREFIX;
use super::interpolate::interpolate;
use super::variable::{VariableType, Variables};
use crate::error::{Error, Result};

/// A command prepared for launch.
pub struct Execution {
    command: Vec<String>,
    environment: BTreeMap<String, Zeroizing<String>>,
    temp_files: Vec<NamedTempFile>,
}

impl Execution {
    /// Prepare `command` with `variables`.
    ///
    /// # Errors
    ///
    /// Returns `Error::EmptyCommand` for an empty command, or an IO error if
    /// a temporary file cannot be written.
    pub fn prepare(command: &[String], variables: &Variables) -> Result<Self> {
        if command.is_empty() {
            return Err(Error::EmptyCommand);
        }

        let mut values = BTreeMap::new();
        let mut temp_files = Vec::new();

        for variable in variables {
            if variable.is_encrypted() {
                warn!(
                    "variable {:?} is still encrypted, it should be decrypted before execution",
                    variable.name()
                );
                continue;
            }

            let name = variable.effective_name();
            match variable.kind() {
                VariableType::File => {
                    let file = write_temp_file(variable.value())?;
                    let path = file.path().to_string_lossy().into_owned();
                    debug!(variable = %name, path = %path, "wrote variable to temporary file");
                    values.insert(name, path);
                    temp_files.push(file);
                }
                VariableType::Text => {
                    values.insert(name, variable.value().to_string());
                }
            }
        }

        let (command, remaining) = interpolate(command, values);
        debug!(variables = ?remaining.keys().collect::<Vec<_>>(), "exporting to environment");

        Ok(Self {
            command,
            environment: remaining
                .into_iter()
                .map(|(k, v)| (k, Zeroizing::new(v)))
                .collect(),
            temp_files,
        })
    }

    /// Rendered command line.
    pub fn command(&self) -> &[String] {
        &self.command
    }

    /// Values added to the inherited environment.
    pub fn environment(&self) -> BTreeMap<&str, &str> {
        self.environment
            .iter()
            .map(|(k, v)| (k.as_str(), v.as_str()))
            .collect()
    }

    /// Number of temporary files currently held.
    pub fn temp_file_count(&self) -> usize {
        self.temp_files.len()
    }

    /// Run with inherited stdio and wait.
    ///
    /// # Errors
    ///
    /// Returns `Error::CommandLaunch` if the program cannot be started and
    /// `Error::CommandFailed` if it exits unsuccessfully.
    pub fn status(self) -> Result<ExitStatus> {
        let status = self
            .process()
            .status()
            .map_err(|source| self.launch_error(source))?;
        self.check(status)?;
        Ok(status)
    }

    /// Run with captured stdout and stderr and wait.
    ///
    /// # Errors
    ///
    /// Same as [`Execution::status`].
    pub fn output(self) -> Result<Output> {
        let output = self
            .process()
            .stdin(Stdio::inherit())
            .output()
            .map_err(|source| self.launch_error(source))?;
        self.check(output.status)?;
        Ok(output)
    }

    fn process(&self) -> Command {
        let mut process = Command::new(&self.command[0]);
        process.args(&self.command[1..]);
        process.envs(
            self.environment
                .iter()
                .map(|(k, v)| (k.as_str(), v.as_str())),
        );
        process
    }

    fn launch_error(&self, source: std::io::Error) -> Error {
        Error::CommandLaunch {
            program: self.command[0].clone(),
            source,
        }
    }

    fn check(&self, status: ExitStatus) -> Result<()> {
        if status.success() {
            return Ok(());
        }
        Err(Error::CommandFailed {
            program: self.command[0].clone(),
            code: status.code(),
        })
    }
}

impl std::fmt::Debug for Execution {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Execution")
            .field("command", &self.command)
            .field("environment", &self.environment.keys().collect::<Vec<_>>())
            .field("temp_files", &self.temp_files.len())
            .finish()
    }
}

fn write_temp_file(content: &str) -> Result<NamedTempFile> {
    let mut file = tempfile::Builder::new()
        .prefix(TEMP_FILE_PREFIX)
        .tempfile()?;
    file.write_all(content.as_bytes())?;
    file.flush()?;
    Ok(file)
}

/// Run `command` with `variables` and wait for it.
///
/// # Errors
///
/// See [`Execution::prepare`] and [`Execution::status`].
pub fn execute_with_variables(command: &[String], variables: &Variables) -> Result<ExitStatus> {
    Execution::prepare(command, variables)?.status()
}
