//! Encryption pipeline.
//!
//! Applies a [`Backend`] to secret variables. Every operation is idempotent:
//! encrypting an encrypted value or decrypting a plaintext value (outside
//! strict mode) leaves it alone with a warning.

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use tracing::{debug, warn};

use super::backend::Backend;
use super::constants::ENCRYPTED_MARKER;
use super::variable::{Variable, VariableType, Variables, Visibility};
use crate::error::{BackendError, Error, Result};

/// Encrypt one variable.
///
/// Non-secret and already encrypted variables are returned unchanged.
///
/// # Errors
///
/// Returns the backend's error if encryption fails.
pub fn encrypt_variable(backend: &dyn Backend, variable: &Variable) -> Result<Variable> {
    if !variable.is_secret() {
        return Ok(variable.clone());
    }

    if variable.is_encrypted() {
        warn!(
            "variable {:?} is already encrypted, skipping encryption",
            variable.name()
        );
        return Ok(variable.clone());
    }

    debug!(variable = variable.name(), backend = backend.name(), "encrypting");
    let ciphertext = backend.encrypt_value(variable.value().as_bytes())?;
    let value = format!("{}{}", ENCRYPTED_MARKER, STANDARD.encode(ciphertext));
    Ok(variable.with_value(value))
}

/// Decrypt one variable.
///
/// With `strict`, a secret without the marker is an error; otherwise it is
/// returned unchanged with a warning.
///
/// # Errors
///
/// Returns `Error::NotEncrypted` in strict mode, `BackendError::InvalidCiphertext`
/// for bad base64 or non UTF-8 plaintext, or the backend's error.
pub fn decrypt_variable(
    backend: &dyn Backend,
    variable: &Variable,
    strict: bool,
) -> Result<Variable> {
    if !variable.is_secret() {
        return Ok(variable.clone());
    }

    let Some(encoded) = variable.value().strip_prefix(ENCRYPTED_MARKER) else {
        if strict {
            return Err(Error::NotEncrypted(variable.name().to_string()));
        }
        warn!(
            "variable {:?} is not encrypted, skipping decryption",
            variable.name()
        );
        return Ok(variable.clone());
    };

    let invalid = |reason: String| BackendError::InvalidCiphertext {
        name: variable.name().to_string(),
        reason,
    };

    debug!(variable = variable.name(), backend = backend.name(), "decrypting");
    let ciphertext = STANDARD
        .decode(encoded)
        .map_err(|e| invalid(e.to_string()))?;
    let plaintext = backend.decrypt_value(&ciphertext)?;
    let value = String::from_utf8(plaintext).map_err(|e| invalid(e.to_string()))?;
    Ok(variable.with_value(value))
}

/// Encrypt every variable, keeping order.
pub fn encrypt_variables(backend: &dyn Backend, variables: &Variables) -> Result<Variables> {
    variables
        .iter()
        .map(|variable| encrypt_variable(backend, variable))
        .collect()
}

/// Decrypt every variable, keeping order.
///
/// Variables that decrypt to an empty value are dropped.
pub fn decrypt_variables(
    backend: &dyn Backend,
    variables: &Variables,
    strict: bool,
) -> Result<Variables> {
    variables
        .iter()
        .map(|variable| decrypt_variable(backend, variable, strict))
        .filter(|decrypted| match decrypted {
            Ok(variable) if variable.value().is_empty() => {
                warn!(
                    "variable {:?} has an empty value after decryption, skipping variable",
                    variable.name()
                );
                false
            }
            _ => true,
        })
        .collect()
}

/// Set a variable's value, creating it if needed.
///
/// An existing variable keeps its position, and its visibility and type
/// unless overridden. A new one is appended with `plain`/`text` defaults.
pub fn set_variable(
    variables: &Variables,
    name: &str,
    value: &str,
    visibility: Option<Visibility>,
    kind: Option<VariableType>,
) -> Variables {
    match variables.by_name(name) {
        Some(existing) => {
            let replacement = Variable::new(
                name,
                value,
                visibility.unwrap_or(existing.visibility()),
                kind.unwrap_or(existing.kind()),
            );
            replace_variable(variables, name, &replacement)
        }
        None => {
            let created = Variable::new(
                name,
                value,
                visibility.unwrap_or_default(),
                kind.unwrap_or_default(),
            );
            variables.clone().merge(Variables::from(vec![created]))
        }
    }
}

/// Replace every variable named `name` with `replacement`.
pub fn replace_variable(variables: &Variables, name: &str, replacement: &Variable) -> Variables {
    variables
        .iter()
        .map(|v| {
            if v.name() == name {
                replacement.clone()
            } else {
                v.clone()
            }
        })
        .collect()
}
