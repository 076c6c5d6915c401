//! Encrypt and decrypt commands.
//!
//! Both rewrite the variables file in place.

use std::path::Path;

use crate::cli::output;
use crate::core::backend::Backend;
use crate::core::document::{dump_variables_to, load_variables_from};
use crate::core::pipeline::{decrypt_variables, encrypt_variables};
use crate::error::Result;

/// Encrypt every secret in `file`.
pub fn encrypt(backend: &dyn Backend, file: &Path) -> Result<()> {
    let variables = load_variables_from(file)?;
    let pending = variables
        .iter()
        .filter(|v| v.is_secret() && !v.is_encrypted())
        .count();

    let encrypted = encrypt_variables(backend, &variables)?;
    dump_variables_to(&encrypted, file)?;

    output::success(&format!(
        "encrypted {} {} in {}",
        pending,
        plural(pending),
        output::path(&file.display().to_string())
    ));
    Ok(())
}

/// Decrypt every secret in `file`.
pub fn decrypt(backend: &dyn Backend, file: &Path, strict: bool) -> Result<()> {
    let variables = load_variables_from(file)?;
    let pending = variables.iter().filter(|v| v.is_encrypted()).count();

    let decrypted = decrypt_variables(backend, &variables, strict)?;
    dump_variables_to(&decrypted, file)?;

    output::success(&format!(
        "decrypted {} {} in {}",
        pending,
        plural(pending),
        output::path(&file.display().to_string())
    ));
    Ok(())
}

fn plural(count: usize) -> &'static str {
    if count == 1 {
        "secret"
    } else {
        "secrets"
    }
}
