//! Argument value parsers.

use std::path::PathBuf;

use crate::error::ConfigError;

/// A variables file given to `exec`, with its optional prefix.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VariablesFile {
    pub prefix: Option<String>,
    pub path: PathBuf,
}

impl VariablesFile {
    /// Prefix to apply: the explicit one, else the uppercased file stem when
    /// `auto` is set.
    pub fn effective_prefix(&self, auto: bool) -> Option<String> {
        if self.prefix.is_some() {
            return self.prefix.clone();
        }
        if !auto {
            return None;
        }
        self.path
            .file_stem()
            .map(|stem| stem.to_string_lossy().to_uppercase())
    }
}

/// Parse `[PREFIX=]FILE`. An empty prefix means none; the file must exist.
///
/// # Errors
///
/// Returns `ConfigError::FileNotFound` if the path is not an existing file.
pub fn parse_variables_file(raw: &str) -> Result<VariablesFile, ConfigError> {
    let (prefix, path) = match raw.split_once('=') {
        Some((prefix, path)) => (Some(prefix.trim()).filter(|p| !p.is_empty()), path),
        None => (None, raw),
    };

    let path = PathBuf::from(path.trim());
    if !path.is_file() {
        return Err(ConfigError::FileNotFound(path));
    }

    Ok(VariablesFile {
        prefix: prefix.map(str::to_string),
        path,
    })
}
