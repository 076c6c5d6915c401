//! Key and passphrase discovery.
//!
//! Backends that need key material and were not given any explicitly ask a
//! [`Discovery`] value. The value is built once by the caller, so tests can
//! point it at a temporary tree or disable it entirely.

use std::path::{Path, PathBuf};

use tracing::debug;
use zeroize::Zeroizing;

use crate::core::constants::{
    KEY_PAIR_FILE, PASSPHRASE_ENV, PASSPHRASE_FILE, REPOSITORY_MARKER,
};
use crate::error::Result;

/// Where to look for implicit key material.
#[derive(Debug, Clone, Default)]
pub struct Discovery {
    passphrase: Option<Zeroizing<String>>,
    start_dir: Option<PathBuf>,
}

impl Discovery {
    /// Discovery from the process: `VARIABLES_PASSPHRASE` and the working directory.
    pub fn from_env() -> Self {
        Self {
            passphrase: std::env::var(PASSPHRASE_ENV).ok().map(Zeroizing::new),
            start_dir: std::env::current_dir().ok(),
        }
    }

    /// Discovery that never finds anything.
    pub fn none() -> Self {
        Self::default()
    }

    /// Search files upwards from `dir` only.
    pub fn in_dir(dir: impl Into<PathBuf>) -> Self {
        Self {
            passphrase: None,
            start_dir: Some(dir.into()),
        }
    }

    /// Use `passphrase` as if it came from the environment.
    pub fn with_passphrase(mut self, passphrase: impl Into<String>) -> Self {
        self.passphrase = Some(Zeroizing::new(passphrase.into()));
        self
    }

    /// Passphrase from the environment, else from a passphrase file.
    ///
    /// # Errors
    ///
    /// Returns an error if a passphrase file exists but cannot be read.
    pub fn passphrase(&self) -> Result<Option<Zeroizing<String>>> {
        if let Some(passphrase) = &self.passphrase {
            debug!("using passphrase from {}", PASSPHRASE_ENV);
            return Ok(Some(passphrase.clone()));
        }

        let Some(path) = self.find(PASSPHRASE_FILE) else {
            return Ok(None);
        };

        debug!(path = %path.display(), "using passphrase file");
        let contents = Zeroizing::new(std::fs::read_to_string(&path)?);
        Ok(Some(Zeroizing::new(contents.trim().to_string())))
    }

    /// Path of the nearest key pair file.
    pub fn key_pair_file(&self) -> Option<PathBuf> {
        self.find(KEY_PAIR_FILE)
    }

    fn find(&self, file_name: &str) -> Option<PathBuf> {
        find_upwards(self.start_dir.as_deref()?, file_name)
    }
}

/// Look for `file_name` in `start` and its ancestors.
///
/// The search stops at the first directory containing `.git`, after checking
/// that directory itself.
pub fn find_upwards(start: &Path, file_name: &str) -> Option<PathBuf> {
    let mut dir = start;
    loop {
        let candidate = dir.join(file_name);
        if candidate.is_file() {
            return Some(candidate);
        }

        if dir.join(REPOSITORY_MARKER).exists() {
            debug!(
                root = %dir.display(),
                "reached the repository root without finding {}", file_name
            );
            return None;
        }

        dir = dir.parent()?;
    }
}
