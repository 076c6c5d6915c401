//! Error types.
//!
//! Per-variable anomalies (already encrypted, empty value, unsupported type
//! for an export) are logged and skipped, so they never show up here. What
//! remains aborts the running command.

use std::path::PathBuf;

use thiserror::Error;

/// Top-level error.
#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Backend(#[from] BackendError),

    #[error("variable {0:?} is not encrypted")]
    NotEncrypted(String),

    #[error("unsupported export target: {0} (supported: bash, env_file, kubectl)")]
    UnsupportedExportTarget(String),

    #[error("malformed variables document {source_name}: {reason}")]
    MalformedDocument { source_name: String, reason: String },

    #[error("no command specified")]
    EmptyCommand,

    #[error("failed to launch {program}: {source}")]
    CommandLaunch {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("{program} exited with {}", .code.map_or_else(|| "a signal".to_string(), |c| format!("status {}", c)))]
    CommandFailed { program: String, code: Option<i32> },

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("yaml error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

/// Backend selection and configuration errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("backend {name:?} not found (available: {})", .available.join(", "))]
    UnknownBackend {
        name: String,
        available: Vec<&'static str>,
    },

    #[error("no key pair or passphrase found for the backend")]
    NoBackendConfiguration,

    #[error("expected KEY=VALUE, got {0:?}")]
    InvalidKeyValue(String),

    #[error("invalid key file {}: {reason}", .path.display())]
    InvalidKeyFile { path: PathBuf, reason: String },

    #[error("file does not exist or is not a file: {}", .0.display())]
    FileNotFound(PathBuf),
}

/// Failures inside an encryption backend.
#[derive(Error, Debug)]
pub enum BackendError {
    #[error("encryption failed: {0}")]
    EncryptionFailed(String),

    #[error("decryption failed: {0}")]
    DecryptionFailed(String),

    #[error("variable {name:?} holds an invalid ciphertext: {reason}")]
    InvalidCiphertext { name: String, reason: String },
}

pub type Result<T> = std::result::Result<T, Error>;
