//! Encryption backends.
//!
//! A backend turns plaintext bytes into ciphertext bytes and back. The
//! pipeline owns the `encrypted:` marker and the base64 layer; backends only
//! ever see raw bytes.
//!
//! ## Backends
//!
//! - **dummy**: Default. Returns its input unchanged.
//! - **age**: x25519 key pair or scrypt passphrase, through the `age` crate.
//!
//! ## Adding a New Backend
//!
//! 1. Implement the `Backend` trait and a `Factory` for it in a new file
//! 2. Add the factory to the match in [`Registry::create`] and to [`NAMES`]

use std::collections::BTreeMap;

use crate::error::{ConfigError, Result};

pub mod age;
pub mod discovery;
pub mod dummy;

pub use self::age::{Age, AgeConfig, AgeFactory};
pub use discovery::Discovery;
pub use dummy::{Dummy, DummyFactory};

/// Free-form backend configuration from `--backend-config KEY=VALUE`.
pub type ConfigMap = BTreeMap<String, String>;

/// Value-level encryption capability.
///
/// A single instance serves every variable of one command invocation.
pub trait Backend {
    /// Encrypt plaintext bytes.
    ///
    /// # Errors
    ///
    /// Returns `BackendError::EncryptionFailed` if the backend fails.
    fn encrypt_value(&self, plaintext: &[u8]) -> Result<Vec<u8>>;

    /// Decrypt ciphertext produced by [`Backend::encrypt_value`].
    ///
    /// # Errors
    ///
    /// Returns `BackendError::DecryptionFailed` if the backend fails.
    fn decrypt_value(&self, ciphertext: &[u8]) -> Result<Vec<u8>>;

    /// Backend name for display.
    fn name(&self) -> &'static str;
}

impl<B: Backend + ?Sized> Backend for Box<B> {
    fn encrypt_value(&self, plaintext: &[u8]) -> Result<Vec<u8>> {
        (**self).encrypt_value(plaintext)
    }

    fn decrypt_value(&self, ciphertext: &[u8]) -> Result<Vec<u8>> {
        (**self).decrypt_value(ciphertext)
    }

    fn name(&self) -> &'static str {
        (**self).name()
    }
}

/// Builds a backend from raw configuration.
///
/// Parsing and construction are split so configuration errors surface before
/// any backend resource is created. The returned box is the backend's scope:
/// teardown happens on drop.
pub trait Factory {
    type Config;

    /// Registry name.
    fn name(&self) -> &'static str;

    /// Validate raw configuration.
    fn parse_config(&self, raw: &ConfigMap) -> Result<Self::Config>;

    /// Create a backend instance.
    fn create_backend(&self, config: Self::Config) -> Result<Box<dyn Backend>>;
}

/// Names of every registered backend.
pub const NAMES: &[&str] = &[dummy::NAME, self::age::NAME];

/// Static mapping from backend name to factory.
#[derive(Debug, Clone, Default)]
pub struct Registry {
    discovery: Discovery,
}

impl Registry {
    /// Registry whose factories look up keys through `discovery`.
    pub fn new(discovery: Discovery) -> Self {
        Self { discovery }
    }

    /// Resolve `name`, parse `raw` and create the backend.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::UnknownBackend` for an unregistered name, or
    /// whatever the factory reports for bad configuration.
    pub fn create(&self, name: &str, raw: &ConfigMap) -> Result<Box<dyn Backend>> {
        match name {
            dummy::NAME => instantiate(&DummyFactory, raw),
            self::age::NAME => instantiate(&AgeFactory::new(self.discovery.clone()), raw),
            other => Err(ConfigError::UnknownBackend {
                name: other.to_string(),
                available: NAMES.to_vec(),
            }
            .into()),
        }
    }
}

fn instantiate<F: Factory>(factory: &F, raw: &ConfigMap) -> Result<Box<dyn Backend>> {
    let config = factory.parse_config(raw)?;
    let backend = factory.create_backend(config)?;
    tracing::debug!(backend = factory.name(), "created backend");
    Ok(backend)
}

/// Parse `KEY=VALUE`, splitting at the first `=` and trimming both sides.
///
/// # Errors
///
/// Returns `ConfigError::InvalidKeyValue` if there is no `=`.
pub fn parse_key_value(raw: &str) -> std::result::Result<(String, String), ConfigError> {
    raw.split_once('=')
        .map(|(k, v)| (k.trim().to_string(), v.trim().to_string()))
        .ok_or_else(|| ConfigError::InvalidKeyValue(raw.to_string()))
}
