//! Pass-through backend.
//!
//! Leaves values readable. Useful for tests and for files where the
//! `encrypted:` marker is only a bookkeeping convention.

use super::{Backend, ConfigMap, Factory};
use crate::error::Result;

/// Registry name.
pub const NAME: &str = "dummy";

/// Backend returning its input unchanged.
#[derive(Debug, Clone, Copy, Default)]
pub struct Dummy;

impl Backend for Dummy {
    fn encrypt_value(&self, plaintext: &[u8]) -> Result<Vec<u8>> {
        Ok(plaintext.to_vec())
    }

    fn decrypt_value(&self, ciphertext: &[u8]) -> Result<Vec<u8>> {
        Ok(ciphertext.to_vec())
    }

    fn name(&self) -> &'static str {
        NAME
    }
}

/// Factory for [`Dummy`]. Ignores configuration.
#[derive(Debug, Clone, Copy, Default)]
pub struct DummyFactory;

impl Factory for DummyFactory {
    type Config = ();

    fn name(&self) -> &'static str {
        NAME
    }

    fn parse_config(&self, _raw: &ConfigMap) -> Result<()> {
        Ok(())
    }

    fn create_backend(&self, _config: ()) -> Result<Box<dyn Backend>> {
        Ok(Box::new(Dummy))
    }
}
