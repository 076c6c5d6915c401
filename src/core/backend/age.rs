//! Age encryption backend implementation.
//!
//! Encrypts values with the age format, either for an x25519 key pair or
//! with an scrypt passphrase. Ciphertext is binary; the pipeline base64
//! encodes it.
//!
//! ## Configuration
//!
//! ```text
//! --backend age --backend-config key_pair=./variables.key
//! --backend age --backend-config passphrase=hunter2
//! ```
//!
//! Without either key, [`Discovery`] is asked for a passphrase first and a
//! key file second.

use std::io::{Read, Write};
use std::path::{Path, PathBuf};

use ::age::secrecy::SecretString;
use ::age::x25519;
use tracing::{debug, trace};
use zeroize::Zeroizing;

use super::{Backend, ConfigMap, Discovery, Factory};
use crate::error::{BackendError, ConfigError, Result};

/// Registry name.
pub const NAME: &str = "age";

const SECRET_KEY_PREFIX: &str = "AGE-SECRET-KEY-";
const PUBLIC_KEY_COMMENT: &str = "# public key:";

/// Key material for the age backend.
pub enum AgeConfig {
    KeyPair {
        identity: x25519::Identity,
        recipient: x25519::Recipient,
    },
    Passphrase(Zeroizing<String>),
}

impl std::fmt::Debug for AgeConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::KeyPair { recipient, .. } => f
                .debug_struct("KeyPair")
                .field("recipient", &recipient.to_string())
                .finish_non_exhaustive(),
            Self::Passphrase(_) => f.write_str("Passphrase(..)"),
        }
    }
}

impl AgeConfig {
    /// Parse an age key file.
    ///
    /// The `AGE-SECRET-KEY-` line is required. A `# public key:` comment is
    /// optional but must match the identity when present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidKeyFile` if the file is missing a secret
    /// key, holds an unparsable key, or has a mismatching public key.
    pub fn parse_key_pair(text: &str, path: &Path) -> Result<Self> {
        let invalid = |reason: &str| ConfigError::InvalidKeyFile {
            path: path.to_path_buf(),
            reason: reason.to_string(),
        };

        let mut secret_key: Option<Zeroizing<String>> = None;
        let mut public_key: Option<String> = None;
        for line in text.lines().map(str::trim) {
            if line.starts_with(SECRET_KEY_PREFIX) {
                secret_key = Some(Zeroizing::new(line.to_string()));
            } else if let Some(rest) = line.strip_prefix(PUBLIC_KEY_COMMENT) {
                public_key = Some(rest.trim().to_string());
            }
        }

        let secret_key = secret_key.ok_or_else(|| invalid("private key not found"))?;
        let identity = secret_key.parse::<x25519::Identity>().map_err(invalid)?;
        let recipient = identity.to_public();

        if let Some(public_key) = public_key {
            if public_key != recipient.to_string() {
                return Err(invalid("public key does not match private key").into());
            }
        }

        Ok(Self::KeyPair {
            identity,
            recipient,
        })
    }

    /// Load and parse an age key file.
    pub fn load_key_pair(path: &Path) -> Result<Self> {
        let text = Zeroizing::new(std::fs::read_to_string(path).map_err(|e| {
            ConfigError::InvalidKeyFile {
                path: path.to_path_buf(),
                reason: e.to_string(),
            }
        })?);
        Self::parse_key_pair(&text, path)
    }
}

/// Age backend.
#[derive(Debug)]
pub struct Age {
    config: AgeConfig,
}

impl Age {
    pub fn new(config: AgeConfig) -> Self {
        Self { config }
    }

    fn encryptor(&self) -> Result<::age::Encryptor> {
        match &self.config {
            AgeConfig::KeyPair { recipient, .. } => ::age::Encryptor::with_recipients(
                std::iter::once(recipient as &dyn ::age::Recipient),
            )
            .map_err(|e| BackendError::EncryptionFailed(e.to_string()).into()),
            AgeConfig::Passphrase(passphrase) => Ok(::age::Encryptor::with_user_passphrase(
                SecretString::from(passphrase.to_string()),
            )),
        }
    }
}

impl Backend for Age {
    fn encrypt_value(&self, plaintext: &[u8]) -> Result<Vec<u8>> {
        trace!(plaintext_len = plaintext.len(), "encrypting");

        let encryptor = self.encryptor()?;
        let mut encrypted = Vec::new();
        let mut writer = encryptor
            .wrap_output(&mut encrypted)
            .map_err(|e| BackendError::EncryptionFailed(e.to_string()))?;
        writer
            .write_all(plaintext)
            .map_err(|e| BackendError::EncryptionFailed(e.to_string()))?;
        writer
            .finish()
            .map_err(|e| BackendError::EncryptionFailed(e.to_string()))?;

        trace!(ciphertext_len = encrypted.len(), "encrypted");
        Ok(encrypted)
    }

    fn decrypt_value(&self, ciphertext: &[u8]) -> Result<Vec<u8>> {
        trace!(ciphertext_len = ciphertext.len(), "decrypting");

        let decryptor = ::age::Decryptor::new(ciphertext)
            .map_err(|e| BackendError::DecryptionFailed(e.to_string()))?;

        let mut reader = match &self.config {
            AgeConfig::KeyPair { identity, .. } => {
                decryptor.decrypt(std::iter::once(identity as &dyn ::age::Identity))
            }
            AgeConfig::Passphrase(passphrase) => {
                let identity =
                    ::age::scrypt::Identity::new(SecretString::from(passphrase.to_string()));
                decryptor.decrypt(std::iter::once(&identity as &dyn ::age::Identity))
            }
        }
        .map_err(|e| BackendError::DecryptionFailed(e.to_string()))?;

        let mut decrypted = Vec::new();
        reader
            .read_to_end(&mut decrypted)
            .map_err(|e| BackendError::DecryptionFailed(e.to_string()))?;

        trace!(plaintext_len = decrypted.len(), "decrypted");
        Ok(decrypted)
    }

    fn name(&self) -> &'static str {
        NAME
    }
}

/// Factory for [`Age`].
#[derive(Debug, Clone, Default)]
pub struct AgeFactory {
    discovery: Discovery,
}

impl AgeFactory {
    pub fn new(discovery: Discovery) -> Self {
        Self { discovery }
    }
}

impl Factory for AgeFactory {
    type Config = AgeConfig;

    fn name(&self) -> &'static str {
        NAME
    }

    /// Explicit `passphrase` or `key_pair` first, then discovery. A
    /// passphrase wins over a key pair at each step.
    fn parse_config(&self, raw: &ConfigMap) -> Result<AgeConfig> {
        if let Some(passphrase) = raw.get("passphrase") {
            debug!("using passphrase from backend configuration");
            return Ok(AgeConfig::Passphrase(Zeroizing::new(passphrase.clone())));
        }

        if let Some(path) = raw.get("key_pair") {
            debug!(path = %path, "using key pair from backend configuration");
            return AgeConfig::load_key_pair(&PathBuf::from(path));
        }

        if let Some(passphrase) = self.discovery.passphrase()? {
            return Ok(AgeConfig::Passphrase(passphrase));
        }

        if let Some(path) = self.discovery.key_pair_file() {
            debug!(path = %path.display(), "using discovered key pair");
            return AgeConfig::load_key_pair(&path);
        }

        Err(ConfigError::NoBackendConfiguration.into())
    }

    fn create_backend(&self, config: AgeConfig) -> Result<Box<dyn Backend>> {
        Ok(Box::new(Age::new(config)))
    }
}
