//! Constants used throughout variables.
//!
//! Centralizes magic strings and configuration values.

/// Prefix marking a secret value as `base64(ciphertext)`.
pub const ENCRYPTED_MARKER: &str = "encrypted:";

/// Separator between a prefix and a variable name in the environment.
pub const PREFIX_SEPARATOR: &str = "_";

/// Line emitted before every YAML document we write.
pub const DOCUMENT_SEPARATOR: &str = "---";

/// Environment variable holding the age passphrase.
pub const PASSPHRASE_ENV: &str = "VARIABLES_PASSPHRASE";

/// Passphrase file looked up from the working directory upwards.
pub const PASSPHRASE_FILE: &str = "variables.passphrase";

/// age key file looked up from the working directory upwards.
pub const KEY_PAIR_FILE: &str = "variables.key";

/// Directory marking the root of the upward file search.
pub const REPOSITORY_MARKER: &str = ".git";

/// Environment variable holding the log filter.
pub const LOG_ENV: &str = "VARIABLES_LOG";

/// Backend used when none is given.
pub const DEFAULT_BACKEND: &str = "dummy";

/// Prefix for temporary files holding file-typed variables.
pub const TEMP_FILE_PREFIX: &str = "variables-";
