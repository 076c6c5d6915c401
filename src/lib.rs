//! Variables - Keep configuration and secrets in one YAML file.
//!
//! # Architecture
//!
//! ```text
//! src/
//! ├── cli/              # Command-line interface
//! │   ├── args          # KEY=VALUE and [PREFIX=]FILE parsing
//! │   ├── crypt         # encrypt/decrypt in place
//! │   ├── exec          # Run a command with variables
//! │   ├── export        # bash, env_file, kubectl output
//! │   ├── set           # Upsert one variable
//! │   └── completions   # Shell completions
//! └── core/             # Core library components
//!     ├── variable      # Variable and Variables
//!     ├── document      # YAML load/dump
//!     ├── backend/      # Encryption backends
//!     │   ├── mod       # Backend and Factory traits, registry
//!     │   ├── dummy     # Identity backend
//!     │   ├── age       # age key pair or passphrase
//!     │   └── discovery # Passphrase and key file lookup
//!     ├── pipeline      # encrypted: marker handling
//!     ├── interpolate   # {{ NAME }} in command arguments
//!     ├── execution     # Environment, temporary files, launch
//!     └── export        # Export targets
//! ```
//!
//! # Features
//!
//! - Plain and secret variables side by side in a reviewable document
//! - Secrets encrypted in place with age, by key pair or passphrase
//! - File-typed variables materialized as temporary files for a command
//! - Exports for shells, dotenv files and Kubernetes manifests

pub mod cli;
pub mod core;
pub mod error;
