//! Command-line interface.

pub mod args;
pub mod completions;
pub mod crypt;
pub mod exec;
pub mod export;
pub mod output;
pub mod set;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing::debug;

use crate::core::backend::{Backend, ConfigMap, Discovery, Registry};
use crate::core::constants::DEFAULT_BACKEND;
use crate::core::variable::{VariableType, Visibility};
use crate::error::Result;
use args::VariablesFile;

/// Variables - Keep configuration and secrets in one YAML file.
#[derive(Parser)]
#[command(
    name = "variables",
    about = "Keep configuration and secrets in one YAML file",
    version
)]
pub struct Cli {
    /// Encryption backend (dummy, age)
    #[arg(short, long, env = "VARIABLES_BACKEND", default_value = DEFAULT_BACKEND)]
    pub backend: String,

    /// Backend option, repeatable (e.g. passphrase=..., key_pair=variables.key)
    #[arg(short = 'c', long = "backend-config", value_name = "KEY=VALUE", value_parser = crate::core::backend::parse_key_value)]
    pub backend_config: Vec<(String, String)>,

    /// Enable debug logging
    #[arg(short, long)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// Top-level commands.
#[derive(Subcommand)]
pub enum Command {
    /// Encrypt secret variables in place
    Encrypt {
        /// Variables file
        file: PathBuf,
    },

    /// Decrypt secret variables in place
    Decrypt {
        /// Fail on a secret that is not encrypted
        #[arg(long)]
        strict: bool,
        /// Variables file
        file: PathBuf,
    },

    /// Run a command with variables in its environment
    Exec {
        /// Variables file, optionally prefixed (e.g. DB=db.yaml); repeatable
        #[arg(short = 'V', long = "variables", value_name = "[PREFIX=]FILE", value_parser = args::parse_variables_file)]
        variables: Vec<VariablesFile>,
        /// Prefix unprefixed files with their uppercased file stem
        #[arg(short, long)]
        auto_prefixes: bool,
        /// Command and arguments; `{{ NAME }}` is replaced by the variable
        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        command: Vec<String>,
    },

    /// Print variables for another tool
    Export {
        /// Target format (bash, env_file, kubectl)
        #[arg(short, long)]
        target: String,
        /// Target option, repeatable (e.g. name=app)
        #[arg(short, long, value_name = "KEY=VALUE", value_parser = crate::core::backend::parse_key_value)]
        config: Vec<(String, String)>,
        /// Variables file
        file: PathBuf,
    },

    /// Set a variable, encrypting it if secret
    Set {
        /// Variables file, created if missing
        #[arg(short = 'V', long = "variables", value_name = "FILE")]
        file: PathBuf,
        /// Visibility (defaults to the current one, or plain)
        #[arg(long, value_enum)]
        visibility: Option<Visibility>,
        /// Type (defaults to the current one, or text)
        #[arg(long = "type", value_enum)]
        kind: Option<VariableType>,
        /// Variable name
        name: String,
        /// Value, or `-` to read it from stdin
        #[arg(allow_hyphen_values = true)]
        value: String,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

/// Execute a command.
pub fn execute(cli: Cli) -> Result<()> {
    use Command::*;

    let Cli {
        backend,
        backend_config,
        command,
        ..
    } = cli;
    let backend_config: ConfigMap = backend_config.into_iter().collect();
    let open_backend = || -> Result<Box<dyn Backend>> {
        debug!(backend = %backend, "creating backend");
        Registry::new(Discovery::from_env()).create(&backend, &backend_config)
    };

    match command {
        Encrypt { file } => crypt::encrypt(open_backend()?.as_ref(), &file),
        Decrypt { strict, file } => crypt::decrypt(open_backend()?.as_ref(), &file, strict),
        Exec {
            variables,
            auto_prefixes,
            command,
        } => exec::execute(open_backend()?.as_ref(), &variables, auto_prefixes, &command),
        Export {
            target,
            config,
            file,
        } => export::execute(
            open_backend()?.as_ref(),
            &file,
            &target,
            &config.into_iter().collect(),
        ),
        Set {
            file,
            visibility,
            kind,
            name,
            value,
        } => set::execute(open_backend, &file, &name, &value, visibility, kind),
        Completions { shell } => completions::execute(shell),
    }
}
