//! Variables - Keep configuration and secrets in one YAML file.

use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use variables::cli::output;
use variables::cli::{execute, Cli};
use variables::core::backend::NAMES;
use variables::core::constants::LOG_ENV;
use variables::error::{BackendError, ConfigError, Error};

fn main() {
    let cli = Cli::parse();

    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| {
        if cli.verbose {
            EnvFilter::new("variables=debug")
        } else {
            EnvFilter::new("variables=warn")
        }
    });

    // Logs go to stderr so exported output stays clean
    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_target(false)
                .without_time()
                .with_writer(std::io::stderr),
        )
        .init();

    if let Err(e) = execute(cli) {
        let suggestion = match &e {
            Error::Config(ConfigError::UnknownBackend { .. }) => {
                Some(format!("available backends: {}", NAMES.join(", ")))
            }
            Error::Config(ConfigError::NoBackendConfiguration) => Some(
                "set VARIABLES_PASSPHRASE, add variables.passphrase or variables.key, or pass -c passphrase=..."
                    .to_string(),
            ),
            Error::NotEncrypted(_) => Some("run: variables encrypt FILE".to_string()),
            Error::Backend(BackendError::DecryptionFailed(_)) => {
                Some("check that the backend configuration matches the one used to encrypt".to_string())
            }
            _ => None,
        };

        output::error(&e.to_string());
        if let Some(hint) = suggestion {
            output::hint(&hint);
        }
        std::process::exit(1);
    }
}
