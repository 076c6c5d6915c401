//! Command helper methods for Test.

use super::{Test, PASSPHRASE, VARIABLES_FILE};
use assert_cmd::Command;
use std::process::Output;

impl Test {
    /// Create a variables command.
    ///
    /// Returns a Command with the current directory set to the test
    /// directory, the variables environment cleared and colors disabled.
    pub fn cmd(&self) -> Command {
        #[allow(deprecated)]
        let mut cmd = Command::cargo_bin("variables").expect("failed to find variables binary");
        cmd.current_dir(self.dir.path());
        cmd.env_remove("VARIABLES_BACKEND");
        cmd.env_remove("VARIABLES_PASSPHRASE");
        cmd.env_remove("VARIABLES_LOG");
        cmd.env("NO_COLOR", "1");
        cmd
    }

    /// Run with the given arguments.
    pub fn run(&self, args: &[&str]) -> Output {
        self.cmd()
            .args(args)
            .output()
            .expect("failed to run variables")
    }

    /// Shortcut for `variables encrypt variables.yaml`.
    pub fn encrypt(&self) -> Output {
        self.run(&["encrypt", VARIABLES_FILE])
    }

    /// Shortcut for `variables decrypt variables.yaml`.
    pub fn decrypt(&self) -> Output {
        self.run(&["decrypt", VARIABLES_FILE])
    }

    /// Shortcut for `variables -b age -c passphrase=... <args>`.
    pub fn age(&self, args: &[&str]) -> Output {
        let passphrase = format!("passphrase={}", PASSPHRASE);
        let mut full = vec!["-b", "age", "-c", passphrase.as_str()];
        full.extend_from_slice(args);
        self.run(&full)
    }

    /// Shortcut for `variables exec -V variables.yaml -- <command>`.
    pub fn exec(&self, command: &[&str]) -> Output {
        let mut args = vec!["exec", "-V", VARIABLES_FILE, "--"];
        args.extend_from_slice(command);
        self.run(&args)
    }

    /// Shortcut for `variables export -t <target> variables.yaml`.
    pub fn export(&self, target: &str) -> Output {
        self.run(&["export", "-t", target, VARIABLES_FILE])
    }

    /// Shortcut for `variables set -V variables.yaml <args>`.
    pub fn set(&self, args: &[&str]) -> Output {
        let mut full = vec!["set", "-V", VARIABLES_FILE];
        full.extend_from_slice(args);
        self.run(&full)
    }
}
