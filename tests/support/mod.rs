//! Test support utilities for variables integration tests.
//!
//! Provides reusable test environment setup and helper commands.

#![allow(dead_code)]

pub mod commands;
pub mod fixtures;

#[allow(unused_imports)]
pub use assertions::*;
#[allow(unused_imports)]
pub use fixtures::*;

use std::fs;
use std::path::PathBuf;

use tempfile::TempDir;
use variables::core::document::load_variables_from;
use variables::core::variable::Variables;

/// Test environment with an isolated temp directory.
///
/// Child processes run with `.current_dir()` set to it and the variables
/// environment cleared, so tests can run in parallel.
pub struct Test {
    /// Temporary directory for the test project
    pub dir: TempDir,
}

impl Test {
    /// Create a new empty test environment.
    pub fn new() -> Self {
        let dir = TempDir::new().expect("failed to create temp dir");
        Self { dir }
    }

    /// Create a test environment with `variables.yaml` holding `content`.
    pub fn with_variables(content: &str) -> Self {
        let t = Self::new();
        t.write(VARIABLES_FILE, content);
        t
    }

    /// Absolute path of `name` inside the test directory.
    pub fn path(&self, name: &str) -> PathBuf {
        self.dir.path().join(name)
    }

    /// Write `content` to `name`.
    pub fn write(&self, name: &str, content: &str) -> PathBuf {
        let path = self.path(name);
        fs::write(&path, content).expect("failed to write test file");
        path
    }

    /// Read `name` as a string.
    pub fn read(&self, name: &str) -> String {
        fs::read_to_string(self.path(name)).expect("failed to read test file")
    }

    /// Load `name` as a variables document.
    pub fn load(&self, name: &str) -> Variables {
        load_variables_from(&self.path(name)).expect("failed to load variables")
    }
}
