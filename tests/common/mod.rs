//! Common test utilities and helpers
//!
//! This module provides shared utilities for integration tests.

#![allow(dead_code)]

use std::path::PathBuf;
use std::process::{Command, Output};
use tempfile::TempDir;

/// Isolated bpack environment
///
/// Points `BPACK_CONFIG_DIR` at a temporary directory so tests never touch
/// the real user configuration.
pub struct TestHome {
    /// Temporary directory holding config.toml and any test files
    pub dir: TempDir,
}

impl TestHome {
    /// Create a new empty environment
    pub fn new() -> Self {
        Self {
            dir: TempDir::new().expect("Failed to create temp directory"),
        }
    }

    /// Get the path to the environment directory
    pub fn path(&self) -> PathBuf {
        self.dir.path().to_path_buf()
    }

    /// Path of the persisted config file
    pub fn config_path(&self) -> PathBuf {
        self.dir.path().join("config.toml")
    }

    /// Write the persisted config file
    pub fn write_config(&self, content: &str) {
        std::fs::write(self.config_path(), content).expect("Failed to write config");
    }

    /// Read the persisted config file, empty if missing
    pub fn read_config(&self) -> String {
        std::fs::read_to_string(self.config_path()).unwrap_or_default()
    }

    /// Create a file in the environment
    pub fn create_file(&self, name: &str, content: &str) -> PathBuf {
        let path = self.dir.path().join(name);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).expect("Failed to create parent directories");
        }
        std::fs::write(&path, content).expect("Failed to write file");
        path
    }

    /// Check if a file exists in the environment
    pub fn file_exists(&self, name: &str) -> bool {
        self.dir.path().join(name).exists()
    }

    /// Read a file from the environment
    pub fn read_file(&self, name: &str) -> String {
        std::fs::read_to_string(self.dir.path().join(name)).expect("Failed to read file")
    }

    /// Run bpack with the given arguments
    pub fn run(&self, args: &[&str]) -> Output {
        let mut cmd = Command::new(env!("CARGO_BIN_EXE_bpack"));
        cmd.current_dir(self.path());
        cmd.env("BPACK_CONFIG_DIR", self.path());
        cmd.env_remove("RUST_LOG");
        for arg in args {
            cmd.arg(arg);
        }
        cmd.output().expect("Failed to execute bpack")
    }
}

impl Default for TestHome {
    fn default() -> Self {
        Self::new()
    }
}

/// Stdout of a finished command, trimmed
pub fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).trim().to_string()
}

/// Stderr of a finished command
pub fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).to_string()
}

/// Sample package definition TOML for testing
pub const SAMPLE_PACKAGE: &str = r#"
[buildpack]
uri = "buildpacks/hello"

[[dependencies]]
image = "registry.example.com/deps/base:1.0"

[platform]
os = "linux"
"#;
