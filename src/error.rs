//! Error types for bpack
//!
//! Domain-specific error types using thiserror.

use std::path::PathBuf;
use thiserror::Error;

/// Pull policy parsing errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PullPolicyError {
    /// Not one of the canonical policy names
    #[error("invalid pull policy {value}")]
    Invalid { value: String },
}

/// Filesystem errors
#[derive(Error, Debug)]
pub enum FilesystemError {
    /// Failed to create directory
    #[error("Failed to create directory '{path}': {error}")]
    CreateDir { path: PathBuf, error: String },

    /// Failed to write file
    #[error("Failed to write file '{path}': {error}")]
    WriteFile { path: PathBuf, error: String },
}

/// Persisted user configuration errors
#[derive(Error, Debug)]
pub enum ConfigStoreError {
    /// Failed to read config file
    #[error("failed to read config file '{path}': {error}")]
    ReadError { path: PathBuf, error: String },

    /// Failed to parse config file
    #[error("failed to parse config file '{path}': {error}")]
    ParseError { path: PathBuf, error: String },

    /// Failed to serialize or persist config file
    #[error("failed to write config file '{path}': {error}")]
    WriteError { path: PathBuf, error: String },
}

/// Package definition (package.toml) errors
///
/// The offending path is attached by the caller.
#[derive(Error, Debug)]
pub enum PackageConfigError {
    /// File could not be read
    #[error("failed to read file: {error}")]
    ReadError { error: String },

    /// File is not valid TOML or has the wrong shape
    #[error("failed to parse package config: {error}")]
    ParseError { error: String },

    /// File parsed but violates a package definition rule
    #[error("invalid package config: {message}")]
    Invalid { message: String },
}

/// Errors reported by a packager
#[derive(Error, Debug)]
pub enum PackagerError {
    /// Requested output format is not supported
    #[error("unsupported package format '{format}': expected 'image' or 'file'")]
    UnsupportedFormat { format: String },

    /// Packager executable could not be located
    #[error("packager program '{program}' not found on PATH")]
    NotFound { program: String },

    /// Packager process could not be started
    #[error("failed to start packager '{program}': {error}")]
    Spawn { program: String, error: String },

    /// I/O failure while talking to the packager process
    #[error("packager '{program}' I/O error: {error}")]
    Io { program: String, error: String },

    /// Packager exited unsuccessfully
    #[error("packager '{program}' failed with {status}")]
    Failed { program: String, status: String },

    /// Packaging request could not be encoded
    #[error("failed to encode packaging request: {error}")]
    Encode { error: String },

    /// Packaging was interrupted
    #[error("packaging cancelled")]
    Cancelled,
}

/// Command-level errors
///
/// Every failure of `pull-policy` and `buildpack package` maps onto one of
/// these variants. None of them are retried.
#[derive(Error, Debug)]
pub enum CommandError {
    /// Unparseable policy string, from input or from the persisted config
    #[error("parsing pull policy: {0}")]
    InvalidPolicy(#[from] PullPolicyError),

    /// Mutually exclusive flags were combined
    #[error(
        "{first} and {second} cannot be used together. The --publish flag requires the use of remote images."
    )]
    ConflictingOptions {
        first: &'static str,
        second: &'static str,
    },

    /// Package definition file could not be read
    #[error("reading config '{path}': {source}")]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: PackageConfigError,
    },

    /// Persisted user configuration could not be loaded
    #[error("reading config: {0}")]
    ConfigLoad(#[source] ConfigStoreError),

    /// Persisted user configuration could not be written
    #[error("writing to config: {0}")]
    ConfigWrite(#[source] ConfigStoreError),

    /// Error from the packager, passed through unmodified
    #[error(transparent)]
    Packaging(#[from] PackagerError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_policy_names_value() {
        let err = CommandError::from(PullPolicyError::Invalid {
            value: "blah".to_string(),
        });
        assert_eq!(err.to_string(), "parsing pull policy: invalid pull policy blah");
    }

    #[test]
    fn test_conflicting_options_names_both_flags() {
        let err = CommandError::ConflictingOptions {
            first: "--publish",
            second: "--pull-policy never",
        };
        let message = err.to_string();
        assert!(message.contains("--publish"));
        assert!(message.contains("--pull-policy never"));
    }

    #[test]
    fn test_packaging_error_is_transparent() {
        let err = CommandError::from(PackagerError::Cancelled);
        assert_eq!(err.to_string(), "packaging cancelled");
    }

    #[test]
    fn test_config_read_includes_path() {
        let err = CommandError::ConfigRead {
            path: PathBuf::from("/tmp/package.toml"),
            source: PackageConfigError::ReadError {
                error: "No such file or directory".to_string(),
            },
        };
        assert!(err.to_string().contains("/tmp/package.toml"));
    }
}
