//! Global configuration management
//!
//! Reads and manages the user-level `config.toml` in the config directory.
//! The persisted settings this crate cares about are the pull policy, the
//! experimental-features flag and the external packager; every other key
//! is carried through untouched so a write never drops unrelated settings.

use crate::core::pull_policy::{non_empty, PullPolicy};
use crate::error::ConfigStoreError;
use crate::infra::dirs::BpackDirs;
use crate::infra::filesystem;
use serde::{Deserialize, Deserializer, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Persisted user configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct GlobalConfig {
    /// Persisted pull policy; `None` (or `""` on disk) means unset
    #[serde(
        default,
        deserialize_with = "empty_as_none",
        skip_serializing_if = "Option::is_none"
    )]
    pub pull_policy: Option<String>,

    /// Enable experimental features
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub experimental: bool,

    /// External packager settings
    #[serde(default, skip_serializing_if = "PackagerConfig::is_empty")]
    pub packager: PackagerConfig,

    /// Settings owned by other parts of the tool
    #[serde(flatten)]
    pub extra: toml::Table,
}

/// External packager settings
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PackagerConfig {
    /// Executable name or path
    pub program: Option<String>,

    /// Arguments placed before the `package` subcommand
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub args: Vec<String>,
}

impl PackagerConfig {
    fn is_empty(&self) -> bool {
        self.program.is_none() && self.args.is_empty()
    }
}

fn empty_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<String>::deserialize(deserializer)?;
    Ok(value.filter(|v| !v.is_empty()))
}

impl GlobalConfig {
    /// Load global configuration from a specific path
    ///
    /// A missing file yields the default configuration. A file that exists
    /// but is not valid TOML is an error.
    pub fn load_from_path(path: &Path) -> Result<Self, ConfigStoreError> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path).map_err(|e| ConfigStoreError::ReadError {
            path: path.to_path_buf(),
            error: e.to_string(),
        })?;

        toml::from_str(&content).map_err(|e| ConfigStoreError::ParseError {
            path: path.to_path_buf(),
            error: e.to_string(),
        })
    }

    /// Save global configuration to a specific path
    ///
    /// Parent directories are created as needed. The previous file is
    /// replaced only once the new content is fully on disk.
    pub fn save_to_path(&self, path: &Path) -> Result<(), ConfigStoreError> {
        let content = toml::to_string_pretty(self).map_err(|e| ConfigStoreError::WriteError {
            path: path.to_path_buf(),
            error: e.to_string(),
        })?;

        filesystem::write_file_atomic(path, &content).map_err(|e| ConfigStoreError::WriteError {
            path: path.to_path_buf(),
            error: e.to_string(),
        })
    }

    /// Persisted pull policy string, if set
    #[must_use]
    pub fn persisted_pull_policy(&self) -> Option<&str> {
        non_empty(self.pull_policy.as_deref())
    }

    /// Persist a validated pull policy
    pub fn set_pull_policy(&mut self, policy: PullPolicy) {
        self.pull_policy = Some(policy.as_str().to_string());
    }

    /// Clear the persisted pull policy
    pub fn unset_pull_policy(&mut self) {
        self.pull_policy = None;
    }

    /// Get the effective packager program
    ///
    /// Returns the configured program if set, otherwise the default.
    #[must_use]
    pub fn packager_program(&self) -> &str {
        self.packager
            .program
            .as_deref()
            .filter(|p| !p.is_empty())
            .unwrap_or(crate::config::defaults::DEFAULT_PACKAGER_PROGRAM)
    }
}

/// Durable storage for [`GlobalConfig`]
pub trait ConfigStore {
    /// Load the persisted configuration
    fn load(&self) -> Result<GlobalConfig, ConfigStoreError>;

    /// Persist the configuration, replacing what was stored
    fn write(&self, config: &GlobalConfig) -> Result<(), ConfigStoreError>;
}

/// [`ConfigStore`] backed by a TOML file
#[derive(Debug, Clone)]
pub struct FileConfigStore {
    path: PathBuf,
}

impl FileConfigStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Store at the platform config location
    pub fn from_dirs(dirs: &BpackDirs) -> Self {
        Self::new(dirs.global_config_path())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ConfigStore for FileConfigStore {
    fn load(&self) -> Result<GlobalConfig, ConfigStoreError> {
        tracing::debug!(path = %self.path.display(), "Loading config");
        GlobalConfig::load_from_path(&self.path)
    }

    fn write(&self, config: &GlobalConfig) -> Result<(), ConfigStoreError> {
        tracing::info!(path = %self.path.display(), "Writing config");
        config.save_to_path(&self.path)
    }
}
