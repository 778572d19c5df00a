//! Platform-specific directory management
//!
//! Provides the location of the user configuration directory, following the
//! XDG Base Directory Specification on Linux and standard locations on macOS.
//!
//! The `BPACK_CONFIG_DIR` environment variable overrides the default.

use std::env;
use std::path::PathBuf;

use crate::config::defaults::CONFIG_FILE_NAME;

/// Environment variable overriding the config directory
pub const ENV_CONFIG_DIR: &str = "BPACK_CONFIG_DIR";

/// Application name used in directory paths
const APP_NAME: &str = "bpack";

/// Platform-specific directory provider for bpack
#[derive(Debug, Clone)]
pub struct BpackDirs {
    config_dir: PathBuf,
}

impl BpackDirs {
    /// Create a new `BpackDirs` instance
    ///
    /// Checks the environment variable first, then falls back to the platform default.
    #[must_use]
    pub fn new() -> Self {
        Self {
            config_dir: Self::resolve_config_dir(),
        }
    }

    /// Use an explicit config directory
    #[must_use]
    pub fn with_config_dir(config_dir: impl Into<PathBuf>) -> Self {
        Self {
            config_dir: config_dir.into(),
        }
    }

    /// Get the config directory path
    ///
    /// - Linux: `$XDG_CONFIG_HOME/bpack` or `~/.config/bpack`
    /// - macOS: `~/Library/Application Support/bpack`
    #[must_use]
    pub fn config_dir(&self) -> PathBuf {
        self.config_dir.clone()
    }

    /// Get the global config file path
    #[must_use]
    pub fn global_config_path(&self) -> PathBuf {
        self.config_dir.join(CONFIG_FILE_NAME)
    }

    fn resolve_config_dir() -> PathBuf {
        match env::var(ENV_CONFIG_DIR) {
            Ok(path) if !path.is_empty() => PathBuf::from(path),
            _ => Self::platform_config_dir(),
        }
    }

    fn platform_config_dir() -> PathBuf {
        dirs::config_dir()
            .map(|p| p.join(APP_NAME))
            .unwrap_or_else(|| {
                // Fallback to home directory
                dirs::home_dir()
                    .map(|h| h.join(".config").join(APP_NAME))
                    .unwrap_or_else(|| PathBuf::from(".").join(".config").join(APP_NAME))
            })
    }
}

impl Default for BpackDirs {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dirs_new_creates_instance() {
        let dirs = BpackDirs::new();
        assert!(!dirs.config_dir().as_os_str().is_empty());
    }

    #[test]
    fn test_global_config_path_is_under_config_dir() {
        let dirs = BpackDirs::new();
        assert!(dirs.global_config_path().starts_with(dirs.config_dir()));
        assert!(dirs.global_config_path().ends_with("config.toml"));
    }

    #[test]
    fn test_explicit_config_dir() {
        let dirs = BpackDirs::with_config_dir("/tmp/bpack-home");
        assert_eq!(
            dirs.global_config_path(),
            PathBuf::from("/tmp/bpack-home/config.toml")
        );
    }
}
