//! Package definition handling
//!
//! A package definition (`package.toml`) names the buildpack to package,
//! any buildpacks or images it depends on, and the target platform.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::config::defaults::{DEFAULT_BUILDPACK_URI, DEFAULT_PLATFORM_OS, SUPPORTED_PLATFORM_OS};
use crate::error::PackageConfigError;

/// Complete package definition
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct PackageDefinition {
    /// Buildpack to package
    #[serde(default)]
    pub buildpack: BuildpackUri,

    /// Buildpacks or images bundled alongside
    #[serde(default)]
    pub dependencies: Vec<Dependency>,

    /// Target platform
    #[serde(default)]
    pub platform: Platform,
}

/// Location of a buildpack
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct BuildpackUri {
    #[serde(default)]
    pub uri: String,
}

/// Dependency entry - exactly one of `uri` or `image`
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct Dependency {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uri: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

/// Target platform
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct Platform {
    #[serde(default)]
    pub os: String,
}

impl Default for PackageDefinition {
    /// Definition used when no package config is given: the buildpack in
    /// the current directory, built for Linux.
    fn default() -> Self {
        Self {
            buildpack: BuildpackUri {
                uri: DEFAULT_BUILDPACK_URI.to_string(),
            },
            dependencies: Vec::new(),
            platform: Platform {
                os: DEFAULT_PLATFORM_OS.to_string(),
            },
        }
    }
}

impl PackageDefinition {
    /// Parse and validate a package definition
    ///
    /// Relative local URIs are resolved against `base_dir`.
    pub fn from_toml(content: &str, base_dir: &Path) -> Result<Self, PackageConfigError> {
        let mut definition: Self =
            toml::from_str(content).map_err(|e| PackageConfigError::ParseError {
                error: e.to_string(),
            })?;

        if definition.buildpack.uri.is_empty() {
            return Err(PackageConfigError::Invalid {
                message: "missing 'buildpack.uri' configuration".to_string(),
            });
        }

        if definition.platform.os.is_empty() {
            definition.platform.os = DEFAULT_PLATFORM_OS.to_string();
        }
        if !SUPPORTED_PLATFORM_OS.contains(&definition.platform.os.as_str()) {
            return Err(PackageConfigError::Invalid {
                message: format!(
                    "invalid 'platform.os' configuration: only {:?} are permitted, found '{}'",
                    SUPPORTED_PLATFORM_OS, definition.platform.os
                ),
            });
        }

        for dependency in &definition.dependencies {
            match (dependency.uri.as_deref(), dependency.image.as_deref()) {
                (Some(uri), Some(image)) => {
                    return Err(PackageConfigError::Invalid {
                        message: format!(
                            "dependency configured with both 'uri' ({uri}) and 'image' ({image})"
                        ),
                    });
                }
                (None, None) => {
                    return Err(PackageConfigError::Invalid {
                        message: "dependency configured with neither 'uri' nor 'image'"
                            .to_string(),
                    });
                }
                _ => {}
            }
        }

        definition.buildpack.uri = resolve_local_uri(&definition.buildpack.uri, base_dir);
        for dependency in &mut definition.dependencies {
            if let Some(uri) = dependency.uri.as_mut() {
                *uri = resolve_local_uri(uri, base_dir);
            }
        }

        Ok(definition)
    }
}

/// Anchor a relative filesystem URI at `base_dir`; leave URLs and absolute paths alone
fn resolve_local_uri(uri: &str, base_dir: &Path) -> String {
    if uri.contains("://") || Path::new(uri).is_absolute() {
        return uri.to_string();
    }
    base_dir.join(uri).display().to_string()
}

/// Reads package definitions from disk
pub trait PackageConfigReader {
    fn read(&self, path: &Path) -> Result<PackageDefinition, PackageConfigError>;
}

/// [`PackageConfigReader`] for `package.toml` files
#[derive(Debug, Clone, Copy, Default)]
pub struct TomlPackageConfigReader;

impl PackageConfigReader for TomlPackageConfigReader {
    fn read(&self, path: &Path) -> Result<PackageDefinition, PackageConfigError> {
        tracing::debug!(path = %path.display(), "Reading package config");
        let content = std::fs::read_to_string(path).map_err(|e| PackageConfigError::ReadError {
            error: e.to_string(),
        })?;
        let base_dir = path.parent().unwrap_or_else(|| Path::new("."));
        PackageDefinition::from_toml(&content, base_dir)
    }
}
