//! `buildpack package` logic
//!
//! Merges command-line flags, the persisted configuration and the package
//! definition into one [`PackageOptions`] value, then hands it to a
//! [`Packager`]. Every step before the packager call is free of side
//! effects, so a validation failure never starts partial packaging work.

use std::fmt;
use std::path::PathBuf;

use serde::Serialize;
use tokio_util::sync::CancellationToken;

use crate::core::global_config::GlobalConfig;
use crate::core::package_config::{PackageConfigReader, PackageDefinition};
use crate::core::pull_policy::{resolve_effective, PullPolicy};
use crate::error::{CommandError, PackagerError};

/// Raw `buildpack package` flags
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PackageFlags {
    /// `--config`: path to the package definition
    pub config_path: Option<PathBuf>,
    /// `--format`: passed through to the packager, empty means its default
    pub format: String,
    /// `--publish`
    pub publish: bool,
    /// `--pull-policy`
    pub pull_policy: Option<String>,
}

/// Fully resolved packaging request
///
/// Only produced by [`resolve_package_options`]; read-only afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PackageOptions {
    name: String,
    format: String,
    definition: PackageDefinition,
    publish: bool,
    pull_policy: PullPolicy,
}

impl PackageOptions {
    pub(crate) fn new(
        name: impl Into<String>,
        format: impl Into<String>,
        definition: PackageDefinition,
        publish: bool,
        pull_policy: PullPolicy,
    ) -> Self {
        Self {
            name: name.into(),
            format: format.into(),
            definition,
            publish,
            pull_policy,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn format(&self) -> &str {
        &self.format
    }

    pub fn definition(&self) -> &PackageDefinition {
        &self.definition
    }

    pub fn publish(&self) -> bool {
        self.publish
    }

    pub fn pull_policy(&self) -> PullPolicy {
        self.pull_policy
    }
}

/// Builds a package artifact from resolved options
///
/// The cancellation token comes from the caller and must be honoured, not
/// replaced. Errors are reported as-is and never retried.
#[allow(async_fn_in_trait)]
pub trait Packager {
    async fn package(
        &self,
        cancel: &CancellationToken,
        options: &PackageOptions,
    ) -> Result<(), PackagerError>;
}

/// Reject `--publish` together with `--pull-policy never`
///
/// Checked against the raw flag: a persisted `never` does not conflict.
pub fn validate_flags(flags: &PackageFlags) -> Result<(), CommandError> {
    if flags.publish && flags.pull_policy.as_deref() == Some(PullPolicy::Never.as_str()) {
        return Err(CommandError::ConflictingOptions {
            first: "--publish",
            second: "--pull-policy never",
        });
    }
    Ok(())
}

/// Validate and merge packaging inputs
///
/// Order: flag conflicts, pull policy (flag > persisted > `always`),
/// package definition (file or built-in default), assembly.
pub fn resolve_package_options<R: PackageConfigReader>(
    name: &str,
    flags: &PackageFlags,
    config: &GlobalConfig,
    reader: &R,
) -> Result<PackageOptions, CommandError> {
    validate_flags(flags)?;

    let resolved = resolve_effective(
        flags.pull_policy.as_deref(),
        config.persisted_pull_policy(),
        PullPolicy::default(),
    )?;

    let definition = match &flags.config_path {
        None => {
            tracing::debug!("No package config given, using default definition");
            PackageDefinition::default()
        }
        Some(path) => reader
            .read(path)
            .map_err(|source| CommandError::ConfigRead {
                path: path.clone(),
                source,
            })?,
    };

    Ok(PackageOptions::new(
        name,
        flags.format.clone(),
        definition,
        flags.publish,
        resolved.policy,
    ))
}

/// Result of a successful `buildpack package`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackageOutcome {
    pub name: String,
    pub published: bool,
}

impl fmt::Display for PackageOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let action = if self.published { "published" } else { "created" };
        write!(f, "Successfully {action} package '{}'", self.name)
    }
}

/// Resolve options and package the buildpack
pub async fn package_buildpack<R, P>(
    name: &str,
    flags: &PackageFlags,
    config: &GlobalConfig,
    reader: &R,
    packager: &P,
    cancel: &CancellationToken,
) -> Result<PackageOutcome, CommandError>
where
    R: PackageConfigReader,
    P: Packager,
{
    let options = resolve_package_options(name, flags, config, reader)?;

    tracing::info!(
        name = options.name(),
        format = options.format(),
        publish = options.publish(),
        pull_policy = %options.pull_policy(),
        "Packaging buildpack"
    );
    packager.package(cancel, &options).await?;

    Ok(PackageOutcome {
        name: options.name().to_string(),
        published: options.publish(),
    })
}
