//! Buildpack subcommand implementations
//!
//! Implements `bpack buildpack package`.

use anyhow::Result;
use tokio_util::sync::CancellationToken;

use crate::cli::output::OutputConfig;
use crate::core::buildpack_package::{package_buildpack, PackageFlags};
use crate::core::global_config::{ConfigStore, FileConfigStore};
use crate::core::package_config::TomlPackageConfigReader;
use crate::error::CommandError;
use crate::infra::dirs::BpackDirs;
use crate::infra::packager::ExternalPackager;

/// Execute the buildpack package command
///
/// Packages (a) buildpack(s) into OCI format based on a package config,
/// using the external packager named in the user configuration.
pub async fn execute_package(
    dirs: &BpackDirs,
    output: &OutputConfig,
    name: &str,
    flags: &PackageFlags,
    cancel: &CancellationToken,
) -> Result<()> {
    let store = FileConfigStore::from_dirs(dirs);
    let config = store.load().map_err(CommandError::ConfigLoad)?;
    let packager = ExternalPackager::from_config(&config);

    let outcome = package_buildpack(
        name,
        flags,
        &config,
        &TomlPackageConfigReader,
        &packager,
        cancel,
    )
    .await?;

    output.success(&outcome);
    Ok(())
}
