//! CLI command implementations
//!
//! Each command is implemented in its own submodule.

pub mod buildpack;
pub mod pull_policy;

use std::path::PathBuf;

use anyhow::Result;
use clap::Subcommand;
use tokio_util::sync::CancellationToken;

use crate::cli::output::OutputConfig;
use crate::core::buildpack_package::PackageFlags;
use crate::infra::dirs::BpackDirs;

/// Available CLI commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Show, set or unset the global pull policy
    PullPolicy {
        /// New pull policy: always, never or if-not-present
        #[arg(value_name = "POLICY")]
        policy: Option<String>,

        /// Unset the pull policy, reverting to the default (always)
        #[arg(short, long)]
        unset: bool,
    },

    /// Interact with buildpacks
    #[command(visible_alias = "buildpacks")]
    Buildpack {
        #[command(subcommand)]
        command: BuildpackCommands,
    },
}

/// Buildpack subcommands
#[derive(Subcommand, Debug)]
pub enum BuildpackCommands {
    /// Package buildpack in OCI format
    #[command(after_help = "Example: bpack buildpack package my-buildpack --config ./package.toml")]
    Package {
        /// Name of the resulting image or file
        name: String,

        /// Path to package TOML config
        #[arg(short, long, value_name = "PATH")]
        config: Option<PathBuf>,

        /// Format to save package as ("image" or "file")
        #[arg(short, long)]
        format: Option<String>,

        /// Publish to registry (applies to "--format=image" only)
        #[arg(long)]
        publish: bool,

        /// Pull policy to use: always, never or if-not-present (default: always)
        #[arg(long, value_name = "POLICY")]
        pull_policy: Option<String>,
    },
}

impl Commands {
    /// Execute the command
    pub async fn run(
        self,
        dirs: &BpackDirs,
        output: &OutputConfig,
        cancel: CancellationToken,
    ) -> Result<()> {
        match self {
            Self::PullPolicy { policy, unset } => pull_policy::execute(dirs, output, policy, unset),
            Self::Buildpack { command } => match command {
                BuildpackCommands::Package {
                    name,
                    config,
                    format,
                    publish,
                    pull_policy,
                } => {
                    let flags = PackageFlags {
                        config_path: config,
                        format: format.unwrap_or_default(),
                        publish,
                        pull_policy,
                    };
                    buildpack::execute_package(dirs, output, &name, &flags, &cancel).await
                }
            },
        }
    }
}
