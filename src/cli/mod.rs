//! Command-line interface module
//!
//! This module handles argument parsing and output formatting.
//! It contains no resolution logic - that belongs in the [`crate::core`] module.

pub mod commands;
pub mod output;

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use tokio_util::sync::CancellationToken;

use crate::infra::dirs::{BpackDirs, ENV_CONFIG_DIR};
use commands::Commands;
use output::OutputConfig;

/// bpack - package buildpacks and manage the pull policy
///
/// Packages buildpacks into OCI images or files, and persists the policy
/// controlling when remote images are pulled.
#[derive(Parser, Debug)]
#[command(name = "bpack")]
#[command(author, version, about, long_about = None)]
#[command(long_version = concat!(
    env!("CARGO_PKG_VERSION"),
    " (",
    env!("VERGEN_GIT_SHA"),
    ", ",
    env!("VERGEN_CARGO_TARGET_TRIPLE"),
    ")"
))]
#[command(propagate_version = true)]
pub struct Cli {
    /// Enable verbose output (-v for info, -vv for debug)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Directory holding config.toml
    #[arg(long, env = ENV_CONFIG_DIR, value_name = "DIR", global = true)]
    pub config_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

impl Cli {
    /// Execute the CLI command
    pub async fn run(self, output: &OutputConfig, cancel: CancellationToken) -> Result<()> {
        if let Some(cmd) = self.command {
            let dirs = self
                .config_dir
                .map_or_else(BpackDirs::new, BpackDirs::with_config_dir);
            cmd.run(&dirs, output, cancel).await
        } else {
            // No subcommand provided, show help
            use clap::CommandFactory;
            let mut cmd = Self::command();
            cmd.print_help()?;
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from(["bpack", "pull-policy", "-vv", "--quiet"]).unwrap();
        assert_eq!(cli.verbose, 2);
        assert!(cli.quiet);
    }

    #[test]
    fn test_config_dir_flag() {
        let cli =
            Cli::try_parse_from(["bpack", "--config-dir", "/tmp/bpack", "pull-policy"]).unwrap();
        assert_eq!(cli.config_dir, Some(PathBuf::from("/tmp/bpack")));
    }
}
