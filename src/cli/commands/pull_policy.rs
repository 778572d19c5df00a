//! Pull policy command implementation
//!
//! Implements `bpack pull-policy [<policy>] [--unset]`.

use anyhow::Result;

use crate::cli::output::OutputConfig;
use crate::core::global_config::{ConfigStore, FileConfigStore};
use crate::core::policy_command::{self, PullPolicyAction};
use crate::error::CommandError;
use crate::infra::dirs::BpackDirs;

/// Execute the pull-policy command
pub fn execute(
    dirs: &BpackDirs,
    output: &OutputConfig,
    policy: Option<String>,
    unset: bool,
) -> Result<()> {
    let store = FileConfigStore::from_dirs(dirs);
    let config = store.load().map_err(CommandError::ConfigLoad)?;

    let action = PullPolicyAction::from_args(policy, unset);
    let outcome = policy_command::execute(action, config, &store)?;

    output.success(&outcome);
    Ok(())
}
