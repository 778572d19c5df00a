//! `pull-policy` command logic
//!
//! Reports, sets or clears the persisted pull policy. Persisted state is
//! only written after validation passes, and clearing succeeds from any
//! prior state.

use std::fmt;

use crate::core::global_config::{ConfigStore, GlobalConfig};
use crate::core::pull_policy::{resolve_effective, PullPolicy};
use crate::error::CommandError;

/// What a single `pull-policy` invocation does
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PullPolicyAction {
    /// Print the effective policy
    Report,
    /// Persist a new policy
    Set(String),
    /// Clear the persisted policy
    Unset,
    /// Positional policy and `--unset` together: validate, then clear
    SetThenUnset(String),
}

impl PullPolicyAction {
    /// Select the action from the positional argument and the `--unset` flag
    pub fn from_args(policy: Option<String>, unset: bool) -> Self {
        match (policy, unset) {
            (None, false) => Self::Report,
            (Some(policy), false) => Self::Set(policy),
            (None, true) => Self::Unset,
            (Some(policy), true) => Self::SetThenUnset(policy),
        }
    }
}

/// Result of a successful `pull-policy` invocation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PullPolicyOutcome {
    /// Effective policy reported, nothing written
    Current(PullPolicy),
    /// Requested value equals the persisted one, nothing written
    AlreadySet(String),
    /// New policy persisted
    Updated(PullPolicy),
    /// Persisted policy cleared
    Reset,
}

impl fmt::Display for PullPolicyOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Current(policy) => write!(f, "Pull policy is {policy}"),
            Self::AlreadySet(policy) => write!(f, "Pull policy is already set to {policy}"),
            Self::Updated(policy) => write!(f, "New pull policy is {policy}"),
            Self::Reset => write!(
                f,
                "Pull policy unset, defaulting to {}",
                PullPolicy::default()
            ),
        }
    }
}

/// Run one `pull-policy` invocation against an owned copy of the config
///
/// `store` is only written for `Set` (when the value changes) and for the
/// unset actions.
pub fn execute<S: ConfigStore>(
    action: PullPolicyAction,
    mut config: GlobalConfig,
    store: &S,
) -> Result<PullPolicyOutcome, CommandError> {
    match action {
        PullPolicyAction::Report => {
            let resolved =
                resolve_effective(None, config.persisted_pull_policy(), PullPolicy::default())?;
            Ok(PullPolicyOutcome::Current(resolved.policy))
        }
        PullPolicyAction::Set(requested) => {
            if config.pull_policy.as_deref() == Some(requested.as_str()) {
                tracing::debug!(policy = %requested, "Pull policy unchanged, skipping write");
                return Ok(PullPolicyOutcome::AlreadySet(requested));
            }

            let policy: PullPolicy = requested.parse()?;
            config.set_pull_policy(policy);
            store.write(&config).map_err(CommandError::ConfigWrite)?;
            tracing::info!(%policy, "Persisted pull policy");
            Ok(PullPolicyOutcome::Updated(policy))
        }
        PullPolicyAction::Unset => unset(config, store),
        PullPolicyAction::SetThenUnset(requested) => {
            let policy: PullPolicy = requested.parse()?;
            tracing::debug!(%policy, "Pull policy superseded by --unset");
            unset(config, store)
        }
    }
}

fn unset<S: ConfigStore>(
    mut config: GlobalConfig,
    store: &S,
) -> Result<PullPolicyOutcome, CommandError> {
    config.unset_pull_policy();
    store.write(&config).map_err(CommandError::ConfigWrite)?;
    tracing::info!("Cleared persisted pull policy");
    Ok(PullPolicyOutcome::Reset)
}
