//! Pull policy type and precedence resolution
//!
//! A pull policy controls whether remote image references are fetched
//! before use. The effective policy for an operation is resolved with
//! priority: explicit input > persisted configuration > default.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::error::PullPolicyError;

/// When to fetch remote images
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum PullPolicy {
    /// Always fetch the latest image
    #[default]
    Always,
    /// Only use images already available locally
    Never,
    /// Fetch only when no local copy exists
    IfNotPresent,
}

impl PullPolicy {
    /// Every policy, in the order they are documented
    pub const ALL: [Self; 3] = [Self::Always, Self::Never, Self::IfNotPresent];

    /// Canonical string form
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Always => "always",
            Self::Never => "never",
            Self::IfNotPresent => "if-not-present",
        }
    }
}

impl fmt::Display for PullPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PullPolicy {
    type Err = PullPolicyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|policy| policy.as_str() == s)
            .ok_or_else(|| PullPolicyError::Invalid {
                value: s.to_string(),
            })
    }
}

/// Where an effective pull policy came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PolicySource {
    /// Given on the command line
    Explicit,
    /// Read from the persisted user configuration
    Persisted,
    /// Nothing set; built-in default
    Default,
}

/// Effective pull policy with its source
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolvedPullPolicy {
    pub policy: PullPolicy,
    pub source: PolicySource,
}

/// Treat an empty string as "not set"
pub fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}

/// Resolve the effective pull policy: explicit > persisted > default
///
/// Empty strings count as absent. The first present tier is parsed; a parse
/// failure names the offending string rather than falling through to the
/// next tier.
pub fn resolve_effective(
    explicit: Option<&str>,
    persisted: Option<&str>,
    default: PullPolicy,
) -> Result<ResolvedPullPolicy, PullPolicyError> {
    let resolved = if let Some(value) = non_empty(explicit) {
        ResolvedPullPolicy {
            policy: value.parse()?,
            source: PolicySource::Explicit,
        }
    } else if let Some(value) = non_empty(persisted) {
        ResolvedPullPolicy {
            policy: value.parse()?,
            source: PolicySource::Persisted,
        }
    } else {
        ResolvedPullPolicy {
            policy: default,
            source: PolicySource::Default,
        }
    };

    tracing::debug!(
        policy = %resolved.policy,
        source = ?resolved.source,
        "Resolved pull policy"
    );
    Ok(resolved)
}
