//! Core resolution logic
//!
//! Turns user intent (flags and persisted settings) into validated
//! operation parameters. Collaborators with side effects are reached only
//! through the traits defined here.
//!
//! # Submodules
//!
//! - [`pull_policy`] - Pull policy type and precedence resolution
//! - [`global_config`] - Persisted user configuration and its store
//! - [`policy_command`] - `pull-policy` report/set/unset logic
//! - [`package_config`] - Package definition parsing
//! - [`buildpack_package`] - `buildpack package` option resolution

pub mod buildpack_package;
pub mod global_config;
pub mod package_config;
pub mod policy_command;
pub mod pull_policy;
