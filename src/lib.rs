//! bpack - buildpack packaging with a persisted pull policy
//!
//! This library resolves user intent (command-line flags and the persisted
//! user configuration) into validated operation parameters, and hands the
//! result to external collaborators.
//!
//! # Architecture
//!
//! - [`cli`] - Command-line interface parsing and output formatting
//! - [`core`] - Resolution and validation logic, plus the collaborator traits
//! - [`infra`] - Filesystem, directory and process implementations
//! - [`config`] - Configuration constants
//! - [`error`] - Error types and handling

pub mod cli;
pub mod config;
pub mod core;
pub mod error;
pub mod infra;

#[cfg(test)]
pub mod test_utils;
