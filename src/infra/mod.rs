//! Infrastructure layer
//!
//! Handles filesystem access, platform directories and external processes.

pub mod dirs;
pub mod filesystem;
pub mod packager;
