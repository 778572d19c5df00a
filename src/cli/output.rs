//! Output formatting
//!
//! Successful commands print exactly one line to stdout; diagnostics go to
//! stderr through `tracing` so scripts can consume stdout directly.

use std::fmt::Display;

use tracing::Level;

/// Status message prefixes
pub mod status {
    /// Error prefix (red X)
    pub const ERROR: &str = "✗";
}

/// Output preferences from the global flags
#[derive(Debug, Clone, Copy, Default)]
pub struct OutputConfig {
    quiet: bool,
    verbose: u8,
}

impl OutputConfig {
    pub fn new(quiet: bool, verbose: u8) -> Self {
        Self { quiet, verbose }
    }

    /// Most verbose tracing level to emit
    pub fn log_level(&self) -> Level {
        match self.verbose {
            0 => Level::WARN,
            1 => Level::INFO,
            _ => Level::DEBUG,
        }
    }

    /// Print the single confirmation line of a successful command
    pub fn success(&self, message: &impl Display) {
        if !self.quiet {
            println!("{message}");
        }
    }
}

/// Print a command error to stderr
pub fn display_error(error: &anyhow::Error) {
    eprintln!("{} {error}", status::ERROR);
}
