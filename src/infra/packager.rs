//! External packager process
//!
//! Artifact construction is delegated to a separate executable. It is
//! invoked as `<program> [args...] package <name>` with the resolved
//! [`PackageOptions`] as JSON on stdin, and inherits stdout/stderr so its
//! progress output reaches the user directly.

use std::process::Stdio;

use tokio::io::AsyncWriteExt;
use tokio::process::Command;
use tokio_util::sync::CancellationToken;

use crate::config::defaults::PACKAGE_FORMATS;
use crate::core::buildpack_package::{PackageOptions, Packager};
use crate::core::global_config::GlobalConfig;
use crate::error::PackagerError;

/// [`Packager`] that runs an external program
#[derive(Debug, Clone)]
pub struct ExternalPackager {
    program: String,
    args: Vec<String>,
}

impl ExternalPackager {
    pub fn new(program: impl Into<String>, args: Vec<String>) -> Self {
        Self {
            program: program.into(),
            args,
        }
    }

    /// Packager named by the `[packager]` section of the user config
    pub fn from_config(config: &GlobalConfig) -> Self {
        Self::new(config.packager_program(), config.packager.args.clone())
    }

    fn io_error(&self, e: &std::io::Error) -> PackagerError {
        PackagerError::Io {
            program: self.program.clone(),
            error: e.to_string(),
        }
    }
}

/// Accept the packager's formats; empty selects its default
fn validate_format(format: &str) -> Result<(), PackagerError> {
    if format.is_empty() || PACKAGE_FORMATS.contains(&format) {
        Ok(())
    } else {
        Err(PackagerError::UnsupportedFormat {
            format: format.to_string(),
        })
    }
}

impl Packager for ExternalPackager {
    async fn package(
        &self,
        cancel: &CancellationToken,
        options: &PackageOptions,
    ) -> Result<(), PackagerError> {
        validate_format(options.format())?;

        let program = which::which(&self.program).map_err(|_| PackagerError::NotFound {
            program: self.program.clone(),
        })?;
        let request = serde_json::to_vec(options).map_err(|e| PackagerError::Encode {
            error: e.to_string(),
        })?;

        tracing::debug!(program = %program.display(), args = ?self.args, "Starting packager");
        let mut child = Command::new(&program)
            .args(&self.args)
            .arg("package")
            .arg(options.name())
            .stdin(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| PackagerError::Spawn {
                program: self.program.clone(),
                error: e.to_string(),
            })?;

        if let Some(mut stdin) = child.stdin.take() {
            match stdin.write_all(&request).await {
                Ok(()) => {}
                // The packager is free to ignore the request body
                Err(e) if e.kind() == std::io::ErrorKind::BrokenPipe => {
                    tracing::debug!("Packager closed stdin before reading the request");
                }
                Err(e) => return Err(self.io_error(&e)),
            }
        }

        let status = tokio::select! {
            status = child.wait() => status.map_err(|e| self.io_error(&e))?,
            () = cancel.cancelled() => {
                tracing::warn!(program = %self.program, "Packaging cancelled, stopping packager");
                if let Err(e) = child.kill().await {
                    tracing::warn!(error = %e, "Failed to stop packager");
                }
                return Err(PackagerError::Cancelled);
            }
        };

        if status.success() {
            Ok(())
        } else {
            Err(PackagerError::Failed {
                program: self.program.clone(),
                status: status.to_string(),
            })
        }
    }
}
