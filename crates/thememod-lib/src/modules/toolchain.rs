//! Boundary to the go toolchain
//!
//! All resolver questions ("which modules, where on disk", "fetch this one",
//! "print the requirement graph") are answered by spawning `go` through the
//! session's [`ProcessProvider`]. A missing or too old binary is remembered
//! and further invocations become no-ops for the life of the toolchain.

use crate::application::session::{ProcessError, ProcessProvider};
use crate::modules::resolved::{ResolvedPackage, parse_resolved_stream};
use std::cell::Cell;
use std::path::{Path, PathBuf};
use thiserror::Error;

pub const GO_BINARY: &str = "go";

/// Printed by old go versions that do not know the module flags
const TOO_OLD_MARKER: &str = "flag provided but not defined";

/// Errors from the go toolchain boundary
#[derive(Debug, Error)]
pub enum ToolchainError {
    #[error("go command failed: {command}\n{stderr}")]
    CommandFailed { command: String, stderr: String },

    #[error("failed to execute '{command}': {reason}")]
    Spawn { command: String, reason: String },

    #[error("failed to decode modules list: {reason}")]
    Decode { reason: String },

    #[error("failed to init module '{path}': {reason}")]
    Init { path: String, reason: String },
}

/// Availability of the go binary as observed so far
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToolchainStatus {
    Ok,
    NotFound,
    TooOld,
}

impl ToolchainStatus {
    pub fn is_degraded(&self) -> bool {
        !matches!(self, ToolchainStatus::Ok)
    }
}

/// go invocations scoped to one project directory
pub struct ModuleToolchain<'a> {
    process: &'a dyn ProcessProvider,
    workdir: PathBuf,
    environ: Vec<(String, String)>,
    status: Cell<ToolchainStatus>,
}

impl<'a> ModuleToolchain<'a> {
    pub fn new(process: &'a dyn ProcessProvider, workdir: &Path, proxy: &str) -> Self {
        let environ = vec![
            ("PWD".to_string(), workdir.display().to_string()),
            ("GOPROXY".to_string(), proxy.to_string()),
        ];

        Self {
            process,
            workdir: workdir.to_path_buf(),
            environ,
            status: Cell::new(ToolchainStatus::Ok),
        }
    }

    pub fn status(&self) -> ToolchainStatus {
        self.status.get()
    }

    /// Variables set on every invocation
    pub fn environ(&self) -> &[(String, String)] {
        &self.environ
    }

    /// Download and list every module in the build list
    pub fn list_resolved(&self) -> Result<Vec<ResolvedPackage>, ToolchainError> {
        self.run(&["mod", "download"])?;
        let output = self.run(&["list", "-m", "-json", "all"])?;

        let packages = parse_resolved_stream(&output).map_err(|e| ToolchainError::Decode {
            reason: e.to_string(),
        })?;
        tracing::debug!(count = packages.len(), "listed resolved modules");
        Ok(packages)
    }

    /// `go get <path>`; adds the module to the manifest and the module cache
    pub fn fetch(&self, path: &str) -> Result<(), ToolchainError> {
        tracing::info!(path, "fetching module");
        self.run(&["get", path]).map(|_| ())
    }

    /// Raw `go mod graph` output, one `from to@version` edge per line
    pub fn dependency_graph(&self) -> Result<String, ToolchainError> {
        self.run(&["mod", "graph"])
    }

    /// `go mod init <path>`
    pub fn init(&self, path: &str) -> Result<(), ToolchainError> {
        self.run(&["mod", "init", path]).map_err(|e| ToolchainError::Init {
            path: path.to_string(),
            reason: e.to_string(),
        })?;

        match self.status() {
            ToolchainStatus::Ok => Ok(()),
            ToolchainStatus::NotFound => Err(ToolchainError::Init {
                path: path.to_string(),
                reason: "go binary not found".to_string(),
            }),
            ToolchainStatus::TooOld => Err(ToolchainError::Init {
                path: path.to_string(),
                reason: "go binary does not support modules".to_string(),
            }),
        }
    }

    /// Run go and return stdout. Returns empty output once the binary is
    /// known to be missing or too old.
    fn run(&self, args: &[&str]) -> Result<String, ToolchainError> {
        if self.status().is_degraded() {
            tracing::trace!(?args, status = ?self.status(), "skipping go invocation");
            return Ok(String::new());
        }

        let command = format!("{} {}", GO_BINARY, args.join(" "));
        tracing::debug!(command = %command, dir = %self.workdir.display(), "running go");

        let output = match self
            .process
            .execute(GO_BINARY, args, &self.workdir, &self.environ)
        {
            Ok(output) => output,
            Err(ProcessError::NotFound { .. }) => {
                tracing::warn!("go binary not found; module resolution disabled");
                self.status.set(ToolchainStatus::NotFound);
                return Ok(String::new());
            }
            Err(e) => {
                return Err(ToolchainError::Spawn {
                    command,
                    reason: e.to_string(),
                });
            }
        };

        if !output.success {
            if output.stderr.contains(TOO_OLD_MARKER) {
                tracing::warn!("go binary too old; module resolution disabled");
                self.status.set(ToolchainStatus::TooOld);
                return Ok(String::new());
            }
            return Err(ToolchainError::CommandFailed {
                command,
                stderr: output.stderr.trim_end().to_string(),
            });
        }

        Ok(output.stdout)
    }
}

#[cfg(test)]
mod tests {
    include!("toolchain.test.rs");
}
