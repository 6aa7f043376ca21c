//! Command session architecture
//!
//! Implements the Session-Scoped Dependency Injection Pattern.
//! Each command execution creates a session that owns all ephemeral state.

use crate::Result;
use crate::application::config::AppConfig;
use crate::display::{DisplayProvider, LiveDisplayProvider};
use anyhow::Context;
use std::env;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Provider trait for filesystem operations
pub trait FileSystemProvider {
    /// Get current working directory
    fn current_dir(&self) -> Result<PathBuf>;

    /// Read entire file contents as string
    fn read_to_string(&self, path: &Path) -> Result<String>;

    /// Write string content to file
    fn write_file(&self, path: &Path, content: &str) -> Result<()>;

    /// Check if path exists
    fn exists(&self, path: &Path) -> bool;

    /// Check if path is a directory
    fn is_directory(&self, path: &Path) -> bool;

    /// Create directory and all parent directories
    fn create_dir_all(&self, path: &Path) -> Result<()>;

    /// Remove a directory and all its contents
    fn remove_dir_all(&self, path: &Path) -> std::result::Result<(), io::Error>;

    /// Recursively copy `from` into `to`.
    ///
    /// `keep_dir` receives every directory path relative to `from` and decides
    /// whether that directory (and everything below it) is copied. Regular
    /// files are always copied once their parent directory is kept.
    fn copy_dir_filtered(
        &self,
        from: &Path,
        to: &Path,
        keep_dir: &dyn Fn(&Path) -> bool,
    ) -> std::result::Result<(), io::Error>;
}

/// Process execution output
#[derive(Debug, Clone)]
pub struct ProcessOutput {
    pub stdout: String,
    pub stderr: String,
    pub success: bool,
}

/// Reasons a process could not be started at all
#[derive(Debug, Error)]
pub enum ProcessError {
    #[error("executable '{command}' not found in PATH")]
    NotFound { command: String },

    #[error("failed to execute '{command}': {source}")]
    Spawn {
        command: String,
        #[source]
        source: io::Error,
    },
}

/// Provider trait for process execution
pub trait ProcessProvider {
    /// Execute a command with given arguments in working directory.
    ///
    /// `env` entries are set on top of the inherited environment.
    fn execute(
        &self,
        command: &str,
        args: &[&str],
        working_dir: &Path,
        env: &[(String, String)],
    ) -> std::result::Result<ProcessOutput, ProcessError>;
}

/// Provider trait for configuration access
pub trait ConfigProvider {
    /// Get the application configuration
    fn app_config(&self) -> &AppConfig;
}

/// Session trait that both CommandSession and MockCommandSession can implement
pub trait Session {
    /// Get the display provider for this session
    fn display(&self) -> &dyn DisplayProvider;

    /// Get the filesystem provider for this session
    fn filesystem(&self) -> &dyn FileSystemProvider;

    /// Get the process provider for this session
    fn process(&self) -> &dyn ProcessProvider;

    /// Get the config provider for this session
    fn config(&self) -> &dyn ConfigProvider;

    /// Project directory: the configured workdir, else the current directory
    fn workdir(&self) -> Result<PathBuf> {
        match &self.config().app_config().workdir {
            Some(dir) => Ok(dir.clone()),
            None => self.filesystem().current_dir(),
        }
    }
}

/// Live implementation of FileSystemProvider
pub struct LiveFileSystemProvider;

impl FileSystemProvider for LiveFileSystemProvider {
    fn current_dir(&self) -> Result<PathBuf> {
        env::current_dir().context("Failed to get current directory")
    }

    fn read_to_string(&self, path: &Path) -> Result<String> {
        fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))
    }

    fn write_file(&self, path: &Path, content: &str) -> Result<()> {
        fs::write(path, content).with_context(|| format!("Failed to write {}", path.display()))
    }

    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }

    fn is_directory(&self, path: &Path) -> bool {
        path.is_dir()
    }

    fn create_dir_all(&self, path: &Path) -> Result<()> {
        fs::create_dir_all(path)
            .with_context(|| format!("Failed to create directory {}", path.display()))
    }

    fn remove_dir_all(&self, path: &Path) -> std::result::Result<(), io::Error> {
        fs::remove_dir_all(path)
    }

    fn copy_dir_filtered(
        &self,
        from: &Path,
        to: &Path,
        keep_dir: &dyn Fn(&Path) -> bool,
    ) -> std::result::Result<(), io::Error> {
        copy_tree(from, to, Path::new(""), keep_dir)
    }
}

fn copy_tree(
    root: &Path,
    to: &Path,
    relative: &Path,
    keep_dir: &dyn Fn(&Path) -> bool,
) -> std::result::Result<(), io::Error> {
    fs::create_dir_all(to.join(relative))?;

    for entry in fs::read_dir(root.join(relative))? {
        let entry = entry?;
        let rel = relative.join(entry.file_name());

        if entry.file_type()?.is_dir() {
            if keep_dir(&rel) {
                copy_tree(root, to, &rel, keep_dir)?;
            }
        } else {
            fs::copy(entry.path(), to.join(&rel))?;
        }
    }

    Ok(())
}

/// Live implementation of ProcessProvider
pub struct LiveProcessProvider {
    /// Custom PATH override for hermetic testing
    custom_path: Option<String>,
}

impl LiveProcessProvider {
    /// Create a new LiveProcessProvider with system PATH
    pub fn new() -> Self {
        Self { custom_path: None }
    }

    /// Create a LiveProcessProvider with custom PATH for hermetic testing
    pub fn with_custom_path(path: String) -> Self {
        Self {
            custom_path: Some(path),
        }
    }

    /// Prepend a test bin directory to the inherited PATH
    pub fn new_for_test(test_bin_path: Option<String>) -> Self {
        match test_bin_path {
            Some(bin_path) => {
                let current_path = env::var("PATH").unwrap_or_default();
                let separator = if cfg!(windows) { ";" } else { ":" };
                Self::with_custom_path(format!("{}{}{}", bin_path, separator, current_path))
            }
            None => Self::new(),
        }
    }
}

impl Default for LiveProcessProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl ProcessProvider for LiveProcessProvider {
    fn execute(
        &self,
        command: &str,
        args: &[&str],
        working_dir: &Path,
        env: &[(String, String)],
    ) -> std::result::Result<ProcessOutput, ProcessError> {
        let mut cmd = std::process::Command::new(command);
        cmd.args(args).current_dir(working_dir);

        if let Some(custom_path) = &self.custom_path {
            cmd.env("PATH", custom_path);
        }
        for (key, value) in env {
            cmd.env(key, value);
        }

        tracing::trace!(command, ?args, dir = %working_dir.display(), "spawning");

        let output = cmd.output().map_err(|e| {
            if e.kind() == io::ErrorKind::NotFound {
                ProcessError::NotFound {
                    command: command.to_string(),
                }
            } else {
                ProcessError::Spawn {
                    command: command.to_string(),
                    source: e,
                }
            }
        })?;

        Ok(ProcessOutput {
            stdout: String::from_utf8_lossy(&output.stdout).to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).to_string(),
            success: output.status.success(),
        })
    }
}

/// Live implementation of ConfigProvider
pub struct LiveConfigProvider {
    app_config: AppConfig,
}

impl LiveConfigProvider {
    pub fn new(app_config: AppConfig) -> Self {
        Self { app_config }
    }
}

impl ConfigProvider for LiveConfigProvider {
    fn app_config(&self) -> &AppConfig {
        &self.app_config
    }
}

/// CommandSession owns all ephemeral state for a single command execution
pub struct CommandSession<F, P, C>
where
    F: FileSystemProvider,
    P: ProcessProvider,
    C: ConfigProvider,
{
    /// Display provider for this session
    display_provider: LiveDisplayProvider,
    /// Filesystem operations provider
    filesystem_provider: F,
    /// Process execution provider
    process_provider: P,
    /// Configuration provider
    config_provider: C,
}

impl CommandSession<LiveFileSystemProvider, LiveProcessProvider, LiveConfigProvider> {
    /// Create a new command session with owned state (production composition)
    pub fn new(app_config: AppConfig) -> Self {
        let color = app_config.color.enabled();
        let _ = crate::logger::Logger::init(app_config.to_logger_config());

        Self {
            display_provider: LiveDisplayProvider::new(color),
            filesystem_provider: LiveFileSystemProvider,
            process_provider: LiveProcessProvider::new(),
            config_provider: LiveConfigProvider::new(app_config),
        }
    }
}

impl<F, P, C> CommandSession<F, P, C>
where
    F: FileSystemProvider,
    P: ProcessProvider,
    C: ConfigProvider,
{
    /// Create a new generic command session with custom providers (for testing)
    #[cfg(any(test, feature = "test-utils"))]
    pub fn new_with_providers(filesystem_provider: F, process_provider: P, config_provider: C) -> Self {
        Self {
            display_provider: LiveDisplayProvider::new(false),
            filesystem_provider,
            process_provider,
            config_provider,
        }
    }
}

impl<F, P, C> Session for CommandSession<F, P, C>
where
    F: FileSystemProvider,
    P: ProcessProvider,
    C: ConfigProvider,
{
    fn display(&self) -> &dyn DisplayProvider {
        &self.display_provider
    }

    fn filesystem(&self) -> &dyn FileSystemProvider {
        &self.filesystem_provider
    }

    fn process(&self) -> &dyn ProcessProvider {
        &self.process_provider
    }

    fn config(&self) -> &dyn ConfigProvider {
        &self.config_provider
    }
}

#[cfg(test)]
mod tests {
    include!("session.test.rs");
}
