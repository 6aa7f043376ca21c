//! Temporary directory fixtures
//!
//! Each fixture owns a fresh directory that is removed on drop, with helpers
//! for laying out site projects and theme folders.

use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

type FixtureResult<T> = Result<T, Box<dyn std::error::Error>>;

/// Temporary directory fixture with automatic cleanup
pub struct TempDirFixture {
    /// The temporary directory (automatically cleaned up on drop)
    pub temp_dir: TempDir,
}

impl TempDirFixture {
    pub fn new() -> FixtureResult<Self> {
        let temp_dir = tempfile::tempdir()?;
        Ok(Self { temp_dir })
    }

    pub fn path(&self) -> &Path {
        self.temp_dir.path()
    }

    /// Absolute path of a relative entry
    pub fn join(&self, relative: &str) -> PathBuf {
        self.path().join(relative)
    }

    pub fn create_dir(&self, subdir: &str) -> FixtureResult<()> {
        fs::create_dir_all(self.join(subdir))?;
        Ok(())
    }

    /// Write a file, creating parent directories as needed
    pub fn write_file(&self, file_path: &str, content: &str) -> FixtureResult<()> {
        let full_path = self.join(file_path);
        if let Some(parent) = full_path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&full_path, content)?;
        Ok(())
    }

    pub fn read_file(&self, file_path: &str) -> FixtureResult<String> {
        Ok(fs::read_to_string(self.join(file_path))?)
    }

    pub fn file_exists(&self, file_path: &str) -> bool {
        self.join(file_path).exists()
    }

    /// Create `<dir>` with a `config.toml` declaring `imports` under `theme`
    pub fn write_component(&self, dir: &str, imports: &[&str]) -> FixtureResult<()> {
        let list = imports
            .iter()
            .map(|import| format!("{:?}", import))
            .collect::<Vec<_>>()
            .join(", ");
        self.write_file(&format!("{}/config.toml", dir), &format!("theme = [{}]\n", list))
    }
}

#[cfg(test)]
mod tests {
    include!("filesystem.test.rs");
}
