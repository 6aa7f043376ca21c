//! Project-local module snapshots (`_vendor`)
//!
//! `_vendor/modules.txt` lists one `# <path> <version>` line per vendored
//! module. Index files are scanned lazily per directory, and the first
//! mapping recorded for a module path wins.

use crate::application::session::FileSystemProvider;
use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};
use thiserror::Error;

pub const SNAPSHOT_DIR: &str = "_vendor";
pub const SNAPSHOT_INDEX_FILE: &str = "modules.txt";

#[derive(Debug, Error)]
pub enum SnapshotIndexError {
    #[error("invalid modules list '{}': {line:?}", file.display())]
    Malformed { file: PathBuf, line: String },

    #[error("failed to read '{}': {reason}", file.display())]
    Read { file: PathBuf, reason: String },
}

/// Module path to snapshot directory, built from scanned index files
#[derive(Debug, Default)]
pub struct SnapshotIndex {
    dirs: HashMap<String, PathBuf>,
    scanned: HashSet<PathBuf>,
}

impl SnapshotIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Read `<dir>/_vendor/modules.txt` once; a missing index is not an error
    pub fn scan(
        &mut self,
        fs: &dyn FileSystemProvider,
        dir: &Path,
    ) -> Result<(), SnapshotIndexError> {
        if !self.scanned.insert(dir.to_path_buf()) {
            return Ok(());
        }

        let snapshot_dir = dir.join(SNAPSHOT_DIR);
        let file = snapshot_dir.join(SNAPSHOT_INDEX_FILE);
        if !fs.exists(&file) {
            return Ok(());
        }

        let content = fs
            .read_to_string(&file)
            .map_err(|e| SnapshotIndexError::Read {
                file: file.clone(),
                reason: format!("{:#}", e),
            })?;

        for raw in content.lines() {
            let line = raw.trim_matches(|c| c == '#' || c == ' ').trim();
            if line.is_empty() {
                continue;
            }

            let fields: Vec<&str> = line.split_whitespace().collect();
            let [path, _version] = fields.as_slice() else {
                return Err(SnapshotIndexError::Malformed {
                    file,
                    line: raw.to_string(),
                });
            };

            self.dirs
                .entry(path.to_string())
                .or_insert_with(|| snapshot_dir.join(path));
        }

        tracing::debug!(file = %file.display(), entries = self.dirs.len(), "scanned snapshot index");
        Ok(())
    }

    /// Snapshot directory for an exact module path
    pub fn lookup(&self, path: &str) -> Option<&Path> {
        self.dirs.get(path).map(PathBuf::as_path)
    }

    pub fn len(&self) -> usize {
        self.dirs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dirs.is_empty()
    }
}

/// Render index lines for `(path, version)` pairs in the given order
pub fn render_index<'a>(entries: impl IntoIterator<Item = (&'a str, &'a str)>) -> String {
    entries
        .into_iter()
        .map(|(path, version)| format!("# {} {}\n", path, version))
        .collect()
}

#[cfg(test)]
mod tests {
    include!("snapshot.test.rs");
}
