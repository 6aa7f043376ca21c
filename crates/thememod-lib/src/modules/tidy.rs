//! Manifest pruner
//!
//! Drops go.mod requirements and go.sum entries whose `path version` pair no
//! longer belongs to a collected package. Files that would not change are
//! left alone.

use crate::modules::client::{CHECKSUM_FILE, ModuleClient};
use crate::modules::collect::CollectError;
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum TidyError {
    #[error("failed to rewrite '{}': {reason}", file.display())]
    ManifestRewrite { file: PathBuf, reason: String },

    #[error(transparent)]
    Collect(#[from] CollectError),
}

/// Lines removed from each file by a tidy run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TidyReport {
    pub manifest_removed: usize,
    pub checksum_removed: usize,
}

impl TidyReport {
    pub fn is_clean(&self) -> bool {
        self.manifest_removed == 0 && self.checksum_removed == 0
    }
}

/// Result of filtering one file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pruned {
    pub content: String,
    pub removed: usize,
}

/// `path version` key of a dependency line, or `None` for lines that carry none
fn dependency_key(line: &str) -> Option<String> {
    let mut fields = line.split_whitespace();
    let path = fields.next()?;
    let version = fields.next()?;
    let version = version.strip_suffix("/go.mod").unwrap_or(version);
    Some(format!("{} {}", path, version))
}

fn join_lines(lines: &[&str]) -> String {
    if lines.is_empty() {
        return String::new();
    }
    let mut content = lines.join("\n");
    content.push('\n');
    content
}

/// Filter the requirement lines of a go.mod.
///
/// Lines inside `require ( ... )` blocks and single-line `require` directives
/// are dependency lines; everything else passes through.
pub fn prune_manifest(content: &str, active: &HashSet<String>) -> Option<Pruned> {
    let mut kept = Vec::new();
    let mut removed = 0;
    let mut in_block = false;

    for line in content.lines() {
        let trimmed = line.trim();

        let candidate = if in_block {
            if trimmed.starts_with(')') {
                in_block = false;
                None
            } else if trimmed.is_empty() || trimmed.starts_with("//") {
                None
            } else {
                Some(trimmed)
            }
        } else if let Some(rest) = trimmed.strip_prefix("require") {
            if let Some(inner) = rest.trim_start().strip_prefix('(') {
                // `require ()` opens and closes on the same line
                let inner = inner.trim_start();
                in_block = inner.is_empty() || inner.starts_with("//");
                None
            } else if rest.starts_with(char::is_whitespace) {
                Some(rest.trim_start())
            } else {
                None
            }
        } else {
            None
        };

        match candidate.and_then(dependency_key) {
            Some(key) if !active.contains(&key) => removed += 1,
            _ => kept.push(line),
        }
    }

    (removed > 0).then(|| Pruned {
        content: join_lines(&kept),
        removed,
    })
}

/// Filter a go.sum; every line is a dependency line
pub fn prune_checksums(content: &str, active: &HashSet<String>) -> Option<Pruned> {
    let mut kept = Vec::new();
    let mut removed = 0;

    for line in content.lines() {
        match dependency_key(line) {
            Some(key) if !active.contains(&key) => removed += 1,
            _ => kept.push(line),
        }
    }

    (removed > 0).then(|| Pruned {
        content: join_lines(&kept),
        removed,
    })
}

impl ModuleClient<'_> {
    /// Prune go.mod and go.sum against a fresh collection run
    pub fn tidy(&self) -> Result<TidyReport, TidyError> {
        let Some(manifest) = self.manifest_file().map(Path::to_path_buf) else {
            tracing::debug!("no go.mod; nothing to tidy");
            return Ok(TidyReport::default());
        };

        let collected = self.collect_with(false)?;
        let active: HashSet<String> = collected
            .packages()
            .map(|(_, package)| package.path_version())
            .collect();
        tracing::debug!(active = active.len(), "tidying against collected packages");

        let checksum = self.workdir().join(CHECKSUM_FILE);
        Ok(TidyReport {
            manifest_removed: self.rewrite(&manifest, &active, prune_manifest)?,
            checksum_removed: self.rewrite(&checksum, &active, prune_checksums)?,
        })
    }

    fn rewrite(
        &self,
        file: &Path,
        active: &HashSet<String>,
        prune: fn(&str, &HashSet<String>) -> Option<Pruned>,
    ) -> Result<usize, TidyError> {
        let fs = self.fs();
        if !fs.exists(file) {
            return Ok(0);
        }

        let rewrite_error = |e: anyhow::Error| TidyError::ManifestRewrite {
            file: file.to_path_buf(),
            reason: format!("{:#}", e),
        };

        let content = fs.read_to_string(file).map_err(rewrite_error)?;
        let Some(pruned) = prune(&content, active) else {
            return Ok(0);
        };

        fs.write_file(file, &pruned.content).map_err(rewrite_error)?;
        tracing::info!(file = %file.display(), removed = pruned.removed, "pruned entries");
        Ok(pruned.removed)
    }
}

#[cfg(test)]
mod tests {
    include!("tidy.test.rs");
}
