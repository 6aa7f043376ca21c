//! Snapshot writer
//!
//! Copies every package-backed component into `<workdir>/_vendor/<path>` and
//! records `# <path> <version>` for each in `_vendor/modules.txt`. Only root
//! files and a fixed set of content folders are copied.

use crate::modules::client::ModuleClient;
use crate::modules::collect::CollectError;
use crate::modules::resolved::ResolvedIndex;
use crate::modules::snapshot::{SNAPSHOT_DIR, SNAPSHOT_INDEX_FILE, render_index};
use crate::modules::toolchain::ToolchainError;
use std::path::{Component as PathComponent, Path, PathBuf};
use thiserror::Error;

/// Top-level folders copied into a snapshot
pub const VENDORED_DIRS: [&str; 7] = [
    "archetypes",
    "assets",
    "data",
    "i18n",
    "layouts",
    "resources",
    "static",
];

#[derive(Debug, Error)]
pub enum VendorError {
    #[error("vendor: main module not found")]
    MainModuleNotFound,

    #[error("failed to write snapshot '{}': {reason}", path.display())]
    SnapshotWrite { path: PathBuf, reason: String },

    #[error(transparent)]
    Collect(#[from] CollectError),

    #[error(transparent)]
    Toolchain(#[from] ToolchainError),
}

/// What a vendor run wrote
#[derive(Debug, Clone, Default, PartialEq)]
pub struct VendorReport {
    /// `(path, version)` of each captured package, in collection order
    pub vendored: Vec<(String, String)>,
    /// Index file, when at least one package was captured
    pub index_file: Option<PathBuf>,
}

/// Whether a directory (relative to a package root) belongs in a snapshot.
///
/// Top-level folders must be on the allow-list; anything below an accepted
/// folder is kept.
pub fn should_vendor(relative: &Path) -> bool {
    let mut parts = relative.components();
    match (parts.next(), parts.next()) {
        (Some(PathComponent::Normal(first)), None) => first
            .to_str()
            .is_some_and(|name| VENDORED_DIRS.contains(&name)),
        (Some(_), Some(_)) => true,
        _ => false,
    }
}

impl ModuleClient<'_> {
    /// Refresh `_vendor` from the current import graph.
    ///
    /// Collection bypasses existing snapshots so the packages are copied from
    /// their resolved directories.
    pub fn vendor(&self) -> Result<VendorReport, VendorError> {
        let resolved = ResolvedIndex::new(self.list()?);
        if resolved.main_package().is_none() {
            return Err(VendorError::MainModuleNotFound);
        }

        let collected = self.collect_with(false)?;
        let vendor_dir = self.workdir().join(SNAPSHOT_DIR);
        let fs = self.fs();
        let mut report = VendorReport::default();

        let _span = crate::progress_span!("vendor", total = collected.packages().count()).entered();

        for (component, package) in collected.packages() {
            let source = Path::new(&component.dir);
            let target = vendor_dir.join(&package.path);

            if fs.is_directory(&target) {
                fs.remove_dir_all(&target)
                    .map_err(|e| VendorError::SnapshotWrite {
                        path: target.clone(),
                        reason: e.to_string(),
                    })?;
            }

            fs.copy_dir_filtered(source, &target, &should_vendor)
                .map_err(|e| VendorError::SnapshotWrite {
                    path: target.clone(),
                    reason: e.to_string(),
                })?;

            tracing::debug!(
                path = %package.path,
                version = %package.version,
                from = %source.display(),
                "vendored package"
            );
            report
                .vendored
                .push((package.path.clone(), package.version.clone()));
        }

        if report.vendored.is_empty() {
            tracing::info!("nothing to vendor");
            return Ok(report);
        }

        let index = render_index(
            report
                .vendored
                .iter()
                .map(|(path, version)| (path.as_str(), version.as_str())),
        );
        let index_file = vendor_dir.join(SNAPSHOT_INDEX_FILE);

        fs.create_dir_all(&vendor_dir)
            .and_then(|()| fs.write_file(&index_file, &index))
            .map_err(|e| VendorError::SnapshotWrite {
                path: index_file.clone(),
                reason: format!("{:#}", e),
            })?;

        tracing::info!(count = report.vendored.len(), file = %index_file.display(), "wrote snapshot index");
        report.index_file = Some(index_file);
        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    include!("vendor.test.rs");
}
