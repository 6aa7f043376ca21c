//! Recursive component collection
//!
//! Starting from the project's top-level imports, each component is located
//! (snapshot, then resolved module, then on-demand fetch, then the local
//! themes folder), its config is read, and the imports it declares are
//! collected in turn. Components are recorded in pre-order; a seen-set keyed
//! by lowercase import path suppresses cycles and duplicates.

use crate::modules::client::ModuleClient;
use crate::modules::resolved::{Replacement, ResolvedIndex, ResolvedPackage};
use crate::modules::snapshot::{SnapshotIndex, SnapshotIndexError};
use crate::modules::theme_config::{ComponentConfig, ComponentConfigError};
use crate::modules::toolchain::{ToolchainError, ToolchainStatus};
use std::collections::HashSet;
use std::path::{MAIN_SEPARATOR, Path, PathBuf};
use thiserror::Error;

/// Why a missing component might really be a toolchain problem
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotFoundHint {
    ToolchainMissing,
    ToolchainTooOld,
}

impl NotFoundHint {
    pub fn message(&self) -> &'static str {
        match self {
            NotFoundHint::ToolchainMissing => {
                "we found a go.mod file in your project, but you need to install Go to use it. See https://golang.org/dl/"
            }
            NotFoundHint::ToolchainTooOld => {
                "we found a go.mod file in your project, but you need a newer version of Go to use it. See https://golang.org/dl/"
            }
        }
    }
}

fn hint_suffix(hint: &Option<NotFoundHint>) -> String {
    hint.map(|h| format!("; {}", h.message()))
        .unwrap_or_default()
}

/// Errors that abort a collection run
#[derive(Debug, Error)]
pub enum CollectError {
    #[error("{reason}{}", hint_suffix(.hint))]
    ComponentNotFound {
        path: String,
        reason: String,
        hint: Option<NotFoundHint>,
    },

    #[error("failed to decode config '{}': {reason}", file.display())]
    ConfigDecode { file: PathBuf, reason: String },

    #[error("invalid modules list '{}': {line:?}", file.display())]
    SnapshotIndexMalformed { file: PathBuf, line: String },

    #[error("failed to read '{}': {reason}", path.display())]
    Io { path: PathBuf, reason: String },

    #[error(transparent)]
    Toolchain(#[from] ToolchainError),
}

impl From<ComponentConfigError> for CollectError {
    fn from(err: ComponentConfigError) -> Self {
        match err {
            ComponentConfigError::Read { file, reason } => CollectError::Io { path: file, reason },
            ComponentConfigError::Decode { file, reason } => {
                CollectError::ConfigDecode { file, reason }
            }
        }
    }
}

impl From<SnapshotIndexError> for CollectError {
    fn from(err: SnapshotIndexError) -> Self {
        match err {
            SnapshotIndexError::Malformed { file, line } => {
                CollectError::SnapshotIndexMalformed { file, line }
            }
            SnapshotIndexError::Read { file, reason } => CollectError::Io { path: file, reason },
        }
    }
}

/// One resolved component of the import graph
#[derive(Debug, Clone, PartialEq)]
pub struct Component {
    /// Path as declared by the importer
    pub import_path: String,
    /// Directory holding the component, always ending with a separator
    pub dir: String,
    /// Whether `dir` points into a `_vendor` snapshot
    pub vendored: bool,
    /// Path of the component that first declared this import
    pub owner: Option<String>,
    /// Backing go module, absent for snapshots and local themes
    pub package: Option<ResolvedPackage>,
    pub config: Option<ComponentConfig>,
}

impl Component {
    /// Module path when backed by a go module, else the import path
    pub fn path(&self) -> &str {
        self.package
            .as_ref()
            .map(|p| p.path.as_str())
            .unwrap_or(&self.import_path)
    }

    pub fn version(&self) -> &str {
        self.package
            .as_ref()
            .map(|p| p.version.as_str())
            .unwrap_or_default()
    }

    pub fn is_package(&self) -> bool {
        self.package.is_some()
    }

    /// The module replacing this one, for package-backed components outside
    /// a snapshot
    pub fn replacement(&self) -> Option<&Replacement> {
        if self.vendored {
            return None;
        }
        self.package.as_ref().and_then(|p| p.replace.as_ref())
    }

    pub fn config_file(&self) -> Option<&Path> {
        self.config.as_ref().map(|c| c.file.as_path())
    }

    /// Imports this component declares in its own config
    pub fn imports(&self) -> Vec<String> {
        self.config
            .as_ref()
            .map(ComponentConfig::imports)
            .unwrap_or_default()
    }
}

/// Result of a collection run
#[derive(Debug, Clone, Default)]
pub struct ModulesConfig {
    /// Components in pre-order of the import graph
    pub modules: Vec<Component>,
    /// Set when the project has a go.mod
    pub manifest_file: Option<PathBuf>,
}

impl ModulesConfig {
    /// Components backed by a go module
    pub fn packages(&self) -> impl Iterator<Item = (&Component, &ResolvedPackage)> {
        self.modules
            .iter()
            .filter_map(|c| c.package.as_ref().map(|p| (c, p)))
    }
}

/// State owned by a single collection run
pub(crate) struct Collector<'c, 'a> {
    client: &'c ModuleClient<'a>,
    seen: HashSet<String>,
    snapshots: SnapshotIndex,
    resolved: ResolvedIndex,
    components: Vec<Component>,
    use_snapshots: bool,
}

impl<'c, 'a> Collector<'c, 'a> {
    pub(crate) fn new(client: &'c ModuleClient<'a>, use_snapshots: bool) -> Self {
        Self {
            client,
            seen: HashSet::new(),
            snapshots: SnapshotIndex::new(),
            resolved: ResolvedIndex::default(),
            components: Vec::new(),
            use_snapshots,
        }
    }

    pub(crate) fn run(mut self) -> Result<ModulesConfig, CollectError> {
        let imports = self.client.imports().to_vec();
        if imports.is_empty() {
            return Ok(ModulesConfig {
                modules: Vec::new(),
                manifest_file: self.client.manifest_file().map(Path::to_path_buf),
            });
        }

        let _span = tracing::info_span!("collect", imports = imports.len()).entered();
        self.resolved = ResolvedIndex::new(self.client.list()?);

        let workdir = self.client.workdir().to_path_buf();
        self.add_and_recurse(&workdir, None, &imports)?;

        tracing::debug!(count = self.components.len(), "collected components");
        Ok(ModulesConfig {
            modules: self.components,
            manifest_file: self.client.manifest_file().map(Path::to_path_buf),
        })
    }

    /// Marks the path seen; false if it already was
    fn mark_seen(&mut self, import_path: &str) -> bool {
        self.seen.insert(import_path.to_lowercase())
    }

    fn add_and_recurse(
        &mut self,
        dir: &Path,
        owner: Option<&str>,
        imports: &[String],
    ) -> Result<(), CollectError> {
        for import_path in imports {
            if !self.mark_seen(import_path) {
                tracing::trace!(path = %import_path, "already collected");
                continue;
            }

            let component = self.resolve(dir, owner, import_path)?;
            let child_dir = PathBuf::from(&component.dir);
            let child_owner = component.import_path.clone();
            let child_imports = component.imports();
            self.components.push(component);

            if !child_imports.is_empty() {
                self.add_and_recurse(&child_dir, Some(&child_owner), &child_imports)?;
            }
        }
        Ok(())
    }

    /// Locate one component; `dir` is the directory of its importer
    fn resolve(
        &mut self,
        dir: &Path,
        owner: Option<&str>,
        import_path: &str,
    ) -> Result<Component, CollectError> {
        let client = self.client;
        let fs = client.fs();
        let mut package = None;
        let mut vendored = false;

        if self.use_snapshots {
            self.snapshots.scan(fs, dir)?;
        }

        let snapshot = if self.use_snapshots {
            self.snapshots.lookup(import_path).map(Path::to_path_buf)
        } else {
            None
        };

        let (module_dir, tier) = if let Some(snapshot_dir) = snapshot {
            vendored = true;
            (snapshot_dir, "snapshot")
        } else {
            package = self.resolved_with_dir(import_path);
            let mut tier = "resolved";

            if package.is_none() && client.is_probably_module(import_path) {
                client.toolchain().fetch(import_path)?;
                self.resolved = ResolvedIndex::new(client.list()?);
                package = self.resolved_with_dir(import_path);
                tier = "fetched";
            }

            match &package {
                Some(p) => (PathBuf::from(&p.dir), tier),
                None => {
                    let local = client.themes_dir().join(import_path);
                    if !fs.exists(&local) {
                        return Err(self.not_found(
                            import_path,
                            format!(
                                "module {:?} not found; either add it as a module or store it in {:?}",
                                import_path,
                                client.themes_dir().display().to_string()
                            ),
                        ));
                    }
                    (local, "local")
                }
            }
        };

        if !fs.exists(&module_dir) {
            return Err(self.not_found(
                import_path,
                format!("{:?} not found", module_dir.display().to_string()),
            ));
        }

        let config = ComponentConfig::load(fs, &module_dir)?;

        let mut dir_string = module_dir.display().to_string();
        if !dir_string.ends_with(MAIN_SEPARATOR) {
            dir_string.push(MAIN_SEPARATOR);
        }

        tracing::debug!(
            path = import_path,
            dir = %dir_string,
            tier,
            owner = owner.unwrap_or("-"),
            "resolved component"
        );

        Ok(Component {
            import_path: import_path.to_string(),
            dir: dir_string,
            vendored,
            owner: owner.map(str::to_string),
            package,
            config,
        })
    }

    fn resolved_with_dir(&self, import_path: &str) -> Option<ResolvedPackage> {
        self.resolved
            .lookup(import_path)
            .filter(|p| p.has_directory())
            .cloned()
    }

    fn not_found(&self, import_path: &str, reason: String) -> CollectError {
        let hint = if self.client.is_manifest_enabled() {
            match self.client.toolchain_status() {
                ToolchainStatus::NotFound => Some(NotFoundHint::ToolchainMissing),
                ToolchainStatus::TooOld => Some(NotFoundHint::ToolchainTooOld),
                ToolchainStatus::Ok => None,
            }
        } else {
            None
        };

        CollectError::ComponentNotFound {
            path: import_path.to_string(),
            reason,
            hint,
        }
    }
}

#[cfg(test)]
mod tests {
    include!("collect.test.rs");
}
