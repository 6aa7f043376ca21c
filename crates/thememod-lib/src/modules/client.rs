//! Module client
//!
//! Entry point for module operations on one project directory. Owns the go
//! toolchain boundary and knows whether the project is module-enabled
//! (has a go.mod).

use crate::application::session::{FileSystemProvider, ProcessProvider, Session};
use crate::modules::collect::{CollectError, Collector, ModulesConfig};
use crate::modules::resolved::ResolvedPackage;
use crate::modules::theme_config::project_imports;
use crate::modules::toolchain::{ModuleToolchain, ToolchainError, ToolchainStatus};
use anyhow::Context;
use std::path::{Path, PathBuf};

pub const MANIFEST_FILE: &str = "go.mod";
pub const CHECKSUM_FILE: &str = "go.sum";

/// Inputs for constructing a [`ModuleClient`]
#[derive(Debug, Clone)]
pub struct ClientSettings {
    /// Absolute project directory
    pub workdir: PathBuf,
    /// Folder holding local components; relative paths are joined to `workdir`
    pub themes_dir: PathBuf,
    /// Top-level imports in declaration order
    pub imports: Vec<String>,
    /// Value for GOPROXY
    pub mod_proxy: String,
    /// Skip `_vendor` snapshots during collection
    pub ignore_vendor: bool,
}

impl ClientSettings {
    pub fn new(workdir: impl Into<PathBuf>) -> Self {
        Self {
            workdir: workdir.into(),
            themes_dir: PathBuf::from("themes"),
            imports: Vec::new(),
            mod_proxy: "direct".to_string(),
            ignore_vendor: false,
        }
    }

    pub fn with_imports<S: Into<String>>(mut self, imports: impl IntoIterator<Item = S>) -> Self {
        self.imports = imports.into_iter().map(Into::into).collect();
        self
    }
}

pub struct ModuleClient<'a> {
    fs: &'a dyn FileSystemProvider,
    toolchain: ModuleToolchain<'a>,
    workdir: PathBuf,
    themes_dir: PathBuf,
    imports: Vec<String>,
    manifest_file: Option<PathBuf>,
    ignore_vendor: bool,
}

impl<'a> ModuleClient<'a> {
    pub fn new(
        fs: &'a dyn FileSystemProvider,
        process: &'a dyn ProcessProvider,
        settings: ClientSettings,
    ) -> Self {
        let manifest = settings.workdir.join(MANIFEST_FILE);
        let manifest_file = fs.exists(&manifest).then_some(manifest);
        let themes_dir = settings.workdir.join(&settings.themes_dir);

        tracing::debug!(
            workdir = %settings.workdir.display(),
            themes_dir = %themes_dir.display(),
            module_enabled = manifest_file.is_some(),
            "module client ready"
        );

        Self {
            fs,
            toolchain: ModuleToolchain::new(process, &settings.workdir, &settings.mod_proxy),
            workdir: settings.workdir,
            themes_dir,
            imports: settings.imports,
            manifest_file,
            ignore_vendor: settings.ignore_vendor,
        }
    }

    /// Build a client from the session's configuration.
    ///
    /// Without imports on the command line, the `theme` key of the project's
    /// own config file supplies them.
    pub fn from_session(session: &'a dyn Session) -> anyhow::Result<Self> {
        let config = session.config().app_config();
        let workdir = session.workdir()?;

        let imports = if config.imports.is_empty() {
            project_imports(session.filesystem(), &workdir)
                .context("Failed to read project imports")?
        } else {
            config.imports.clone()
        };

        let settings = ClientSettings {
            workdir,
            themes_dir: config.themes_dir.clone(),
            imports,
            mod_proxy: config.mod_proxy.clone(),
            ignore_vendor: config.ignore_vendor,
        };

        Ok(Self::new(session.filesystem(), session.process(), settings))
    }

    pub fn workdir(&self) -> &Path {
        &self.workdir
    }

    pub fn themes_dir(&self) -> &Path {
        &self.themes_dir
    }

    pub fn imports(&self) -> &[String] {
        &self.imports
    }

    /// Path of go.mod when the project is module-enabled
    pub fn manifest_file(&self) -> Option<&Path> {
        self.manifest_file.as_deref()
    }

    pub fn is_manifest_enabled(&self) -> bool {
        self.manifest_file.is_some()
    }

    pub fn toolchain_status(&self) -> ToolchainStatus {
        self.toolchain.status()
    }

    pub(crate) fn fs(&self) -> &'a dyn FileSystemProvider {
        self.fs
    }

    pub(crate) fn toolchain(&self) -> &ModuleToolchain<'a> {
        &self.toolchain
    }

    /// Modules in the build list; empty for projects without go.mod
    pub fn list(&self) -> Result<Vec<ResolvedPackage>, ToolchainError> {
        if !self.is_manifest_enabled() {
            return Ok(Vec::new());
        }
        self.toolchain.list_resolved()
    }

    /// Fetch a module into the module cache and record it in go.mod
    pub fn get(&self, path: &str) -> Result<(), ToolchainError> {
        self.toolchain.fetch(path)
    }

    /// Raw `go mod graph` output
    pub fn graph(&self) -> Result<String, ToolchainError> {
        self.toolchain.dependency_graph()
    }

    /// Turn the project into a module; later calls see it as module-enabled
    pub fn init(&mut self, path: &str) -> Result<(), ToolchainError> {
        self.toolchain.init(path)?;
        self.manifest_file = Some(self.workdir.join(MANIFEST_FILE));
        tracing::info!(path, "initialized module");
        Ok(())
    }

    /// Whether an import path could name a go module
    pub fn is_probably_module(&self, path: &str) -> bool {
        self.is_manifest_enabled() && path.contains('/')
    }

    /// Collect the import graph, honoring `_vendor` unless disabled
    pub fn collect(&self) -> Result<ModulesConfig, CollectError> {
        self.collect_with(!self.ignore_vendor)
    }

    pub fn collect_with(&self, use_snapshots: bool) -> Result<ModulesConfig, CollectError> {
        Collector::new(self, use_snapshots).run()
    }
}

#[cfg(test)]
mod tests {
    include!("client.test.rs");
}
