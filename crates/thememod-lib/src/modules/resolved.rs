//! Packages reported by the go toolchain
//!
//! `go list -m -json all` prints one JSON object per module, back to back
//! and without a surrounding array. Each object becomes a [`ResolvedPackage`];
//! the full answer is indexed by lowercase path in a [`ResolvedIndex`].

use serde::Deserialize;
use std::collections::HashMap;

/// One entry of the resolved dependency set
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct ResolvedPackage {
    /// Canonical module path
    pub path: String,
    pub version: String,
    /// Module that supersedes this one, if the manifest replaces it
    pub replace: Option<Replacement>,
    /// True for the project's own module
    pub main: bool,
    pub indirect: bool,
    /// Directory holding the module files; empty when not downloaded
    pub dir: String,
    #[serde(rename = "GoMod")]
    pub go_mod: String,
    pub error: Option<PackageError>,
}

/// Target of a `replace` directive
///
/// Carries no replacement of its own, so a chain is never longer than one hop.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct Replacement {
    pub path: String,
    pub version: String,
    pub dir: String,
}

/// Error the toolchain attached to a module entry
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct PackageError {
    #[serde(rename = "Err", default)]
    pub err: String,
}

impl ResolvedPackage {
    pub fn new(path: impl Into<String>, version: impl Into<String>, dir: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            version: version.into(),
            dir: dir.into(),
            ..Self::default()
        }
    }

    /// Whether the toolchain reported a usable directory
    pub fn has_directory(&self) -> bool {
        !self.dir.is_empty()
    }

    /// `path version`, the form used by go.mod and go.sum lines
    pub fn path_version(&self) -> String {
        format!("{} {}", self.path, self.version)
    }
}

/// Decode the concatenated JSON objects printed by `go list -m -json`
pub fn parse_resolved_stream(output: &str) -> Result<Vec<ResolvedPackage>, serde_json::Error> {
    serde_json::Deserializer::from_str(output)
        .into_iter::<ResolvedPackage>()
        .collect()
}

/// Case-insensitive lookup over one resolver answer
#[derive(Debug, Clone, Default)]
pub struct ResolvedIndex {
    packages: Vec<ResolvedPackage>,
    by_path: HashMap<String, usize>,
}

impl ResolvedIndex {
    pub fn new(packages: Vec<ResolvedPackage>) -> Self {
        let mut by_path = HashMap::with_capacity(packages.len());
        for (i, package) in packages.iter().enumerate() {
            // Later duplicates overwrite earlier ones
            by_path.insert(package.path.to_lowercase(), i);
        }
        Self { packages, by_path }
    }

    pub fn lookup(&self, path: &str) -> Option<&ResolvedPackage> {
        self.by_path
            .get(&path.to_lowercase())
            .map(|&i| &self.packages[i])
    }

    /// The project's own module, if the toolchain reported one
    pub fn main_package(&self) -> Option<&ResolvedPackage> {
        self.packages.iter().find(|p| p.main)
    }

    pub fn len(&self) -> usize {
        self.packages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.packages.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ResolvedPackage> {
        self.packages.iter()
    }
}

#[cfg(test)]
mod tests {
    include!("resolved.test.rs");
}
