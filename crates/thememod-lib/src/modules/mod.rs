//! Theme module engine
//!
//! Collects the component graph of a project and maintains its `_vendor`
//! snapshot and go.mod/go.sum manifest.

pub mod client;
pub mod collect;
pub mod graph;
pub mod resolved;
pub mod snapshot;
pub mod theme_config;
pub mod tidy;
pub mod toolchain;
pub mod vendor;

pub use client::{CHECKSUM_FILE, ClientSettings, MANIFEST_FILE, ModuleClient};
pub use collect::{CollectError, Component, ModulesConfig, NotFoundHint};
pub use graph::{GraphError, ModuleGraph};
pub use resolved::{ResolvedIndex, ResolvedPackage, Replacement};
pub use snapshot::{SNAPSHOT_DIR, SNAPSHOT_INDEX_FILE, SnapshotIndex};
pub use theme_config::{ComponentConfig, ComponentConfigError};
pub use tidy::{TidyError, TidyReport};
pub use toolchain::{ModuleToolchain, ToolchainError, ToolchainStatus};
pub use vendor::{VENDORED_DIRS, VendorError, VendorReport};
