//! Per-component configuration files
//!
//! A component may carry `config.{toml,yaml,yml,json}` at its root. The first
//! file found in that order is decoded into a generic value; its `theme` key
//! lists the component's own imports.

use crate::application::session::FileSystemProvider;
use serde_json::Value;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Probed in this order; the first existing file wins
pub const CONFIG_EXTENSIONS: [&str; 4] = ["toml", "yaml", "yml", "json"];

/// Key holding a component's imports
pub const IMPORTS_KEY: &str = "theme";

#[derive(Debug, Error)]
pub enum ComponentConfigError {
    #[error("failed to read '{file}': {reason}")]
    Read { file: PathBuf, reason: String },

    #[error("failed to decode '{file}': {reason}")]
    Decode { file: PathBuf, reason: String },
}

/// Decoded configuration of one component
#[derive(Debug, Clone, PartialEq)]
pub struct ComponentConfig {
    pub file: PathBuf,
    pub data: Value,
}

impl ComponentConfig {
    /// First config file present in `dir`, if any
    pub fn find(fs: &dyn FileSystemProvider, dir: &Path) -> Option<PathBuf> {
        CONFIG_EXTENSIONS
            .iter()
            .map(|ext| dir.join(format!("config.{}", ext)))
            .find(|candidate| fs.exists(candidate))
    }

    /// Locate and decode the config file in `dir`; `Ok(None)` when there is none
    pub fn load(
        fs: &dyn FileSystemProvider,
        dir: &Path,
    ) -> Result<Option<Self>, ComponentConfigError> {
        let Some(file) = Self::find(fs, dir) else {
            return Ok(None);
        };

        let content = fs
            .read_to_string(&file)
            .map_err(|e| ComponentConfigError::Read {
                file: file.clone(),
                reason: format!("{:#}", e),
            })?;

        let data = decode(&file, &content)?;
        tracing::trace!(file = %file.display(), "loaded component config");
        Ok(Some(Self { file, data }))
    }

    /// Imports declared under the `theme` key, in declaration order.
    ///
    /// Accepts a single string, a list of strings or a list of scalars.
    pub fn imports(&self) -> Vec<String> {
        let Some(map) = self.data.as_object() else {
            return Vec::new();
        };

        let value = map
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(IMPORTS_KEY))
            .map(|(_, value)| value);

        match value {
            Some(Value::Array(items)) => items.iter().filter_map(scalar_to_string).collect(),
            Some(other) => scalar_to_string(other).into_iter().collect(),
            None => Vec::new(),
        }
    }
}

fn decode(file: &Path, content: &str) -> Result<Value, ComponentConfigError> {
    let extension = file
        .extension()
        .and_then(|ext| ext.to_str())
        .unwrap_or_default();

    let decoded = match extension {
        "toml" => toml::from_str::<Value>(content).map_err(|e| e.to_string()),
        "yaml" | "yml" => serde_saphyr::from_str::<Value>(content).map_err(|e| e.to_string()),
        _ => serde_json::from_str::<Value>(content).map_err(|e| e.to_string()),
    };

    decoded.map_err(|reason| ComponentConfigError::Decode {
        file: file.to_path_buf(),
        reason,
    })
}

fn scalar_to_string(value: &Value) -> Option<String> {
    let text = match value {
        Value::String(s) => s.trim().to_string(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null | Value::Array(_) | Value::Object(_) => return None,
    };
    (!text.is_empty()).then_some(text)
}

/// Top-level imports declared by the project's own config file
pub fn project_imports(
    fs: &dyn FileSystemProvider,
    workdir: &Path,
) -> Result<Vec<String>, ComponentConfigError> {
    Ok(ComponentConfig::load(fs, workdir)?
        .map(|config| config.imports())
        .unwrap_or_default())
}

#[cfg(test)]
mod tests {
    include!("theme_config.test.rs");
}
