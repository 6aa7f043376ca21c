//! Conventional color variables
//!
//! `CI`, `CLICOLOR`, `NO_COLOR` and `FORCE_COLOR` adjust the color intent
//! after the CLI and `THEMEMOD_*` variables have been applied.

use crate::primitives::{ColorIntent, ConfigError};
use serde::Deserialize;

/// Process environment as far as color is concerned
#[derive(Debug, Clone, Default, Deserialize)]
pub struct EnvironmentConfig {
    /// Any non-empty value disables color
    pub no_color: Option<String>,
    /// `0`/`false` disables, `1`/`2`/`3`/`true` forces color
    pub force_color: Option<String>,
    /// `0` disables color
    pub clicolor: Option<String>,
    /// Set on CI runners; disables color outright
    pub ci: Option<String>,
}

impl EnvironmentConfig {
    pub fn load() -> Result<Self, ConfigError> {
        Ok(envy::from_env()?)
    }

    /// Adjust `color` for the environment.
    ///
    /// `CI` overrides everything. Otherwise `FORCE_COLOR` beats `NO_COLOR`,
    /// which beats `CLICOLOR`.
    pub fn apply_color_config(&self, color: ColorIntent) -> ColorIntent {
        if self.ci.is_some() {
            return ColorIntent::Never;
        }

        let forced = match self.force_color.as_deref() {
            Some("0" | "false") => Some(ColorIntent::Never),
            Some("1" | "2" | "3" | "true") => Some(ColorIntent::Always),
            _ => None,
        };
        let disabled = self.no_color.as_deref().is_some_and(|v| !v.is_empty())
            || self.clicolor.as_deref() == Some("0");

        match forced {
            Some(intent) => intent,
            None if disabled => ColorIntent::Never,
            None => color,
        }
    }
}

#[cfg(test)]
mod tests {
    include!("env.test.rs");
}
