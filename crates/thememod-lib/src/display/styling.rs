//! Semantic styling on top of `console`
//!
//! Styling is decided once per session from the resolved color intent, so a
//! `--color never` run never emits escape codes regardless of the terminal.

use console::Style;

const CHECKMARK: &str = "✓";
const CROSS: &str = "✗";
const WARNING: &str = "!";
const INFO: &str = "·";
const ARROW: &str = "→";

/// Style manager for semantic intents
#[derive(Debug, Clone)]
pub struct StyleManager {
    success: Style,
    error: Style,
    warning: Style,
    info: Style,
    emphasis: Style,
    subtle: Style,
}

impl StyleManager {
    pub fn new(color: bool) -> Self {
        Self {
            success: Style::new().green().force_styling(color),
            error: Style::new().red().force_styling(color),
            warning: Style::new().yellow().force_styling(color),
            info: Style::new().cyan().force_styling(color),
            emphasis: Style::new().bold().force_styling(color),
            subtle: Style::new().dim().force_styling(color),
        }
    }

    /// Style text with emphasis (bold)
    pub fn style_emphasis(&self, text: &str) -> String {
        self.emphasis.apply_to(text).to_string()
    }

    /// Style text as subtle/muted
    pub fn style_subtle(&self, text: &str) -> String {
        self.subtle.apply_to(text).to_string()
    }

    pub fn format_success(&self, message: &str) -> String {
        format!("{} {}", self.success.apply_to(CHECKMARK), message)
    }

    pub fn format_error(&self, message: &str) -> String {
        format!("{} {}", self.error.apply_to(CROSS), message)
    }

    pub fn format_warning(&self, message: &str) -> String {
        format!("{} {}", self.warning.apply_to(WARNING), message)
    }

    pub fn format_info(&self, message: &str) -> String {
        format!("{} {}", self.info.apply_to(INFO), message)
    }

    /// Format working/progress message (info color with arrow)
    pub fn format_working(&self, message: &str) -> String {
        format!("{} {}", self.info.apply_to(ARROW), message)
    }
}

#[cfg(test)]
mod tests {
    include!("styling.test.rs");
}
