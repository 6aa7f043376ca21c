//! Live display provider implementation
//!
//! Writes styled status lines and tables to stdout.

use super::providers::*;
use super::styling::StyleManager;
use console::{Alignment, measure_text_width, pad_str};
use std::sync::Arc;

/// Live implementation of DisplayProvider
pub struct LiveDisplayProvider {
    styling: Arc<StyleManager>,
}

impl LiveDisplayProvider {
    pub fn new(color: bool) -> Self {
        Self {
            styling: Arc::new(StyleManager::new(color)),
        }
    }
}

impl DisplayProvider for LiveDisplayProvider {
    fn status(&self) -> Box<dyn StatusProvider> {
        Box::new(LiveStatusProvider {
            styling: self.styling.clone(),
        })
    }

    fn table(&self) -> Box<dyn StructuredProvider> {
        Box::new(LiveStructuredProvider {
            styling: self.styling.clone(),
        })
    }
}

fn with_details(item: &str, details: &str) -> String {
    if details.is_empty() {
        item.to_string()
    } else {
        format!("{}: {}", item, details)
    }
}

/// Live implementation of StatusProvider
struct LiveStatusProvider {
    styling: Arc<StyleManager>,
}

impl StatusProvider for LiveStatusProvider {
    fn checking(&self, task: &str) {
        println!("{}", self.styling.format_working(&format!("Checking {}...", task)));
    }

    fn success(&self, item: &str, details: &str) {
        println!("{}", self.styling.format_success(&with_details(item, details)));
    }

    fn warning(&self, message: &str) {
        println!("{}", self.styling.format_warning(message));
    }

    fn info(&self, message: &str) {
        println!("{}", self.styling.format_info(message));
    }

    fn message(&self, text: &str) {
        println!("{}", text);
    }

    fn subtle(&self, text: &str) {
        println!("{}", self.styling.style_subtle(text));
    }

    fn complete(&self, task: &str) {
        println!("{}", self.styling.format_success(task));
    }

    fn tool_check(&self, tool: &str, available: bool, version: &str) {
        if available {
            self.success(tool, version);
        } else {
            println!("{}", self.styling.format_error(&with_details(tool, "not found")));
        }
    }

    fn section(&self, title: &str) {
        println!();
        println!("{}", self.styling.style_emphasis(title));
    }
}

/// Live implementation of StructuredProvider
struct LiveStructuredProvider {
    styling: Arc<StyleManager>,
}

impl StructuredProvider for LiveStructuredProvider {
    fn table(&self, headers: &[&str], rows: &[Vec<&str>]) {
        let mut widths: Vec<usize> = headers.iter().map(|h| measure_text_width(h)).collect();
        for row in rows {
            for (i, cell) in row.iter().enumerate() {
                if let Some(width) = widths.get_mut(i) {
                    *width = (*width).max(measure_text_width(cell));
                }
            }
        }

        let render = |cells: &[&str]| -> String {
            cells
                .iter()
                .zip(&widths)
                .map(|(cell, width)| pad_str(cell, *width, Alignment::Left, None).into_owned())
                .collect::<Vec<_>>()
                .join("  ")
                .trim_end()
                .to_string()
        };

        println!("{}", self.styling.style_emphasis(&render(headers)));
        for row in rows {
            println!("{}", render(row));
        }
    }

    fn properties(&self, pairs: &[(&str, &str)]) {
        let key_width = pairs
            .iter()
            .map(|(key, _)| measure_text_width(key))
            .max()
            .unwrap_or(0);

        for (key, value) in pairs {
            let key = pad_str(key, key_width, Alignment::Left, None);
            println!("{}  {}", self.styling.style_subtle(&key), value);
        }
    }
}
