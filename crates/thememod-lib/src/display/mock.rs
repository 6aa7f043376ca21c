//! Mock display provider implementation for testing
//!
//! Records every display call so tests can assert on what a command
//! reported without capturing stdout.

use super::providers::*;
use std::sync::{Arc, Mutex};

/// Mock implementation of DisplayProvider that records all calls
#[derive(Clone, Default)]
pub struct MockDisplayProvider {
    calls: Arc<Mutex<Vec<DisplayCall>>>,
}

impl MockDisplayProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get all recorded display calls for testing assertions
    pub fn get_calls(&self) -> Vec<DisplayCall> {
        self.calls.lock().unwrap().clone()
    }

    /// Clear all recorded calls
    pub fn clear_calls(&self) {
        self.calls.lock().unwrap().clear();
    }

    /// Check if a specific call was made
    pub fn has_call(&self, expected: &DisplayCall) -> bool {
        self.get_calls().contains(expected)
    }

    /// Get count of calls of a specific type
    pub fn count_calls(&self, call_type: &str) -> usize {
        self.get_calls()
            .iter()
            .filter(|call| call.call_type() == call_type)
            .count()
    }

    /// Whether any recorded call renders text containing `needle`
    pub fn mentions(&self, needle: &str) -> bool {
        self.get_calls().iter().any(|call| call.text().contains(needle))
    }
}

impl DisplayProvider for MockDisplayProvider {
    fn status(&self) -> Box<dyn StatusProvider> {
        Box::new(MockRecorder {
            calls: self.calls.clone(),
        })
    }

    fn table(&self) -> Box<dyn StructuredProvider> {
        Box::new(MockRecorder {
            calls: self.calls.clone(),
        })
    }
}

/// Recorded display call for testing
#[derive(Debug, Clone, PartialEq)]
pub enum DisplayCall {
    StatusChecking { task: String },
    StatusSuccess { item: String, details: String },
    StatusWarning { message: String },
    StatusInfo { message: String },
    StatusMessage { text: String },
    StatusSubtle { text: String },
    StatusComplete { task: String },
    StatusToolCheck { tool: String, available: bool, version: String },
    StatusSection { title: String },
    StructuredTable { headers: Vec<String>, rows: Vec<Vec<String>> },
    StructuredProperties { pairs: Vec<(String, String)> },
}

impl DisplayCall {
    pub fn call_type(&self) -> &'static str {
        match self {
            DisplayCall::StatusChecking { .. } => "status_checking",
            DisplayCall::StatusSuccess { .. } => "status_success",
            DisplayCall::StatusWarning { .. } => "status_warning",
            DisplayCall::StatusInfo { .. } => "status_info",
            DisplayCall::StatusMessage { .. } => "status_message",
            DisplayCall::StatusSubtle { .. } => "status_subtle",
            DisplayCall::StatusComplete { .. } => "status_complete",
            DisplayCall::StatusToolCheck { .. } => "status_tool_check",
            DisplayCall::StatusSection { .. } => "status_section",
            DisplayCall::StructuredTable { .. } => "structured_table",
            DisplayCall::StructuredProperties { .. } => "structured_properties",
        }
    }

    /// Flattened text of the call, for loose assertions
    pub fn text(&self) -> String {
        match self {
            DisplayCall::StatusChecking { task } | DisplayCall::StatusComplete { task } => {
                task.clone()
            }
            DisplayCall::StatusSuccess { item, details } => format!("{} {}", item, details),
            DisplayCall::StatusWarning { message } | DisplayCall::StatusInfo { message } => {
                message.clone()
            }
            DisplayCall::StatusMessage { text } | DisplayCall::StatusSubtle { text } => {
                text.clone()
            }
            DisplayCall::StatusToolCheck { tool, version, .. } => format!("{} {}", tool, version),
            DisplayCall::StatusSection { title } => title.clone(),
            DisplayCall::StructuredTable { headers, rows } => std::iter::once(headers)
                .chain(rows)
                .map(|cells| cells.join(" "))
                .collect::<Vec<_>>()
                .join("\n"),
            DisplayCall::StructuredProperties { pairs } => pairs
                .iter()
                .map(|(k, v)| format!("{} {}", k, v))
                .collect::<Vec<_>>()
                .join("\n"),
        }
    }
}

struct MockRecorder {
    calls: Arc<Mutex<Vec<DisplayCall>>>,
}

impl MockRecorder {
    fn record(&self, call: DisplayCall) {
        self.calls.lock().unwrap().push(call);
    }
}

fn owned(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

impl StatusProvider for MockRecorder {
    fn checking(&self, task: &str) {
        self.record(DisplayCall::StatusChecking {
            task: task.to_string(),
        });
    }

    fn success(&self, item: &str, details: &str) {
        self.record(DisplayCall::StatusSuccess {
            item: item.to_string(),
            details: details.to_string(),
        });
    }

    fn warning(&self, message: &str) {
        self.record(DisplayCall::StatusWarning {
            message: message.to_string(),
        });
    }

    fn info(&self, message: &str) {
        self.record(DisplayCall::StatusInfo {
            message: message.to_string(),
        });
    }

    fn message(&self, text: &str) {
        self.record(DisplayCall::StatusMessage {
            text: text.to_string(),
        });
    }

    fn subtle(&self, text: &str) {
        self.record(DisplayCall::StatusSubtle {
            text: text.to_string(),
        });
    }

    fn complete(&self, task: &str) {
        self.record(DisplayCall::StatusComplete {
            task: task.to_string(),
        });
    }

    fn tool_check(&self, tool: &str, available: bool, version: &str) {
        self.record(DisplayCall::StatusToolCheck {
            tool: tool.to_string(),
            available,
            version: version.to_string(),
        });
    }

    fn section(&self, title: &str) {
        self.record(DisplayCall::StatusSection {
            title: title.to_string(),
        });
    }
}

impl StructuredProvider for MockRecorder {
    fn table(&self, headers: &[&str], rows: &[Vec<&str>]) {
        self.record(DisplayCall::StructuredTable {
            headers: owned(headers),
            rows: rows.iter().map(|row| owned(row)).collect(),
        });
    }

    fn properties(&self, pairs: &[(&str, &str)]) {
        self.record(DisplayCall::StructuredProperties {
            pairs: pairs
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mock_records_status_and_table_calls() {
        let display = MockDisplayProvider::new();
        display.status().success("collect", "2 components");
        display.table().table(&["PATH", "DIR"], &[vec!["a", "/site/themes/a/"]]);

        assert_eq!(display.count_calls("status_success"), 1);
        assert_eq!(display.count_calls("structured_table"), 1);
        assert!(display.has_call(&DisplayCall::StatusSuccess {
            item: "collect".to_string(),
            details: "2 components".to_string(),
        }));
        assert!(display.mentions("/site/themes/a/"));

        display.clear_calls();
        assert!(display.get_calls().is_empty());
    }
}
