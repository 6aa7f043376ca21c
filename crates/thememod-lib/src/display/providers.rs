//! Output seams for command handlers
//!
//! Handlers report through these traits instead of printing, so the same
//! handler runs against the terminal or a recording mock.

/// Entry point handed out by a session
pub trait DisplayProvider {
    /// Line-oriented status output
    fn status(&self) -> Box<dyn StatusProvider>;

    /// Tabular output
    fn table(&self) -> Box<dyn StructuredProvider>;
}

pub trait StatusProvider {
    /// Announce a step that is about to run
    fn checking(&self, task: &str);

    /// `item: details`, marked as succeeded; empty details print the item alone
    fn success(&self, item: &str, details: &str);

    fn warning(&self, message: &str);

    fn info(&self, message: &str);

    /// Plain line, no marker or styling
    fn message(&self, text: &str);

    /// Dimmed secondary line
    fn subtle(&self, text: &str);

    /// Close a step started with `checking`
    fn complete(&self, task: &str);

    /// Report whether an external tool answered, with the version it printed
    fn tool_check(&self, tool: &str, available: bool, version: &str);

    fn section(&self, title: &str);
}

pub trait StructuredProvider {
    /// Aligned columns under a header row
    fn table(&self, headers: &[&str], rows: &[Vec<&str>]);

    /// Aligned `key  value` lines
    fn properties(&self, pairs: &[(&str, &str)]);
}
