//! Mock implementations of session providers for testing
//!
//! These mocks enable testing of command handlers and the module engine
//! without touching the real filesystem or spawning the go toolchain.

use crate::Result;
use crate::application::config::AppConfig;
use crate::application::session::*;
use crate::display::{DisplayProvider, MockDisplayProvider};
use std::cell::RefCell;
use std::collections::{HashMap, HashSet, VecDeque};
use std::io;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

/// Mock filesystem provider for testing
#[derive(Clone)]
pub struct MockFileSystemProvider {
    pub current_dir: PathBuf,
    /// In-memory filesystem: path -> content
    pub files: Arc<Mutex<HashMap<PathBuf, String>>>,
    /// Track directories that exist
    pub directories: Arc<Mutex<HashSet<PathBuf>>>,
}

impl MockFileSystemProvider {
    pub fn new() -> Self {
        let provider = Self {
            current_dir: PathBuf::from("/test/workdir"),
            files: Arc::new(Mutex::new(HashMap::new())),
            directories: Arc::new(Mutex::new(HashSet::new())),
        };
        provider.insert_dir(Path::new("/test/workdir"));
        provider
    }

    pub fn with_current_dir(mut self, dir: PathBuf) -> Self {
        self.insert_dir(&dir);
        self.current_dir = dir;
        self
    }

    pub fn with_file(self, path: impl Into<PathBuf>, content: impl Into<String>) -> Self {
        let path = path.into();
        if let Some(parent) = path.parent() {
            self.insert_dir(parent);
        }
        self.files.lock().unwrap().insert(path, content.into());
        self
    }

    pub fn with_directory(self, path: impl Into<PathBuf>) -> Self {
        self.insert_dir(&path.into());
        self
    }

    /// Content of a file, if present
    pub fn file(&self, path: impl AsRef<Path>) -> Option<String> {
        self.files.lock().unwrap().get(path.as_ref()).cloned()
    }

    /// All file paths below `root`, sorted
    pub fn files_under(&self, root: impl AsRef<Path>) -> Vec<PathBuf> {
        let mut paths: Vec<PathBuf> = self
            .files
            .lock()
            .unwrap()
            .keys()
            .filter(|p| p.starts_with(root.as_ref()))
            .cloned()
            .collect();
        paths.sort();
        paths
    }

    fn insert_dir(&self, path: &Path) {
        let mut directories = self.directories.lock().unwrap();
        for ancestor in path.ancestors() {
            if ancestor.as_os_str().is_empty() {
                break;
            }
            directories.insert(ancestor.to_path_buf());
        }
    }
}

impl Default for MockFileSystemProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl FileSystemProvider for MockFileSystemProvider {
    fn current_dir(&self) -> Result<PathBuf> {
        Ok(self.current_dir.clone())
    }

    fn read_to_string(&self, path: &Path) -> Result<String> {
        self.files
            .lock()
            .unwrap()
            .get(path)
            .cloned()
            .ok_or_else(|| anyhow::anyhow!("File not found: {}", path.display()))
    }

    fn write_file(&self, path: &Path, content: &str) -> Result<()> {
        if let Some(parent) = path.parent() {
            if !self.is_directory(parent) {
                anyhow::bail!("Parent directory does not exist: {}", parent.display());
            }
        }
        self.files
            .lock()
            .unwrap()
            .insert(path.to_path_buf(), content.to_string());
        Ok(())
    }

    fn exists(&self, path: &Path) -> bool {
        self.files.lock().unwrap().contains_key(path) || self.is_directory(path)
    }

    fn is_directory(&self, path: &Path) -> bool {
        self.directories.lock().unwrap().contains(path)
    }

    fn create_dir_all(&self, path: &Path) -> Result<()> {
        self.insert_dir(path);
        Ok(())
    }

    fn remove_dir_all(&self, path: &Path) -> std::result::Result<(), io::Error> {
        if !self.is_directory(path) {
            return Err(io::Error::new(io::ErrorKind::NotFound, "Directory not found"));
        }
        self.files.lock().unwrap().retain(|p, _| !p.starts_with(path));
        self.directories
            .lock()
            .unwrap()
            .retain(|p| !p.starts_with(path));
        Ok(())
    }

    fn copy_dir_filtered(
        &self,
        from: &Path,
        to: &Path,
        keep_dir: &dyn Fn(&Path) -> bool,
    ) -> std::result::Result<(), io::Error> {
        if !self.is_directory(from) {
            return Err(io::Error::new(io::ErrorKind::NotFound, "Directory not found"));
        }

        // Every directory between `from` and the entry must be accepted
        let accepted = |rel: &Path| {
            rel.ancestors()
                .filter(|a| !a.as_os_str().is_empty())
                .all(|a| keep_dir(a))
        };

        let directories: Vec<PathBuf> = self
            .directories
            .lock()
            .unwrap()
            .iter()
            .filter_map(|d| d.strip_prefix(from).ok().map(Path::to_path_buf))
            .collect();
        self.insert_dir(to);
        for rel in directories {
            if accepted(&rel) {
                self.insert_dir(&to.join(rel));
            }
        }

        let files: Vec<(PathBuf, String)> = self
            .files
            .lock()
            .unwrap()
            .iter()
            .filter_map(|(p, c)| p.strip_prefix(from).ok().map(|r| (r.to_path_buf(), c.clone())))
            .collect();
        for (rel, content) in files {
            let parent_ok = rel.parent().map(|p| accepted(p)).unwrap_or(true);
            if parent_ok {
                self.files.lock().unwrap().insert(to.join(rel), content);
            }
        }

        Ok(())
    }
}

/// Record of a process invocation for test verification
#[derive(Debug, Clone, PartialEq)]
pub struct ProcessCall {
    pub command: String,
    pub args: Vec<String>,
    pub working_dir: PathBuf,
    pub env: Vec<(String, String)>,
}

impl ProcessCall {
    /// Command line joined by single spaces, e.g. `go mod graph`
    pub fn line(&self) -> String {
        command_line(&self.command, &self.args)
    }
}

fn command_line<S: AsRef<str>>(command: &str, args: &[S]) -> String {
    std::iter::once(command)
        .chain(args.iter().map(AsRef::as_ref))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Mock process provider with scripted responses and call recording
///
/// Responses are keyed by the full command line. When several responses are
/// queued for one line they are consumed in order; the last one is reused.
pub struct MockProcessProvider {
    calls: RefCell<Vec<ProcessCall>>,
    responses: RefCell<HashMap<String, VecDeque<ProcessOutput>>>,
    missing: HashSet<String>,
}

impl MockProcessProvider {
    pub fn new() -> Self {
        Self {
            calls: RefCell::new(Vec::new()),
            responses: RefCell::new(HashMap::new()),
            missing: HashSet::new(),
        }
    }

    /// Queue a full process output for a command line
    pub fn with_result(self, line: &str, output: ProcessOutput) -> Self {
        self.responses
            .borrow_mut()
            .entry(line.to_string())
            .or_default()
            .push_back(output);
        self
    }

    /// Queue a successful response with the given stdout
    pub fn with_success(self, line: &str, stdout: &str) -> Self {
        self.with_result(
            line,
            ProcessOutput {
                stdout: stdout.to_string(),
                stderr: String::new(),
                success: true,
            },
        )
    }

    /// Queue a non-zero exit with the given stderr
    pub fn with_failure(self, line: &str, stderr: &str) -> Self {
        self.with_result(
            line,
            ProcessOutput {
                stdout: String::new(),
                stderr: stderr.to_string(),
                success: false,
            },
        )
    }

    /// Make every invocation of `command` fail as if it were not installed
    pub fn with_missing_command(mut self, command: &str) -> Self {
        self.missing.insert(command.to_string());
        self
    }

    /// Get all recorded calls for verification
    pub fn get_calls(&self) -> Vec<ProcessCall> {
        self.calls.borrow().clone()
    }

    /// Recorded command lines, in call order
    pub fn get_call_lines(&self) -> Vec<String> {
        self.calls.borrow().iter().map(ProcessCall::line).collect()
    }

    /// Check whether a command line was executed
    pub fn verify_call(&self, line: &str) -> bool {
        self.calls.borrow().iter().any(|call| call.line() == line)
    }
}

impl Default for MockProcessProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl ProcessProvider for MockProcessProvider {
    fn execute(
        &self,
        command: &str,
        args: &[&str],
        working_dir: &Path,
        env: &[(String, String)],
    ) -> std::result::Result<ProcessOutput, ProcessError> {
        self.calls.borrow_mut().push(ProcessCall {
            command: command.to_string(),
            args: args.iter().map(|s| s.to_string()).collect(),
            working_dir: working_dir.to_path_buf(),
            env: env.to_vec(),
        });

        if self.missing.contains(command) {
            return Err(ProcessError::NotFound {
                command: command.to_string(),
            });
        }

        let line = command_line(command, args);
        let mut responses = self.responses.borrow_mut();
        let output = match responses.get_mut(&line) {
            Some(queue) if queue.len() > 1 => queue.pop_front(),
            Some(queue) => queue.front().cloned(),
            None => None,
        };

        // Unscripted calls succeed with empty output
        Ok(output.unwrap_or(ProcessOutput {
            stdout: String::new(),
            stderr: String::new(),
            success: true,
        }))
    }
}

/// Mock config provider for testing
pub struct MockConfigProvider {
    pub app_config: AppConfig,
}

impl MockConfigProvider {
    pub fn new(app_config: AppConfig) -> Self {
        Self { app_config }
    }
}

impl ConfigProvider for MockConfigProvider {
    fn app_config(&self) -> &AppConfig {
        &self.app_config
    }
}

/// Mock command session for testing
pub struct MockCommandSession {
    display_provider: MockDisplayProvider,
    filesystem_provider: MockFileSystemProvider,
    process_provider: MockProcessProvider,
    config_provider: MockConfigProvider,
}

impl MockCommandSession {
    pub fn new() -> Self {
        let filesystem_provider = MockFileSystemProvider::new();
        let config = AppConfig {
            workdir: Some(filesystem_provider.current_dir.clone()),
            ..AppConfig::default()
        };

        Self {
            display_provider: MockDisplayProvider::new(),
            filesystem_provider,
            process_provider: MockProcessProvider::new(),
            config_provider: MockConfigProvider::new(config),
        }
    }

    pub fn with_filesystem(mut self, filesystem: MockFileSystemProvider) -> Self {
        self.filesystem_provider = filesystem;
        self
    }

    pub fn with_process(mut self, process: MockProcessProvider) -> Self {
        self.process_provider = process;
        self
    }

    pub fn with_config(mut self, config: AppConfig) -> Self {
        self.config_provider = MockConfigProvider::new(config);
        self
    }

    /// Concrete display mock for asserting on recorded output
    pub fn mock_display(&self) -> &MockDisplayProvider {
        &self.display_provider
    }

    /// Concrete filesystem mock for asserting on written files
    pub fn mock_filesystem(&self) -> &MockFileSystemProvider {
        &self.filesystem_provider
    }

    /// Concrete process mock for asserting on recorded calls
    pub fn mock_process(&self) -> &MockProcessProvider {
        &self.process_provider
    }
}

impl Default for MockCommandSession {
    fn default() -> Self {
        Self::new()
    }
}

impl Session for MockCommandSession {
    fn display(&self) -> &dyn DisplayProvider {
        &self.display_provider
    }

    fn filesystem(&self) -> &dyn FileSystemProvider {
        &self.filesystem_provider
    }

    fn process(&self) -> &dyn ProcessProvider {
        &self.process_provider
    }

    fn config(&self) -> &dyn ConfigProvider {
        &self.config_provider
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mock_filesystem_tracks_ancestors() {
        let provider = MockFileSystemProvider::new().with_file("/site/themes/a/config.toml", "");

        assert!(provider.is_directory(Path::new("/site/themes/a")));
        assert!(provider.is_directory(Path::new("/site/themes")));
        assert!(provider.exists(Path::new("/site/themes/a/config.toml")));
        assert!(!provider.is_directory(Path::new("/site/themes/a/config.toml")));
    }

    #[test]
    fn test_mock_filesystem_copy_respects_filter() {
        let provider = MockFileSystemProvider::new()
            .with_file("/cache/mod/theme.toml", "name")
            .with_file("/cache/mod/layouts/_default/list.html", "list")
            .with_file("/cache/mod/.cache/blob", "junk");

        provider
            .copy_dir_filtered(Path::new("/cache/mod"), Path::new("/out"), &|rel| {
                !rel.starts_with(".cache")
            })
            .unwrap();

        assert_eq!(
            provider.files_under("/out"),
            vec![
                PathBuf::from("/out/layouts/_default/list.html"),
                PathBuf::from("/out/theme.toml"),
            ]
        );
    }

    #[test]
    fn test_mock_process_provider() {
        let working_dir = PathBuf::from("/test/workdir");
        let provider = MockProcessProvider::new()
            .with_success("go mod graph", "a b@v1.0.0\n")
            .with_failure("go get x", "boom")
            .with_failure("go get x", "still boom")
            .with_missing_command("hg");

        let graph = provider
            .execute("go", &["mod", "graph"], &working_dir, &[])
            .unwrap();
        assert!(graph.success);
        assert_eq!(graph.stdout, "a b@v1.0.0\n");

        let first = provider.execute("go", &["get", "x"], &working_dir, &[]).unwrap();
        let second = provider.execute("go", &["get", "x"], &working_dir, &[]).unwrap();
        let third = provider.execute("go", &["get", "x"], &working_dir, &[]).unwrap();
        assert_eq!(first.stderr, "boom");
        assert_eq!(second.stderr, "still boom");
        assert_eq!(third.stderr, "still boom");

        let unscripted = provider.execute("go", &["env"], &working_dir, &[]).unwrap();
        assert!(unscripted.success);

        assert!(matches!(
            provider.execute("hg", &["status"], &working_dir, &[]),
            Err(ProcessError::NotFound { .. })
        ));

        assert_eq!(provider.get_calls().len(), 6);
        assert!(provider.verify_call("go mod graph"));
        assert!(!provider.verify_call("go mod tidy"));
    }

    #[test]
    fn test_mock_command_session_uses_mock_workdir() {
        let session = MockCommandSession::new();
        assert_eq!(session.workdir().unwrap(), PathBuf::from("/test/workdir"));
    }
}
