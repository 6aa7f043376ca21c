//! Hermetic test environment for E2E testing
//!
//! Creates an isolated directory tree with mock executables (bash scripts that
//! log every call) on a private PATH, a work directory for site projects and
//! a fake module cache.

use anyhow::Result;
use serde_json::json;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;
use thememod_lib::application::config::AppConfig;
use thememod_lib::application::session::{
    CommandSession, LiveConfigProvider, LiveFileSystemProvider, LiveProcessProvider,
};

/// Hermetic test environment with mock executables
pub struct TestEnvironment {
    /// Temporary directory for the test environment
    pub temp_dir: TempDir,
    /// Path to the test environment root
    pub root_path: PathBuf,
    /// Path to the bin directory containing mock executables
    pub bin_path: PathBuf,
    /// Path to the work directory for site projects
    pub work_path: PathBuf,
    /// Stand-in for the go module cache
    pub cache_path: PathBuf,
    mock_executables: HashMap<String, MockExecutable>,
}

/// Configuration for a mock executable
#[derive(Debug, Clone)]
pub struct MockExecutable {
    pub name: String,
    pub behavior: MockBehavior,
    /// Log file path for recording calls
    pub log_path: PathBuf,
}

/// Mock executable behavior configuration
#[derive(Debug, Clone)]
pub enum MockBehavior {
    /// Always succeed with empty output
    AlwaysSucceed,
    /// Always fail with error message
    AlwaysFail { error: String },
    /// Succeed with specific output
    SucceedWithOutput { stdout: String, stderr: String },
    /// Raw shell run in the project directory; `$*` holds the arguments
    Script { body: String },
    /// First rule whose pattern equals the full argument list wins
    Conditional { rules: Vec<ConditionalRule> },
}

/// Conditional rule for mock executable behavior
#[derive(Debug, Clone)]
pub struct ConditionalRule {
    /// Arguments pattern to match
    pub args_pattern: Vec<String>,
    /// Behavior when pattern matches
    pub behavior: MockBehavior,
}

impl ConditionalRule {
    pub fn new(args: &str, behavior: MockBehavior) -> Self {
        Self {
            args_pattern: args.split_whitespace().map(str::to_string).collect(),
            behavior,
        }
    }
}

impl MockBehavior {
    pub fn stdout(stdout: impl Into<String>) -> Self {
        MockBehavior::SucceedWithOutput {
            stdout: stdout.into(),
            stderr: String::new(),
        }
    }

    pub fn script(body: impl Into<String>) -> Self {
        MockBehavior::Script { body: body.into() }
    }
}

const HEREDOC_MARKER: &str = "THEMEMOD_MOCK_EOF";

/// Shell fragment for one behavior, ending the script
fn behavior_code(behavior: &MockBehavior) -> String {
    match behavior {
        MockBehavior::AlwaysSucceed => "exit 0\n".to_string(),
        MockBehavior::AlwaysFail { error } => {
            format!("cat >&2 <<'{m}'\n{}\n{m}\nexit 1\n", error, m = HEREDOC_MARKER)
        }
        MockBehavior::SucceedWithOutput { stdout, stderr } => {
            let mut code = String::new();
            if !stdout.is_empty() {
                code.push_str(&format!("cat <<'{m}'\n{}\n{m}\n", stdout, m = HEREDOC_MARKER));
            }
            if !stderr.is_empty() {
                code.push_str(&format!(
                    "cat >&2 <<'{m}'\n{}\n{m}\n",
                    stderr,
                    m = HEREDOC_MARKER
                ));
            }
            code.push_str("exit 0\n");
            code
        }
        MockBehavior::Script { body } => format!("{}\nexit 0\n", body),
        MockBehavior::Conditional { rules } => {
            let mut code = String::new();
            for rule in rules {
                code.push_str(&format!(
                    "if [ \"$*\" = \"{}\" ]; then\n{}fi\n",
                    rule.args_pattern.join(" "),
                    behavior_code(&rule.behavior)
                ));
            }
            code.push_str("exit 0\n");
            code
        }
    }
}

impl TestEnvironment {
    /// Create a new hermetic test environment
    pub fn new() -> Result<Self> {
        let temp_dir = TempDir::new()?;
        let root_path = temp_dir.path().to_path_buf();
        let bin_path = root_path.join("bin");
        let work_path = root_path.join("work");
        let cache_path = root_path.join("modcache");

        fs::create_dir_all(&bin_path)?;
        fs::create_dir_all(&work_path)?;
        fs::create_dir_all(&cache_path)?;

        Ok(Self {
            temp_dir,
            root_path,
            bin_path,
            work_path,
            cache_path,
            mock_executables: HashMap::new(),
        })
    }

    /// Add a mock executable to the environment
    pub fn add_mock_executable(&mut self, name: &str, behavior: MockBehavior) -> Result<()> {
        let log_path = self.root_path.join(format!("{}.log", name));
        let executable_path = self.bin_path.join(name);

        let script = format!(
            "#!/bin/bash\n# Mock executable: {name}\necho \"$(date '+%Y-%m-%d %H:%M:%S') {name} $*\" >> \"{log}\"\n{code}",
            name = name,
            log = log_path.display(),
            code = behavior_code(&behavior)
        );
        fs::write(&executable_path, script)?;

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let mut perms = fs::metadata(&executable_path)?.permissions();
            perms.set_mode(0o755);
            fs::set_permissions(&executable_path, perms)?;
        }

        self.mock_executables.insert(
            name.to_string(),
            MockExecutable {
                name: name.to_string(),
                behavior,
                log_path,
            },
        );
        Ok(())
    }

    /// Registered mock executable by name
    pub fn mock_executable(&self, name: &str) -> Option<&MockExecutable> {
        self.mock_executables.get(name)
    }

    /// PATH with the mock bin directory first
    pub fn get_path_env(&self) -> String {
        format!(
            "{}:{}",
            self.bin_path.display(),
            std::env::var("PATH").unwrap_or_default()
        )
    }

    /// Get the log contents for a mock executable
    pub fn get_mock_log(&self, executable_name: &str) -> Result<String> {
        let log_path = self.root_path.join(format!("{}.log", executable_name));
        if log_path.exists() {
            Ok(fs::read_to_string(log_path)?)
        } else {
            Ok(String::new())
        }
    }

    /// Verify that a mock executable was called with specific arguments
    pub fn verify_mock_call(&self, executable_name: &str, args: &[&str]) -> Result<bool> {
        let expected = format!("{} {}", executable_name, args.join(" "));
        Ok(self.get_mock_calls(executable_name)?.contains(&expected))
    }

    /// Calls made to a mock executable, as `name args...`
    pub fn get_mock_calls(&self, executable_name: &str) -> Result<Vec<String>> {
        let log_content = self.get_mock_log(executable_name)?;
        Ok(log_content
            .lines()
            .filter_map(|line| {
                // Skip the date and time columns
                let parts: Vec<&str> = line.split(' ').collect();
                (parts.len() > 2).then(|| parts[2..].join(" ").trim_end().to_string())
            })
            .collect())
    }

    /// Create a site project with a `config.toml` importing `imports`.
    ///
    /// With `module_path`, a go.mod declaring that module is written too.
    pub fn init_site_project(
        &self,
        name: &str,
        imports: &[&str],
        module_path: Option<&str>,
    ) -> Result<PathBuf> {
        let project_path = self.work_path.join(name);
        fs::create_dir_all(&project_path)?;
        write_component_config(&project_path, imports)?;

        if let Some(module_path) = module_path {
            fs::write(
                project_path.join("go.mod"),
                format!("module {}\n\ngo 1.12\n", module_path),
            )?;
        }
        Ok(project_path)
    }

    /// Lay out a module in the fake cache and return its directory
    pub fn add_cached_module(
        &self,
        path: &str,
        version: &str,
        files: &[(&str, &str)],
    ) -> Result<PathBuf> {
        let dir = self.cache_path.join(format!("{}@{}", path, version));
        fs::create_dir_all(&dir)?;
        for (relative, content) in files {
            let file = dir.join(relative);
            if let Some(parent) = file.parent() {
                fs::create_dir_all(parent)?;
            }
            fs::write(file, content)?;
        }
        Ok(dir)
    }
}

/// Write `config.toml` declaring `imports` in `dir`
pub fn write_component_config(dir: &Path, imports: &[&str]) -> Result<()> {
    let list = imports
        .iter()
        .map(|import| format!("{:?}", import))
        .collect::<Vec<_>>()
        .join(", ");
    fs::write(dir.join("config.toml"), format!("theme = [{}]\n", list))?;
    Ok(())
}

/// JSON object for the main module, as printed by `go list -m -json`
pub fn main_module_json(path: &str, dir: &Path) -> String {
    json!({ "Path": path, "Main": true, "Dir": dir.display().to_string() }).to_string()
}

/// JSON object for a dependency, as printed by `go list -m -json`
pub fn module_json(path: &str, version: &str, dir: &Path) -> String {
    json!({ "Path": path, "Version": version, "Dir": dir.display().to_string() }).to_string()
}

/// A mock `go` answering the module commands used by the client
pub fn go_mock(list_output: &str, graph_output: &str) -> MockBehavior {
    MockBehavior::Conditional {
        rules: vec![
            ConditionalRule::new("mod download", MockBehavior::AlwaysSucceed),
            ConditionalRule::new("list -m -json all", MockBehavior::stdout(list_output)),
            ConditionalRule::new("mod graph", MockBehavior::stdout(graph_output)),
        ],
    }
}

pub type HermeticSession = CommandSession<LiveFileSystemProvider, LiveProcessProvider, LiveConfigProvider>;

/// Builder for creating hermetic test sessions with coordinated mock providers
pub struct HermeticSessionBuilder {
    test_env: TestEnvironment,
    app_config: AppConfig,
}

impl HermeticSessionBuilder {
    pub fn new() -> Result<Self> {
        Ok(Self {
            test_env: TestEnvironment::new()?,
            app_config: AppConfig::default(),
        })
    }

    /// Add a mock executable to the test environment
    pub fn with_mock_executable(mut self, name: &str, behavior: MockBehavior) -> Result<Self> {
        self.test_env.add_mock_executable(name, behavior)?;
        Ok(self)
    }

    /// Set the working directory for the app config
    pub fn with_workdir(mut self, workdir: PathBuf) -> Self {
        self.app_config.workdir = Some(workdir);
        self
    }

    /// Create a site project and use it as the working directory
    pub fn with_site_project(
        mut self,
        name: &str,
        imports: &[&str],
        module_path: Option<&str>,
    ) -> Result<Self> {
        let project_path = self.test_env.init_site_project(name, imports, module_path)?;
        self.app_config.workdir = Some(project_path);
        Ok(self)
    }

    pub fn with_ignore_vendor(mut self) -> Self {
        self.app_config.ignore_vendor = true;
        self
    }

    /// Build the hermetic session with all configured providers
    pub fn build(self) -> Result<(HermeticSession, TestEnvironment)> {
        let session = CommandSession::new_with_providers(
            LiveFileSystemProvider,
            LiveProcessProvider::new_for_test(Some(
                self.test_env.bin_path.to_string_lossy().to_string(),
            )),
            LiveConfigProvider::new(self.app_config),
        );

        Ok((session, self.test_env))
    }

    pub fn test_env(&self) -> &TestEnvironment {
        &self.test_env
    }

    pub fn test_env_mut(&mut self) -> &mut TestEnvironment {
        &mut self.test_env
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::process::Command;

    #[test]
    fn test_environment_creation() {
        let env = TestEnvironment::new().expect("Failed to create test environment");
        assert!(env.root_path.exists());
        assert!(env.bin_path.exists());
        assert!(env.work_path.exists());
        assert!(env.cache_path.exists());
    }

    #[test]
    fn test_mock_executable_logs_calls() {
        let mut env = TestEnvironment::new().expect("Failed to create test environment");
        env.add_mock_executable("go", go_mock("{}", "a b@v1"))
            .expect("Failed to add mock executable");

        let output = Command::new(env.bin_path.join("go"))
            .args(["mod", "graph"])
            .output()
            .expect("mock go should run");

        assert!(output.status.success());
        assert_eq!(String::from_utf8_lossy(&output.stdout), "a b@v1\n");
        assert!(env.verify_mock_call("go", &["mod", "graph"]).unwrap());
    }

    #[test]
    fn test_site_project_initialization() {
        let env = TestEnvironment::new().expect("Failed to create test environment");

        let project = env
            .init_site_project("site", &["a", "github.com/b/theme"], Some("example.com/site"))
            .expect("Failed to initialize site project");

        let config = fs::read_to_string(project.join("config.toml")).unwrap();
        assert_eq!(config, "theme = [\"a\", \"github.com/b/theme\"]\n");
        assert!(
            fs::read_to_string(project.join("go.mod"))
                .unwrap()
                .starts_with("module example.com/site")
        );
    }

    #[test]
    fn test_path_env_generation() {
        let env = TestEnvironment::new().expect("Failed to create test environment");
        let path_env = env.get_path_env();

        assert!(path_env.starts_with(&env.bin_path.display().to_string()));
        assert!(path_env.contains(':'));
    }
}
