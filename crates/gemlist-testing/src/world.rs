//! TestWorld pattern for CLI integration tests.
//!
//! Each world owns a temp directory with its own data dir, so config
//! files and recent searches never leak between tests.

use anyhow::Result;
use assert_cmd::Command;
use serde_json::Value;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

use crate::fixtures;

/// Isolated environment for running the `gemlist` binary.
///
/// # Example
/// ```no_run
/// use gemlist_testing::TestWorld;
///
/// let world = TestWorld::new();
/// let result = world.run(&["defaults", "--family", "watches"]).unwrap();
/// assert!(result.success());
/// ```
pub struct TestWorld {
    temp_dir: TempDir,
    data_dir: PathBuf,
    env_vars: HashMap<String, String>,
}

impl Default for TestWorld {
    fn default() -> Self {
        Self::new()
    }
}

impl TestWorld {
    pub fn new() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let data_dir = temp_dir.path().join(".gemlist");
        std::fs::create_dir_all(&data_dir).expect("Failed to create data dir");

        Self {
            temp_dir,
            data_dir,
            env_vars: HashMap::new(),
        }
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    pub fn temp_dir(&self) -> &Path {
        self.temp_dir.path()
    }

    /// Set an environment variable for CLI execution.
    pub fn with_env(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.env_vars.insert(key.into(), value.into());
        self
    }

    /// Write a JSON input file next to the data dir and return its path.
    pub fn write_json(&self, name: &str, value: &Value) -> Result<PathBuf> {
        fixtures::write_json(self.temp_dir.path(), name, value)
    }

    /// Write `config.toml` into the data dir.
    pub fn write_config(&self, toml: &str) -> Result<PathBuf> {
        let path = self.data_dir.join("config.toml");
        std::fs::write(&path, toml)?;
        Ok(path)
    }

    /// Point a command at this world's data dir and environment.
    ///
    /// The caller provides the base command (e.g. from `cargo_bin_cmd!("gemlist")`).
    pub fn configure_command<'a>(&self, cmd: &'a mut Command) -> &'a mut Command {
        cmd.arg("--data-dir").arg(self.data_dir());
        cmd.current_dir(self.temp_dir.path());
        // A developer's own token must not reach test requests
        cmd.env_remove("GEMLIST_TOKEN");
        cmd.env_remove("GEMLIST_PATH");

        for (key, value) in &self.env_vars {
            cmd.env(key, value);
        }

        cmd
    }

    /// Run the `gemlist` binary with `args` in this world.
    #[allow(deprecated)]
    pub fn run(&self, args: &[&str]) -> Result<CliResult> {
        let mut cmd = Command::cargo_bin("gemlist")
            .map_err(|e| anyhow::anyhow!("Failed to find gemlist binary: {}", e))?;
        self.configure_command(&mut cmd);
        cmd.args(args);

        let output = cmd.output()?;
        Ok(CliResult {
            status: output.status,
            stdout: String::from_utf8_lossy(&output.stdout).to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).to_string(),
        })
    }
}

/// Result of a CLI command execution.
#[derive(Debug)]
pub struct CliResult {
    pub status: std::process::ExitStatus,
    pub stdout: String,
    pub stderr: String,
}

impl CliResult {
    pub fn success(&self) -> bool {
        self.status.success()
    }

    /// Parse stdout as JSON.
    pub fn json(&self) -> Result<Value> {
        Ok(serde_json::from_str(&self.stdout)?)
    }

    pub fn stdout(&self) -> &str {
        &self.stdout
    }

    pub fn stderr(&self) -> &str {
        &self.stderr
    }
}
