//! Test environment builder for isolated Stagehand testing.
//!
//! Provides `TestEnv` - a temp project directory and a temp output root, plus
//! helpers to run the stagehand binary against them.

use std::path::{Path, PathBuf};
use std::process::{Child, Command, Output, Stdio};
use std::time::{Duration, Instant};

use tempfile::TempDir;

use super::fixtures::MANIFEST;

/// Result of running the stagehand binary
#[derive(Debug)]
pub struct TestResult {
    pub success: bool,
    pub exit_code: i32,
    pub stdout: String,
    pub stderr: String,
}

impl TestResult {
    fn from_output(output: Output) -> Self {
        Self {
            success: output.status.success(),
            exit_code: output.status.code().unwrap_or(-1),
            stdout: String::from_utf8_lossy(&output.stdout).to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).to_string(),
        }
    }

    /// Combine stdout and stderr
    pub fn combined_output(&self) -> String {
        format!("{}\n{}", self.stdout, self.stderr)
    }
}

/// Isolated project + output directories
pub struct TestEnv {
    pub project_root: TempDir,
    pub output_root: TempDir,
    stagehand_bin: PathBuf,
}

impl TestEnv {
    pub fn builder() -> TestEnvBuilder {
        TestEnvBuilder::new()
    }

    pub fn project_path(&self, relative: &str) -> PathBuf {
        self.project_root.path().join(relative)
    }

    /// Output directory handed to stagehand; does not exist until a run creates it
    pub fn output_dir(&self) -> PathBuf {
        self.output_root.path().join("run")
    }

    pub fn output_path(&self, relative: &str) -> PathBuf {
        self.output_dir().join(relative)
    }

    pub fn write_project_file(&self, relative: &str, content: &str) {
        write_file(&self.project_path(relative), content);
    }

    pub fn remove_project_dir(&self, relative: &str) {
        std::fs::remove_dir_all(self.project_path(relative)).expect("Failed to remove directory");
    }

    /// Run `stagehand <project> <output> [extra...]` to completion
    pub fn run(&self, extra: &[&str]) -> TestResult {
        let output = self
            .command(extra)
            .output()
            .expect("Failed to execute stagehand");
        TestResult::from_output(output)
    }

    /// Run with arbitrary arguments (for usage errors)
    pub fn run_raw(&self, args: &[&str]) -> TestResult {
        let output = self
            .bare_command()
            .args(args)
            .output()
            .expect("Failed to execute stagehand");
        TestResult::from_output(output)
    }

    /// Start `stagehand <project> <output>` without waiting for it
    pub fn spawn(&self, extra: &[&str]) -> Child {
        self.command(extra)
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .expect("Failed to spawn stagehand")
    }

    fn command(&self, extra: &[&str]) -> Command {
        let mut cmd = self.bare_command();
        cmd.args(extra)
            .arg(self.project_root.path())
            .arg(self.output_dir());
        cmd
    }

    fn bare_command(&self) -> Command {
        let mut cmd = Command::new(&self.stagehand_bin);
        cmd.current_dir(self.output_root.path())
            .env("NO_COLOR", "1")
            .env_remove("RUST_LOG");
        cmd
    }
}

/// Builder for TestEnv with fluent API
pub struct TestEnvBuilder {
    manifest: Option<String>,
    config: Option<String>,
    files: Vec<(String, String)>,
}

impl TestEnvBuilder {
    pub fn new() -> Self {
        Self {
            manifest: Some(MANIFEST.to_string()),
            config: None,
            files: Vec::new(),
        }
    }

    /// Replace the default `Cargo.toml`
    pub fn with_manifest(mut self, content: &str) -> Self {
        self.manifest = Some(content.to_string());
        self
    }

    /// Do not write a `Cargo.toml`
    pub fn without_manifest(mut self) -> Self {
        self.manifest = None;
        self
    }

    /// Set `stagehand.toml` content
    pub fn with_config(mut self, toml: &str) -> Self {
        self.config = Some(toml.to_string());
        self
    }

    pub fn with_project_file(mut self, relative: &str, content: &str) -> Self {
        self.files.push((relative.to_string(), content.to_string()));
        self
    }

    pub fn build(self) -> TestEnv {
        let project_root = TempDir::new().expect("Failed to create project dir");
        let output_root = TempDir::new().expect("Failed to create output root");

        if let Some(manifest) = &self.manifest {
            write_file(&project_root.path().join("Cargo.toml"), manifest);
        }
        if let Some(config) = &self.config {
            write_file(&project_root.path().join("stagehand.toml"), config);
        }
        for (relative, content) in &self.files {
            write_file(&project_root.path().join(relative), content);
        }

        TestEnv {
            project_root,
            output_root,
            stagehand_bin: PathBuf::from(env!("CARGO_BIN_EXE_stagehand")),
        }
    }
}

impl Default for TestEnvBuilder {
    fn default() -> Self {
        Self::new()
    }
}

fn write_file(path: &Path, content: &str) {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).expect("Failed to create directories");
    }
    std::fs::write(path, content).expect("Failed to write file");
}

/// Block until `path` exists, panicking after `timeout`
pub fn wait_for_file(path: &Path, timeout: Duration) {
    let deadline = Instant::now() + timeout;
    while !path.exists() {
        assert!(
            Instant::now() < deadline,
            "timed out waiting for {}",
            path.display()
        );
        std::thread::sleep(Duration::from_millis(20));
    }
}

/// Collect a spawned stagehand's output
pub fn finish(child: Child) -> TestResult {
    TestResult::from_output(
        child
            .wait_with_output()
            .expect("Failed to wait for stagehand"),
    )
}
