//! Configuration type definitions

use std::path::Path;
use std::time::Duration;

use serde::Deserialize;

use crate::error::StagehandResult;

use super::loader::{self, ConfigWarning};

/// How the project is built and where the build leaves its output
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct BuildConfig {
    #[serde(default = "default_program")]
    pub program: String,

    #[serde(default = "default_build_args")]
    pub args: Vec<String>,

    /// Build output root, relative to the project directory
    #[serde(default = "default_target_dir")]
    pub target_dir: String,

    /// Profile path segment under `target_dir`
    #[serde(default = "default_profile")]
    pub profile: String,
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self {
            program: default_program(),
            args: default_build_args(),
            target_dir: default_target_dir(),
            profile: default_profile(),
        }
    }
}

fn default_program() -> String {
    "cargo".to_string()
}

fn default_build_args() -> Vec<String> {
    vec!["build".to_string(), "--release".to_string()]
}

fn default_target_dir() -> String {
    "target".to_string()
}

fn default_profile() -> String {
    "release".to_string()
}

/// Asset bundles mirrored next to the executable
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct StageConfig {
    #[serde(default = "default_bundles")]
    pub bundles: Vec<String>,
}

impl Default for StageConfig {
    fn default() -> Self {
        Self {
            bundles: default_bundles(),
        }
    }
}

fn default_bundles() -> Vec<String> {
    vec!["static".to_string(), "cfg".to_string()]
}

/// Child process supervision knobs
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SuperviseConfig {
    /// Seconds to wait after the graceful signal before forcing termination.
    /// Zero waits forever.
    #[serde(default)]
    pub grace_period_secs: u64,

    #[serde(default = "default_poll_interval_ms")]
    pub poll_interval_ms: u64,
}

impl Default for SuperviseConfig {
    fn default() -> Self {
        Self {
            grace_period_secs: 0,
            poll_interval_ms: default_poll_interval_ms(),
        }
    }
}

fn default_poll_interval_ms() -> u64 {
    50
}

impl SuperviseConfig {
    pub fn grace_period(&self) -> Option<Duration> {
        match self.grace_period_secs {
            0 => None,
            secs => Some(Duration::from_secs(secs)),
        }
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms.max(1))
    }
}

/// Output configuration
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct OutputConfig {
    #[serde(default)]
    pub color: ColorMode,

    #[serde(default = "default_true")]
    pub unicode: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            color: ColorMode::default(),
            unicode: true,
        }
    }
}

fn default_true() -> bool {
    true
}

/// Color output mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ColorMode {
    #[default]
    Auto,
    Always,
    Never,
}

/// Main configuration structure
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub build: BuildConfig,

    #[serde(default)]
    pub stage: StageConfig,

    #[serde(default)]
    pub supervise: SuperviseConfig,

    #[serde(default)]
    pub output: OutputConfig,
}

impl Config {
    /// Load configuration and collect non-fatal warnings (e.g. unknown keys).
    pub fn load_with_warnings(path: &Path) -> StagehandResult<(Self, Vec<ConfigWarning>)> {
        loader::load_with_warnings(path)
    }

    /// Load `stagehand.toml` from the project directory, or defaults if absent.
    pub fn load_for_project(project_dir: &Path) -> StagehandResult<(Self, Vec<ConfigWarning>)> {
        loader::load_for_project(project_dir)
    }
}
