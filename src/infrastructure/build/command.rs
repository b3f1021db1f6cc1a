//! Command-backed build tool
//!
//! Runs the configured program (by default `cargo build --release`) inside
//! the project directory. Output goes straight to the operator's terminal.

use std::path::Path;
use std::process::Command;

use crate::config::BuildConfig;
use crate::domain::ports::BuildTool;
use crate::error::{StagehandError, StagehandResult};

/// Build tool that spawns an external program and waits for it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandBuildTool {
    program: String,
    args: Vec<String>,
}

impl CommandBuildTool {
    pub fn new(program: impl Into<String>, args: Vec<String>) -> Self {
        Self {
            program: program.into(),
            args,
        }
    }

    pub fn from_config(build: &BuildConfig) -> Self {
        Self::new(build.program.clone(), build.args.clone())
    }
}

impl BuildTool for CommandBuildTool {
    fn describe(&self) -> String {
        std::iter::once(self.program.as_str())
            .chain(self.args.iter().map(String::as_str))
            .collect::<Vec<_>>()
            .join(" ")
    }

    fn build(&self, project_dir: &Path) -> StagehandResult<()> {
        tracing::debug!(
            command = %self.describe(),
            cwd = %project_dir.display(),
            "invoking build tool"
        );

        let status = Command::new(&self.program)
            .args(&self.args)
            .current_dir(project_dir)
            .status()
            .map_err(|source| StagehandError::BuildLaunch {
                program: self.program.clone(),
                source,
            })?;

        if !status.success() {
            return Err(StagehandError::BuildFailed {
                program: self.program.clone(),
                code: status.code(),
            });
        }

        tracing::info!(command = %self.describe(), "build finished");
        Ok(())
    }
}
