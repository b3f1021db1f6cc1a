//! BuildTool port - abstraction over the external build invocation

use std::path::Path;

use crate::error::StagehandResult;

/// Runs the project's build to completion.
///
/// Implementations:
/// - `CommandBuildTool` - spawns the configured program (e.g. `cargo build --release`)
/// - test doubles that succeed, fail, or drop files into the project
pub trait BuildTool {
    /// Human-readable command line, for status output
    fn describe(&self) -> String;

    /// Block until the build finishes. `Ok` only on a zero exit status.
    fn build(&self, project_dir: &Path) -> StagehandResult<()>;
}
