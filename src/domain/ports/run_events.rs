//! Run Event Port
//!
//! Observable interface for a build-stage-supervise run. The console view
//! renders these as status lines; tests record them.

use std::path::PathBuf;

use crate::domain::manifest::NameSource;
use crate::domain::ports::process_control::{ChildExit, ExitPath, ForceReason};

/// Event emitted during a run
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunEvent {
    /// Build tool is about to be invoked
    BuildStarted { project_dir: PathBuf, command: String },

    /// Build tool exited zero
    BuildSucceeded,

    /// Product name determined from the manifest
    ProductResolved { name: String, source: NameSource },

    /// Staging into the output directory started
    StagingStarted { output_dir: PathBuf },

    /// Executable copied
    ExecutableStaged { destination: PathBuf },

    /// Asset bundle mirrored (destination replaced)
    BundleMirrored {
        name: String,
        destination: PathBuf,
        files: usize,
    },

    /// Asset bundle absent from the project
    BundleSkipped { name: String },

    /// Asset bundle absent from the project; its stale mirror was removed
    BundlePruned { name: String, destination: PathBuf },

    /// Everything is in place
    StagingCompleted {
        executable: PathBuf,
        output_dir: PathBuf,
    },

    /// Child spawned
    ProcessStarted { pid: u32, executable: PathBuf },

    /// Operator pressed Ctrl+C while the child was running
    InterruptReceived,

    /// Graceful shutdown signal delivered
    ShutdownSignalSent { pid: u32 },

    /// Graceful shutdown signal could not be delivered (non-fatal)
    ShutdownSignalFailed { pid: u32, error: String },

    /// Supervisor escalated to a forced kill
    ForcedTermination { pid: u32, reason: ForceReason },

    /// Child reaped
    ProcessExited { exit: ChildExit, path: ExitPath },
}

/// Trait for receiving run events
///
/// Implementations can be:
/// - ConsoleEventSink: status lines in the terminal
/// - NoopEventSink: silent operation
pub trait RunEventSink {
    /// Handle a run event
    fn on_event(&self, event: RunEvent);
}

/// No-op event sink for silent operation
pub struct NoopEventSink;

impl RunEventSink for NoopEventSink {
    fn on_event(&self, _event: RunEvent) {
        // Do nothing
    }
}
