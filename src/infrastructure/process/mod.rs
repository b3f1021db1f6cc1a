//! Child process backends
//!
//! Concrete implementations of the ProcessControl port. Exactly one backend is
//! compiled per platform and handed out by [`platform_control`].

use std::io;
use std::path::Path;
use std::process::{Child, Command, ExitStatus};

use crate::domain::ports::{ChildExit, ProcessControl};

#[cfg(not(unix))]
mod fallback;
#[cfg(unix)]
mod unix;

#[cfg(not(unix))]
pub use fallback::TerminateControl;
#[cfg(unix)]
pub use unix::SignalControl;

/// The backend for the platform we were compiled for.
pub fn platform_control() -> Box<dyn ProcessControl> {
    #[cfg(unix)]
    {
        Box::new(SignalControl)
    }
    #[cfg(not(unix))]
    {
        Box::new(TerminateControl)
    }
}

/// Spawn with `working_dir` as cwd; stdout/stderr are inherited so the
/// child's console output reaches the operator directly.
fn spawn_inheriting(program: &Path, working_dir: &Path) -> io::Result<Child> {
    tracing::debug!(
        program = %program.display(),
        cwd = %working_dir.display(),
        "spawning supervised process"
    );
    Command::new(program).current_dir(working_dir).spawn()
}

impl From<ExitStatus> for ChildExit {
    fn from(status: ExitStatus) -> Self {
        #[cfg(unix)]
        {
            use std::os::unix::process::ExitStatusExt;
            ChildExit {
                code: status.code(),
                signal: status.signal(),
            }
        }
        #[cfg(not(unix))]
        {
            ChildExit {
                code: status.code(),
                signal: None,
            }
        }
    }
}
