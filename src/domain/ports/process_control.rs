//! ProcessControl port - capability interface for the supervised child
//!
//! The supervisor only ever talks to these traits. Platform differences
//! (SIGINT vs. direct termination) live entirely in the backend picked at
//! startup by `infrastructure::process::platform_control`.

use std::fmt;
use std::io;
use std::path::Path;

/// How a child process ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ChildExit {
    /// Exit code, if the process exited normally
    pub code: Option<i32>,
    /// Terminating signal number, on platforms that have signals
    pub signal: Option<i32>,
}

impl ChildExit {
    pub fn from_code(code: i32) -> Self {
        Self {
            code: Some(code),
            signal: None,
        }
    }

    pub fn from_signal(signal: i32) -> Self {
        Self {
            code: None,
            signal: Some(signal),
        }
    }

    pub fn success(&self) -> bool {
        self.code == Some(0)
    }
}

impl fmt::Display for ChildExit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.code, self.signal) {
            (Some(code), _) => write!(f, "exit code {}", code),
            (None, Some(signal)) => write!(f, "signal {}", signal),
            (None, None) => write!(f, "unknown status"),
        }
    }
}

/// Which way the supervised process reached `Terminated`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitPath {
    /// The child exited on its own
    Normal,
    /// The child exited after receiving the graceful shutdown signal
    Graceful,
    /// The child had to be forcibly terminated
    Forced,
}

/// Why the supervisor escalated to forced termination
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ForceReason {
    /// A further interrupt arrived while waiting on graceful shutdown
    RepeatedInterrupt,
    /// The configured grace period elapsed
    GracePeriodElapsed,
}

/// Spawns supervised children.
///
/// Implementations:
/// - `SignalControl` - unix, graceful shutdown is SIGINT
/// - `TerminateControl` - platforms without signals, graceful shutdown is a direct kill
pub trait ProcessControl {
    /// Short name of the shutdown strategy, for logs
    fn name(&self) -> &'static str;

    /// Start `program` with `working_dir` as its cwd, inheriting stdout/stderr.
    fn spawn(&self, program: &Path, working_dir: &Path) -> io::Result<Box<dyn RunningProcess>>;
}

/// Handle to one running child
pub trait RunningProcess {
    fn id(&self) -> u32;

    /// Non-blocking reap. `Ok(None)` while the child is still running.
    fn try_wait(&mut self) -> io::Result<Option<ChildExit>>;

    /// Ask the child to shut down cooperatively.
    fn request_graceful_shutdown(&mut self) -> io::Result<()>;

    /// Last resort: kill the child outright.
    fn force_terminate(&mut self) -> io::Result<()>;
}
