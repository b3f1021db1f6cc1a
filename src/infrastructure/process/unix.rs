//! Signal-capable backend
//!
//! Graceful shutdown is SIGINT, the same signal a terminal sends on Ctrl+C,
//! so the child runs whatever interrupt handling it already has.

use std::io;
use std::path::Path;
use std::process::Child;

use nix::sys::signal::{kill, Signal};
use nix::unistd::Pid;

use crate::domain::ports::{ChildExit, ProcessControl, RunningProcess};

use super::spawn_inheriting;

/// ProcessControl backend for unix platforms
#[derive(Debug, Clone, Copy, Default)]
pub struct SignalControl;

impl ProcessControl for SignalControl {
    fn name(&self) -> &'static str {
        "sigint"
    }

    fn spawn(&self, program: &Path, working_dir: &Path) -> io::Result<Box<dyn RunningProcess>> {
        let child = spawn_inheriting(program, working_dir)?;
        Ok(Box::new(SignalChild { child }))
    }
}

struct SignalChild {
    child: Child,
}

impl RunningProcess for SignalChild {
    fn id(&self) -> u32 {
        self.child.id()
    }

    fn try_wait(&mut self) -> io::Result<Option<ChildExit>> {
        Ok(self.child.try_wait()?.map(ChildExit::from))
    }

    fn request_graceful_shutdown(&mut self) -> io::Result<()> {
        let pid = i32::try_from(self.child.id()).map_err(io::Error::other)?;
        kill(Pid::from_raw(pid), Signal::SIGINT).map_err(io::Error::from)
    }

    fn force_terminate(&mut self) -> io::Result<()> {
        self.child.kill()
    }
}
