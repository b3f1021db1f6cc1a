//! Backend for platforms without signal delivery
//!
//! There is no portable way to ask a console process on these platforms to
//! shut down cooperatively, so the graceful request is a direct termination.

use std::io;
use std::path::Path;
use std::process::Child;

use crate::domain::ports::{ChildExit, ProcessControl, RunningProcess};

use super::spawn_inheriting;

/// ProcessControl backend that terminates directly
#[derive(Debug, Clone, Copy, Default)]
pub struct TerminateControl;

impl ProcessControl for TerminateControl {
    fn name(&self) -> &'static str {
        "terminate"
    }

    fn spawn(&self, program: &Path, working_dir: &Path) -> io::Result<Box<dyn RunningProcess>> {
        let child = spawn_inheriting(program, working_dir)?;
        Ok(Box::new(TerminatedChild { child }))
    }
}

struct TerminatedChild {
    child: Child,
}

impl RunningProcess for TerminatedChild {
    fn id(&self) -> u32 {
        self.child.id()
    }

    fn try_wait(&mut self) -> io::Result<Option<ChildExit>> {
        Ok(self.child.try_wait()?.map(ChildExit::from))
    }

    fn request_graceful_shutdown(&mut self) -> io::Result<()> {
        self.child.kill()
    }

    fn force_terminate(&mut self) -> io::Result<()> {
        self.child.kill()
    }
}
