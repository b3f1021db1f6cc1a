//! Process Supervisor
//!
//! Runs the staged executable and stays with it until it has been reaped.
//!
//! ```text
//! NotStarted -> Running -> Terminated
//!                  |
//!                  +-> GracefulShutdownRequested -> Terminated
//!                               |
//!                               +-> ForceTerminationRequested -> Terminated
//! ```
//!
//! The first interrupt while `Running` sends the graceful shutdown signal.
//! Another interrupt, or an elapsed grace period, escalates to a forced kill.
//! Failing to deliver either signal is reported and otherwise ignored; the
//! supervisor keeps waiting for the child regardless.

use std::path::Path;
use std::time::{Duration, Instant};

use crate::config::SuperviseConfig;
use crate::domain::ports::{
    ChildExit, ExitPath, ForceReason, ProcessControl, RunEvent, RunEventSink, RunningProcess,
};
use crate::error::{StagehandError, StagehandResult};
use crate::interrupt::Interrupts;

/// Lifecycle of the one supervised process
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SupervisorState {
    NotStarted,
    Running,
    GracefulShutdownRequested,
    ForceTerminationRequested,
    Terminated,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SupervisorOptions {
    /// How long to wait after the graceful signal before killing. `None`
    /// waits forever.
    pub grace_period: Option<Duration>,
    pub poll_interval: Duration,
}

impl Default for SupervisorOptions {
    fn default() -> Self {
        Self::from(&SuperviseConfig::default())
    }
}

impl From<&SuperviseConfig> for SupervisorOptions {
    fn from(config: &SuperviseConfig) -> Self {
        Self {
            grace_period: config.grace_period(),
            poll_interval: config.poll_interval(),
        }
    }
}

/// How supervision ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SupervisionOutcome {
    pub pid: u32,
    pub exit: ChildExit,
    pub path: ExitPath,
}

pub struct Supervisor<'a> {
    control: &'a dyn ProcessControl,
    interrupts: Interrupts,
    options: SupervisorOptions,
    events: &'a dyn RunEventSink,
    state: SupervisorState,
}

impl<'a> Supervisor<'a> {
    pub fn new(
        control: &'a dyn ProcessControl,
        interrupts: Interrupts,
        options: SupervisorOptions,
        events: &'a dyn RunEventSink,
    ) -> Self {
        Self {
            control,
            interrupts,
            options,
            events,
            state: SupervisorState::NotStarted,
        }
    }

    pub fn state(&self) -> SupervisorState {
        self.state
    }

    /// Spawn `executable` in `working_dir` and block until it has exited.
    ///
    /// Interrupts counted before this call are treated as arriving while the
    /// child runs.
    pub fn run(&mut self, executable: &Path, working_dir: &Path) -> StagehandResult<SupervisionOutcome> {
        let mut process = self
            .control
            .spawn(executable, working_dir)
            .map_err(|source| StagehandError::Spawn {
                path: executable.to_path_buf(),
                source,
            })?;
        let pid = process.id();
        self.transition(SupervisorState::Running);
        self.events.on_event(RunEvent::ProcessStarted {
            pid,
            executable: executable.to_path_buf(),
        });

        let mut handled = 0;
        let mut shutdown_requested_at: Option<Instant> = None;

        loop {
            match process.try_wait() {
                Ok(Some(exit)) => return Ok(self.finish(pid, exit)),
                Ok(None) => {}
                Err(err) => {
                    tracing::error!(pid, error = %err, "failed to poll supervised process");
                    if let Err(kill_err) = process.force_terminate() {
                        tracing::warn!(pid, error = %kill_err, "could not terminate process");
                    }
                    return Err(StagehandError::Supervision(err));
                }
            }

            let seen = self.interrupts.count();
            if seen > handled {
                handled = seen;
                match self.state {
                    SupervisorState::Running => {
                        self.events.on_event(RunEvent::InterruptReceived);
                        self.request_graceful_shutdown(process.as_mut(), pid);
                        shutdown_requested_at = Some(Instant::now());
                    }
                    SupervisorState::GracefulShutdownRequested => {
                        self.force_terminate(process.as_mut(), pid, ForceReason::RepeatedInterrupt);
                    }
                    _ => tracing::debug!(pid, "interrupt ignored, already terminating"),
                }
            }

            if self.state == SupervisorState::GracefulShutdownRequested {
                if let (Some(grace), Some(since)) = (self.options.grace_period, shutdown_requested_at)
                {
                    if since.elapsed() >= grace {
                        self.force_terminate(
                            process.as_mut(),
                            pid,
                            ForceReason::GracePeriodElapsed,
                        );
                    }
                }
            }

            std::thread::sleep(self.options.poll_interval);
        }
    }

    fn request_graceful_shutdown(&mut self, process: &mut dyn RunningProcess, pid: u32) {
        self.transition(SupervisorState::GracefulShutdownRequested);
        match process.request_graceful_shutdown() {
            Ok(()) => self.events.on_event(RunEvent::ShutdownSignalSent { pid }),
            Err(err) => {
                tracing::warn!(pid, error = %err, "graceful shutdown signal not delivered");
                self.events.on_event(RunEvent::ShutdownSignalFailed {
                    pid,
                    error: err.to_string(),
                });
            }
        }
    }

    fn force_terminate(&mut self, process: &mut dyn RunningProcess, pid: u32, reason: ForceReason) {
        self.transition(SupervisorState::ForceTerminationRequested);
        self.events
            .on_event(RunEvent::ForcedTermination { pid, reason });
        if let Err(err) = process.force_terminate() {
            tracing::warn!(pid, error = %err, "forced termination failed");
        }
    }

    fn finish(&mut self, pid: u32, exit: ChildExit) -> SupervisionOutcome {
        let path = match self.state {
            SupervisorState::GracefulShutdownRequested => ExitPath::Graceful,
            SupervisorState::ForceTerminationRequested => ExitPath::Forced,
            _ => ExitPath::Normal,
        };
        self.transition(SupervisorState::Terminated);
        self.events.on_event(RunEvent::ProcessExited { exit, path });
        SupervisionOutcome { pid, exit, path }
    }

    fn transition(&mut self, next: SupervisorState) {
        tracing::debug!(from = ?self.state, to = ?next, "supervisor state");
        self.state = next;
    }
}
