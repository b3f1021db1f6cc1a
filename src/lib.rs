//! Stagehand - build, stage and supervise a server binary
//!
//! Stagehand runs a project's build tool, copies the resulting executable and
//! its asset bundles into a clean output directory, launches it there, and
//! forwards Ctrl+C to it as a graceful shutdown request.

pub mod application;
pub mod config;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod interrupt;

#[cfg(all(test, unix))]
mod test_support;

// Re-exports for convenience
pub use application::{Orchestrator, RunPlan, RunSummary, SupervisionOutcome, Supervisor};
pub use config::{Config, ConfigWarning};
pub use error::{ErrorClass, StagehandError, StagehandResult};
pub use interrupt::Interrupts;
