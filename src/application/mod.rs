//! Application Layer
//!
//! Use cases that orchestrate the run.
//! This layer:
//! - Depends on Domain layer (manifest, layout, ports)
//! - Coordinates between Infrastructure and Domain
//!
//! ## Use Cases
//!
//! - `Orchestrator` - build, stage, then supervise (see [`pipeline`])
//! - `Supervisor` - drive one child process to termination (see [`supervise`])

pub mod pipeline;
pub mod supervise;

pub use pipeline::{Orchestrator, RunPlan, RunSummary};
pub use supervise::{SupervisionOutcome, Supervisor, SupervisorOptions, SupervisorState};
