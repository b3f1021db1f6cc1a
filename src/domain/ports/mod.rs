//! Domain Ports (Interfaces)
//!
//! These traits define the boundaries of the domain layer.
//! Infrastructure layer provides concrete implementations.

pub mod build_tool;
pub mod process_control;
pub mod run_events;

pub use build_tool::BuildTool;
pub use process_control::{ChildExit, ExitPath, ForceReason, ProcessControl, RunningProcess};
pub use run_events::{NoopEventSink, RunEvent, RunEventSink};
