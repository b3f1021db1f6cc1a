//! Infrastructure Layer
//!
//! Concrete implementations of domain ports.
//! This layer handles all I/O operations.
//!
//! ## Structure
//!
//! - `build/` - external build tool invocation
//! - `fs/` - staging into the output directory
//! - `process/` - child process backends (signal-capable vs. not)

pub mod build;
pub mod fs;
pub mod process;

// Re-export for convenience
pub use build::CommandBuildTool;
pub use fs::{ArtifactStager, BundleOutcome, BundleReport, StagingReport};
pub use process::platform_control;
