//! File System Implementations
//!
//! Everything that writes into the output directory.

mod stager;

pub use stager::{ArtifactStager, BundleOutcome, BundleReport, StagingReport};
