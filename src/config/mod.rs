//! Configuration module for Stagehand
//!
//! Settings are resolved in this order:
//! 1. CLI flags (highest priority)
//! 2. Project config (`<project_dir>/stagehand.toml`)
//! 3. Built-in defaults (lowest priority)
//!
//! The defaults reproduce a plain `cargo build --release` run that stages the
//! `static` and `cfg` bundles.

mod loader;
mod types;

pub use loader::{ConfigWarning, CONFIG_FILE_NAME};
pub use types::{BuildConfig, ColorMode, Config, OutputConfig, StageConfig, SuperviseConfig};
