//! Common test utilities for Stagehand CLI tests.
//!
//! This module provides:
//! - `TestEnv`: isolated project and output directories plus CLI runners
//! - Fixtures: fake build commands and server scripts

#![allow(dead_code)]

pub mod env;
pub mod fixtures;

pub use env::*;
pub use fixtures::*;
