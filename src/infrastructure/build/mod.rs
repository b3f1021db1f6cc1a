//! Build tool implementations
//!
//! Concrete implementations of the BuildTool port.

mod command;

pub use command::CommandBuildTool;
