//! Console presentation
//!
//! Everything the operator sees on the terminal: section banners, status
//! lines and error blocks. Diagnostics logging goes through `tracing` instead.

pub mod blocks;
pub mod context;
pub mod error;
pub mod primitives;
pub mod terminal;
pub mod theme;
pub mod views;
