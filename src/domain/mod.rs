//! Domain Layer
//!
//! Pure logic and the interfaces the rest of the crate plugs into.
//!
//! ## Structure
//!
//! - `manifest` - product name from `Cargo.toml`
//! - `layout` - where the build leaves its output
//! - `ports/` - interface definitions for infrastructure (build tool, child
//!   process control, run events)

pub mod layout;
pub mod manifest;
pub mod ports;

pub use layout::ProjectLayout;
pub use manifest::{BuildManifest, NameSource, MANIFEST_FILE};
