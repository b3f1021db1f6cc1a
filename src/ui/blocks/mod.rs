pub mod error;
pub mod section;
pub mod warning;
