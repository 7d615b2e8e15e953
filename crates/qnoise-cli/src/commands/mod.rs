//! CLI command implementations.

pub mod apply;
pub mod check;
pub mod common;
pub mod gates;
pub mod version;
