//! Internal implementation modules for `cypack-core`.

pub mod config;
pub mod effects;
pub(crate) mod fs;
pub mod package;
pub mod runtime;
pub mod tooling;
