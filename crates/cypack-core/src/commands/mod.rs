//! Command handlers invoked by the CLI.

mod probe;
mod workspace;

pub use probe::{suite_probe, ProbeRequest};
pub use workspace::{workspace_build, workspace_init, BuildRequest, InitRequest};
