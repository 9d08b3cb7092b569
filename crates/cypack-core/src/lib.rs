#![deny(clippy::all, warnings)]

mod core;

pub mod commands;

pub(crate) use crate::core::config;
pub(crate) use crate::core::{effects, package, runtime, tooling};

pub use crate::core::config::context::{CommandContext, CommandGroup, CommandInfo};
pub use crate::core::config::{
    Config, GlobalOptions, WorkspaceConfig, BASE_URL_ENV, CONFIG_ENV, DEFAULT_CONFIG_FILE,
    DEFAULT_ROOT, ROOT_ENV,
};
pub use crate::core::effects::{FileSystem, SharedFileSystem, SystemFileSystem};
pub use crate::core::package::{ManifestMerger, PackageJsonMerger};
pub use crate::core::runtime::{
    ContributionLists, SuiteRuntime, WorkspaceLayout, CONFIG_FILE, PACKAGE_FILE,
    PLUGIN_LOADER_FILE, SUPPORT_LOADER_FILE,
};
pub use crate::core::tooling::outcome::{
    format_status_message, to_json_response, CommandStatus, ExecutionOutcome,
};

pub use crate::commands::{
    suite_probe, workspace_build, workspace_init, BuildRequest, InitRequest, ProbeRequest,
};
