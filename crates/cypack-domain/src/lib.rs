#![deny(clippy::all, warnings)]
#![allow(
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::must_use_candidate
)]

pub mod config;
pub mod loader;
pub mod options;
pub mod package;
pub mod suite;

pub use config::{load_project_config, ConfigError, ProjectConfig, SuiteEntry};
pub use loader::{plugin_loader, support_loader, GENERATED_MARKER};
pub use options::{CypressConfig, RuntimeOptions};
pub use package::{DependencyConflict, MergeReport, PackageManifest, DEPENDENCY_SECTIONS};
pub use suite::{validate_suite_name, SuiteCapabilities, SuiteError, RESERVED_SUITE_NAMES};
