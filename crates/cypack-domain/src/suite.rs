use std::path::{Path, PathBuf};

use serde::Serialize;

/// Names that would collide with fixed workspace entries.
pub const RESERVED_SUITE_NAMES: &[&str] = &["common"];

const INTEGRATION_DIR: &str = "integration";
const STEPS_DIR: &str = "steps";
const SUPPORT_DIR: &str = "support";
const PLUGINS_DIR: &str = "plugins";
const ENTRY_POINT: &str = "index.js";
const MANIFEST_FILE: &str = "package.json";

/// User-facing problems with a suite registration.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum SuiteError {
    #[error("suite name '{name}' must use only ASCII letters, digits, '_', '-' or '.' and must not start with '.'")]
    InvalidName { name: String },
    #[error("suite name '{name}' is reserved by the workspace layout")]
    ReservedName { name: String },
    #[error("suite '{name}' is already registered in this workspace")]
    Duplicate { name: String },
}

/// Checks that `name` is usable both as a path segment and inside a generated
/// `require('...')` string.
pub fn validate_suite_name(name: &str) -> Result<(), SuiteError> {
    let valid = !name.is_empty()
        && !name.starts_with('.')
        && name
            .chars()
            .all(|ch| ch.is_ascii_alphanumeric() || matches!(ch, '_' | '-' | '.'));
    if !valid {
        return Err(SuiteError::InvalidName {
            name: name.to_string(),
        });
    }
    if RESERVED_SUITE_NAMES.contains(&name) {
        return Err(SuiteError::ReservedName {
            name: name.to_string(),
        });
    }
    Ok(())
}

/// Optional pieces a suite directory contributes to the workspace.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[allow(clippy::struct_excessive_bools)]
pub struct SuiteCapabilities {
    pub has_integration: bool,
    pub has_shared_steps: bool,
    pub has_support: bool,
    pub has_plugins: bool,
    pub has_manifest: bool,
}

impl SuiteCapabilities {
    /// Probes `suite_root` using the provided existence check.
    pub fn probe(suite_root: &Path, exists: impl Fn(&Path) -> bool) -> Self {
        Self {
            has_integration: exists(&Self::integration_dir(suite_root)),
            has_shared_steps: exists(&Self::steps_dir(suite_root)),
            has_support: exists(&Self::support_dir(suite_root).join(ENTRY_POINT)),
            has_plugins: exists(&Self::plugins_dir(suite_root).join(ENTRY_POINT)),
            has_manifest: exists(&Self::manifest_path(suite_root)),
        }
    }

    pub fn integration_dir(suite_root: &Path) -> PathBuf {
        suite_root.join(INTEGRATION_DIR)
    }

    pub fn steps_dir(suite_root: &Path) -> PathBuf {
        suite_root.join(STEPS_DIR)
    }

    pub fn support_dir(suite_root: &Path) -> PathBuf {
        suite_root.join(SUPPORT_DIR)
    }

    pub fn plugins_dir(suite_root: &Path) -> PathBuf {
        suite_root.join(PLUGINS_DIR)
    }

    pub fn manifest_path(suite_root: &Path) -> PathBuf {
        suite_root.join(MANIFEST_FILE)
    }

    /// True when the suite contributes nothing beyond its own symlink.
    pub fn is_bare(&self) -> bool {
        *self == Self::default()
    }
}
