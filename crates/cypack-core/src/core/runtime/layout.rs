use std::path::{Path, PathBuf};

pub const CONFIG_FILE: &str = "cypress.json";
pub const PLUGIN_LOADER_FILE: &str = "plugins.js";
pub const SUPPORT_LOADER_FILE: &str = "support.js";
pub const PACKAGE_FILE: &str = "package.json";

const INTEGRATION_DIR: &str = "integration";
const COMMON_DIR: &str = "common";
const SUITES_DIR: &str = "suites";
const SUPPORT_DIR: &str = "support";
const PLUGINS_DIR: &str = "plugins";

/// Fixed on-disk layout of a workspace, as the runner expects it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkspaceLayout {
    root: PathBuf,
}

impl WorkspaceLayout {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn integration(&self) -> PathBuf {
        self.root.join(INTEGRATION_DIR)
    }

    pub fn common(&self) -> PathBuf {
        self.integration().join(COMMON_DIR)
    }

    pub fn suites(&self) -> PathBuf {
        self.root.join(SUITES_DIR)
    }

    pub fn support(&self) -> PathBuf {
        self.root.join(SUPPORT_DIR)
    }

    pub fn plugins(&self) -> PathBuf {
        self.root.join(PLUGINS_DIR)
    }

    pub fn config_file(&self) -> PathBuf {
        self.root.join(CONFIG_FILE)
    }

    pub fn plugin_loader(&self) -> PathBuf {
        self.root.join(PLUGIN_LOADER_FILE)
    }

    pub fn support_loader(&self) -> PathBuf {
        self.root.join(SUPPORT_LOADER_FILE)
    }

    pub fn package_manifest(&self) -> PathBuf {
        self.root.join(PACKAGE_FILE)
    }

    /// Directories wiped by every reinitialization.
    pub fn session_dirs(&self) -> [PathBuf; 4] {
        [
            self.integration(),
            self.suites(),
            self.support(),
            self.plugins(),
        ]
    }

    pub fn suite_link(&self, name: &str) -> PathBuf {
        self.suites().join(name)
    }

    pub fn integration_link(&self, name: &str) -> PathBuf {
        self.integration().join(name)
    }

    pub fn steps_link(&self, name: &str) -> PathBuf {
        self.common().join(name)
    }

    pub fn support_copy(&self, name: &str) -> PathBuf {
        self.support().join(name)
    }

    pub fn plugins_copy(&self, name: &str) -> PathBuf {
        self.plugins().join(name)
    }
}
