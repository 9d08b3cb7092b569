//! Workspace lifecycle: reinitialization and suite registration.

mod layout;
mod register;

#[cfg(test)]
mod test_support;

use std::path::{Path, PathBuf};

use anyhow::Result;
use cypack_domain::{plugin_loader, support_loader, CypressConfig, SuiteCapabilities};
use indexmap::IndexSet;
use serde::Serialize;

use crate::core::effects::SharedFileSystem;
use crate::core::package::ManifestMerger;

pub use layout::{
    WorkspaceLayout, CONFIG_FILE, PACKAGE_FILE, PLUGIN_LOADER_FILE, SUPPORT_LOADER_FILE,
};

/// Suites that contributed support or plugin code, in registration order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ContributionLists {
    support: Vec<String>,
    plugins: Vec<String>,
}

impl ContributionLists {
    pub fn support(&self) -> &[String] {
        &self.support
    }

    pub fn plugins(&self) -> &[String] {
        &self.plugins
    }

    pub fn support_script(&self) -> String {
        support_loader(&self.support)
    }

    pub fn plugin_script(&self) -> String {
        plugin_loader(&self.plugins)
    }
}

/// Owns one workspace tree and the registration state of the current session.
pub struct SuiteRuntime {
    layout: WorkspaceLayout,
    fs: SharedFileSystem,
    merger: Box<dyn ManifestMerger>,
    contributions: ContributionLists,
    registered: IndexSet<String>,
}

impl SuiteRuntime {
    pub fn new(
        root: impl Into<PathBuf>,
        fs: SharedFileSystem,
        merger: Box<dyn ManifestMerger>,
    ) -> Self {
        Self {
            layout: WorkspaceLayout::new(root),
            fs,
            merger,
            contributions: ContributionLists::default(),
            registered: IndexSet::new(),
        }
    }

    pub fn root(&self) -> &Path {
        self.layout.root()
    }

    pub fn layout(&self) -> &WorkspaceLayout {
        &self.layout
    }

    pub fn contributions(&self) -> &ContributionLists {
        &self.contributions
    }

    /// Names registered since the last [`SuiteRuntime::initiate`], in order.
    pub fn registered(&self) -> impl Iterator<Item = &str> {
        self.registered.iter().map(String::as_str)
    }

    /// Resets the workspace to an empty session.
    ///
    /// Everything under `integration/`, `suites/`, `support/` and `plugins/`
    /// is deleted and recreated empty, the manifest merger drops dependencies
    /// from earlier sessions, `cypress.json` is rewritten from `options`, and
    /// both loader scripts are written with zero contributions.
    ///
    /// # Errors
    /// Returns the first filesystem failure; the tree may then be partially
    /// reset and a later `initiate` converges again.
    pub fn initiate(&mut self, options: &impl CypressConfig) -> Result<()> {
        let root = self.layout.root().to_path_buf();
        if !self.fs.exists(&root) {
            self.fs.create_dir_all(&root)?;
        }
        for dir in self.layout.session_dirs() {
            self.fs.remove_dir_all(&dir)?;
        }
        self.fs.create_dir_all(&self.layout.integration())?;
        self.fs.create_dir_all(&self.layout.common())?;
        self.fs.create_dir_all(&self.layout.suites())?;
        self.fs.create_dir_all(&self.layout.support())?;
        self.fs.create_dir_all(&self.layout.plugins())?;

        self.contributions = ContributionLists::default();
        self.registered.clear();
        self.merger.reset(&root)?;

        let config = options.cypress_json()?;
        self.fs
            .write_atomic(&self.layout.config_file(), config.as_bytes())?;
        self.write_plugin_loader()?;
        self.write_support_loader()?;
        tracing::info!(root = %root.display(), "initialized workspace");
        Ok(())
    }

    /// Registers a suite; `Ok(false)` means `path` does not exist and nothing
    /// was touched.
    ///
    /// # Errors
    /// Fails for invalid or duplicate names, filesystem failures, and
    /// failures reported by the manifest merger.
    pub fn add_suite(&mut self, name: &str, path: &Path) -> Result<bool> {
        self.register(name, path).map(|caps| caps.is_some())
    }

    fn write_plugin_loader(&self) -> Result<()> {
        self.fs.write_atomic(
            &self.layout.plugin_loader(),
            self.contributions.plugin_script().as_bytes(),
        )
    }

    fn write_support_loader(&self) -> Result<()> {
        self.fs.write_atomic(
            &self.layout.support_loader(),
            self.contributions.support_script().as_bytes(),
        )
    }

    fn probe(&self, suite_root: &Path) -> SuiteCapabilities {
        SuiteCapabilities::probe(suite_root, |path| self.fs.exists(path))
    }
}
