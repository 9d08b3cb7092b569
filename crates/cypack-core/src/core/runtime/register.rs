use std::path::Path;

use anyhow::{Context, Result};
use cypack_domain::{validate_suite_name, SuiteCapabilities, SuiteError};

use super::SuiteRuntime;

impl SuiteRuntime {
    /// Registers the suite at `path` under `name` and reports what it
    /// contributed, or `None` when `path` does not exist.
    ///
    /// Names are validated and checked for duplicates before anything on
    /// disk changes. Each capability is wired independently:
    /// the suite itself, `integration/` and `steps/` are linked, while
    /// `support/` and `plugins/` are copied so the generated loaders address a
    /// stable per-suite path.
    ///
    /// # Errors
    /// Fails for invalid or duplicate names and for any filesystem or merge
    /// failure. There is no rollback; reinitialize to get a clean tree.
    pub fn register(&mut self, name: &str, path: &Path) -> Result<Option<SuiteCapabilities>> {
        validate_suite_name(name)?;
        if self.registered.contains(name) {
            return Err(SuiteError::Duplicate {
                name: name.to_string(),
            }
            .into());
        }
        let path = std::path::absolute(path)
            .with_context(|| format!("failed to resolve suite path {}", path.display()))?;
        if !self.fs.exists(&path) {
            tracing::debug!(suite = name, path = %path.display(), "suite path not found");
            return Ok(None);
        }

        let caps = self.probe(&path);
        self.registered.insert(name.to_string());

        self.fs.symlink(&path, &self.layout.suite_link(name))?;

        if caps.has_integration {
            tracing::debug!(suite = name, "linking integration specs");
            self.fs.symlink(
                &SuiteCapabilities::integration_dir(&path),
                &self.layout.integration_link(name),
            )?;
        }

        if caps.has_shared_steps {
            tracing::debug!(suite = name, "linking shared steps");
            self.fs.symlink(
                &SuiteCapabilities::steps_dir(&path),
                &self.layout.steps_link(name),
            )?;
        }

        if caps.has_support {
            tracing::debug!(suite = name, "copying support code");
            self.fs.mirror(
                &SuiteCapabilities::support_dir(&path),
                &self.layout.support_copy(name),
            )?;
            self.contributions.support.push(name.to_string());
            self.write_support_loader()?;
        }

        if caps.has_plugins {
            tracing::debug!(suite = name, "copying plugin code");
            self.fs.mirror(
                &SuiteCapabilities::plugins_dir(&path),
                &self.layout.plugins_copy(name),
            )?;
            self.contributions.plugins.push(name.to_string());
            self.write_plugin_loader()?;
        }

        if caps.has_manifest {
            tracing::debug!(suite = name, "merging dependency manifest");
            self.merger
                .merge(&SuiteCapabilities::manifest_path(&path))?;
        }

        tracing::info!(suite = name, path = %path.display(), ?caps, "registered suite");
        Ok(Some(caps))
    }
}
