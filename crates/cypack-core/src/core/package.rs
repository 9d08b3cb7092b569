//! Folding suite `package.json` manifests into the workspace manifest.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use cypack_domain::PackageManifest;

use super::effects::SharedFileSystem;

/// Accumulates one suite's dependency manifest into a shared manifest.
pub trait ManifestMerger: Send {
    fn merge(&mut self, manifest: &Path) -> Result<()>;

    /// Drops whatever earlier sessions accumulated under `workspace_root`.
    fn reset(&mut self, _workspace_root: &Path) -> Result<()> {
        Ok(())
    }
}

/// Merges `dependencies`/`devDependencies` into a single `package.json`.
pub struct PackageJsonMerger {
    target: PathBuf,
    fs: SharedFileSystem,
}

impl PackageJsonMerger {
    pub fn new(target: impl Into<PathBuf>, fs: SharedFileSystem) -> Self {
        Self {
            target: target.into(),
            fs,
        }
    }

    fn load_shared(&self) -> Result<PackageManifest> {
        if !self.fs.exists(&self.target) {
            return Ok(PackageManifest::default());
        }
        let contents = self.fs.read_to_string(&self.target)?;
        PackageManifest::parse(&contents)
            .with_context(|| format!("invalid shared manifest {}", self.target.display()))
    }
}

impl ManifestMerger for PackageJsonMerger {
    /// Rewrites the shared manifest as `{"private": true}` when it lives inside
    /// the workspace; a manifest elsewhere belongs to the project and is kept.
    fn reset(&mut self, workspace_root: &Path) -> Result<()> {
        if !self.target.starts_with(workspace_root) {
            tracing::debug!(
                shared = %self.target.display(),
                "shared manifest lives outside the workspace; keeping it"
            );
            return Ok(());
        }
        self.fs.write_atomic(
            &self.target,
            PackageManifest::default().render()?.as_bytes(),
        )
    }

    fn merge(&mut self, manifest: &Path) -> Result<()> {
        let contents = self.fs.read_to_string(manifest)?;
        let incoming = PackageManifest::parse(&contents)
            .with_context(|| format!("invalid suite manifest {}", manifest.display()))?;
        let existed = self.fs.exists(&self.target);
        let mut shared = self.load_shared()?;
        let report = shared
            .merge_dependencies(&incoming)
            .with_context(|| format!("failed to merge {}", manifest.display()))?;
        for conflict in &report.conflicts {
            tracing::warn!(
                manifest = %manifest.display(),
                section = %conflict.section,
                package = %conflict.package,
                kept = %conflict.kept,
                ignored = %conflict.ignored,
                "dependency version conflict; keeping the first registered requirement"
            );
        }
        if existed && report.added.is_empty() {
            tracing::debug!(manifest = %manifest.display(), "shared manifest already up to date");
            return Ok(());
        }
        self.fs
            .write_atomic(&self.target, shared.render()?.as_bytes())?;
        tracing::debug!(
            manifest = %manifest.display(),
            shared = %self.target.display(),
            added = report.added.len(),
            "merged suite dependencies"
        );
        Ok(())
    }
}
