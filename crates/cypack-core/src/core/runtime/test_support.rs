use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use anyhow::Result;
use cypack_domain::CypressConfig;

use crate::core::effects::{FileSystem, SystemFileSystem};
use crate::core::package::ManifestMerger;

/// Real filesystem that also records every mutating call.
#[derive(Default)]
pub(super) struct RecordingFileSystem {
    inner: SystemFileSystem,
    pub(super) mutations: Mutex<Vec<String>>,
}

impl RecordingFileSystem {
    fn record(&self, op: &str, path: &Path) {
        self.mutations
            .lock()
            .unwrap()
            .push(format!("{op} {}", path.display()));
    }

    pub(super) fn mutation_count(&self) -> usize {
        self.mutations.lock().unwrap().len()
    }
}

impl FileSystem for RecordingFileSystem {
    fn exists(&self, path: &Path) -> bool {
        self.inner.exists(path)
    }

    fn read_to_string(&self, path: &Path) -> Result<String> {
        self.inner.read_to_string(path)
    }

    fn create_dir_all(&self, path: &Path) -> Result<()> {
        self.record("mkdir", path);
        self.inner.create_dir_all(path)
    }

    fn remove_dir_all(&self, path: &Path) -> Result<()> {
        self.record("remove", path);
        self.inner.remove_dir_all(path)
    }

    fn mirror(&self, src: &Path, dest: &Path) -> Result<()> {
        self.record("mirror", dest);
        self.inner.mirror(src, dest)
    }

    fn symlink(&self, target: &Path, link: &Path) -> Result<()> {
        self.record("symlink", link);
        self.inner.symlink(target, link)
    }

    fn write_atomic(&self, path: &Path, contents: &[u8]) -> Result<()> {
        self.record("write", path);
        self.inner.write_atomic(path, contents)
    }
}

#[derive(Clone, Default)]
pub(super) struct RecordingMerger {
    pub(super) calls: Arc<Mutex<Vec<PathBuf>>>,
    pub(super) resets: Arc<Mutex<Vec<PathBuf>>>,
}

impl RecordingMerger {
    pub(super) fn calls(&self) -> Vec<PathBuf> {
        self.calls.lock().unwrap().clone()
    }

    pub(super) fn resets(&self) -> Vec<PathBuf> {
        self.resets.lock().unwrap().clone()
    }
}

impl ManifestMerger for RecordingMerger {
    fn merge(&mut self, manifest: &Path) -> Result<()> {
        self.calls.lock().unwrap().push(manifest.to_path_buf());
        Ok(())
    }

    fn reset(&mut self, workspace_root: &Path) -> Result<()> {
        self.resets.lock().unwrap().push(workspace_root.to_path_buf());
        Ok(())
    }
}

/// Config source with a fixed payload.
pub(super) struct StaticConfig(pub(super) &'static str);

impl CypressConfig for StaticConfig {
    fn cypress_json(&self) -> Result<String> {
        Ok(self.0.to_string())
    }
}

/// Builds a suite directory containing the given relative files.
pub(super) fn write_suite(root: &Path, name: &str, files: &[&str]) -> PathBuf {
    let suite = root.join(name);
    fs::create_dir_all(&suite).unwrap();
    for rel in files {
        let path = suite.join(rel);
        if rel.ends_with('/') {
            fs::create_dir_all(&path).unwrap();
            continue;
        }
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        let body = if rel.ends_with("package.json") {
            "{\"dependencies\": {}}".to_string()
        } else {
            format!("// {name}/{rel}\n")
        };
        fs::write(&path, body).unwrap();
    }
    suite
}
