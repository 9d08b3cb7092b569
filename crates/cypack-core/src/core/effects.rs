use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};

use super::fs::{mirror_dir, remove_dir_all_writable, replace_link, write_atomic};

/// Filesystem primitives the workspace runtime is built on.
pub trait FileSystem: Send + Sync {
    fn exists(&self, path: &Path) -> bool;
    fn read_to_string(&self, path: &Path) -> Result<String>;
    fn create_dir_all(&self, path: &Path) -> Result<()>;
    fn remove_dir_all(&self, path: &Path) -> Result<()>;
    fn mirror(&self, src: &Path, dest: &Path) -> Result<()>;
    fn symlink(&self, target: &Path, link: &Path) -> Result<()>;
    fn write_atomic(&self, path: &Path, contents: &[u8]) -> Result<()>;
}

pub type SharedFileSystem = Arc<dyn FileSystem>;

#[derive(Debug, Default, Clone, Copy)]
pub struct SystemFileSystem;

impl SystemFileSystem {
    #[must_use]
    pub fn shared() -> SharedFileSystem {
        Arc::new(Self)
    }
}

impl FileSystem for SystemFileSystem {
    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }

    fn read_to_string(&self, path: &Path) -> Result<String> {
        std::fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))
    }

    fn create_dir_all(&self, path: &Path) -> Result<()> {
        std::fs::create_dir_all(path).with_context(|| format!("creating {}", path.display()))
    }

    fn remove_dir_all(&self, path: &Path) -> Result<()> {
        remove_dir_all_writable(path)
    }

    fn mirror(&self, src: &Path, dest: &Path) -> Result<()> {
        mirror_dir(src, dest)
    }

    fn symlink(&self, target: &Path, link: &Path) -> Result<()> {
        replace_link(target, link)
    }

    fn write_atomic(&self, path: &Path, contents: &[u8]) -> Result<()> {
        write_atomic(path, contents)
    }
}
