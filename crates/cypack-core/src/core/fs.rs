use std::fs;
use std::io::Write;
use std::path::Path;

use anyhow::{anyhow, Context, Result};
use walkdir::WalkDir;

/// Grants the owner write access across a tree so copied read-only suite
/// files can be deleted. Links are left alone; failures are ignored.
fn unlock_tree(path: &Path) {
    for entry in WalkDir::new(path).follow_links(false).into_iter().flatten() {
        if entry.path_is_symlink() {
            continue;
        }
        let Ok(meta) = entry.metadata() else {
            continue;
        };
        let mut perms = meta.permissions();
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let owner = if meta.is_dir() { 0o700 } else { 0o600 };
            if perms.mode() & owner == owner {
                continue;
            }
            perms.set_mode(perms.mode() | owner);
        }
        #[cfg(not(unix))]
        {
            if !perms.readonly() {
                continue;
            }
            perms.set_readonly(false);
        }
        let _ = fs::set_permissions(entry.path(), perms);
    }
}

/// Removes `path` and everything below it. Symlinks are unlinked, never followed.
pub(crate) fn remove_dir_all_writable(path: &Path) -> Result<()> {
    let meta = match fs::symlink_metadata(path) {
        Ok(meta) => meta,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(()),
        Err(err) => return Err(err).with_context(|| format!("failed to stat {}", path.display())),
    };
    if !meta.is_dir() {
        remove_link_or_file(path)?;
        return Ok(());
    }
    unlock_tree(path);
    fs::remove_dir_all(path).with_context(|| format!("failed to remove {}", path.display()))?;
    Ok(())
}

fn remove_link_or_file(path: &Path) -> Result<()> {
    fs::remove_file(path)
        .or_else(|err| {
            if err.kind() == std::io::ErrorKind::NotFound {
                return Ok(());
            }
            // Windows directory symlinks are removed as directories.
            fs::remove_dir(path).or_else(|dir_err| {
                if dir_err.kind() == std::io::ErrorKind::NotFound {
                    Ok(())
                } else {
                    Err(dir_err)
                }
            })
        })
        .with_context(|| format!("failed to remove {}", path.display()))
}

fn remove_path_for_replace(path: &Path) -> Result<()> {
    let meta = match fs::symlink_metadata(path) {
        Ok(meta) => meta,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(()),
        Err(err) => return Err(err).with_context(|| format!("failed to stat {}", path.display())),
    };
    if meta.file_type().is_symlink() || !meta.is_dir() {
        return remove_link_or_file(path);
    }
    // Only empty directories are replaced; populated ones belong to someone else.
    fs::remove_dir(path).with_context(|| {
        format!(
            "refusing to replace non-empty directory {} with a link",
            path.display()
        )
    })
}

/// Points `link` at `target`, replacing any previous link at that location.
///
/// On Unix this is a symlink; on Windows a directory or file symlink depending
/// on the target.
pub(crate) fn replace_link(target: &Path, link: &Path) -> Result<()> {
    if !target.exists() {
        return Err(anyhow!(
            "cannot create link; target does not exist: {}",
            target.display()
        ));
    }
    if let Some(parent) = link.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("failed to create {}", parent.display()))?;
    }
    if fs::read_link(link).is_ok_and(|current| current == target) {
        return Ok(());
    }
    remove_path_for_replace(link)?;

    #[cfg(unix)]
    let linked = std::os::unix::fs::symlink(target, link);
    #[cfg(windows)]
    let linked = if target.is_dir() {
        std::os::windows::fs::symlink_dir(target, link)
    } else {
        std::os::windows::fs::symlink_file(target, link)
    };
    #[cfg(not(any(unix, windows)))]
    let linked: std::io::Result<()> = Err(std::io::Error::new(
        std::io::ErrorKind::Unsupported,
        "symlinks are not supported on this platform",
    ));

    linked.with_context(|| {
        format!(
            "failed to create symlink {} -> {}",
            link.display(),
            target.display()
        )
    })
}

/// Recursively copies `src` into `dest`, overwriting files that already exist.
///
/// Nested symlinks are recreated as links on Unix and copied by content
/// elsewhere.
pub(crate) fn mirror_dir(src: &Path, dest: &Path) -> Result<()> {
    fs::create_dir_all(dest).with_context(|| format!("failed to create {}", dest.display()))?;
    for entry in WalkDir::new(src).follow_links(false) {
        let entry = entry.with_context(|| format!("failed to walk {}", src.display()))?;
        let path = entry.path();
        let relative = path.strip_prefix(src).unwrap_or(path);
        if relative.as_os_str().is_empty() {
            continue;
        }
        let target = dest.join(relative);
        let file_type = entry.file_type();
        if file_type.is_dir() {
            fs::create_dir_all(&target)
                .with_context(|| format!("failed to create {}", target.display()))?;
        } else if file_type.is_symlink() {
            copy_symlink(path, &target)?;
        } else {
            if let Some(parent) = target.parent() {
                fs::create_dir_all(parent)
                    .with_context(|| format!("failed to create {}", parent.display()))?;
            }
            fs::copy(path, &target).with_context(|| {
                format!("failed to copy {} to {}", path.display(), target.display())
            })?;
        }
    }
    Ok(())
}

#[cfg(unix)]
fn copy_symlink(src: &Path, dest: &Path) -> Result<()> {
    let pointee =
        fs::read_link(src).with_context(|| format!("failed to read link {}", src.display()))?;
    remove_path_for_replace(dest)?;
    std::os::unix::fs::symlink(&pointee, dest)
        .with_context(|| format!("failed to recreate link {}", dest.display()))
}

#[cfg(not(unix))]
fn copy_symlink(src: &Path, dest: &Path) -> Result<()> {
    if src.is_dir() {
        return mirror_dir(src, dest);
    }
    fs::copy(src, dest)
        .map(|_| ())
        .with_context(|| format!("failed to copy {} to {}", src.display(), dest.display()))
}

/// Writes `contents` to a sibling temp file and renames it over `path`.
pub(crate) fn write_atomic(path: &Path, contents: &[u8]) -> Result<()> {
    let parent = path
        .parent()
        .filter(|parent| !parent.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    fs::create_dir_all(parent).with_context(|| format!("failed to create {}", parent.display()))?;
    let mut tmp = tempfile::Builder::new()
        .prefix(".cypack-")
        .tempfile_in(parent)
        .with_context(|| format!("failed to create temp file under {}", parent.display()))?;
    tmp.write_all(contents)
        .with_context(|| format!("failed to write {}", tmp.path().display()))?;
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        tmp.as_file()
            .set_permissions(fs::Permissions::from_mode(0o644))
            .with_context(|| format!("failed to set permissions on {}", tmp.path().display()))?;
    }
    tmp.persist(path)
        .map_err(|err| err.error)
        .with_context(|| format!("failed to write {}", path.display()))?;
    Ok(())
}
