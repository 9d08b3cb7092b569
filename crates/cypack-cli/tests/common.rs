#![allow(dead_code)]

use std::{
    fs,
    path::{Path, PathBuf},
};

use assert_cmd::assert::Assert;
use assert_cmd::Command;
use serde_json::Value;
use tempfile::TempDir;

pub fn cypack(cwd: &Path) -> Command {
    let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("cypack");
    cmd.current_dir(cwd)
        .env_remove("CYPACK_ROOT")
        .env_remove("CYPACK_CONFIG")
        .env_remove("CYPACK_BASE_URL")
        .env("NO_COLOR", "1");
    cmd
}

pub fn project(prefix: &str) -> (TempDir, PathBuf) {
    let temp = tempfile::Builder::new()
        .prefix(prefix)
        .tempdir()
        .expect("tempdir");
    let root = temp.path().join("project");
    fs::create_dir_all(&root).expect("project dir");
    (temp, root)
}

/// Writes the given files under `dir/name`; paths ending in `/` become directories.
pub fn write_suite(dir: &Path, name: &str, files: &[&str]) -> PathBuf {
    let suite = dir.join(name);
    fs::create_dir_all(&suite).expect("suite dir");
    for file in files {
        let path = suite.join(file.trim_end_matches('/'));
        if file.ends_with('/') {
            fs::create_dir_all(&path).expect("create dir");
            continue;
        }
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("create parent");
        }
        let body = if file.ends_with("package.json") {
            format!("{{\"dependencies\": {{\"{name}-helpers\": \"^1.0.0\"}}}}\n")
        } else {
            format!("// {name}/{file}\n")
        };
        fs::write(&path, body).expect("write fixture");
    }
    suite
}

pub fn parse_json(assert: &Assert) -> Value {
    serde_json::from_slice(&assert.get_output().stdout).expect("valid json")
}

pub fn read(path: impl AsRef<Path>) -> String {
    fs::read_to_string(path.as_ref()).expect("read file")
}
