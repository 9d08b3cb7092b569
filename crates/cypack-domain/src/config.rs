//! `cypack.toml` project configuration.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use serde_json::{Map, Value};

use crate::options::RuntimeOptions;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid {}: {message}", .path.display())]
    Parse { path: PathBuf, message: String },
}

#[derive(Debug, Clone, PartialEq)]
pub struct SuiteEntry {
    pub name: String,
    pub path: PathBuf,
}

/// A parsed `cypack.toml`; `root` and suite paths are resolved against the
/// config file's directory.
#[derive(Debug, Clone, PartialEq)]
pub struct ProjectConfig {
    pub source: PathBuf,
    pub root: Option<PathBuf>,
    /// Shared manifest location, left relative so it follows whichever
    /// workspace root is in effect.
    pub package_json: Option<PathBuf>,
    pub options: RuntimeOptions,
    pub suites: Vec<SuiteEntry>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawConfig {
    #[serde(default)]
    runtime: RawRuntime,
    #[serde(default, rename = "suite")]
    suites: Vec<RawSuite>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
struct RawRuntime {
    root: Option<PathBuf>,
    base_url: Option<String>,
    package_json: Option<PathBuf>,
    #[serde(default)]
    cypress: Map<String, Value>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawSuite {
    name: String,
    path: PathBuf,
}

pub fn load_project_config(path: &Path) -> Result<ProjectConfig, ConfigError> {
    let contents = fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    parse_project_config(path, &contents)
}

/// Parses `contents` as if read from `path`; relative paths resolve against
/// the directory containing `path`.
pub fn parse_project_config(path: &Path, contents: &str) -> Result<ProjectConfig, ConfigError> {
    let raw: RawConfig = toml_edit::de::from_str(contents).map_err(|err| ConfigError::Parse {
        path: path.to_path_buf(),
        message: err.to_string().trim().to_string(),
    })?;
    let base = path.parent().unwrap_or_else(|| Path::new("."));
    let root = raw.runtime.root.map(|root| base.join(root));
    let options = RuntimeOptions {
        base_url: raw.runtime.base_url,
        overrides: raw.runtime.cypress,
    };
    let suites = raw
        .suites
        .into_iter()
        .map(|suite| SuiteEntry {
            name: suite.name,
            path: base.join(suite.path),
        })
        .collect();
    Ok(ProjectConfig {
        source: path.to_path_buf(),
        root,
        package_json: raw.runtime.package_json,
        options,
        suites,
    })
}
