use std::collections::HashMap;
use std::env;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

pub const ROOT_ENV: &str = "CYPACK_ROOT";
pub const CONFIG_ENV: &str = "CYPACK_CONFIG";
pub const BASE_URL_ENV: &str = "CYPACK_BASE_URL";

pub const DEFAULT_ROOT: &str = ".cypress";
pub const DEFAULT_CONFIG_FILE: &str = "cypack.toml";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GlobalOptions {
    pub quiet: bool,
    pub verbose: u8,
    pub trace: bool,
    pub json: bool,
}

#[derive(Debug, Clone)]
pub(crate) struct EnvSnapshot {
    vars: HashMap<String, String>,
}

impl EnvSnapshot {
    pub(crate) fn capture() -> Self {
        Self {
            vars: env::vars().collect(),
        }
    }

    /// Returns the variable when it is set to something other than whitespace.
    pub(crate) fn var(&self, key: &str) -> Option<&str> {
        self.vars
            .get(key)
            .map(String::as_str)
            .filter(|value| !value.trim().is_empty())
    }

    #[cfg(test)]
    pub(crate) fn testing(pairs: &[(&str, &str)]) -> Self {
        let vars = pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        Self { vars }
    }
}

/// Settings drawn from the environment; explicit CLI flags take precedence.
#[derive(Debug, Clone, Default)]
pub struct Config {
    pub(crate) workspace: WorkspaceConfig,
}

impl Config {
    /// Builds a configuration snapshot from the current process environment.
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_snapshot(&EnvSnapshot::capture())
    }

    pub(crate) fn from_snapshot(snapshot: &EnvSnapshot) -> Self {
        Self {
            workspace: WorkspaceConfig {
                root: snapshot.var(ROOT_ENV).map(PathBuf::from),
                config_file: snapshot.var(CONFIG_ENV).map(PathBuf::from),
                base_url: snapshot.var(BASE_URL_ENV).map(ToOwned::to_owned),
            },
        }
    }

    #[must_use]
    pub fn workspace(&self) -> &WorkspaceConfig {
        &self.workspace
    }
}

#[derive(Debug, Clone, Default)]
pub struct WorkspaceConfig {
    pub root: Option<PathBuf>,
    pub config_file: Option<PathBuf>,
    pub base_url: Option<String>,
}
