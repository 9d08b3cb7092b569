use std::fmt;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use cypack_domain::{load_project_config, ProjectConfig};

use crate::config::{Config, GlobalOptions, DEFAULT_CONFIG_FILE, DEFAULT_ROOT};
use crate::effects::{FileSystem, SharedFileSystem};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CommandGroup {
    Init,
    Build,
    Probe,
}

impl fmt::Display for CommandGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            CommandGroup::Init => "init",
            CommandGroup::Build => "build",
            CommandGroup::Probe => "probe",
        };
        f.write_str(name)
    }
}

#[derive(Clone, Copy, Debug)]
pub struct CommandInfo {
    pub group: CommandGroup,
    pub name: &'static str,
}

impl CommandInfo {
    #[must_use]
    pub const fn new(group: CommandGroup, name: &'static str) -> Self {
        Self { group, name }
    }
}

pub struct CommandContext<'a> {
    global: &'a GlobalOptions,
    config: Config,
    cwd: PathBuf,
    fs: SharedFileSystem,
}

impl<'a> CommandContext<'a> {
    /// Creates a new command context with the provided global options.
    ///
    /// # Errors
    /// Returns an error if the working directory cannot be determined.
    pub fn new(global: &'a GlobalOptions, fs: SharedFileSystem) -> Result<Self> {
        let cwd = std::env::current_dir().context("failed to read the working directory")?;
        Ok(Self::with_config(
            global,
            fs,
            Config::from_env(),
            cwd,
        ))
    }

    pub(crate) fn with_config(
        global: &'a GlobalOptions,
        fs: SharedFileSystem,
        config: Config,
        cwd: PathBuf,
    ) -> Self {
        Self {
            global,
            config,
            cwd,
            fs,
        }
    }

    pub fn global(&self) -> &GlobalOptions {
        self.global
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn fs(&self) -> &dyn FileSystem {
        self.fs.as_ref()
    }

    pub fn shared_fs(&self) -> SharedFileSystem {
        self.fs.clone()
    }

    pub fn cwd(&self) -> &Path {
        &self.cwd
    }

    /// Loads the project configuration named by `explicit`, `CYPACK_CONFIG`, or
    /// `cypack.toml` in the working directory, in that order.
    ///
    /// Only the implicit `cypack.toml` may be absent.
    ///
    /// # Errors
    /// Returns a [`cypack_domain::ConfigError`] when a named file is unreadable or invalid.
    pub fn project_config(&self, explicit: Option<&Path>) -> Result<Option<ProjectConfig>> {
        let named = explicit
            .map(Path::to_path_buf)
            .or_else(|| self.config.workspace().config_file.clone());
        let path = match named {
            Some(path) => self.cwd.join(path),
            None => {
                let implicit = self.cwd.join(DEFAULT_CONFIG_FILE);
                if !self.fs.exists(&implicit) {
                    return Ok(None);
                }
                implicit
            }
        };
        tracing::debug!(config = %path.display(), "loading project config");
        Ok(Some(load_project_config(&path)?))
    }

    /// Picks the workspace root: flag, then environment, then config file,
    /// then `.cypress` under the working directory.
    pub fn workspace_root(&self, explicit: Option<&Path>, project: Option<&ProjectConfig>) -> PathBuf {
        explicit
            .map(|root| self.cwd.join(root))
            .or_else(|| {
                self.config
                    .workspace()
                    .root
                    .as_ref()
                    .map(|root| self.cwd.join(root))
            })
            .or_else(|| project.and_then(|project| project.root.clone()))
            .unwrap_or_else(|| self.cwd.join(DEFAULT_ROOT))
    }
}
