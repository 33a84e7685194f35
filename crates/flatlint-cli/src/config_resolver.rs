//! Locating `flatlint.toml` and the directory its manifests live in.
//!
//! Search order: the `--config` path, then `flatlint.toml` or
//! `.flatlint.toml` in the project, then `config.toml` in the global
//! directory (`$FLATLINT_CONFIG_DIR` or `~/.flatlint`). With none of these
//! only the built-in rules are registered.

use flatlint_core::{Config, ConfigError};
use std::path::{Path, PathBuf};

/// Project-level config file names, checked in order.
pub const PROJECT_CONFIG_NAMES: &[&str] = &["flatlint.toml", ".flatlint.toml"];

const GLOBAL_CONFIG_NAME: &str = "config.toml";

/// The configuration a command runs against.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    /// Given with `--config` or `$FLATLINT_CONFIG`; not checked for existence.
    Explicit(PathBuf),
    /// Found in the project directory.
    Project(PathBuf),
    /// Found in the global config directory.
    Global(PathBuf),
    /// No file; built-in rules only.
    BuiltinOnly {
        /// Project the search started from.
        project_dir: PathBuf,
    },
}

impl ConfigSource {
    /// Returns the config file path, if any.
    #[must_use]
    pub fn path(&self) -> Option<&Path> {
        match self {
            Self::Explicit(p) | Self::Project(p) | Self::Global(p) => Some(p),
            Self::BuiltinOnly { .. } => None,
        }
    }

    /// Directory that relative `[plugins]` manifest paths are joined to.
    ///
    /// That is the directory holding the config file, so a global config can
    /// ship its manifests next to it.
    #[must_use]
    pub fn manifest_dir(&self) -> &Path {
        match self {
            Self::BuiltinOnly { project_dir } => project_dir,
            _ => match self.path().and_then(Path::parent) {
                Some(parent) if !parent.as_os_str().is_empty() => parent,
                _ => Path::new("."),
            },
        }
    }

    /// Short description used in reports and logs.
    #[must_use]
    pub fn label(&self) -> String {
        match self {
            Self::Explicit(p) | Self::Project(p) => p.display().to_string(),
            Self::Global(p) => format!("{} (global)", p.display()),
            Self::BuiltinOnly { .. } => "<built-in rules only>".to_string(),
        }
    }

    /// Reads the config file, or returns an empty config when there is none.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(&self) -> Result<Config, ConfigError> {
        match self.path() {
            Some(path) => {
                tracing::debug!("Loading config from {}", self.label());
                Config::from_file(path)
            }
            None => Ok(Config::default()),
        }
    }
}

/// Inputs of a config search.
#[derive(Debug, Clone)]
pub struct ConfigSearch {
    project_dir: PathBuf,
    explicit: Option<PathBuf>,
    global_dir: Option<PathBuf>,
}

impl ConfigSearch {
    /// Starts a search in `project_dir` using the environment's global dir.
    #[must_use]
    pub fn new(project_dir: &Path, explicit: Option<&Path>) -> Self {
        Self {
            project_dir: project_dir.to_path_buf(),
            explicit: explicit.map(Path::to_path_buf),
            global_dir: global_config_dir(),
        }
    }

    /// Replaces the global config directory.
    #[must_use]
    pub fn with_global_dir(mut self, dir: Option<PathBuf>) -> Self {
        self.global_dir = dir;
        self
    }

    /// Picks the configuration to use.
    #[must_use]
    pub fn resolve(self) -> ConfigSource {
        if let Some(path) = self.explicit {
            return ConfigSource::Explicit(path);
        }

        let project = PROJECT_CONFIG_NAMES
            .iter()
            .map(|name| ConfigSource::Project(self.project_dir.join(name)));
        let global = self
            .global_dir
            .iter()
            .map(|dir| ConfigSource::Global(dir.join(GLOBAL_CONFIG_NAME)));

        project
            .chain(global)
            .find(|source| source.path().is_some_and(Path::is_file))
            .unwrap_or(ConfigSource::BuiltinOnly {
                project_dir: self.project_dir,
            })
    }
}

/// Resolves the configuration for `project_dir`.
#[must_use]
pub fn resolve(project_dir: &Path, explicit: Option<&Path>) -> ConfigSource {
    ConfigSearch::new(project_dir, explicit).resolve()
}

/// `$FLATLINT_CONFIG_DIR`, else `~/.flatlint`.
#[must_use]
pub fn global_config_dir() -> Option<PathBuf> {
    std::env::var_os("FLATLINT_CONFIG_DIR")
        .map(PathBuf::from)
        .or_else(|| home::home_dir().map(|h| h.join(".flatlint")))
}
