use c_header::{HeaderTemplate, DEFAULT_GUARD};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;
use version_info::CollectPolicy;

/// File picked up from the working directory when no config is given
pub const CONFIG_FILE_NAME: &str = "gitversion.toml";

/// Header location relative to the working directory
pub const DEFAULT_OUTPUT: &str = "include/git_version.h";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse configuration: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

pub type ConfigResult<T> = Result<T, ConfigError>;

/// How repository metadata is queried
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum Backend {
    /// Run the `git` executable
    #[default]
    Cli,
    /// Read the repository in process through libgit2
    Libgit2,
}

impl std::fmt::Display for Backend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Backend::Cli => write!(f, "cli"),
            Backend::Libgit2 => write!(f, "libgit2"),
        }
    }
}

/// `[header]` table of the configuration file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct HeaderConfig {
    pub guard: String,
    pub license: Option<String>,
    pub license_file: Option<PathBuf>,
}

impl Default for HeaderConfig {
    fn default() -> Self {
        Self {
            guard: DEFAULT_GUARD.to_string(),
            license: None,
            license_file: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GeneratorConfig {
    /// Directory whose repository is described
    pub repo_dir: PathBuf,
    /// Header file to write, relative to the working directory
    pub output: PathBuf,
    pub backend: Backend,
    /// Remote whose URL becomes `GIT_REMOTE_ORIGIN_URL`
    pub remote: String,
    /// git executable for the `cli` backend
    pub git: PathBuf,
    pub require_remote: bool,
    pub require_branch: bool,
    pub header: HeaderConfig,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            repo_dir: PathBuf::from("."),
            output: PathBuf::from(DEFAULT_OUTPUT),
            backend: Backend::default(),
            remote: "origin".to_string(),
            git: PathBuf::from("git"),
            require_remote: false,
            require_branch: false,
            header: HeaderConfig::default(),
        }
    }
}

impl GeneratorConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn load(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.display().to_string(),
            source,
        })?;
        debug!(path = %path.display(), "loaded configuration");
        Self::from_toml(&text)
    }

    pub fn from_toml(text: &str) -> ConfigResult<Self> {
        Ok(toml::from_str(text)?)
    }

    /// Load [`CONFIG_FILE_NAME`] from the working directory if present.
    pub fn discover() -> ConfigResult<Self> {
        let path = Path::new(CONFIG_FILE_NAME);
        if path.is_file() {
            Self::load(path)
        } else {
            Ok(Self::default())
        }
    }

    pub fn with_repo_dir(mut self, repo_dir: impl Into<PathBuf>) -> Self {
        self.repo_dir = repo_dir.into();
        self
    }

    pub fn with_output(mut self, output: impl Into<PathBuf>) -> Self {
        self.output = output.into();
        self
    }

    pub fn with_backend(mut self, backend: Backend) -> Self {
        self.backend = backend;
        self
    }

    pub fn with_remote(mut self, remote: impl Into<String>) -> Self {
        self.remote = remote.into();
        self
    }

    pub fn with_git(mut self, git: impl Into<PathBuf>) -> Self {
        self.git = git.into();
        self
    }

    pub fn with_require_remote(mut self, require: bool) -> Self {
        self.require_remote = require;
        self
    }

    pub fn with_require_branch(mut self, require: bool) -> Self {
        self.require_branch = require;
        self
    }

    pub fn with_guard(mut self, guard: impl Into<String>) -> Self {
        self.header.guard = guard.into();
        self
    }

    pub fn with_license(mut self, license: impl Into<String>) -> Self {
        self.header.license = Some(license.into());
        self
    }

    pub fn policy(&self) -> CollectPolicy {
        CollectPolicy::new()
            .with_require_remote(self.require_remote)
            .with_require_branch(self.require_branch)
    }

    /// Header template with `license_file` read into the license text.
    pub fn resolve_template(&self) -> ConfigResult<HeaderTemplate> {
        let license = match (&self.header.license, &self.header.license_file) {
            (Some(_), Some(_)) => {
                return Err(ConfigError::Invalid(
                    "Only one of header.license and header.license_file may be set".to_string(),
                ));
            }
            (Some(text), None) => Some(text.clone()),
            (None, Some(path)) => Some(fs::read_to_string(path).map_err(|source| {
                ConfigError::Read {
                    path: path.display().to_string(),
                    source,
                }
            })?),
            (None, None) => None,
        };

        let template = HeaderTemplate {
            guard: self.header.guard.clone(),
            license,
        };
        template.validate().map_err(ConfigError::Invalid)?;
        Ok(template)
    }

    pub fn validate(&self) -> ConfigResult<()> {
        if self.output.as_os_str().is_empty() {
            return Err(ConfigError::Invalid("Output path cannot be empty".to_string()));
        }

        if self.remote.trim().is_empty() {
            return Err(ConfigError::Invalid("Remote name cannot be empty".to_string()));
        }

        if self.backend == Backend::Cli && self.git.as_os_str().is_empty() {
            return Err(ConfigError::Invalid("git executable cannot be empty".to_string()));
        }

        HeaderTemplate::new()
            .with_guard(self.header.guard.clone())
            .validate()
            .map_err(ConfigError::Invalid)
    }
}
