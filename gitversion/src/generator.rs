//! Version header generation
//!
//! [`VersionHeaderGenerator`] runs the whole pipeline once: query the
//! provider, render the header, overwrite the output file.

use crate::config::{Backend, ConfigError, GeneratorConfig};
use c_header::{build_header, write_header, HeaderError, HeaderTemplate};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::info;
use version_info::{
    collect, CollectError, CollectPolicy, Git2Provider, GitCliProvider, MetadataProvider,
    VersionInfo,
};

#[derive(Error, Debug)]
pub enum GeneratorError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Collect(#[from] CollectError),

    #[error(transparent)]
    Header(#[from] HeaderError),
}

pub type GeneratorResult<T> = Result<T, GeneratorError>;

/// Outcome of a successful [`VersionHeaderGenerator::run`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerateReport {
    pub path: PathBuf,
    pub info: VersionInfo,
    pub bytes: usize,
}

pub struct VersionHeaderGenerator<P> {
    provider: P,
    policy: CollectPolicy,
    template: HeaderTemplate,
    output: PathBuf,
}

impl<P: MetadataProvider> VersionHeaderGenerator<P> {
    pub fn new(provider: P) -> Self {
        Self {
            provider,
            policy: CollectPolicy::default(),
            template: HeaderTemplate::default(),
            output: PathBuf::from(crate::config::DEFAULT_OUTPUT),
        }
    }

    pub fn with_policy(mut self, policy: CollectPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn with_template(mut self, template: HeaderTemplate) -> Self {
        self.template = template;
        self
    }

    pub fn with_output(mut self, output: impl Into<PathBuf>) -> Self {
        self.output = output.into();
        self
    }

    pub fn output(&self) -> &Path {
        &self.output
    }

    pub fn provider(&self) -> &P {
        &self.provider
    }

    pub fn collect(&self) -> GeneratorResult<VersionInfo> {
        Ok(collect(&self.provider, &self.policy)?)
    }

    pub fn render(&self, info: &VersionInfo) -> GeneratorResult<String> {
        Ok(build_header(info, &self.template)?)
    }

    /// Collect, render and write the header.
    pub fn run(&self) -> GeneratorResult<GenerateReport> {
        let info = self.collect()?;
        let header = self.render(&info)?;
        write_header(&self.output, &header)?;

        info!(
            path = %self.output.display(),
            version = %info.long_version,
            provider = self.provider.name(),
            "wrote version header"
        );

        Ok(GenerateReport {
            path: self.output.clone(),
            info,
            bytes: header.len(),
        })
    }
}

impl VersionHeaderGenerator<Box<dyn MetadataProvider>> {
    /// Build a generator with the provider selected by `config.backend`.
    pub fn from_config(config: &GeneratorConfig) -> GeneratorResult<Self> {
        config.validate()?;
        let template = config.resolve_template()?;

        Ok(Self::new(provider_for(config))
            .with_policy(config.policy())
            .with_template(template)
            .with_output(&config.output))
    }
}

fn provider_for(config: &GeneratorConfig) -> Box<dyn MetadataProvider> {
    match config.backend {
        Backend::Cli => Box::new(
            GitCliProvider::new(&config.repo_dir)
                .with_git(&config.git)
                .with_remote(&config.remote),
        ),
        Backend::Libgit2 => {
            Box::new(Git2Provider::new(&config.repo_dir).with_remote(&config.remote))
        }
    }
}
