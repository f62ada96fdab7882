//! Generate `git_version.h` from the state of a git repository

pub mod config;
pub mod generator;

pub use config::{
    Backend, ConfigError, ConfigResult, GeneratorConfig, HeaderConfig, CONFIG_FILE_NAME,
    DEFAULT_OUTPUT,
};
pub use generator::{GenerateReport, GeneratorError, GeneratorResult, VersionHeaderGenerator};

pub use c_header::HeaderTemplate;
pub use version_info::{CollectPolicy, MetadataProvider, VersionInfo};
