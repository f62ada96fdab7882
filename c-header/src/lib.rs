//! C header generation for git version metadata
//!
//! Renders a [`VersionInfo`] into a header defining `GIT_REMOTE_ORIGIN_URL`,
//! `GIT_BRANCH`, `GIT_VERSION_SHORT` and `GIT_VERSION_LONG`, and writes it to
//! disk.

pub mod render;
pub mod template;

use std::fs;
use std::path::Path;
use thiserror::Error;
use tracing::debug;

pub use render::{quote, render_header};
pub use template::{HeaderTemplate, DEFAULT_GUARD};
pub use version_info::VersionInfo;

/// Errors related to header generation
#[derive(Error, Debug)]
pub enum HeaderError {
    #[error("Invalid template: {0}")]
    InvalidTemplate(String),
    #[error("Failed to write {path}: {source}")]
    Write {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

pub type HeaderResult<T> = Result<T, HeaderError>;

/// Validate `template` and render the header for `info`.
pub fn build_header(info: &VersionInfo, template: &HeaderTemplate) -> HeaderResult<String> {
    template.validate().map_err(HeaderError::InvalidTemplate)?;
    Ok(render_header(info, template))
}

/// Write `contents` to `path`, replacing any existing file.
///
/// Missing parent directories are created. The file is truncated and written
/// in one call; an interrupted write can leave it incomplete.
pub fn write_header(path: &Path, contents: &str) -> HeaderResult<()> {
    let write_error = |source: std::io::Error| HeaderError::Write {
        path: path.display().to_string(),
        source,
    };

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        if !parent.exists() {
            debug!(dir = %parent.display(), "creating output directory");
            fs::create_dir_all(parent).map_err(write_error)?;
        }
    }

    fs::write(path, contents).map_err(write_error)
}
