//! Collecting a [`VersionInfo`] from a provider
//!
//! The four queries run in order: remote, branch, tag, describe. A failure of
//! an optional field is logged and replaced with an empty string; a failure of
//! a required field or of `describe` aborts the collection.

use crate::provider::{MetadataProvider, QueryError};
use crate::types::VersionInfo;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;
use tracing::{debug, warn};

/// Fields of [`VersionInfo`] that may be required by a [`CollectPolicy`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    RemoteUrl,
    Branch,
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Field::RemoteUrl => write!(f, "remote url"),
            Field::Branch => write!(f, "branch"),
        }
    }
}

#[derive(Error, Debug)]
pub enum CollectError {
    #[error("Required {field} is unavailable: {reason}")]
    Required { field: Field, reason: String },

    #[error("Could not describe the current commit: {0}")]
    Describe(#[source] QueryError),
}

/// Which missing values abort a collection instead of rendering as `""`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CollectPolicy {
    pub require_remote: bool,
    pub require_branch: bool,
}

impl CollectPolicy {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_require_remote(mut self, require: bool) -> Self {
        self.require_remote = require;
        self
    }

    pub fn with_require_branch(mut self, require: bool) -> Self {
        self.require_branch = require;
        self
    }

    fn requires(&self, field: Field) -> bool {
        match field {
            Field::RemoteUrl => self.require_remote,
            Field::Branch => self.require_branch,
        }
    }

    /// Apply the policy to one query outcome.
    fn settle(
        &self,
        field: Field,
        outcome: Result<String, QueryError>,
    ) -> Result<String, CollectError> {
        let reason = match outcome {
            Ok(value) if !value.is_empty() => return Ok(value),
            Ok(_) => "empty value".to_string(),
            Err(e) => e.to_string(),
        };

        if self.requires(field) {
            return Err(CollectError::Required { field, reason });
        }

        warn!(%field, %reason, "using empty value");
        Ok(String::new())
    }
}

/// Query `provider` and assemble a [`VersionInfo`] under `policy`.
pub fn collect<P: MetadataProvider + ?Sized>(
    provider: &P,
    policy: &CollectPolicy,
) -> Result<VersionInfo, CollectError> {
    debug!(provider = provider.name(), ?policy, "collecting version info");

    let remote_origin_url = policy.settle(Field::RemoteUrl, provider.remote_url())?;
    let branch = policy.settle(Field::Branch, provider.branch())?;

    let short_version = match provider.latest_tag() {
        Ok(tag) => tag.unwrap_or_default(),
        Err(e) => {
            warn!(error = %e, "tag lookup failed, treating as untagged");
            String::new()
        }
    };

    let long_version = provider.describe().map_err(CollectError::Describe)?;
    if long_version.is_empty() {
        return Err(CollectError::Describe(QueryError::Empty {
            query: "describe".to_string(),
        }));
    }

    Ok(VersionInfo {
        remote_origin_url,
        branch,
        short_version,
        long_version,
    })
}
