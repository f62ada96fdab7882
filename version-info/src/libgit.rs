//! Metadata provider backed by libgit2
//!
//! Answers the same queries as [`GitCliProvider`](crate::GitCliProvider)
//! without requiring a `git` executable at build time.

use crate::provider::{MetadataProvider, QueryError, QueryResult};
use crate::types::DIRTY_MARKER;
use git2::{DescribeFormatOptions, DescribeOptions, ErrorClass, ErrorCode, Repository};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Abbreviated hash length used by `git describe` by default
const DEFAULT_ABBREV: u32 = 7;

#[derive(Debug, Clone)]
pub struct Git2Provider {
    repo_dir: PathBuf,
    remote: String,
}

impl Git2Provider {
    pub fn new(repo_dir: impl Into<PathBuf>) -> Self {
        Self {
            repo_dir: repo_dir.into(),
            remote: "origin".to_string(),
        }
    }

    pub fn with_remote(mut self, remote: impl Into<String>) -> Self {
        self.remote = remote.into();
        self
    }

    pub fn repo_dir(&self) -> &Path {
        &self.repo_dir
    }

    /// Open the repository containing `repo_dir`, searching parent directories
    /// the same way the git CLI does.
    fn open(&self) -> QueryResult<Repository> {
        Ok(Repository::discover(&self.repo_dir)?)
    }
}

impl MetadataProvider for Git2Provider {
    fn remote_url(&self) -> QueryResult<String> {
        let repo = self.open()?;
        let remote = match repo.find_remote(&self.remote) {
            Ok(remote) => remote,
            Err(e) if e.code() == ErrorCode::NotFound => {
                return Err(QueryError::NotConfigured {
                    what: format!("remote '{}'", self.remote),
                });
            }
            Err(e) => return Err(e.into()),
        };

        let url = match remote.url() {
            Some(url) => Ok(url.to_string()),
            None => Err(QueryError::NotConfigured {
                what: format!("url of remote '{}'", self.remote),
            }),
        };
        url
    }

    fn branch(&self) -> QueryResult<String> {
        let repo = self.open()?;
        let branch = match repo.head() {
            Ok(head) if head.is_branch() => Ok(head.shorthand().unwrap_or_default().to_string()),
            Ok(_) => Ok(String::new()),
            Err(e) if e.code() == ErrorCode::UnbornBranch => {
                // No commits yet: HEAD still names the branch symbolically
                let head = repo.find_reference("HEAD")?;
                Ok(head
                    .symbolic_target()
                    .and_then(|target| target.strip_prefix("refs/heads/"))
                    .unwrap_or_default()
                    .to_string())
            }
            Err(e) => Err(e.into()),
        };
        branch
    }

    fn latest_tag(&self) -> QueryResult<Option<String>> {
        let repo = self.open()?;
        let mut options = DescribeOptions::new();
        options.describe_tags();

        let describe = match repo.describe(&options) {
            Ok(describe) => describe,
            // libgit2 reports "no tag to describe from" as a generic describe error
            Err(e)
                if matches!(e.code(), ErrorCode::NotFound | ErrorCode::UnbornBranch)
                    || e.class() == ErrorClass::Describe =>
            {
                debug!(reason = %e.message(), "no reachable tag");
                return Ok(None);
            }
            Err(e) => return Err(e.into()),
        };

        let mut format = DescribeFormatOptions::new();
        format.abbreviated_size(0);
        let tag = describe.format(Some(&format))?;
        Ok((!tag.is_empty()).then_some(tag))
    }

    fn describe(&self) -> QueryResult<String> {
        let repo = self.open()?;
        let mut options = DescribeOptions::new();
        options.describe_tags().show_commit_oid_as_fallback(true);

        let mut format = DescribeFormatOptions::new();
        format
            .abbreviated_size(DEFAULT_ABBREV)
            .dirty_suffix(DIRTY_MARKER);
        let described = repo.describe(&options)?.format(Some(&format))?;

        if described.is_empty() {
            return Err(QueryError::Empty {
                query: "describe".to_string(),
            });
        }
        Ok(described)
    }

    fn name(&self) -> &'static str {
        "libgit2"
    }
}
