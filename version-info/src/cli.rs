//! Metadata provider backed by the `git` command-line tool

use crate::provider::{MetadataProvider, QueryError, QueryResult};
use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use tracing::debug;

/// Runs `git` in a repository directory for each query
#[derive(Debug, Clone)]
pub struct GitCliProvider {
    git: PathBuf,
    repo_dir: PathBuf,
    remote: String,
}

impl GitCliProvider {
    pub fn new(repo_dir: impl Into<PathBuf>) -> Self {
        Self {
            git: PathBuf::from("git"),
            repo_dir: repo_dir.into(),
            remote: "origin".to_string(),
        }
    }

    /// Use a specific git executable instead of the one on `PATH`.
    pub fn with_git(mut self, git: impl Into<PathBuf>) -> Self {
        self.git = git.into();
        self
    }

    pub fn with_remote(mut self, remote: impl Into<String>) -> Self {
        self.remote = remote.into();
        self
    }

    pub fn repo_dir(&self) -> &Path {
        &self.repo_dir
    }

    fn command_line(&self, args: &[&str]) -> String {
        format!("{} {}", self.git.display(), args.join(" "))
    }

    fn run(&self, args: &[&str]) -> QueryResult<Output> {
        debug!(command = %self.command_line(args), dir = %self.repo_dir.display(), "running git");
        Command::new(&self.git)
            .args(args)
            .current_dir(&self.repo_dir)
            .output()
            .map_err(|source| QueryError::Spawn {
                command: self.command_line(args),
                source,
            })
    }

    /// Trimmed stdout of a successful invocation.
    fn stdout_of(&self, args: &[&str]) -> QueryResult<String> {
        let output = self.run(args)?;
        if output.status.success() {
            Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
        } else {
            Err(self.failure(args, &output))
        }
    }

    fn failure(&self, args: &[&str], output: &Output) -> QueryError {
        QueryError::CommandFailed {
            command: self.command_line(args),
            code: output.status.code(),
            status: output.status.to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
        }
    }
}

impl MetadataProvider for GitCliProvider {
    fn remote_url(&self) -> QueryResult<String> {
        let key = format!("remote.{}.url", self.remote);
        let args = ["config", "--get", key.as_str()];
        let output = self.run(&args)?;

        // `git config --get` exits with 1 when the key is absent
        if !output.status.success() {
            if output.status.code() == Some(1) && output.stderr.is_empty() {
                return Err(QueryError::NotConfigured {
                    what: format!("remote '{}'", self.remote),
                });
            }
            return Err(self.failure(&args, &output));
        }

        Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
    }

    fn branch(&self) -> QueryResult<String> {
        self.stdout_of(&["branch", "--show-current"])
    }

    fn latest_tag(&self) -> QueryResult<Option<String>> {
        let args = ["describe", "--abbrev=0", "--tags"];
        let output = self.run(&args)?;

        if !output.status.success() {
            debug!(
                reason = %String::from_utf8_lossy(&output.stderr).trim(),
                "no reachable tag"
            );
            return Ok(None);
        }

        let tag = String::from_utf8_lossy(&output.stdout).trim().to_string();
        Ok((!tag.is_empty()).then_some(tag))
    }

    fn describe(&self) -> QueryResult<String> {
        let described = self.stdout_of(&["describe", "--abbrev", "--dirty", "--always", "--tags"])?;
        if described.is_empty() {
            return Err(QueryError::Empty {
                query: "describe".to_string(),
            });
        }
        Ok(described)
    }

    fn name(&self) -> &'static str {
        "git-cli"
    }
}
