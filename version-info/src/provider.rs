use thiserror::Error;

#[derive(Error, Debug)]
pub enum QueryError {
    #[error("Failed to run `{command}`: {source}")]
    Spawn {
        command: String,
        #[source]
        source: std::io::Error,
    },

    #[error("`{command}` failed ({status}): {stderr}")]
    CommandFailed {
        command: String,
        code: Option<i32>,
        status: String,
        stderr: String,
    },

    #[error("Not configured: {what}")]
    NotConfigured { what: String },

    #[error("Git error: {0}")]
    Git(#[from] git2::Error),

    #[error("Query returned no output: {query}")]
    Empty { query: String },
}

pub type QueryResult<T> = Result<T, QueryError>;

/// Source of the four pieces of repository metadata baked into a build
///
/// Every query reports failure explicitly; deciding whether a failure is
/// acceptable is left to [`CollectPolicy`](crate::CollectPolicy).
pub trait MetadataProvider {
    /// URL of the default remote.
    fn remote_url(&self) -> QueryResult<String>;

    /// Checked-out branch name, empty on a detached HEAD.
    fn branch(&self) -> QueryResult<String>;

    /// Closest reachable tag, `None` when there is no tag.
    fn latest_tag(&self) -> QueryResult<Option<String>>;

    /// `<tag>-<offset>-g<hash>[-dirty]`, or the abbreviated hash without a tag.
    fn describe(&self) -> QueryResult<String>;

    fn name(&self) -> &'static str;
}

impl<P: MetadataProvider + ?Sized> MetadataProvider for &P {
    fn remote_url(&self) -> QueryResult<String> {
        (**self).remote_url()
    }

    fn branch(&self) -> QueryResult<String> {
        (**self).branch()
    }

    fn latest_tag(&self) -> QueryResult<Option<String>> {
        (**self).latest_tag()
    }

    fn describe(&self) -> QueryResult<String> {
        (**self).describe()
    }

    fn name(&self) -> &'static str {
        (**self).name()
    }
}

impl<P: MetadataProvider + ?Sized> MetadataProvider for Box<P> {
    fn remote_url(&self) -> QueryResult<String> {
        (**self).remote_url()
    }

    fn branch(&self) -> QueryResult<String> {
        (**self).branch()
    }

    fn latest_tag(&self) -> QueryResult<Option<String>> {
        (**self).latest_tag()
    }

    fn describe(&self) -> QueryResult<String> {
        (**self).describe()
    }

    fn name(&self) -> &'static str {
        (**self).name()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct MockProvider;

    impl MetadataProvider for MockProvider {
        fn remote_url(&self) -> QueryResult<String> {
            Ok("https://example.com/r.git".to_string())
        }

        fn branch(&self) -> QueryResult<String> {
            Ok("main".to_string())
        }

        fn latest_tag(&self) -> QueryResult<Option<String>> {
            Ok(None)
        }

        fn describe(&self) -> QueryResult<String> {
            Err(QueryError::Empty {
                query: "describe".to_string(),
            })
        }

        fn name(&self) -> &'static str {
            "mock"
        }
    }

    #[test]
    fn test_mock_provider_through_box() {
        let provider: Box<dyn MetadataProvider> = Box::new(MockProvider);
        assert_eq!(provider.remote_url().unwrap(), "https://example.com/r.git");
        assert_eq!(provider.branch().unwrap(), "main");
        assert!(provider.latest_tag().unwrap().is_none());
        assert!(provider.describe().is_err());
        assert_eq!(provider.name(), "mock");
    }

    #[test]
    fn test_command_failed_display() {
        let err = QueryError::CommandFailed {
            command: "git describe".to_string(),
            code: Some(128),
            status: "exit status: 128".to_string(),
            stderr: "fatal: No names found".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "`git describe` failed (exit status: 128): fatal: No names found"
        );
    }
}
