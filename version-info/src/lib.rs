//! Git version metadata for build-time code generation
//!
//! A [`MetadataProvider`] answers four queries about the repository the build
//! runs in. [`collect`] turns those answers into a [`VersionInfo`] under a
//! [`CollectPolicy`].
//!
//! ```no_run
//! use version_info::prelude::*;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let provider = GitCliProvider::new(".");
//! let info = collect(&provider, &CollectPolicy::default())?;
//! println!("building {} from {}", info.long_version, info.branch);
//! # Ok(())
//! # }
//! ```

pub mod cli;
pub mod collect;
pub mod libgit;
pub mod provider;
pub mod types;

pub use cli::GitCliProvider;
pub use collect::{collect, CollectError, CollectPolicy, Field};
pub use libgit::Git2Provider;
pub use provider::{MetadataProvider, QueryError, QueryResult};
pub use types::{VersionInfo, DIRTY_MARKER};

pub mod prelude {
    pub use crate::cli::*;
    pub use crate::collect::*;
    pub use crate::libgit::*;
    pub use crate::provider::*;
    pub use crate::types::*;
}
