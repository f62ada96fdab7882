use serde::{Deserialize, Serialize};

/// Suffix appended to the describe string when the working tree has
/// uncommitted changes.
pub const DIRTY_MARKER: &str = "-dirty";

/// Version metadata gathered from the repository for a single build
///
/// # Examples
///
/// ```
/// use version_info::VersionInfo;
///
/// let info = VersionInfo::new("https://example.com/r.git", "main", "v1.2.0", "v1.2.0");
/// assert!(info.has_tag());
/// assert!(info.is_exact_tag());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VersionInfo {
    /// URL of the default remote, empty when unknown
    pub remote_origin_url: String,

    /// Checked-out branch, empty on a detached HEAD
    pub branch: String,

    /// Closest reachable tag, empty when the history has none
    pub short_version: String,

    /// Tag, commit offset, abbreviated hash and dirty marker
    pub long_version: String,
}

impl VersionInfo {
    pub fn new(
        remote_origin_url: impl Into<String>,
        branch: impl Into<String>,
        short_version: impl Into<String>,
        long_version: impl Into<String>,
    ) -> Self {
        Self {
            remote_origin_url: remote_origin_url.into(),
            branch: branch.into(),
            short_version: short_version.into(),
            long_version: long_version.into(),
        }
    }

    pub fn has_tag(&self) -> bool {
        !self.short_version.is_empty()
    }

    /// True when the build sits exactly on a tag with a clean tree.
    pub fn is_exact_tag(&self) -> bool {
        self.has_tag() && self.short_version == self.long_version
    }

    pub fn is_dirty(&self) -> bool {
        self.long_version.ends_with(DIRTY_MARKER)
    }

    /// Short version when a tag exists, otherwise the long version.
    pub fn display_version(&self) -> &str {
        if self.has_tag() {
            &self.short_version
        } else {
            &self.long_version
        }
    }
}
