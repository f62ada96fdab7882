use crate::render::{BRANCH, REMOTE_ORIGIN_URL, VERSION_LONG, VERSION_SHORT};
use serde::{Deserialize, Serialize};

/// Include guard used when none is configured
pub const DEFAULT_GUARD: &str = "GIT_VERSION_HPP_";

/// Configurable parts of the generated header
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HeaderTemplate {
    /// Include guard macro
    pub guard: String,

    /// License text placed in a block comment at the top of the file
    pub license: Option<String>,
}

impl Default for HeaderTemplate {
    fn default() -> Self {
        Self {
            guard: DEFAULT_GUARD.to_string(),
            license: None,
        }
    }
}

impl HeaderTemplate {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_guard(mut self, guard: impl Into<String>) -> Self {
        self.guard = guard.into();
        self
    }

    pub fn with_license(mut self, license: impl Into<String>) -> Self {
        self.license = Some(license.into());
        self
    }

    pub fn validate(&self) -> Result<(), String> {
        if !is_c_identifier(&self.guard) {
            return Err(format!(
                "Include guard '{}' is not a valid C identifier",
                self.guard
            ));
        }

        let defined = [REMOTE_ORIGIN_URL, BRANCH, VERSION_SHORT, VERSION_LONG];
        if defined.contains(&self.guard.as_str()) {
            return Err(format!(
                "Include guard '{}' collides with a macro defined by the header",
                self.guard
            ));
        }

        if let Some(license) = &self.license {
            if license.contains("*/") {
                return Err("License text must not contain '*/'".to_string());
            }
        }

        Ok(())
    }
}

fn is_c_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}
