//! Load policy configuration.
//!
//! Policies can be built in code or read from a TOML file:
//!
//! ```toml
//! strict = false
//! supported_revision = 1
//! report_ambiguous_references = true
//! ```

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::error::{OifitsError, OifitsResult};

/// Highest `OI_REVN` this crate understands.
pub const SUPPORTED_REVISION: i64 = 1;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoadConfig {
    /// Abort on the first conformance or structural failure.
    #[serde(default = "default_strict")]
    pub strict: bool,
    /// Tables declaring a higher revision are non-conforming.
    #[serde(default = "default_supported_revision")]
    pub supported_revision: i64,
    /// Emit a warning for each same-named candidate discarded during
    /// cross-referencing.
    #[serde(default = "default_report_ambiguous")]
    pub report_ambiguous_references: bool,
}

fn default_strict() -> bool {
    true
}

fn default_supported_revision() -> i64 {
    SUPPORTED_REVISION
}

fn default_report_ambiguous() -> bool {
    true
}

impl Default for LoadConfig {
    fn default() -> Self {
        Self {
            strict: default_strict(),
            supported_revision: default_supported_revision(),
            report_ambiguous_references: default_report_ambiguous(),
        }
    }
}

impl LoadConfig {
    pub fn strict() -> Self {
        Self::default()
    }

    pub fn lenient() -> Self {
        Self {
            strict: false,
            ..Self::default()
        }
    }

    pub fn from_toml_str(content: &str) -> OifitsResult<Self> {
        toml::from_str(content)
            .map_err(|e| OifitsError::Config(format!("Failed to parse config: {}", e)))
    }

    /// Load a policy from a TOML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> OifitsResult<Self> {
        let content = fs::read_to_string(path.as_ref()).map_err(|e| {
            OifitsError::Config(format!(
                "Failed to read config file {}: {}",
                path.as_ref().display(),
                e
            ))
        })?;
        Self::from_toml_str(&content)
    }
}
