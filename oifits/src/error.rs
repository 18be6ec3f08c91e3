//! Error types for OIFITS loading and queries.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::fits::FitsError;

/// Result type for document operations
pub type OifitsResult<T> = Result<T, OifitsError>;

/// Where a table lives in the file: its extension name and 1-based HDU index.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TableLocation {
    pub ext_name: String,
    pub hdu_index: usize,
}

impl TableLocation {
    pub fn new(ext_name: impl Into<String>, hdu_index: usize) -> Self {
        Self {
            ext_name: ext_name.into(),
            hdu_index,
        }
    }
}

impl fmt::Display for TableLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "table '{}' (HDU {})", self.ext_name, self.hdu_index)
    }
}

/// Lifecycle violations. Never filtered by the strictness policy.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StateError {
    #[error("a file is already loaded")]
    AlreadyLoaded,

    #[error("{operation}: no file loaded")]
    NotLoaded { operation: &'static str },

    #[error("no OI_TARGET table in the loaded file")]
    NoTarget,
}

/// Error type for OIFITS operations.
#[derive(Debug, thiserror::Error)]
pub enum OifitsError {
    /// The access provider failed to open, navigate or decode.
    #[error("FITS access error: {0}")]
    Access(#[from] FitsError),

    /// Revision missing/unsupported, missing or duplicate OI_TARGET.
    #[error("{}", fmt_conformance(.location, .message))]
    Conformance {
        location: Option<TableLocation>,
        message: String,
    },

    /// Live keywords/columns disagree with the table schema.
    #[error("{location} does not conform: {message}")]
    Structural {
        location: TableLocation,
        message: String,
    },

    #[error(transparent)]
    State(#[from] StateError),

    #[error("table index {index} out of range ({count} tables loaded)")]
    IndexOutOfRange { index: usize, count: usize },

    /// A data table asked for a cross reference that was never resolved.
    #[error("{location} has no {kind} reference")]
    NoReference {
        location: TableLocation,
        kind: &'static str,
    },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

fn fmt_conformance(location: &Option<TableLocation>, message: &str) -> String {
    match location {
        Some(location) => format!("{} does not conform: {}", location, message),
        None => format!("file does not conform: {}", message),
    }
}

impl OifitsError {
    pub(crate) fn conformance(location: Option<&TableLocation>, message: impl Into<String>) -> Self {
        OifitsError::Conformance {
            location: location.cloned(),
            message: message.into(),
        }
    }

    pub(crate) fn structural(location: &TableLocation, message: impl Into<String>) -> Self {
        OifitsError::Structural {
            location: location.clone(),
            message: message.into(),
        }
    }

    /// Whether the strictness policy may downgrade this error to a diagnostic.
    pub fn is_policy_gated(&self) -> bool {
        matches!(
            self,
            OifitsError::Conformance { .. } | OifitsError::Structural { .. }
        )
    }
}
