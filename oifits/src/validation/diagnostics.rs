//! Per-load diagnostics.
//!
//! Every load attempt gets its own diagnostic list; nothing is shared
//! between documents or threads. Lenient loads turn conformance and
//! structural failures into entries here instead of aborting.

use std::fmt;

use log::{info, warn};
use serde::{Deserialize, Serialize};

use crate::error::{OifitsError, OifitsResult, TableLocation};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Info,
    Warning,
    Error,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Info => "info",
            Severity::Warning => "warning",
            Severity::Error => "error",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Access,
    Conformance,
    Structural,
    Reference,
}

impl Category {
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Access => "access",
            Category::Conformance => "conformance",
            Category::Structural => "structural",
            Category::Reference => "reference",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnostic {
    pub severity: Severity,
    pub category: Category,
    pub location: Option<TableLocation>,
    pub message: String,
}

impl Diagnostic {
    pub fn new(
        severity: Severity,
        category: Category,
        location: Option<TableLocation>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            severity,
            category,
            location,
            message: message.into(),
        }
    }

    pub fn warning(category: Category, location: Option<TableLocation>, message: impl Into<String>) -> Self {
        Self::new(Severity::Warning, category, location, message)
    }

    pub fn note(category: Category, location: Option<TableLocation>, message: impl Into<String>) -> Self {
        Self::new(Severity::Info, category, location, message)
    }

    /// Error-severity entry for `error`. Table-scoped errors keep their
    /// location in its own field and only the bare message as text.
    pub fn from_error(error: &OifitsError) -> Self {
        let (category, location, message) = match error {
            OifitsError::Conformance { location, message } => {
                (Category::Conformance, location.clone(), message.clone())
            }
            OifitsError::Structural { location, message } => {
                (Category::Structural, Some(location.clone()), message.clone())
            }
            OifitsError::NoReference { location, kind } => (
                Category::Reference,
                Some(location.clone()),
                format!("no {} reference", kind),
            ),
            other => (Category::Access, None, other.to_string()),
        };
        Self::new(Severity::Error, category, location, message)
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}/{}] ", self.severity.as_str(), self.category.as_str())?;
        if let Some(location) = &self.location {
            write!(f, "{}: ", location)?;
        }
        f.write_str(&self.message)
    }
}

/// Outcome of a successful load.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoadReport {
    pub table_count: usize,
    pub diagnostics: Vec<Diagnostic>,
}

impl LoadReport {
    pub fn has_errors(&self) -> bool {
        self.diagnostics.iter().any(|d| d.severity == Severity::Error)
    }

    pub fn count(&self, severity: Severity) -> usize {
        self.diagnostics.iter().filter(|d| d.severity == severity).count()
    }
}

/// Applies the strictness policy to failures found during a load.
///
/// Strict: policy-gated failures abort. Lenient: they are recorded and the
/// load goes on. Access and state errors always abort.
#[derive(Debug)]
pub struct Gate<'a> {
    strict: bool,
    diagnostics: &'a mut Vec<Diagnostic>,
}

impl<'a> Gate<'a> {
    pub fn new(strict: bool, diagnostics: &'a mut Vec<Diagnostic>) -> Self {
        Self { strict, diagnostics }
    }

    pub fn is_strict(&self) -> bool {
        self.strict
    }

    pub fn fail(&mut self, error: OifitsError) -> OifitsResult<()> {
        if self.strict || !error.is_policy_gated() {
            return Err(error);
        }
        warn!("{} (continuing, lenient load)", error);
        self.diagnostics.push(Diagnostic::from_error(&error));
        Ok(())
    }

    pub fn record(&mut self, diagnostic: Diagnostic) {
        match diagnostic.severity {
            Severity::Info => info!("{}", diagnostic),
            _ => warn!("{}", diagnostic),
        }
        self.diagnostics.push(diagnostic);
    }

    pub fn record_all(&mut self, diagnostics: impl IntoIterator<Item = Diagnostic>) {
        for diagnostic in diagnostics {
            self.record(diagnostic);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::StateError;

    fn structural() -> OifitsError {
        OifitsError::structural(&TableLocation::new("OI_VIS", 3), "missing column 'FLAG'")
    }

    #[test]
    fn test_strict_gate_aborts() {
        let mut diagnostics = Vec::new();
        let mut gate = Gate::new(true, &mut diagnostics);
        assert!(gate.fail(structural()).is_err());
        assert!(diagnostics.is_empty());
    }

    #[test]
    fn test_lenient_gate_records() {
        let mut diagnostics = Vec::new();
        let mut gate = Gate::new(false, &mut diagnostics);
        gate.fail(structural()).unwrap();
        assert_eq!(diagnostics.len(), 1);
        assert_eq!(diagnostics[0].severity, Severity::Error);
        assert_eq!(diagnostics[0].category, Category::Structural);
        assert_eq!(
            diagnostics[0].location,
            Some(TableLocation::new("OI_VIS", 3))
        );
    }

    #[test]
    fn test_lenient_gate_still_aborts_on_state_errors() {
        let mut diagnostics = Vec::new();
        let mut gate = Gate::new(false, &mut diagnostics);
        let err = gate.fail(StateError::AlreadyLoaded.into()).unwrap_err();
        assert!(matches!(err, OifitsError::State(StateError::AlreadyLoaded)));
    }

    #[test]
    fn test_display_prefixes_location_once() {
        let from_error = Diagnostic::from_error(&structural());
        assert_eq!(from_error.message, "missing column 'FLAG'");
        assert_eq!(
            from_error.to_string(),
            "[error/structural] table 'OI_VIS' (HDU 3): missing column 'FLAG'"
        );
        let unlocated = Diagnostic::from_error(&OifitsError::conformance(None, "no OI_TARGET table found"));
        assert_eq!(unlocated.to_string(), "[error/conformance] no OI_TARGET table found");
        let note = Diagnostic::note(
            Category::Structural,
            Some(TableLocation::new("OI_VIS", 3)),
            "optional keyword 'ARRNAME' absent",
        );
        assert_eq!(
            note.to_string(),
            "[info/structural] table 'OI_VIS' (HDU 3): optional keyword 'ARRNAME' absent"
        );
    }

    #[test]
    fn test_report_serializes() {
        let report = LoadReport {
            table_count: 2,
            diagnostics: vec![Diagnostic::warning(Category::Reference, None, "ambiguous")],
        };
        let json = serde_json::to_string(&report).unwrap();
        assert!(json.contains("\"severity\":\"warning\""));
        assert_eq!(report.count(Severity::Warning), 1);
        assert!(!report.has_errors());
    }
}
