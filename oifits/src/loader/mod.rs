//! The load pipeline.
//!
//! Opening a file runs four passes in a fixed order: classify every `OI_*`
//! extension into a [`Table`], resolve cross references, then validate
//! every table against its schema. Channel-count checks depend on the
//! references, so validation never runs before resolution.

use std::fmt;
use std::path::Path;

use log::{debug, error, info};
use serde::{Deserialize, Serialize};

use crate::core::DataType;
use crate::error::{OifitsError, OifitsResult, TableLocation};
use crate::fits::{FitsAccess, FitsOpener};
use crate::tables::{Table, TableIndex, TableKind};
use crate::validation::{check_structure, Category, Diagnostic, Gate};

pub mod config;
pub mod crossref;

pub use config::{LoadConfig, SUPPORTED_REVISION};
pub use crossref::resolve_references;

/// Extensions outside this namespace are not OIFITS tables.
pub const OI_PREFIX: &str = "OI_";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LoadState {
    Unopened,
    Opened,
    Classified,
    CrossReferenced,
    Validated,
    Ready,
    Failed,
}

impl LoadState {
    pub fn as_str(&self) -> &'static str {
        match self {
            LoadState::Unopened => "unopened",
            LoadState::Opened => "opened",
            LoadState::Classified => "classified",
            LoadState::CrossReferenced => "cross-referenced",
            LoadState::Validated => "validated",
            LoadState::Ready => "ready",
            LoadState::Failed => "failed",
        }
    }
}

impl fmt::Display for LoadState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Everything a successful load hands over to the document.
pub struct LoadedFile<F> {
    pub fits: F,
    pub tables: Vec<Table>,
    pub target: Option<TableIndex>,
}

/// One load attempt. Owns the diagnostics collected along the way.
#[derive(Debug)]
pub struct Pipeline<'c> {
    config: &'c LoadConfig,
    state: LoadState,
    diagnostics: Vec<Diagnostic>,
}

impl<'c> Pipeline<'c> {
    pub fn new(config: &'c LoadConfig) -> Self {
        Self {
            config,
            state: LoadState::Unopened,
            diagnostics: Vec::new(),
        }
    }

    pub fn state(&self) -> LoadState {
        self.state
    }

    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    pub fn into_diagnostics(self) -> Vec<Diagnostic> {
        self.diagnostics
    }

    /// Run every pass. On failure the state is `Failed`, the error is the
    /// last diagnostic and every partially built table has been dropped.
    pub fn run<O: FitsOpener>(&mut self, opener: &O, path: &Path) -> OifitsResult<LoadedFile<O::File>> {
        info!(
            "Loading OIFITS file {} ({} policy)",
            path.display(),
            if self.config.strict { "strict" } else { "lenient" }
        );
        match self.run_passes(opener, path) {
            Ok(loaded) => {
                self.advance(LoadState::Ready);
                info!(
                    "Loaded {} tables from {} with {} diagnostic(s)",
                    loaded.tables.len(),
                    path.display(),
                    self.diagnostics.len()
                );
                Ok(loaded)
            }
            Err(e) => {
                self.advance(LoadState::Failed);
                error!("Failed to load {}: {}", path.display(), e);
                self.diagnostics.push(Diagnostic::from_error(&e));
                Err(e)
            }
        }
    }

    fn run_passes<O: FitsOpener>(&mut self, opener: &O, path: &Path) -> OifitsResult<LoadedFile<O::File>> {
        let fits = opener.open(path)?;
        self.advance(LoadState::Opened);

        let (mut tables, target) = self.classify(&fits)?;
        self.advance(LoadState::Classified);

        let references =
            resolve_references(&mut tables, self.config.report_ambiguous_references);
        self.gate().record_all(references);
        self.advance(LoadState::CrossReferenced);

        self.validate(&fits, &tables)?;
        self.advance(LoadState::Validated);

        Ok(LoadedFile {
            fits,
            tables,
            target,
        })
    }

    fn advance(&mut self, next: LoadState) {
        debug!("Load state {} -> {}", self.state, next);
        self.state = next;
    }

    fn gate(&mut self) -> Gate<'_> {
        Gate::new(self.config.strict, &mut self.diagnostics)
    }

    /// Build one table per recognised `OI_*` extension, in HDU order.
    fn classify(&mut self, fits: &dyn FitsAccess) -> OifitsResult<(Vec<Table>, Option<TableIndex>)> {
        let mut tables: Vec<Table> = Vec::new();
        let mut target: Option<TableIndex> = None;

        // HDU 1 is the primary header.
        for (hdu_index, ext_name) in fits.list_extensions()?.into_iter().filter(|(i, _)| *i >= 2) {
            if !ext_name.starts_with(OI_PREFIX) {
                debug!("Skipping non-OIFITS extension '{}' (HDU {})", ext_name, hdu_index);
                continue;
            }
            let location = TableLocation::new(ext_name.as_str(), hdu_index);
            let Some(kind) = TableKind::classify(&ext_name) else {
                self.gate().record(Diagnostic::warning(
                    Category::Conformance,
                    Some(location),
                    "unknown OIFITS table kind, extension ignored",
                ));
                continue;
            };

            self.check_revision(fits, &location)?;

            let table = Table::construct(kind, fits, &ext_name, hdu_index)?;
            debug!("{} classified as {} (table #{})", location, kind, tables.len());

            if kind == TableKind::Target {
                match target {
                    None => target = Some(tables.len()),
                    Some(first) => self.gate().fail(OifitsError::conformance(
                        Some(&location),
                        format!("duplicate OI_TARGET table, keeping table #{}", first),
                    ))?,
                }
            }
            tables.push(table);
        }

        if target.is_none() {
            self.gate()
                .fail(OifitsError::conformance(None, "no OI_TARGET table found"))?;
        }
        Ok((tables, target))
    }

    fn check_revision(&mut self, fits: &dyn FitsAccess, location: &TableLocation) -> OifitsResult<()> {
        let supported = self.config.supported_revision;
        let problem = match fits.read_keyword(location.hdu_index, "OI_REVN", DataType::Integer) {
            Err(e) => Some(format!("no readable OI_REVN keyword: {}", e)),
            Ok(value) => match value.as_integer() {
                Some(revision) if revision > supported => Some(format!(
                    "revision {} is newer than supported revision {}",
                    revision, supported
                )),
                Some(_) => None,
                None => Some(format!("OI_REVN is not an integer: {}", value)),
            },
        };
        match problem {
            Some(message) => self.gate().fail(OifitsError::conformance(Some(location), message)),
            None => Ok(()),
        }
    }

    /// Structural checks in table order; data tables also get the
    /// channel-count check against their resolved `nwave`.
    fn validate(&mut self, fits: &dyn FitsAccess, tables: &[Table]) -> OifitsResult<()> {
        let mut gate = self.gate();
        for table in tables {
            let nwave = table.as_data().map(|data| data.nwave());
            check_structure(fits, table, nwave, &mut gate)?;
        }
        Ok(())
    }
}
