//! The loaded OIFITS document.
//!
//! [`Document`] owns the open file handle and the table list. Tables are
//! addressed by their position in that list, which is stable for the life
//! of the load and unrelated to HDU numbering.
//!
//! # Example
//!
//! ```
//! use oifits::fits::{conforming_hdu, MemoryFits, MemoryHdu, MemoryOpener};
//! use oifits::tables::TableKind;
//! use oifits::Document;
//!
//! let file = MemoryFits::new(vec![
//!     MemoryHdu::primary(),
//!     conforming_hdu(TableKind::Target, 1, 0),
//!     conforming_hdu(TableKind::Wavelength, 3, 0),
//!     conforming_hdu(TableKind::Vis2, 2, 3),
//! ]);
//! let mut doc = Document::new(MemoryOpener::new().with_file("night1.oifits", file));
//! doc.load("night1.oifits", true).unwrap();
//!
//! let vis2 = doc.table(2).unwrap().as_vis2().unwrap();
//! assert_eq!(vis2.data().nwave(), 3);
//! assert_eq!(vis2.vis2_data(doc.fits().unwrap()).unwrap().len(), 6);
//! ```

use std::io;
use std::path::{Path, PathBuf};

use log::{info, warn};

use crate::error::{OifitsError, OifitsResult, StateError};
use crate::fits::{FitsOpener, MemoryOpener};
use crate::integrity;
use crate::loader::{LoadConfig, LoadState, Pipeline};
use crate::tables::{ArrayTable, Table, TableIndex, TableKind, TargetTable, WavelengthTable};
use crate::validation::{Diagnostic, LoadReport};

mod summary;

pub use summary::{DocumentSummary, TableSummary};

pub struct Document<O: FitsOpener = MemoryOpener> {
    opener: O,
    config: LoadConfig,
    state: LoadState,
    path: Option<PathBuf>,
    file: Option<O::File>,
    tables: Vec<Table>,
    target: Option<TableIndex>,
    diagnostics: Vec<Diagnostic>,
}

impl Default for Document<MemoryOpener> {
    fn default() -> Self {
        Self::new(MemoryOpener::new())
    }
}

impl<O: FitsOpener> Document<O> {
    pub fn new(opener: O) -> Self {
        Self::with_config(opener, LoadConfig::default())
    }

    /// Document whose loads use `config` as the base policy.
    pub fn with_config(opener: O, config: LoadConfig) -> Self {
        Self {
            opener,
            config,
            state: LoadState::Unopened,
            path: None,
            file: None,
            tables: Vec::new(),
            target: None,
            diagnostics: Vec::new(),
        }
    }

    pub fn config(&self) -> &LoadConfig {
        &self.config
    }

    /// Load `path` with the configured policy, overriding strictness.
    pub fn load<P: AsRef<Path>>(&mut self, path: P, strict: bool) -> OifitsResult<LoadReport> {
        let config = LoadConfig {
            strict,
            ..self.config.clone()
        };
        self.load_with(path, &config)
    }

    /// Load `path`. A document holds one file for its whole life: loading
    /// again after success is rejected, but a failed load may be retried.
    pub fn load_with<P: AsRef<Path>>(&mut self, path: P, config: &LoadConfig) -> OifitsResult<LoadReport> {
        if self.is_loaded() {
            return Err(StateError::AlreadyLoaded.into());
        }
        let path = path.as_ref();

        let mut pipeline = Pipeline::new(config);
        let result = pipeline.run(&self.opener, path);
        self.state = pipeline.state();
        self.diagnostics = pipeline.into_diagnostics();

        match result {
            Ok(loaded) => {
                self.path = Some(path.to_path_buf());
                self.file = Some(loaded.fits);
                self.tables = loaded.tables;
                self.target = loaded.target;
                Ok(LoadReport {
                    table_count: self.tables.len(),
                    diagnostics: self.diagnostics.clone(),
                })
            }
            Err(e) => {
                self.path = None;
                self.file = None;
                self.tables.clear();
                self.target = None;
                Err(e)
            }
        }
    }

    /// Guard for writing the document back. Writing is not supported, so
    /// this checks state and destination and writes nothing.
    pub fn save<P: AsRef<Path>>(&self, path: P, overwrite: bool) -> OifitsResult<()> {
        self.require_loaded("save")?;
        let path = path.as_ref();
        if path.exists() && !overwrite {
            return Err(OifitsError::Io(io::Error::new(
                io::ErrorKind::AlreadyExists,
                format!("{} exists and overwrite is off", path.display()),
            )));
        }
        warn!(
            "Writing OIFITS files is not supported; nothing written to {}",
            path.display()
        );
        Ok(())
    }

    pub fn state(&self) -> LoadState {
        self.state
    }

    pub fn is_loaded(&self) -> bool {
        self.state == LoadState::Ready
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Diagnostics of the last load attempt, successful or not.
    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    /// Open file handle, for passing to typed table getters.
    pub fn fits(&self) -> OifitsResult<&O::File> {
        self.require_loaded("fits")?;
        self.file
            .as_ref()
            .ok_or_else(|| StateError::NotLoaded { operation: "fits" }.into())
    }

    pub fn target(&self) -> OifitsResult<&TargetTable> {
        self.require_loaded("target")?;
        self.target
            .and_then(|i| self.tables.get(i))
            .and_then(Table::as_target)
            .ok_or_else(|| StateError::NoTarget.into())
    }

    /// Number of tables; zero when nothing is loaded.
    pub fn table_count(&self) -> usize {
        self.tables.len()
    }

    pub fn table(&self, index: TableIndex) -> OifitsResult<&Table> {
        self.require_loaded("table")?;
        self.tables.get(index).ok_or(OifitsError::IndexOutOfRange {
            index,
            count: self.tables.len(),
        })
    }

    pub fn tables(&self) -> OifitsResult<&[Table]> {
        self.require_loaded("tables")?;
        Ok(&self.tables)
    }

    pub fn tables_of_kind(&self, kind: TableKind) -> OifitsResult<Vec<(TableIndex, &Table)>> {
        Ok(self
            .tables()?
            .iter()
            .enumerate()
            .filter(|(_, t)| t.kind() == kind)
            .collect())
    }

    /// First array table named `name`, the one data tables resolve to.
    pub fn array_by_name(&self, name: &str) -> OifitsResult<Option<&ArrayTable>> {
        Ok(self
            .tables()?
            .iter()
            .filter_map(Table::as_array)
            .find(|a| a.cached_arr_name() == Some(name)))
    }

    pub fn wavelength_by_name(&self, name: &str) -> OifitsResult<Option<&WavelengthTable>> {
        Ok(self
            .tables()?
            .iter()
            .filter_map(Table::as_wavelength)
            .find(|w| w.cached_ins_name() == Some(name)))
    }

    /// Array table referenced by the data table at `index`.
    pub fn array_of(&self, index: TableIndex) -> OifitsResult<&ArrayTable> {
        let table = self.table(index)?;
        table
            .as_data()
            .and_then(|d| d.array())
            .and_then(|i| self.tables.get(i))
            .and_then(Table::as_array)
            .ok_or_else(|| OifitsError::NoReference {
                location: table.location(),
                kind: "OI_ARRAY",
            })
    }

    pub fn wavelength_of(&self, index: TableIndex) -> OifitsResult<&WavelengthTable> {
        let table = self.table(index)?;
        table
            .as_data()
            .and_then(|d| d.wavelength())
            .and_then(|i| self.tables.get(i))
            .and_then(Table::as_wavelength)
            .ok_or_else(|| OifitsError::NoReference {
                location: table.location(),
                kind: "OI_WAVELENGTH",
            })
    }

    /// Identifier consistency between tables. Warnings only.
    pub fn check_references(&self) -> OifitsResult<Vec<Diagnostic>> {
        let fits = self.fits()?;
        let findings = integrity::check_references(fits, &self.tables, self.target);
        info!("Reference check found {} issue(s)", findings.len());
        Ok(findings)
    }

    pub fn summary(&self) -> OifitsResult<DocumentSummary> {
        let tables = self.tables()?;
        Ok(DocumentSummary {
            path: self.path.as_ref().map(|p| p.display().to_string()),
            state: self.state,
            target: self.target,
            tables: tables
                .iter()
                .enumerate()
                .map(|(i, t)| TableSummary::of(i, t))
                .collect(),
            diagnostic_count: self.diagnostics.len(),
        })
    }

    pub fn to_json(&self) -> OifitsResult<String> {
        Ok(serde_json::to_string_pretty(&self.summary()?)?)
    }

    fn require_loaded(&self, operation: &'static str) -> OifitsResult<()> {
        if self.is_loaded() {
            Ok(())
        } else {
            Err(StateError::NotLoaded { operation }.into())
        }
    }
}
