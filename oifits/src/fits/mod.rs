//! FITS access provider abstraction.
//!
//! The OIFITS model never touches FITS bytes itself. Everything it knows
//! about a file comes through [`FitsAccess`]: extension names, typed keyword
//! reads, typed column reads and column metadata. Different implementations
//! (the bundled in-memory [`memory::MemoryFits`], a cfitsio binding, ...) can
//! be swapped in via [`FitsOpener`].
//!
//! HDU indices are 1-based, index 1 being the primary header. Row indices
//! passed to [`FitsAccess::read_column`] are 0-based.

use std::path::{Path, PathBuf};

use crate::core::{ColumnData, ColumnInfo, DataType, KeywordValue};

pub mod memory;
pub mod template;

#[cfg(test)]
mod memory_tests;

pub use memory::{MemoryColumn, MemoryFits, MemoryHdu, MemoryOpener};
pub use template::{conforming_hdu, conforming_hdu_named, TemplateNames};

/// Result type for provider operations
pub type FitsResult<T> = Result<T, FitsError>;

/// Provider-native error. Its text is appended verbatim to the core's
/// own reports.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum FitsError {
    #[error("could not open '{path}': {reason}")]
    Open { path: PathBuf, reason: String },

    #[error("HDU {0} does not exist")]
    HduNotFound(usize),

    #[error("keyword '{name}' not found in HDU {hdu}")]
    KeywordNotFound { hdu: usize, name: String },

    #[error("keyword '{name}' in HDU {hdu} is {found}, not {requested}")]
    KeywordType {
        hdu: usize,
        name: String,
        found: DataType,
        requested: DataType,
    },

    #[error("column '{name}' not found in HDU {hdu}")]
    ColumnNotFound { hdu: usize, name: String },

    #[error("column '{name}' in HDU {hdu} is {found}, cannot be read as {requested}")]
    ColumnType {
        hdu: usize,
        name: String,
        found: DataType,
        requested: DataType,
    },

    #[error("column '{name}' in HDU {hdu}: cannot read {count} element(s) from row {row}")]
    RowRange {
        hdu: usize,
        name: String,
        row: usize,
        count: usize,
    },

    #[error("HDU {hdu} is not a binary table")]
    NotATable { hdu: usize },
}

/// Opens files, producing an exclusively owned handle.
pub trait FitsOpener {
    type File: FitsAccess + 'static;

    fn open(&self, path: &Path) -> FitsResult<Self::File>;
}

/// Read access to one open FITS file.
pub trait FitsAccess {
    /// Every HDU in file order as `(hdu_index, EXTNAME)`. The primary header
    /// and extensions without `EXTNAME` are reported with an empty name.
    fn list_extensions(&self) -> FitsResult<Vec<(usize, String)>>;

    /// Read keyword `name` of HDU `hdu` as `data_type`.
    fn read_keyword(&self, hdu: usize, name: &str, data_type: DataType)
        -> FitsResult<KeywordValue>;

    /// Read `count` elements of column `name` as `data_type`, starting at
    /// the first element of row `start_row` and continuing across rows.
    fn read_column(
        &self,
        hdu: usize,
        name: &str,
        data_type: DataType,
        count: usize,
        start_row: usize,
    ) -> FitsResult<ColumnData>;

    /// Type, repeat count, width and raw unit of column `name`.
    fn read_column_info(&self, hdu: usize, name: &str) -> FitsResult<ColumnInfo>;
}
