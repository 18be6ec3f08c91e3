//! Typed OIFITS tables.
//!
//! A loaded file is a list of [`Table`] values, one per `OI_*` extension.
//! The variant is chosen once, from the extension name, and never changes;
//! it fixes which schema applies and which typed getters are available.
//! Getters are thin reads through the [`FitsAccess`] handle owned by the
//! document and never re-validate anything.

use std::fmt;

use log::debug;
use serde::{Deserialize, Serialize};

use crate::core::{ColumnData, DataType, KeywordValue};
use crate::error::{OifitsError, OifitsResult, TableLocation};
use crate::fits::{FitsAccess, FitsError};
use crate::schema::{
    Schema, ARRAY_SCHEMA, T3_SCHEMA, TARGET_SCHEMA, VIS2_SCHEMA, VIS_SCHEMA, WAVELENGTH_SCHEMA,
};

pub mod array;
pub mod data;
pub mod target;
pub mod wavelength;

#[cfg(test)]
mod tables_tests;

pub use array::ArrayTable;
pub use data::{DataTable, Offer, T3Table, Vis2Table, VisTable};
pub use target::TargetTable;
pub use wavelength::WavelengthTable;

/// Position of a table in the document's table list. Not an HDU index.
pub type TableIndex = usize;

/// Kind of an OIFITS table, fixed at construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TableKind {
    Target,
    Array,
    Wavelength,
    Vis,
    Vis2,
    T3,
}

impl TableKind {
    /// Classification order: `OI_VIS2` must be tried before `OI_VIS`.
    pub const CLASSIFICATION_ORDER: [TableKind; 6] = [
        TableKind::Target,
        TableKind::Array,
        TableKind::Wavelength,
        TableKind::Vis2,
        TableKind::Vis,
        TableKind::T3,
    ];

    /// Extension name prefix identifying this kind.
    pub fn ext_prefix(&self) -> &'static str {
        match self {
            TableKind::Target => "OI_TARGET",
            TableKind::Array => "OI_ARRAY",
            TableKind::Wavelength => "OI_WAVELENGTH",
            TableKind::Vis => "OI_VIS",
            TableKind::Vis2 => "OI_VIS2",
            TableKind::T3 => "OI_T3",
        }
    }

    /// Classify an extension name by prefix, most specific prefix first.
    ///
    /// # Examples
    ///
    /// ```
    /// use oifits::tables::TableKind;
    ///
    /// assert_eq!(TableKind::classify("OI_VIS2"), Some(TableKind::Vis2));
    /// assert_eq!(TableKind::classify("OI_VIS"), Some(TableKind::Vis));
    /// assert_eq!(TableKind::classify("OI_FLUX"), None);
    /// ```
    pub fn classify(ext_name: &str) -> Option<TableKind> {
        Self::CLASSIFICATION_ORDER
            .into_iter()
            .find(|kind| ext_name.starts_with(kind.ext_prefix()))
    }

    pub fn schema(&self) -> &'static Schema {
        match self {
            TableKind::Target => &TARGET_SCHEMA,
            TableKind::Array => &ARRAY_SCHEMA,
            TableKind::Wavelength => &WAVELENGTH_SCHEMA,
            TableKind::Vis => &VIS_SCHEMA,
            TableKind::Vis2 => &VIS2_SCHEMA,
            TableKind::T3 => &T3_SCHEMA,
        }
    }

    /// VIS, VIS2 and T3 hold measurements and carry cross references.
    pub fn is_data(&self) -> bool {
        matches!(self, TableKind::Vis | TableKind::Vis2 | TableKind::T3)
    }

    /// Stations contributing to one measurement row.
    pub fn station_arity(&self) -> usize {
        match self {
            TableKind::Vis | TableKind::Vis2 => 2,
            TableKind::T3 => 3,
            _ => 0,
        }
    }
}

impl fmt::Display for TableKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.ext_prefix())
    }
}

/// Identity and row count shared by every table.
#[derive(Debug, PartialEq, Eq)]
pub struct TableHeader {
    ext_name: String,
    hdu_index: usize,
    row_count: usize,
}

impl TableHeader {
    /// Read `NAXIS2` once; its failure aborts construction.
    pub(crate) fn read(
        fits: &dyn FitsAccess,
        ext_name: &str,
        hdu_index: usize,
    ) -> OifitsResult<Self> {
        let rows = fits
            .read_keyword(hdu_index, "NAXIS2", DataType::Integer)?
            .as_integer()
            .unwrap_or(0);
        Ok(Self {
            ext_name: ext_name.to_string(),
            hdu_index,
            row_count: rows.max(0) as usize,
        })
    }

    pub fn ext_name(&self) -> &str {
        &self.ext_name
    }

    pub fn hdu_index(&self) -> usize {
        self.hdu_index
    }

    pub fn row_count(&self) -> usize {
        self.row_count
    }

    pub fn location(&self) -> TableLocation {
        TableLocation::new(self.ext_name.clone(), self.hdu_index)
    }

    pub fn read_keyword(
        &self,
        fits: &dyn FitsAccess,
        name: &str,
        data_type: DataType,
    ) -> OifitsResult<KeywordValue> {
        Ok(fits.read_keyword(self.hdu_index, name, data_type)?)
    }

    pub(crate) fn keyword_string(&self, fits: &dyn FitsAccess, name: &str) -> OifitsResult<String> {
        let value = self.read_keyword(fits, name, DataType::Character)?;
        value
            .as_str()
            .map(str::to_string)
            .ok_or_else(|| self.keyword_mismatch(name, &value, DataType::Character))
    }

    pub(crate) fn keyword_double(&self, fits: &dyn FitsAccess, name: &str) -> OifitsResult<f64> {
        let value = self.read_keyword(fits, name, DataType::Double)?;
        value
            .as_double()
            .ok_or_else(|| self.keyword_mismatch(name, &value, DataType::Double))
    }

    pub(crate) fn keyword_integer(&self, fits: &dyn FitsAccess, name: &str) -> OifitsResult<i64> {
        let value = self.read_keyword(fits, name, DataType::Integer)?;
        value
            .as_integer()
            .ok_or_else(|| self.keyword_mismatch(name, &value, DataType::Integer))
    }

    /// Optional character keyword; a failed read is logged and yields `None`.
    pub(crate) fn optional_string(&self, fits: &dyn FitsAccess, name: &str) -> Option<String> {
        match self.keyword_string(fits, name) {
            Ok(value) => Some(value),
            Err(e) => {
                debug!("{}: no usable {} keyword ({})", self.location(), name, e);
                None
            }
        }
    }

    fn keyword_mismatch(&self, name: &str, value: &KeywordValue, requested: DataType) -> OifitsError {
        FitsError::KeywordType {
            hdu: self.hdu_index,
            name: name.to_string(),
            found: value.data_type(),
            requested,
        }
        .into()
    }

    fn read_column<T>(
        &self,
        fits: &dyn FitsAccess,
        name: &str,
        data_type: DataType,
        count: usize,
        extract: fn(ColumnData) -> Option<Vec<T>>,
    ) -> OifitsResult<Vec<T>> {
        let data = fits.read_column(self.hdu_index, name, data_type, count, 0)?;
        let found = data.data_type();
        extract(data).ok_or_else(|| {
            FitsError::ColumnType {
                hdu: self.hdu_index,
                name: name.to_string(),
                found,
                requested: data_type,
            }
            .into()
        })
    }

    pub(crate) fn integers(&self, fits: &dyn FitsAccess, name: &str, count: usize) -> OifitsResult<Vec<i16>> {
        self.read_column(fits, name, DataType::Integer, count, ColumnData::into_integers)
    }

    pub(crate) fn strings(&self, fits: &dyn FitsAccess, name: &str, count: usize) -> OifitsResult<Vec<String>> {
        self.read_column(fits, name, DataType::Character, count, ColumnData::into_strings)
    }

    pub(crate) fn floats(&self, fits: &dyn FitsAccess, name: &str, count: usize) -> OifitsResult<Vec<f32>> {
        self.read_column(fits, name, DataType::Float, count, ColumnData::into_floats)
    }

    pub(crate) fn doubles(&self, fits: &dyn FitsAccess, name: &str, count: usize) -> OifitsResult<Vec<f64>> {
        self.read_column(fits, name, DataType::Double, count, ColumnData::into_doubles)
    }

    pub(crate) fn logicals(&self, fits: &dyn FitsAccess, name: &str, count: usize) -> OifitsResult<Vec<bool>> {
        self.read_column(fits, name, DataType::Logical, count, ColumnData::into_logicals)
    }
}

/// One OIFITS table. Owned by the document, never cloned.
#[derive(Debug)]
pub enum Table {
    Target(TargetTable),
    Array(ArrayTable),
    Wavelength(WavelengthTable),
    Vis(VisTable),
    Vis2(Vis2Table),
    T3(T3Table),
}

impl Table {
    /// Build the table of `kind` living at `hdu_index`.
    pub(crate) fn construct(
        kind: TableKind,
        fits: &dyn FitsAccess,
        ext_name: &str,
        hdu_index: usize,
    ) -> OifitsResult<Table> {
        let header = TableHeader::read(fits, ext_name, hdu_index)?;
        let table = match kind {
            TableKind::Target => Table::Target(TargetTable::new(header)),
            TableKind::Array => Table::Array(ArrayTable::new(header, fits)),
            TableKind::Wavelength => Table::Wavelength(WavelengthTable::new(header, fits)),
            TableKind::Vis => Table::Vis(VisTable::new(DataTable::new(header, kind, fits))),
            TableKind::Vis2 => Table::Vis2(Vis2Table::new(DataTable::new(header, kind, fits))),
            TableKind::T3 => Table::T3(T3Table::new(DataTable::new(header, kind, fits))),
        };
        Ok(table)
    }

    pub fn kind(&self) -> TableKind {
        match self {
            Table::Target(_) => TableKind::Target,
            Table::Array(_) => TableKind::Array,
            Table::Wavelength(_) => TableKind::Wavelength,
            Table::Vis(_) => TableKind::Vis,
            Table::Vis2(_) => TableKind::Vis2,
            Table::T3(_) => TableKind::T3,
        }
    }

    pub fn header(&self) -> &TableHeader {
        match self {
            Table::Target(t) => t.header(),
            Table::Array(t) => t.header(),
            Table::Wavelength(t) => t.header(),
            Table::Vis(t) => t.data().header(),
            Table::Vis2(t) => t.data().header(),
            Table::T3(t) => t.data().header(),
        }
    }

    pub fn ext_name(&self) -> &str {
        self.header().ext_name()
    }

    pub fn hdu_index(&self) -> usize {
        self.header().hdu_index()
    }

    pub fn row_count(&self) -> usize {
        self.header().row_count()
    }

    pub fn location(&self) -> TableLocation {
        self.header().location()
    }

    pub fn schema(&self) -> &'static Schema {
        self.kind().schema()
    }

    /// `OI_REVN`, read on demand.
    pub fn revision(&self, fits: &dyn FitsAccess) -> OifitsResult<i64> {
        self.header().keyword_integer(fits, "OI_REVN")
    }

    /// Any header keyword of this table, read as `data_type`.
    pub fn keyword(
        &self,
        fits: &dyn FitsAccess,
        name: &str,
        data_type: DataType,
    ) -> OifitsResult<KeywordValue> {
        self.header().read_keyword(fits, name, data_type)
    }

    /// Measurement-table view, for VIS, VIS2 and T3.
    pub fn as_data(&self) -> Option<&DataTable> {
        match self {
            Table::Vis(t) => Some(t.data()),
            Table::Vis2(t) => Some(t.data()),
            Table::T3(t) => Some(t.data()),
            _ => None,
        }
    }

    pub(crate) fn as_data_mut(&mut self) -> Option<&mut DataTable> {
        match self {
            Table::Vis(t) => Some(t.data_mut()),
            Table::Vis2(t) => Some(t.data_mut()),
            Table::T3(t) => Some(t.data_mut()),
            _ => None,
        }
    }

    pub fn as_target(&self) -> Option<&TargetTable> {
        match self {
            Table::Target(t) => Some(t),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&ArrayTable> {
        match self {
            Table::Array(t) => Some(t),
            _ => None,
        }
    }

    pub fn as_wavelength(&self) -> Option<&WavelengthTable> {
        match self {
            Table::Wavelength(t) => Some(t),
            _ => None,
        }
    }

    pub fn as_vis(&self) -> Option<&VisTable> {
        match self {
            Table::Vis(t) => Some(t),
            _ => None,
        }
    }

    pub fn as_vis2(&self) -> Option<&Vis2Table> {
        match self {
            Table::Vis2(t) => Some(t),
            _ => None,
        }
    }

    pub fn as_t3(&self) -> Option<&T3Table> {
        match self {
            Table::T3(t) => Some(t),
            _ => None,
        }
    }

    /// Name this table is referenced by: ARRNAME for arrays, INSNAME for
    /// wavelength tables.
    pub(crate) fn reference_name(&self) -> Option<&str> {
        match self {
            Table::Array(t) => t.cached_arr_name(),
            Table::Wavelength(t) => t.cached_ins_name(),
            _ => None,
        }
    }
}
