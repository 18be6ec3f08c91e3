use serde::{Deserialize, Serialize};

use crate::loader::LoadState;
use crate::tables::{Table, TableIndex, TableKind};

/// Overview of a loaded document, one entry per table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentSummary {
    pub path: Option<String>,
    pub state: LoadState,
    pub target: Option<TableIndex>,
    pub tables: Vec<TableSummary>,
    pub diagnostic_count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableSummary {
    pub index: TableIndex,
    pub hdu_index: usize,
    pub ext_name: String,
    pub kind: TableKind,
    pub rows: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nwave: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub array: Option<TableIndex>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub wavelength: Option<TableIndex>,
}

impl TableSummary {
    pub(crate) fn of(index: TableIndex, table: &Table) -> Self {
        let data = table.as_data();
        Self {
            index,
            hdu_index: table.hdu_index(),
            ext_name: table.ext_name().to_string(),
            kind: table.kind(),
            rows: table.row_count(),
            nwave: data.map(|d| d.nwave()),
            array: data.and_then(|d| d.array()),
            wavelength: data.and_then(|d| d.wavelength()),
        }
    }
}
