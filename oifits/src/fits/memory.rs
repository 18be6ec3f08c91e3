//! In-memory FITS access provider.
//!
//! [`MemoryFits`] holds a whole file image (headers and binary-table columns)
//! in memory. It backs the test suite and local tooling, and can be stored on
//! disk as a JSON dump so that [`MemoryOpener`] opens it by path like a real
//! FITS file.
//!
//! # Example
//!
//! ```
//! use oifits::core::{DataType, KeywordValue};
//! use oifits::fits::{FitsAccess, MemoryColumn, MemoryFits, MemoryHdu};
//!
//! let fits = MemoryFits::new(vec![
//!     MemoryHdu::primary(),
//!     MemoryHdu::binary_table("OI_WAVELENGTH", 2)
//!         .keyword("INSNAME", KeywordValue::Character("AMBER".into()))
//!         .column(MemoryColumn::float("EFF_WAVE", 1, vec![2.1e-6, 2.2e-6]).with_unit("m")),
//! ]);
//!
//! let extensions = fits.list_extensions().unwrap();
//! assert_eq!(extensions[1], (2, "OI_WAVELENGTH".to_string()));
//! let info = fits.read_column_info(2, "eff_wave").unwrap();
//! assert_eq!(info.data_type, DataType::Float);
//! ```

use std::collections::{BTreeMap, HashMap};
use std::path::{Path, PathBuf};

use anyhow::Context;
use serde::{Deserialize, Serialize};

use super::{FitsAccess, FitsError, FitsOpener, FitsResult};
use crate::core::{ColumnData, ColumnInfo, DataType, KeywordValue};

/// Whole-file image: `hdus[0]` is the primary header (HDU index 1).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MemoryFits {
    pub hdus: Vec<MemoryHdu>,
}

/// One header/data unit.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MemoryHdu {
    #[serde(default)]
    pub keywords: BTreeMap<String, KeywordValue>,
    #[serde(default)]
    pub columns: Vec<MemoryColumn>,
}

/// One binary-table column with its flat, row-major data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MemoryColumn {
    pub name: String,
    pub data_type: DataType,
    pub repeat: usize,
    pub width: usize,
    #[serde(default)]
    pub unit: String,
    pub data: ColumnData,
}

impl MemoryFits {
    pub fn new(hdus: Vec<MemoryHdu>) -> Self {
        Self { hdus }
    }

    /// Parse a JSON dump.
    pub fn from_json_str(json: &str) -> anyhow::Result<Self> {
        serde_json::from_str(json).context("Failed to parse FITS JSON dump")
    }

    /// Read a JSON dump from disk.
    pub fn from_json_file(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read FITS dump: {}", path.display()))?;
        Self::from_json_str(&content)
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    /// Append an HDU, returning its 1-based index.
    pub fn push(&mut self, hdu: MemoryHdu) -> usize {
        self.hdus.push(hdu);
        self.hdus.len()
    }

    /// Mutable access by 1-based HDU index.
    pub fn hdu_mut(&mut self, hdu: usize) -> Option<&mut MemoryHdu> {
        hdu.checked_sub(1).and_then(move |i| self.hdus.get_mut(i))
    }

    fn hdu(&self, hdu: usize) -> FitsResult<&MemoryHdu> {
        hdu.checked_sub(1)
            .and_then(|i| self.hdus.get(i))
            .ok_or(FitsError::HduNotFound(hdu))
    }

    fn table_column(&self, hdu: usize, name: &str) -> FitsResult<&MemoryColumn> {
        if hdu == 1 {
            return Err(FitsError::NotATable { hdu });
        }
        self.hdu(hdu)?
            .find_column(name)
            .ok_or_else(|| FitsError::ColumnNotFound {
                hdu,
                name: name.to_string(),
            })
    }
}

impl MemoryHdu {
    /// Primary header with the mandatory `SIMPLE` keyword.
    pub fn primary() -> Self {
        let mut keywords = BTreeMap::new();
        keywords.insert("SIMPLE".to_string(), KeywordValue::Logical(true));
        keywords.insert("NAXIS".to_string(), KeywordValue::Integer(0));
        Self {
            keywords,
            columns: Vec::new(),
        }
    }

    /// Binary-table extension with `EXTNAME` and `NAXIS2` already set.
    pub fn binary_table(ext_name: &str, rows: usize) -> Self {
        let mut keywords = BTreeMap::new();
        keywords.insert(
            "XTENSION".to_string(),
            KeywordValue::Character("BINTABLE".to_string()),
        );
        keywords.insert(
            "EXTNAME".to_string(),
            KeywordValue::Character(ext_name.to_string()),
        );
        keywords.insert("NAXIS2".to_string(), KeywordValue::Integer(rows as i64));
        Self {
            keywords,
            columns: Vec::new(),
        }
    }

    pub fn keyword(mut self, name: &str, value: KeywordValue) -> Self {
        self.keywords.insert(name.to_uppercase(), value);
        self
    }

    pub fn without_keyword(mut self, name: &str) -> Self {
        self.keywords.remove(&name.to_uppercase());
        self
    }

    /// Add a column, replacing any column of the same name.
    pub fn column(mut self, column: MemoryColumn) -> Self {
        self.columns
            .retain(|c| !c.name.eq_ignore_ascii_case(&column.name));
        self.columns.push(column);
        self
    }

    pub fn without_column(mut self, name: &str) -> Self {
        self.columns.retain(|c| !c.name.eq_ignore_ascii_case(name));
        self
    }

    pub fn find_column(&self, name: &str) -> Option<&MemoryColumn> {
        self.columns.iter().find(|c| c.name.eq_ignore_ascii_case(name))
    }

    pub fn find_column_mut(&mut self, name: &str) -> Option<&mut MemoryColumn> {
        self.columns
            .iter_mut()
            .find(|c| c.name.eq_ignore_ascii_case(name))
    }
}

impl MemoryColumn {
    fn new(name: &str, repeat: usize, width: usize, data: ColumnData) -> Self {
        Self {
            name: name.to_string(),
            data_type: data.data_type(),
            repeat,
            width,
            unit: String::new(),
            data,
        }
    }

    pub fn integer(name: &str, repeat: usize, data: Vec<i16>) -> Self {
        Self::new(name, repeat, 2, ColumnData::Integer(data))
    }

    /// Fixed-width string column, one value per row; `repeat` is the width
    /// in characters.
    pub fn character(name: &str, repeat: usize, data: Vec<String>) -> Self {
        Self::new(name, repeat, repeat, ColumnData::Character(data))
    }

    pub fn float(name: &str, repeat: usize, data: Vec<f32>) -> Self {
        Self::new(name, repeat, 4, ColumnData::Float(data))
    }

    pub fn double(name: &str, repeat: usize, data: Vec<f64>) -> Self {
        Self::new(name, repeat, 8, ColumnData::Double(data))
    }

    pub fn logical(name: &str, repeat: usize, data: Vec<bool>) -> Self {
        Self::new(name, repeat, 1, ColumnData::Logical(data))
    }

    /// Set the raw `TUNITn` text.
    pub fn with_unit(mut self, unit: &str) -> Self {
        self.unit = unit.to_string();
        self
    }

    /// Elements stored per row in the flat data vector.
    fn stride(&self) -> usize {
        match self.data_type {
            DataType::Character => 1,
            _ => self.repeat,
        }
    }
}

impl FitsAccess for MemoryFits {
    fn list_extensions(&self) -> FitsResult<Vec<(usize, String)>> {
        self.hdus
            .iter()
            .enumerate()
            .map(|(i, hdu)| {
                let index = i + 1;
                if index == 1 {
                    return Ok((index, String::new()));
                }
                match hdu.keywords.get("EXTNAME") {
                    Some(KeywordValue::Character(name)) => Ok((index, name.trim_end().to_string())),
                    Some(other) => Err(FitsError::KeywordType {
                        hdu: index,
                        name: "EXTNAME".to_string(),
                        found: other.data_type(),
                        requested: DataType::Character,
                    }),
                    None => Ok((index, String::new())),
                }
            })
            .collect()
    }

    fn read_keyword(
        &self,
        hdu: usize,
        name: &str,
        data_type: DataType,
    ) -> FitsResult<KeywordValue> {
        let value = self
            .hdu(hdu)?
            .keywords
            .get(&name.to_uppercase())
            .ok_or_else(|| FitsError::KeywordNotFound {
                hdu,
                name: name.to_string(),
            })?;

        match (value, data_type) {
            (v, t) if v.data_type() == t => Ok(v.clone()),
            // cfitsio widens numeric keywords on read
            (KeywordValue::Integer(v), DataType::Double) => Ok(KeywordValue::Double(*v as f64)),
            (KeywordValue::Integer(v), DataType::Float) => Ok(KeywordValue::Float(*v as f32)),
            (KeywordValue::Float(v), DataType::Double) => Ok(KeywordValue::Double(f64::from(*v))),
            (v, t) => Err(FitsError::KeywordType {
                hdu,
                name: name.to_string(),
                found: v.data_type(),
                requested: t,
            }),
        }
    }

    fn read_column(
        &self,
        hdu: usize,
        name: &str,
        data_type: DataType,
        count: usize,
        start_row: usize,
    ) -> FitsResult<ColumnData> {
        let column = self.table_column(hdu, name)?;
        if column.data_type != data_type {
            return Err(FitsError::ColumnType {
                hdu,
                name: name.to_string(),
                found: column.data_type,
                requested: data_type,
            });
        }

        let range_error = || FitsError::RowRange {
            hdu,
            name: name.to_string(),
            row: start_row,
            count,
        };
        let start = start_row.checked_mul(column.stride()).ok_or_else(range_error)?;
        column.data.slice(start, count).ok_or_else(range_error)
    }

    fn read_column_info(&self, hdu: usize, name: &str) -> FitsResult<ColumnInfo> {
        let column = self.table_column(hdu, name)?;
        Ok(ColumnInfo {
            data_type: column.data_type,
            repeat: column.repeat,
            width: column.width,
            unit: column.unit.clone(),
        })
    }
}

/// Opens [`MemoryFits`] images, either registered up front or read from a
/// JSON dump on disk.
#[derive(Debug, Clone, Default)]
pub struct MemoryOpener {
    registry: HashMap<PathBuf, MemoryFits>,
}

impl MemoryOpener {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an image under `path`; later opens of that path return a copy.
    pub fn insert<P: Into<PathBuf>>(&mut self, path: P, fits: MemoryFits) {
        self.registry.insert(path.into(), fits);
    }

    pub fn with_file<P: Into<PathBuf>>(mut self, path: P, fits: MemoryFits) -> Self {
        self.insert(path, fits);
        self
    }
}

impl FitsOpener for MemoryOpener {
    type File = MemoryFits;

    fn open(&self, path: &Path) -> FitsResult<MemoryFits> {
        if let Some(fits) = self.registry.get(path) {
            return Ok(fits.clone());
        }
        MemoryFits::from_json_file(path).map_err(|e| FitsError::Open {
            path: path.to_path_buf(),
            reason: format!("{:#}", e),
        })
    }
}
