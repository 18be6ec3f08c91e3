//! Primitive keyword/column types and the values read through them.

use std::fmt;

use serde::{Deserialize, Serialize};

/// FITS data type of a keyword or a binary-table column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DataType {
    /// FITS `I`
    Integer,
    /// FITS `A`
    Character,
    /// FITS `E`
    Float,
    /// FITS `D`
    Double,
    /// FITS `L`
    Logical,
}

impl DataType {
    /// Binary-table `TFORM` letter.
    pub fn tform_code(&self) -> char {
        match self {
            DataType::Integer => 'I',
            DataType::Character => 'A',
            DataType::Float => 'E',
            DataType::Double => 'D',
            DataType::Logical => 'L',
        }
    }
}

impl fmt::Display for DataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            DataType::Integer => "integer",
            DataType::Character => "character",
            DataType::Float => "float",
            DataType::Double => "double",
            DataType::Logical => "logical",
        };
        write!(f, "{} ({})", name, self.tform_code())
    }
}

/// A keyword value as decoded by the access provider.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum KeywordValue {
    Integer(i64),
    Character(String),
    Float(f32),
    Double(f64),
    Logical(bool),
}

impl KeywordValue {
    pub fn data_type(&self) -> DataType {
        match self {
            KeywordValue::Integer(_) => DataType::Integer,
            KeywordValue::Character(_) => DataType::Character,
            KeywordValue::Float(_) => DataType::Float,
            KeywordValue::Double(_) => DataType::Double,
            KeywordValue::Logical(_) => DataType::Logical,
        }
    }

    pub fn as_integer(&self) -> Option<i64> {
        match self {
            KeywordValue::Integer(v) => Some(*v),
            _ => None,
        }
    }

    /// Character value with FITS trailing blanks removed.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            KeywordValue::Character(v) => Some(v.trim_end()),
            _ => None,
        }
    }

    pub fn as_double(&self) -> Option<f64> {
        match self {
            KeywordValue::Double(v) => Some(*v),
            KeywordValue::Float(v) => Some(f64::from(*v)),
            _ => None,
        }
    }

    pub fn as_logical(&self) -> Option<bool> {
        match self {
            KeywordValue::Logical(v) => Some(*v),
            _ => None,
        }
    }
}

impl fmt::Display for KeywordValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            KeywordValue::Integer(v) => write!(f, "{}", v),
            KeywordValue::Character(v) => write!(f, "'{}'", v),
            KeywordValue::Float(v) => write!(f, "{}", v),
            KeywordValue::Double(v) => write!(f, "{}", v),
            KeywordValue::Logical(v) => f.write_str(if *v { "T" } else { "F" }),
        }
    }
}

/// Flat column values, row-major: row `r`, element `e` of a column with
/// repeat `n` sits at `r * n + e`. Character columns hold one string per row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ColumnData {
    Integer(Vec<i16>),
    Character(Vec<String>),
    Float(Vec<f32>),
    Double(Vec<f64>),
    Logical(Vec<bool>),
}

impl ColumnData {
    pub fn data_type(&self) -> DataType {
        match self {
            ColumnData::Integer(_) => DataType::Integer,
            ColumnData::Character(_) => DataType::Character,
            ColumnData::Float(_) => DataType::Float,
            ColumnData::Double(_) => DataType::Double,
            ColumnData::Logical(_) => DataType::Logical,
        }
    }

    pub fn len(&self) -> usize {
        match self {
            ColumnData::Integer(v) => v.len(),
            ColumnData::Character(v) => v.len(),
            ColumnData::Float(v) => v.len(),
            ColumnData::Double(v) => v.len(),
            ColumnData::Logical(v) => v.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Copy out `count` elements starting at flat offset `start`.
    pub fn slice(&self, start: usize, count: usize) -> Option<ColumnData> {
        let end = start.checked_add(count)?;
        if end > self.len() {
            return None;
        }
        Some(match self {
            ColumnData::Integer(v) => ColumnData::Integer(v[start..end].to_vec()),
            ColumnData::Character(v) => ColumnData::Character(v[start..end].to_vec()),
            ColumnData::Float(v) => ColumnData::Float(v[start..end].to_vec()),
            ColumnData::Double(v) => ColumnData::Double(v[start..end].to_vec()),
            ColumnData::Logical(v) => ColumnData::Logical(v[start..end].to_vec()),
        })
    }

    pub fn into_integers(self) -> Option<Vec<i16>> {
        match self {
            ColumnData::Integer(v) => Some(v),
            _ => None,
        }
    }

    /// Strings with FITS trailing blanks removed.
    pub fn into_strings(self) -> Option<Vec<String>> {
        match self {
            ColumnData::Character(v) => {
                Some(v.into_iter().map(|s| s.trim_end().to_string()).collect())
            }
            _ => None,
        }
    }

    pub fn into_floats(self) -> Option<Vec<f32>> {
        match self {
            ColumnData::Float(v) => Some(v),
            _ => None,
        }
    }

    pub fn into_doubles(self) -> Option<Vec<f64>> {
        match self {
            ColumnData::Double(v) => Some(v),
            _ => None,
        }
    }

    pub fn into_logicals(self) -> Option<Vec<bool>> {
        match self {
            ColumnData::Logical(v) => Some(v),
            _ => None,
        }
    }
}

/// Column metadata reported by the access provider.
///
/// `unit` is the raw `TUNITn` text; the validation engine normalizes it with
/// [`crate::core::Unit::normalize`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnInfo {
    pub data_type: DataType,
    pub repeat: usize,
    pub width: usize,
    pub unit: String,
}
