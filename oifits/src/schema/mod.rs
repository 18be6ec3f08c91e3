//! Declarative schema descriptions of the OIFITS tables.
//!
//! Each table kind owns one ordered list of keyword descriptions and one of
//! column descriptions. The validation engine walks these lists against the
//! live file; nothing here performs I/O.

use serde::Serialize;

use crate::core::{DataType, Unit};

pub mod definitions;

pub use definitions::{
    ARRAY_SCHEMA, T3_SCHEMA, TARGET_SCHEMA, VIS2_SCHEMA, VIS_SCHEMA, WAVELENGTH_SCHEMA,
};

/// Expected repeat count of a column, or presence of a keyword.
///
/// Encoded in the OIFITS definitions as an integer: a positive `N` is an
/// exact repeat count, `0` is optional and `-1` means "one element per
/// spectral channel".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Multiplicity {
    Fixed(usize),
    Optional,
    PerChannel,
}

impl Multiplicity {
    /// Decode the integer convention. Any negative code is channel-dependent.
    pub fn from_code(code: i64) -> Self {
        match code {
            c if c > 0 => Multiplicity::Fixed(c as usize),
            0 => Multiplicity::Optional,
            _ => Multiplicity::PerChannel,
        }
    }

    pub fn code(&self) -> i64 {
        match self {
            Multiplicity::Fixed(n) => *n as i64,
            Multiplicity::Optional => 0,
            Multiplicity::PerChannel => -1,
        }
    }

    /// Keywords with a positive multiplicity must be present.
    pub fn is_required(&self) -> bool {
        matches!(self, Multiplicity::Fixed(_))
    }
}

/// Description of one keyword or column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FieldDesc {
    pub name: &'static str,
    pub data_type: DataType,
    pub multiplicity: Multiplicity,
    pub unit: Unit,
    pub description: &'static str,
}

impl FieldDesc {
    pub const fn new(
        name: &'static str,
        data_type: DataType,
        multiplicity: Multiplicity,
        unit: Unit,
        description: &'static str,
    ) -> Self {
        Self {
            name,
            data_type,
            multiplicity,
            unit,
            description,
        }
    }
}

/// Keyword and column descriptions of one table kind.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct Schema {
    pub keywords: &'static [FieldDesc],
    pub columns: &'static [FieldDesc],
}

impl Schema {
    pub fn keyword(&self, name: &str) -> Option<&'static FieldDesc> {
        self.keywords.iter().find(|k| k.name == name)
    }

    pub fn column(&self, name: &str) -> Option<&'static FieldDesc> {
        self.columns.iter().find(|c| c.name == name)
    }

    /// Columns whose repeat count follows the spectral-channel count.
    pub fn channel_columns(&self) -> impl Iterator<Item = &'static FieldDesc> {
        self.columns
            .iter()
            .filter(|c| c.multiplicity == Multiplicity::PerChannel)
    }
}
