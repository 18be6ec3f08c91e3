//! Schema-conforming table images.
//!
//! Builds [`MemoryHdu`] values that satisfy an OIFITS table schema, with
//! placeholder data. Handy for producing fixtures and for exercising the
//! loader against files that differ from a conforming one in a single spot.

use crate::core::{DataType, KeywordValue};
use crate::schema::{FieldDesc, Multiplicity};
use crate::tables::TableKind;

use super::{MemoryColumn, MemoryHdu};

/// Names used for cross references in generated tables.
#[derive(Debug, Clone)]
pub struct TemplateNames {
    pub arr_name: String,
    pub ins_name: String,
    pub date_obs: String,
}

impl Default for TemplateNames {
    fn default() -> Self {
        Self {
            arr_name: "VLTI".to_string(),
            ins_name: "AMBER".to_string(),
            date_obs: "2003-05-17".to_string(),
        }
    }
}

/// A conforming table of `kind` with `rows` rows. `nwave` sizes the
/// per-channel columns of data tables and is ignored otherwise.
pub fn conforming_hdu(kind: TableKind, rows: usize, nwave: usize) -> MemoryHdu {
    conforming_hdu_named(kind, rows, nwave, &TemplateNames::default())
}

pub fn conforming_hdu_named(
    kind: TableKind,
    rows: usize,
    nwave: usize,
    names: &TemplateNames,
) -> MemoryHdu {
    let schema = kind.schema();
    let mut hdu = MemoryHdu::binary_table(kind.ext_prefix(), rows);
    for field in schema.keywords {
        if field.name == "NAXIS2" {
            continue;
        }
        hdu = hdu.keyword(field.name, keyword_value(field, names));
    }
    for field in schema.columns {
        let repeat = match field.multiplicity {
            Multiplicity::Fixed(n) => n,
            Multiplicity::PerChannel => nwave,
            Multiplicity::Optional => 1,
        };
        hdu = hdu.column(column(kind, field, repeat, rows));
    }
    hdu
}

fn keyword_value(field: &FieldDesc, names: &TemplateNames) -> KeywordValue {
    match field.name {
        "OI_REVN" => KeywordValue::Integer(1),
        "ARRNAME" => KeywordValue::Character(names.arr_name.clone()),
        "INSNAME" => KeywordValue::Character(names.ins_name.clone()),
        "DATE-OBS" => KeywordValue::Character(names.date_obs.clone()),
        "FRAME" => KeywordValue::Character("GEOCENTRIC".to_string()),
        _ => match field.data_type {
            DataType::Integer => KeywordValue::Integer(0),
            DataType::Character => KeywordValue::Character(String::new()),
            DataType::Float => KeywordValue::Float(0.0),
            DataType::Double => KeywordValue::Double(0.0),
            DataType::Logical => KeywordValue::Logical(false),
        },
    }
}

fn column(kind: TableKind, field: &FieldDesc, repeat: usize, rows: usize) -> MemoryColumn {
    let count = rows * repeat;
    let column = match field.data_type {
        DataType::Integer => {
            MemoryColumn::integer(field.name, repeat, indices(kind, field.name, repeat, count))
        }
        DataType::Character => MemoryColumn::character(field.name, repeat, strings(field.name, rows)),
        DataType::Float => MemoryColumn::float(field.name, repeat, vec![1.0e-6; count]),
        DataType::Double => {
            MemoryColumn::double(field.name, repeat, (0..count).map(|i| i as f64 * 0.5).collect())
        }
        DataType::Logical => MemoryColumn::logical(field.name, repeat, vec![false; count]),
    };
    column.with_unit(field.unit.as_fits_str())
}

fn strings(name: &str, rows: usize) -> Vec<String> {
    match name {
        "VELTYP" => vec!["LSR".to_string(); rows],
        "VELDEF" => vec!["OPTICAL".to_string(); rows],
        _ => (0..rows).map(|i| format!("{}{}", name, i + 1)).collect(),
    }
}

/// Index columns count from 1: target rows number themselves, every data
/// row points at target 1, array rows number their stations, and data
/// rows use stations 1..=repeat.
fn indices(kind: TableKind, name: &str, repeat: usize, count: usize) -> Vec<i16> {
    match (name, repeat) {
        ("TARGET_ID", _) if kind != TableKind::Target => vec![1; count],
        (_, 1) => (1..=count).map(|i| i as i16).collect(),
        _ => (0..count).map(|i| (i % repeat) as i16 + 1).collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fits::{FitsAccess, MemoryFits};

    #[test]
    fn test_conforming_vis2_shapes() {
        let fits = MemoryFits::new(vec![
            MemoryHdu::primary(),
            conforming_hdu(TableKind::Vis2, 4, 3),
        ]);
        let info = fits.read_column_info(2, "VIS2DATA").unwrap();
        assert_eq!(info.repeat, 3);
        assert_eq!(info.unit, "");
        let info = fits.read_column_info(2, "STA_INDEX").unwrap();
        assert_eq!(info.repeat, 2);
        let flags = fits
            .read_column(2, "FLAG", DataType::Logical, 12, 0)
            .unwrap();
        assert_eq!(flags.len(), 12);
    }

    #[test]
    fn test_named_template_sets_reference_keywords() {
        let names = TemplateNames {
            arr_name: "CHARA".to_string(),
            ..TemplateNames::default()
        };
        let fits = MemoryFits::new(vec![
            MemoryHdu::primary(),
            conforming_hdu_named(TableKind::Array, 2, 0, &names),
        ]);
        let value = fits.read_keyword(2, "ARRNAME", DataType::Character).unwrap();
        assert_eq!(value.as_str(), Some("CHARA"));
    }

    #[test]
    fn test_target_rows_are_distinct_and_data_points_at_first() {
        let fits = MemoryFits::new(vec![
            MemoryHdu::primary(),
            conforming_hdu(TableKind::Target, 3, 0),
            conforming_hdu(TableKind::Vis, 3, 1),
        ]);
        let ids = fits.read_column(2, "TARGET_ID", DataType::Integer, 3, 0).unwrap();
        assert_eq!(ids.into_integers(), Some(vec![1, 2, 3]));
        let ids = fits.read_column(3, "TARGET_ID", DataType::Integer, 3, 0).unwrap();
        assert_eq!(ids.into_integers(), Some(vec![1, 1, 1]));
        let veltyp = fits.read_column(2, "VELTYP", DataType::Character, 3, 0).unwrap();
        assert_eq!(veltyp.into_strings(), Some(vec!["LSR".to_string(); 3]));
    }
}
