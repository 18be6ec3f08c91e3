use std::io::Write;
use std::path::Path;

use tempfile::NamedTempFile;

use crate::core::{ColumnData, DataType, KeywordValue};
use crate::fits::{FitsAccess, FitsError, FitsOpener, MemoryColumn, MemoryFits, MemoryHdu, MemoryOpener};

fn sample() -> MemoryFits {
    MemoryFits::new(vec![
        MemoryHdu::primary(),
        MemoryHdu::binary_table("OI_ARRAY", 2)
            .keyword("ARRNAME", KeywordValue::Character("VLTI    ".into()))
            .keyword("ARRAYX", KeywordValue::Double(1942014.5))
            .column(MemoryColumn::character("TEL_NAME", 16, vec!["UT1".into(), "UT2".into()]))
            .column(
                MemoryColumn::double("STAXYZ", 3, vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0])
                    .with_unit("m"),
            ),
    ])
}

#[test]
fn test_list_extensions_includes_primary() {
    let fits = sample();
    let extensions = fits.list_extensions().unwrap();
    assert_eq!(
        extensions,
        vec![(1, String::new()), (2, "OI_ARRAY".to_string())]
    );
}

#[test]
fn test_list_extensions_unnamed_extension_has_empty_name() {
    let fits = MemoryFits::new(vec![
        MemoryHdu::primary(),
        MemoryHdu::binary_table("OI_ARRAY", 0).without_keyword("EXTNAME"),
        MemoryHdu::binary_table("OI_TARGET", 0),
    ]);
    let extensions = fits.list_extensions().unwrap();
    assert_eq!(
        extensions,
        vec![
            (1, String::new()),
            (2, String::new()),
            (3, "OI_TARGET".to_string())
        ]
    );
}

#[test]
fn test_list_extensions_rejects_non_string_extname() {
    let fits = MemoryFits::new(vec![
        MemoryHdu::primary(),
        MemoryHdu::binary_table("OI_ARRAY", 0).keyword("EXTNAME", KeywordValue::Integer(4)),
    ]);
    let err = fits.list_extensions().unwrap_err();
    assert!(matches!(err, FitsError::KeywordType { hdu: 2, .. }));
}

#[test]
fn test_read_keyword_typed() {
    let fits = sample();
    let rows = fits.read_keyword(2, "NAXIS2", DataType::Integer).unwrap();
    assert_eq!(rows, KeywordValue::Integer(2));

    let widened = fits.read_keyword(2, "NAXIS2", DataType::Double).unwrap();
    assert_eq!(widened, KeywordValue::Double(2.0));

    let err = fits.read_keyword(2, "ARRNAME", DataType::Integer).unwrap_err();
    assert!(matches!(err, FitsError::KeywordType { .. }));

    let err = fits.read_keyword(2, "FRAME", DataType::Character).unwrap_err();
    assert_eq!(err.to_string(), "keyword 'FRAME' not found in HDU 2");
}

#[test]
fn test_read_keyword_unknown_hdu() {
    let fits = sample();
    let err = fits.read_keyword(7, "NAXIS2", DataType::Integer).unwrap_err();
    assert_eq!(err, FitsError::HduNotFound(7));
    let err = fits.read_keyword(0, "NAXIS2", DataType::Integer).unwrap_err();
    assert_eq!(err, FitsError::HduNotFound(0));
}

#[test]
fn test_read_column_spans_rows() {
    let fits = sample();
    let second_row = fits.read_column(2, "STAXYZ", DataType::Double, 3, 1).unwrap();
    assert_eq!(second_row, ColumnData::Double(vec![4.0, 5.0, 6.0]));

    let across = fits.read_column(2, "staxyz", DataType::Double, 4, 0).unwrap();
    assert_eq!(across, ColumnData::Double(vec![1.0, 2.0, 3.0, 4.0]));

    let names = fits.read_column(2, "TEL_NAME", DataType::Character, 1, 1).unwrap();
    assert_eq!(names, ColumnData::Character(vec!["UT2".into()]));
}

#[test]
fn test_read_column_errors() {
    let fits = sample();
    let err = fits.read_column(2, "STAXYZ", DataType::Float, 1, 0).unwrap_err();
    assert!(matches!(err, FitsError::ColumnType { .. }));

    let err = fits.read_column(2, "STAXYZ", DataType::Double, 3, 2).unwrap_err();
    assert!(matches!(err, FitsError::RowRange { row: 2, count: 3, .. }));

    let err = fits.read_column(2, "DIAMETER", DataType::Float, 1, 0).unwrap_err();
    assert!(matches!(err, FitsError::ColumnNotFound { .. }));

    let err = fits.read_column_info(1, "STAXYZ").unwrap_err();
    assert_eq!(err, FitsError::NotATable { hdu: 1 });
}

#[test]
fn test_read_column_info() {
    let fits = sample();
    let info = fits.read_column_info(2, "STAXYZ").unwrap();
    assert_eq!(info.data_type, DataType::Double);
    assert_eq!(info.repeat, 3);
    assert_eq!(info.width, 8);
    assert_eq!(info.unit, "m");

    let info = fits.read_column_info(2, "TEL_NAME").unwrap();
    assert_eq!(info.repeat, 16);
    assert_eq!(info.unit, "");
}

#[test]
fn test_column_builder_replaces_same_name() {
    let hdu = MemoryHdu::binary_table("OI_WAVELENGTH", 1)
        .column(MemoryColumn::float("EFF_WAVE", 1, vec![1.0]))
        .column(MemoryColumn::double("eff_wave", 1, vec![2.0]));
    assert_eq!(hdu.columns.len(), 1);
    assert_eq!(hdu.columns[0].data_type, DataType::Double);
}

#[test]
fn test_json_dump_round_trip_through_opener() {
    let fits = sample();
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(fits.to_json().unwrap().as_bytes()).unwrap();

    let opened = MemoryOpener::new().open(file.path()).unwrap();
    assert_eq!(opened, fits);
}

#[test]
fn test_opener_prefers_registry() {
    let opener = MemoryOpener::new().with_file("/virtual/obs.fits", sample());
    let opened = opener.open(Path::new("/virtual/obs.fits")).unwrap();
    assert_eq!(opened.hdus.len(), 2);
}

#[test]
fn test_opener_reports_missing_file() {
    let err = MemoryOpener::new()
        .open(Path::new("/definitely/not/here.json"))
        .unwrap_err();
    match err {
        FitsError::Open { path, reason } => {
            assert_eq!(path, Path::new("/definitely/not/here.json"));
            assert!(reason.contains("Failed to read FITS dump"));
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn test_opener_reports_malformed_dump() {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(b"{\"hdus\": 12}").unwrap();
    let err = MemoryOpener::new().open(file.path()).unwrap_err();
    assert!(err.to_string().contains("Failed to parse FITS JSON dump"));
}
