use crate::core::{DataType, KeywordValue};
use crate::error::OifitsError;
use crate::fits::{conforming_hdu, FitsError, MemoryColumn, MemoryFits, MemoryHdu};
use crate::tables::data::Candidate;
use crate::tables::{Offer, Table, TableKind};

fn file_with(hdus: Vec<MemoryHdu>) -> MemoryFits {
    let mut all = vec![MemoryHdu::primary()];
    all.extend(hdus);
    MemoryFits::new(all)
}

fn wavelength_candidate(index: usize, name: &str, rows: usize) -> Candidate {
    Candidate {
        index,
        kind: TableKind::Wavelength,
        name: Some(name.to_string()),
        row_count: rows,
    }
}

#[test]
fn test_classify_prefix_order() {
    assert_eq!(TableKind::classify("OI_TARGET"), Some(TableKind::Target));
    assert_eq!(TableKind::classify("OI_ARRAY"), Some(TableKind::Array));
    assert_eq!(TableKind::classify("OI_WAVELENGTH"), Some(TableKind::Wavelength));
    assert_eq!(TableKind::classify("OI_VIS2"), Some(TableKind::Vis2));
    assert_eq!(TableKind::classify("OI_VIS"), Some(TableKind::Vis));
    assert_eq!(TableKind::classify("OI_T3"), Some(TableKind::T3));
    assert_eq!(TableKind::classify("OI_SPECTRUM"), None);
    assert_eq!(TableKind::classify("oi_vis2"), None);
}

#[test]
fn test_station_arity() {
    assert_eq!(TableKind::Vis.station_arity(), 2);
    assert_eq!(TableKind::Vis2.station_arity(), 2);
    assert_eq!(TableKind::T3.station_arity(), 3);
    assert!(!TableKind::Array.is_data());
}

#[test]
fn test_construct_reads_row_count_and_names() {
    let fits = file_with(vec![conforming_hdu(TableKind::Vis2, 5, 3)]);
    let table = Table::construct(TableKind::Vis2, &fits, "OI_VIS2", 2).unwrap();

    assert_eq!(table.kind(), TableKind::Vis2);
    assert_eq!(table.row_count(), 5);
    assert_eq!(table.hdu_index(), 2);
    assert_eq!(table.location().to_string(), "table 'OI_VIS2' (HDU 2)");

    let data = table.as_data().unwrap();
    assert_eq!(data.cached_arr_name(), Some("VLTI"));
    assert_eq!(data.cached_ins_name(), Some("AMBER"));
    assert_eq!(data.nwave(), 0);
    assert_eq!(data.array(), None);
}

#[test]
fn test_construct_fails_without_naxis2() {
    let fits = file_with(vec![
        conforming_hdu(TableKind::Target, 1, 0).without_keyword("NAXIS2")
    ]);
    let err = Table::construct(TableKind::Target, &fits, "OI_TARGET", 2).unwrap_err();
    assert!(matches!(
        err,
        OifitsError::Access(FitsError::KeywordNotFound { hdu: 2, .. })
    ));
}

#[test]
fn test_missing_optional_arrname_is_none() {
    let fits = file_with(vec![
        conforming_hdu(TableKind::Vis, 1, 1).without_keyword("ARRNAME")
    ]);
    let table = Table::construct(TableKind::Vis, &fits, "OI_VIS", 2).unwrap();
    assert_eq!(table.as_data().unwrap().cached_arr_name(), None);
}

#[test]
fn test_offer_first_match_wins() {
    let fits = file_with(vec![conforming_hdu(TableKind::Vis2, 2, 3)]);
    let mut table = Table::construct(TableKind::Vis2, &fits, "OI_VIS2", 2).unwrap();
    let data = table.as_data_mut().unwrap();

    assert_eq!(data.offer(&wavelength_candidate(4, "OTHER", 7)), Offer::Ignored);
    assert_eq!(data.offer(&wavelength_candidate(1, "AMBER", 3)), Offer::Accepted);
    assert_eq!(data.offer(&wavelength_candidate(1, "AMBER", 3)), Offer::AlreadyBound);
    assert_eq!(
        data.offer(&wavelength_candidate(3, "AMBER", 9)),
        Offer::SlotTaken { bound: 1 }
    );
    assert_eq!(data.wavelength(), Some(1));
    assert_eq!(data.nwave(), 3);
}

#[test]
fn test_offer_ignores_wrong_kind() {
    let fits = file_with(vec![conforming_hdu(TableKind::T3, 1, 1)]);
    let mut table = Table::construct(TableKind::T3, &fits, "OI_T3", 2).unwrap();
    let candidate = Candidate {
        index: 0,
        kind: TableKind::Target,
        name: Some("VLTI".to_string()),
        row_count: 1,
    };
    assert_eq!(table.as_data_mut().unwrap().offer(&candidate), Offer::Ignored);
}

#[test]
fn test_vis2_getters_use_nwave() {
    let fits = file_with(vec![conforming_hdu(TableKind::Vis2, 2, 3)]);
    let mut table = Table::construct(TableKind::Vis2, &fits, "OI_VIS2", 2).unwrap();
    table
        .as_data_mut()
        .unwrap()
        .offer(&wavelength_candidate(0, "AMBER", 3));

    let vis2 = table.as_vis2().unwrap();
    assert_eq!(vis2.vis2_data(&fits).unwrap(), vec![0.0, 0.5, 1.0, 1.5, 2.0, 2.5]);
    assert_eq!(vis2.data().flag(&fits).unwrap().len(), 6);
    assert_eq!(vis2.data().sta_index(&fits).unwrap(), vec![1, 2, 1, 2]);
    assert_eq!(vis2.ucoord(&fits).unwrap().len(), 2);
    assert_eq!(vis2.data().target_id(&fits).unwrap(), vec![1, 1]);
}

#[test]
fn test_target_getters() {
    let fits = file_with(vec![conforming_hdu(TableKind::Target, 2, 0)]);
    let table = Table::construct(TableKind::Target, &fits, "OI_TARGET", 2).unwrap();
    let target = table.as_target().unwrap();

    assert_eq!(target.target(&fits).unwrap(), vec!["TARGET1", "TARGET2"]);
    assert_eq!(target.equinox(&fits).unwrap().len(), 2);
    assert_eq!(target.spectyp(&fits).unwrap()[1], "SPECTYP2");
    assert_eq!(table.revision(&fits).unwrap(), 1);
}

#[test]
fn test_array_getters() {
    let fits = file_with(vec![conforming_hdu(TableKind::Array, 3, 0)
        .keyword("ARRAYX", KeywordValue::Double(12.5))
        .column(MemoryColumn::double("STAXYZ", 3, (0..9).map(f64::from).collect()).with_unit("m"))]);
    let table = Table::construct(TableKind::Array, &fits, "OI_ARRAY", 2).unwrap();
    let array = table.as_array().unwrap();

    assert_eq!(array.cached_arr_name(), Some("VLTI"));
    assert_eq!(array.arr_name(&fits).unwrap(), "VLTI");
    assert_eq!(array.frame(&fits).unwrap(), "GEOCENTRIC");
    assert_eq!(array.array_x(&fits).unwrap(), 12.5);
    assert_eq!(array.sta_index(&fits).unwrap(), vec![1, 2, 3]);
    assert_eq!(array.sta_xyz(&fits).unwrap()[2], [6.0, 7.0, 8.0]);
    assert_eq!(table.reference_name(), Some("VLTI"));
}

#[test]
fn test_wavelength_getters() {
    let fits = file_with(vec![conforming_hdu(TableKind::Wavelength, 4, 0)]);
    let table = Table::construct(TableKind::Wavelength, &fits, "OI_WAVELENGTH", 2).unwrap();
    let wave = table.as_wavelength().unwrap();

    assert_eq!(wave.channel_count(), 4);
    assert_eq!(wave.eff_wave(&fits).unwrap().len(), 4);
    assert_eq!(wave.ins_name(&fits).unwrap(), "AMBER");
    assert!(table.as_data().is_none());
}

#[test]
fn test_getter_reports_type_mismatch() {
    let fits = file_with(vec![conforming_hdu(TableKind::Vis, 1, 1)
        .column(MemoryColumn::float("UCOORD", 1, vec![1.0]).with_unit("m"))]);
    let table = Table::construct(TableKind::Vis, &fits, "OI_VIS", 2).unwrap();
    let err = table.as_vis().unwrap().ucoord(&fits).unwrap_err();
    assert!(matches!(
        err,
        OifitsError::Access(FitsError::ColumnType {
            requested: DataType::Double,
            ..
        })
    ));
}

#[test]
fn test_observation_date() {
    let fits = file_with(vec![conforming_hdu(TableKind::T3, 1, 2)]);
    let table = Table::construct(TableKind::T3, &fits, "OI_T3", 2).unwrap();
    let date = table.as_t3().unwrap().data().observation_date(&fits).unwrap();
    assert_eq!(date, chrono::NaiveDate::from_ymd_opt(2003, 5, 17));
}

#[test]
fn test_generic_keyword_read() {
    let fits = file_with(vec![conforming_hdu(TableKind::Wavelength, 2, 0)]);
    let table = Table::construct(TableKind::Wavelength, &fits, "OI_WAVELENGTH", 2).unwrap();
    let rows = table.keyword(&fits, "NAXIS2", DataType::Double).unwrap();
    assert_eq!(rows, KeywordValue::Double(2.0));
    assert!(table.keyword(&fits, "FRAME", DataType::Character).is_err());
}

#[test]
fn test_channel_getters_require_wavelength_reference() {
    let fits = file_with(vec![conforming_hdu(TableKind::Vis2, 2, 0)]);
    let table = Table::construct(TableKind::Vis2, &fits, "OI_VIS2", 2).unwrap();
    let vis2 = table.as_vis2().unwrap();

    let err = vis2.vis2_data(&fits).unwrap_err();
    assert!(matches!(
        err,
        OifitsError::NoReference {
            kind: "OI_WAVELENGTH",
            ..
        }
    ));
    assert!(vis2.data().flag(&fits).is_err());
    // Per-row columns do not depend on the channel count.
    assert_eq!(vis2.ucoord(&fits).unwrap().len(), 2);
}
