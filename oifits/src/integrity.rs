//! Reference integrity checks on a loaded document.
//!
//! These go beyond schema conformance: they look at the values that tie
//! tables together, and at keyword values restricted to a fixed set.
//! Findings are warnings only; a file can be perfectly readable and still
//! fail some of them.

use std::collections::BTreeSet;

use crate::error::{OifitsResult, TableLocation};
use crate::fits::FitsAccess;
use crate::tables::{ArrayTable, DataTable, Table, TableIndex, TargetTable};
use crate::time::parse_date_obs;
use crate::validation::{Category, Diagnostic};

/// Inspect cross-table identifiers and restricted keyword values of `tables`.
pub fn check_references(
    fits: &dyn FitsAccess,
    tables: &[Table],
    target: Option<TableIndex>,
) -> Vec<Diagnostic> {
    let mut findings = Vec::new();

    if !tables.iter().any(|t| matches!(t, Table::Wavelength(_))) {
        findings.push(Diagnostic::warning(Category::Conformance, None, "no OI_WAVELENGTH table"));
    }
    if !tables.iter().any(|t| t.as_data().is_some()) {
        findings.push(Diagnostic::warning(
            Category::Conformance,
            None,
            "no OI_VIS, OI_VIS2 or OI_T3 table",
        ));
    }

    let target_ids = match target.and_then(|i| tables.get(i)).and_then(Table::as_target) {
        Some(table) => collect(table.header().location(), table.target_id(fits), &mut findings),
        None => None,
    };

    for table in tables {
        let location = table.location();
        match table.revision(fits) {
            Ok(1) => {}
            Ok(revision) => findings.push(Diagnostic::warning(
                Category::Conformance,
                Some(location.clone()),
                format!("OI_REVN is {}, expected 1", revision),
            )),
            Err(e) => findings.push(Diagnostic::warning(
                Category::Access,
                Some(location.clone()),
                e.to_string(),
            )),
        }
        match table {
            Table::Target(target) => check_target(fits, target, &mut findings),
            Table::Array(array) => check_frame(fits, array, &mut findings),
            _ => {}
        }

        let mut warn = |category: Category, message: String| {
            findings.push(Diagnostic::warning(category, Some(location.clone()), message));
        };
        match table {
            Table::Array(array) if is_blank(array.cached_arr_name()) => {
                warn(Category::Reference, "ARRNAME is blank".to_string())
            }
            Table::Wavelength(wave) if is_blank(wave.cached_ins_name()) => {
                warn(Category::Reference, "INSNAME is blank".to_string())
            }
            _ => {}
        }

        let Some(data) = table.as_data() else {
            continue;
        };
        if let (Some(name), None) = (data.cached_arr_name(), data.array()) {
            warn(Category::Reference, format!("ARRNAME '{}' matches no OI_ARRAY table", name));
        }
        if data.wavelength().is_none() {
            let name = data.cached_ins_name().unwrap_or_default();
            warn(
                Category::Reference,
                format!("INSNAME '{}' matches no OI_WAVELENGTH table", name),
            );
        }
        match data.date_obs(fits) {
            Ok(text) if parse_date_obs(&text).is_none() => {
                warn(Category::Conformance, format!("DATE-OBS '{}' is not a valid date", text.trim()))
            }
            Ok(_) => {}
            Err(e) => warn(Category::Access, e.to_string()),
        }

        if let Some(known) = &target_ids {
            check_ids(data, "TARGET_ID", known, data.target_id(fits), &mut findings);
        }
        let stations = data
            .array()
            .and_then(|i| tables.get(i))
            .and_then(Table::as_array)
            .and_then(|array| collect(array.header().location(), array.sta_index(fits), &mut findings));
        if let Some(known) = &stations {
            check_ids(data, "STA_INDEX", known, data.sta_index(fits), &mut findings);
        }
    }
    findings
}

const VELTYP_VALUES: [&str; 5] = ["LSR", "HELIOCEN", "BARYCENT", "GEOCENTR", "TOPOCENT"];
const VELDEF_VALUES: [&str; 2] = ["OPTICAL", "RADIO"];

fn check_target(fits: &dyn FitsAccess, target: &TargetTable, findings: &mut Vec<Diagnostic>) {
    let location = target.header().location();
    let mut report = |result: OifitsResult<Option<String>>| match result {
        Ok(Some(message)) => findings.push(Diagnostic::warning(
            Category::Conformance,
            Some(location.clone()),
            message,
        )),
        Ok(None) => {}
        Err(e) => findings.push(Diagnostic::warning(
            Category::Access,
            Some(location.clone()),
            e.to_string(),
        )),
    };

    report(target.target_id(fits).map(|ids| {
        let ids: Vec<String> = ids.iter().map(i16::to_string).collect();
        duplicates(&ids).map(|d| format!("TARGET_ID values repeated: {}", d))
    }));
    report(target.target(fits).map(|names| {
        let names: Vec<String> = names.iter().map(|n| n.trim().to_string()).collect();
        duplicates(&names).map(|d| format!("TARGET values repeated: {}", d))
    }));
    report(target.veltyp(fits).map(|values| outside("VELTYP", &values, &VELTYP_VALUES)));
    report(target.veldef(fits).map(|values| outside("VELDEF", &values, &VELDEF_VALUES)));
}

fn check_frame(fits: &dyn FitsAccess, array: &ArrayTable, findings: &mut Vec<Diagnostic>) {
    let location = Some(array.header().location());
    match array.frame(fits) {
        Ok(frame) if frame.trim() == "GEOCENTRIC" => {}
        Ok(frame) => findings.push(Diagnostic::warning(
            Category::Conformance,
            location,
            format!("FRAME '{}' is not GEOCENTRIC", frame.trim()),
        )),
        Err(e) => findings.push(Diagnostic::warning(Category::Access, location, e.to_string())),
    }
}

/// Values occurring more than once, in first-seen order.
fn duplicates(values: &[String]) -> Option<String> {
    let mut seen = BTreeSet::new();
    let mut repeated: Vec<&str> = Vec::new();
    for value in values {
        if !seen.insert(value.as_str()) && !repeated.contains(&value.as_str()) {
            repeated.push(value);
        }
    }
    (!repeated.is_empty()).then(|| repeated.join(", "))
}

fn outside(column: &str, values: &[String], accepted: &[&str]) -> Option<String> {
    let mut bad: Vec<&str> = Vec::new();
    for value in values.iter().map(|v| v.trim()) {
        if !accepted.contains(&value) && !bad.contains(&value) {
            bad.push(value);
        }
    }
    if bad.is_empty() {
        return None;
    }
    let bad: Vec<String> = bad.iter().map(|v| format!("'{}'", v)).collect();
    Some(format!(
        "{} values not accepted: {} (expected one of {})",
        column,
        bad.join(", "),
        accepted.join(", ")
    ))
}

fn is_blank(name: Option<&str>) -> bool {
    name.map_or(true, |n| n.trim().is_empty())
}

fn collect(
    location: TableLocation,
    values: OifitsResult<Vec<i16>>,
    findings: &mut Vec<Diagnostic>,
) -> Option<BTreeSet<i16>> {
    match values {
        Ok(values) => Some(values.into_iter().collect()),
        Err(e) => {
            findings.push(Diagnostic::warning(Category::Access, Some(location), e.to_string()));
            None
        }
    }
}

fn check_ids(
    data: &DataTable,
    column: &str,
    known: &BTreeSet<i16>,
    values: OifitsResult<Vec<i16>>,
    findings: &mut Vec<Diagnostic>,
) {
    let location = data.header().location();
    let Some(values) = collect(location.clone(), values, findings) else {
        return;
    };
    let unknown: Vec<String> = values.difference(known).map(i16::to_string).collect();
    if !unknown.is_empty() {
        findings.push(Diagnostic::warning(
            Category::Reference,
            Some(location),
            format!("{} values not defined in the referenced table: {}", column, unknown.join(", ")),
        ));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::KeywordValue;
    use crate::fits::{conforming_hdu, MemoryColumn, MemoryFits, MemoryHdu};
    use crate::loader::resolve_references;
    use crate::tables::TableKind;

    fn load(hdus: Vec<MemoryHdu>) -> (MemoryFits, Vec<Table>) {
        let mut all = vec![MemoryHdu::primary()];
        all.extend(hdus);
        let fits = MemoryFits::new(all);
        let mut tables: Vec<Table> = fits
            .hdus
            .iter()
            .enumerate()
            .skip(1)
            .map(|(i, hdu)| {
                let name = hdu.keywords["EXTNAME"].as_str().unwrap().to_string();
                Table::construct(TableKind::classify(&name).unwrap(), &fits, &name, i + 1).unwrap()
            })
            .collect();
        resolve_references(&mut tables, false);
        (fits, tables)
    }

    #[test]
    fn test_consistent_file_has_no_findings() {
        let (fits, tables) = load(vec![
            conforming_hdu(TableKind::Target, 1, 0),
            conforming_hdu(TableKind::Array, 3, 0),
            conforming_hdu(TableKind::Wavelength, 2, 0),
            conforming_hdu(TableKind::Vis2, 4, 2),
            conforming_hdu(TableKind::T3, 4, 2),
        ]);
        let findings = check_references(&fits, &tables, Some(0));
        assert!(findings.is_empty(), "{findings:?}");
    }

    #[test]
    fn test_unknown_identifiers_reported() {
        let (fits, tables) = load(vec![
            conforming_hdu(TableKind::Target, 1, 0),
            conforming_hdu(TableKind::Array, 2, 0),
            conforming_hdu(TableKind::Wavelength, 2, 0),
            conforming_hdu(TableKind::Vis, 2, 2)
                .column(MemoryColumn::integer("TARGET_ID", 1, vec![1, 7]))
                .column(MemoryColumn::integer("STA_INDEX", 2, vec![1, 2, 2, 9])),
        ]);
        let findings = check_references(&fits, &tables, Some(0));
        let messages: Vec<_> = findings.iter().map(|d| d.message.as_str()).collect();
        assert_eq!(
            messages,
            vec![
                "TARGET_ID values not defined in the referenced table: 7",
                "STA_INDEX values not defined in the referenced table: 9",
            ]
        );
    }

    #[test]
    fn test_unresolved_names_and_bad_dates() {
        let (fits, tables) = load(vec![
            conforming_hdu(TableKind::Target, 1, 0),
            conforming_hdu(TableKind::Array, 2, 0)
                .keyword("ARRNAME", KeywordValue::Character("   ".into())),
            conforming_hdu(TableKind::Vis2, 1, 0)
                .keyword("DATE-OBS", KeywordValue::Character("someday".into())),
        ]);
        let findings = check_references(&fits, &tables, Some(0));
        let messages: Vec<_> = findings.iter().map(|d| d.message.as_str()).collect();
        assert_eq!(
            messages,
            vec![
                "no OI_WAVELENGTH table",
                "ARRNAME is blank",
                "ARRNAME 'VLTI' matches no OI_ARRAY table",
                "INSNAME 'AMBER' matches no OI_WAVELENGTH table",
                "DATE-OBS 'someday' is not a valid date",
            ]
        );
        assert!(findings.iter().all(|d| d.severity == crate::validation::Severity::Warning));
    }

    #[test]
    fn test_missing_tables_reported_once() {
        let (fits, tables) = load(vec![
            conforming_hdu(TableKind::Target, 1, 0),
            conforming_hdu(TableKind::Array, 2, 0),
        ]);
        let findings = check_references(&fits, &tables, Some(0));
        let messages: Vec<_> = findings.iter().map(|d| d.message.as_str()).collect();
        assert_eq!(
            messages,
            vec!["no OI_WAVELENGTH table", "no OI_VIS, OI_VIS2 or OI_T3 table"]
        );
        assert!(findings.iter().all(|d| d.location.is_none()));
        assert!(findings.iter().all(|d| d.category == Category::Conformance));
    }

    #[test]
    fn test_duplicate_targets_reported() {
        let (fits, tables) = load(vec![
            conforming_hdu(TableKind::Target, 4, 0)
                .column(MemoryColumn::integer("TARGET_ID", 1, vec![1, 2, 2, 1]))
                .column(MemoryColumn::character(
                    "TARGET",
                    16,
                    vec!["HD 1".into(), "HD 2".into(), "HD 1 ".into(), "HD 3".into()],
                )),
            conforming_hdu(TableKind::Wavelength, 2, 0),
            conforming_hdu(TableKind::Vis2, 1, 2),
            conforming_hdu(TableKind::Array, 2, 0),
        ]);
        let findings = check_references(&fits, &tables, Some(0));
        let messages: Vec<_> = findings.iter().map(|d| d.message.as_str()).collect();
        assert_eq!(
            messages,
            vec!["TARGET_ID values repeated: 2, 1", "TARGET values repeated: HD 1"]
        );
        assert_eq!(findings[0].location, Some(tables[0].location()));
    }

    #[test]
    fn test_restricted_keyword_values_reported() {
        let (fits, tables) = load(vec![
            conforming_hdu(TableKind::Target, 2, 0)
                .keyword("OI_REVN", KeywordValue::Integer(2))
                .column(MemoryColumn::character("VELTYP", 8, vec!["LSR".into(), "HELIO".into()]))
                .column(MemoryColumn::character("VELDEF", 8, vec!["RADIO ".into(), "OPTICAL".into()])),
            conforming_hdu(TableKind::Array, 2, 0)
                .keyword("FRAME", KeywordValue::Character("SKY".into())),
            conforming_hdu(TableKind::Wavelength, 2, 0),
            conforming_hdu(TableKind::Vis2, 1, 2),
        ]);
        let findings = check_references(&fits, &tables, Some(0));
        let messages: Vec<_> = findings.iter().map(|d| d.message.as_str()).collect();
        assert_eq!(
            messages,
            vec![
                "OI_REVN is 2, expected 1",
                "VELTYP values not accepted: 'HELIO' (expected one of LSR, HELIOCEN, BARYCENT, GEOCENTR, TOPOCENT)",
                "FRAME 'SKY' is not GEOCENTRIC",
            ]
        );
        assert!(findings.iter().all(|d| d.category == Category::Conformance));
    }
}
