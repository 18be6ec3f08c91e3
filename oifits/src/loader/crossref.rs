//! Cross-reference resolution between data tables and the ARRAY and
//! WAVELENGTH tables they name.

use log::{debug, trace};

use crate::tables::data::Candidate;
use crate::tables::{Offer, Table};
use crate::validation::{Category, Diagnostic};

/// Offer every table to every other table; data tables keep the first
/// array and wavelength table whose name matches their own.
///
/// Running this again on the same list changes nothing. When
/// `report_ambiguous` is set, each same-named candidate turned away because
/// its slot was already filled yields a warning.
pub fn resolve_references(tables: &mut [Table], report_ambiguous: bool) -> Vec<Diagnostic> {
    let candidates: Vec<Candidate> = tables
        .iter()
        .enumerate()
        .map(|(index, table)| Candidate {
            index,
            kind: table.kind(),
            name: table.reference_name().map(str::to_string),
            row_count: table.row_count(),
        })
        .collect();

    let mut diagnostics = Vec::new();
    for (b, table) in tables.iter_mut().enumerate() {
        let location = table.location();
        let Some(data) = table.as_data_mut() else {
            continue;
        };
        for candidate in candidates.iter().filter(|c| c.index != b) {
            let offer = data.offer(candidate);
            trace!("{} table #{} offered to {}: {:?}", candidate.kind, candidate.index, location, offer);
            match offer {
                Offer::Accepted => debug!(
                    "{} references {} table #{}",
                    location, candidate.kind, candidate.index
                ),
                Offer::SlotTaken { bound } if report_ambiguous => {
                    diagnostics.push(Diagnostic::warning(
                        Category::Reference,
                        Some(location.clone()),
                        format!(
                            "{} table #{} also matches name '{}'; keeping table #{}",
                            candidate.kind,
                            candidate.index,
                            candidate.name.as_deref().unwrap_or_default(),
                            bound
                        ),
                    ));
                }
                _ => {}
            }
        }
    }
    diagnostics
}
