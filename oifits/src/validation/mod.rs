//! Schema validation of live tables.
//!
//! A table is checked against its kind's [`Schema`] by reading keyword values
//! and column metadata through the access provider. Data tables get one more
//! pass once their channel count is known: every per-channel column must
//! hold zero or exactly `nwave` elements per row.

use log::debug;

use crate::core::Unit;
use crate::error::{OifitsError, OifitsResult, TableLocation};
use crate::fits::FitsAccess;
use crate::schema::{FieldDesc, Multiplicity, Schema};
use crate::tables::{Table, TableHeader};

pub mod diagnostics;


pub use diagnostics::{Category, Diagnostic, Gate, LoadReport, Severity};

/// Validate `table` against its schema.
///
/// `nwave` enables the channel-count check; pass it for data tables once
/// their wavelength reference is settled.
pub fn check_structure(
    fits: &dyn FitsAccess,
    table: &Table,
    nwave: Option<usize>,
    gate: &mut Gate<'_>,
) -> OifitsResult<()> {
    let header = table.header();
    let schema = table.schema();
    debug!("Validating {} against {} schema", header.location(), table.kind());

    check_keywords(fits, header, schema, gate)?;
    check_columns(fits, header, schema, gate)?;
    if let Some(nwave) = nwave {
        check_channels(fits, header, schema, nwave, gate)?;
    }
    Ok(())
}

/// Every declared keyword must be readable with its declared type.
/// Optional keywords only leave a note when absent.
pub fn check_keywords(
    fits: &dyn FitsAccess,
    header: &TableHeader,
    schema: &Schema,
    gate: &mut Gate<'_>,
) -> OifitsResult<()> {
    let location = header.location();
    for field in schema.keywords {
        let Err(e) = header.read_keyword(fits, field.name, field.data_type) else {
            continue;
        };
        if field.multiplicity.is_required() {
            gate.fail(OifitsError::structural(
                &location,
                format!("required keyword '{}' not readable: {}", field.name, e),
            ))?;
        } else {
            gate.record(Diagnostic::note(
                Category::Structural,
                Some(location.clone()),
                format!("optional keyword '{}' absent", field.name),
            ));
        }
    }
    Ok(())
}

/// Every declared column must exist with the declared repeat count (when
/// fixed), type and unit, and its first element must be readable.
pub fn check_columns(
    fits: &dyn FitsAccess,
    header: &TableHeader,
    schema: &Schema,
    gate: &mut Gate<'_>,
) -> OifitsResult<()> {
    let location = header.location();
    for field in schema.columns {
        if let Err(message) = check_column(fits, header, field) {
            gate.fail(OifitsError::structural(&location, message))?;
        }
    }
    Ok(())
}

fn check_column(fits: &dyn FitsAccess, header: &TableHeader, field: &FieldDesc) -> Result<(), String> {
    let hdu = header.hdu_index();
    let info = fits
        .read_column_info(hdu, field.name)
        .map_err(|e| format!("column '{}' not readable: {}", field.name, e))?;

    if let Multiplicity::Fixed(expected) = field.multiplicity {
        if info.repeat != expected {
            return Err(format!(
                "column '{}' has repeat count {}, expected {}",
                field.name, info.repeat, expected
            ));
        }
    }

    if info.data_type != field.data_type {
        return Err(format!(
            "column '{}' has type {}, expected {}",
            field.name, info.data_type, field.data_type
        ));
    }

    // Read the first element; empty tables have no row 0.
    if info.repeat > 0 && header.row_count() > 0 {
        fits.read_column(hdu, field.name, field.data_type, 1, 0)
            .map_err(|e| format!("column '{}' could not be read: {}", field.name, e))?;
    }

    if Unit::normalize(&info.unit) != Some(field.unit) {
        return Err(format!(
            "unit error for column '{}': expected '{}', found '{}'",
            field.name, field.unit, info.unit
        ));
    }
    Ok(())
}

/// Per-channel columns must hold zero or `nwave` elements per row.
pub fn check_channels(
    fits: &dyn FitsAccess,
    header: &TableHeader,
    schema: &Schema,
    nwave: usize,
    gate: &mut Gate<'_>,
) -> OifitsResult<()> {
    let location = header.location();
    for field in schema.channel_columns() {
        // Unreadable columns were already reported by the column pass.
        let Ok(info) = fits.read_column_info(header.hdu_index(), field.name) else {
            continue;
        };
        if info.repeat != 0 && info.repeat != nwave {
            gate.fail(channel_mismatch(&location, field.name, info.repeat, nwave))?;
        }
    }
    Ok(())
}

fn channel_mismatch(location: &TableLocation, column: &str, repeat: usize, nwave: usize) -> OifitsError {
    OifitsError::structural(
        location,
        format!(
            "column '{}' has {} channels but the wavelength table has {}",
            column, repeat, nwave
        ),
    )
}
