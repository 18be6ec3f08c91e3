//! Shared fixtures for the integration tests.

#![allow(dead_code)]

use oifits::core::KeywordValue;
use oifits::fits::{conforming_hdu, MemoryFits, MemoryHdu, MemoryOpener};
use oifits::tables::TableKind;
use oifits::Document;

pub const PATH: &str = "fixture.oifits";

/// Target, array, 3-channel wavelength table and one table of each
/// measurement kind, all linked by name.
pub fn complete_file() -> MemoryFits {
    file(vec![
        conforming_hdu(TableKind::Target, 2, 0),
        conforming_hdu(TableKind::Array, 3, 0),
        conforming_hdu(TableKind::Wavelength, 3, 0),
        conforming_hdu(TableKind::Vis, 4, 3),
        conforming_hdu(TableKind::Vis2, 4, 3),
        conforming_hdu(TableKind::T3, 2, 3),
    ])
}

/// Primary header followed by `extensions`.
pub fn file(extensions: Vec<MemoryHdu>) -> MemoryFits {
    let mut hdus = vec![MemoryHdu::primary()];
    hdus.extend(extensions);
    MemoryFits::new(hdus)
}

pub fn document(fits: MemoryFits) -> Document<MemoryOpener> {
    Document::new(MemoryOpener::new().with_file(PATH, fits))
}

pub fn text(value: &str) -> KeywordValue {
    KeywordValue::Character(value.to_string())
}
