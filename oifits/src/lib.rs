//! OIFITS table model, schema validation and cross-referencing.
//!
//! An OIFITS file is a FITS container holding a fixed family of binary
//! tables (`OI_TARGET`, `OI_ARRAY`, `OI_WAVELENGTH`, `OI_VIS`, `OI_VIS2`,
//! `OI_T3`). [`Document::load`] turns the raw extensions into typed
//! [`tables::Table`] values, links every measurement table to the array and
//! wavelength tables it names, and checks each table against its schema.
//!
//! FITS I/O itself is delegated to a [`fits::FitsAccess`] provider.

pub mod core;
pub mod document;
pub mod error;
pub mod fits;
pub mod integrity;
pub mod loader;
pub mod schema;
pub mod tables;
pub mod time;
pub mod validation;

pub use document::{Document, DocumentSummary};
pub use error::{OifitsError, OifitsResult, StateError, TableLocation};
pub use loader::{LoadConfig, LoadState};
pub use validation::{Diagnostic, LoadReport};
