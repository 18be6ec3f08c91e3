//! Core vocabulary shared by every OIFITS table.
//!
//! This module defines the closed enumerations the rest of the crate is built
//! on: physical units attached to keywords and columns, and the primitive
//! FITS data types a keyword or column may carry.

pub mod types;
pub mod units;

pub use types::{ColumnData, ColumnInfo, DataType, KeywordValue};
pub use units::Unit;
