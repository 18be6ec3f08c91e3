//! Observation date handling.

pub mod dates;

pub use dates::parse_date_obs;
