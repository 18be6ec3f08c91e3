//! Physical units used by the OIFITS tables.
//!
//! OIFITS producers spell the same unit in several ways (`m`, `meters`,
//! `M / S`...). [`Unit::normalize`] folds those spellings onto the closed
//! [`Unit`] enumeration so that schema checks compare units, not strings.
//! No conversion between units is ever performed.

use std::collections::HashMap;
use std::fmt;

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

/// Unit attached to a keyword or a column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Unit {
    /// No unit (empty `TUNITn`).
    None,
    Meters,
    Degrees,
    Seconds,
    /// Modified Julian Day, spelled `day`.
    MjdDays,
    Years,
    MetersPerSecond,
    DegreesPerYear,
}

/// Accepted spellings per unit, lower-cased and separated by `|`.
const SPELLINGS: [(Unit, &str); 8] = [
    (Unit::None, ""),
    (Unit::Meters, "m|meter|meters"),
    (Unit::Degrees, "deg|degree|degrees"),
    (Unit::Seconds, "s|sec|second|seconds"),
    (Unit::MjdDays, "day|days"),
    (Unit::Years, "yr|year|years"),
    (
        Unit::MetersPerSecond,
        "m/s|m / s|meter per second|meters per second|meter/second|meters/second\
         |meter / second|meters / second",
    ),
    (
        Unit::DegreesPerYear,
        "deg/yr|deg / yr|degree/yr|degree / yr|degrees/yr|degrees / yr|deg/year\
         |deg / year|degree/year|degree / year|degrees/year|degrees / year",
    ),
];

static UNIT_ALIASES: Lazy<HashMap<&'static str, Unit>> = Lazy::new(|| {
    SPELLINGS
        .iter()
        .flat_map(|&(unit, spellings)| spellings.split('|').map(move |s| (s, unit)))
        .collect()
});

impl Unit {
    /// Map free `TUNITn` text onto a [`Unit`].
    ///
    /// Matching is case-insensitive and ignores leading/trailing blanks
    /// (FITS pads string values with spaces). Returns `None` when the text is
    /// not one of the accepted spellings.
    ///
    /// # Examples
    ///
    /// ```
    /// use oifits::core::Unit;
    ///
    /// assert_eq!(Unit::normalize("Meters"), Some(Unit::Meters));
    /// assert_eq!(Unit::normalize("deg / yr"), Some(Unit::DegreesPerYear));
    /// assert_eq!(Unit::normalize(""), Some(Unit::None));
    /// assert_eq!(Unit::normalize("parsec"), None);
    /// ```
    pub fn normalize(text: &str) -> Option<Unit> {
        let key = text.trim().to_lowercase();
        UNIT_ALIASES.get(key.as_str()).copied()
    }

    /// Canonical `TUNITn` spelling.
    pub fn as_fits_str(&self) -> &'static str {
        match self {
            Unit::None => "",
            Unit::Meters => "m",
            Unit::Degrees => "deg",
            Unit::Seconds => "s",
            Unit::MjdDays => "day",
            Unit::Years => "yr",
            Unit::MetersPerSecond => "m/s",
            Unit::DegreesPerYear => "deg/yr",
        }
    }
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Unit::None => f.write_str("no unit"),
            other => f.write_str(other.as_fits_str()),
        }
    }
}
