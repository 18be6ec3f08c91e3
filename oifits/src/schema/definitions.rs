//! OIFITS revision 1 table definitions.

use super::Multiplicity::{Fixed, Optional, PerChannel};
use super::{FieldDesc, Schema};
use crate::core::DataType::{Character, Double, Float, Integer, Logical};
use crate::core::Unit;

const OI_REVN: FieldDesc = FieldDesc::new(
    "OI_REVN",
    Integer,
    Fixed(1),
    Unit::None,
    "revision number of the table definition",
);

const DATE_OBS: FieldDesc = FieldDesc::new(
    "DATE-OBS",
    Character,
    Fixed(1),
    Unit::None,
    "UTC start date of observations",
);

const DATA_ARRNAME: FieldDesc = FieldDesc::new(
    "ARRNAME",
    Character,
    Optional,
    Unit::None,
    "name of corresponding array",
);

const DATA_INSNAME: FieldDesc = FieldDesc::new(
    "INSNAME",
    Character,
    Fixed(1),
    Unit::None,
    "name of corresponding detector",
);

const DATA_NAXIS2: FieldDesc = FieldDesc::new(
    "NAXIS2",
    Integer,
    Fixed(1),
    Unit::None,
    "number of measurements",
);

const TARGET_ID: FieldDesc = FieldDesc::new(
    "TARGET_ID",
    Integer,
    Fixed(1),
    Unit::None,
    "target number as index into OI_TARGET table",
);

const TIME: FieldDesc = FieldDesc::new(
    "TIME",
    Double,
    Fixed(1),
    Unit::Seconds,
    "UTC time of observation",
);

const MJD: FieldDesc = FieldDesc::new("MJD", Double, Fixed(1), Unit::MjdDays, "modified Julian Day");

const INT_TIME: FieldDesc = FieldDesc::new(
    "INT_TIME",
    Double,
    Fixed(1),
    Unit::Seconds,
    "integration time",
);

const FLAG: FieldDesc = FieldDesc::new("FLAG", Logical, PerChannel, Unit::None, "flag");

const UCOORD: FieldDesc = FieldDesc::new(
    "UCOORD",
    Double,
    Fixed(1),
    Unit::Meters,
    "U coordinate of the data",
);

const VCOORD: FieldDesc = FieldDesc::new(
    "VCOORD",
    Double,
    Fixed(1),
    Unit::Meters,
    "V coordinate of the data",
);

const DATA_KEYWORDS: [FieldDesc; 5] = [OI_REVN, DATE_OBS, DATA_ARRNAME, DATA_INSNAME, DATA_NAXIS2];

pub static TARGET_SCHEMA: Schema = Schema {
    keywords: &[OI_REVN],
    columns: &[
        FieldDesc::new("TARGET_ID", Integer, Fixed(1), Unit::None, "index number"),
        FieldDesc::new("TARGET", Character, Fixed(16), Unit::None, "target name"),
        FieldDesc::new("RAEP0", Double, Fixed(1), Unit::Degrees, "RA at mean equinox"),
        FieldDesc::new("DECEP0", Double, Fixed(1), Unit::Degrees, "DEC at mean equinox"),
        FieldDesc::new("EQUINOX", Float, Fixed(1), Unit::Years, "equinox"),
        FieldDesc::new("RA_ERR", Double, Fixed(1), Unit::Degrees, "error in RA at mean equinox"),
        FieldDesc::new("DEC_ERR", Double, Fixed(1), Unit::Degrees, "error in DEC at mean equinox"),
        FieldDesc::new("SYSVEL", Double, Fixed(1), Unit::MetersPerSecond, "systemic radial velocity"),
        FieldDesc::new("VELTYP", Character, Fixed(8), Unit::None, "reference for radial velocity"),
        FieldDesc::new("VELDEF", Character, Fixed(8), Unit::None, "definition of radial velocity"),
        FieldDesc::new("PMRA", Double, Fixed(1), Unit::DegreesPerYear, "proper motion in RA"),
        FieldDesc::new("PMDEC", Double, Fixed(1), Unit::DegreesPerYear, "proper motion in DEC"),
        FieldDesc::new("PMRA_ERR", Double, Fixed(1), Unit::DegreesPerYear, "error of proper motion in RA"),
        FieldDesc::new("PMDEC_ERR", Double, Fixed(1), Unit::DegreesPerYear, "error of proper motion in DEC"),
        FieldDesc::new("PARALLAX", Float, Fixed(1), Unit::Degrees, "parallax"),
        FieldDesc::new("PARA_ERR", Float, Fixed(1), Unit::Degrees, "error in parallax"),
        FieldDesc::new("SPECTYP", Character, Fixed(16), Unit::None, "spectral type"),
    ],
};

pub static ARRAY_SCHEMA: Schema = Schema {
    keywords: &[
        OI_REVN,
        FieldDesc::new("ARRNAME", Character, Fixed(1), Unit::None, "array name for cross-referencing"),
        FieldDesc::new("FRAME", Character, Fixed(1), Unit::None, "coordinate frame"),
        FieldDesc::new("ARRAYX", Double, Fixed(1), Unit::Meters, "array center X-coordinate"),
        FieldDesc::new("ARRAYY", Double, Fixed(1), Unit::Meters, "array center Y-coordinate"),
        FieldDesc::new("ARRAYZ", Double, Fixed(1), Unit::Meters, "array center Z-coordinate"),
        FieldDesc::new("NAXIS2", Integer, Fixed(1), Unit::None, "number of stations"),
    ],
    columns: &[
        FieldDesc::new("TEL_NAME", Character, Fixed(16), Unit::None, "telescope name"),
        FieldDesc::new("STA_NAME", Character, Fixed(16), Unit::None, "station name"),
        FieldDesc::new("STA_INDEX", Integer, Fixed(1), Unit::None, "station index"),
        FieldDesc::new("DIAMETER", Float, Fixed(1), Unit::Meters, "element diameter"),
        FieldDesc::new(
            "STAXYZ",
            Double,
            Fixed(3),
            Unit::Meters,
            "station coordinates relative to array center",
        ),
    ],
};

pub static WAVELENGTH_SCHEMA: Schema = Schema {
    keywords: &[
        OI_REVN,
        FieldDesc::new(
            "INSNAME",
            Character,
            Fixed(1),
            Unit::None,
            "name of detector for cross-referencing",
        ),
        FieldDesc::new("NAXIS2", Integer, Fixed(1), Unit::None, "number of spectral channels"),
    ],
    columns: &[
        FieldDesc::new("EFF_WAVE", Float, Fixed(1), Unit::Meters, "effective wavelength of channel"),
        FieldDesc::new("EFF_BAND", Float, Fixed(1), Unit::Meters, "effective bandpass of channel"),
    ],
};

pub static VIS_SCHEMA: Schema = Schema {
    keywords: &DATA_KEYWORDS,
    columns: &[
        TARGET_ID,
        TIME,
        MJD,
        INT_TIME,
        FieldDesc::new("VISAMP", Double, PerChannel, Unit::None, "visibility amplitude"),
        FieldDesc::new("VISAMPERR", Double, PerChannel, Unit::None, "error in visibility amplitude"),
        FieldDesc::new("VISPHI", Double, PerChannel, Unit::Degrees, "visibility phase"),
        FieldDesc::new("VISPHIERR", Double, PerChannel, Unit::Degrees, "error in visibility phase"),
        UCOORD,
        VCOORD,
        FieldDesc::new(
            "STA_INDEX",
            Integer,
            Fixed(2),
            Unit::None,
            "station numbers contributing to the data",
        ),
        FLAG,
    ],
};

pub static VIS2_SCHEMA: Schema = Schema {
    keywords: &DATA_KEYWORDS,
    columns: &[
        TARGET_ID,
        TIME,
        MJD,
        INT_TIME,
        FieldDesc::new("VIS2DATA", Double, PerChannel, Unit::None, "squared visibility"),
        FieldDesc::new("VIS2ERR", Double, PerChannel, Unit::None, "error in squared visibility"),
        UCOORD,
        VCOORD,
        FieldDesc::new(
            "STA_INDEX",
            Integer,
            Fixed(2),
            Unit::None,
            "station numbers contributing to the data",
        ),
        FLAG,
    ],
};

pub static T3_SCHEMA: Schema = Schema {
    keywords: &DATA_KEYWORDS,
    columns: &[
        TARGET_ID,
        TIME,
        MJD,
        INT_TIME,
        FieldDesc::new("T3AMP", Double, PerChannel, Unit::None, "triple product amplitude"),
        FieldDesc::new("T3AMPERR", Double, PerChannel, Unit::None, "error in triple product amplitude"),
        FieldDesc::new("T3PHI", Double, PerChannel, Unit::Degrees, "triple product phase"),
        FieldDesc::new("T3PHIERR", Double, PerChannel, Unit::Degrees, "error in triple product phase"),
        FieldDesc::new("U1COORD", Double, Fixed(1), Unit::Meters, "U coordinate of baseline AB of the triangle"),
        FieldDesc::new("V1COORD", Double, Fixed(1), Unit::Meters, "V coordinate of baseline AB of the triangle"),
        FieldDesc::new("U2COORD", Double, Fixed(1), Unit::Meters, "U coordinate of baseline BC of the triangle"),
        FieldDesc::new("V2COORD", Double, Fixed(1), Unit::Meters, "V coordinate of baseline BC of the triangle"),
        FieldDesc::new(
            "STA_INDEX",
            Integer,
            Fixed(3),
            Unit::None,
            "station numbers contributing to the data",
        ),
        FLAG,
    ],
};
