//! Measurement tables: `OI_VIS`, `OI_VIS2` and `OI_T3`.
//!
//! All three share [`DataTable`], which carries the cross references to an
//! `OI_ARRAY` and an `OI_WAVELENGTH` table. References are plain indices
//! into the document's table list; `None` means unresolved.

use chrono::NaiveDate;

use crate::error::{OifitsError, OifitsResult};
use crate::fits::FitsAccess;
use crate::time::parse_date_obs;

use super::{TableHeader, TableIndex, TableKind};

/// Outcome of offering a candidate table to a data table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Offer {
    /// The candidate filled an empty slot.
    Accepted,
    /// The candidate is already the resolved reference.
    AlreadyBound,
    /// Name matches but the slot holds an earlier match.
    SlotTaken { bound: TableIndex },
    /// Wrong kind or different name.
    Ignored,
}

/// Snapshot of a potential reference target, detached from the table list
/// so data tables can be mutated while candidates are offered.
#[derive(Debug, Clone)]
pub(crate) struct Candidate {
    pub index: TableIndex,
    pub kind: TableKind,
    pub name: Option<String>,
    pub row_count: usize,
}

#[derive(Debug)]
pub struct DataTable {
    header: TableHeader,
    station_arity: usize,
    nwave: usize,
    arr_name: Option<String>,
    ins_name: Option<String>,
    array: Option<TableIndex>,
    wavelength: Option<TableIndex>,
}

impl DataTable {
    pub(crate) fn new(header: TableHeader, kind: TableKind, fits: &dyn FitsAccess) -> Self {
        let arr_name = header.optional_string(fits, "ARRNAME");
        let ins_name = header.optional_string(fits, "INSNAME");
        Self {
            header,
            station_arity: kind.station_arity(),
            nwave: 0,
            arr_name,
            ins_name,
            array: None,
            wavelength: None,
        }
    }

    pub fn header(&self) -> &TableHeader {
        &self.header
    }

    pub fn station_arity(&self) -> usize {
        self.station_arity
    }

    /// Channel count, taken from the referenced wavelength table. Zero
    /// until that reference is resolved.
    pub fn nwave(&self) -> usize {
        self.nwave
    }

    pub fn array(&self) -> Option<TableIndex> {
        self.array
    }

    pub fn wavelength(&self) -> Option<TableIndex> {
        self.wavelength
    }

    pub fn cached_arr_name(&self) -> Option<&str> {
        self.arr_name.as_deref()
    }

    pub fn cached_ins_name(&self) -> Option<&str> {
        self.ins_name.as_deref()
    }

    pub(crate) fn offer(&mut self, candidate: &Candidate) -> Offer {
        let (wanted, slot) = match candidate.kind {
            TableKind::Array => (self.arr_name.as_deref(), &mut self.array),
            TableKind::Wavelength => (self.ins_name.as_deref(), &mut self.wavelength),
            _ => return Offer::Ignored,
        };
        match (wanted, candidate.name.as_deref()) {
            (Some(a), Some(b)) if a == b => {}
            _ => return Offer::Ignored,
        }
        match *slot {
            Some(bound) if bound == candidate.index => Offer::AlreadyBound,
            Some(bound) => Offer::SlotTaken { bound },
            None => {
                *slot = Some(candidate.index);
                if candidate.kind == TableKind::Wavelength {
                    self.nwave = candidate.row_count;
                }
                Offer::Accepted
            }
        }
    }

    fn rows(&self) -> usize {
        self.header.row_count()
    }

    pub fn date_obs(&self, fits: &dyn FitsAccess) -> OifitsResult<String> {
        self.header.keyword_string(fits, "DATE-OBS")
    }

    /// DATE-OBS as a calendar date; `None` when the text is not a date.
    pub fn observation_date(&self, fits: &dyn FitsAccess) -> OifitsResult<Option<NaiveDate>> {
        Ok(parse_date_obs(&self.date_obs(fits)?))
    }

    pub fn arr_name(&self, fits: &dyn FitsAccess) -> OifitsResult<String> {
        self.header.keyword_string(fits, "ARRNAME")
    }

    pub fn ins_name(&self, fits: &dyn FitsAccess) -> OifitsResult<String> {
        self.header.keyword_string(fits, "INSNAME")
    }

    pub fn target_id(&self, fits: &dyn FitsAccess) -> OifitsResult<Vec<i16>> {
        self.header.integers(fits, "TARGET_ID", self.rows())
    }

    pub fn time(&self, fits: &dyn FitsAccess) -> OifitsResult<Vec<f64>> {
        self.header.doubles(fits, "TIME", self.rows())
    }

    pub fn mjd(&self, fits: &dyn FitsAccess) -> OifitsResult<Vec<f64>> {
        self.header.doubles(fits, "MJD", self.rows())
    }

    pub fn int_time(&self, fits: &dyn FitsAccess) -> OifitsResult<Vec<f64>> {
        self.header.doubles(fits, "INT_TIME", self.rows())
    }

    /// Station indices, `station_arity` values per row, row-major.
    pub fn sta_index(&self, fits: &dyn FitsAccess) -> OifitsResult<Vec<i16>> {
        self.header
            .integers(fits, "STA_INDEX", self.rows() * self.station_arity)
    }

    /// Flags, `nwave` values per row, row-major.
    pub fn flag(&self, fits: &dyn FitsAccess) -> OifitsResult<Vec<bool>> {
        let count = self.channel_count()?;
        self.header.logicals(fits, "FLAG", count)
    }

    pub(crate) fn channel_doubles(&self, fits: &dyn FitsAccess, name: &str) -> OifitsResult<Vec<f64>> {
        let count = self.channel_count()?;
        self.header.doubles(fits, name, count)
    }

    /// Elements in a per-channel column. Without a wavelength reference
    /// the channel count is unknown.
    fn channel_count(&self) -> OifitsResult<usize> {
        if self.wavelength.is_none() {
            return Err(OifitsError::NoReference {
                location: self.header.location(),
                kind: "OI_WAVELENGTH",
            });
        }
        Ok(self.rows() * self.nwave)
    }

    pub(crate) fn row_doubles(&self, fits: &dyn FitsAccess, name: &str) -> OifitsResult<Vec<f64>> {
        self.header.doubles(fits, name, self.rows())
    }
}

macro_rules! data_table {
    ($(#[$doc:meta])* $name:ident) => {
        $(#[$doc])*
        #[derive(Debug)]
        pub struct $name {
            data: DataTable,
        }

        impl $name {
            pub(crate) fn new(data: DataTable) -> Self {
                Self { data }
            }

            pub fn data(&self) -> &DataTable {
                &self.data
            }

            pub(crate) fn data_mut(&mut self) -> &mut DataTable {
                &mut self.data
            }
        }
    };
}

data_table!(
    /// `OI_VIS`: complex visibilities.
    VisTable
);
data_table!(
    /// `OI_VIS2`: squared visibilities.
    Vis2Table
);
data_table!(
    /// `OI_T3`: triple products.
    T3Table
);

impl VisTable {
    pub fn vis_amp(&self, fits: &dyn FitsAccess) -> OifitsResult<Vec<f64>> {
        self.data.channel_doubles(fits, "VISAMP")
    }

    pub fn vis_amp_err(&self, fits: &dyn FitsAccess) -> OifitsResult<Vec<f64>> {
        self.data.channel_doubles(fits, "VISAMPERR")
    }

    pub fn vis_phi(&self, fits: &dyn FitsAccess) -> OifitsResult<Vec<f64>> {
        self.data.channel_doubles(fits, "VISPHI")
    }

    pub fn vis_phi_err(&self, fits: &dyn FitsAccess) -> OifitsResult<Vec<f64>> {
        self.data.channel_doubles(fits, "VISPHIERR")
    }

    pub fn ucoord(&self, fits: &dyn FitsAccess) -> OifitsResult<Vec<f64>> {
        self.data.row_doubles(fits, "UCOORD")
    }

    pub fn vcoord(&self, fits: &dyn FitsAccess) -> OifitsResult<Vec<f64>> {
        self.data.row_doubles(fits, "VCOORD")
    }
}

impl Vis2Table {
    /// Squared visibilities, `nwave` values per row, row-major.
    pub fn vis2_data(&self, fits: &dyn FitsAccess) -> OifitsResult<Vec<f64>> {
        self.data.channel_doubles(fits, "VIS2DATA")
    }

    pub fn vis2_err(&self, fits: &dyn FitsAccess) -> OifitsResult<Vec<f64>> {
        self.data.channel_doubles(fits, "VIS2ERR")
    }

    pub fn ucoord(&self, fits: &dyn FitsAccess) -> OifitsResult<Vec<f64>> {
        self.data.row_doubles(fits, "UCOORD")
    }

    pub fn vcoord(&self, fits: &dyn FitsAccess) -> OifitsResult<Vec<f64>> {
        self.data.row_doubles(fits, "VCOORD")
    }
}

impl T3Table {
    pub fn t3_amp(&self, fits: &dyn FitsAccess) -> OifitsResult<Vec<f64>> {
        self.data.channel_doubles(fits, "T3AMP")
    }

    pub fn t3_amp_err(&self, fits: &dyn FitsAccess) -> OifitsResult<Vec<f64>> {
        self.data.channel_doubles(fits, "T3AMPERR")
    }

    pub fn t3_phi(&self, fits: &dyn FitsAccess) -> OifitsResult<Vec<f64>> {
        self.data.channel_doubles(fits, "T3PHI")
    }

    pub fn t3_phi_err(&self, fits: &dyn FitsAccess) -> OifitsResult<Vec<f64>> {
        self.data.channel_doubles(fits, "T3PHIERR")
    }

    pub fn u1coord(&self, fits: &dyn FitsAccess) -> OifitsResult<Vec<f64>> {
        self.data.row_doubles(fits, "U1COORD")
    }

    pub fn v1coord(&self, fits: &dyn FitsAccess) -> OifitsResult<Vec<f64>> {
        self.data.row_doubles(fits, "V1COORD")
    }

    pub fn u2coord(&self, fits: &dyn FitsAccess) -> OifitsResult<Vec<f64>> {
        self.data.row_doubles(fits, "U2COORD")
    }

    pub fn v2coord(&self, fits: &dyn FitsAccess) -> OifitsResult<Vec<f64>> {
        self.data.row_doubles(fits, "V2COORD")
    }
}
