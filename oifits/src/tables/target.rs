//! `OI_TARGET`: the observed targets.

use crate::error::OifitsResult;
use crate::fits::FitsAccess;

use super::TableHeader;

#[derive(Debug)]
pub struct TargetTable {
    header: TableHeader,
}

impl TargetTable {
    pub(crate) fn new(header: TableHeader) -> Self {
        Self { header }
    }

    pub fn header(&self) -> &TableHeader {
        &self.header
    }

    fn rows(&self) -> usize {
        self.header.row_count()
    }

    pub fn target_id(&self, fits: &dyn FitsAccess) -> OifitsResult<Vec<i16>> {
        self.header.integers(fits, "TARGET_ID", self.rows())
    }

    /// Target names, trailing blanks removed.
    pub fn target(&self, fits: &dyn FitsAccess) -> OifitsResult<Vec<String>> {
        self.header.strings(fits, "TARGET", self.rows())
    }

    pub fn raep0(&self, fits: &dyn FitsAccess) -> OifitsResult<Vec<f64>> {
        self.header.doubles(fits, "RAEP0", self.rows())
    }

    pub fn decep0(&self, fits: &dyn FitsAccess) -> OifitsResult<Vec<f64>> {
        self.header.doubles(fits, "DECEP0", self.rows())
    }

    pub fn equinox(&self, fits: &dyn FitsAccess) -> OifitsResult<Vec<f32>> {
        self.header.floats(fits, "EQUINOX", self.rows())
    }

    pub fn ra_err(&self, fits: &dyn FitsAccess) -> OifitsResult<Vec<f64>> {
        self.header.doubles(fits, "RA_ERR", self.rows())
    }

    pub fn dec_err(&self, fits: &dyn FitsAccess) -> OifitsResult<Vec<f64>> {
        self.header.doubles(fits, "DEC_ERR", self.rows())
    }

    pub fn sysvel(&self, fits: &dyn FitsAccess) -> OifitsResult<Vec<f64>> {
        self.header.doubles(fits, "SYSVEL", self.rows())
    }

    pub fn veltyp(&self, fits: &dyn FitsAccess) -> OifitsResult<Vec<String>> {
        self.header.strings(fits, "VELTYP", self.rows())
    }

    pub fn veldef(&self, fits: &dyn FitsAccess) -> OifitsResult<Vec<String>> {
        self.header.strings(fits, "VELDEF", self.rows())
    }

    pub fn pmra(&self, fits: &dyn FitsAccess) -> OifitsResult<Vec<f64>> {
        self.header.doubles(fits, "PMRA", self.rows())
    }

    pub fn pmdec(&self, fits: &dyn FitsAccess) -> OifitsResult<Vec<f64>> {
        self.header.doubles(fits, "PMDEC", self.rows())
    }

    pub fn pmra_err(&self, fits: &dyn FitsAccess) -> OifitsResult<Vec<f64>> {
        self.header.doubles(fits, "PMRA_ERR", self.rows())
    }

    pub fn pmdec_err(&self, fits: &dyn FitsAccess) -> OifitsResult<Vec<f64>> {
        self.header.doubles(fits, "PMDEC_ERR", self.rows())
    }

    pub fn parallax(&self, fits: &dyn FitsAccess) -> OifitsResult<Vec<f32>> {
        self.header.floats(fits, "PARALLAX", self.rows())
    }

    pub fn para_err(&self, fits: &dyn FitsAccess) -> OifitsResult<Vec<f32>> {
        self.header.floats(fits, "PARA_ERR", self.rows())
    }

    pub fn spectyp(&self, fits: &dyn FitsAccess) -> OifitsResult<Vec<String>> {
        self.header.strings(fits, "SPECTYP", self.rows())
    }
}
