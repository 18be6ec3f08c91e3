//! `OI_WAVELENGTH`: spectral channels of one instrument setup.

use crate::error::OifitsResult;
use crate::fits::FitsAccess;

use super::TableHeader;

#[derive(Debug)]
pub struct WavelengthTable {
    header: TableHeader,
    ins_name: Option<String>,
}

impl WavelengthTable {
    pub(crate) fn new(header: TableHeader, fits: &dyn FitsAccess) -> Self {
        let ins_name = header.optional_string(fits, "INSNAME");
        Self { header, ins_name }
    }

    pub fn header(&self) -> &TableHeader {
        &self.header
    }

    pub fn cached_ins_name(&self) -> Option<&str> {
        self.ins_name.as_deref()
    }

    /// One row per spectral channel.
    pub fn channel_count(&self) -> usize {
        self.header.row_count()
    }

    pub fn ins_name(&self, fits: &dyn FitsAccess) -> OifitsResult<String> {
        self.header.keyword_string(fits, "INSNAME")
    }

    pub fn eff_wave(&self, fits: &dyn FitsAccess) -> OifitsResult<Vec<f32>> {
        self.header.floats(fits, "EFF_WAVE", self.channel_count())
    }

    pub fn eff_band(&self, fits: &dyn FitsAccess) -> OifitsResult<Vec<f32>> {
        self.header.floats(fits, "EFF_BAND", self.channel_count())
    }
}
