//! `OI_ARRAY`: interferometer geometry.

use crate::error::OifitsResult;
use crate::fits::FitsAccess;

use super::TableHeader;

#[derive(Debug)]
pub struct ArrayTable {
    header: TableHeader,
    arr_name: Option<String>,
}

impl ArrayTable {
    pub(crate) fn new(header: TableHeader, fits: &dyn FitsAccess) -> Self {
        let arr_name = header.optional_string(fits, "ARRNAME");
        Self { header, arr_name }
    }

    pub fn header(&self) -> &TableHeader {
        &self.header
    }

    /// ARRNAME as read at construction, used for cross-referencing.
    pub fn cached_arr_name(&self) -> Option<&str> {
        self.arr_name.as_deref()
    }

    fn rows(&self) -> usize {
        self.header.row_count()
    }

    pub fn arr_name(&self, fits: &dyn FitsAccess) -> OifitsResult<String> {
        self.header.keyword_string(fits, "ARRNAME")
    }

    pub fn frame(&self, fits: &dyn FitsAccess) -> OifitsResult<String> {
        self.header.keyword_string(fits, "FRAME")
    }

    pub fn array_x(&self, fits: &dyn FitsAccess) -> OifitsResult<f64> {
        self.header.keyword_double(fits, "ARRAYX")
    }

    pub fn array_y(&self, fits: &dyn FitsAccess) -> OifitsResult<f64> {
        self.header.keyword_double(fits, "ARRAYY")
    }

    pub fn array_z(&self, fits: &dyn FitsAccess) -> OifitsResult<f64> {
        self.header.keyword_double(fits, "ARRAYZ")
    }

    pub fn tel_name(&self, fits: &dyn FitsAccess) -> OifitsResult<Vec<String>> {
        self.header.strings(fits, "TEL_NAME", self.rows())
    }

    pub fn sta_name(&self, fits: &dyn FitsAccess) -> OifitsResult<Vec<String>> {
        self.header.strings(fits, "STA_NAME", self.rows())
    }

    pub fn sta_index(&self, fits: &dyn FitsAccess) -> OifitsResult<Vec<i16>> {
        self.header.integers(fits, "STA_INDEX", self.rows())
    }

    pub fn diameter(&self, fits: &dyn FitsAccess) -> OifitsResult<Vec<f32>> {
        self.header.floats(fits, "DIAMETER", self.rows())
    }

    /// Station offsets, three values per row.
    pub fn sta_xyz(&self, fits: &dyn FitsAccess) -> OifitsResult<Vec<[f64; 3]>> {
        let flat = self.header.doubles(fits, "STAXYZ", self.rows() * 3)?;
        Ok(flat.chunks_exact(3).map(|c| [c[0], c[1], c[2]]).collect())
    }
}
