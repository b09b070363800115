use crate::error::PnmError;

/// Caps applied to a header before any channel grid is allocated.
///
/// Every field defaults to `None`, meaning unlimited.
#[derive(Clone, Debug, Default)]
pub struct Limits {
    pub max_cols: Option<u32>,
    pub max_rows: Option<u32>,
    /// Cap on `cols * rows`.
    pub max_pixels: Option<u64>,
    /// Cap on the bytes held by all decoded grids together.
    pub max_memory_bytes: Option<u64>,
}

impl Limits {
    /// Validate declared dimensions.
    pub(crate) fn check_dimensions(&self, cols: u32, rows: u32) -> Result<(), PnmError> {
        if let Some(max) = self.max_cols.filter(|&max| cols > max) {
            return Err(PnmError::LimitExceeded(format!(
                "width {cols} exceeds limit {max}"
            )));
        }
        if let Some(max) = self.max_rows.filter(|&max| rows > max) {
            return Err(PnmError::LimitExceeded(format!(
                "height {rows} exceeds limit {max}"
            )));
        }
        let pixels = u64::from(cols) * u64::from(rows);
        if let Some(max) = self.max_pixels.filter(|&max| pixels > max) {
            return Err(PnmError::LimitExceeded(format!(
                "pixel count {pixels} exceeds limit {max}"
            )));
        }
        Ok(())
    }

    /// Validate the memory needed for `planes` grids of `cols * rows` samples.
    pub(crate) fn check_planes(&self, cols: u32, rows: u32, planes: u64) -> Result<(), PnmError> {
        let Some(max) = self.max_memory_bytes else {
            return Ok(());
        };
        let bytes = u64::from(cols) * u64::from(rows) * planes;
        if bytes > max {
            return Err(PnmError::LimitExceeded(format!(
                "{planes} grids of {cols}x{rows} need {bytes} bytes, limit is {max}"
            )));
        }
        Ok(())
    }
}
