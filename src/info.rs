use crate::error::PnmError;
use crate::pixel::MagicNumber;

/// Header fields, available without decoding the body.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ImageInfo {
    /// Column count, the first header dimension.
    pub width: u32,
    /// Row count.
    pub height: u32,
    pub magic: MagicNumber,
    /// Declared max value. Decoding does not rescale by it.
    pub maxval: u32,
    /// Comment lines, each preceded by `\n`.
    pub comment: Vec<u8>,
}

impl ImageInfo {
    /// Probe PNM header bytes.
    pub fn from_bytes(data: &[u8]) -> Result<Self, PnmError> {
        crate::pnm::probe_header(data)
    }
}
