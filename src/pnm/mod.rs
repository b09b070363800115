//! PNM family codec: P2/P3 (ASCII) and P5/P6 (binary), 8-bit samples only.

mod decode;
mod encode;

use enough::Stop;

use crate::buffer::PixelBuffer;
use crate::error::PnmError;
use crate::info::ImageInfo;
use crate::limits::Limits;
use crate::pixel::{Encoding, MagicNumber};

/// Parsed PNM header (internal).
#[derive(Clone, Debug)]
pub(crate) struct PnmHeader {
    pub magic: MagicNumber,
    pub comment: Vec<u8>,
    pub cols: u32,
    pub rows: u32,
    pub maxval: u32,
    pub data_offset: usize,
}

/// Probe header for ImageInfo without decoding.
pub(crate) fn probe_header(data: &[u8]) -> Result<ImageInfo, PnmError> {
    let header = decode::parse_header(data, false)?;
    Ok(ImageInfo {
        width: header.cols,
        height: header.rows,
        magic: header.magic,
        maxval: header.maxval,
        comment: header.comment,
    })
}

/// Parse and check the header (called from DecodeRequest and the pipeline).
pub(crate) fn read_header(
    data: &[u8],
    limits: Option<&Limits>,
    strict_maxval: bool,
) -> Result<PnmHeader, PnmError> {
    let header = decode::parse_header(data, strict_maxval)?;
    if let Some(limits) = limits {
        limits.check_dimensions(header.cols, header.rows)?;
        limits.check_planes(header.cols, header.rows, 3)?;
    }
    Ok(header)
}

/// Check the body length, then allocate the three grids for `header` and
/// decode the body into them.
pub(crate) fn read_body(
    data: &[u8],
    header: &PnmHeader,
    stop: &dyn Stop,
) -> Result<PixelBuffer, PnmError> {
    stop.check()?;
    decode::check_body_len(data, header)?;
    let mut buffer = PixelBuffer::new_allocated(
        header.magic,
        header.comment.clone(),
        header.cols as usize,
        header.rows as usize,
    )?;
    decode::decode_body(data, header, &mut buffer, stop)?;
    Ok(buffer)
}

/// Encode to PNM (called from EncodeRequest).
pub(crate) fn encode(
    buffer: &PixelBuffer,
    encoding: Encoding,
    channels: usize,
    stop: &dyn Stop,
) -> Result<Vec<u8>, PnmError> {
    encode::encode_pnm(buffer, encoding, channels, stop)
}
