use std::io::Write;

use enough::Stop;

use crate::buffer::PixelBuffer;
use crate::error::PnmError;
use crate::pixel::Encoding;
use crate::pnm;

/// Encode settings: body encoding plus an optional channel override.
///
/// The output tag is derived from both. Writing one channel emits only the
/// first grid; three channels need a buffer that still holds its color
/// grids.
#[derive(Clone, Copy, Debug)]
pub struct EncodeRequest {
    encoding: Encoding,
    channels: Option<usize>,
}

impl EncodeRequest {
    pub fn new(encoding: Encoding) -> Self {
        Self {
            encoding,
            channels: None,
        }
    }

    pub fn ascii() -> Self {
        Self::new(Encoding::Ascii)
    }

    pub fn binary() -> Self {
        Self::new(Encoding::Binary)
    }

    /// Channel count to write (1 or 3). Defaults to the buffer's own.
    pub fn with_channels(mut self, channels: usize) -> Self {
        self.channels = Some(channels);
        self
    }

    pub fn encode(&self, buffer: &PixelBuffer, stop: impl Stop) -> Result<Vec<u8>, PnmError> {
        let channels = self.channels.unwrap_or_else(|| buffer.channels());
        pnm::encode(buffer, self.encoding, channels, &stop)
    }

    /// Encode and write everything to an already open destination.
    pub fn write_to<W: Write>(
        &self,
        buffer: &PixelBuffer,
        mut dest: W,
        stop: impl Stop,
    ) -> Result<(), PnmError> {
        let bytes = self.encode(buffer, stop)?;
        dest.write_all(&bytes)?;
        dest.flush()?;
        Ok(())
    }
}

/// Encode as P2/P3 using the buffer's channel count.
pub fn encode_ascii(buffer: &PixelBuffer, stop: impl Stop) -> Result<Vec<u8>, PnmError> {
    EncodeRequest::ascii().encode(buffer, stop)
}

/// Encode as P5/P6 using the buffer's channel count.
pub fn encode_binary(buffer: &PixelBuffer, stop: impl Stop) -> Result<Vec<u8>, PnmError> {
    EncodeRequest::binary().encode(buffer, stop)
}
