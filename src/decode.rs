use enough::Stop;

use crate::buffer::PixelBuffer;
use crate::error::PnmError;
use crate::limits::Limits;
use crate::pnm;

/// Decode settings for one input.
///
/// ```
/// use pnmtool::{DecodeRequest, Limits, Unstoppable};
///
/// let limits = Limits { max_pixels: Some(1 << 24), ..Default::default() };
/// let buffer = DecodeRequest::new(b"P2\n2 1\n255\n0 255\n")
///     .with_limits(&limits)
///     .decode(Unstoppable)?;
/// assert_eq!(buffer.redgray().buf().as_slice(), &[0, 255]);
/// # Ok::<(), pnmtool::PnmError>(())
/// ```
#[derive(Clone, Debug)]
pub struct DecodeRequest<'a> {
    data: &'a [u8],
    limits: Option<&'a Limits>,
    strict_maxval: bool,
}

impl<'a> DecodeRequest<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self {
            data,
            limits: None,
            strict_maxval: false,
        }
    }

    /// Reject headers whose dimensions or grid memory exceed `limits`.
    pub fn with_limits(mut self, limits: &'a Limits) -> Self {
        self.limits = Some(limits);
        self
    }

    /// Reject any max value other than 255 instead of ignoring it.
    pub fn strict_maxval(mut self, strict: bool) -> Self {
        self.strict_maxval = strict;
        self
    }

    pub fn decode(self, stop: impl Stop) -> Result<PixelBuffer, PnmError> {
        let header = pnm::read_header(self.data, self.limits, self.strict_maxval)?;
        pnm::read_body(self.data, &header, &stop)
    }
}

/// Decode with default settings.
pub fn decode(data: &[u8], stop: impl Stop) -> Result<PixelBuffer, PnmError> {
    DecodeRequest::new(data).decode(stop)
}
