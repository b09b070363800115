use enough::StopReason;

/// Errors from PNM decoding, encoding and pixel transforms.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum PnmError {
    #[error("unrecognized magic number {0:?}")]
    UnknownMagic(String),

    #[error("malformed header: {0}")]
    MalformedHeader(String),

    #[error("truncated input: expected {expected} samples, found {found}")]
    TruncatedInput { expected: usize, found: usize },

    #[error("invalid pixel data: {0}")]
    InvalidData(String),

    #[error("dimensions too large: {width}x{height}")]
    DimensionsTooLarge { width: u32, height: u32 },

    #[error("limit exceeded: {0}")]
    LimitExceeded(String),

    #[error("failed to allocate {bytes} bytes for pixel grid")]
    Allocation { bytes: usize },

    #[error("buffer has no {0} channel")]
    MissingChannel(&'static str),

    #[error("cannot encode {0} channels (expected 1 or 3)")]
    UnsupportedChannels(usize),

    #[error("unknown operation {0:?}")]
    UnknownOperation(String),

    #[error("unknown output encoding {0:?}")]
    UnknownEncoding(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("operation cancelled")]
    Cancelled(StopReason),
}

impl PnmError {
    /// Whether this error describes bad input bytes rather than a resource
    /// or caller problem.
    pub fn is_format_error(&self) -> bool {
        matches!(
            self,
            PnmError::UnknownMagic(_)
                | PnmError::MalformedHeader(_)
                | PnmError::TruncatedInput { .. }
                | PnmError::InvalidData(_)
        )
    }
}

impl From<StopReason> for PnmError {
    fn from(r: StopReason) -> Self {
        PnmError::Cancelled(r)
    }
}
