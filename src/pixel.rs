use core::fmt;
use core::str::FromStr;

use crate::error::PnmError;

/// Format tag from the first header token.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MagicNumber {
    /// P2: ASCII grayscale (PGM).
    AsciiGray,
    /// P3: ASCII RGB (PPM).
    AsciiColor,
    /// P5: binary grayscale (PGM).
    BinaryGray,
    /// P6: binary RGB (PPM).
    BinaryColor,
}

impl MagicNumber {
    /// Match a header token against the four supported tags.
    pub fn from_token(token: &[u8]) -> Option<Self> {
        match token {
            b"P2" => Some(Self::AsciiGray),
            b"P3" => Some(Self::AsciiColor),
            b"P5" => Some(Self::BinaryGray),
            b"P6" => Some(Self::BinaryColor),
            _ => None,
        }
    }

    /// Pick the tag for an encoding and a channel count (1 or 3).
    pub fn from_parts(encoding: Encoding, channels: usize) -> Option<Self> {
        match (encoding, channels) {
            (Encoding::Ascii, 1) => Some(Self::AsciiGray),
            (Encoding::Ascii, 3) => Some(Self::AsciiColor),
            (Encoding::Binary, 1) => Some(Self::BinaryGray),
            (Encoding::Binary, 3) => Some(Self::BinaryColor),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::AsciiGray => "P2",
            Self::AsciiColor => "P3",
            Self::BinaryGray => "P5",
            Self::BinaryColor => "P6",
        }
    }

    pub fn encoding(&self) -> Encoding {
        match self {
            Self::AsciiGray | Self::AsciiColor => Encoding::Ascii,
            Self::BinaryGray | Self::BinaryColor => Encoding::Binary,
        }
    }

    /// Logical channel count: 1 for gray tags, 3 for color tags.
    pub fn channels(&self) -> usize {
        match self {
            Self::AsciiGray | Self::BinaryGray => 1,
            Self::AsciiColor | Self::BinaryColor => 3,
        }
    }

    pub fn is_gray(&self) -> bool {
        self.channels() == 1
    }

    /// Gray counterpart with the same encoding (P3 → P2, P6 → P5).
    pub fn to_gray(self) -> Self {
        match self {
            Self::AsciiColor => Self::AsciiGray,
            Self::BinaryColor => Self::BinaryGray,
            gray => gray,
        }
    }
}

impl fmt::Display for MagicNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Pixel body encoding.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Encoding {
    /// Whitespace-separated decimal samples.
    Ascii,
    /// One raw byte per sample.
    Binary,
}

impl FromStr for Encoding {
    type Err = PnmError;

    /// Accepts `ascii`/`binary`, with or without a leading `--`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.strip_prefix("--").unwrap_or(s) {
            "ascii" => Ok(Encoding::Ascii),
            "binary" => Ok(Encoding::Binary),
            _ => Err(PnmError::UnknownEncoding(s.into())),
        }
    }
}

/// Constrain a computed sample to `0..=255`.
#[inline]
pub fn clamp_sample(value: i64) -> u8 {
    value.clamp(0, 255) as u8
}
