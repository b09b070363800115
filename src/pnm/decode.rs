//! PNM decoder: header with comment lines, then an ASCII or binary body.

use enough::Stop;
use log::{debug, warn};
use rgb::{AsPixels as _, RGB8};

use super::PnmHeader;
use crate::buffer::PixelBuffer;
use crate::error::PnmError;
use crate::pixel::{Encoding, MagicNumber, clamp_sample};

/// Whitespace as the C locale sees it (includes vertical tab).
#[inline]
fn is_space(b: u8) -> bool {
    b.is_ascii_whitespace() || b == 0x0b
}

/// Byte cursor over the header.
struct Cursor<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> Cursor<'a> {
    fn new(data: &'a [u8]) -> Self {
        Self { data, pos: 0 }
    }

    fn peek(&self) -> Option<u8> {
        self.data.get(self.pos).copied()
    }

    fn rest(&self) -> &'a [u8] {
        self.data.get(self.pos..).unwrap_or(&[])
    }

    /// Skip leading whitespace, then take bytes up to the next whitespace.
    fn token(&mut self) -> &'a [u8] {
        while self.peek().is_some_and(is_space) {
            self.pos += 1;
        }
        let start = self.pos;
        while self.peek().is_some_and(|b| !is_space(b)) {
            self.pos += 1;
        }
        &self.data[start..self.pos]
    }

    /// Skip a single line terminator (`\n` or `\r\n`) or one whitespace byte.
    fn skip_terminator(&mut self) {
        if self.rest().starts_with(b"\r\n") {
            self.pos += 2;
        } else if self.peek().is_some_and(is_space) {
            self.pos += 1;
        }
    }

    /// Take one line without its terminator and step past the terminator.
    fn line(&mut self) -> &'a [u8] {
        let rest = self.rest();
        let len = rest.iter().position(|&b| b == b'\n').unwrap_or(rest.len());
        self.pos += (len + 1).min(rest.len());
        let line = &rest[..len];
        line.strip_suffix(b"\r").unwrap_or(line)
    }
}

fn header_int(cursor: &mut Cursor<'_>, field: &str) -> Result<u32, PnmError> {
    let token = cursor.token();
    if token.is_empty() {
        return Err(PnmError::MalformedHeader(format!("missing {field}")));
    }
    core::str::from_utf8(token)
        .ok()
        .filter(|s| s.bytes().all(|b| b.is_ascii_digit()))
        .and_then(|s| s.parse::<u32>().ok())
        .ok_or_else(|| {
            PnmError::MalformedHeader(format!(
                "{field} is not an integer: {:?}",
                String::from_utf8_lossy(token)
            ))
        })
}

fn dimension(cursor: &mut Cursor<'_>, field: &str) -> Result<u32, PnmError> {
    match header_int(cursor, field)? {
        0 => Err(PnmError::MalformedHeader(format!("{field} must be positive"))),
        v => Ok(v),
    }
}

/// Parse the header, stopping right after the single separator that
/// precedes the pixel body.
pub(crate) fn parse_header(data: &[u8], strict_maxval: bool) -> Result<PnmHeader, PnmError> {
    let mut cursor = Cursor::new(data);

    let token = cursor.token();
    let magic = MagicNumber::from_token(token)
        .ok_or_else(|| PnmError::UnknownMagic(String::from_utf8_lossy(token).into_owned()))?;
    cursor.skip_terminator();

    let mut comment = Vec::new();
    while cursor.peek() == Some(b'#') {
        comment.push(b'\n');
        comment.extend_from_slice(cursor.line());
    }

    // Width comes first in the header.
    let cols = dimension(&mut cursor, "width")?;
    let rows = dimension(&mut cursor, "height")?;
    let maxval = header_int(&mut cursor, "max value")?;
    if maxval != 255 {
        if strict_maxval {
            return Err(PnmError::MalformedHeader(format!(
                "max value {maxval} is not 255"
            )));
        }
        warn!("max value {maxval} ignored, samples are read as 0..=255");
    }

    if cursor.peek().is_some_and(is_space) {
        cursor.pos += 1;
    }

    debug!(
        "{magic} header: {cols}x{rows}, maxval {maxval}, {} comment bytes, body at {}",
        comment.len(),
        cursor.pos
    );

    Ok(PnmHeader {
        magic,
        comment,
        cols,
        rows,
        maxval,
        data_offset: cursor.pos,
    })
}

fn sample_count(header: &PnmHeader) -> Result<usize, PnmError> {
    (header.cols as usize)
        .checked_mul(header.rows as usize)
        .and_then(|px| px.checked_mul(header.magic.channels()))
        .ok_or(PnmError::DimensionsTooLarge {
            width: header.cols,
            height: header.rows,
        })
}

/// Reject a body that cannot hold the declared samples, before any grid
/// is allocated for it.
///
/// Binary bodies need one byte per sample. ASCII bodies need at least one
/// digit per sample plus a separator between samples; anything shorter is
/// scanned so the error matches what a full decode would report.
pub(crate) fn check_body_len(data: &[u8], header: &PnmHeader) -> Result<(), PnmError> {
    let body = data.get(header.data_offset..).unwrap_or(&[]);
    let expected = sample_count(header)?;
    match header.magic.encoding() {
        Encoding::Binary if body.len() < expected => Err(PnmError::TruncatedInput {
            expected,
            found: body.len(),
        }),
        Encoding::Ascii if body.len() < expected.saturating_mul(2).saturating_sub(1) => {
            let mut found = 0;
            for token in body.split(|&b| is_space(b)).filter(|t| !t.is_empty()) {
                parse_sample(token)?;
                found += 1;
            }
            Err(PnmError::TruncatedInput { expected, found })
        }
        _ => Ok(()),
    }
}

/// Fill the buffer's grids from the body that follows the header.
pub(crate) fn decode_body(
    data: &[u8],
    header: &PnmHeader,
    buffer: &mut PixelBuffer,
    stop: &dyn Stop,
) -> Result<(), PnmError> {
    let body = data.get(header.data_offset..).unwrap_or(&[]);
    let channels = header.magic.channels();
    let cols = header.cols as usize;
    let expected = sample_count(header)?;

    match header.magic.encoding() {
        Encoding::Binary => decode_binary(body, cols, channels, expected, buffer, stop),
        Encoding::Ascii => decode_ascii(body, cols, channels, expected, buffer, stop),
    }
}

fn decode_binary(
    body: &[u8],
    cols: usize,
    channels: usize,
    expected: usize,
    buffer: &mut PixelBuffer,
    stop: &dyn Stop,
) -> Result<(), PnmError> {
    if body.len() < expected {
        return Err(PnmError::TruncatedInput {
            expected,
            found: body.len(),
        });
    }
    let body = &body[..expected];

    if channels == 1 {
        let gray = buffer.redgray_mut().buf_mut();
        for (row, (dst, src)) in gray
            .chunks_exact_mut(cols)
            .zip(body.chunks_exact(cols))
            .enumerate()
        {
            if row % 16 == 0 {
                stop.check()?;
            }
            dst.copy_from_slice(src);
        }
        return Ok(());
    }

    let [red, green, blue] = buffer
        .rgb_planes_mut()
        .ok_or(PnmError::MissingChannel("green"))?;
    let pixels: &[RGB8] = body.as_pixels();
    for (i, px) in pixels.iter().enumerate() {
        if i % cols.saturating_mul(16) == 0 {
            stop.check()?;
        }
        red.buf_mut()[i] = px.r;
        green.buf_mut()[i] = px.g;
        blue.buf_mut()[i] = px.b;
    }
    Ok(())
}

fn parse_sample(token: &[u8]) -> Result<u8, PnmError> {
    core::str::from_utf8(token)
        .ok()
        .and_then(|s| s.parse::<i64>().ok())
        .map(clamp_sample)
        .ok_or_else(|| {
            PnmError::InvalidData(format!(
                "expected an integer sample, found {:?}",
                String::from_utf8_lossy(token)
            ))
        })
}

fn decode_ascii(
    body: &[u8],
    cols: usize,
    channels: usize,
    expected: usize,
    buffer: &mut PixelBuffer,
    stop: &dyn Stop,
) -> Result<(), PnmError> {
    let mut tokens = body
        .split(|&b| is_space(b))
        .filter(|t| !t.is_empty())
        .map(parse_sample);
    let mut found = 0usize;
    let mut next = || -> Result<u8, PnmError> {
        let sample = tokens
            .next()
            .ok_or(PnmError::TruncatedInput { expected, found })??;
        found += 1;
        Ok(sample)
    };

    if channels == 1 {
        for (i, dst) in buffer.redgray_mut().buf_mut().iter_mut().enumerate() {
            if i % cols.saturating_mul(16) == 0 {
                stop.check()?;
            }
            *dst = next()?;
        }
        return Ok(());
    }

    let [red, green, blue] = buffer
        .rgb_planes_mut()
        .ok_or(PnmError::MissingChannel("green"))?;
    for i in 0..expected / 3 {
        if i % cols.saturating_mul(16) == 0 {
            stop.check()?;
        }
        red.buf_mut()[i] = next()?;
        green.buf_mut()[i] = next()?;
        blue.buf_mut()[i] = next()?;
    }
    Ok(())
}
