//! PNM encoder: P2, P3, P5, P6.

use std::io::Write as _;

use enough::Stop;
use log::debug;

use crate::buffer::PixelBuffer;
use crate::error::PnmError;
use crate::pixel::{Encoding, MagicNumber};

/// Serialize `buffer` with the tag picked from `encoding` and `channels`.
pub(crate) fn encode_pnm(
    buffer: &PixelBuffer,
    encoding: Encoding,
    channels: usize,
    stop: &dyn Stop,
) -> Result<Vec<u8>, PnmError> {
    let magic =
        MagicNumber::from_parts(encoding, channels).ok_or(PnmError::UnsupportedChannels(channels))?;
    let planes: Vec<&[u8]> = buffer
        .planes()
        .take(channels)
        .map(|p| p.buf().as_slice())
        .collect();
    if planes.len() < channels {
        return Err(PnmError::MissingChannel(if planes.len() == 1 {
            "green"
        } else {
            "blue"
        }));
    }

    let cols = buffer.cols();
    let rows = buffer.rows();
    let dims = format!("\n{cols} {rows}\n255\n");
    let samples = cols * rows * channels;
    let body_estimate = match encoding {
        Encoding::Binary => samples,
        Encoding::Ascii => samples * 4,
    };
    let mut out = Vec::with_capacity(2 + buffer.comment().len() + dims.len() + body_estimate);
    out.extend_from_slice(magic.as_str().as_bytes());
    out.extend_from_slice(buffer.comment());
    out.extend_from_slice(dims.as_bytes());

    debug!("encoding {cols}x{rows} as {magic}");
    stop.check()?;

    match encoding {
        Encoding::Binary => encode_binary(&mut out, &planes, cols, stop)?,
        Encoding::Ascii => encode_ascii(&mut out, &planes, cols, stop)?,
    }
    Ok(out)
}

fn encode_binary(
    out: &mut Vec<u8>,
    planes: &[&[u8]],
    cols: usize,
    stop: &dyn Stop,
) -> Result<(), PnmError> {
    if let [gray] = planes {
        for (row, line) in gray.chunks_exact(cols).enumerate() {
            if row % 16 == 0 {
                stop.check()?;
            }
            out.extend_from_slice(line);
        }
        return Ok(());
    }

    let len = planes[0].len();
    for i in 0..len {
        if i % cols.saturating_mul(16) == 0 {
            stop.check()?;
        }
        out.extend(planes.iter().map(|p| p[i]));
    }
    Ok(())
}

fn encode_ascii(
    out: &mut Vec<u8>,
    planes: &[&[u8]],
    cols: usize,
    stop: &dyn Stop,
) -> Result<(), PnmError> {
    let len = planes[0].len();
    for i in 0..len {
        if i % cols.saturating_mul(16) == 0 {
            stop.check()?;
        }
        match planes {
            [gray] => writeln!(out, "{}", gray[i])?,
            [r, g, b] => writeln!(out, "{} {} {}", r[i], g[i], b[i])?,
            _ => return Err(PnmError::UnsupportedChannels(planes.len())),
        }
    }
    Ok(())
}
