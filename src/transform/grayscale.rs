use log::trace;
use rgb::RGB8;

use crate::buffer::{PixelBuffer, alloc_plane};
use crate::error::PnmError;
use crate::pixel::clamp_sample;

/// Weighted luminance `0.3 r + 0.6 g + 0.1 b`, rounded half away from zero.
#[inline]
pub fn luma(px: RGB8) -> u8 {
    let y = 0.3 * f64::from(px.r) + 0.6 * f64::from(px.g) + 0.1 * f64::from(px.b);
    clamp_sample(y.round() as i64)
}

/// Collapse the buffer to one gray grid and retag it as P2/P5.
///
/// A buffer that is already gray-tagged, or has no color grids, uses its
/// gray grid for all three inputs, so its samples come out unchanged.
pub fn grayscale(buffer: &mut PixelBuffer) -> Result<(), PnmError> {
    let mut gray = alloc_plane(buffer.cols(), buffer.rows())?;
    let red = buffer.redgray().buf();

    match (buffer.green(), buffer.blue()) {
        (Some(green), Some(blue)) if !buffer.magic().is_gray() => {
            trace!("grayscale: weighting {} color pixels", red.len());
            for (dst, ((&r, &g), &b)) in gray
                .buf_mut()
                .iter_mut()
                .zip(red.iter().zip(green.buf()).zip(blue.buf()))
            {
                *dst = luma(RGB8::new(r, g, b));
            }
        }
        _ => {
            trace!("grayscale: input already gray");
            for (dst, &v) in gray.buf_mut().iter_mut().zip(red) {
                *dst = luma(RGB8::new(v, v, v));
            }
        }
    }

    buffer.replace_with_gray(gray);
    Ok(())
}
