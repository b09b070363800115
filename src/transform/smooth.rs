use imgref::ImgVec;

use super::filter_interior;
use crate::buffer::PixelBuffer;
use crate::error::PnmError;
use crate::pixel::clamp_sample;

/// Mean of the 3x3 neighbourhood, truncated.
fn box_mean(src: &ImgVec<u8>, x: usize, y: usize) -> u8 {
    let mut sum = 0u32;
    for ny in y - 1..=y + 1 {
        for nx in x - 1..=x + 1 {
            sum += u32::from(src[(nx, ny)]);
        }
    }
    clamp_sample(i64::from(sum / 9))
}

/// 3x3 box blur on every present grid. Border pixels are set to 0.
pub fn smooth(buffer: &mut PixelBuffer) -> Result<(), PnmError> {
    filter_interior(buffer, box_mean)
}
