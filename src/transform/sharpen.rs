use imgref::ImgVec;

use super::filter_interior;
use crate::buffer::PixelBuffer;
use crate::error::PnmError;
use crate::pixel::clamp_sample;

/// `5 * center` minus the four edge-adjacent neighbours.
fn laplace_sharpen(src: &ImgVec<u8>, x: usize, y: usize) -> u8 {
    let at = |x: usize, y: usize| i64::from(src[(x, y)]);
    clamp_sample(5 * at(x, y) - at(x, y - 1) - at(x, y + 1) - at(x - 1, y) - at(x + 1, y))
}

/// Sharpen every present grid with a 4-neighbour kernel. Border pixels are
/// set to 0.
pub fn sharpen(buffer: &mut PixelBuffer) -> Result<(), PnmError> {
    filter_interior(buffer, laplace_sharpen)
}
