use crate::buffer::PixelBuffer;

/// Invert every sample of every present grid.
///
/// The formula for inverting an 8 bit sample is `sample = 255 - sample`.
pub fn negate(buffer: &mut PixelBuffer) {
    buffer
        .planes_mut()
        .for_each(|plane| plane.buf_mut().iter_mut().for_each(|x| *x = u8::MAX - *x));
}
