use log::{trace, warn};

use super::grayscale::grayscale;
use crate::buffer::PixelBuffer;
use crate::error::PnmError;
use crate::pixel::clamp_sample;

/// Convert to gray, then linearly stretch the gray grid so that its
/// minimum maps to 0 and its maximum to 255.
///
/// A flat image (minimum equals maximum) has nothing to stretch and is left
/// as the grayscale conversion produced it.
pub fn contrast(buffer: &mut PixelBuffer) -> Result<(), PnmError> {
    grayscale(buffer)?;

    let samples = buffer.redgray_mut().buf_mut();
    let (minimum, maximum) = samples
        .iter()
        .fold((u8::MAX, u8::MIN), |(lo, hi), &v| (lo.min(v), hi.max(v)));

    if minimum >= maximum {
        warn!("contrast: flat image (all samples {minimum}), leaving unchanged");
        return Ok(());
    }

    let scale = 255.0 / f64::from(maximum - minimum);
    trace!("contrast: min {minimum}, max {maximum}, scale {scale}");

    for x in samples.iter_mut() {
        *x = clamp_sample((scale * f64::from(*x - minimum)).round() as i64);
    }
    Ok(())
}
