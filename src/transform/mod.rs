//! Pixel transforms over a [`PixelBuffer`].
//!
//! `brighten` and `negate` work in place. `grayscale` swaps in a fresh gray
//! grid and drops the color grids; `contrast` builds on it. `smooth` and
//! `sharpen` write each grid into a fresh output grid so neighbour reads
//! always see the original samples.

mod brighten;
mod contrast;
mod grayscale;
mod negate;
mod sharpen;
mod smooth;

use core::fmt;
use core::str::FromStr;

use imgref::ImgVec;
use log::debug;

pub use brighten::brighten;
pub use contrast::contrast;
pub use grayscale::{grayscale, luma};
pub use negate::negate;
pub use sharpen::sharpen;
pub use smooth::smooth;

use crate::buffer::{PixelBuffer, alloc_plane};
use crate::error::PnmError;

/// Apply `kernel` at every interior pixel of every present grid.
///
/// Each grid is replaced by a new one whose first and last rows and columns
/// are 0. Images narrower or shorter than 3 come out entirely 0.
pub(crate) fn filter_interior(
    buffer: &mut PixelBuffer,
    kernel: fn(&ImgVec<u8>, usize, usize) -> u8,
) -> Result<(), PnmError> {
    let cols = buffer.cols();
    let rows = buffer.rows();
    for plane in buffer.planes_mut() {
        let mut out = alloc_plane(cols, rows)?;
        for y in 1..rows.saturating_sub(1) {
            for x in 1..cols.saturating_sub(1) {
                out[(x, y)] = kernel(plane, x, y);
            }
        }
        *plane = out;
    }
    Ok(())
}

/// One of the six supported transforms.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Operation {
    /// Add a signed amount to every sample.
    Brighten(i32),
    Negate,
    /// Weighted conversion to a single gray channel.
    Grayscale,
    /// Grayscale followed by a min/max stretch.
    Contrast,
    /// 3x3 box blur.
    Smooth,
    /// 4-neighbour sharpen.
    Sharpen,
}

impl Operation {
    /// Look up an operation by selector name, with or without a leading
    /// `--`. `amount` is only used by `brighten` and defaults to 0.
    pub fn from_name(name: &str, amount: Option<i32>) -> Result<Self, PnmError> {
        match name.strip_prefix("--").unwrap_or(name) {
            "brighten" => Ok(Operation::Brighten(amount.unwrap_or(0))),
            "negate" => Ok(Operation::Negate),
            "grayscale" => Ok(Operation::Grayscale),
            "contrast" => Ok(Operation::Contrast),
            "smooth" => Ok(Operation::Smooth),
            "sharpen" => Ok(Operation::Sharpen),
            _ => Err(PnmError::UnknownOperation(name.into())),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Operation::Brighten(_) => "brighten",
            Operation::Negate => "negate",
            Operation::Grayscale => "grayscale",
            Operation::Contrast => "contrast",
            Operation::Smooth => "smooth",
            Operation::Sharpen => "sharpen",
        }
    }

    /// Whether the result always has a single channel.
    pub fn produces_gray(&self) -> bool {
        matches!(self, Operation::Grayscale | Operation::Contrast)
    }

    pub fn apply(&self, buffer: &mut PixelBuffer) -> Result<(), PnmError> {
        debug!("applying {self} to {}x{}", buffer.cols(), buffer.rows());
        match *self {
            Operation::Brighten(delta) => brighten(buffer, delta),
            Operation::Negate => negate(buffer),
            Operation::Grayscale => grayscale(buffer)?,
            Operation::Contrast => contrast(buffer)?,
            Operation::Smooth => smooth(buffer)?,
            Operation::Sharpen => sharpen(buffer)?,
        }
        Ok(())
    }
}

impl FromStr for Operation {
    type Err = PnmError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Operation::from_name(s, None)
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Operation::Brighten(delta) => write!(f, "brighten({delta})"),
            other => f.write_str(other.name()),
        }
    }
}

#[cfg(test)]
mod tests {
    use imgref::ImgVec;

    use super::*;
    use crate::pixel::Encoding;

    fn at(buf: &PixelBuffer, x: usize, y: usize) -> u8 {
        buf.redgray()[(x, y)]
    }

    fn gray(samples: Vec<u8>, cols: usize, rows: usize) -> PixelBuffer {
        PixelBuffer::from_gray(ImgVec::new(samples, cols, rows).as_ref(), Encoding::Ascii).unwrap()
    }

    #[test]
    fn selector_names() {
        assert_eq!(
            Operation::from_name("--brighten", Some(-20)).unwrap(),
            Operation::Brighten(-20)
        );
        assert_eq!("sharpen".parse::<Operation>().unwrap(), Operation::Sharpen);
        assert_eq!("brighten".parse::<Operation>().unwrap(), Operation::Brighten(0));
        assert!(matches!(
            "--blur".parse::<Operation>(),
            Err(PnmError::UnknownOperation(_))
        ));
    }

    #[test]
    fn smooth_3x3() {
        let mut buf = gray((1..=9).map(|v| v * 10).collect(), 3, 3);
        smooth(&mut buf).unwrap();
        // (10 + 20 + ... + 90) / 9 = 50
        assert_eq!(buf.redgray().buf().as_slice(), &[0, 0, 0, 0, 50, 0, 0, 0, 0]);
    }

    #[test]
    fn smooth_truncates() {
        let mut buf = gray(vec![0, 0, 0, 0, 8, 0, 0, 0, 0], 3, 3);
        smooth(&mut buf).unwrap();
        assert_eq!(at(&buf, 1, 1), 0);
    }

    #[test]
    fn sharpen_3x3() {
        let mut buf = gray(vec![9, 10, 9, 20, 30, 40, 9, 50, 9], 3, 3);
        sharpen(&mut buf).unwrap();
        // 5*30 - 10 - 50 - 20 - 40 = 30
        assert_eq!(buf.redgray().buf().as_slice(), &[0, 0, 0, 0, 30, 0, 0, 0, 0]);
    }

    #[test]
    fn sharpen_clamps() {
        let mut buf = gray(vec![0, 255, 0, 255, 10, 255, 0, 255, 0], 3, 3);
        sharpen(&mut buf).unwrap();
        assert_eq!(at(&buf, 1, 1), 0);

        let mut buf = gray(vec![0, 0, 0, 0, 200, 0, 0, 0, 0], 3, 3);
        sharpen(&mut buf).unwrap();
        assert_eq!(at(&buf, 1, 1), 255);
    }

    #[test]
    fn filters_zero_small_images() {
        let mut buf = gray(vec![100; 4], 2, 2);
        smooth(&mut buf).unwrap();
        assert!(buf.redgray().buf().iter().all(|&v| v == 0));

        let mut buf = gray(vec![100; 5], 5, 1);
        sharpen(&mut buf).unwrap();
        assert!(buf.redgray().buf().iter().all(|&v| v == 0));
    }

    #[test]
    fn filters_read_original_neighbours() {
        let mut samples = vec![0u8; 16];
        samples[5] = 90;
        let mut buf = gray(samples, 4, 4);
        smooth(&mut buf).unwrap();
        // Reading the already-written (1,1) would give 1 at (2,1).
        for (x, y) in [(1usize, 1usize), (2, 1), (1, 2), (2, 2)] {
            assert_eq!(at(&buf, x, y), 10, "({x},{y})");
        }
    }

    #[test]
    fn grayscale_twice_is_stable() {
        let mut buf = gray(vec![3, 77, 200], 3, 1);
        grayscale(&mut buf).unwrap();
        grayscale(&mut buf).unwrap();
        assert_eq!(buf.redgray().buf().as_slice(), &[3, 77, 200]);
        assert!(!buf.has_color());
    }
}
