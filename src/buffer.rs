//! In-memory image: one gray/red grid plus optional green and blue grids.

use imgref::{ImgRef, ImgVec};
use rgb::RGB8;

use crate::error::PnmError;
use crate::pixel::{Encoding, MagicNumber};

/// Allocate a zero-filled `cols x rows` grid.
///
/// Grids built here are always packed (stride == width), which the codec and
/// the transforms rely on when walking `buf()` directly.
pub(crate) fn alloc_plane(cols: usize, rows: usize) -> Result<ImgVec<u8>, PnmError> {
    let len = cols
        .checked_mul(rows)
        .ok_or(PnmError::Allocation { bytes: usize::MAX })?;
    let mut buf = Vec::new();
    buf.try_reserve_exact(len)
        .map_err(|_| PnmError::Allocation { bytes: len })?;
    buf.resize(len, 0);
    Ok(ImgVec::new(buf, cols, rows))
}

/// Copy a possibly strided view into a packed grid.
fn pack_plane<T: Copy>(src: ImgRef<'_, T>, f: impl Fn(T) -> u8) -> Result<ImgVec<u8>, PnmError> {
    let mut plane = alloc_plane(src.width(), src.height())?;
    let width = src.width();
    if width == 0 {
        return Ok(plane);
    }
    for (dst_row, src_row) in plane.buf_mut().chunks_exact_mut(width).zip(src.rows()) {
        for (dst, &px) in dst_row.iter_mut().zip(src_row) {
            *dst = f(px);
        }
    }
    Ok(plane)
}

#[derive(Clone, Debug)]
struct ColorPlanes {
    green: ImgVec<u8>,
    blue: ImgVec<u8>,
}

/// Decoded image owned by a single pipeline run.
///
/// Green and blue are stored together, so a buffer either has full color
/// data or none at all. Gray input decoded from P2/P5 still carries
/// zero-filled green and blue grids until a grayscale conversion drops them;
/// the magic number, not grid presence, decides the logical channel count.
#[derive(Clone, Debug)]
pub struct PixelBuffer {
    magic: MagicNumber,
    comment: Vec<u8>,
    redgray: ImgVec<u8>,
    color: Option<ColorPlanes>,
}

impl PixelBuffer {
    /// Allocate all three grids for a freshly parsed header.
    pub fn new_allocated(
        magic: MagicNumber,
        comment: Vec<u8>,
        cols: usize,
        rows: usize,
    ) -> Result<Self, PnmError> {
        Ok(Self {
            magic,
            comment,
            redgray: alloc_plane(cols, rows)?,
            color: Some(ColorPlanes {
                green: alloc_plane(cols, rows)?,
                blue: alloc_plane(cols, rows)?,
            }),
        })
    }

    /// Single-channel buffer from gray samples.
    pub fn from_gray(img: ImgRef<'_, u8>, encoding: Encoding) -> Result<Self, PnmError> {
        Ok(Self {
            magic: gray_tag(encoding),
            comment: Vec::new(),
            redgray: pack_plane(img, |v| v)?,
            color: None,
        })
    }

    /// Three-channel buffer from interleaved RGB pixels.
    pub fn from_rgb8(img: ImgRef<'_, RGB8>, encoding: Encoding) -> Result<Self, PnmError> {
        let magic = match encoding {
            Encoding::Ascii => MagicNumber::AsciiColor,
            Encoding::Binary => MagicNumber::BinaryColor,
        };
        Ok(Self {
            magic,
            comment: Vec::new(),
            redgray: pack_plane(img, |px| px.r)?,
            color: Some(ColorPlanes {
                green: pack_plane(img, |px| px.g)?,
                blue: pack_plane(img, |px| px.b)?,
            }),
        })
    }

    /// Replace the comment block. Each line should carry its leading `\n`.
    pub fn with_comment(mut self, comment: impl Into<Vec<u8>>) -> Self {
        self.comment = comment.into();
        self
    }

    pub fn magic(&self) -> MagicNumber {
        self.magic
    }

    /// Header comment lines, each preceded by `\n`, byte for byte as read.
    /// Comments are not required to be UTF-8.
    pub fn comment(&self) -> &[u8] {
        &self.comment
    }

    pub fn cols(&self) -> usize {
        self.redgray.width()
    }

    pub fn rows(&self) -> usize {
        self.redgray.height()
    }

    /// Logical channel count implied by the magic number.
    pub fn channels(&self) -> usize {
        self.magic.channels()
    }

    pub fn has_color(&self) -> bool {
        self.color.is_some()
    }

    pub fn redgray(&self) -> &ImgVec<u8> {
        &self.redgray
    }

    pub fn redgray_mut(&mut self) -> &mut ImgVec<u8> {
        &mut self.redgray
    }

    pub fn green(&self) -> Option<&ImgVec<u8>> {
        self.color.as_ref().map(|c| &c.green)
    }

    pub fn blue(&self) -> Option<&ImgVec<u8>> {
        self.color.as_ref().map(|c| &c.blue)
    }

    /// Mutable access to the three grids at once, when color is present.
    pub(crate) fn rgb_planes_mut(&mut self) -> Option<[&mut ImgVec<u8>; 3]> {
        let color = self.color.as_mut()?;
        Some([&mut self.redgray, &mut color.green, &mut color.blue])
    }

    /// Every present grid, red/gray first.
    pub fn planes(&self) -> impl Iterator<Item = &ImgVec<u8>> {
        let color = self.color.as_ref().map(|c| [&c.green, &c.blue]);
        core::iter::once(&self.redgray).chain(color.into_iter().flatten())
    }

    /// Every present grid, red/gray first.
    pub fn planes_mut(&mut self) -> impl Iterator<Item = &mut ImgVec<u8>> {
        let color = self.color.as_mut().map(|c| [&mut c.green, &mut c.blue]);
        core::iter::once(&mut self.redgray).chain(color.into_iter().flatten())
    }

    /// Swap in a new gray grid, free the color grids and retag as gray.
    pub(crate) fn replace_with_gray(&mut self, gray: ImgVec<u8>) {
        debug_assert_eq!(gray.width(), self.cols());
        debug_assert_eq!(gray.height(), self.rows());
        self.redgray = gray;
        self.color = None;
        self.magic = self.magic.to_gray();
    }

    /// Interleave the three grids into RGB pixels.
    ///
    /// Returns `None` when the buffer has no color grids.
    pub fn to_rgb8(&self) -> Option<ImgVec<RGB8>> {
        let color = self.color.as_ref()?;
        let pixels = self
            .redgray
            .buf()
            .iter()
            .zip(color.green.buf())
            .zip(color.blue.buf())
            .map(|((&r, &g), &b)| RGB8::new(r, g, b))
            .collect();
        Some(ImgVec::new(pixels, self.cols(), self.rows()))
    }
}

fn gray_tag(encoding: Encoding) -> MagicNumber {
    match encoding {
        Encoding::Ascii => MagicNumber::AsciiGray,
        Encoding::Binary => MagicNumber::BinaryGray,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn allocated_buffer_has_three_zeroed_grids() {
        let buf = PixelBuffer::new_allocated(MagicNumber::AsciiGray, Vec::new(), 4, 2).unwrap();
        assert_eq!(buf.cols(), 4);
        assert_eq!(buf.rows(), 2);
        assert_eq!(buf.planes().count(), 3);
        assert!(buf.planes().all(|p| p.buf().iter().all(|&v| v == 0)));
        assert_eq!(buf.channels(), 1);
    }

    #[test]
    fn replace_with_gray_drops_color_and_retags() {
        let px = vec![RGB8::new(1, 2, 3); 6];
        let mut buf =
            PixelBuffer::from_rgb8(ImgVec::new(px, 3, 2).as_ref(), Encoding::Binary).unwrap();
        assert!(buf.has_color());
        buf.replace_with_gray(alloc_plane(3, 2).unwrap());
        assert!(!buf.has_color());
        assert!(buf.green().is_none() && buf.blue().is_none());
        assert_eq!(buf.magic(), MagicNumber::BinaryGray);
        assert!(buf.to_rgb8().is_none());
    }

    #[test]
    fn rgb8_interleave_matches_input() {
        let px = vec![RGB8::new(10, 20, 30), RGB8::new(40, 50, 60)];
        let buf = PixelBuffer::from_rgb8(ImgVec::new(px.clone(), 2, 1).as_ref(), Encoding::Ascii)
            .unwrap();
        assert_eq!(buf.redgray().buf().as_slice(), &[10, 40]);
        assert_eq!(buf.blue().unwrap().buf().as_slice(), &[30, 60]);
        assert_eq!(buf.to_rgb8().unwrap().buf().as_slice(), &px[..]);
    }
}
