use crate::buffer::PixelBuffer;
use crate::pixel::clamp_sample;

/// Add `delta` to every sample of every present grid, clamping to `0..=255`.
pub fn brighten(buffer: &mut PixelBuffer, delta: i32) {
    let delta = i64::from(delta);
    buffer.planes_mut().for_each(|plane| {
        plane
            .buf_mut()
            .iter_mut()
            .for_each(|x| *x = clamp_sample(i64::from(*x) + delta));
    });
}

#[cfg(test)]
mod tests {
    use imgref::ImgVec;

    use super::*;
    use crate::pixel::Encoding;

    #[test]
    fn clamps_both_ends() {
        let mut buf =
            PixelBuffer::from_gray(ImgVec::new(vec![250u8, 5], 2, 1).as_ref(), Encoding::Ascii)
                .unwrap();
        brighten(&mut buf, 50);
        assert_eq!(buf.redgray().buf().as_slice(), &[255, 55]);
        brighten(&mut buf, -100);
        assert_eq!(buf.redgray().buf().as_slice(), &[155, 0]);
    }
}
