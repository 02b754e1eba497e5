use crate::parallel;
use fragtex_image::{Image, ImageError};

/// Fixed-point luminance weights, scaled by 2^14.
const RW: u32 = 4899;
const GW: u32 = 9617;
const BW: u32 = 1868;
const SHIFT: u32 = 14;
const HALF: u32 = 1 << (SHIFT - 1);

/// Convert an RGB8 image to grayscale using the formula:
///
/// Y = 0.299 * R + 0.587 * G + 0.114 * B
///
/// The weights are evaluated in 14-bit fixed point and rounded to the nearest integer.
///
/// # Arguments
///
/// * `src` - The input RGB8 image.
/// * `dst` - The output grayscale image.
///
/// Precondition: the input and output images must have the same size.
///
/// # Example
///
/// ```
/// use fragtex_image::{Image, ImageSize};
/// use fragtex_imgproc::color::gray_from_rgb_u8;
///
/// let image = Image::<u8, 3>::new(
///     ImageSize {
///         width: 2,
///         height: 1,
///     },
///     vec![255, 255, 255, 0, 0, 0],
/// )
/// .unwrap();
///
/// let mut gray = Image::<u8, 1>::from_size_val(image.size(), 0).unwrap();
///
/// gray_from_rgb_u8(&image, &mut gray).unwrap();
/// assert_eq!(gray.as_slice(), &[255, 0]);
/// ```
pub fn gray_from_rgb_u8(src: &Image<u8, 3>, dst: &mut Image<u8, 1>) -> Result<(), ImageError> {
    if src.size() != dst.size() {
        return Err(ImageError::InvalidImageSize(
            src.cols(),
            src.rows(),
            dst.cols(),
            dst.rows(),
        ));
    }

    parallel::par_iter_rows(src, dst, |src_pixel, dst_pixel| {
        let r = src_pixel[0] as u32;
        let g = src_pixel[1] as u32;
        let b = src_pixel[2] as u32;
        dst_pixel[0] = ((r * RW + g * GW + b * BW + HALF) >> SHIFT) as u8;
    });

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gray_from_rgb_u8_primaries() -> Result<(), ImageError> {
        let image = Image::<u8, 3>::new(
            [4, 1].into(),
            vec![255, 0, 0, 0, 255, 0, 0, 0, 255, 128, 128, 128],
        )?;
        let mut gray = Image::<u8, 1>::from_size_val(image.size(), 0)?;

        gray_from_rgb_u8(&image, &mut gray)?;

        // 0.299 * 255, 0.587 * 255, 0.114 * 255 rounded
        assert_eq!(gray.as_slice(), &[76, 150, 29, 128]);
        Ok(())
    }

    #[test]
    fn gray_from_rgb_u8_size_mismatch() -> Result<(), ImageError> {
        let image = Image::<u8, 3>::from_size_val([2, 2].into(), 0)?;
        let mut gray = Image::<u8, 1>::from_size_val([3, 2].into(), 0)?;

        let res = gray_from_rgb_u8(&image, &mut gray);
        assert_eq!(res, Err(ImageError::InvalidImageSize(2, 2, 3, 2)));
        Ok(())
    }
}
