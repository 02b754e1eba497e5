use fragtex_image::{Image, ImageError};

use super::{kernels::GaborParams, FilterError};
use crate::{padding::BorderMode, parallel};

/// Round half to even and saturate to the 8-bit range.
#[inline]
fn saturate_u8(v: f32) -> u8 {
    v.round_ties_even().clamp(0.0, 255.0) as u8
}

/// Apply an arbitrary 2D kernel to an 8-bit image.
///
/// The kernel is correlated with the image (it is not flipped) and anchored at its center.
/// Samples outside the image are taken according to `border`. Sums are accumulated in `f32`
/// and cast back to `u8` by rounding half to even and saturating to `[0, 255]`.
///
/// # Arguments
///
/// * `src` - The source image with shape (H, W, C).
/// * `dst` - The destination image with shape (H, W, C).
/// * `kernel` - The kernel coefficients in row-major order.
/// * `kernel_size` - The size of the kernel (kernel_x, kernel_y), both odd.
/// * `border` - How to extrapolate pixels beyond the image border.
///
/// PRECONDITION: `src` and `dst` must have the same shape.
pub fn filter2d<const C: usize>(
    src: &Image<u8, C>,
    dst: &mut Image<u8, C>,
    kernel: &[f32],
    kernel_size: (usize, usize),
    border: BorderMode,
) -> Result<(), FilterError> {
    if src.size() != dst.size() {
        return Err(ImageError::InvalidImageSize(
            src.cols(),
            src.rows(),
            dst.cols(),
            dst.rows(),
        )
        .into());
    }

    let (kernel_x, kernel_y) = kernel_size;
    for k in [kernel_x, kernel_y] {
        if k == 0 || k % 2 == 0 {
            return Err(FilterError::InvalidKernelSize(k));
        }
    }

    if kernel.len() != kernel_x * kernel_y {
        return Err(FilterError::KernelShapeMismatch(
            kernel.len(),
            kernel_x,
            kernel_y,
        ));
    }

    let cols = src.cols();
    let stride = cols * C;

    // source index of every padded coordinate, None for zero samples
    let col_table = border.index_table(cols, kernel_x, kernel_x / 2);
    let row_table = border.index_table(src.rows(), kernel_y, kernel_y / 2);

    let src_data = src.as_slice();

    parallel::par_for_each_row(dst, |y, dst_row| {
        let mut acc = [0f32; C];
        for (x, dst_pixel) in dst_row.chunks_exact_mut(C).enumerate() {
            acc.fill(0.0);
            for (ky, kernel_row) in kernel.chunks_exact(kernel_x).enumerate() {
                let Some(sy) = row_table[y + ky] else {
                    continue;
                };
                let src_row = &src_data[sy * stride..(sy + 1) * stride];
                for (kx, &k) in kernel_row.iter().enumerate() {
                    let Some(sx) = col_table[x + kx] else {
                        continue;
                    };
                    acc.iter_mut()
                        .zip(&src_row[sx * C..(sx + 1) * C])
                        .for_each(|(a, &p)| *a += p as f32 * k);
                }
            }
            dst_pixel
                .iter_mut()
                .zip(acc.iter())
                .for_each(|(d, &a)| *d = saturate_u8(a));
        }
    });

    Ok(())
}

/// Filter a grayscale image with a Gabor kernel.
///
/// The kernel is built from `params` with a zero phase offset and applied with [`filter2d`].
///
/// # Arguments
///
/// * `src` - The source grayscale image.
/// * `dst` - The destination grayscale image.
/// * `params` - The Gabor kernel parameters.
/// * `border` - How to extrapolate pixels beyond the image border.
///
/// # Example
///
/// ```
/// use fragtex_image::Image;
/// use fragtex_imgproc::filter::{gabor_filter, kernels::GaborParams};
/// use fragtex_imgproc::padding::BorderMode;
///
/// let src = Image::<u8, 1>::from_size_val([8, 6].into(), 0).unwrap();
/// let mut dst = Image::<u8, 1>::from_size_val(src.size(), 0).unwrap();
///
/// gabor_filter(&src, &mut dst, &GaborParams::default(), BorderMode::default()).unwrap();
/// assert_eq!(dst.size(), src.size());
/// ```
pub fn gabor_filter(
    src: &Image<u8, 1>,
    dst: &mut Image<u8, 1>,
    params: &GaborParams,
    border: BorderMode,
) -> Result<(), FilterError> {
    let kernel = params.kernel()?;
    filter2d(
        src,
        dst,
        &kernel,
        (params.kernel_size, params.kernel_size),
        border,
    )
}
