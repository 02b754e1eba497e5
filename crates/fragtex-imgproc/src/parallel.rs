use rayon::{
    iter::{IndexedParallelIterator, ParallelIterator},
    slice::{ParallelSlice, ParallelSliceMut},
};

use fragtex_image::Image;

/// Apply a function to each pixel in the image in parallel by rows.
///
/// PRECONDITION: `src` and `dst` must have the same size.
pub fn par_iter_rows<T1, const C1: usize, T2, const C2: usize>(
    src: &Image<T1, C1>,
    dst: &mut Image<T2, C2>,
    f: impl Fn(&[T1], &mut [T2]) + Send + Sync,
) where
    T1: Send + Sync,
    T2: Send + Sync,
{
    // chunk sizes must be non-zero
    if src.cols() == 0 || src.rows() == 0 {
        return;
    }

    src.as_slice()
        .par_chunks_exact(C1 * src.cols())
        .zip(dst.as_slice_mut().par_chunks_exact_mut(C2 * src.cols()))
        .for_each(|(src_chunk, dst_chunk)| {
            src_chunk
                .chunks_exact(C1)
                .zip(dst_chunk.chunks_exact_mut(C2))
                .for_each(|(src_pixel, dst_pixel)| {
                    f(src_pixel, dst_pixel);
                });
        });
}

/// Apply a function to each row of the destination image in parallel.
///
/// The closure receives the row index and the mutable row slice of length `cols * C`.
pub fn par_for_each_row<T, const C: usize>(
    dst: &mut Image<T, C>,
    f: impl Fn(usize, &mut [T]) + Send + Sync,
) where
    T: Send + Sync,
{
    let cols = dst.cols();
    if cols == 0 || dst.rows() == 0 {
        return;
    }

    dst.as_slice_mut()
        .par_chunks_exact_mut(C * cols)
        .enumerate()
        .for_each(|(row, dst_row)| f(row, dst_row));
}

#[cfg(test)]
mod tests {
    use super::*;
    use fragtex_image::ImageError;

    #[test]
    fn par_iter_rows_maps_every_pixel() -> Result<(), ImageError> {
        let src = Image::<u8, 2>::new([3, 2].into(), vec![1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12])?;
        let mut dst = Image::<u8, 1>::from_size_val(src.size(), 0)?;

        par_iter_rows(&src, &mut dst, |s, d| d[0] = s[0] + s[1]);

        assert_eq!(dst.as_slice(), &[3, 7, 11, 15, 19, 23]);
        Ok(())
    }

    #[test]
    fn par_for_each_row_passes_row_index() -> Result<(), ImageError> {
        let mut dst = Image::<usize, 1>::from_size_val([2, 3].into(), 0)?;

        par_for_each_row(&mut dst, |row, data| data.iter_mut().for_each(|v| *v = row));

        assert_eq!(dst.as_slice(), &[0, 0, 1, 1, 2, 2]);
        Ok(())
    }

    #[test]
    fn empty_images_are_noop() -> Result<(), ImageError> {
        let src = Image::<u8, 3>::new([0, 4].into(), vec![])?;
        let mut dst = Image::<u8, 1>::new([0, 4].into(), vec![])?;

        par_iter_rows(&src, &mut dst, |_, d| d[0] = 1);
        par_for_each_row(&mut dst, |_, _| unreachable!());

        assert!(dst.as_slice().is_empty());
        Ok(())
    }
}
