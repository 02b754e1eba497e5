use std::path::Path;

use fragtex_image::Image;
use fragtex_imgproc::{
    color::gray_from_rgb_u8,
    filter::{gabor_filter, kernels::GaborParams},
    padding::BorderMode,
};
use fragtex_io::functional::read_image_any_rgb8;

use crate::error::TextureError;

/// The outcome of the texture step for one input file.
#[derive(Debug)]
pub struct TextureOutput {
    /// File name of the input, without its directory.
    pub file_name: String,
    /// The filtered grayscale image, or the reason it could not be produced.
    pub result: Result<Image<u8, 1>, TextureError>,
}

/// Load an image, convert it to grayscale and filter it with a Gabor kernel.
///
/// Failures are logged with the offending path and returned in [`TextureOutput::result`];
/// this function never panics on bad input and writes no files.
///
/// # Arguments
///
/// * `image_path` - The path to the input image.
/// * `params` - The Gabor kernel parameters.
/// * `border` - How the filter extrapolates pixels beyond the image border.
pub fn extract_texture(
    image_path: &Path,
    params: &GaborParams,
    border: BorderMode,
) -> TextureOutput {
    let file_name = image_path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default();

    let result = filter_image(image_path, params, border);
    match &result {
        Ok(_) => {}
        Err(TextureError::Load(e)) => {
            log::error!("Failed to load image {}: {e}", image_path.display());
        }
        Err(e @ TextureError::Processing(_)) => {
            log::error!(
                "An error occurred while processing {}: {e}",
                image_path.display()
            );
        }
    }

    TextureOutput { file_name, result }
}

fn filter_image(
    image_path: &Path,
    params: &GaborParams,
    border: BorderMode,
) -> Result<Image<u8, 1>, TextureError> {
    let rgb = read_image_any_rgb8(image_path)?;

    let mut gray = Image::<u8, 1>::from_size_val(rgb.size(), 0)?;
    gray_from_rgb_u8(&rgb, &mut gray)?;

    // the kernel is rebuilt for every image
    let mut texture = Image::<u8, 1>::from_size_val(gray.size(), 0)?;
    gabor_filter(&gray, &mut texture, params, border)?;

    Ok(texture)
}
