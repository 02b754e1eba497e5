use fragtex_image::ImageError;
use fragtex_imgproc::filter::FilterError;
use fragtex_io::IoError;

/// Why a single image could not be turned into a texture.
#[derive(thiserror::Error, Debug)]
pub enum TextureError {
    /// The file is missing, unreadable or not a decodable image.
    #[error("{0}")]
    Load(#[from] IoError),

    /// Grayscale conversion, kernel construction or filtering failed.
    #[error("{0}")]
    Processing(#[from] FilterError),
}

impl From<ImageError> for TextureError {
    fn from(e: ImageError) -> Self {
        TextureError::Processing(FilterError::Image(e))
    }
}
