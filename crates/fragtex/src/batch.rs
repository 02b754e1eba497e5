use std::path::{Path, PathBuf};

use fragtex_image::Image;
use fragtex_io::{png::write_image_png_gray8, IoError};

use crate::{
    config::BatchConfig,
    discovery::find_images,
    texture::{extract_texture, TextureOutput},
};

/// What a batch run did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BatchOutcome {
    /// No file matched the pattern; nothing was created.
    NoInputs,
    /// Every matching file was visited.
    Completed {
        /// Paths of the textures written, in processing order.
        written: Vec<PathBuf>,
        /// File names of the inputs that produced no texture.
        failed: Vec<String>,
    },
}

/// Filter every matching image under the configured root and write the textures.
///
/// Files are processed one after the other in file name order. A file that cannot be
/// loaded, filtered or saved is logged and skipped; the run always visits every file.
/// The output directory is created on the first successful texture only.
pub fn run_batch(config: &BatchConfig) -> BatchOutcome {
    let image_paths = find_images(&config.root_dir, &config.pattern);

    if image_paths.is_empty() {
        log::warn!(
            "No images matching '{}' found in directory: {}",
            config.pattern,
            config.root_dir.display()
        );
        return BatchOutcome::NoInputs;
    }

    log::info!("Starting processing of {} images...", image_paths.len());
    log::debug!(
        "Gabor parameters: {:?}, border: {}",
        config.gabor,
        config.border
    );

    let output_dir = config.naming.output_dir(&config.root_dir);
    let mut written = Vec::new();
    let mut failed = Vec::new();

    for image_path in image_paths {
        let TextureOutput { file_name, result } =
            extract_texture(&image_path, &config.gabor, config.border);

        // failures are already logged by the texture step
        let Ok(texture) = result else {
            failed.push(file_name);
            continue;
        };

        log::info!(
            "Texture extracted from {file_name} (shape: ({}, {}))",
            texture.height(),
            texture.width()
        );

        let output_path = config.naming.output_path(&config.root_dir, &file_name);
        match save_texture(&output_dir, &output_path, &texture) {
            Ok(()) => {
                log::info!("Texture image saved: {}", output_path.display());
                written.push(output_path);
            }
            Err(e) => {
                log::error!("Failed to save the texture of {file_name}: {e}");
                failed.push(file_name);
            }
        }
    }

    log::info!("Processing finished.");

    BatchOutcome::Completed { written, failed }
}

fn save_texture(
    output_dir: &Path,
    output_path: &Path,
    texture: &Image<u8, 1>,
) -> Result<(), IoError> {
    std::fs::create_dir_all(output_dir)?;
    write_image_png_gray8(output_path, texture)
}
