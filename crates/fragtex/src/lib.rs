#![deny(missing_docs)]
#![doc = include_str!(concat!("../", env!("CARGO_PKG_README")))]

/// Batch runner over a directory of fragment images.
pub mod batch;

/// Layered configuration: defaults, JSON file and command line.
pub mod config;

/// Discovery of the input images.
pub mod discovery;

/// Output file naming.
pub mod naming;

/// Per-image texture extraction.
pub mod texture;

mod error;

pub use crate::batch::{run_batch, BatchOutcome};
pub use crate::config::{BatchConfig, ConfigError, ConfigLayer};
pub use crate::error::TextureError;
pub use crate::texture::{extract_texture, TextureOutput};

#[doc(inline)]
pub use fragtex_image as image;

#[doc(inline)]
pub use fragtex_imgproc as imgproc;

#[doc(inline)]
pub use fragtex_io as io;
