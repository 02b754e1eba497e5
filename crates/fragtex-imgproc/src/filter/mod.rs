//! Filter operations
//!
//! This module provides the Gabor kernel and the generic 2D filter used to apply it.

/// Filter kernels
pub mod kernels;

mod error;
pub use error::FilterError;

/// Filter operations
mod ops;
pub use ops::*;
