use fragtex_image::ImageError;

/// An error type for the filter module.
#[derive(thiserror::Error, Debug, PartialEq)]
pub enum FilterError {
    /// The kernel extent is zero or even, so it has no well-defined center.
    #[error("Kernel size must be odd and positive, got {0}")]
    InvalidKernelSize(usize),

    /// A filter parameter is out of its valid domain.
    #[error("Invalid value for filter parameter `{name}`: {value}")]
    InvalidParameter {
        /// Name of the parameter.
        name: &'static str,
        /// The rejected value.
        value: f64,
    },

    /// The kernel coefficients do not match the declared kernel size.
    #[error("Kernel length ({0}) does not match the kernel size ({1}x{2})")]
    KernelShapeMismatch(usize, usize, usize),

    /// Error coming from the image containers.
    #[error(transparent)]
    Image(#[from] ImageError),
}
