use std::f64::consts::PI;

use super::FilterError;

/// Parameters of a square Gabor kernel.
///
/// The defaults match the fragment texture pipeline: a 31x31 kernel oriented at 45 degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GaborParams {
    /// Side length of the square kernel. Must be odd.
    pub kernel_size: usize,
    /// Standard deviation of the gaussian envelope.
    pub sigma: f64,
    /// Orientation of the sinusoid, in radians.
    pub theta: f64,
    /// Wavelength of the sinusoid, in pixels.
    pub lambda: f64,
    /// Spatial aspect ratio of the gaussian envelope.
    pub gamma: f64,
}

impl Default for GaborParams {
    fn default() -> Self {
        Self {
            kernel_size: 31,
            sigma: 5.0,
            theta: PI / 4.0,
            lambda: 10.0,
            gamma: 0.5,
        }
    }
}

impl GaborParams {
    /// Check that every parameter is inside its domain.
    pub fn validate(&self) -> Result<(), FilterError> {
        if self.kernel_size == 0 || self.kernel_size % 2 == 0 {
            return Err(FilterError::InvalidKernelSize(self.kernel_size));
        }
        check_positive("sigma", self.sigma)?;
        check_positive("lambda", self.lambda)?;
        check_positive("gamma", self.gamma)?;
        if !self.theta.is_finite() {
            return Err(FilterError::InvalidParameter {
                name: "theta",
                value: self.theta,
            });
        }
        Ok(())
    }

    /// Build the kernel with a zero phase offset.
    pub fn kernel(&self) -> Result<Vec<f32>, FilterError> {
        gabor_kernel_2d(
            self.kernel_size,
            self.sigma,
            self.theta,
            self.lambda,
            self.gamma,
            0.0,
        )
    }
}

fn check_positive(name: &'static str, value: f64) -> Result<(), FilterError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(FilterError::InvalidParameter { name, value })
    }
}

/// Create a 2D Gabor kernel.
///
/// The kernel is the product of a gaussian envelope and a cosine plane wave:
///
/// g(x, y) = exp(-(x'^2 + gamma^2 y'^2) / (2 sigma^2)) * cos(2 pi x' / lambda + psi)
///
/// with x' = x cos(theta) + y sin(theta) and y' = -x sin(theta) + y cos(theta).
/// Coefficients are not normalized.
///
/// # Arguments
///
/// * `kernel_size` - The side length of the square kernel, must be odd.
/// * `sigma` - The standard deviation of the gaussian envelope.
/// * `theta` - The orientation of the normal to the stripes, in radians.
/// * `lambda` - The wavelength of the sinusoidal factor.
/// * `gamma` - The spatial aspect ratio.
/// * `psi` - The phase offset.
///
/// # Returns
///
/// The kernel coefficients in row-major order, `kernel_size * kernel_size` values.
///
/// # Example
///
/// ```
/// use fragtex_imgproc::filter::kernels::gabor_kernel_2d;
///
/// let kernel = gabor_kernel_2d(3, 1.0, 0.0, 4.0, 1.0, 0.0).unwrap();
/// assert_eq!(kernel.len(), 9);
/// assert_eq!(kernel[4], 1.0);
/// ```
pub fn gabor_kernel_2d(
    kernel_size: usize,
    sigma: f64,
    theta: f64,
    lambda: f64,
    gamma: f64,
    psi: f64,
) -> Result<Vec<f32>, FilterError> {
    GaborParams {
        kernel_size,
        sigma,
        theta,
        lambda,
        gamma,
    }
    .validate()?;
    if !psi.is_finite() {
        return Err(FilterError::InvalidParameter {
            name: "psi",
            value: psi,
        });
    }

    let half = (kernel_size / 2) as isize;
    let sigma_x = sigma;
    let sigma_y = sigma / gamma;
    let ex = -0.5 / (sigma_x * sigma_x);
    let ey = -0.5 / (sigma_y * sigma_y);
    let (s, c) = theta.sin_cos();
    let cscale = 2.0 * PI / lambda;

    let mut kernel = vec![0f32; kernel_size * kernel_size];

    // the kernel is stored mirrored: tap (x, y) lands at [half - y][half - x]
    for y in -half..=half {
        for x in -half..=half {
            let xr = x as f64 * c + y as f64 * s;
            let yr = -(x as f64) * s + y as f64 * c;
            let v = (ex * xr * xr + ey * yr * yr).exp() * (cscale * xr + psi).cos();
            let row = (half - y) as usize;
            let col = (half - x) as usize;
            kernel[row * kernel_size + col] = v as f32;
        }
    }

    Ok(kernel)
}
