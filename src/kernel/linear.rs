//! Linear kernel implementation

use crate::core::FeatureVector;
use crate::kernel::Kernel;

/// Linear kernel: K(x, y) = x^T * y
#[derive(Debug, Clone, Copy, Default)]
pub struct LinearKernel;

impl LinearKernel {
    /// Create a new linear kernel
    pub fn new() -> Self {
        Self
    }
}

impl Kernel for LinearKernel {
    fn compute(&self, x: &FeatureVector, y: &FeatureVector) -> f64 {
        dot_product(x.as_slice(), y.as_slice())
    }
}

/// Dot product of two equally sized dense vectors
pub(crate) fn dot_product(x: &[f64], y: &[f64]) -> f64 {
    x.iter().zip(y).map(|(a, b)| a * b).sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fv(values: [f64; 8]) -> FeatureVector {
        FeatureVector::new(values).unwrap()
    }

    #[test]
    fn test_linear_kernel_basic() {
        let kernel = LinearKernel::new();

        let x = fv([1.0, 0.0, 2.0, 0.0, 3.0, 0.0, 0.0, 0.0]);
        let y = fv([0.0, 1.0, 2.0, 3.0, 0.0, 0.0, 0.0, 0.0]);

        // Only index 2 overlaps: 2.0 * 2.0 = 4.0
        assert_eq!(kernel.compute(&x, &y), 4.0);
    }

    #[test]
    fn test_linear_kernel_identical() {
        let kernel = LinearKernel::new();

        let x = fv([1.0, 2.0, 3.0, 0.0, 0.0, 0.0, 0.0, 0.0]);

        // x^T * x = 1^2 + 2^2 + 3^2 = 14
        assert_eq!(kernel.compute(&x, &x), 14.0);
        assert_eq!(kernel.compute(&x, &x), x.norm_squared());
    }

    #[test]
    fn test_linear_kernel_symmetric() {
        let kernel = LinearKernel::new();

        let x = fv([1.0, -2.0, 0.5, 4.0, 0.0, 1.5, -0.3, 2.0]);
        let y = fv([-1.0, 0.5, 2.0, 0.0, 3.0, 1.0, 0.7, -2.0]);

        assert_eq!(kernel.compute(&x, &y), kernel.compute(&y, &x));
    }

    #[test]
    fn test_dot_product_orthogonal() {
        assert_eq!(dot_product(&[1.0, 0.0], &[0.0, 1.0]), 0.0);
        assert_eq!(dot_product(&[], &[]), 0.0);
    }
}
