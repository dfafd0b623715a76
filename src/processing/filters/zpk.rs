// src/processing/filters/zpk.rs
//! Zero/pole/gain representation and polynomial expansion

use rustfft::num_complex::Complex64;

use super::IirCoefficients;

/// Filter described by its roots and overall gain
#[derive(Debug, Clone, PartialEq)]
pub struct ZpkFilter {
    pub zeros: Vec<Complex64>,
    pub poles: Vec<Complex64>,
    pub gain: f64,
}

impl ZpkFilter {
    pub fn new(zeros: Vec<Complex64>, poles: Vec<Complex64>, gain: f64) -> Self {
        Self { zeros, poles, gain }
    }

    /// Excess of poles over zeros
    pub fn relative_degree(&self) -> usize {
        self.poles.len().saturating_sub(self.zeros.len())
    }

    /// Expand to `b = gain * poly(zeros)`, `a = poly(poles)`
    ///
    /// Roots come in conjugate pairs for every filter built here, so the
    /// imaginary parts left over by the expansion are rounding noise and
    /// are dropped.
    pub fn to_transfer_function(&self) -> IirCoefficients {
        let b = poly(&self.zeros)
            .into_iter()
            .map(|c| self.gain * c.re)
            .collect();
        let a = poly(&self.poles).into_iter().map(|c| c.re).collect();
        IirCoefficients::normalized(b, a)
    }
}

/// Monic polynomial with the given roots, highest power first
pub fn poly(roots: &[Complex64]) -> Vec<Complex64> {
    let mut coefficients = Vec::with_capacity(roots.len() + 1);
    coefficients.push(Complex64::new(1.0, 0.0));

    // Multiply in one (x - r) factor at a time
    for &root in roots {
        coefficients.push(Complex64::new(0.0, 0.0));
        for i in (1..coefficients.len()).rev() {
            let previous = coefficients[i - 1];
            coefficients[i] -= root * previous;
        }
    }

    coefficients
}

/// Product of `(point - root)` over all roots
pub fn product_of_differences(point: Complex64, roots: &[Complex64]) -> Complex64 {
    roots
        .iter()
        .fold(Complex64::new(1.0, 0.0), |acc, &root| acc * (point - root))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_close(actual: f64, expected: f64) {
        assert!((actual - expected).abs() < 1e-12, "{} != {}", actual, expected);
    }

    #[test]
    fn test_poly_expands_real_roots() {
        // (x - 1)(x - 2) = x^2 - 3x + 2
        let coefficients = poly(&[Complex64::new(1.0, 0.0), Complex64::new(2.0, 0.0)]);
        let real: Vec<f64> = coefficients.iter().map(|c| c.re).collect();
        assert_eq!(real, vec![1.0, -3.0, 2.0]);
    }

    #[test]
    fn test_poly_conjugate_pair_is_real() {
        // (x - j)(x + j) = x^2 + 1
        let coefficients = poly(&[Complex64::new(0.0, 1.0), Complex64::new(0.0, -1.0)]);
        assert_close(coefficients[0].re, 1.0);
        assert_close(coefficients[1].re, 0.0);
        assert_close(coefficients[2].re, 1.0);
        assert!(coefficients.iter().all(|c| c.im.abs() < 1e-12));
    }

    #[test]
    fn test_poly_of_no_roots_is_constant() {
        assert_eq!(poly(&[]), vec![Complex64::new(1.0, 0.0)]);
    }

    #[test]
    fn test_transfer_function_applies_gain_to_numerator_only() {
        let zpk = ZpkFilter::new(
            vec![Complex64::new(-1.0, 0.0)],
            vec![Complex64::new(0.5, 0.0)],
            0.25,
        );
        let coefficients = zpk.to_transfer_function();
        assert_eq!(coefficients.b, vec![0.25, 0.25]);
        assert_eq!(coefficients.a, vec![1.0, -0.5]);
        assert_eq!(zpk.relative_degree(), 0);
    }
}
