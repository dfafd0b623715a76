//! Sample type coercion
//!
//! Filter design and application run in double precision regardless of how
//! the caller stores samples. Integer ADC counts in particular are converted
//! up front so no design step ever sees integer arithmetic.

use ndarray::{Array1, ArrayView1};

/// Convert any losslessly widenable numeric slice into `f64` samples
pub fn to_f64_samples<T: Copy + Into<f64>>(samples: &[T]) -> Vec<f64> {
    samples.iter().map(|&v| v.into()).collect()
}

/// One-dimensional sample containers the pipeline accepts
pub trait AsSamples {
    fn to_f64_vec(&self) -> Vec<f64>;
}

impl<T: Copy + Into<f64>> AsSamples for [T] {
    fn to_f64_vec(&self) -> Vec<f64> {
        to_f64_samples(self)
    }
}

impl<T: Copy + Into<f64>, const N: usize> AsSamples for [T; N] {
    fn to_f64_vec(&self) -> Vec<f64> {
        to_f64_samples(self)
    }
}

impl<T: Copy + Into<f64>> AsSamples for Vec<T> {
    fn to_f64_vec(&self) -> Vec<f64> {
        to_f64_samples(self)
    }
}

impl<'a, T: Copy + Into<f64>> AsSamples for ArrayView1<'a, T> {
    fn to_f64_vec(&self) -> Vec<f64> {
        self.iter().map(|&v| v.into()).collect()
    }
}

impl<T: Copy + Into<f64>> AsSamples for Array1<T> {
    fn to_f64_vec(&self) -> Vec<f64> {
        self.view().to_f64_vec()
    }
}
