//! Direct-form IIR filtering
//!
//! A single forward pass with zero initial state. No zero-phase
//! correction is applied, so group delay near the band edges is kept.

use crate::design::ButterworthFilter;
use crate::error::Result;
use crate::types::{FilterCoefficients, FilterSpec};

/// Transfer-function filter (Direct Form II Transposed)
#[derive(Debug, Clone)]
pub struct LinearFilter {
    b: Vec<f64>,
    a: Vec<f64>,
    state: Vec<f64>,
}

impl LinearFilter {
    /// Build a filter from coefficients, normalizing by `a[0]`.
    /// Shorter coefficient sequences are zero padded.
    pub fn new(coeffs: &FilterCoefficients) -> Self {
        let len = coeffs.b().len().max(coeffs.a().len());
        let a0 = coeffs.a()[0];

        let mut b: Vec<f64> = coeffs.b().iter().map(|v| v / a0).collect();
        let mut a: Vec<f64> = coeffs.a().iter().map(|v| v / a0).collect();
        b.resize(len, 0.0);
        a.resize(len, 0.0);

        Self {
            b,
            a,
            state: vec![0.0; len - 1],
        }
    }

    /// Process a single sample
    #[inline]
    pub fn process(&mut self, input: f64) -> f64 {
        if self.state.is_empty() {
            return self.b[0] * input;
        }

        let output = self.b[0] * input + self.state[0];
        let last = self.state.len() - 1;
        for j in 0..last {
            self.state[j] = self.b[j + 1] * input + self.state[j + 1] - self.a[j + 1] * output;
        }
        self.state[last] = self.b[last + 1] * input - self.a[last + 1] * output;
        output
    }

    /// Process a signal and return a new array (original unchanged)
    pub fn filter(&mut self, signal: &[f64]) -> Vec<f64> {
        signal.iter().map(|&s| self.process(s)).collect()
    }

    /// Reset filter state
    pub fn reset(&mut self) {
        self.state.iter_mut().for_each(|z| *z = 0.0);
    }
}

/// Filter `input` with `coeffs` starting from rest.
///
/// The output has the same length as the input.
pub fn lfilter(coeffs: &FilterCoefficients, input: &[f64]) -> Vec<f64> {
    LinearFilter::new(coeffs).filter(input)
}

/// Design a Butterworth bandpass for `spec` and apply it to `input`.
pub fn bandpass_filter(input: &[f64], spec: &FilterSpec) -> Result<Vec<f64>> {
    let coeffs = ButterworthFilter::bandpass(spec)?;
    Ok(lfilter(&coeffs, input))
}
