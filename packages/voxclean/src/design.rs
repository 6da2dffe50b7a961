//! Butterworth Bandpass Design
//!
//! Zeros, poles and gain come from `iir_filters` (analog prototype,
//! lowpass-to-bandpass and bilinear transform); this module expands them
//! into transfer-function coefficients.

use crate::error::{Result, VoxError};
use crate::types::{FilterCoefficients, FilterSpec};
use iir_filters::filter_design::{butter, FilterType};
use num_complex::Complex64;

/// Prototype order used when a caller does not pick one
pub const DEFAULT_DESIGN_ORDER: u32 = 5;

/// Butterworth filter designer
pub struct ButterworthFilter;

impl ButterworthFilter {
    /// Design a bandpass filter for `spec`.
    ///
    /// The result carries `2 * order + 1` feed-forward and feedback
    /// coefficients with `a[0] == 1`.
    pub fn bandpass(spec: &FilterSpec) -> Result<FilterCoefficients> {
        spec.validate()?;

        let zpk = butter(
            spec.order,
            FilterType::BandPass(spec.lowcut, spec.highcut),
            spec.sample_rate,
        )
        .map_err(|e| {
            VoxError::InvalidSpecification(format!("Butterworth design failed: {}", e))
        })?;

        let coeffs = Self::zpk_to_tf(&zpk.z, &zpk.p, zpk.k)?;
        log::debug!(
            "Butterworth bandpass {}-{} Hz @ {} Hz, order {}: {} coefficients",
            spec.lowcut,
            spec.highcut,
            spec.sample_rate,
            spec.order,
            coeffs.b().len()
        );
        Ok(coeffs)
    }

    /// Expand zeros and poles into polynomial coefficients
    fn zpk_to_tf(
        zeros: &[Complex64],
        poles: &[Complex64],
        gain: f64,
    ) -> Result<FilterCoefficients> {
        let b = poly(zeros).into_iter().map(|c| c.re * gain).collect();
        let a = poly(poles).into_iter().map(|c| c.re).collect();
        FilterCoefficients::new(b, a)
    }
}

/// Coefficients of the monic polynomial with the given roots, highest power first
fn poly(roots: &[Complex64]) -> Vec<Complex64> {
    let mut coeffs = vec![Complex64::new(1.0, 0.0)];
    for root in roots {
        let mut next = vec![Complex64::new(0.0, 0.0); coeffs.len() + 1];
        for (i, c) in coeffs.iter().enumerate() {
            next[i] += *c;
            next[i + 1] -= *c * *root;
        }
        coeffs = next;
    }
    coeffs
}

/// Design a Butterworth bandpass filter.
///
/// # Arguments
/// * `lowcut` - Low cutoff (Hz)
/// * `highcut` - High cutoff (Hz)
/// * `sample_rate` - Sampling rate (Hz)
/// * `order` - Prototype order (see [`DEFAULT_DESIGN_ORDER`])
pub fn butter_bandpass(
    lowcut: f64,
    highcut: f64,
    sample_rate: f64,
    order: u32,
) -> Result<FilterCoefficients> {
    ButterworthFilter::bandpass(&FilterSpec::new(lowcut, highcut, sample_rate, order))
}
