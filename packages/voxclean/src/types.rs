use crate::error::{Result, VoxError};
use serde::{Deserialize, Serialize};

/// Band edges and order for a Butterworth bandpass design
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FilterSpec {
    /// Low cutoff in Hz
    pub lowcut: f64,
    /// High cutoff in Hz
    pub highcut: f64,
    /// Sampling rate in Hz
    pub sample_rate: f64,
    /// Prototype order; the bandpass result has order `2 * order`
    pub order: u32,
}

impl FilterSpec {
    pub fn new(lowcut: f64, highcut: f64, sample_rate: f64, order: u32) -> Self {
        Self {
            lowcut,
            highcut,
            sample_rate,
            order,
        }
    }

    pub fn nyquist(&self) -> f64 {
        0.5 * self.sample_rate
    }

    /// Check `0 < lowcut < highcut < sample_rate / 2` and `order >= 1`.
    pub fn validate(&self) -> Result<()> {
        if !(self.lowcut.is_finite() && self.highcut.is_finite() && self.sample_rate.is_finite())
        {
            return Err(VoxError::InvalidSpecification(format!(
                "frequencies must be finite (lowcut={}, highcut={}, sample_rate={})",
                self.lowcut, self.highcut, self.sample_rate
            )));
        }
        if self.sample_rate <= 0.0 {
            return Err(VoxError::InvalidSpecification(format!(
                "sample rate must be positive, got {} Hz",
                self.sample_rate
            )));
        }
        if self.order == 0 {
            return Err(VoxError::InvalidSpecification(
                "filter order must be at least 1".to_string(),
            ));
        }
        if self.lowcut <= 0.0 {
            return Err(VoxError::InvalidSpecification(format!(
                "low cutoff ({} Hz) must be greater than 0",
                self.lowcut
            )));
        }
        if self.highcut <= self.lowcut {
            return Err(VoxError::InvalidSpecification(format!(
                "high cutoff ({} Hz) must be greater than low cutoff ({} Hz)",
                self.highcut, self.lowcut
            )));
        }
        let nyquist = self.nyquist();
        if self.highcut >= nyquist {
            return Err(VoxError::InvalidSpecification(format!(
                "high cutoff ({} Hz) must be less than Nyquist ({} Hz)",
                self.highcut, nyquist
            )));
        }
        Ok(())
    }
}

/// Transfer function coefficients
/// H(z) = (b[0] + b[1]*z^-1 + ... ) / (a[0] + a[1]*z^-1 + ...)
///
/// Only constructed through [`FilterCoefficients::new`], so both sequences
/// are non-empty and `a[0]` is finite and non-zero.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FilterCoefficients {
    b: Vec<f64>,
    a: Vec<f64>,
}

impl FilterCoefficients {
    pub fn new(b: Vec<f64>, a: Vec<f64>) -> Result<Self> {
        if b.is_empty() || a.is_empty() {
            return Err(VoxError::InvalidSpecification(
                "coefficient sequences must not be empty".to_string(),
            ));
        }
        if a[0] == 0.0 || !a[0].is_finite() {
            return Err(VoxError::InvalidSpecification(
                "leading feedback coefficient a[0] must be finite and non-zero".to_string(),
            ));
        }
        Ok(Self { b, a })
    }

    /// Feed-forward (numerator)
    pub fn b(&self) -> &[f64] {
        &self.b
    }

    /// Feedback (denominator)
    pub fn a(&self) -> &[f64] {
        &self.a
    }

    /// Number of delay elements a direct-form filter needs
    pub fn order(&self) -> usize {
        self.b.len().max(self.a.len()) - 1
    }
}

/// Interleaved 16-bit PCM
#[derive(Debug, Clone, PartialEq)]
pub struct PcmAudio {
    pub sample_rate: u32,
    pub channels: u16,
    pub samples: Vec<i16>,
}

impl PcmAudio {
    pub fn new(sample_rate: u32, channels: u16, samples: Vec<i16>) -> Self {
        Self {
            sample_rate,
            channels,
            samples,
        }
    }

    pub fn mono(sample_rate: u32, samples: Vec<i16>) -> Self {
        Self::new(sample_rate, 1, samples)
    }

    /// Complete frames; a trailing partial frame is not counted.
    pub fn frames(&self) -> usize {
        if self.channels == 0 {
            return 0;
        }
        self.samples.len() / self.channels as usize
    }

    pub fn duration_secs(&self) -> f64 {
        if self.sample_rate == 0 {
            return 0.0;
        }
        self.frames() as f64 / self.sample_rate as f64
    }
}
