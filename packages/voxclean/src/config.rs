use crate::error::{Result, VoxError};
use crate::types::FilterSpec;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Bandpass settings shared by every file in a run
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FilterSettings {
    /// Low cutoff frequency (Hz)
    #[serde(default = "default_lowcut")]
    pub lowcut: f64,

    /// High cutoff frequency (Hz)
    #[serde(default = "default_highcut")]
    pub highcut: f64,

    /// Prototype order (the bandpass has twice this order)
    #[serde(default = "default_order")]
    pub order: u32,
}

fn default_lowcut() -> f64 {
    300.0
}
fn default_highcut() -> f64 {
    3000.0
}
fn default_order() -> u32 {
    6
}
fn default_extension() -> String {
    "mp3".to_string()
}

impl Default for FilterSettings {
    fn default() -> Self {
        Self {
            lowcut: default_lowcut(),
            highcut: default_highcut(),
            order: default_order(),
        }
    }
}

impl FilterSettings {
    /// Bind the settings to a concrete sampling rate
    pub fn spec(&self, sample_rate: f64) -> FilterSpec {
        FilterSpec::new(self.lowcut, self.highcut, sample_rate, self.order)
    }

    /// Checks that do not depend on the sampling rate
    pub fn validate(&self) -> Result<()> {
        // Any rate above 2 * highcut satisfies the Nyquist bound
        self.spec(f64::MAX).validate()
    }
}

/// Everything a batch run needs
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PipelineConfig {
    pub input_dir: PathBuf,
    pub output_dir: PathBuf,

    #[serde(default)]
    pub filter: FilterSettings,

    /// File extension selected for processing, without the dot
    #[serde(default = "default_extension")]
    pub extension: String,

    /// Stop at the first failing file instead of moving on
    #[serde(default)]
    pub fail_fast: bool,

    /// MP3 bitrate handed to the encoder (e.g. "192k")
    #[serde(default)]
    pub bitrate: Option<String>,
}

impl PipelineConfig {
    pub fn new(input_dir: impl Into<PathBuf>, output_dir: impl Into<PathBuf>) -> Self {
        Self {
            input_dir: input_dir.into(),
            output_dir: output_dir.into(),
            filter: FilterSettings::default(),
            extension: default_extension(),
            fail_fast: false,
            bitrate: None,
        }
    }

    pub fn with_filter(mut self, filter: FilterSettings) -> Self {
        self.filter = filter;
        self
    }

    /// Load a JSON configuration file
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        serde_json::from_str(&content)
            .map_err(|e| VoxError::Config(format!("{}: {}", path.display(), e)))
    }

    /// Whether `path` carries the configured extension (case-sensitive)
    pub fn matches_extension(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|e| e.to_str())
            .map(|e| e == self.extension.trim_start_matches('.'))
            .unwrap_or(false)
    }
}
