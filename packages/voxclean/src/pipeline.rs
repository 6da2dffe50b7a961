//! Batch Cleanup Pipeline
//!
//! decode → downmix → bandpass → requantize → encode, one file at a time.
//! A failing file is reported and the batch moves on unless the
//! configuration asks to stop at the first failure.

use crate::codec::AudioCodec;
use crate::config::{FilterSettings, PipelineConfig};
use crate::design::ButterworthFilter;
use crate::error::{Result, VoxError};
use crate::filter::lfilter;
use crate::pcm::{downmix_to_mono, to_i16_saturating};
use crate::types::PcmAudio;
use serde::Serialize;
use std::path::{Path, PathBuf};
use std::time::Instant;

/// What happened to one cleaned file
#[derive(Debug, Clone, Serialize)]
pub struct FileReport {
    pub input: PathBuf,
    pub output: PathBuf,
    pub sample_rate: u32,
    pub source_channels: u16,
    pub samples: usize,
}

/// Progress notifications emitted by [`process_folder`]
#[derive(Debug)]
pub enum BatchEvent<'a> {
    Processing { file_name: &'a str },
    Saved { file_name: &'a str, output: &'a Path },
    Failed { file_name: &'a str, error: &'a VoxError },
    /// Entry not processed; `path` is `None` when the directory entry
    /// itself could not be read
    Skipped { path: Option<&'a Path> },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FileStatus {
    Succeeded,
    Failed,
}

#[derive(Debug, Clone, Serialize)]
pub struct FileOutcome {
    pub file_name: String,
    pub status: FileStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output: Option<PathBuf>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// End-of-run counts
#[derive(Debug, Clone, Default, Serialize)]
pub struct BatchSummary {
    pub succeeded: usize,
    pub failed: usize,
    pub skipped: usize,
    /// Set when a failure stopped the run early
    pub aborted: bool,
    pub elapsed_secs: f64,
    pub files: Vec<FileOutcome>,
}

impl BatchSummary {
    pub fn attempted(&self) -> usize {
        self.succeeded + self.failed
    }
}

/// Run decoded PCM through the bandpass and return mono 16-bit PCM
pub fn clean_pcm(audio: &PcmAudio, settings: &FilterSettings) -> Result<PcmAudio> {
    let spec = settings.spec(audio.sample_rate as f64);
    let coeffs = ButterworthFilter::bandpass(&spec)?;

    let mono = downmix_to_mono(audio);
    let filtered = lfilter(&coeffs, &mono);

    Ok(PcmAudio::mono(audio.sample_rate, to_i16_saturating(&filtered)))
}

/// Clean a single file from `input` into `output`
pub fn clean_file(
    codec: &dyn AudioCodec,
    input: &Path,
    output: &Path,
    settings: &FilterSettings,
) -> Result<FileReport> {
    let start = Instant::now();

    let audio = codec.decode(input)?;
    log::info!(
        "Decoded {}: {} Hz, {} channel(s), {:.2}s",
        input.display(),
        audio.sample_rate,
        audio.channels,
        audio.duration_secs()
    );

    let cleaned = clean_pcm(&audio, settings)?;
    codec.encode(&cleaned, output)?;

    log::info!(
        "Cleaned {} -> {} in {:.2}s",
        input.display(),
        output.display(),
        start.elapsed().as_secs_f64()
    );

    Ok(FileReport {
        input: input.to_path_buf(),
        output: output.to_path_buf(),
        sample_rate: cleaned.sample_rate,
        source_channels: audio.channels,
        samples: cleaned.samples.len(),
    })
}

/// Clean every file in `config.input_dir` whose extension matches.
///
/// Entries are visited in directory listing order. The returned error
/// covers problems with the run as a whole (bad filter settings, missing
/// input directory, output directory not creatable); per-file problems
/// are recorded in the summary.
pub fn process_folder<F>(
    codec: &dyn AudioCodec,
    config: &PipelineConfig,
    mut on_event: F,
) -> Result<BatchSummary>
where
    F: FnMut(BatchEvent<'_>),
{
    config.filter.validate()?;

    if !config.input_dir.is_dir() {
        return Err(VoxError::Io(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            format!("input directory not found: {}", config.input_dir.display()),
        )));
    }
    std::fs::create_dir_all(&config.output_dir)?;

    log::info!(
        "Processing *.{} in {} with {} codec ({}-{} Hz, order {})",
        config.extension,
        config.input_dir.display(),
        codec.name(),
        config.filter.lowcut,
        config.filter.highcut,
        config.filter.order
    );

    let start = Instant::now();
    let mut summary = BatchSummary::default();

    for entry in std::fs::read_dir(&config.input_dir)? {
        let path = match entry {
            Ok(entry) => entry.path(),
            Err(e) => {
                log::warn!("Skipping unreadable directory entry: {}", e);
                summary.skipped += 1;
                on_event(BatchEvent::Skipped { path: None });
                continue;
            }
        };

        let file_name = match path.file_name() {
            Some(name) if path.is_file() && config.matches_extension(&path) => {
                name.to_string_lossy().into_owned()
            }
            _ => {
                log::debug!("Skipping {}", path.display());
                summary.skipped += 1;
                on_event(BatchEvent::Skipped { path: Some(&path) });
                continue;
            }
        };
        let output = config.output_dir.join(&file_name);

        on_event(BatchEvent::Processing {
            file_name: &file_name,
        });

        match clean_file(codec, &path, &output, &config.filter) {
            Ok(_) => {
                summary.succeeded += 1;
                on_event(BatchEvent::Saved {
                    file_name: &file_name,
                    output: &output,
                });
                summary.files.push(FileOutcome {
                    file_name,
                    status: FileStatus::Succeeded,
                    output: Some(output),
                    error: None,
                });
            }
            Err(e) => {
                log::error!("Failed to clean {}: {}", path.display(), e);
                summary.failed += 1;
                on_event(BatchEvent::Failed {
                    file_name: &file_name,
                    error: &e,
                });
                summary.files.push(FileOutcome {
                    file_name,
                    status: FileStatus::Failed,
                    output: None,
                    error: Some(e.to_string()),
                });
                if config.fail_fast {
                    summary.aborted = true;
                    break;
                }
            }
        }
    }

    summary.elapsed_secs = start.elapsed().as_secs_f64();
    log::info!(
        "Batch complete: {} succeeded, {} failed, {} skipped in {:.1}s",
        summary.succeeded,
        summary.failed,
        summary.skipped,
        summary.elapsed_secs
    );

    Ok(summary)
}
