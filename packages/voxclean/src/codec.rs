//! Audio containers
//!
//! `WavCodec` reads and writes WAV directly. `FfmpegCodec` converts MP3 (or
//! anything ffmpeg can read) through temporary WAV files that are removed
//! when they go out of scope.

use crate::error::{Result, VoxError};
use crate::types::PcmAudio;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};
use tempfile::TempPath;

/// ffmpeg executable name
pub const FFMPEG_NAME: &str = "ffmpeg";

/// Environment variable holding an explicit ffmpeg path
pub const FFMPEG_ENV_VAR: &str = "VOXCLEAN_FFMPEG";

/// Fallback directories searched after `$PATH`
pub const DEFAULT_FFMPEG_PATHS: &[&str] = &[
    "/usr/local/bin",
    "/opt/homebrew/bin",
    "/usr/bin",
    "~/.local/bin",
];

/// Decode a file to PCM and encode PCM back to a file
pub trait AudioCodec {
    fn decode(&self, path: &Path) -> Result<PcmAudio>;

    fn encode(&self, audio: &PcmAudio, path: &Path) -> Result<()>;

    fn name(&self) -> &'static str;
}

/// Uncompressed WAV via `hound`
#[derive(Debug, Clone, Copy, Default)]
pub struct WavCodec;

impl AudioCodec for WavCodec {
    fn decode(&self, path: &Path) -> Result<PcmAudio> {
        read_wav(path).map_err(|e| VoxError::decode(path, e))
    }

    fn encode(&self, audio: &PcmAudio, path: &Path) -> Result<()> {
        write_wav(audio, path).map_err(|e| VoxError::encode(path, e))
    }

    fn name(&self) -> &'static str {
        "wav"
    }
}

fn read_wav(path: &Path) -> std::result::Result<PcmAudio, hound::Error> {
    let mut reader = hound::WavReader::open(path)?;
    let spec = reader.spec();

    let samples: Vec<i16> = match spec.sample_format {
        hound::SampleFormat::Float => reader
            .samples::<f32>()
            .map(|s| s.map(|v| (v.clamp(-1.0, 1.0) * i16::MAX as f32) as i16))
            .collect::<std::result::Result<_, _>>()?,
        hound::SampleFormat::Int if spec.bits_per_sample == 16 => reader
            .samples::<i16>()
            .collect::<std::result::Result<_, _>>()?,
        hound::SampleFormat::Int => {
            let bits = spec.bits_per_sample as i32;
            reader
                .samples::<i32>()
                .map(|s| {
                    s.map(|v| {
                        if bits > 16 {
                            (v >> (bits - 16)) as i16
                        } else {
                            (v << (16 - bits)) as i16
                        }
                    })
                })
                .collect::<std::result::Result<_, _>>()?
        }
    };

    log::debug!(
        "Read {} samples ({} ch, {} Hz, {}-bit {:?}) from {}",
        samples.len(),
        spec.channels,
        spec.sample_rate,
        spec.bits_per_sample,
        spec.sample_format,
        path.display()
    );

    Ok(PcmAudio::new(spec.sample_rate, spec.channels, samples))
}

fn write_wav(audio: &PcmAudio, path: &Path) -> std::result::Result<(), hound::Error> {
    let spec = hound::WavSpec {
        channels: audio.channels,
        sample_rate: audio.sample_rate,
        bits_per_sample: 16,
        sample_format: hound::SampleFormat::Int,
    };
    let mut writer = hound::WavWriter::create(path, spec)?;
    for &sample in &audio.samples {
        writer.write_sample(sample)?;
    }
    writer.finalize()
}

/// MP3 (and other compressed formats) through an external ffmpeg process
#[derive(Debug, Clone)]
pub struct FfmpegCodec {
    binary_path: PathBuf,
    bitrate: Option<String>,
}

impl FfmpegCodec {
    /// Use the ffmpeg binary at `binary_path`
    pub fn new<P: AsRef<Path>>(binary_path: P) -> Result<Self> {
        let binary_path = binary_path.as_ref().to_path_buf();

        if !binary_path.exists() {
            return Err(VoxError::CodecNotFound(binary_path.display().to_string()));
        }

        Ok(Self {
            binary_path,
            bitrate: None,
        })
    }

    /// Locate ffmpeg with [`find_ffmpeg`]
    pub fn discover(explicit_path: Option<&str>) -> Result<Self> {
        match find_ffmpeg(explicit_path) {
            Some(path) => Self::new(path),
            None => Err(VoxError::CodecNotFound(match explicit_path {
                Some(path) => path.to_string(),
                None => format!(
                    "searched ${}, $PATH and {}",
                    FFMPEG_ENV_VAR,
                    DEFAULT_FFMPEG_PATHS.join(", ")
                ),
            })),
        }
    }

    /// Target MP3 bitrate passed to the encoder, e.g. `"192k"`
    pub fn with_bitrate(mut self, bitrate: Option<String>) -> Self {
        self.bitrate = bitrate;
        self
    }

    pub fn binary_path(&self) -> &Path {
        &self.binary_path
    }

    fn command(&self) -> Command {
        let mut command = Command::new(&self.binary_path);
        command
            .arg("-hide_banner")
            .arg("-loglevel")
            .arg("error")
            .arg("-y")
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::piped());
        command
    }

    fn run(&self, mut command: Command) -> std::result::Result<(), String> {
        log::debug!("ffmpeg command: {:?}", command);

        let output = command
            .output()
            .map_err(|e| format!("failed to run {}: {}", self.binary_path.display(), e))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            log::error!("ffmpeg exited with {}: {}", output.status, stderr.trim());
            return Err(format!("ffmpeg exited with {}: {}", output.status, stderr.trim()));
        }
        Ok(())
    }
}

impl AudioCodec for FfmpegCodec {
    fn decode(&self, path: &Path) -> Result<PcmAudio> {
        if !path.is_file() {
            return Err(VoxError::decode(path, "file not found"));
        }

        let temp_wav = temp_wav_path().map_err(|e| VoxError::decode(path, e))?;

        let mut command = self.command();
        command
            .arg("-i")
            .arg(path)
            .arg("-acodec")
            .arg("pcm_s16le")
            .arg("-f")
            .arg("wav")
            .arg(&*temp_wav);
        self.run(command).map_err(|e| VoxError::decode(path, e))?;

        read_wav(&temp_wav).map_err(|e| VoxError::decode(path, e))
    }

    fn encode(&self, audio: &PcmAudio, path: &Path) -> Result<()> {
        let temp_wav = temp_wav_path().map_err(|e| VoxError::encode(path, e))?;
        write_wav(audio, &temp_wav).map_err(|e| VoxError::encode(path, e))?;

        let mut command = self.command();
        command.arg("-i").arg(&*temp_wav);
        if let Some(ref bitrate) = self.bitrate {
            command.arg("-b:a").arg(bitrate);
        }
        // Container follows the output extension
        command.arg(path);
        self.run(command).map_err(|e| VoxError::encode(path, e))
    }

    fn name(&self) -> &'static str {
        "ffmpeg"
    }
}

/// Reserve a temporary `.wav` path, deleted when dropped
fn temp_wav_path() -> std::io::Result<TempPath> {
    Ok(tempfile::Builder::new()
        .prefix("voxclean-")
        .suffix(".wav")
        .tempfile()?
        .into_temp_path())
}

/// Find the ffmpeg binary.
///
/// Resolution order:
/// 1. Explicit path (if provided)
/// 2. $VOXCLEAN_FFMPEG environment variable
/// 3. `ffmpeg` on $PATH
/// 4. Default search paths
pub fn find_ffmpeg(explicit_path: Option<&str>) -> Option<PathBuf> {
    fn expand_path(path: &str) -> PathBuf {
        if let Some(rest) = path.strip_prefix("~/") {
            if let Some(home) = std::env::var_os("HOME") {
                return PathBuf::from(home).join(rest);
            }
        }
        PathBuf::from(path)
    }

    if let Some(path) = explicit_path {
        let p = expand_path(path);
        return p.is_file().then_some(p);
    }

    if let Ok(env_path) = std::env::var(FFMPEG_ENV_VAR) {
        let p = expand_path(&env_path);
        if p.is_file() {
            return Some(p);
        }
        log::warn!("${} points to missing file: {}", FFMPEG_ENV_VAR, env_path);
    }

    if let Ok(p) = which::which(FFMPEG_NAME) {
        return Some(p);
    }

    DEFAULT_FFMPEG_PATHS
        .iter()
        .map(|dir| expand_path(dir).join(FFMPEG_NAME))
        .find(|p| p.is_file())
}
