pub mod codec;
pub mod config;
pub mod design;
pub mod error;
pub mod filter;
pub mod pcm;
pub mod pipeline;
pub mod types;

pub use codec::{find_ffmpeg, AudioCodec, FfmpegCodec, WavCodec};
pub use config::{FilterSettings, PipelineConfig};
pub use design::{butter_bandpass, ButterworthFilter, DEFAULT_DESIGN_ORDER};
pub use error::{Result, VoxError};
pub use filter::{bandpass_filter, lfilter, LinearFilter};
pub use pcm::{downmix_to_mono, to_i16_saturating};
pub use pipeline::{
    clean_file, clean_pcm, process_folder, BatchEvent, BatchSummary, FileOutcome, FileReport,
    FileStatus,
};
pub use types::*;
