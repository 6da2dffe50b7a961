use clap::{Args, Parser, Subcommand, ValueEnum};

#[derive(Parser)]
#[command(
    name = "voxclean",
    version,
    about = "Butterworth bandpass cleanup for voice recordings",
    long_about = "Batch-filter MP3 recordings with a Butterworth bandpass to suppress out-of-band noise.\n\
                  MP3 input and output require ffmpeg. Set $VOXCLEAN_FFMPEG or use --ffmpeg."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,
}

#[derive(Subcommand)]
pub enum Command {
    /// Clean every matching file in a directory
    Batch(BatchArgs),
    /// Clean a single file
    Clean(CleanArgs),
    /// Print Butterworth bandpass coefficients
    Design(DesignArgs),
    /// Show version, ffmpeg location and defaults
    Info(InfoArgs),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum CodecKind {
    /// MP3 and other compressed formats through ffmpeg
    Ffmpeg,
    /// Uncompressed WAV, no external tools
    Wav,
}

/// Filter flags shared by `batch` and `clean`. Unset flags fall back to the
/// config file, then to the built-in defaults.
#[derive(Args, Clone, Default)]
pub struct FilterArgs {
    /// Low cutoff frequency in Hz [default: 300]
    #[arg(long)]
    pub lowcut: Option<f64>,

    /// High cutoff frequency in Hz [default: 3000]
    #[arg(long)]
    pub highcut: Option<f64>,

    /// Filter order [default: 6]
    #[arg(long)]
    pub order: Option<u32>,
}

#[derive(Args, Clone)]
pub struct CodecArgs {
    /// Container handling
    #[arg(long, value_enum, default_value_t = CodecKind::Ffmpeg)]
    pub codec: CodecKind,

    /// Path to ffmpeg
    #[arg(long, env = "VOXCLEAN_FFMPEG")]
    pub ffmpeg: Option<String>,

    /// MP3 bitrate for the encoder (e.g. 192k)
    #[arg(long)]
    pub bitrate: Option<String>,
}

#[derive(Args)]
pub struct BatchArgs {
    /// Directory holding the recordings
    #[arg(long)]
    pub input_dir: Option<String>,

    /// Directory for cleaned files (created if missing)
    #[arg(long)]
    pub output_dir: Option<String>,

    /// JSON configuration file; flags override its values
    #[arg(long)]
    pub config: Option<String>,

    #[command(flatten)]
    pub filter: FilterArgs,

    #[command(flatten)]
    pub codec: CodecArgs,

    /// File extension to process, without the dot [default: mp3]
    #[arg(long)]
    pub extension: Option<String>,

    /// Stop at the first file that fails
    #[arg(long, default_value_t = false)]
    pub fail_fast: bool,

    /// Print the run summary as JSON on stdout
    #[arg(long, default_value_t = false)]
    pub json: bool,

    /// Suppress progress messages on stderr
    #[arg(long, default_value_t = false)]
    pub quiet: bool,
}

#[derive(Args)]
pub struct CleanArgs {
    /// Input recording
    #[arg(long)]
    pub input: String,

    /// Output path
    #[arg(long)]
    pub output: String,

    #[command(flatten)]
    pub filter: FilterArgs,

    #[command(flatten)]
    pub codec: CodecArgs,

    /// Print the file report as JSON on stdout
    #[arg(long, default_value_t = false)]
    pub json: bool,

    /// Suppress progress messages on stderr
    #[arg(long, default_value_t = false)]
    pub quiet: bool,
}

#[derive(Args)]
pub struct DesignArgs {
    /// Sampling rate in Hz
    #[arg(long)]
    pub sample_rate: f64,

    /// Low cutoff frequency in Hz
    #[arg(long, default_value_t = 300.0)]
    pub lowcut: f64,

    /// High cutoff frequency in Hz
    #[arg(long, default_value_t = 3000.0)]
    pub highcut: f64,

    /// Prototype order
    #[arg(long, default_value_t = voxclean::DEFAULT_DESIGN_ORDER)]
    pub order: u32,

    /// Output as JSON
    #[arg(long, default_value_t = false)]
    pub json: bool,

    /// Compact JSON output (no indentation)
    #[arg(long, default_value_t = false)]
    pub compact: bool,
}

#[derive(Args)]
pub struct InfoArgs {
    /// Path to ffmpeg
    #[arg(long, env = "VOXCLEAN_FFMPEG")]
    pub ffmpeg: Option<String>,

    /// Output as JSON
    #[arg(long, default_value_t = false)]
    pub json: bool,
}
