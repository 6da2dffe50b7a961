use crate::cli::{BatchArgs, CodecArgs, CodecKind, FilterArgs};
use crate::exit_codes;
use std::path::Path;
use voxclean::{AudioCodec, FfmpegCodec, FilterSettings, PipelineConfig, VoxError, WavCodec};

/// Build the codec selected on the command line.
pub fn resolve_codec(args: &CodecArgs) -> Result<Box<dyn AudioCodec>, VoxError> {
    match args.codec {
        CodecKind::Wav => Ok(Box::new(WavCodec)),
        CodecKind::Ffmpeg => {
            let codec = FfmpegCodec::discover(args.ffmpeg.as_deref())?
                .with_bitrate(args.bitrate.clone());
            log::info!("Using ffmpeg at {}", codec.binary_path().display());
            Ok(Box::new(codec))
        }
    }
}

/// Overlay command-line filter flags on `base`.
pub fn apply_filter_args(base: FilterSettings, args: &FilterArgs) -> FilterSettings {
    FilterSettings {
        lowcut: args.lowcut.unwrap_or(base.lowcut),
        highcut: args.highcut.unwrap_or(base.highcut),
        order: args.order.unwrap_or(base.order),
    }
}

/// Merge the optional config file with command-line flags.
pub fn build_pipeline_config(args: &BatchArgs) -> Result<PipelineConfig, String> {
    let mut config = match args.config {
        Some(ref path) => {
            PipelineConfig::from_json_file(Path::new(path)).map_err(|e| e.to_string())?
        }
        None => {
            let input_dir = args
                .input_dir
                .as_ref()
                .ok_or("--input-dir is required when no --config is given")?;
            let output_dir = args
                .output_dir
                .as_ref()
                .ok_or("--output-dir is required when no --config is given")?;
            PipelineConfig::new(input_dir, output_dir)
        }
    };

    if let Some(ref dir) = args.input_dir {
        config.input_dir = dir.into();
    }
    if let Some(ref dir) = args.output_dir {
        config.output_dir = dir.into();
    }
    if let Some(ref ext) = args.extension {
        config.extension = ext.trim_start_matches('.').to_string();
    }
    if args.codec.bitrate.is_some() {
        config.bitrate = args.codec.bitrate.clone();
    }
    config.fail_fast |= args.fail_fast;
    config.filter = apply_filter_args(config.filter, &args.filter);

    config.filter.validate().map_err(|e| e.to_string())?;
    Ok(config)
}

/// Exit code for a library error raised before any file was processed.
pub fn exit_code_for(err: &VoxError) -> i32 {
    match err {
        VoxError::InvalidSpecification(_) | VoxError::Config(_) => exit_codes::INPUT_ERROR,
        VoxError::CodecNotFound(_) => exit_codes::CODEC_NOT_FOUND,
        VoxError::Io(e) if e.kind() == std::io::ErrorKind::NotFound => exit_codes::INPUT_ERROR,
        _ => exit_codes::EXECUTION_ERROR,
    }
}
