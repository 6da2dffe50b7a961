use crate::cli::InfoArgs;
use crate::exit_codes;
use crate::output;
use serde::Serialize;
use voxclean::codec::{find_ffmpeg, DEFAULT_FFMPEG_PATHS, FFMPEG_ENV_VAR};
use voxclean::FilterSettings;

#[derive(Serialize)]
struct InfoOutput {
    cli_version: String,
    ffmpeg_path: Option<String>,
    ffmpeg_found: bool,
    platform: String,
    arch: String,
    search_paths: Vec<&'static str>,
    defaults: FilterSettings,
}

pub fn execute(args: InfoArgs) -> i32 {
    let ffmpeg_path = find_ffmpeg(args.ffmpeg.as_deref());

    let info = InfoOutput {
        cli_version: env!("CARGO_PKG_VERSION").to_string(),
        ffmpeg_path: ffmpeg_path.as_ref().map(|p| p.display().to_string()),
        ffmpeg_found: ffmpeg_path.is_some(),
        platform: std::env::consts::OS.to_string(),
        arch: std::env::consts::ARCH.to_string(),
        search_paths: DEFAULT_FFMPEG_PATHS.to_vec(),
        defaults: FilterSettings::default(),
    };

    if args.json {
        if let Err(e) = output::print_json(&info, false) {
            eprintln!("Error: {}", e);
            return exit_codes::EXECUTION_ERROR;
        }
    } else {
        println!("voxclean CLI v{}", info.cli_version);
        println!("Platform: {} ({})", info.platform, info.arch);
        println!();
        match info.ffmpeg_path {
            Some(ref path) => println!("ffmpeg: {}", path),
            None => println!("ffmpeg: not found"),
        }
        println!(
            "Search paths: ${}, $PATH, {}",
            FFMPEG_ENV_VAR,
            info.search_paths.join(", ")
        );
        println!();
        println!(
            "Defaults: lowcut {} Hz, highcut {} Hz, order {}",
            info.defaults.lowcut, info.defaults.highcut, info.defaults.order
        );
    }

    exit_codes::SUCCESS
}
