use crate::cli::CleanArgs;
use crate::exit_codes;
use crate::output;
use crate::params;
use std::path::Path;
use voxclean::{clean_file, FilterSettings};

pub fn execute(args: CleanArgs) -> i32 {
    let settings = params::apply_filter_args(FilterSettings::default(), &args.filter);
    if let Err(e) = settings.validate() {
        eprintln!("Error: {}", e);
        return exit_codes::INPUT_ERROR;
    }

    let input = Path::new(&args.input);
    if !input.is_file() {
        eprintln!("Error: Input file not found: {}", args.input);
        return exit_codes::INPUT_ERROR;
    }

    let codec = match params::resolve_codec(&args.codec) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Error: {}", e);
            return params::exit_code_for(&e);
        }
    };

    let output_path = Path::new(&args.output);
    if let Some(parent) = output_path.parent().filter(|p| !p.as_os_str().is_empty()) {
        if let Err(e) = std::fs::create_dir_all(parent) {
            eprintln!(
                "Error: Failed to create output directory '{}': {}",
                parent.display(),
                e
            );
            return exit_codes::EXECUTION_ERROR;
        }
    }

    if !args.quiet {
        eprintln!("Processing {}...", args.input);
    }

    match clean_file(codec.as_ref(), input, output_path, &settings) {
        Ok(report) => {
            if !args.quiet {
                eprintln!("Saved cleaned file to {}", args.output);
            }
            if args.json {
                if let Err(e) = output::print_json(&report, false) {
                    eprintln!("Error: {}", e);
                    return exit_codes::EXECUTION_ERROR;
                }
            }
            exit_codes::SUCCESS
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            params::exit_code_for(&e)
        }
    }
}
