use crate::cli::BatchArgs;
use crate::exit_codes;
use crate::output;
use crate::params;
use voxclean::{process_folder, BatchEvent, BatchSummary};

pub fn execute(args: BatchArgs) -> i32 {
    let config = match params::build_pipeline_config(&args) {
        Ok(c) => c,
        Err(msg) => {
            eprintln!("Error: {}", msg);
            return exit_codes::INPUT_ERROR;
        }
    };

    let mut codec_args = args.codec.clone();
    codec_args.bitrate = config.bitrate.clone();
    let codec = match params::resolve_codec(&codec_args) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Error: {}", e);
            return params::exit_code_for(&e);
        }
    };

    let quiet = args.quiet;
    let result = process_folder(codec.as_ref(), &config, |event| {
        if quiet {
            return;
        }
        match event {
            BatchEvent::Processing { file_name } => eprintln!("Processing {}...", file_name),
            BatchEvent::Saved { output, .. } => {
                eprintln!("Saved cleaned file to {}", output.display())
            }
            BatchEvent::Failed { file_name, error } => {
                eprintln!("  Error: {}: {}", file_name, error)
            }
            BatchEvent::Skipped { .. } => {}
        }
    });

    let summary = match result {
        Ok(s) => s,
        Err(e) => {
            eprintln!("Error: {}", e);
            return params::exit_code_for(&e);
        }
    };

    if !args.quiet {
        eprintln!("All files processed.");
        eprintln!(
            "Batch complete: {} succeeded, {} failed, {} skipped, {:.1}s",
            summary.succeeded, summary.failed, summary.skipped, summary.elapsed_secs
        );
        if summary.aborted {
            eprintln!("Stopped after first failure (--fail-fast)");
        }
    }

    if args.json {
        if let Err(e) = output::print_json(&summary, false) {
            eprintln!("Error: {}", e);
            return exit_codes::EXECUTION_ERROR;
        }
    }

    summary_exit_code(&summary)
}

fn summary_exit_code(summary: &BatchSummary) -> i32 {
    if summary.failed == 0 {
        exit_codes::SUCCESS
    } else if summary.succeeded > 0 {
        exit_codes::PARTIAL_FAILURE
    } else {
        exit_codes::EXECUTION_ERROR
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn summary(succeeded: usize, failed: usize) -> BatchSummary {
        BatchSummary {
            succeeded,
            failed,
            ..Default::default()
        }
    }

    #[test]
    fn test_summary_exit_codes() {
        assert_eq!(summary_exit_code(&summary(0, 0)), exit_codes::SUCCESS);
        assert_eq!(summary_exit_code(&summary(3, 0)), exit_codes::SUCCESS);
        assert_eq!(summary_exit_code(&summary(2, 1)), exit_codes::PARTIAL_FAILURE);
        assert_eq!(summary_exit_code(&summary(0, 2)), exit_codes::EXECUTION_ERROR);
    }
}
