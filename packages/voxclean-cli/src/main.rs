use clap::Parser;

mod cli;
mod commands;
mod exit_codes;
mod output;
mod params;

use cli::Cli;

fn main() {
    let cli = Cli::parse();

    let log_level = match cli.verbose {
        0 => log::LevelFilter::Warn,
        1 => log::LevelFilter::Info,
        2 => log::LevelFilter::Debug,
        _ => log::LevelFilter::Trace,
    };
    env_logger::Builder::new()
        .filter_level(log_level)
        .format_timestamp(None)
        .init();

    let exit_code = match cli.command {
        cli::Command::Batch(args) => commands::batch::execute(args),
        cli::Command::Clean(args) => commands::clean::execute(args),
        cli::Command::Design(args) => commands::design::execute(args),
        cli::Command::Info(args) => commands::info::execute(args),
    };

    std::process::exit(exit_code);
}
