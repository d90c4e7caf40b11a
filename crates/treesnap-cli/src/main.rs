//! TreeSnap CLI entry point.

use std::{process, str::FromStr};

use clap::Parser;
use log::{LevelFilter, debug, error, info};

use treesnap_cli::{Args, error_adapter};

fn main() {
    miette::set_panic_hook();

    let args = Args::parse();

    let log_level = LevelFilter::from_str(&args.log_level).unwrap_or_else(|_| {
        eprintln!(
            "Invalid log level: {}. Using 'warn' instead.",
            args.log_level
        );
        LevelFilter::Warn
    });

    env_logger::Builder::from_env(env_logger::Env::default())
        .filter_level(log_level)
        .init();

    info!(log_level:?; "Starting TreeSnap");
    debug!(args:?; "Parsed arguments");

    let report = match treesnap_cli::run(&args) {
        Ok(report) => report,
        Err(err) => {
            for rendered in error_adapter::render(&err) {
                error!("{rendered}");
            }
            process::exit(1);
        }
    };

    for (input, err) in &report.failed {
        error!(input_path = input.display().to_string(); "Failed to render focus tree");
        for rendered in error_adapter::render(err) {
            error!("{rendered}");
        }
    }
    if !report.is_success() {
        process::exit(1);
    }

    info!("Completed successfully");
}
