use std::{process, str::FromStr};

use clap::Parser;
use log::{LevelFilter, debug, error, info};

use doctag_cli::{Args, ErrorAdapter};

fn main() {
    // Install miette's pretty panic hook early for better panic reports
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

    info!(log_level:?; "Starting doctag");
    debug!(args:?; "Parsed arguments");

    match doctag_cli::run(&args) {
        Err(err) => {
            let adapted_error = ErrorAdapter(&err);

            let reporter = miette::GraphicalReportHandler::new();
            let mut writer = String::new();
            reporter
                .render_report(&mut writer, &adapted_error)
                .expect("Writing to String buffer is infallible");

            error!("Failed\n{writer}");
            process::exit(1);
        }
        Ok(summary) if summary.has_errors => {
            info!(violations = summary.violations; "Completed with errors");
            process::exit(1);
        }
        Ok(summary) => {
            info!(violations = summary.violations; "Completed successfully");
        }
    }
}
