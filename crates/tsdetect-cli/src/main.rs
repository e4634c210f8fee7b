use std::process::ExitCode;

use clap::Parser;
use tsdetect_cli::{run, Cli};
use tsdetect_core::errors::ErrorCode;
use tsdetect_core::tracing::init_tracing;

fn main() -> ExitCode {
    init_tracing();
    let cli = Cli::parse();

    match run(&cli) {
        Ok(summary) => {
            if summary.warnings > 0 {
                tracing::warn!(
                    warnings = summary.warnings,
                    "some detectors could not be evaluated"
                );
            }
            ExitCode::SUCCESS
        }
        Err(e) => {
            tracing::error!(code = e.error_code(), "{e}");
            eprintln!("tsdetect: {}", e.coded_string());
            ExitCode::FAILURE
        }
    }
}
