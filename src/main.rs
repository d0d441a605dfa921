use std::process::ExitCode;

use addin_check::cli::Cli;
use addin_check::ValidationOutcome;
use clap::Parser;
use tracing_subscriber::EnvFilter;

fn main() -> ExitCode {
    // Logs go to stderr so the report text on stdout stays parseable.
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match addin_check::run(cli) {
        ValidationOutcome::Passed => ExitCode::SUCCESS,
        ValidationOutcome::Failed | ValidationOutcome::Error => ExitCode::FAILURE,
    }
}
