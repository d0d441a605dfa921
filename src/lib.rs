pub mod cli;
pub mod client;
pub mod commands;
pub mod models;
pub mod output;

use std::io;
use std::path::Path;

use tracing::warn;

use cli::Cli;
use client::{ClientConfig, HttpValidationService};
pub use models::ValidationOutcome;
use output::FailureCause;

/// Validate the manifest at `manifest` against the hosted verification
/// service and render the report to stdout.
///
/// This is the sole public entry point. Every failure mode, transport,
/// status, parse, or otherwise, is converted into a rendered explanation
/// plus [`ValidationOutcome::Error`]; no error escapes as a fault. Each
/// call is independent, so different manifests can be validated
/// concurrently without coordination.
pub fn validate_manifest(manifest: &Path) -> ValidationOutcome {
    let mut stdout = io::stdout().lock();

    let service = match HttpValidationService::new(ClientConfig::default()) {
        Ok(service) => service,
        Err(err) => {
            warn!(error = %err, "could not construct the validation client");
            let _ = output::failure(&mut stdout, FailureCause::Unexpected);
            return ValidationOutcome::Error;
        }
    };

    match commands::validate::run(manifest, &service, &mut stdout) {
        Ok(outcome) => outcome,
        Err(err) => {
            warn!(error = %err, "validation aborted");
            let _ = output::failure(&mut stdout, FailureCause::Unexpected);
            ValidationOutcome::Error
        }
    }
}

pub fn run(cli: Cli) -> ValidationOutcome {
    validate_manifest(&cli.manifest)
}
