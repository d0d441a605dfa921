use std::io::Write;
use std::path::Path;

use anyhow::Result;
use tracing::warn;

use crate::client::{SubmitError, ValidationService};
use crate::models::{CheckReport, ValidationOutcome};
use crate::output::{self, FailureCause, Severity};

/// Submit the manifest, classify the response, and render the report.
///
/// One outcome is chosen per invocation and exactly one rendering path
/// runs. Every failure is converted into a rendered explanation and the
/// `Error` outcome; the returned `Err` only carries sink write failures.
pub fn run(
    manifest: &Path,
    service: &dyn ValidationService,
    w: &mut dyn Write,
) -> Result<ValidationOutcome> {
    let response = match service.submit(manifest) {
        Ok(response) => response,
        Err(err) => {
            warn!(error = %err, "manifest submission failed");
            let cause = match err {
                SubmitError::Unreachable(_) => FailureCause::Transport,
                SubmitError::Manifest { .. } => FailureCause::Unexpected,
            };
            output::failure(w, cause)?;
            return Ok(ValidationOutcome::Error);
        }
    };

    // Only a 200 means the service answered; any other status goes to the
    // failure reporter with the code as its sole input.
    if response.status != 200 {
        output::failure(w, FailureCause::Status(response.status))?;
        return Ok(ValidationOutcome::Error);
    }

    let report = match CheckReport::parse(&response.body) {
        Ok(report) => report,
        Err(err) => {
            warn!(error = %err, "validation service returned an unreadable payload");
            output::failure(w, FailureCause::Unexpected)?;
            return Ok(ValidationOutcome::Error);
        }
    };

    let validation = &report.validation_report;
    match validation.outcome() {
        Some(ValidationOutcome::Passed) => {
            output::manifest_valid(w)?;
            output::diagnostics(w, &validation.warnings, Severity::Warning)?;
            output::diagnostics(w, &validation.infos, Severity::Info)?;
            if let Some(details) = &report.details {
                output::platform_summary(w, &details.supported_products)?;
            }
            Ok(ValidationOutcome::Passed)
        }
        Some(ValidationOutcome::Failed) => {
            output::manifest_invalid(w)?;
            output::diagnostics(w, &validation.errors, Severity::Error)?;
            output::diagnostics(w, &validation.warnings, Severity::Warning)?;
            output::diagnostics(w, &validation.infos, Severity::Info)?;
            Ok(ValidationOutcome::Failed)
        }
        _ => {
            // An unrecognized label (a future service state, or a casing
            // change) renders nothing. The log entry is the flag for it.
            warn!(label = %validation.result, "unrecognized validation result; report not rendered");
            Ok(ValidationOutcome::Error)
        }
    }
}
