use serde::Deserialize;

use super::ValidationOutcome;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CheckReportEnvelope {
    check_report: CheckReport,
}

/// Parsed verdict returned by the verification service.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckReport {
    pub validation_report: ValidationReport,
    /// Present only when the manifest passed validation.
    #[serde(default)]
    pub details: Option<ReportDetails>,
}

impl CheckReport {
    /// Parse the raw response body.
    ///
    /// The service pads its payload with whitespace, so the body is trimmed
    /// before deserialization. A payload that does not match the expected
    /// shape is a typed error for the caller to convert, never a panic.
    pub fn parse(body: &str) -> Result<Self, serde_json::Error> {
        let envelope: CheckReportEnvelope = serde_json::from_str(body.trim())?;
        Ok(envelope.check_report)
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationReport {
    /// Raw result label, mapped to an outcome by [`Self::outcome`].
    pub result: String,
    #[serde(default)]
    pub errors: Vec<DiagnosticEntry>,
    #[serde(default)]
    pub warnings: Vec<DiagnosticEntry>,
    #[serde(default)]
    pub infos: Vec<DiagnosticEntry>,
}

impl ValidationReport {
    /// Map the raw result label to an outcome. The match is case-sensitive;
    /// any label other than `Passed` or `Failed` is unrecognized and yields
    /// `None`, which the caller reports without rendering a verdict.
    pub fn outcome(&self) -> Option<ValidationOutcome> {
        match self.result.as_str() {
            "Passed" => Some(ValidationOutcome::Passed),
            "Failed" => Some(ValidationOutcome::Failed),
            _ => None,
        }
    }
}

/// One issue found by the remote validator.
#[derive(Debug, Deserialize)]
pub struct DiagnosticEntry {
    pub title: String,
    pub detail: String,
    pub link: String,
    #[serde(default)]
    pub code: Option<String>,
    /// 1-based position into the submitted manifest, when the validator
    /// could pin the issue to a location.
    #[serde(default)]
    pub line: Option<u32>,
    #[serde(default)]
    pub column: Option<u32>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportDetails {
    #[serde(default)]
    pub supported_products: Vec<SupportedProduct>,
}

/// A platform the add-in is deemed compatible with. The service sends one
/// entry per capability requiring the platform, so titles may repeat.
#[derive(Debug, Deserialize)]
pub struct SupportedProduct {
    pub title: String,
    #[serde(default)]
    pub version: Option<String>,
}
