use std::fs::File;
use std::io;
use std::path::{Path, PathBuf};

use anyhow::Result;
use reqwest::blocking::Client;
use reqwest::header::CONTENT_TYPE;
use thiserror::Error;
use tracing::debug;

/// Endpoint of the hosted manifest verification service.
pub const VERIFICATION_SERVICE_URL: &str =
    "https://verificationservice.osi.office.net/ova/addincheckingagent.svc/api/addincheck?gets=1";

/// The service accepts manifests as XML only. This is a contract with the
/// remote API, not a per-call option.
pub const MANIFEST_CONTENT_TYPE: &str = "application/xml";

/// Immutable client settings, constructed once per client instance.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub endpoint: String,
}

impl ClientConfig {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
        }
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::new(VERIFICATION_SERVICE_URL)
    }
}

/// Raw transport result: consumed immediately by classification, never
/// retained. Any status code is data here; non-2xx is not a failure at
/// this layer.
#[derive(Debug)]
pub struct ServiceResponse {
    pub status: u16,
    pub body: String,
}

#[derive(Debug, Error)]
pub enum SubmitError {
    #[error("failed to open manifest: {path}")]
    Manifest {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("validation service unreachable")]
    Unreachable(#[source] reqwest::Error),
}

/// Single seam to the remote service, so tests can substitute a fake
/// without a network.
pub trait ValidationService {
    fn submit(&self, manifest: &Path) -> Result<ServiceResponse, SubmitError>;
}

pub struct HttpValidationService {
    endpoint: String,
    client: Client,
}

impl HttpValidationService {
    /// No timeout is configured at this layer; callers needing bounded
    /// latency impose their own.
    pub fn new(config: ClientConfig) -> Result<Self> {
        let client = Client::builder().build()?;
        Ok(Self {
            endpoint: config.endpoint,
            client,
        })
    }
}

impl ValidationService for HttpValidationService {
    fn submit(&self, manifest: &Path) -> Result<ServiceResponse, SubmitError> {
        let file = File::open(manifest).map_err(|source| SubmitError::Manifest {
            path: manifest.to_path_buf(),
            source,
        })?;

        debug!(manifest = %manifest.display(), endpoint = %self.endpoint, "submitting manifest");

        // The manifest streams from disk rather than being buffered. The
        // service enforces its own 256 KB cap and reports violations
        // through the status code.
        let response = self
            .client
            .post(&self.endpoint)
            .header(CONTENT_TYPE, MANIFEST_CONTENT_TYPE)
            .body(file)
            .send()
            .map_err(SubmitError::Unreachable)?;

        let status = response.status().as_u16();
        let body = response.text().map_err(SubmitError::Unreachable)?;
        debug!(status, bytes = body.len(), "validation service answered");

        Ok(ServiceResponse { status, body })
    }
}
