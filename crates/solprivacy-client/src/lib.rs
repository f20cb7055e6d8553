#![warn(missing_docs)]
//! # solprivacy-client
//!
//! ## Purpose
//! Implements the single HTTP boundary to the external analysis service.
//!
//! ## Responsibilities
//! - Validate endpoint policy (HTTPS, `/api/v3/analyze` path).
//! - Gate wallet addresses before any request leaves the client.
//! - Execute the analysis request through an injectable transport
//!   abstraction, with a real blocking-HTTP transport included.
//! - Collapse transport-level failures into one opaque analysis failure.
//!
//! ## Data flow
//! Wallet address -> [`AnalysisClient::fetch_raw`] sends GET through
//! [`AnalysisTransport`] -> raw JSON body handed to contract parsing.
//!
//! ## Ownership and lifetimes
//! Response bodies are owned `String` values to decouple transport buffers
//! from downstream parsing.
//!
//! ## Error model
//! Address gate violations, endpoint policy violations, and transport
//! failures are surfaced as [`ClientError`]. There is no automatic retry: a
//! failed analysis is reported once and the user resubmits.
//!
//! ## Security and privacy notes
//! Wallet addresses appear in request URLs by contract; this crate never logs
//! response bodies.

use std::sync::Arc;
use std::time::Duration;

use thiserror::Error;
use url::Url;

/// Required analysis path prefix for v3.
pub const ANALYZE_PATH_PREFIX: &str = "/api/v3/analyze";

/// Minimum accepted wallet address length after trimming.
pub const MIN_WALLET_ADDRESS_LEN: usize = 32;

/// Default request timeout for the real HTTP transport.
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Validates and normalizes a user-supplied wallet address.
///
/// # Errors
/// Returns [`ClientError::InvalidAddress`] when the trimmed address is
/// shorter than [`MIN_WALLET_ADDRESS_LEN`].
pub fn validate_wallet_address(address: &str) -> Result<String, ClientError> {
    let trimmed = address.trim();
    if trimmed.len() < MIN_WALLET_ADDRESS_LEN {
        return Err(ClientError::InvalidAddress {
            length: trimmed.len(),
        });
    }

    Ok(trimmed.to_string())
}

/// Raw transport response before contract parsing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportResponse {
    /// HTTP status code.
    pub status: u16,
    /// Raw response body.
    pub body: String,
}

/// Abstract transport used by the analysis client.
pub trait AnalysisTransport: Send + Sync {
    /// Executes one GET request against the analysis service.
    ///
    /// # Errors
    /// Returns [`ClientError::Transport`] for connection-level failures.
    fn fetch(&self, request_url: &Url) -> Result<TransportResponse, ClientError>;
}

/// Analysis client that validates endpoint policy and executes requests.
#[derive(Clone)]
pub struct AnalysisClient {
    endpoint: Url,
    transport: Arc<dyn AnalysisTransport>,
}

impl AnalysisClient {
    /// Creates a validated analysis client.
    ///
    /// # Errors
    /// Returns [`ClientError::InvalidEndpoint`] when the URL is not HTTPS or
    /// cannot serve as a base for the analyze path.
    pub fn new(
        endpoint: impl AsRef<str>,
        transport: Arc<dyn AnalysisTransport>,
    ) -> Result<Self, ClientError> {
        let endpoint = validate_analysis_endpoint(endpoint.as_ref())?;
        Ok(Self {
            endpoint,
            transport,
        })
    }

    /// Builds the request URL for one wallet address.
    ///
    /// # Errors
    /// Returns [`ClientError::InvalidAddress`] for addresses failing the gate.
    pub fn request_url(&self, address: &str) -> Result<Url, ClientError> {
        let address = validate_wallet_address(address)?;
        let mut request_url = self.endpoint.clone();
        {
            let mut segments = request_url.path_segments_mut().map_err(|_| {
                ClientError::InvalidEndpoint("endpoint cannot carry path segments".to_string())
            })?;
            segments.pop_if_empty();
            for segment in ANALYZE_PATH_PREFIX.trim_start_matches('/').split('/') {
                segments.push(segment);
            }
            segments.push(&address);
        }

        Ok(request_url)
    }

    /// Fetches the raw analysis response body for one wallet address.
    ///
    /// Any non-2xx status is collapsed into the single opaque
    /// [`ClientError::AnalysisFailed`]; callers surface it to the user as
    /// "analysis failed, check the address".
    ///
    /// # Errors
    /// Returns [`ClientError`] for gate violations, transport failures, and
    /// non-2xx responses.
    pub fn fetch_raw(&self, address: &str) -> Result<String, ClientError> {
        let request_url = self.request_url(address)?;
        let response = self.transport.fetch(&request_url)?;

        if !(200..300).contains(&response.status) {
            return Err(ClientError::AnalysisFailed {
                status: response.status,
            });
        }

        Ok(response.body)
    }

    /// Returns the configured base endpoint.
    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }
}

/// Validates v3 analysis endpoint constraints.
///
/// # Errors
/// Returns [`ClientError::InvalidEndpoint`] for unparsable or non-HTTPS URLs.
pub fn validate_analysis_endpoint(endpoint: &str) -> Result<Url, ClientError> {
    let parsed = Url::parse(endpoint)
        .map_err(|error| ClientError::InvalidEndpoint(format!("invalid endpoint url: {error}")))?;

    if parsed.scheme() != "https" {
        return Err(ClientError::InvalidEndpoint(
            "analysis endpoint must use https".to_string(),
        ));
    }

    Ok(parsed)
}

/// Real transport over a blocking HTTP client.
#[derive(Debug, Clone)]
pub struct HttpAnalysisTransport {
    client: reqwest::blocking::Client,
}

impl HttpAnalysisTransport {
    /// Creates a transport with the given request timeout.
    ///
    /// # Errors
    /// Returns [`ClientError::Transport`] when the HTTP client cannot be
    /// constructed.
    pub fn new(timeout: Duration) -> Result<Self, ClientError> {
        let client = reqwest::blocking::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|error| ClientError::Transport(error.to_string()))?;

        Ok(Self { client })
    }
}

impl AnalysisTransport for HttpAnalysisTransport {
    fn fetch(&self, request_url: &Url) -> Result<TransportResponse, ClientError> {
        let response = self
            .client
            .get(request_url.clone())
            .send()
            .map_err(|error| ClientError::Transport(error.to_string()))?;

        let status = response.status().as_u16();
        let body = response
            .text()
            .map_err(|error| ClientError::Transport(error.to_string()))?;

        Ok(TransportResponse { status, body })
    }
}

/// Errors produced by the analysis client.
#[derive(Debug, Error)]
pub enum ClientError {
    /// Wallet address failed the length gate.
    #[error("wallet address too short: {length} chars, need at least {MIN_WALLET_ADDRESS_LEN}")]
    InvalidAddress {
        /// Trimmed address length that was rejected.
        length: usize,
    },
    /// Endpoint violates security or contract requirements.
    #[error("invalid endpoint: {0}")]
    InvalidEndpoint(String),
    /// Connection-level transport failure.
    #[error("analysis transport failure: {0}")]
    Transport(String),
    /// Service answered with a non-2xx status.
    #[error("analysis failed with status {status}")]
    AnalysisFailed {
        /// HTTP status code returned by the service.
        status: u16,
    },
}
