//! Error types for the Herizon SDK

use thiserror::Error;

/// Result type for SDK operations
pub type Result<T> = std::result::Result<T, SdkError>;

/// Classified failure of a single record fetch against one endpoint.
///
/// Every variant carries the base address of the endpoint that failed so the
/// cascade can name it in its advisory.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchError {
    /// The request did not complete within the endpoint's timeout
    #[error("Request to {endpoint} timed out after {timeout_ms}ms")]
    Timeout { endpoint: String, timeout_ms: u64 },

    /// The service rejected the bearer credential (HTTP 401)
    #[error("Authentication failed for {endpoint}. Please sign in again.")]
    Unauthorized { endpoint: String },

    /// The service has no record for this user yet (bad-request class status)
    #[error("Period data not found at {endpoint} (HTTP {status})")]
    NotFound { endpoint: String, status: u16 },

    /// DNS failure, refused connection, or offline
    #[error("Network error connecting to {endpoint}: {detail}")]
    NetworkUnreachable { endpoint: String, detail: String },

    /// Anything else, with the underlying detail kept for diagnostics
    #[error("Request error for {endpoint}: {detail}")]
    Unknown { endpoint: String, detail: String },
}

impl FetchError {
    /// Base address of the endpoint this failure came from
    pub fn endpoint(&self) -> &str {
        match self {
            FetchError::Timeout { endpoint, .. }
            | FetchError::Unauthorized { endpoint }
            | FetchError::NotFound { endpoint, .. }
            | FetchError::NetworkUnreachable { endpoint, .. }
            | FetchError::Unknown { endpoint, .. } => endpoint,
        }
    }

    pub fn is_unauthorized(&self) -> bool {
        matches!(self, FetchError::Unauthorized { .. })
    }

    pub fn is_timeout(&self) -> bool {
        matches!(self, FetchError::Timeout { .. })
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, FetchError::NotFound { .. })
    }

    /// The server could not be reached or did not answer usefully, as
    /// opposed to answering with an auth or missing-record status
    pub fn is_unavailable(&self) -> bool {
        matches!(
            self,
            FetchError::Timeout { .. }
                | FetchError::NetworkUnreachable { .. }
                | FetchError::Unknown { .. }
        )
    }

    /// Classify a transport-level reqwest error.
    ///
    /// Status-level classification happens in the client, which sees the
    /// response before any error is produced.
    pub fn from_transport(endpoint: &str, timeout_ms: u64, err: &reqwest::Error) -> Self {
        if err.is_timeout() {
            FetchError::Timeout {
                endpoint: endpoint.to_string(),
                timeout_ms,
            }
        } else if err.is_connect() {
            FetchError::NetworkUnreachable {
                endpoint: endpoint.to_string(),
                detail: err.to_string(),
            }
        } else {
            FetchError::Unknown {
                endpoint: endpoint.to_string(),
                detail: err.to_string(),
            }
        }
    }
}

/// SDK error types
#[derive(Error, Debug)]
pub enum SdkError {
    /// A classified fetch failure surfaced directly (record client, water sync)
    #[error(transparent)]
    Fetch(#[from] FetchError),

    /// A tracking record violates an analytics precondition
    #[error("Invalid record: {0}")]
    InvalidRecord(String),

    /// The identity collaborator reports no signed-in user
    #[error("You must be signed in to perform this action")]
    NotSignedIn,

    /// The tracker submission was rejected or could not be delivered
    #[error("Submission failed: {0}")]
    Submission(#[source] FetchError),

    /// One or more alert relays did not accept the alert
    #[error("Alert broadcast failed: {0}")]
    Alert(String),

    /// A wizard field value is out of range
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl From<serde_json::Error> for SdkError {
    fn from(err: serde_json::Error) -> Self {
        SdkError::Serialization(err.to_string())
    }
}

impl From<toml::de::Error> for SdkError {
    fn from(err: toml::de::Error) -> Self {
        SdkError::Config(err.to_string())
    }
}
