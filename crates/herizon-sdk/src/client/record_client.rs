//! Tracking record client
//!
//! Fetches one user's record from one endpoint. Each call is bounded by the
//! endpoint's own timeout and fails with a classified [`FetchError`].

use super::http::{build_http_client, send_bounded};
use crate::endpoint::EndpointSpec;
use crate::error::{FetchError, Result};
use crate::identity::Credentials;
use crate::types::{FetchedRecord, RecordEnvelope};
use async_trait::async_trait;
use reqwest::{header, Client};

/// Anything that can produce a tracking record from an endpoint.
///
/// The cascade is written against this trait so it can be driven by the HTTP
/// client in production and by [`super::MockRecordSource`] in tests.
#[async_trait]
pub trait RecordSource: Send + Sync {
    async fn fetch(
        &self,
        endpoint: &EndpointSpec,
        credentials: &Credentials,
    ) -> std::result::Result<FetchedRecord, FetchError>;
}

/// HTTP client for the tracking service's record endpoints
#[derive(Debug, Clone)]
pub struct TrackingRecordClient {
    http: Client,
}

impl TrackingRecordClient {
    pub fn new() -> Result<Self> {
        Ok(Self {
            http: build_http_client()?,
        })
    }

    /// Reuse an existing reqwest client (shared connection pool)
    pub fn with_http_client(http: Client) -> Self {
        Self { http }
    }

    /// Bump the server-side water counter by one glass.
    ///
    /// `GET /api/period/waterupdate/{userId}`; the response body is ignored.
    pub async fn increment_water(
        &self,
        endpoint: &EndpointSpec,
        credentials: &Credentials,
    ) -> std::result::Result<(), FetchError> {
        let url = endpoint.url(&format!("api/period/waterupdate/{}", credentials.user_id));
        let request = self
            .http
            .get(&url)
            .header(header::AUTHORIZATION, credentials.bearer());

        send_bounded(request, endpoint).await?;
        Ok(())
    }
}

#[async_trait]
impl RecordSource for TrackingRecordClient {
    async fn fetch(
        &self,
        endpoint: &EndpointSpec,
        credentials: &Credentials,
    ) -> std::result::Result<FetchedRecord, FetchError> {
        let url = endpoint.url(&format!("api/period/periodtracking/{}", credentials.user_id));
        tracing::debug!(url = %url, timeout_ms = endpoint.timeout_ms, "Fetching tracking record");

        let request = self
            .http
            .get(&url)
            .header(header::AUTHORIZATION, credentials.bearer());
        let response = send_bounded(request, endpoint).await?;

        let envelope: RecordEnvelope =
            serde_json::from_str(&response.body).map_err(|e| FetchError::Unknown {
                endpoint: endpoint.base_address.clone(),
                detail: format!("invalid record payload: {}", e),
            })?;

        let fetched = FetchedRecord::from(envelope);
        fetched
            .record
            .validate()
            .map_err(|detail| FetchError::Unknown {
                endpoint: endpoint.base_address.clone(),
                detail: format!("invalid record: {}", detail),
            })?;

        Ok(fetched)
    }
}
