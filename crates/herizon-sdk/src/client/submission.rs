//! Tracker submission client
//!
//! Posts a completed intake draft to the primary endpoint as one atomic
//! request. There is no automatic retry; failures go back to the wizard.

use super::http::{build_http_client, send_bounded};
use crate::endpoint::EndpointSpec;
use crate::error::{Result, SdkError};
use crate::identity::Credentials;
use crate::wizard::SubmissionPayload;
use reqwest::{header, Client};

/// Acknowledgement returned by the service
#[derive(Debug, Clone, PartialEq)]
pub struct SubmissionReceipt {
    pub status: u16,
    /// Parsed response body, when the service sent JSON
    pub body: Option<serde_json::Value>,
}

/// Something that can deliver a submission payload
#[async_trait::async_trait]
pub trait SubmissionSink: Send + Sync {
    async fn submit(
        &self,
        payload: &SubmissionPayload,
        credentials: &Credentials,
    ) -> Result<SubmissionReceipt>;
}

/// HTTP client for `POST /api/period/trackerdata`
#[derive(Debug, Clone)]
pub struct SubmissionClient {
    http: Client,
    endpoint: EndpointSpec,
}

impl SubmissionClient {
    /// Create a client posting to `endpoint`, normally the registry's primary
    pub fn new(endpoint: EndpointSpec) -> Result<Self> {
        Ok(Self {
            http: build_http_client()?,
            endpoint,
        })
    }

    pub fn endpoint(&self) -> &EndpointSpec {
        &self.endpoint
    }
}

#[async_trait::async_trait]
impl SubmissionSink for SubmissionClient {
    async fn submit(
        &self,
        payload: &SubmissionPayload,
        credentials: &Credentials,
    ) -> Result<SubmissionReceipt> {
        let url = self.endpoint.url("api/period/trackerdata");
        tracing::info!(url = %url, "Submitting tracker data");

        let request = self
            .http
            .post(&url)
            .header(header::AUTHORIZATION, credentials.bearer())
            .json(payload);
        let response = send_bounded(request, &self.endpoint)
            .await
            .map_err(SdkError::Submission)?;

        let receipt = SubmissionReceipt {
            status: response.status.as_u16(),
            body: serde_json::from_str(&response.body).ok(),
        };
        tracing::info!(status = receipt.status, "Tracker data accepted");
        Ok(receipt)
    }
}
