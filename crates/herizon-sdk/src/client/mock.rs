//! Mock record source for testing.

use super::record_client::RecordSource;
use crate::endpoint::EndpointSpec;
use crate::error::FetchError;
use crate::identity::Credentials;
use crate::types::FetchedRecord;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Mutex;

/// Scripted result for one endpoint
#[derive(Debug, Clone)]
pub enum MockOutcome {
    Record(FetchedRecord),
    Timeout,
    Unauthorized,
    NotFound,
    Unreachable,
    Unknown(String),
}

impl MockOutcome {
    fn resolve(&self, endpoint: &EndpointSpec) -> Result<FetchedRecord, FetchError> {
        let address = endpoint.base_address.clone();
        match self {
            MockOutcome::Record(record) => Ok(record.clone()),
            MockOutcome::Timeout => Err(FetchError::Timeout {
                endpoint: address,
                timeout_ms: endpoint.timeout_ms,
            }),
            MockOutcome::Unauthorized => Err(FetchError::Unauthorized { endpoint: address }),
            MockOutcome::NotFound => Err(FetchError::NotFound {
                endpoint: address,
                status: 400,
            }),
            MockOutcome::Unreachable => Err(FetchError::NetworkUnreachable {
                endpoint: address,
                detail: "connection refused".to_string(),
            }),
            MockOutcome::Unknown(detail) => Err(FetchError::Unknown {
                endpoint: address,
                detail: detail.clone(),
            }),
        }
    }
}

/// Mock source with per-endpoint scripted outcomes.
///
/// Endpoints without a script are unreachable. Every call is recorded so
/// tests can assert which endpoints were tried and in what order.
#[derive(Debug, Default)]
pub struct MockRecordSource {
    outcomes: HashMap<String, MockOutcome>,
    calls: Mutex<Vec<String>>,
}

impl MockRecordSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Script the outcome for a base address
    pub fn with_outcome(mut self, base_address: impl Into<String>, outcome: MockOutcome) -> Self {
        self.outcomes.insert(base_address.into(), outcome);
        self
    }

    /// Base addresses fetched so far, in call order
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().map(|c| c.clone()).unwrap_or_default()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().map(|c| c.len()).unwrap_or(0)
    }
}

#[async_trait]
impl RecordSource for MockRecordSource {
    async fn fetch(
        &self,
        endpoint: &EndpointSpec,
        _credentials: &Credentials,
    ) -> Result<FetchedRecord, FetchError> {
        if let Ok(mut calls) = self.calls.lock() {
            calls.push(endpoint.base_address.clone());
        }

        match self.outcomes.get(&endpoint.base_address) {
            Some(outcome) => outcome.resolve(endpoint),
            None => MockOutcome::Unreachable.resolve(endpoint),
        }
    }
}
