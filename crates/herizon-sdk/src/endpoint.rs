//! Candidate service endpoints
//!
//! The serving environment has no single reliable address, so the client keeps
//! an ordered list of base addresses, each with its own patience budget. Order
//! encodes trust: the first entry is the primary production host.

use crate::error::{Result, SdkError};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// One candidate base address with its request timeout
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EndpointSpec {
    pub base_address: String,
    pub timeout_ms: u64,
}

impl EndpointSpec {
    pub fn new(base_address: impl Into<String>, timeout_ms: u64) -> Self {
        Self {
            base_address: base_address.into(),
            timeout_ms,
        }
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    /// Join an API path onto the base address.
    ///
    /// Base addresses are configured both with and without a trailing slash.
    pub fn url(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.base_address.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }
}

/// Immutable, ordered, never empty set of endpoints.
///
/// Only [`EndpointRegistry::new`] builds one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EndpointRegistry {
    endpoints: Vec<EndpointSpec>,
}

impl EndpointRegistry {
    /// Build a registry, rejecting empty addresses and zero timeouts.
    ///
    /// A base address that already appears earlier in the list is dropped, so
    /// the same host is never tried twice in one cascade.
    pub fn new(endpoints: impl IntoIterator<Item = EndpointSpec>) -> Result<Self> {
        let mut kept: Vec<EndpointSpec> = Vec::new();

        for endpoint in endpoints {
            if endpoint.base_address.trim().is_empty() {
                return Err(SdkError::Config("endpoint base address is empty".into()));
            }
            if endpoint.timeout_ms == 0 {
                return Err(SdkError::Config(format!(
                    "endpoint {} has a zero timeout",
                    endpoint.base_address
                )));
            }

            let key = normalize(&endpoint.base_address);
            if kept.iter().any(|e| normalize(&e.base_address) == key) {
                tracing::debug!(endpoint = %endpoint.base_address, "Skipping duplicate endpoint");
                continue;
            }
            kept.push(endpoint);
        }

        if kept.is_empty() {
            return Err(SdkError::Config("at least one endpoint is required".into()));
        }

        Ok(Self { endpoints: kept })
    }

    /// The most trusted endpoint; submissions and counter updates go here
    pub fn primary(&self) -> &EndpointSpec {
        // `new` guarantees at least one entry
        &self.endpoints[0]
    }

    pub fn endpoints(&self) -> &[EndpointSpec] {
        &self.endpoints
    }

    pub fn len(&self) -> usize {
        self.endpoints.len()
    }

    pub fn is_empty(&self) -> bool {
        self.endpoints.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &EndpointSpec> {
        self.endpoints.iter()
    }
}

fn normalize(address: &str) -> String {
    address.trim().trim_end_matches('/').to_lowercase()
}
