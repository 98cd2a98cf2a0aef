//! Fallback cascade across service endpoints
//!
//! Endpoints are tried strictly one at a time, in registry order, each with
//! its own timeout. The first success wins and later endpoints are never
//! contacted. If every endpoint fails the cascade still returns a usable
//! result: a synthetic record plus an advisory explaining why.
//!
//! Worst-case latency is the sum of all per-endpoint timeouts.

use crate::client::RecordSource;
use crate::endpoint::EndpointRegistry;
use crate::error::FetchError;
use crate::identity::Credentials;
use crate::types::{AcquisitionResult, DataSource, TrackingRecord};
use chrono::{DateTime, Utc};

pub const AUTH_FAILED_ADVISORY: &str = "Authentication failed. Please sign in again.";

/// Shown when the local fallback answered because a server was unavailable
pub const LOCAL_DATA_ADVISORY: &str = "Using local data due to server unavailability.";

/// Drives a [`RecordSource`] across an [`EndpointRegistry`]
pub struct FallbackCascade<S> {
    source: S,
    registry: EndpointRegistry,
}

impl<S: RecordSource> FallbackCascade<S> {
    pub fn new(source: S, registry: EndpointRegistry) -> Self {
        Self { source, registry }
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    pub fn registry(&self) -> &EndpointRegistry {
        &self.registry
    }

    /// Acquire the user's record; never fails
    pub async fn acquire(&self, credentials: &Credentials) -> AcquisitionResult {
        self.acquire_at(credentials, Utc::now()).await
    }

    /// Same as [`acquire`](Self::acquire) with an explicit clock for the
    /// synthetic fallback
    pub async fn acquire_at(
        &self,
        credentials: &Credentials,
        now: DateTime<Utc>,
    ) -> AcquisitionResult {
        let endpoints = self.registry.endpoints();
        let mut failures: Vec<FetchError> = Vec::new();

        for (index, endpoint) in endpoints.iter().enumerate() {
            tracing::info!(
                endpoint = %endpoint.base_address,
                timeout_ms = endpoint.timeout_ms,
                "Attempting to fetch tracking record"
            );

            match self.source.fetch(endpoint, credentials).await {
                Ok(fetched) => {
                    let source = DataSource::for_rank(index, endpoints.len());
                    tracing::info!(
                        endpoint = %endpoint.base_address,
                        source = ?source,
                        prior_failures = failures.len(),
                        "Tracking record received"
                    );

                    let advisory = (source == DataSource::Local
                        && failures.iter().any(FetchError::is_unavailable))
                    .then(|| LOCAL_DATA_ADVISORY.to_string());

                    return AcquisitionResult {
                        record: fetched.record,
                        source,
                        advisory,
                        water_intake_count: fetched.water_intake_count,
                        intake_required: failures.iter().any(FetchError::is_not_found),
                        failures,
                    };
                }
                Err(e) => {
                    tracing::warn!(endpoint = %endpoint.base_address, error = %e, "Fetch failed");
                    failures.push(e);
                }
            }
        }

        tracing::warn!(
            attempts = failures.len(),
            "All endpoints failed, using sample data"
        );

        AcquisitionResult {
            record: TrackingRecord::synthetic(now),
            source: DataSource::Synthetic,
            advisory: Some(degradation_advisory(&failures, &self.registry)),
            water_intake_count: 0,
            intake_required: failures.iter().any(FetchError::is_not_found),
            failures,
        }
    }
}

/// Advisory for a run where every endpoint failed.
///
/// An authentication failure outranks everything: the user has to sign in
/// again before any data can be trusted. Timeouts come next and name the
/// endpoints that timed out.
pub fn degradation_advisory(failures: &[FetchError], registry: &EndpointRegistry) -> String {
    if failures.iter().any(FetchError::is_unauthorized) {
        return AUTH_FAILED_ADVISORY.to_string();
    }

    let timed_out: Vec<&str> = failures
        .iter()
        .filter(|f| f.is_timeout())
        .map(FetchError::endpoint)
        .collect();

    if !timed_out.is_empty() {
        return format!(
            "Unable to connect to the server ({}). Connection timed out. Using sample data for demonstration purposes. Please check your internet connection and try again later.",
            join_addresses(&timed_out)
        );
    }

    let all: Vec<&str> = registry.iter().map(|e| e.base_address.as_str()).collect();
    format!(
        "Unable to connect to the server ({}). Using sample data for demonstration purposes. Please check your internet connection and try again later.",
        join_addresses(&all)
    )
}

/// "a", "a or b", "a, b or c"
fn join_addresses(addresses: &[&str]) -> String {
    match addresses.split_last() {
        None => String::new(),
        Some((last, [])) => last.to_string(),
        Some((last, rest)) => format!("{} or {}", rest.join(", "), last),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::{MockOutcome, MockRecordSource};
    use crate::endpoint::EndpointSpec;
    use crate::types::FetchedRecord;
    use chrono::TimeZone;

    const PRIMARY: &str = "https://primary.example";
    const MIRROR: &str = "https://mirror.example";
    const LOCAL: &str = "http://localhost:3000";

    fn registry() -> EndpointRegistry {
        EndpointRegistry::new([
            EndpointSpec::new(PRIMARY, 8000),
            EndpointSpec::new(MIRROR, 30000),
            EndpointSpec::new(LOCAL, 5000),
        ])
        .unwrap()
    }

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 10, 16, 9, 0, 0).unwrap()
    }

    fn fetched(cycle: u32, water: u32) -> FetchedRecord {
        let mut record = TrackingRecord::synthetic(now());
        record.cycle_duration_days = cycle;
        FetchedRecord {
            record,
            water_intake_count: water,
        }
    }

    fn creds() -> Credentials {
        Credentials::new("user_1", "token")
    }

    #[tokio::test]
    async fn test_primary_success_short_circuits() {
        let source = MockRecordSource::new()
            .with_outcome(PRIMARY, MockOutcome::Record(fetched(30, 4)))
            .with_outcome(MIRROR, MockOutcome::Record(fetched(31, 0)));
        let cascade = FallbackCascade::new(source, registry());

        let result = cascade.acquire_at(&creds(), now()).await;

        assert_eq!(result.source, DataSource::Primary);
        assert_eq!(result.record.cycle_duration_days, 30);
        assert_eq!(result.water_intake_count, 4);
        assert!(result.advisory.is_none());
        assert_eq!(cascade.source().calls(), vec![PRIMARY.to_string()]);
    }

    #[tokio::test]
    async fn test_falls_through_in_order() {
        let source = MockRecordSource::new()
            .with_outcome(PRIMARY, MockOutcome::Timeout)
            .with_outcome(MIRROR, MockOutcome::Unreachable)
            .with_outcome(LOCAL, MockOutcome::Record(fetched(27, 2)));
        let cascade = FallbackCascade::new(source, registry());

        let result = cascade.acquire_at(&creds(), now()).await;

        assert_eq!(result.source, DataSource::Local);
        assert_eq!(result.failures.len(), 2);
        assert_eq!(result.advisory.as_deref(), Some(LOCAL_DATA_ADVISORY));
        assert_eq!(
            cascade.source().calls(),
            vec![PRIMARY.to_string(), MIRROR.to_string(), LOCAL.to_string()]
        );
    }

    #[tokio::test]
    async fn test_success_after_unauthorized_has_no_advisory() {
        let source = MockRecordSource::new()
            .with_outcome(PRIMARY, MockOutcome::Unauthorized)
            .with_outcome(MIRROR, MockOutcome::Record(fetched(28, 1)));

        let result = FallbackCascade::new(source, registry())
            .acquire_at(&creds(), now())
            .await;

        assert_eq!(result.source, DataSource::Secondary);
        assert!(result.advisory.is_none());
    }

    #[tokio::test]
    async fn test_local_after_unauthorized_has_no_advisory() {
        let registry = EndpointRegistry::new([
            EndpointSpec::new(PRIMARY, 8000),
            EndpointSpec::new(LOCAL, 5000),
        ])
        .unwrap();
        let source = MockRecordSource::new()
            .with_outcome(PRIMARY, MockOutcome::Unauthorized)
            .with_outcome(LOCAL, MockOutcome::Record(fetched(28, 1)));

        let result = FallbackCascade::new(source, registry)
            .acquire_at(&creds(), now())
            .await;

        assert_eq!(result.source, DataSource::Local);
        assert!(result.advisory.is_none());
    }

    #[tokio::test]
    async fn test_local_answer_without_failures_has_no_advisory() {
        let registry = EndpointRegistry::new([EndpointSpec::new(LOCAL, 5000)]).unwrap();
        let source = MockRecordSource::new().with_outcome(LOCAL, MockOutcome::Record(fetched(28, 0)));

        let result = FallbackCascade::new(source, registry)
            .acquire_at(&creds(), now())
            .await;

        assert_eq!(result.source, DataSource::Primary);
        assert!(result.advisory.is_none());
    }

    #[tokio::test]
    async fn test_unauthorized_outranks_timeouts() {
        let source = MockRecordSource::new()
            .with_outcome(PRIMARY, MockOutcome::Timeout)
            .with_outcome(MIRROR, MockOutcome::Unauthorized)
            .with_outcome(LOCAL, MockOutcome::Timeout);

        let result = FallbackCascade::new(source, registry())
            .acquire_at(&creds(), now())
            .await;

        assert_eq!(result.source, DataSource::Synthetic);
        assert_eq!(result.advisory.as_deref(), Some(AUTH_FAILED_ADVISORY));
    }

    #[tokio::test]
    async fn test_timeout_advisory_names_timed_out_endpoints() {
        let source = MockRecordSource::new()
            .with_outcome(PRIMARY, MockOutcome::Timeout)
            .with_outcome(MIRROR, MockOutcome::Unknown("HTTP 500".into()))
            .with_outcome(LOCAL, MockOutcome::Timeout);

        let result = FallbackCascade::new(source, registry())
            .acquire_at(&creds(), now())
            .await;

        let advisory = result.advisory.unwrap();
        assert!(advisory.contains("timed out"));
        assert!(advisory.contains(&format!("{} or {}", PRIMARY, LOCAL)));
        assert!(!advisory.contains(MIRROR));
    }

    #[tokio::test]
    async fn test_total_failure_synthesizes_sample_record() {
        let cascade = FallbackCascade::new(MockRecordSource::new(), registry());

        let result = cascade.acquire_at(&creds(), now()).await;

        assert_eq!(result.source, DataSource::Synthetic);
        assert_eq!(result.record.cycle_duration_days, 28);
        assert_eq!(result.water_intake_count, 0);
        assert_eq!(cascade.source().call_count(), 3);

        let advisory = result.advisory.unwrap();
        assert!(advisory.contains("sample data"));
        assert!(!advisory.contains("timed out"));
        assert!(advisory.contains(&format!("{}, {} or {}", PRIMARY, MIRROR, LOCAL)));
    }

    #[tokio::test]
    async fn test_not_found_flags_intake() {
        let source = MockRecordSource::new()
            .with_outcome(PRIMARY, MockOutcome::NotFound)
            .with_outcome(MIRROR, MockOutcome::NotFound)
            .with_outcome(LOCAL, MockOutcome::NotFound);

        let result = FallbackCascade::new(source, registry())
            .acquire_at(&creds(), now())
            .await;

        assert!(result.intake_required);
        assert_eq!(result.source, DataSource::Synthetic);
    }

    #[test]
    fn test_join_addresses() {
        assert_eq!(join_addresses(&[]), "");
        assert_eq!(join_addresses(&["a"]), "a");
        assert_eq!(join_addresses(&["a", "b"]), "a or b");
        assert_eq!(join_addresses(&["a", "b", "c"]), "a, b or c");
    }
}
