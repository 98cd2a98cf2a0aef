//! HTTP client integration tests against a local mock server

use std::time::Duration;

use herizon_sdk::{
    Credentials, EndpointSpec, FetchError, RecordSource, SdkError, SubmissionClient,
    SubmissionSink, TrackingRecordClient, WizardDraft,
};
use chrono::NaiveDate;
use serde_json::json;
use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn creds() -> Credentials {
    Credentials::new("user_42", "secret-token")
}

fn record_body() -> serde_json::Value {
    json!({
        "periodTrackingData": {
            "cycleDuration": 29,
            "lastPeriodStart": "2026-10-01",
            "lastPeriodDuration": 5,
            "moodTypes": ["Calm"],
            "moodSeverity": "low",
            "moodDate": "2026-10-10",
            "symptoms": [],
            "symptomSeverities": {},
            "symptomDate": "2026-10-10",
            "sleepDuration": 8,
            "sleepQuality": "Good",
            "nextPeriodPrediction": "2026-10-30",
            "currentPhase": "Follicular",
            "waterIntakeCount": "5"
        }
    })
}

async fn fetch_with_status(status: u16) -> FetchError {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/period/periodtracking/user_42"))
        .respond_with(ResponseTemplate::new(status).set_body_string("nope"))
        .mount(&server)
        .await;

    let client = TrackingRecordClient::new().unwrap();
    client
        .fetch(&EndpointSpec::new(server.uri(), 2000), &creds())
        .await
        .unwrap_err()
}

#[tokio::test]
async fn test_fetch_sends_bearer_and_parses_record() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/period/periodtracking/user_42"))
        .and(header("authorization", "Bearer secret-token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(record_body()))
        .expect(1)
        .mount(&server)
        .await;

    let client = TrackingRecordClient::new().unwrap();
    let fetched = client
        .fetch(&EndpointSpec::new(format!("{}/", server.uri()), 2000), &creds())
        .await
        .unwrap();

    assert_eq!(fetched.record.cycle_duration_days, 29);
    assert_eq!(fetched.water_intake_count, 5);
    assert_eq!(fetched.record.sleep_duration_hours, 8.0);
}

#[tokio::test]
async fn test_status_classification() {
    assert!(matches!(
        fetch_with_status(401).await,
        FetchError::Unauthorized { .. }
    ));
    assert!(matches!(
        fetch_with_status(400).await,
        FetchError::NotFound { status: 400, .. }
    ));
    assert!(matches!(
        fetch_with_status(404).await,
        FetchError::NotFound { status: 404, .. }
    ));

    match fetch_with_status(500).await {
        FetchError::Unknown { detail, .. } => assert!(detail.contains("500")),
        other => panic!("expected Unknown, got {other:?}"),
    }
}

#[tokio::test]
async fn test_slow_endpoint_times_out() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(record_body())
                .set_delay(Duration::from_millis(800)),
        )
        .mount(&server)
        .await;

    let client = TrackingRecordClient::new().unwrap();
    let err = client
        .fetch(&EndpointSpec::new(server.uri(), 100), &creds())
        .await
        .unwrap_err();

    assert!(matches!(err, FetchError::Timeout { timeout_ms: 100, .. }));
}

#[tokio::test]
async fn test_refused_connection_is_unreachable() {
    let client = TrackingRecordClient::new().unwrap();
    let err = client
        .fetch(&EndpointSpec::new("http://127.0.0.1:1", 2000), &creds())
        .await
        .unwrap_err();

    assert!(matches!(err, FetchError::NetworkUnreachable { .. }));
}

#[tokio::test]
async fn test_malformed_body_is_unknown() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "unexpected": true })))
        .mount(&server)
        .await;

    let client = TrackingRecordClient::new().unwrap();
    let err = client
        .fetch(&EndpointSpec::new(server.uri(), 2000), &creds())
        .await
        .unwrap_err();

    match err {
        FetchError::Unknown { detail, .. } => assert!(detail.contains("invalid record payload")),
        other => panic!("expected Unknown, got {other:?}"),
    }
}

#[tokio::test]
async fn test_out_of_range_record_is_rejected() {
    for (field, value) in [("sleepDuration", json!(99)), ("lastPeriodDuration", json!(0))] {
        let mut body = record_body();
        body["periodTrackingData"][field] = value;

        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_json(body))
            .mount(&server)
            .await;

        let client = TrackingRecordClient::new().unwrap();
        let err = client
            .fetch(&EndpointSpec::new(server.uri(), 2000), &creds())
            .await
            .unwrap_err();

        match err {
            FetchError::Unknown { detail, .. } => {
                assert!(detail.starts_with("invalid record:"), "{field}: {detail}")
            }
            other => panic!("{field}: expected Unknown, got {other:?}"),
        }
    }
}

#[tokio::test]
async fn test_water_update_hits_counter_endpoint() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/period/waterupdate/user_42"))
        .and(header("authorization", "Bearer secret-token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "waterIntakeCount": 3 })))
        .expect(1)
        .mount(&server)
        .await;

    let client = TrackingRecordClient::new().unwrap();
    client
        .increment_water(&EndpointSpec::new(server.uri(), 2000), &creds())
        .await
        .unwrap();
}

#[tokio::test]
async fn test_submission_posts_camel_case_payload() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/period/trackerdata"))
        .and(header("authorization", "Bearer secret-token"))
        .and(body_partial_json(json!({
            "userId": "user_42",
            "cycleDuration": 28,
            "lastPeriodStart": "2026-10-01",
            "nextPeriodPrediction": "2026-10-29"
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({ "message": "saved" })))
        .expect(1)
        .mount(&server)
        .await;

    let mut draft = WizardDraft::new(NaiveDate::from_ymd_opt(2026, 10, 16).unwrap());
    draft.cycle_duration_days = Some(28);
    draft.last_period_start = NaiveDate::from_ymd_opt(2026, 10, 1);
    draft.next_period_predicted = NaiveDate::from_ymd_opt(2026, 10, 29);

    let sink = SubmissionClient::new(EndpointSpec::new(server.uri(), 2000)).unwrap();
    let receipt = sink.submit(&draft.to_payload("user_42"), &creds()).await.unwrap();

    assert_eq!(receipt.status, 201);
    assert_eq!(receipt.body, Some(json!({ "message": "saved" })));
}

#[tokio::test]
async fn test_rejected_submission_surfaces_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;

    let draft = WizardDraft::new(NaiveDate::from_ymd_opt(2026, 10, 16).unwrap());
    let sink = SubmissionClient::new(EndpointSpec::new(server.uri(), 2000)).unwrap();
    let err = sink
        .submit(&draft.to_payload("user_42"), &creds())
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        SdkError::Submission(FetchError::Unauthorized { .. })
    ));
}
