//! SOS broadcast integration tests

use std::time::Duration;

use herizon_sdk::{AlertBroadcaster, SdkError};
use serde_json::json;
use wiremock::matchers::{body_json, method};
use wiremock::{Mock, MockServer, ResponseTemplate};

async fn relay(status: u16) -> MockServer {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(body_json(json!({
            "subject": "SOS Alert",
            "message": "This is an SOS alert generated by Grace Hopper from the Herizon app."
        })))
        .respond_with(ResponseTemplate::new(status))
        .expect(1)
        .mount(&server)
        .await;
    server
}

#[tokio::test]
async fn test_all_relays_accept() {
    let relays = [relay(200).await, relay(200).await, relay(202).await];
    let urls = relays.iter().map(|r| r.uri()).collect();

    let broadcaster = AlertBroadcaster::new(urls, "Herizon", Duration::from_secs(2)).unwrap();
    broadcaster.send_sos(Some("Grace Hopper")).await.unwrap();
}

#[tokio::test]
async fn test_one_rejection_fails_broadcast() {
    let relays = [relay(200).await, relay(500).await, relay(200).await];
    let urls = relays.iter().map(|r| r.uri()).collect();

    let broadcaster = AlertBroadcaster::new(urls, "Herizon", Duration::from_secs(2)).unwrap();
    let err = broadcaster.send_sos(Some("Grace Hopper")).await.unwrap_err();

    match err {
        SdkError::Alert(detail) => assert!(detail.starts_with("1 of 3")),
        other => panic!("expected Alert, got {other:?}"),
    }
}
