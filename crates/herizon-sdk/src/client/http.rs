//! Shared request plumbing: timeout bounding and status classification

use crate::endpoint::EndpointSpec;
use crate::error::{FetchError, Result, SdkError};
use reqwest::{header, Client, RequestBuilder, StatusCode};

pub(crate) fn build_http_client() -> Result<Client> {
    let mut headers = header::HeaderMap::new();
    headers.insert(
        header::CONTENT_TYPE,
        header::HeaderValue::from_static("application/json"),
    );

    Client::builder()
        .default_headers(headers)
        .build()
        .map_err(|e| SdkError::Config(format!("Failed to build HTTP client: {}", e)))
}

/// Successful response, body already read
#[derive(Debug)]
pub(crate) struct BoundedResponse {
    pub status: StatusCode,
    pub body: String,
}

/// Send `request` and read its body, all within the endpoint's timeout.
///
/// The whole exchange runs under one deadline; once it elapses the in-flight
/// future is dropped and whatever arrives later is never seen.
pub(crate) async fn send_bounded(
    request: RequestBuilder,
    endpoint: &EndpointSpec,
) -> std::result::Result<BoundedResponse, FetchError> {
    let timeout = endpoint.timeout();
    let exchange = async {
        let response = request
            .timeout(timeout)
            .send()
            .await
            .map_err(|e| FetchError::from_transport(&endpoint.base_address, endpoint.timeout_ms, &e))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| FetchError::from_transport(&endpoint.base_address, endpoint.timeout_ms, &e))?;

        classify_status(status, body, endpoint)
    };

    match tokio::time::timeout(timeout, exchange).await {
        Ok(result) => result,
        Err(_) => Err(FetchError::Timeout {
            endpoint: endpoint.base_address.clone(),
            timeout_ms: endpoint.timeout_ms,
        }),
    }
}

fn classify_status(
    status: StatusCode,
    body: String,
    endpoint: &EndpointSpec,
) -> std::result::Result<BoundedResponse, FetchError> {
    if status.is_success() {
        return Ok(BoundedResponse { status, body });
    }

    let endpoint_addr = endpoint.base_address.clone();
    if status == StatusCode::UNAUTHORIZED {
        return Err(FetchError::Unauthorized {
            endpoint: endpoint_addr,
        });
    }
    if status.is_client_error() {
        return Err(FetchError::NotFound {
            endpoint: endpoint_addr,
            status: status.as_u16(),
        });
    }

    Err(FetchError::Unknown {
        endpoint: endpoint_addr,
        detail: format!("HTTP {} - {}", status.as_u16(), body),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn endpoint() -> EndpointSpec {
        EndpointSpec::new("http://svc", 1000)
    }

    #[test]
    fn test_classify_status() {
        assert!(classify_status(StatusCode::OK, String::new(), &endpoint()).is_ok());
        assert!(classify_status(StatusCode::UNAUTHORIZED, String::new(), &endpoint())
            .unwrap_err()
            .is_unauthorized());
        assert!(classify_status(StatusCode::BAD_REQUEST, String::new(), &endpoint())
            .unwrap_err()
            .is_not_found());
        assert!(classify_status(StatusCode::NOT_FOUND, String::new(), &endpoint())
            .unwrap_err()
            .is_not_found());

        match classify_status(StatusCode::BAD_GATEWAY, "upstream".into(), &endpoint()) {
            Err(FetchError::Unknown { detail, .. }) => assert_eq!(detail, "HTTP 502 - upstream"),
            other => panic!("unexpected classification: {other:?}"),
        }
    }
}
