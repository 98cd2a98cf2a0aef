//! SOS alert broadcast
//!
//! One fixed-shape message is posted to every configured form relay at once.
//! The broadcast counts as delivered only if every relay accepted it.

use crate::client::build_http_client;
use crate::error::{Result, SdkError};
use futures::future::join_all;
use reqwest::Client;
use serde::Serialize;
use std::time::Duration;

pub const SOS_SUBJECT: &str = "SOS Alert";

/// Body posted to each relay
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AlertPayload {
    pub subject: String,
    pub message: String,
}

impl AlertPayload {
    pub fn sos(display_name: Option<&str>, app_name: &str) -> Self {
        let sender = match display_name.map(str::trim) {
            Some(name) if !name.is_empty() => name,
            _ => "a user",
        };
        Self {
            subject: SOS_SUBJECT.to_string(),
            message: format!(
                "This is an SOS alert generated by {} from the {} app.",
                sender, app_name
            ),
        }
    }
}

/// Posts alerts to a fixed list of relays
#[derive(Debug, Clone)]
pub struct AlertBroadcaster {
    http: Client,
    relay_urls: Vec<String>,
    app_name: String,
    timeout: Duration,
}

impl AlertBroadcaster {
    pub fn new(
        relay_urls: Vec<String>,
        app_name: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self> {
        if relay_urls.is_empty() {
            return Err(SdkError::Config("no alert relays configured".into()));
        }
        Ok(Self {
            http: build_http_client()?,
            relay_urls,
            app_name: app_name.into(),
            timeout,
        })
    }

    pub fn relay_urls(&self) -> &[String] {
        &self.relay_urls
    }

    /// Broadcast an SOS on behalf of `display_name`
    pub async fn send_sos(&self, display_name: Option<&str>) -> Result<()> {
        let payload = AlertPayload::sos(display_name, &self.app_name);
        self.broadcast(&payload).await
    }

    /// Post `payload` to every relay concurrently; all must accept
    pub async fn broadcast(&self, payload: &AlertPayload) -> Result<()> {
        let sends = self.relay_urls.iter().map(|url| self.post(url, payload));
        let results = join_all(sends).await;

        let failed = results.iter().filter(|ok| !**ok).count();
        if failed > 0 {
            return Err(SdkError::Alert(format!(
                "{} of {} relays failed to accept the alert",
                failed,
                self.relay_urls.len()
            )));
        }

        tracing::info!(relays = self.relay_urls.len(), "SOS alert sent");
        Ok(())
    }

    async fn post(&self, url: &str, payload: &AlertPayload) -> bool {
        let response = self
            .http
            .post(url)
            .timeout(self.timeout)
            .json(payload)
            .send()
            .await;

        match response {
            Ok(resp) if resp.status().is_success() => true,
            Ok(resp) => {
                tracing::error!(relay = %url, status = %resp.status(), "Alert relay rejected message");
                false
            }
            Err(e) => {
                tracing::error!(relay = %url, error = %e, "Error sending SOS alert");
                false
            }
        }
    }
}
