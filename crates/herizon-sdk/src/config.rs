//! SDK configuration
//!
//! Loaded from a TOML file; every field has a default so a partial (or
//! missing) file is fine.

use crate::endpoint::{EndpointRegistry, EndpointSpec};
use crate::error::{Result, SdkError};
use reqwest::Url;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SdkConfig {
    #[serde(default)]
    pub endpoints: EndpointsConfig,
    #[serde(default)]
    pub water: WaterConfig,
    #[serde(default)]
    pub alerts: AlertsConfig,
    #[serde(default)]
    pub notifications: NotificationsConfig,
    #[serde(default)]
    pub submission: SubmissionConfig,
}

/// Service addresses, tried in this order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EndpointsConfig {
    /// Production host
    #[serde(default = "default_server_url")]
    pub server_url: String,

    #[serde(default = "default_server_timeout")]
    pub server_timeout_ms: u64,

    /// Regional mirror; slow to wake up
    #[serde(default = "default_mirror_url")]
    pub mirror_url: String,

    #[serde(default = "default_mirror_timeout")]
    pub mirror_timeout_ms: u64,

    /// Local development host
    #[serde(default = "default_local_url")]
    pub local_url: String,

    #[serde(default = "default_local_timeout")]
    pub local_timeout_ms: u64,
}

impl Default for EndpointsConfig {
    fn default() -> Self {
        Self {
            server_url: default_server_url(),
            server_timeout_ms: default_server_timeout(),
            mirror_url: default_mirror_url(),
            mirror_timeout_ms: default_mirror_timeout(),
            local_url: default_local_url(),
            local_timeout_ms: default_local_timeout(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WaterConfig {
    /// Glasses per day; logging stops here
    #[serde(default = "default_daily_goal")]
    pub daily_goal: u32,

    #[serde(default = "default_sync_timeout")]
    pub sync_timeout_ms: u64,
}

impl Default for WaterConfig {
    fn default() -> Self {
        Self {
            daily_goal: default_daily_goal(),
            sync_timeout_ms: default_sync_timeout(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AlertsConfig {
    /// Form relays that receive SOS alerts
    #[serde(default = "default_relay_urls")]
    pub relay_urls: Vec<String>,

    /// Name used in the alert message
    #[serde(default = "default_app_name")]
    pub app_name: String,

    /// Per-relay request timeout
    #[serde(default = "default_alert_timeout")]
    pub timeout_ms: u64,
}

impl Default for AlertsConfig {
    fn default() -> Self {
        Self {
            relay_urls: default_relay_urls(),
            app_name: default_app_name(),
            timeout_ms: default_alert_timeout(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NotificationsConfig {
    #[serde(default = "default_interval")]
    pub interval_secs: u64,

    /// How long each notification stays up
    #[serde(default = "default_visible")]
    pub visible_secs: u64,
}

impl Default for NotificationsConfig {
    fn default() -> Self {
        Self {
            interval_secs: default_interval(),
            visible_secs: default_visible(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubmissionConfig {
    #[serde(default = "default_submission_timeout")]
    pub timeout_ms: u64,
}

impl Default for SubmissionConfig {
    fn default() -> Self {
        Self {
            timeout_ms: default_submission_timeout(),
        }
    }
}

// Defaults
fn default_server_url() -> String { "https://Herizon.onrender.com/".to_string() }
fn default_server_timeout() -> u64 { 8000 }
fn default_mirror_url() -> String { "https://Herizon.onrender.com/".to_string() }
fn default_mirror_timeout() -> u64 { 30_000 }
fn default_local_url() -> String { "http://localhost:3000/".to_string() }
fn default_local_timeout() -> u64 { 5000 }
fn default_daily_goal() -> u32 { 8 }
fn default_sync_timeout() -> u64 { 5000 }
fn default_relay_urls() -> Vec<String> {
    vec![
        "https://formspree.io/f/mjkooylp".to_string(),
        "https://formspree.io/f/mzzvveon".to_string(),
        "https://formspree.io/f/meozzadj".to_string(),
    ]
}
fn default_app_name() -> String { "Herizon".to_string() }
fn default_alert_timeout() -> u64 { 10_000 }
fn default_interval() -> u64 { 30 }
fn default_visible() -> u64 { 5 }
fn default_submission_timeout() -> u64 { 10_000 }

impl SdkConfig {
    pub fn from_toml_str(s: &str) -> Result<Self> {
        Ok(toml::from_str(s)?)
    }

    /// Load from `path`; a missing file yields the defaults
    pub fn load(path: &Path) -> Result<Self> {
        match std::fs::read_to_string(path) {
            Ok(contents) => Self::from_toml_str(&contents),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!(path = %path.display(), "Config file not found, using defaults");
                Ok(Self::default())
            }
            Err(e) => Err(SdkError::Config(format!(
                "Failed to read {}: {}",
                path.display(),
                e
            ))),
        }
    }

    pub fn validate(&self) -> Result<()> {
        let ep = &self.endpoints;
        for (name, url) in [
            ("server_url", &ep.server_url),
            ("mirror_url", &ep.mirror_url),
            ("local_url", &ep.local_url),
        ] {
            check_url(name, url)?;
        }
        for url in &self.alerts.relay_urls {
            check_url("relay_urls", url)?;
        }

        for (name, value) in [
            ("server_timeout_ms", ep.server_timeout_ms),
            ("mirror_timeout_ms", ep.mirror_timeout_ms),
            ("local_timeout_ms", ep.local_timeout_ms),
            ("water.sync_timeout_ms", self.water.sync_timeout_ms),
            ("alerts.timeout_ms", self.alerts.timeout_ms),
            ("submission.timeout_ms", self.submission.timeout_ms),
            ("notifications.interval_secs", self.notifications.interval_secs),
        ] {
            if value == 0 {
                return Err(SdkError::Config(format!("{} must be greater than zero", name)));
            }
        }

        if self.water.daily_goal == 0 {
            return Err(SdkError::Config(
                "water.daily_goal must be greater than zero".into(),
            ));
        }

        if self.notifications.visible_secs >= self.notifications.interval_secs {
            return Err(SdkError::Config(format!(
                "notifications.visible_secs ({}) must be shorter than interval_secs ({})",
                self.notifications.visible_secs, self.notifications.interval_secs
            )));
        }

        if self.alerts.relay_urls.is_empty() {
            return Err(SdkError::Config("alerts.relay_urls must not be empty".into()));
        }

        Ok(())
    }

    /// Ordered registry: server, mirror, local
    pub fn endpoint_registry(&self) -> Result<EndpointRegistry> {
        let ep = &self.endpoints;
        EndpointRegistry::new([
            EndpointSpec::new(ep.server_url.clone(), ep.server_timeout_ms),
            EndpointSpec::new(ep.mirror_url.clone(), ep.mirror_timeout_ms),
            EndpointSpec::new(ep.local_url.clone(), ep.local_timeout_ms),
        ])
    }

    /// Primary host with the submission timeout
    pub fn submission_endpoint(&self) -> EndpointSpec {
        EndpointSpec::new(
            self.endpoints.server_url.clone(),
            self.submission.timeout_ms,
        )
    }

    /// Primary host with the water sync timeout
    pub fn water_endpoint(&self) -> EndpointSpec {
        EndpointSpec::new(
            self.endpoints.server_url.clone(),
            self.water.sync_timeout_ms,
        )
    }

    pub fn alert_timeout(&self) -> Duration {
        Duration::from_millis(self.alerts.timeout_ms)
    }

    pub fn notification_interval(&self) -> Duration {
        Duration::from_secs(self.notifications.interval_secs)
    }

    pub fn notification_visible(&self) -> Duration {
        Duration::from_secs(self.notifications.visible_secs)
    }
}

fn check_url(name: &str, url: &str) -> Result<()> {
    if url.trim().is_empty() {
        return Err(SdkError::Config(format!("{} is empty", name)));
    }
    let parsed = Url::parse(url)
        .map_err(|e| SdkError::Config(format!("{} is not a valid URL ({}): {}", name, url, e)))?;
    if !matches!(parsed.scheme(), "http" | "https") {
        return Err(SdkError::Config(format!(
            "{} must use http or https: {}",
            name, url
        )));
    }
    Ok(())
}
