//! Herizon SDK - cycle tracking client
//!
//! Client-side core of the Herizon tracking service.
//!
//! # Architecture
//!
//! - **Acquisition**: the signed-in user's record is fetched through an
//!   ordered endpoint cascade (production → mirror → local). The first
//!   endpoint that answers wins; if none does, a synthetic record is returned
//!   with an advisory explaining why.
//! - **Analytics**: cycle day, fertile window, PMS likelihood and rest status
//!   are derived from a record and a clock, never stored.
//! - **Intake**: a five-step wizard collects a new record and submits it in
//!   one request.
//!
//! # Example
//!
//! ```rust,ignore
//! use herizon_sdk::{FallbackCascade, SdkConfig, StaticIdentity, TrackingRecordClient, Dashboard};
//! use std::sync::Arc;
//!
//! let config = SdkConfig::default();
//! let cascade = FallbackCascade::new(TrackingRecordClient::new()?, config.endpoint_registry()?);
//! let identity = Arc::new(StaticIdentity::signed_in("user_123", token));
//!
//! let mut dashboard = Dashboard::new(cascade, identity, config.water.daily_goal);
//! let snapshot = dashboard.refresh().await?;
//! if let Some(advisory) = &snapshot.advisory {
//!     eprintln!("{advisory}");
//! }
//! ```

// Error types
pub mod error;

// Record and acquisition types
pub mod types;

// Mood and symptom catalogs
pub mod catalog;

// Endpoint registry
pub mod endpoint;

// Identity collaborator
pub mod identity;

// HTTP clients
pub mod client;

// Ordered fallback acquisition
pub mod cascade;

// Derived cycle indicators
pub mod analytics;

// Intake wizard
pub mod wizard;

pub mod water;
pub mod alerts;
pub mod notify;
pub mod dashboard;
pub mod config;

// Re-export error types
pub use error::{FetchError, Result, SdkError};

// Re-export core types
pub use types::{
    AcquisitionResult, CyclePhase, DataSource, FetchedRecord, MoodSeverity, SleepQuality,
    SymptomSeverity, TrackingRecord,
};

pub use endpoint::{EndpointRegistry, EndpointSpec};
pub use identity::{Credentials, IdentityProvider, StaticIdentity};

// Re-export client types
pub use client::{
    MockOutcome, MockRecordSource, RecordSource, SubmissionClient, SubmissionReceipt,
    SubmissionSink, TrackingRecordClient,
};

pub use cascade::FallbackCascade;
pub use analytics::{derive_insights, predict_next_period, Insights};
pub use wizard::{Completion, IntakeWizard, SubmissionPayload, WizardDraft, WizardStep};
pub use water::{WaterSync, WaterTracker};
pub use alerts::{AlertBroadcaster, AlertPayload};
pub use notify::NotificationTicker;
pub use dashboard::Dashboard;
pub use config::SdkConfig;
