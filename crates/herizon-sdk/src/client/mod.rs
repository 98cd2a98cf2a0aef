//! HTTP clients for the tracking service
//!
//! - Record fetch and water counter updates
//! - Tracker submission
//! - Mock record source for testing

mod http;
pub mod mock;
mod record_client;
mod submission;

pub(crate) use http::build_http_client;
pub use mock::{MockOutcome, MockRecordSource};
pub use record_client::{RecordSource, TrackingRecordClient};
pub use submission::{SubmissionClient, SubmissionReceipt, SubmissionSink};
