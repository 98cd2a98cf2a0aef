//! Daily water intake
//!
//! The local count is authoritative for display. Each glass is counted
//! locally first and then mirrored to the service; a failed sync is logged
//! and the local count stands.

use crate::client::TrackingRecordClient;
use crate::endpoint::EndpointSpec;
use crate::error::FetchError;
use crate::identity::Credentials;
use async_trait::async_trait;

pub const DEFAULT_DAILY_GOAL: u32 = 8;

/// Remote side of the water counter
#[async_trait]
pub trait WaterSync: Send + Sync {
    async fn increment_water(
        &self,
        endpoint: &EndpointSpec,
        credentials: &Credentials,
    ) -> Result<(), FetchError>;
}

#[async_trait]
impl WaterSync for TrackingRecordClient {
    async fn increment_water(
        &self,
        endpoint: &EndpointSpec,
        credentials: &Credentials,
    ) -> Result<(), FetchError> {
        TrackingRecordClient::increment_water(self, endpoint, credentials).await
    }
}

/// Glasses logged today, capped at the daily goal
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WaterTracker {
    count: u32,
    goal: u32,
}

impl WaterTracker {
    /// Seed from a fetched count; values above the goal are clamped
    pub fn new(count: u32, goal: u32) -> Self {
        Self {
            count: count.min(goal),
            goal,
        }
    }

    pub fn count(&self) -> u32 {
        self.count
    }

    pub fn goal(&self) -> u32 {
        self.goal
    }

    pub fn remaining(&self) -> u32 {
        self.goal - self.count
    }

    pub fn is_goal_reached(&self) -> bool {
        self.count >= self.goal
    }

    /// Count one glass locally. Returns `false` at the goal.
    pub fn increment(&mut self) -> bool {
        if self.is_goal_reached() {
            return false;
        }
        self.count += 1;
        true
    }

    /// Count one glass and mirror it to the service.
    ///
    /// No request is made once the goal is reached. Returns the new count.
    pub async fn log_glass(
        &mut self,
        sync: &dyn WaterSync,
        endpoint: &EndpointSpec,
        credentials: &Credentials,
    ) -> u32 {
        if !self.increment() {
            tracing::debug!(goal = self.goal, "Water goal already reached");
            return self.count;
        }

        if let Err(e) = sync.increment_water(endpoint, credentials).await {
            tracing::error!(
                endpoint = %endpoint.base_address,
                error = %e,
                "Error updating water intake"
            );
        }
        self.count
    }
}

impl Default for WaterTracker {
    fn default() -> Self {
        Self::new(0, DEFAULT_DAILY_GOAL)
    }
}
