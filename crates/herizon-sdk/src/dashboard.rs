//! Dashboard session
//!
//! Holds the latest acquisition snapshot for the signed-in user. A refresh
//! replaces the snapshot as a whole; nothing in it is patched afterwards
//! except the water counter, which lives beside it.

use crate::analytics::{derive_insights, Insights};
use crate::catalog::{MythFact, MYTHS};
use crate::cascade::FallbackCascade;
use crate::client::RecordSource;
use crate::endpoint::EndpointSpec;
use crate::error::Result;
use crate::identity::{Credentials, IdentityProvider};
use crate::types::{AcquisitionResult, DataSource};
use crate::water::{WaterSync, WaterTracker};
use crate::wizard;
use chrono::{DateTime, Utc};
use std::sync::Arc;

pub struct Dashboard<S> {
    cascade: FallbackCascade<S>,
    identity: Arc<dyn IdentityProvider>,
    snapshot: Option<AcquisitionResult>,
    water: WaterTracker,
    water_goal: u32,
}

impl<S: RecordSource> Dashboard<S> {
    pub fn new(
        cascade: FallbackCascade<S>,
        identity: Arc<dyn IdentityProvider>,
        water_goal: u32,
    ) -> Self {
        Self {
            cascade,
            identity,
            snapshot: None,
            water: WaterTracker::new(0, water_goal),
            water_goal,
        }
    }

    /// Fetch a fresh snapshot through the cascade
    pub async fn refresh(&mut self) -> Result<&AcquisitionResult> {
        self.refresh_at(Utc::now()).await
    }

    pub async fn refresh_at(&mut self, now: DateTime<Utc>) -> Result<&AcquisitionResult> {
        let credentials = Credentials::from_provider(self.identity.as_ref()).await?;
        let result = self.cascade.acquire_at(&credentials, now).await;

        if result.intake_required {
            tracing::info!(user_id = %credentials.user_id, "No tracking record yet, intake required");
        }

        self.water = WaterTracker::new(result.water_intake_count, self.water_goal);
        Ok(&*self.snapshot.insert(result))
    }

    pub fn snapshot(&self) -> Option<&AcquisitionResult> {
        self.snapshot.as_ref()
    }

    pub fn advisory(&self) -> Option<&str> {
        self.snapshot.as_ref().and_then(|s| s.advisory.as_deref())
    }

    pub fn source(&self) -> Option<DataSource> {
        self.snapshot.as_ref().map(|s| s.source)
    }

    /// Indicators for the current snapshot, `None` before the first refresh
    pub fn insights(&self, now: DateTime<Utc>) -> Result<Option<Insights>> {
        self.snapshot
            .as_ref()
            .map(|s| derive_insights(&s.record, now))
            .transpose()
    }

    pub fn water(&self) -> &WaterTracker {
        &self.water
    }

    /// Log one glass of water for the signed-in user
    pub async fn log_water(&mut self, sync: &dyn WaterSync, endpoint: &EndpointSpec) -> Result<u32> {
        let credentials = Credentials::from_provider(self.identity.as_ref()).await?;
        Ok(self.water.log_glass(sync, endpoint, &credentials).await)
    }

    pub fn daily_tips(&self) -> &'static [&'static str] {
        wizard::daily_tips()
    }

    pub fn myths(&self) -> &'static [MythFact] {
        &MYTHS
    }
}
