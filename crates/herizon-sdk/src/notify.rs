//! Periodic notification visibility
//!
//! A background task raises a visibility flag every `interval` and lowers it
//! again after `visible_for`. It shares nothing with record acquisition.

use std::time::Duration;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::{interval_at, sleep, Instant, MissedTickBehavior};

/// Handle to the running ticker; dropping it stops the task
#[derive(Debug)]
pub struct NotificationTicker {
    visible: watch::Receiver<bool>,
    handle: JoinHandle<()>,
}

impl NotificationTicker {
    /// Spawn the ticker on the current runtime.
    ///
    /// The first notification shows one full `interval` after start.
    pub fn start(interval: Duration, visible_for: Duration) -> Self {
        let (tx, rx) = watch::channel(false);

        let handle = tokio::spawn(async move {
            let mut ticks = interval_at(Instant::now() + interval, interval);
            ticks.set_missed_tick_behavior(MissedTickBehavior::Delay);

            loop {
                ticks.tick().await;
                tx.send_replace(true);
                tracing::trace!("Notification shown");
                sleep(visible_for).await;
                tx.send_replace(false);
            }
        });

        Self {
            visible: rx,
            handle,
        }
    }

    pub fn is_visible(&self) -> bool {
        *self.visible.borrow()
    }

    /// Watch the flag from elsewhere
    pub fn subscribe(&self) -> watch::Receiver<bool> {
        self.visible.clone()
    }

    pub fn stop(self) {
        self.handle.abort();
    }
}

impl Drop for NotificationTicker {
    fn drop(&mut self) {
        self.handle.abort();
    }
}
