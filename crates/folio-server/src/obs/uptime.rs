//! Uptime tracker: periodically folds elapsed wall-clock time into
//! `uptime_seconds_total`.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior};

use super::SiteMetrics;

pub struct UptimeTracker {
    metrics: Arc<SiteMetrics>,
    period: Duration,
    last: Instant,
}

impl UptimeTracker {
    pub fn new(metrics: Arc<SiteMetrics>, period: Duration) -> Self {
        Self {
            metrics,
            period,
            last: Instant::now(),
        }
    }

    /// Add the time since the previous tick (not since boot) to the counter.
    pub fn tick(&mut self, now: Instant) -> Duration {
        let delta = now.saturating_duration_since(self.last);
        self.metrics.add_uptime(delta);
        self.last = now;
        delta
    }

    /// Run on the current runtime until `shutdown` flips to `true` or its
    /// sender is dropped.
    pub fn spawn(self, shutdown: watch::Receiver<bool>) -> JoinHandle<()> {
        tokio::spawn(self.run(shutdown))
    }

    pub async fn run(mut self, mut shutdown: watch::Receiver<bool>) {
        tracing::info!(period_secs = self.period.as_secs(), "uptime tracker started");

        self.last = Instant::now();
        let mut ticker = tokio::time::interval_at(self.last + self.period, self.period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            if *shutdown.borrow() {
                break;
            }
            tokio::select! {
                biased;

                changed = shutdown.changed() => {
                    if changed.is_err() {
                        break;
                    }
                }
                _ = ticker.tick() => {
                    self.tick(Instant::now());
                }
            }
        }

        tracing::info!("uptime tracker stopped");
    }
}
