//! Periodic health polling of the remote service.

use crate::spec::{domain::HealthReport, ports::SpecGateway};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::{debug, warn};

const MIN_POLL_INTERVAL: Duration = Duration::from_millis(1);

/// Latest known service health.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HealthState {
    /// The first check has not completed.
    Checking,
    /// The service answered with a report.
    Reported(HealthReport),
    /// The service could not be reached.
    Unreachable(String),
}

/// Background task that checks service health on a fixed interval.
///
/// The first check runs immediately. Dropping the poller, or calling
/// [`Self::stop`], cancels the task so no timer outlives its owner.
#[derive(Debug)]
pub struct HealthPoller {
    receiver: watch::Receiver<HealthState>,
    task: JoinHandle<()>,
}

impl HealthPoller {
    /// Starts polling `gateway` every `interval`.
    ///
    /// Must be called from within a tokio runtime.
    #[must_use]
    pub fn spawn<G>(gateway: Arc<G>, interval: Duration) -> Self
    where
        G: SpecGateway + 'static,
    {
        let (sender, receiver) = watch::channel(HealthState::Checking);
        let period = interval.max(MIN_POLL_INTERVAL);
        let task = tokio::spawn(async move {
            let mut ticker = tokio::time::interval(period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                ticker.tick().await;
                let state = match gateway.health_check().await {
                    Ok(report) => {
                        debug!(overall = %report.overall, "health check completed");
                        HealthState::Reported(report)
                    }
                    Err(err) => {
                        warn!(error = %err, "health check failed");
                        HealthState::Unreachable(
                            err.service_message()
                                .map_or_else(|| err.to_string(), str::to_owned),
                        )
                    }
                };
                if sender.send(state).is_err() {
                    break;
                }
            }
        });
        Self { receiver, task }
    }

    /// Returns the latest state.
    #[must_use]
    pub fn state(&self) -> HealthState {
        self.receiver.borrow().clone()
    }

    /// Returns a receiver notified on every completed check.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<HealthState> {
        self.receiver.clone()
    }

    /// Cancels polling.
    pub fn stop(self) {
        drop(self);
    }
}

impl Drop for HealthPoller {
    fn drop(&mut self) {
        self.task.abort();
    }
}
