//! Passive refresh and connectivity reporting.
//!
//! Two fixed-period loops run independently of the command gate: a stats
//! refresh that replaces the stats slice, and a health probe whose outcome is
//! only reported (never written to the store). A third task reacts to
//! connectivity signals; "restored" triggers a full re-initialization.

use std::time::Duration;

use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior, interval_at};

use crate::coordinator::Coordinator;
use crate::remote::{RequestError, SimulatorClient};
use crate::store::SliceUpdate;

pub const DEFAULT_STATS_PERIOD: Duration = Duration::from_secs(30);
pub const DEFAULT_PROBE_PERIOD: Duration = Duration::from_secs(60);

#[derive(Clone, Copy, Debug)]
pub struct MonitorConfig {
    pub stats_period: Duration,
    pub probe_period: Duration,
}

impl Default for MonitorConfig {
    fn default() -> Self {
        Self {
            stats_period: DEFAULT_STATS_PERIOD,
            probe_period: DEFAULT_PROBE_PERIOD,
        }
    }
}

/// Outcome of one health probe.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Health {
    /// No probe has completed yet.
    Unknown,
    Healthy,
    /// Reachable, but answered with a non-success status.
    Degraded(u16),
    Unreachable,
}

impl Health {
    pub fn is_reachable(self) -> bool {
        matches!(self, Health::Healthy | Health::Degraded(_))
    }

    pub fn label(self) -> &'static str {
        match self {
            Health::Unknown => "UNKNOWN",
            Health::Healthy => "HEALTHY",
            Health::Degraded(_) => "DEGRADED",
            Health::Unreachable => "UNREACHABLE",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct HealthStatus {
    pub health: Health,
    pub checked_at: Option<Instant>,
}

impl Default for HealthStatus {
    fn default() -> Self {
        Self {
            health: Health::Unknown,
            checked_at: None,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Connectivity {
    Restored,
    Lost,
}

/// Map a probe result to a health state.
pub fn classify(result: &Result<reqwest::StatusCode, RequestError>) -> Health {
    match result {
        Ok(status) if status.is_success() => Health::Healthy,
        Ok(status) => Health::Degraded(status.as_u16()),
        Err(_) => Health::Unreachable,
    }
}

/// Issue one probe and classify it.
pub async fn probe(client: &SimulatorClient) -> Health {
    classify(&client.probe().await)
}

/// Fetch the stats snapshot and replace it in the store. Not gated.
pub async fn refresh_stats(coordinator: &Coordinator) -> Result<(), RequestError> {
    match coordinator.client().memory_stats().await {
        Ok(stats) => {
            coordinator.with_session(|s| s.apply(SliceUpdate::Stats(stats)));
            Ok(())
        }
        Err(err) => {
            coordinator.with_session(|s| s.error(format!("Failed to load stats: {}", err)));
            Err(err)
        }
    }
}

/// Turn consecutive probe outcomes into connectivity edges.
#[derive(Debug, Default)]
struct EdgeDetector {
    reachable: Option<bool>,
}

impl EdgeDetector {
    fn observe(&mut self, health: Health) -> Option<Connectivity> {
        let now = health.is_reachable();
        let edge = match self.reachable {
            Some(true) if !now => Some(Connectivity::Lost),
            Some(false) if now => Some(Connectivity::Restored),
            _ => None,
        };
        self.reachable = Some(now);
        edge
    }
}

/// Handle to the running monitor tasks. Dropping it stops them.
pub struct MonitorHandle {
    health: watch::Receiver<HealthStatus>,
    signals: mpsc::UnboundedSender<Connectivity>,
    tasks: Vec<JoinHandle<()>>,
}

impl MonitorHandle {
    pub fn health(&self) -> HealthStatus {
        *self.health.borrow()
    }

    pub fn subscribe(&self) -> watch::Receiver<HealthStatus> {
        self.health.clone()
    }

    /// Inject a connectivity signal as if the environment had raised it.
    pub fn signal(&self, signal: Connectivity) {
        let _ = self.signals.send(signal);
    }

    pub fn signal_sender(&self) -> mpsc::UnboundedSender<Connectivity> {
        self.signals.clone()
    }
}

impl Drop for MonitorHandle {
    fn drop(&mut self) {
        for task in &self.tasks {
            task.abort();
        }
    }
}

pub struct Monitor;

impl Monitor {
    /// Start the stats refresh, health probe and connectivity tasks. Call once
    /// initialization has completed.
    pub fn spawn(coordinator: Coordinator, config: MonitorConfig) -> MonitorHandle {
        let (health_tx, health_rx) = watch::channel(HealthStatus::default());
        let (signal_tx, signal_rx) = mpsc::unbounded_channel();

        let tasks = vec![
            tokio::spawn(stats_loop(coordinator.clone(), config.stats_period)),
            tokio::spawn(probe_loop(
                coordinator.clone(),
                config.probe_period,
                health_tx,
                signal_tx.clone(),
            )),
            tokio::spawn(connectivity_loop(coordinator, signal_rx)),
        ];

        MonitorHandle {
            health: health_rx,
            signals: signal_tx,
            tasks,
        }
    }
}

async fn stats_loop(coordinator: Coordinator, period: Duration) {
    let mut ticker = interval_at(Instant::now() + period, period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
    loop {
        ticker.tick().await;
        let _ = refresh_stats(&coordinator).await;
    }
}

async fn probe_loop(
    coordinator: Coordinator,
    period: Duration,
    health_tx: watch::Sender<HealthStatus>,
    signals: mpsc::UnboundedSender<Connectivity>,
) {
    let mut edges = EdgeDetector::default();
    let mut ticker = interval_at(Instant::now() + period, period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
    loop {
        ticker.tick().await;
        let health = probe(coordinator.client()).await;
        coordinator.with_session(|s| match health {
            Health::Healthy => s.info("Backend connection: Healthy"),
            Health::Degraded(code) => {
                s.warn(format!("Backend connection: Issues detected (HTTP {})", code))
            }
            Health::Unreachable | Health::Unknown => s.error("Backend connection: Failed"),
        });
        let _ = health_tx.send(HealthStatus {
            health,
            checked_at: Some(Instant::now()),
        });
        if let Some(edge) = edges.observe(health) {
            let _ = signals.send(edge);
        }
    }
}

async fn connectivity_loop(
    coordinator: Coordinator,
    mut signals: mpsc::UnboundedReceiver<Connectivity>,
) {
    while let Some(signal) = signals.recv().await {
        match signal {
            Connectivity::Restored => {
                coordinator.with_session(|s| s.info("Network connection restored"));
                coordinator.initialize().await;
            }
            Connectivity::Lost => {
                coordinator.with_session(|s| s.warn("Network connection lost"));
            }
        }
    }
}

#[cfg(test)]
#[path = "tests/monitor_tests.rs"]
mod tests;
