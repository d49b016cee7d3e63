//! Simulated processing time.
//!
//! Waiting goes through the [`Latency`] trait so the delay never blocks a
//! runtime worker ([`TokioLatency`] yields to the scheduler) and tests can
//! observe or skip it ([`RecordedLatency`]).

use async_trait::async_trait;
use std::sync::{Mutex, PoisonError};
use std::time::Duration;

#[async_trait]
pub trait Latency: Send + Sync {
    /// Suspends the calling task for `duration`.
    async fn wait(&self, duration: Duration);
}

/// Non-blocking sleep on the Tokio timer.
#[derive(Debug, Clone, Copy, Default)]
pub struct TokioLatency;

#[async_trait]
impl Latency for TokioLatency {
    async fn wait(&self, duration: Duration) {
        tokio::time::sleep(duration).await;
    }
}

/// Records every requested wait; optionally sleeps as well.
#[derive(Debug, Default)]
pub struct RecordedLatency {
    waits: Mutex<Vec<Duration>>,
    sleep: bool,
}

impl RecordedLatency {
    /// Records waits and returns immediately.
    pub fn instant() -> Self {
        Self::default()
    }

    /// Records waits and really sleeps for them.
    pub fn sleeping() -> Self {
        Self {
            waits: Mutex::default(),
            sleep: true,
        }
    }

    pub fn waits(&self) -> Vec<Duration> {
        self.waits
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn total(&self) -> Duration {
        self.waits().iter().sum()
    }
}

#[async_trait]
impl Latency for RecordedLatency {
    async fn wait(&self, duration: Duration) {
        self.waits
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(duration);
        if self.sleep {
            tokio::time::sleep(duration).await;
        }
    }
}
