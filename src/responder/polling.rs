//! Submit-then-poll chat APIs behind the plain responder contract.
//!
//! Many hosted agent platforms accept a message, hand back a job handle,
//! and expect the client to poll until the job completes before fetching
//! the reply. [`PollingResponder`] owns that loop so the engine only ever
//! sees one awaited call per prompt.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use super::{Responder, ResponderError};
use crate::core::Participant;

/// Job status reported by a chat backend.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ChatStatus {
    /// Still queued or running.
    Pending,
    /// Reply is ready to fetch.
    Completed,
    /// The backend gave up on the job.
    Failed(String),
}

/// The three calls a submit/poll/fetch API exposes.
#[async_trait]
pub trait ChatBackend: Send + Sync {
    /// Identifies a submitted job.
    type Handle: Send + Sync;

    async fn submit(&self, participant: &Participant, prompt: &str) -> Result<Self::Handle, ResponderError>;

    async fn status(&self, handle: &Self::Handle) -> Result<ChatStatus, ResponderError>;

    async fn fetch_reply(&self, handle: &Self::Handle) -> Result<String, ResponderError>;
}

/// Poll timing.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PollingConfig {
    /// Wait before the first status check.
    pub initial_delay_ms: u64,

    /// Wait between status checks.
    pub interval_ms: u64,

    /// Interval growth per check (1.0 = fixed interval).
    pub backoff: f64,

    /// Upper bound on the interval.
    pub max_interval_ms: u64,

    /// Status checks before giving up.
    pub max_attempts: u32,
}

impl Default for PollingConfig {
    fn default() -> Self {
        Self {
            initial_delay_ms: 5_000,
            interval_ms: 2_000,
            backoff: 1.0,
            max_interval_ms: 30_000,
            max_attempts: 60,
        }
    }
}

impl PollingConfig {
    #[must_use]
    pub fn with_initial_delay(mut self, delay: Duration) -> Self {
        self.initial_delay_ms = delay.as_millis() as u64;
        self
    }

    #[must_use]
    pub fn with_interval(mut self, interval: Duration) -> Self {
        self.interval_ms = interval.as_millis() as u64;
        self
    }

    #[must_use]
    pub fn with_backoff(mut self, factor: f64, max_interval: Duration) -> Self {
        self.backoff = factor.max(1.0);
        self.max_interval_ms = max_interval.as_millis() as u64;
        self
    }

    #[must_use]
    pub fn with_max_attempts(mut self, attempts: u32) -> Self {
        self.max_attempts = attempts.max(1);
        self
    }

    /// Interval to wait after the given (1-based) status check.
    #[must_use]
    pub fn interval_after(&self, attempt: u32) -> Duration {
        let grown = self.interval_ms as f64 * self.backoff.powi(attempt.saturating_sub(1) as i32);
        Duration::from_millis(grown.min(self.max_interval_ms as f64) as u64)
    }
}

/// Responder that drives a [`ChatBackend`] to completion.
#[derive(Debug)]
pub struct PollingResponder<B> {
    backend: B,
    config: PollingConfig,
}

impl<B: ChatBackend> PollingResponder<B> {
    pub fn new(backend: B, config: PollingConfig) -> Self {
        Self { backend, config }
    }

    #[must_use]
    pub fn backend(&self) -> &B {
        &self.backend
    }
}

#[async_trait]
impl<B: ChatBackend> Responder for PollingResponder<B> {
    async fn send(&self, participant: &Participant, prompt: &str) -> Result<String, ResponderError> {
        let handle = self.backend.submit(participant, prompt).await?;
        tokio::time::sleep(Duration::from_millis(self.config.initial_delay_ms)).await;

        let attempts = self.config.max_attempts.max(1);
        for attempt in 1..=attempts {
            match self.backend.status(&handle).await? {
                ChatStatus::Completed => return self.backend.fetch_reply(&handle).await,
                ChatStatus::Failed(reason) => return Err(ResponderError::Rejected(reason)),
                ChatStatus::Pending => {
                    tracing::trace!(participant = %participant.key, attempt, "reply pending");
                }
            }
            if attempt < attempts {
                tokio::time::sleep(self.config.interval_after(attempt)).await;
            }
        }

        Err(ResponderError::PollExhausted { attempts })
    }
}
