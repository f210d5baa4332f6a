//! The responder boundary: turn a prompt into a participant's reply.
//!
//! The engine depends on nothing else from the outside world. Transport,
//! authentication, and waiting for a remote model to finish all live behind
//! [`Responder::send`].
//!
//! - [`PollingResponder`]: adapts submit/poll/fetch chat APIs
//! - [`ScriptedResponder`]: closure-driven replies for harnesses and tests
//! - [`UnavailableResponder`]: fails every call

mod polling;
mod scripted;

pub use polling::{ChatBackend, ChatStatus, PollingConfig, PollingResponder};
pub use scripted::{ScriptedResponder, UnavailableResponder};

use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;

use crate::core::Participant;

/// A single prompt/reply exchange that did not produce a reply.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum ResponderError {
    #[error("responder unavailable: {0}")]
    Unavailable(String),

    #[error("no reply within {0:?}")]
    Timeout(Duration),

    #[error("reply was empty")]
    EmptyReply,

    #[error("backend rejected the request: {0}")]
    Rejected(String),

    #[error("reply still pending after {attempts} status checks")]
    PollExhausted { attempts: u32 },
}

/// Something that can answer prompts on behalf of participants.
///
/// Implementations must be shareable across tasks; the engine may issue
/// several calls of one phase concurrently.
#[async_trait]
pub trait Responder: Send + Sync {
    /// Send `prompt` to `participant` and wait for its reply.
    async fn send(&self, participant: &Participant, prompt: &str) -> Result<String, ResponderError>;
}

#[async_trait]
impl<R: Responder + ?Sized> Responder for Arc<R> {
    async fn send(&self, participant: &Participant, prompt: &str) -> Result<String, ResponderError> {
        (**self).send(participant, prompt).await
    }
}

#[async_trait]
impl<R: Responder + ?Sized> Responder for Box<R> {
    async fn send(&self, participant: &Participant, prompt: &str) -> Result<String, ResponderError> {
        (**self).send(participant, prompt).await
    }
}
