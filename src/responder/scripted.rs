//! In-process responders.

use async_trait::async_trait;
use std::sync::Mutex;

use super::{Responder, ResponderError};
use crate::core::{Participant, ParticipantId};

type ReplyFn = dyn Fn(&Participant, &str) -> Result<String, ResponderError> + Send + Sync;

/// Responder backed by a closure, recording every prompt it receives.
///
/// ```
/// use undercover::responder::ScriptedResponder;
///
/// let responder = ScriptedResponder::new(|p, prompt| {
///     Ok(if prompt.contains("vote") { "1".into() } else { format!("{} says hi", p.name) })
/// });
/// assert!(responder.calls().is_empty());
/// ```
pub struct ScriptedResponder {
    reply: Box<ReplyFn>,
    calls: Mutex<Vec<(ParticipantId, String)>>,
}

impl ScriptedResponder {
    pub fn new<F>(reply: F) -> Self
    where
        F: Fn(&Participant, &str) -> Result<String, ResponderError> + Send + Sync + 'static,
    {
        Self {
            reply: Box::new(reply),
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Every `(participant, prompt)` seen so far, in call order.
    #[must_use]
    pub fn calls(&self) -> Vec<(ParticipantId, String)> {
        self.calls.lock().map(|c| c.clone()).unwrap_or_default()
    }
}

impl std::fmt::Debug for ScriptedResponder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ScriptedResponder").finish_non_exhaustive()
    }
}

#[async_trait]
impl Responder for ScriptedResponder {
    async fn send(&self, participant: &Participant, prompt: &str) -> Result<String, ResponderError> {
        if let Ok(mut calls) = self.calls.lock() {
            calls.push((participant.id, prompt.to_string()));
        }
        (self.reply)(participant, prompt)
    }
}

/// Responder that fails every call.
#[derive(Clone, Copy, Debug, Default)]
pub struct UnavailableResponder;

#[async_trait]
impl Responder for UnavailableResponder {
    async fn send(&self, participant: &Participant, _prompt: &str) -> Result<String, ResponderError> {
        Err(ResponderError::Unavailable(format!("no backend for {}", participant.key)))
    }
}
