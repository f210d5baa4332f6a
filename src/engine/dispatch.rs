//! Issuing one phase's worth of responder calls.

use futures_util::future::join_all;

use crate::core::{Dispatch, GameConfig, ParticipantId};
use crate::responder::{Responder, ResponderError};

/// One prompt for one participant.
pub(crate) type Request = (ParticipantId, String);

/// Send a single prompt, applying the configured timeout and rejecting
/// blank replies.
pub(crate) async fn ask<R: Responder + ?Sized>(
    responder: &R,
    config: &GameConfig,
    participant: ParticipantId,
    prompt: &str,
) -> Result<String, ResponderError> {
    let participant = &config.roster[participant];
    let call = responder.send(participant, prompt);

    let reply = match config.response_timeout() {
        Some(limit) => tokio::time::timeout(limit, call)
            .await
            .map_err(|_| ResponderError::Timeout(limit))??,
        None => call.await?,
    };

    if reply.trim().is_empty() {
        return Err(ResponderError::EmptyReply);
    }
    Ok(reply)
}

/// Send every request of a phase and return the results in request order.
///
/// Under `Dispatch::Concurrent` all calls are in flight together; a
/// failure in one never cancels the others.
pub(crate) async fn solicit<R: Responder + ?Sized>(
    responder: &R,
    config: &GameConfig,
    requests: &[Request],
) -> Vec<Result<String, ResponderError>> {
    match config.dispatch {
        Dispatch::Sequential => {
            let mut replies = Vec::with_capacity(requests.len());
            for (participant, prompt) in requests {
                replies.push(ask(responder, config, *participant, prompt).await);
            }
            replies
        }
        Dispatch::Concurrent => {
            join_all(
                requests
                    .iter()
                    .map(|(participant, prompt)| ask(responder, config, *participant, prompt)),
            )
            .await
        }
    }
}
