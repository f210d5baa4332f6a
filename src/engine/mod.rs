//! Game orchestration.
//!
//! [`UndercoverEngine`] owns the mutable game state, talks to the
//! responder, applies the rules, and emits events.

mod dispatch;
mod game;
mod snapshot;

pub use game::UndercoverEngine;
pub use snapshot::{GameSnapshot, GameSummary};

use thiserror::Error;

use crate::core::ConfigError;

/// Errors from driving the engine.
///
/// These report caller mistakes. Responder failures are recovered inside
/// the engine and never appear here.
#[derive(Debug, Error)]
pub enum GameError {
    #[error("no game has been initialized")]
    NotInitialized,

    #[error("the game is already over")]
    AlreadyOver,

    #[error("no participant could be eliminated")]
    NoCandidates,

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("snapshot error: {0}")]
    Snapshot(String),
}
