//! # undercover
//!
//! An engine for "Who is the Undercover", played by chat agents.
//!
//! Every participant but one receives the same word; the outlier gets a
//! related one. Each round all survivors describe their word, then vote
//! someone out. Civilians win by eliminating the outlier; the outlier wins
//! by surviving until only two players remain.
//!
//! ## Design Principles
//!
//! 1. **Backend-Agnostic**: Agents are reached through the [`Responder`]
//!    trait. The engine never sees transports, credentials, or polling.
//!
//! 2. **Failure-Tolerant**: A failed reply degrades to placeholder text or
//!    a random ballot. Every game reaches a winner.
//!
//! 3. **Replayable**: All randomness comes from an injected, seedable
//!    [`GameRng`]; state snapshots resume games exactly.
//!
//! ## Modules
//!
//! - `core`: Participants, themes, configuration, RNG, game state
//! - `rules`: Win condition, ballot parsing, tally, prompt rendering
//! - `responder`: The responder trait and stock implementations
//! - `events`: Game events and observers
//! - `engine`: The round-by-round game driver
//!
//! ## Example
//!
//! ```
//! use undercover::{GameConfig, GameRng, ScriptedResponder, UndercoverEngine};
//!
//! # tokio_test_block_on(async {
//! let responder = ScriptedResponder::new(|p, prompt| {
//!     Ok(if prompt.contains("vote") { "1".to_string() } else { format!("{} likes it", p.name) })
//! });
//! let mut engine = UndercoverEngine::new(GameConfig::default(), responder, GameRng::new(7)).unwrap();
//! let summary = engine.run_game().await.unwrap();
//! assert!(summary.rounds <= 3);
//! # });
//! # fn tokio_test_block_on<F: std::future::Future>(f: F) -> F::Output {
//! #     tokio::runtime::Builder::new_current_thread().enable_all().build().unwrap().block_on(f)
//! # }
//! ```

pub mod core;
pub mod rules;
pub mod responder;
pub mod events;
pub mod engine;

// Re-export commonly used types
pub use crate::core::{
    ConfigError, Dispatch, GameConfig, GameRng, GameRngState, GameState, Participant, ParticipantId,
    ParticipantMap, PromptTemplates, Roster, RoundRecord, Side, Theme, ThemeCatalog, VotePolicy,
};

pub use crate::rules::{Ballot, BallotSource, VoteCount};

pub use crate::responder::{
    ChatBackend, ChatStatus, PollingConfig, PollingResponder, Responder, ResponderError, ScriptedResponder,
    UnavailableResponder,
};

pub use crate::events::{ChannelObserver, EventLog, GameEvent, GameObserver};

pub use crate::engine::{GameError, GameSnapshot, GameSummary, UndercoverEngine};
