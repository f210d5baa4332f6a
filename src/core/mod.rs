//! Core types: participants, themes, configuration, RNG, game state.
//!
//! Everything here is plain data. Game flow lives in `engine`, pure rules
//! in `rules`.

pub mod participant;
pub mod theme;
pub mod rng;
pub mod config;
pub mod state;

pub use participant::{Participant, ParticipantId, ParticipantMap, Roster};
pub use theme::{Theme, ThemeCatalog};
pub use rng::{GameRng, GameRngState};
pub use config::{ConfigError, Dispatch, GameConfig, PromptTemplates, VotePolicy, MIN_PARTICIPANTS};
pub use state::{GameState, RoundRecord, Side};
