//! Typed game events.
//!
//! `Initialized` and `GameOver` carry the secret (outlier and both words).
//! They exist for audit and scoring harnesses; a player-facing surface must
//! hold them back until the game is over.

use serde::{Deserialize, Serialize};

use crate::core::{ParticipantId, Side, Theme};
use crate::rules::{BallotSource, VoteCount};

/// Something observable that happened during a game.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum GameEvent {
    /// Theme and outlier were drawn.
    Initialized { outlier: ParticipantId, theme: Theme },

    /// A participant was sent their word.
    WordDelivered {
        participant: ParticipantId,
        acknowledged: bool,
    },

    /// A new round began.
    RoundStarted { round: u32 },

    /// Every alive participant has described their word.
    RoundDescriptionsReady {
        round: u32,
        descriptions: Vec<(ParticipantId, String)>,
    },

    /// A ballot was resolved.
    BallotCast {
        round: u32,
        voter: ParticipantId,
        target: ParticipantId,
        source: BallotSource,
    },

    /// All ballots of a round were counted.
    VotesTallied { round: u32, counts: VoteCount },

    /// Someone left the game.
    PlayerEliminated {
        participant: ParticipantId,
        was_outlier: bool,
    },

    /// The game reached a terminal state.
    GameOver {
        outlier: ParticipantId,
        winner: Side,
        round_count: u32,
        theme: Theme,
    },
}

impl GameEvent {
    /// Short, stable name for logs and filters.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            GameEvent::Initialized { .. } => "initialized",
            GameEvent::WordDelivered { .. } => "word_delivered",
            GameEvent::RoundStarted { .. } => "round_started",
            GameEvent::RoundDescriptionsReady { .. } => "round_descriptions_ready",
            GameEvent::BallotCast { .. } => "ballot_cast",
            GameEvent::VotesTallied { .. } => "votes_tallied",
            GameEvent::PlayerEliminated { .. } => "player_eliminated",
            GameEvent::GameOver { .. } => "game_over",
        }
    }

    /// Whether the event reveals the outlier or the words.
    #[must_use]
    pub fn reveals_secret(&self) -> bool {
        matches!(self, GameEvent::Initialized { .. } | GameEvent::GameOver { .. })
    }
}
