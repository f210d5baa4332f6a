//! Game state: the single mutable aggregate a game runs on.
//!
//! ## GameState
//!
//! - Theme and outlier, fixed at initialization
//! - Assigned words, copied out of the theme once and never re-derived
//! - Alive and eliminated partitions (both ordered)
//! - Round counter and append-only description history
//!
//! History is an `im::Vector`, so snapshots share structure with the live
//! state and earlier rounds are never rewritten.

use im::Vector;
use serde::{Deserialize, Serialize};

use super::participant::{ParticipantId, ParticipantMap};
use super::theme::Theme;

/// The two teams a game can end in favour of.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Side {
    /// Everyone holding the majority word.
    Civilians,
    /// The lone minority-word holder.
    Outlier,
}

impl std::fmt::Display for Side {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Side::Civilians => write!(f, "civilians"),
            Side::Outlier => write!(f, "undercover"),
        }
    }
}

/// Descriptions given in one completed round, in alive order.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundRecord {
    pub round: u32,
    pub descriptions: Vec<(ParticipantId, String)>,
}

impl RoundRecord {
    /// Description a participant gave this round.
    #[must_use]
    pub fn description(&self, participant: ParticipantId) -> Option<&str> {
        self.descriptions
            .iter()
            .find(|(p, _)| *p == participant)
            .map(|(_, d)| d.as_str())
    }
}

/// Full state of one game.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameState {
    theme: Theme,
    outlier: ParticipantId,
    words: ParticipantMap<String>,
    alive: Vector<ParticipantId>,
    eliminated: Vector<ParticipantId>,
    round: u32,
    history: Vector<RoundRecord>,
    winner: Option<Side>,
}

impl GameState {
    /// Fresh game: everyone alive, round 0, empty history.
    ///
    /// Panics if `outlier` is outside the table.
    #[must_use]
    pub fn new(participant_count: usize, theme: Theme, outlier: ParticipantId) -> Self {
        assert!(
            outlier.index() < participant_count,
            "Outlier must be seated at the table"
        );

        let words = ParticipantMap::new(participant_count, |p| theme.word(p == outlier).to_string());

        Self {
            theme,
            outlier,
            words,
            alive: ParticipantId::all(participant_count).collect(),
            eliminated: Vector::new(),
            round: 0,
            history: Vector::new(),
            winner: None,
        }
    }

    #[must_use]
    pub fn theme(&self) -> &Theme {
        &self.theme
    }

    #[must_use]
    pub fn outlier(&self) -> ParticipantId {
        self.outlier
    }

    /// The word a participant was handed at initialization.
    #[must_use]
    pub fn word_for(&self, participant: ParticipantId) -> &str {
        &self.words[participant]
    }

    #[must_use]
    pub fn participant_count(&self) -> usize {
        self.words.len()
    }

    #[must_use]
    pub fn alive(&self) -> &Vector<ParticipantId> {
        &self.alive
    }

    #[must_use]
    pub fn eliminated(&self) -> &Vector<ParticipantId> {
        &self.eliminated
    }

    #[must_use]
    pub fn is_alive(&self, participant: ParticipantId) -> bool {
        self.alive.contains(&participant)
    }

    #[must_use]
    pub fn round(&self) -> u32 {
        self.round
    }

    #[must_use]
    pub fn history(&self) -> &Vector<RoundRecord> {
        &self.history
    }

    /// Most recent round's descriptions.
    #[must_use]
    pub fn latest_round(&self) -> Option<&RoundRecord> {
        self.history.last()
    }

    /// Winning side once the game is over.
    #[must_use]
    pub fn winner(&self) -> Option<Side> {
        self.winner
    }

    #[must_use]
    pub fn is_over(&self) -> bool {
        self.winner.is_some()
    }

    // === Mutation (engine only) ===

    /// Advance the round counter and return the new round number.
    pub(crate) fn begin_round(&mut self) -> u32 {
        self.round += 1;
        self.round
    }

    pub(crate) fn record_round(&mut self, record: RoundRecord) {
        self.history.push_back(record);
    }

    /// Move a participant from alive to eliminated.
    ///
    /// Returns false if they were not alive.
    pub(crate) fn eliminate(&mut self, participant: ParticipantId) -> bool {
        match self.alive.index_of(&participant) {
            Some(pos) => {
                self.alive.remove(pos);
                self.eliminated.push_back(participant);
                true
            }
            None => false,
        }
    }

    pub(crate) fn set_winner(&mut self, side: Side) {
        self.winner = Some(side);
    }

    /// `alive` and `eliminated` are disjoint and together cover the table.
    #[must_use]
    pub fn partition_is_consistent(&self) -> bool {
        let total = self.participant_count();
        if self.alive.len() + self.eliminated.len() != total {
            return false;
        }

        let mut seen = vec![false; total];
        for p in self.alive.iter().chain(self.eliminated.iter()) {
            match seen.get_mut(p.index()) {
                Some(slot) if !*slot => *slot = true,
                _ => return false,
            }
        }
        true
    }

    /// Every participant holds the word their role implies.
    #[must_use]
    pub fn words_match_roles(&self) -> bool {
        self.words
            .iter()
            .all(|(p, word)| word == self.theme.word(p == self.outlier))
    }
}
