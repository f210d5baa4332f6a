//! Game configuration.
//!
//! The engine is handed everything it needs at construction:
//! - `Roster`: who is at the table
//! - `ThemeCatalog`: which word pairs can be drawn
//! - `PromptTemplates`: what each participant is asked
//! - `VotePolicy` / `Dispatch`: how ballots and responder calls are handled
//!
//! Nothing is read from process-wide state. Configs deserialize from JSON
//! with every field optional, falling back to the shipped defaults.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::time::Duration;
use thiserror::Error;

use super::participant::Roster;
use super::theme::{Theme, ThemeCatalog};

/// Smallest table that can produce a non-trivial game.
pub const MIN_PARTICIPANTS: usize = 3;

/// Rejected configuration.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("need at least {min} participants, got {0}", min = MIN_PARTICIPANTS)]
    TooFewParticipants(usize),

    #[error("duplicate participant key: {0}")]
    DuplicateKey(String),

    #[error("theme catalog is empty")]
    EmptyCatalog,

    #[error("theme {index} is unusable: {reason}")]
    InvalidTheme { index: usize, reason: &'static str },

    #[error("prompt template `{0}` must contain the {{word}} placeholder")]
    MissingPlaceholder(&'static str),

    #[error("malformed config: {0}")]
    Parse(String),
}

/// Prompt texts sent to participants.
///
/// `{word}` is replaced with the participant's assigned word.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PromptTemplates {
    /// One-shot word handout at game start.
    pub word_delivery: String,

    /// Per-round description request.
    pub description: String,

    /// First line of the ballot; numbered candidates follow.
    pub ballot_header: String,

    /// Recorded in place of a description the responder failed to give.
    pub no_reply: String,
}

impl Default for PromptTemplates {
    fn default() -> Self {
        Self {
            word_delivery: "Game started! Your word is: {word}. Remember it, no description needed yet."
                .to_string(),
            description: "Your word is: {word}. Describe it in one sentence without saying the word directly."
                .to_string(),
            ballot_header: "Based on the descriptions below, vote for the player you think is the undercover \
                            (reply with their number), but do not vote for yourself:"
                .to_string(),
            no_reply: "No valid reply".to_string(),
        }
    }
}

/// Ballot handling rules.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct VotePolicy {
    /// Treat a parsed ballot naming the voter as unparseable, sending it
    /// to the random non-self fallback.
    pub reject_self_votes: bool,
}

impl Default for VotePolicy {
    fn default() -> Self {
        Self {
            reject_self_votes: true,
        }
    }
}

/// How responder calls within one phase are issued.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Dispatch {
    /// One participant at a time, in alive order.
    #[default]
    Sequential,
    /// All participants of a phase at once; results re-assembled in alive order.
    Concurrent,
}

/// Complete game configuration.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub roster: Roster,
    pub themes: ThemeCatalog,
    pub prompts: PromptTemplates,
    pub voting: VotePolicy,
    pub dispatch: Dispatch,

    /// Per responder call limit. `None` waits indefinitely.
    pub response_timeout_ms: Option<u64>,

    /// Pause between rounds in `run_game`.
    pub inter_round_delay_ms: u64,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            roster: Roster::default_agents(),
            themes: ThemeCatalog::default(),
            prompts: PromptTemplates::default(),
            voting: VotePolicy::default(),
            dispatch: Dispatch::default(),
            response_timeout_ms: None,
            inter_round_delay_ms: 0,
        }
    }
}

impl GameConfig {
    /// Create a configuration for the given table and catalog.
    pub fn new(roster: Roster, themes: ThemeCatalog) -> Self {
        Self {
            roster,
            themes,
            ..Self::default()
        }
    }

    /// Parse a JSON document. Missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    #[must_use]
    pub fn with_prompts(mut self, prompts: PromptTemplates) -> Self {
        self.prompts = prompts;
        self
    }

    #[must_use]
    pub fn with_vote_policy(mut self, voting: VotePolicy) -> Self {
        self.voting = voting;
        self
    }

    #[must_use]
    pub fn with_dispatch(mut self, dispatch: Dispatch) -> Self {
        self.dispatch = dispatch;
        self
    }

    #[must_use]
    pub fn with_response_timeout(mut self, timeout: Duration) -> Self {
        self.response_timeout_ms = Some(timeout.as_millis() as u64);
        self
    }

    #[must_use]
    pub fn with_inter_round_delay(mut self, delay: Duration) -> Self {
        self.inter_round_delay_ms = delay.as_millis() as u64;
        self
    }

    #[must_use]
    pub fn response_timeout(&self) -> Option<Duration> {
        self.response_timeout_ms.map(Duration::from_millis)
    }

    #[must_use]
    pub fn inter_round_delay(&self) -> Duration {
        Duration::from_millis(self.inter_round_delay_ms)
    }

    /// Check the table, catalog, and prompts are playable.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.roster.len() < MIN_PARTICIPANTS {
            return Err(ConfigError::TooFewParticipants(self.roster.len()));
        }

        let mut seen = HashSet::new();
        for p in self.roster.iter() {
            if !seen.insert(p.key.as_str()) {
                return Err(ConfigError::DuplicateKey(p.key.clone()));
            }
        }

        if self.themes.is_empty() {
            return Err(ConfigError::EmptyCatalog);
        }
        for (index, theme) in self.themes.themes().iter().enumerate() {
            check_theme(theme).map_err(|reason| ConfigError::InvalidTheme { index, reason })?;
        }

        if !self.prompts.word_delivery.contains("{word}") {
            return Err(ConfigError::MissingPlaceholder("word_delivery"));
        }
        if !self.prompts.description.contains("{word}") {
            return Err(ConfigError::MissingPlaceholder("description"));
        }

        Ok(())
    }
}

fn check_theme(theme: &Theme) -> Result<(), &'static str> {
    if theme.majority.trim().is_empty() || theme.minority.trim().is_empty() {
        return Err("empty word");
    }
    if theme.majority == theme.minority {
        return Err("majority and minority words are identical");
    }
    Ok(())
}
