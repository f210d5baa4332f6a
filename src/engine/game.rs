//! The game engine.
//!
//! ## Lifecycle
//!
//! 1. [`UndercoverEngine::initialize`]: draw a theme and an outlier, hand
//!    every participant their word.
//! 2. [`UndercoverEngine::play_round`]: descriptions, voting, one
//!    elimination, win check. Repeat until it returns `true`.
//!
//! [`UndercoverEngine::run_game`] does both.
//!
//! ## Failure handling
//!
//! Responder failures never end a game. A missing description becomes the
//! configured "no valid reply" text; a missing or unusable ballot becomes a
//! random vote for someone other than the voter. A game with a completely
//! dead responder still runs to a winner on random ballots alone.
//!
//! ## Threading
//!
//! The engine holds no locks. Each driving call is an `async fn` borrowing
//! the engine mutably, so calls on one game are serialized by construction.
//! Callers choose where that future runs.

use std::time::Duration;

use crate::core::{GameConfig, GameRng, GameRngState, GameState, ParticipantId, RoundRecord, Side};
use crate::events::{GameEvent, GameObserver};
use crate::responder::Responder;
use crate::rules::{self, Ballot};

use super::dispatch::{solicit, Request};
use super::snapshot::{GameSnapshot, GameSummary};
use super::GameError;

/// Drives one game at a time against a [`Responder`].
pub struct UndercoverEngine<R> {
    config: GameConfig,
    responder: R,
    rng: GameRng,
    observers: Vec<Box<dyn GameObserver>>,
    state: Option<GameState>,
}

impl<R: Responder> UndercoverEngine<R> {
    /// Build an engine. The config is validated here.
    pub fn new(config: GameConfig, responder: R, rng: GameRng) -> Result<Self, GameError> {
        config.validate()?;
        Ok(Self {
            config,
            responder,
            rng,
            observers: Vec::new(),
            state: None,
        })
    }

    /// Register an observer (builder pattern).
    #[must_use]
    pub fn with_observer(mut self, observer: impl GameObserver + 'static) -> Self {
        self.add_observer(observer);
        self
    }

    /// Register an observer.
    pub fn add_observer(&mut self, observer: impl GameObserver + 'static) {
        self.observers.push(Box::new(observer));
    }

    #[must_use]
    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    #[must_use]
    pub fn responder(&self) -> &R {
        &self.responder
    }

    /// Current game, if one has been initialized.
    #[must_use]
    pub fn state(&self) -> Option<&GameState> {
        self.state.as_ref()
    }

    #[must_use]
    pub fn rng_state(&self) -> GameRngState {
        self.rng.state()
    }

    fn emit(&mut self, event: GameEvent) {
        for observer in &mut self.observers {
            observer.on_event(&event);
        }
    }

    fn name(&self, participant: ParticipantId) -> &str {
        &self.config.roster[participant].name
    }

    fn live_state(&self) -> Result<&GameState, GameError> {
        let state = self.state.as_ref().ok_or(GameError::NotInitialized)?;
        if state.is_over() {
            return Err(GameError::AlreadyOver);
        }
        Ok(state)
    }

    fn state_mut(&mut self) -> Result<&mut GameState, GameError> {
        self.state.as_mut().ok_or(GameError::NotInitialized)
    }

    // === Initialization ===

    /// Start a fresh game, discarding any previous one.
    ///
    /// Delivery failures are logged and otherwise ignored.
    pub async fn initialize(&mut self) {
        let themes = self.config.themes.themes();
        let theme = themes[self.rng.gen_index(themes.len())].clone();
        let outlier = ParticipantId::new(self.rng.gen_index(self.config.roster.len()) as u8);

        let state = GameState::new(self.config.roster.len(), theme.clone(), outlier);
        tracing::info!(participants = state.participant_count(), "game initialized");
        tracing::debug!(
            outlier = %self.name(outlier),
            majority = %theme.majority,
            minority = %theme.minority,
            "secret drawn"
        );

        let requests: Vec<Request> = state
            .alive()
            .iter()
            .map(|&p| (p, rules::render_word_delivery(&self.config.prompts, state.word_for(p))))
            .collect();
        self.state = Some(state);
        self.emit(GameEvent::Initialized { outlier, theme });

        let replies = solicit(&self.responder, &self.config, &requests).await;
        for ((participant, _), reply) in requests.iter().zip(replies) {
            let acknowledged = match reply {
                Ok(_) => {
                    tracing::info!(participant = %self.name(*participant), "word received");
                    true
                }
                Err(e) => {
                    tracing::warn!(participant = %self.name(*participant), error = %e, "word delivery unconfirmed");
                    false
                }
            };
            self.emit(GameEvent::WordDelivered {
                participant: *participant,
                acknowledged,
            });
        }
    }

    // === Rounds ===

    /// Play one full round. Returns whether the game is now over.
    ///
    /// Errors only on misuse: no game initialized, or the game already
    /// finished.
    pub async fn play_round(&mut self) -> Result<bool, GameError> {
        self.live_state()?;
        let round = self.state_mut()?.begin_round();
        tracing::info!(round, "round started");
        self.emit(GameEvent::RoundStarted { round });

        self.describe(round).await?;

        let ballots = self.conduct_voting().await?;
        let alive: Vec<ParticipantId> = self.live_state()?.alive().iter().copied().collect();
        let counts = rules::tally(&alive, &ballots);
        for (participant, votes) in &counts.entries {
            tracing::info!(round, participant = %self.name(*participant), votes, "votes received");
        }
        let out = rules::pick_eliminated(&counts, &mut self.rng).ok_or(GameError::NoCandidates)?;
        self.emit(GameEvent::VotesTallied { round, counts });

        let state = self.state_mut()?;
        state.eliminate(out);
        let was_outlier = out == state.outlier();
        tracing::info!(round, participant = %self.name(out), was_outlier, "participant eliminated");
        self.emit(GameEvent::PlayerEliminated {
            participant: out,
            was_outlier,
        });

        Ok(self.check_game_over()?.is_some())
    }

    /// Description phase: every alive participant describes their word.
    async fn describe(&mut self, round: u32) -> Result<(), GameError> {
        let state = self.live_state()?;
        let requests: Vec<Request> = state
            .alive()
            .iter()
            .map(|&p| (p, rules::render_description(&self.config.prompts, state.word_for(p))))
            .collect();

        let replies = solicit(&self.responder, &self.config, &requests).await;
        let descriptions: Vec<(ParticipantId, String)> = requests
            .iter()
            .zip(replies)
            .map(|((participant, _), reply)| {
                let text = reply.unwrap_or_else(|e| {
                    tracing::warn!(round, participant = %self.name(*participant), error = %e, "no description");
                    self.config.prompts.no_reply.clone()
                });
                tracing::debug!(round, participant = %self.name(*participant), description = %text);
                (*participant, text)
            })
            .collect();

        self.state_mut()?.record_round(RoundRecord {
            round,
            descriptions: descriptions.clone(),
        });
        self.emit(GameEvent::RoundDescriptionsReady { round, descriptions });
        Ok(())
    }

    /// Voting phase: one resolved ballot per alive participant, in alive order.
    ///
    /// The ballot lists each alive participant with their latest
    /// description; anyone without one this round is shown with the
    /// "no valid reply" text.
    pub async fn conduct_voting(&mut self) -> Result<Vec<Ballot>, GameError> {
        let state = self.live_state()?;
        let round = state.round();
        let alive: Vec<ParticipantId> = state.alive().iter().copied().collect();
        let latest = state.latest_round().filter(|r| r.round == round);

        let entries: Vec<(&str, &str)> = alive
            .iter()
            .map(|&p| {
                let description = latest
                    .and_then(|r| r.description(p))
                    .unwrap_or(self.config.prompts.no_reply.as_str());
                (self.name(p), description)
            })
            .collect();
        let prompt = rules::render_ballot(&self.config.prompts, &entries);
        let requests: Vec<Request> = alive.iter().map(|&p| (p, prompt.clone())).collect();

        let replies = solicit(&self.responder, &self.config, &requests).await;

        let mut ballots = Vec::with_capacity(alive.len());
        for (&voter, reply) in alive.iter().zip(replies) {
            let reply = reply
                .map_err(|e| tracing::warn!(round, voter = %self.name(voter), error = %e, "no ballot"))
                .ok();
            let Some(ballot) =
                rules::resolve_ballot(voter, reply.as_deref(), &alive, &self.config.voting, &mut self.rng)
            else {
                continue;
            };

            if ballot.source.is_fallback() {
                tracing::info!(
                    round,
                    voter = %self.name(voter),
                    target = %self.name(ballot.target),
                    source = ?ballot.source,
                    "random ballot assigned"
                );
            } else {
                tracing::info!(round, voter = %self.name(voter), target = %self.name(ballot.target), "ballot cast");
            }
            self.emit(GameEvent::BallotCast {
                round,
                voter,
                target: ballot.target,
                source: ballot.source,
            });
            ballots.push(ballot);
        }

        Ok(ballots)
    }

    /// Evaluate the win condition, recording and announcing a result.
    fn check_game_over(&mut self) -> Result<Option<Side>, GameError> {
        let state = self.state_mut()?;
        let Some(winner) = rules::evaluate(
            state.alive().iter().copied(),
            state.eliminated().iter().copied(),
            state.outlier(),
        ) else {
            return Ok(None);
        };

        state.set_winner(winner);
        let (outlier, round_count, theme) = (state.outlier(), state.round(), state.theme().clone());
        tracing::info!(%winner, rounds = round_count, outlier = %self.name(outlier), "game over");
        self.emit(GameEvent::GameOver {
            outlier,
            winner,
            round_count,
            theme,
        });
        Ok(Some(winner))
    }

    /// Initialize and play rounds until someone wins.
    pub async fn run_game(&mut self) -> Result<GameSummary, GameError> {
        self.initialize().await;

        let delay = self.config.inter_round_delay();
        while !self.play_round().await? {
            if delay > Duration::ZERO {
                tokio::time::sleep(delay).await;
            }
        }

        self.summary().ok_or(GameError::NotInitialized)
    }

    /// End-of-game report, once the game is over.
    #[must_use]
    pub fn summary(&self) -> Option<GameSummary> {
        let state = self.state.as_ref()?;
        let winner = state.winner()?;
        Some(GameSummary {
            outlier: state.outlier(),
            outlier_name: self.name(state.outlier()).to_string(),
            winner,
            rounds: state.round(),
            theme: state.theme().clone(),
            eliminated: state.eliminated().iter().copied().collect(),
        })
    }

    // === Checkpointing ===

    /// Capture the current game and RNG position.
    #[must_use]
    pub fn snapshot(&self) -> Option<GameSnapshot> {
        self.state.as_ref().map(|state| GameSnapshot {
            state: state.clone(),
            rng: self.rng.state(),
        })
    }

    /// Resume from a snapshot taken with the same roster.
    ///
    /// The snapshot must describe a game this engine could have reached:
    /// outlier seated, words matching roles, and the recorded winner (if
    /// any) agreeing with the win condition.
    pub fn restore(&mut self, snapshot: GameSnapshot) -> Result<(), GameError> {
        let state = snapshot.state;
        let count = state.participant_count();
        if count != self.config.roster.len() {
            return Err(GameError::Snapshot(format!(
                "snapshot has {count} participants, roster has {}",
                self.config.roster.len()
            )));
        }
        if state.outlier().index() >= count {
            return Err(GameError::Snapshot(format!(
                "outlier {} is not seated at a table of {count}",
                state.outlier().index()
            )));
        }
        if !state.partition_is_consistent() {
            return Err(GameError::Snapshot("alive and eliminated sets disagree".to_string()));
        }
        if !state.words_match_roles() {
            return Err(GameError::Snapshot("assigned words do not match the theme".to_string()));
        }
        let verdict = rules::evaluate(
            state.alive().iter().copied(),
            state.eliminated().iter().copied(),
            state.outlier(),
        );
        if state.winner() != verdict {
            return Err(GameError::Snapshot(format!(
                "recorded winner {:?} contradicts the table ({verdict:?})",
                state.winner()
            )));
        }

        tracing::info!(round = state.round(), "game restored");
        self.rng = GameRng::from_state(&snapshot.rng);
        self.state = Some(state);
        Ok(())
    }
}

impl<R> std::fmt::Debug for UndercoverEngine<R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UndercoverEngine")
            .field("participants", &self.config.roster.len())
            .field("observers", &self.observers.len())
            .field("round", &self.state.as_ref().map(GameState::round))
            .finish_non_exhaustive()
    }
}
