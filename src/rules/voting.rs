//! Ballot parsing, fallback ballots, tallying, and tie-breaks.
//!
//! ## Ballot resolution
//!
//! A reply is scanned left to right for the first single decimal digit
//! that is a valid 1-based position on the ballot. If none is found, the
//! responder failed, or (under `VotePolicy::reject_self_votes`) the digit
//! names the voter, the ballot goes to a uniformly random alive participant
//! other than the voter.
//!
//! ## Elimination
//!
//! Votes are counted per alive participant. The eliminated participant is
//! drawn uniformly from everyone tied at the maximum; a unique leader is
//! simply the only candidate.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::core::{GameRng, ParticipantId, VotePolicy};

/// Why a ballot ended up where it did.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BallotSource {
    /// Position read from the reply.
    Parsed,
    /// Reply had no usable position.
    Unparseable,
    /// Reply named the voter and self-votes are rejected.
    SelfVote,
    /// The responder returned no reply.
    NoReply,
}

impl BallotSource {
    /// Whether the target was drawn at random.
    #[must_use]
    pub fn is_fallback(self) -> bool {
        self != BallotSource::Parsed
    }
}

/// One participant's resolved vote.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ballot {
    pub voter: ParticipantId,
    pub target: ParticipantId,
    pub source: BallotSource,
}

/// Digit value of `c` if it is an ASCII or fullwidth decimal digit.
fn digit_value(c: char) -> Option<usize> {
    match c {
        '0'..='9' => Some(c as usize - '0' as usize),
        '\u{FF10}'..='\u{FF19}' => Some(c as usize - '\u{FF10}' as usize),
        _ => None,
    }
}

/// Read a 1-based ballot position out of a free-text reply.
///
/// Returns the 0-based index of the first digit character whose value is in
/// `1..=candidates`. Digits are taken one character at a time, so "12" on a
/// four-person ballot reads as position 1.
///
/// ```
/// use undercover::rules::parse_ballot;
///
/// assert_eq!(parse_ballot("I vote for number 3.", 4), Some(2));
/// assert_eq!(parse_ballot("0 or 9... fine, 2", 4), Some(1));
/// assert_eq!(parse_ballot("no idea", 4), None);
/// ```
#[must_use]
pub fn parse_ballot(reply: &str, candidates: usize) -> Option<usize> {
    reply
        .chars()
        .filter_map(digit_value)
        .find(|&v| (1..=candidates).contains(&v))
        .map(|v| v - 1)
}

/// Uniform random target among `alive` excluding `voter`.
///
/// `None` only if nobody else is alive.
pub fn fallback_target(
    voter: ParticipantId,
    alive: &[ParticipantId],
    rng: &mut GameRng,
) -> Option<ParticipantId> {
    let others: SmallVec<[ParticipantId; 8]> = alive.iter().copied().filter(|&p| p != voter).collect();
    rng.choose(&others).copied()
}

/// Resolve a voter's reply (or failure) into a ballot.
///
/// `reply` is `None` when the responder failed. Randomness is consumed only
/// when a fallback is needed.
pub fn resolve_ballot(
    voter: ParticipantId,
    reply: Option<&str>,
    alive: &[ParticipantId],
    policy: &VotePolicy,
    rng: &mut GameRng,
) -> Option<Ballot> {
    let source = match reply {
        None => BallotSource::NoReply,
        Some(text) => match parse_ballot(text, alive.len()).map(|i| alive[i]) {
            Some(target) if target == voter && policy.reject_self_votes => BallotSource::SelfVote,
            Some(target) => {
                return Some(Ballot {
                    voter,
                    target,
                    source: BallotSource::Parsed,
                })
            }
            None => BallotSource::Unparseable,
        },
    };

    fallback_target(voter, alive, rng).map(|target| Ballot {
        voter,
        target,
        source,
    })
}

/// Votes received per alive participant, in alive order.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VoteCount {
    pub entries: Vec<(ParticipantId, u32)>,
}

impl VoteCount {
    /// Votes received by a participant.
    #[must_use]
    pub fn get(&self, participant: ParticipantId) -> u32 {
        self.entries
            .iter()
            .find(|(p, _)| *p == participant)
            .map_or(0, |(_, n)| *n)
    }

    /// Highest vote total.
    #[must_use]
    pub fn max(&self) -> u32 {
        self.entries.iter().map(|(_, n)| *n).max().unwrap_or(0)
    }

    /// Everyone tied at the highest total, in alive order.
    #[must_use]
    pub fn leaders(&self) -> SmallVec<[ParticipantId; 8]> {
        let max = self.max();
        self.entries
            .iter()
            .filter(|(_, n)| *n == max)
            .map(|(p, _)| *p)
            .collect()
    }
}

/// Count ballots against the alive list.
///
/// Every alive participant gets an entry, including those with zero votes.
/// Ballots naming someone not alive are ignored.
#[must_use]
pub fn tally(alive: &[ParticipantId], ballots: &[Ballot]) -> VoteCount {
    let mut counts: FxHashMap<ParticipantId, u32> = FxHashMap::default();
    for ballot in ballots {
        *counts.entry(ballot.target).or_insert(0) += 1;
    }

    VoteCount {
        entries: alive
            .iter()
            .map(|p| (*p, counts.get(p).copied().unwrap_or(0)))
            .collect(),
    }
}

/// Draw the eliminated participant uniformly among the leaders.
pub fn pick_eliminated(count: &VoteCount, rng: &mut GameRng) -> Option<ParticipantId> {
    rng.choose(&count.leaders()).copied()
}
