//! Pure game rules.
//!
//! Nothing in this module performs I/O. The engine feeds it state and
//! replies; it returns decisions:
//! - `win`: terminal-state evaluation
//! - `voting`: ballot parsing, fallback ballots, tally, tie-break
//! - `prompts`: prompt text rendering

pub mod prompts;
pub mod voting;
pub mod win;

pub use prompts::{render_ballot, render_description, render_word_delivery};
pub use voting::{
    fallback_target, parse_ballot, pick_eliminated, resolve_ballot, tally, Ballot, BallotSource, VoteCount,
};
pub use win::evaluate;
