//! Observation boundary.
//!
//! The engine pushes [`GameEvent`]s to every registered [`GameObserver`]
//! and never waits on them. Consoles, GUIs, and test harnesses attach as
//! observers; [`ChannelObserver`] hands events to another task.

mod event;
mod observer;

pub use event::GameEvent;
pub use observer::{ChannelObserver, EventLog, GameObserver};
