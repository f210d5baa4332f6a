//! Win condition.

use crate::core::{ParticipantId, Side};

/// Decide whether a game is over.
///
/// Civilians win as soon as the outlier has been eliminated. Otherwise the
/// outlier wins once at most two participants remain and it is one of them.
/// Returns `None` while the game continues.
#[must_use]
pub fn evaluate(
    alive: impl IntoIterator<Item = ParticipantId>,
    eliminated: impl IntoIterator<Item = ParticipantId>,
    outlier: ParticipantId,
) -> Option<Side> {
    if eliminated.into_iter().any(|p| p == outlier) {
        return Some(Side::Civilians);
    }

    let mut remaining = 0usize;
    let mut outlier_alive = false;
    for p in alive {
        remaining += 1;
        outlier_alive |= p == outlier;
    }

    (remaining <= 2 && outlier_alive).then_some(Side::Outlier)
}
