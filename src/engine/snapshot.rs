//! Checkpoints and end-of-game reports.

use serde::{Deserialize, Serialize};

use super::GameError;
use crate::core::{GameRngState, GameState, ParticipantId, Side, Theme};

/// Everything needed to resume a game exactly where it left off.
///
/// Restoring a snapshot into an engine with the same roster and an
/// equivalent responder replays the remaining rounds identically.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameSnapshot {
    pub state: GameState,
    pub rng: GameRngState,
}

impl GameSnapshot {
    /// Compact binary encoding.
    pub fn to_bytes(&self) -> Result<Vec<u8>, GameError> {
        bincode::serialize(self).map_err(|e| GameError::Snapshot(e.to_string()))
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self, GameError> {
        bincode::deserialize(bytes).map_err(|e| GameError::Snapshot(e.to_string()))
    }

    /// Human-readable encoding.
    pub fn to_json(&self) -> Result<String, GameError> {
        serde_json::to_string_pretty(self).map_err(|e| GameError::Snapshot(e.to_string()))
    }

    pub fn from_json(json: &str) -> Result<Self, GameError> {
        serde_json::from_str(json).map_err(|e| GameError::Snapshot(e.to_string()))
    }
}

/// Result of a finished game.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameSummary {
    pub outlier: ParticipantId,
    pub outlier_name: String,
    pub winner: Side,
    pub rounds: u32,
    pub theme: Theme,
    /// Elimination order.
    pub eliminated: Vec<ParticipantId>,
}

impl std::fmt::Display for GameSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} won after {} rounds; undercover was {} ({} vs {})",
            self.winner, self.rounds, self.outlier_name, self.theme.minority, self.theme.majority
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::GameRng;

    fn snapshot() -> GameSnapshot {
        GameSnapshot {
            state: GameState::new(4, Theme::new("sun", "moon"), ParticipantId::new(1)),
            rng: GameRng::new(5).state(),
        }
    }

    #[test]
    fn test_bytes_round_trip() {
        let snap = snapshot();
        let bytes = snap.to_bytes().unwrap();
        assert_eq!(GameSnapshot::from_bytes(&bytes).unwrap(), snap);
    }

    #[test]
    fn test_json_round_trip() {
        let snap = snapshot();
        let json = snap.to_json().unwrap();
        assert_eq!(GameSnapshot::from_json(&json).unwrap(), snap);
    }

    #[test]
    fn test_garbage_is_snapshot_error() {
        assert!(matches!(GameSnapshot::from_bytes(&[1, 2, 3]), Err(GameError::Snapshot(_))));
        assert!(matches!(GameSnapshot::from_json("[]"), Err(GameError::Snapshot(_))));
    }

    #[test]
    fn test_summary_display() {
        let summary = GameSummary {
            outlier: ParticipantId::new(0),
            outlier_name: "Undercover 1".to_string(),
            winner: Side::Civilians,
            rounds: 2,
            theme: Theme::new("sun", "moon"),
            eliminated: vec![ParticipantId::new(3), ParticipantId::new(0)],
        };
        assert_eq!(
            summary.to_string(),
            "civilians won after 2 rounds; undercover was Undercover 1 (moon vs sun)"
        );
    }
}
