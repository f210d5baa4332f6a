//! Checkpoint and resume tests.

use undercover::{
    EventLog, GameConfig, GameError, GameRng, GameSnapshot, Roster, ScriptedResponder, ThemeCatalog,
    UndercoverEngine,
};

/// Replies depend only on the participant and prompt, so two engines with
/// the same RNG position make identical decisions.
fn responder() -> ScriptedResponder {
    ScriptedResponder::new(|p, prompt| {
        Ok(if prompt.contains("vote") {
            // Rotate through positions, sometimes off the ballot.
            format!("maybe {}", (p.id.0 as usize + prompt.len()) % 7)
        } else {
            format!("{} thinks it is round-ish", p.name)
        })
    })
}

fn six_seats() -> GameConfig {
    let roster = (1..=6).fold(Roster::new(), |r, i| r.with(format!("agent{i}"), format!("Seat {i}")));
    GameConfig::new(roster, ThemeCatalog::default())
}

#[tokio::test]
async fn test_resume_replays_identically() {
    let mut original = UndercoverEngine::new(six_seats(), responder(), GameRng::new(1234)).unwrap();
    original.initialize().await;
    let over = original.play_round().await.unwrap();

    let snapshot = original.snapshot().unwrap();

    let mut resumed = UndercoverEngine::new(six_seats(), responder(), GameRng::new(0)).unwrap();
    resumed.restore(snapshot.clone()).unwrap();
    assert_eq!(resumed.state(), original.state());

    if !over {
        while !original.play_round().await.unwrap() {}
        while !resumed.play_round().await.unwrap() {}
    }
    assert_eq!(resumed.state(), original.state());
    assert_eq!(resumed.summary(), original.summary());
}

#[tokio::test]
async fn test_history_from_before_snapshot_is_never_rewritten() {
    for seed in 0..10 {
        let mut engine = UndercoverEngine::new(six_seats(), responder(), GameRng::new(seed)).unwrap();
        engine.initialize().await;
        if engine.play_round().await.unwrap() {
            continue;
        }

        let bytes = engine.snapshot().unwrap().to_bytes().unwrap();
        let earlier = GameSnapshot::from_bytes(&bytes).unwrap().state;

        engine.play_round().await.unwrap();
        let later = engine.state().unwrap();

        assert_eq!(later.outlier(), earlier.outlier());
        assert_eq!(later.theme(), earlier.theme());
        assert_eq!(later.round(), earlier.round() + 1);
        assert_eq!(later.history().len(), earlier.history().len() + 1);
        for (before, after) in earlier.history().iter().zip(later.history().iter()) {
            assert_eq!(before, after);
        }
        for p in earlier.eliminated().iter() {
            assert!(later.eliminated().contains(p));
        }
    }
}

#[tokio::test]
async fn test_json_snapshot_restores() {
    let mut engine = UndercoverEngine::new(six_seats(), responder(), GameRng::new(99)).unwrap();
    engine.initialize().await;
    engine.play_round().await.unwrap();

    let json = engine.snapshot().unwrap().to_json().unwrap();
    let log = EventLog::new();
    let mut other = UndercoverEngine::new(six_seats(), responder(), GameRng::new(5))
        .unwrap()
        .with_observer(log.clone());
    other.restore(GameSnapshot::from_json(&json).unwrap()).unwrap();

    assert_eq!(other.state(), engine.state());
    assert_eq!(other.rng_state(), engine.rng_state());
    assert!(log.is_empty());
}

#[tokio::test]
async fn test_restore_rejects_other_table() {
    let mut engine = UndercoverEngine::new(six_seats(), responder(), GameRng::new(1)).unwrap();
    engine.initialize().await;
    let snapshot = engine.snapshot().unwrap();

    let mut small = UndercoverEngine::new(GameConfig::default(), responder(), GameRng::new(1)).unwrap();
    assert!(matches!(small.restore(snapshot), Err(GameError::Snapshot(_))));
    assert!(small.state().is_none());
}

#[test]
fn test_no_snapshot_before_initialize() {
    let engine = UndercoverEngine::new(six_seats(), responder(), GameRng::new(1)).unwrap();
    assert!(engine.snapshot().is_none());
}

/// Snapshot of `engine` with its serialized state edited in place.
fn edited(engine: &UndercoverEngine<ScriptedResponder>, edit: impl FnOnce(&mut serde_json::Value)) -> GameSnapshot {
    let json = engine.snapshot().unwrap().to_json().unwrap();
    let mut value: serde_json::Value = serde_json::from_str(&json).unwrap();
    edit(&mut value["state"]);
    GameSnapshot::from_json(&value.to_string()).unwrap()
}

fn assert_rejected(snapshot: GameSnapshot) {
    let mut fresh = UndercoverEngine::new(six_seats(), responder(), GameRng::new(3)).unwrap();
    assert!(matches!(fresh.restore(snapshot), Err(GameError::Snapshot(_))));
    assert!(fresh.state().is_none());
}

#[tokio::test]
async fn test_restore_rejects_unseated_outlier() {
    let mut engine = UndercoverEngine::new(six_seats(), responder(), GameRng::new(8)).unwrap();
    engine.initialize().await;

    assert_rejected(edited(&engine, |state| state["outlier"] = 9.into()));
}

#[tokio::test]
async fn test_restore_rejects_words_not_matching_roles() {
    let mut engine = UndercoverEngine::new(six_seats(), responder(), GameRng::new(8)).unwrap();
    engine.initialize().await;
    let outlier = engine.state().unwrap().outlier().index();

    assert_rejected(edited(&engine, |state| {
        let majority = state["theme"]["majority"].clone();
        state["words"]["data"][outlier] = majority;
    }));
}

#[tokio::test]
async fn test_restore_rejects_premature_winner() {
    let mut engine = UndercoverEngine::new(six_seats(), responder(), GameRng::new(8)).unwrap();
    engine.initialize().await;

    assert_rejected(edited(&engine, |state| state["winner"] = "civilians".into()));
}

#[tokio::test]
async fn test_restore_rejects_finished_game_without_winner() {
    let mut engine = UndercoverEngine::new(six_seats(), responder(), GameRng::new(8)).unwrap();
    engine.run_game().await.unwrap();

    assert_rejected(edited(&engine, |state| state["winner"] = serde_json::Value::Null));
}

#[tokio::test]
async fn test_restore_accepts_finished_game() {
    let mut engine = UndercoverEngine::new(six_seats(), responder(), GameRng::new(8)).unwrap();
    engine.run_game().await.unwrap();

    let mut other = UndercoverEngine::new(six_seats(), responder(), GameRng::new(3)).unwrap();
    other.restore(engine.snapshot().unwrap()).unwrap();
    assert_eq!(other.summary(), engine.summary());
    assert!(matches!(other.play_round().await, Err(GameError::AlreadyOver)));
}
