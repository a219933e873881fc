use rootcause_sim::core::commands::{InputFrame, PlayerCommand};
use rootcause_sim::core::constants::{DT, PLAYER_MAX_HEALTH};
use rootcause_sim::core::difficulty::DifficultyLevel;
use rootcause_sim::core::enums::{Archetype, GamePhase};
use rootcause_sim::core::events::GameEvent;
use rootcause_sim::core::state::GameStateSnapshot;
use rootcause_sim::systems::encounter::{RosterEntry, WaveDefinition};
use rootcause_sim::{Autopilot, SimConfig, SimulationEngine};

fn wave(title: &str, roster: &[(Archetype, u32)]) -> WaveDefinition {
    WaveDefinition {
        title: title.to_string(),
        subtitle: String::new(),
        roster: roster
            .iter()
            .map(|&(archetype, count)| RosterEntry { archetype, count })
            .collect(),
    }
}

fn short_encounter() -> SimConfig {
    SimConfig {
        seed: 99,
        encounter: Some(vec![
            wave("OPENER", &[(Archetype::Drone, 2)]),
            wave("CLOSER", &[(Archetype::Drone, 1), (Archetype::Injector, 1)]),
        ]),
        ..SimConfig::default()
    }
}

fn started(
    config: SimConfig,
    difficulty: DifficultyLevel,
) -> (SimulationEngine, GameStateSnapshot) {
    let mut engine = SimulationEngine::new(config);
    engine.queue_command(PlayerCommand::StartMatch { difficulty });
    let snapshot = engine.tick(DT, &InputFrame::default());
    (engine, snapshot)
}

/// Let the autopilot play until the match ends or the tick limit runs out.
fn autoplay(
    engine: &mut SimulationEngine,
    mut snapshot: GameStateSnapshot,
    max_ticks: usize,
) -> (GameStateSnapshot, Vec<GameEvent>) {
    let pilot = Autopilot::new();
    let mut events = std::mem::take(&mut snapshot.events);
    for _ in 0..max_ticks {
        if snapshot.phase.is_terminal() {
            break;
        }
        let input = pilot.next_input(&snapshot);
        snapshot = engine.tick(DT, &input);
        events.append(&mut snapshot.events);
    }
    (snapshot, events)
}

// ---- Full match ----

#[test]
fn scripted_play_wins_a_short_encounter() {
    let (mut engine, first) = started(short_encounter(), DifficultyLevel::ScriptKiddie);
    let (last, events) = autoplay(&mut engine, first, 60 * 90);

    assert_eq!(last.phase, GamePhase::Victory);
    assert!(last.hud.health > 0);
    assert!(last.enemies.is_empty());

    let started: Vec<usize> = events
        .iter()
        .filter_map(|e| match e {
            GameEvent::WaveStarted { index, .. } => Some(*index),
            _ => None,
        })
        .collect();
    assert_eq!(started, vec![0, 1]);

    let cleared: Vec<usize> = events
        .iter()
        .filter_map(|e| match e {
            GameEvent::WaveCleared { index } => Some(*index),
            _ => None,
        })
        .collect();
    assert_eq!(cleared, vec![0, 1]);

    let defeats = events
        .iter()
        .filter(|e| matches!(e, GameEvent::EnemyDefeated { .. }))
        .count();
    assert_eq!(defeats, 4);

    let victories: Vec<u64> = events
        .iter()
        .filter_map(|e| match e {
            GameEvent::Victory { score } => Some(*score),
            _ => None,
        })
        .collect();
    assert_eq!(victories, vec![last.hud.score]);
    assert!(last.hud.score >= 4 * 500);
}

#[test]
fn victory_freezes_the_match() {
    let (mut engine, first) = started(short_encounter(), DifficultyLevel::ScriptKiddie);
    let (last, _) = autoplay(&mut engine, first, 60 * 90);
    assert_eq!(last.phase, GamePhase::Victory);

    let frozen_time = engine.time();
    for _ in 0..120 {
        let input = InputFrame {
            punch: true,
            ..InputFrame::default()
        };
        let snapshot = engine.tick(DT, &input);
        assert_eq!(snapshot.phase, GamePhase::Victory);
        assert!(snapshot.events.is_empty());
    }
    assert_eq!(engine.time(), frozen_time);
}

#[test]
fn game_over_then_start_match_begins_fresh() {
    let (mut engine, _) = started(SimConfig::default(), DifficultyLevel::KernelPanic);

    let mut game_over_events = 0;
    for _ in 0..60 * 120 {
        let snapshot = engine.tick(DT, &InputFrame::default());
        game_over_events += snapshot
            .events
            .iter()
            .filter(|e| matches!(e, GameEvent::GameOver { .. }))
            .count();
        if snapshot.phase == GamePhase::GameOver {
            break;
        }
    }
    assert_eq!(engine.phase(), GamePhase::GameOver);
    assert_eq!(game_over_events, 1);

    engine.queue_command(PlayerCommand::StartMatch {
        difficulty: DifficultyLevel::ScriptKiddie,
    });
    let snapshot = engine.tick(DT, &InputFrame::default());
    assert_eq!(snapshot.phase, GamePhase::WaveIntro);
    assert_eq!(snapshot.hud.health, PLAYER_MAX_HEALTH);
    assert_eq!(snapshot.hud.score, 0);
    assert_eq!(snapshot.hud.wave_index, 0);
    assert_eq!(engine.difficulty(), DifficultyLevel::ScriptKiddie);
}

// ---- Phase guards ----

#[test]
fn menu_ignores_everything_but_start() {
    let mut engine = SimulationEngine::new(SimConfig::default());
    engine.queue_commands([
        PlayerCommand::Pause,
        PlayerCommand::Resume,
        PlayerCommand::Restart,
    ]);
    let input = InputFrame {
        pause: true,
        ..InputFrame::default()
    };
    let snapshot = engine.tick(DT, &input);

    assert_eq!(snapshot.phase, GamePhase::MainMenu);
    assert!(snapshot.player.is_none());
    assert!(snapshot.enemies.is_empty());
    assert_eq!(engine.time().elapsed_secs, 0.0);
}

#[test]
fn start_match_is_ignored_mid_match() {
    let (mut engine, _) = started(SimConfig::default(), DifficultyLevel::Sysadmin);
    for _ in 0..200 {
        engine.tick(DT, &InputFrame::default());
    }
    let before = engine.time();

    engine.queue_command(PlayerCommand::StartMatch {
        difficulty: DifficultyLevel::KernelPanic,
    });
    engine.tick(DT, &InputFrame::default());

    assert!(engine.time().elapsed_secs > before.elapsed_secs);
    assert_eq!(engine.difficulty(), DifficultyLevel::Sysadmin);
}

#[test]
fn pause_only_applies_while_playing() {
    let (mut engine, snapshot) = started(SimConfig::default(), DifficultyLevel::ScriptKiddie);
    assert_eq!(snapshot.phase, GamePhase::WaveIntro);

    // Pausing during the wave banner is ignored.
    engine.queue_command(PlayerCommand::Pause);
    let snapshot = engine.tick(DT, &InputFrame::default());
    assert_eq!(snapshot.phase, GamePhase::WaveIntro);

    while engine.phase() == GamePhase::WaveIntro {
        engine.tick(DT, &InputFrame::default());
    }
    assert_eq!(engine.phase(), GamePhase::Playing);

    engine.queue_command(PlayerCommand::Resume);
    assert_eq!(engine.tick(DT, &InputFrame::default()).phase, GamePhase::Playing);

    engine.queue_command(PlayerCommand::Pause);
    let paused = engine.tick(DT, &InputFrame::default());
    assert_eq!(paused.phase, GamePhase::Paused);

    let time = engine.time();
    let walk = InputFrame {
        move_x: 1.0,
        ..InputFrame::default()
    };
    let again = engine.tick(DT, &walk);
    assert_eq!(engine.time(), time);
    assert_eq!(
        serde_json::to_string(&again.player).unwrap(),
        serde_json::to_string(&paused.player).unwrap()
    );
}

#[test]
fn return_to_menu_discards_the_match() {
    let (mut engine, _) = started(SimConfig::default(), DifficultyLevel::ScriptKiddie);
    for _ in 0..30 {
        engine.tick(DT, &InputFrame::default());
    }

    engine.queue_command(PlayerCommand::ReturnToMenu);
    let snapshot = engine.tick(DT, &InputFrame::default());

    assert_eq!(snapshot.phase, GamePhase::MainMenu);
    assert!(snapshot.player.is_none());
    assert!(snapshot.enemies.is_empty());
    assert_eq!(engine.world().len(), 0);
}
