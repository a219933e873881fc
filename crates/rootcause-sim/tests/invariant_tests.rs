use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use rootcause_actor_ai::profiles::get_profile;
use rootcause_sim::core::commands::{InputFrame, PlayerCommand};
use rootcause_sim::core::constants::*;
use rootcause_sim::core::difficulty::DifficultyLevel;
use rootcause_sim::core::enums::GamePhase;
use rootcause_sim::core::state::GameStateSnapshot;
use rootcause_sim::{SimConfig, SimulationEngine};

fn random_input(rng: &mut ChaCha8Rng) -> InputFrame {
    InputFrame {
        move_x: rng.gen_range(-1.0..=1.0),
        move_y: rng.gen_range(-1.0..=1.0),
        punch: rng.gen_bool(0.2),
        kick: rng.gen_bool(0.1),
        special: rng.gen_bool(0.03),
        pause: rng.gen_bool(0.002),
    }
}

fn check_invariants(snapshot: &GameStateSnapshot) {
    let hud = &snapshot.hud;
    assert!(hud.health <= hud.max_health, "player health above max");
    assert!(snapshot.effects.screen_shake >= 0.0);
    assert!(snapshot.effects.hit_pause >= 0.0);
    assert!(hud.max_combo >= hud.combo);

    if let Some(player) = &snapshot.player {
        let half = PLAYER_WIDTH / 2.0;
        assert!(
            (half..=FIELD_WIDTH - half).contains(&player.position.x),
            "player x out of field: {}",
            player.position.x
        );
        assert!(
            (PLAY_AREA_TOP..=PLAY_AREA_BOTTOM).contains(&player.position.y),
            "player y out of band: {}",
            player.position.y
        );
        assert!((0.0..=1.0).contains(&player.attack_progress));
    }

    for enemy in &snapshot.enemies {
        assert!(enemy.health > 0, "dead enemy in snapshot");
        assert!(enemy.health <= enemy.max_health);
        assert!((0.0..=1.0).contains(&enemy.attack_progress));
    }

    // Enemies enter from off-field during the wave banner; once play is on
    // every live enemy has been moved at least once and is clamped.
    if snapshot.phase == GamePhase::Playing {
        for enemy in &snapshot.enemies {
            let half = get_profile(enemy.archetype).width / 2.0;
            assert!(
                (half - 1e-9..=FIELD_WIDTH - half + 1e-9).contains(&enemy.position.x),
                "{:?} {:?} x out of field: {}",
                enemy.archetype,
                enemy.id,
                enemy.position.x
            );
            assert!((PLAY_AREA_TOP..=PLAY_AREA_BOTTOM).contains(&enemy.position.y));
        }
    }
}

fn fuzz_match(seed: u64, difficulty: DifficultyLevel, ticks: usize) {
    let mut engine = SimulationEngine::new(SimConfig {
        seed,
        ..SimConfig::default()
    });
    engine.queue_command(PlayerCommand::StartMatch { difficulty });

    let mut rng = ChaCha8Rng::seed_from_u64(seed ^ 0x5eed);
    let mut last_score = 0;
    for _ in 0..ticks {
        let snapshot = engine.tick(DT, &random_input(&mut rng));
        check_invariants(&snapshot);

        // Score only ever grows within a match.
        assert!(snapshot.hud.score >= last_score);
        last_score = snapshot.hud.score;

        if snapshot.phase.is_terminal() {
            break;
        }
    }
}

#[test]
fn random_play_keeps_invariants_on_every_difficulty() {
    for (seed, difficulty) in [
        (11, DifficultyLevel::ScriptKiddie),
        (12, DifficultyLevel::Sysadmin),
        (13, DifficultyLevel::KernelPanic),
    ] {
        fuzz_match(seed, difficulty, 4000);
    }
}

#[test]
fn random_play_keeps_invariants_across_seeds() {
    for seed in 100..104 {
        fuzz_match(seed, DifficultyLevel::Sysadmin, 2500);
    }
}

#[test]
fn player_health_never_underflows() {
    let mut engine = SimulationEngine::new(SimConfig::default());
    engine.queue_command(PlayerCommand::StartMatch {
        difficulty: DifficultyLevel::KernelPanic,
    });

    // Stand still and let the wave beat the player down.
    let mut saw_game_over = false;
    for _ in 0..60 * 120 {
        let snapshot = engine.tick(DT, &InputFrame::default());
        check_invariants(&snapshot);
        if snapshot.phase == GamePhase::GameOver {
            assert_eq!(snapshot.hud.health, 0);
            saw_game_over = true;
            break;
        }
    }
    assert!(saw_game_over, "idle player should eventually lose");
}
