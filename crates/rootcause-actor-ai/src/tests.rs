#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    use rootcause_core::commands::InputFrame;
    use rootcause_core::constants::*;
    use rootcause_core::enums::*;
    use rootcause_core::types::Position;

    use crate::fsm::*;
    use crate::player::*;
    use crate::profiles::get_profile;

    fn rng() -> ChaCha8Rng {
        ChaCha8Rng::seed_from_u64(7)
    }

    fn make_context(archetype: Archetype, ai_state: AiState, distance: f64) -> EnemyContext {
        // Enemy sits to the right of the player on the same depth line.
        let profile = get_profile(archetype);
        EnemyContext {
            archetype,
            ai_state,
            position: Position::new(400.0 + distance, GROUND_Y),
            target: Position::new(400.0, GROUND_Y),
            speed: profile.base_speed,
            attack_range: profile.attack_range,
            attack_cooldown: 0.0,
            boss_phase: (archetype == Archetype::Boss).then_some(BossPhase::One),
        }
    }

    // ---- Player transition table ----

    #[test]
    fn test_player_move_events() {
        let walk = transition(PlayerState::Idle, PlayerEvent::Move { moving: true });
        assert_eq!(walk, Some(PlayerState::Walk));
        let idle = transition(PlayerState::Walk, PlayerEvent::Move { moving: false });
        assert_eq!(idle, Some(PlayerState::Idle));
        assert_eq!(
            transition(PlayerState::Kick, PlayerEvent::Move { moving: true }),
            None,
            "Movement is ignored mid-attack"
        );
    }

    #[test]
    fn test_player_attack_start_only_from_neutral() {
        for kind in [AttackKind::Punch, AttackKind::Kick, AttackKind::Special] {
            assert_eq!(
                transition(PlayerState::Walk, PlayerEvent::StartAttack(kind)),
                Some(PlayerState::from(kind))
            );
            assert_eq!(
                transition(PlayerState::Punch, PlayerEvent::StartAttack(kind)),
                None
            );
            assert_eq!(transition(PlayerState::Hurt, PlayerEvent::StartAttack(kind)), None);
        }
    }

    #[test]
    fn test_player_expiry_and_damage() {
        assert_eq!(
            transition(PlayerState::Special, PlayerEvent::AttackExpired),
            Some(PlayerState::Idle)
        );
        assert_eq!(transition(PlayerState::Idle, PlayerEvent::AttackExpired), None);
        assert_eq!(
            transition(PlayerState::Kick, PlayerEvent::Damaged),
            Some(PlayerState::Hurt)
        );
        assert_eq!(
            transition(PlayerState::Hurt, PlayerEvent::HurtExpired),
            Some(PlayerState::Idle)
        );
        assert_eq!(transition(PlayerState::Walk, PlayerEvent::HurtExpired), None);
    }

    #[test]
    fn test_requested_attack_precedence_and_cooldown() {
        let all = InputFrame {
            punch: true,
            kick: true,
            special: true,
            ..Default::default()
        };
        assert_eq!(requested_attack(&all, 0.0), Some(AttackKind::Punch));

        let special = InputFrame {
            special: true,
            ..Default::default()
        };
        assert_eq!(requested_attack(&special, 0.0), Some(AttackKind::Special));
        assert_eq!(requested_attack(&special, 1.2), None, "Special gated by cooldown");
        assert_eq!(requested_attack(&InputFrame::default(), 0.0), None);
    }

    #[test]
    fn test_walk_velocity_diagonal_normalized() {
        let straight = walk_velocity(1.0, 0.0, PLAYER_SPEED);
        assert!((straight.speed() - PLAYER_SPEED).abs() < 1e-9);

        let diagonal = walk_velocity(-1.0, 1.0, PLAYER_SPEED);
        assert!(
            (diagonal.speed() - PLAYER_SPEED).abs() < 1e-6,
            "Diagonal speed should match straight speed, got {}",
            diagonal.speed()
        );
        assert!(diagonal.x < 0.0 && diagonal.y > 0.0);
    }

    #[test]
    fn test_player_hitbox_window() {
        let pos = Position::new(200.0, GROUND_Y);
        let d = PUNCH_DURATION_SECS;

        // progress 0.1: too early
        assert!(attack_hitbox(AttackKind::Punch, pos, Facing::Right, d * 0.9, d).is_none());
        // progress 0.4: active
        let hb = attack_hitbox(AttackKind::Punch, pos, Facing::Right, d * 0.6, d)
            .expect("punch should be active at 40%");
        assert_eq!(hb.damage, PUNCH_DAMAGE);
        assert!(hb.area.x > pos.x, "Punch reaches forward");
        // progress 0.8: withdrawn
        assert!(attack_hitbox(AttackKind::Punch, pos, Facing::Right, d * 0.2, d).is_none());

        let left = attack_hitbox(AttackKind::Kick, pos, Facing::Left, 0.2, KICK_DURATION_SECS)
            .expect("kick active");
        assert!(left.area.x < pos.x, "Kick follows facing");
        assert_eq!(left.damage, KICK_DAMAGE);
    }

    #[test]
    fn test_special_hitbox_centered() {
        let pos = Position::new(300.0, GROUND_Y);
        for facing in [Facing::Left, Facing::Right] {
            let hb = attack_hitbox(AttackKind::Special, pos, facing, 0.3, SPECIAL_DURATION_SECS)
                .expect("special active at 40%");
            assert_eq!(hb.area.x, pos.x);
            assert!(hb.is_special);
            assert_eq!(hb.damage, SPECIAL_DAMAGE);
        }
    }

    // ---- Enemy FSM ----

    #[test]
    fn test_drone_approaches_when_far() {
        let ctx = make_context(Archetype::Drone, AiState::Approach, 300.0);
        let update = evaluate(&ctx, &mut rng());
        assert_eq!(update.ai_state, AiState::Approach);
        assert_eq!(update.state, EnemyState::Walk);
        assert!(update.velocity.x < 0.0, "Should move toward the player");
        assert!((update.velocity.x.abs() - 90.0).abs() < 1e-9);
        assert!(update.action.is_none());
    }

    #[test]
    fn test_drone_vertical_speed_halved() {
        let mut ctx = make_context(Archetype::Drone, AiState::Approach, 0.0);
        ctx.position = Position::new(400.0, GROUND_Y - 100.0);
        let update = evaluate(&ctx, &mut rng());
        assert!((update.velocity.y - 45.0).abs() < 1e-9, "got {}", update.velocity.y);
    }

    #[test]
    fn test_drone_in_range_commits_then_attacks() {
        let ctx = make_context(Archetype::Drone, AiState::Approach, 30.0);
        let update = evaluate(&ctx, &mut rng());
        assert_eq!(update.ai_state, AiState::Attack);
        assert!(update.velocity.is_zero());

        let ctx = make_context(Archetype::Drone, AiState::Attack, 30.0);
        let update = evaluate(&ctx, &mut rng());
        assert_eq!(update.state, EnemyState::Attack);
        assert_eq!(update.ai_state, AiState::Retreat);
        match update.action {
            Some(EnemyAction::BeginAttack { cooldown }) => {
                assert!((1.0..2.0).contains(&cooldown), "cooldown {cooldown}");
            }
            None => panic!("Drone should begin an attack"),
        }
    }

    #[test]
    fn test_drone_in_range_on_cooldown_holds() {
        let mut ctx = make_context(Archetype::Drone, AiState::Approach, 30.0);
        ctx.attack_cooldown = 0.5;
        let update = evaluate(&ctx, &mut rng());
        assert_eq!(update.ai_state, AiState::Approach);
        assert_eq!(update.state, EnemyState::Idle);
        assert!(update.velocity.is_zero());
    }

    #[test]
    fn test_retreat_reengages_when_far() {
        let ctx = make_context(Archetype::Drone, AiState::Retreat, 200.0);
        let update = evaluate(&ctx, &mut rng());
        assert_eq!(update.ai_state, AiState::Approach);
        assert!(update.velocity.x > 0.0, "Retreat moves away from the player");
    }

    #[test]
    fn test_retreat_mostly_continues_when_close() {
        let mut rng = rng();
        let ctx = make_context(Archetype::Drone, AiState::Retreat, 60.0);
        let continued = (0..200)
            .filter(|_| evaluate(&ctx, &mut rng).ai_state == AiState::Retreat)
            .count();
        assert!(continued > 150, "2% re-engage chance, continued {continued}/200");
    }

    #[test]
    fn test_injector_standoff_band() {
        let far = evaluate(
            &make_context(Archetype::Injector, AiState::Approach, 260.0),
            &mut rng(),
        );
        assert!(far.velocity.x < 0.0, "Advance when beyond preferred range");

        let close = evaluate(
            &make_context(Archetype::Injector, AiState::Approach, 100.0),
            &mut rng(),
        );
        assert!(close.velocity.x > 0.0, "Back off when inside preferred - 50");
        assert_eq!(close.velocity.y, 0.0);

        let band = evaluate(
            &make_context(Archetype::Injector, AiState::Approach, 175.0),
            &mut rng(),
        );
        assert_eq!(band.ai_state, AiState::Attack);

        let mut waiting = make_context(Archetype::Injector, AiState::Approach, 175.0);
        waiting.attack_cooldown = 1.0;
        let held = evaluate(&waiting, &mut rng());
        assert_eq!(held.state, EnemyState::Idle);
        assert!(held.velocity.is_zero());
    }

    #[test]
    fn test_injector_cooldown_range() {
        let mut rng = rng();
        for _ in 0..50 {
            let ctx = make_context(Archetype::Injector, AiState::Attack, 175.0);
            let update = evaluate(&ctx, &mut rng);
            let Some(EnemyAction::BeginAttack { cooldown }) = update.action else {
                panic!("Injector should begin a cast");
            };
            assert!((1.5..2.5).contains(&cooldown), "cooldown {cooldown}");
        }
    }

    #[test]
    fn test_boss_cooldown_depends_on_phase() {
        let mut ctx = make_context(Archetype::Boss, AiState::Attack, 40.0);
        let update = evaluate(&ctx, &mut rng());
        assert_eq!(update.action, Some(EnemyAction::BeginAttack { cooldown: 1.5 }));

        ctx.boss_phase = Some(BossPhase::Two);
        let update = evaluate(&ctx, &mut rng());
        assert_eq!(update.action, Some(EnemyAction::BeginAttack { cooldown: 0.8 }));
    }

    #[test]
    fn test_boss_phase_transition_once() {
        assert_eq!(boss_phase_transition(101, 200, BossPhase::One), None);
        assert_eq!(boss_phase_transition(100, 200, BossPhase::One), Some(BossPhase::Two));
        assert_eq!(boss_phase_transition(40, 200, BossPhase::Two), None);
        assert_eq!(
            boss_phase_transition(200, 200, BossPhase::Two),
            None,
            "Phase never reverts"
        );
        // Odd max health: 301 / 2 = 150.5
        assert_eq!(boss_phase_transition(151, 301, BossPhase::One), None);
        assert_eq!(boss_phase_transition(150, 301, BossPhase::One), Some(BossPhase::Two));
    }

    #[test]
    fn test_teleport_destination_clamped() {
        let mut rng = rng();
        for _ in 0..100 {
            let corner = teleport_destination(Position::new(30.0, PLAY_AREA_TOP), &mut rng);
            assert!(corner.x >= BOSS_TELEPORT_EDGE && corner.x <= FIELD_WIDTH - BOSS_TELEPORT_EDGE);
            assert!(corner.y >= PLAY_AREA_TOP && corner.y <= PLAY_AREA_BOTTOM);

            let mid = teleport_destination(Position::new(400.0, GROUND_Y), &mut rng);
            let offset = (mid.x - 400.0).abs();
            assert!((100.0..=200.0).contains(&offset), "offset {offset}");
        }
    }

    #[test]
    fn test_teleport_delay_range() {
        let mut rng = rng();
        for _ in 0..100 {
            let d = next_teleport_delay(&mut rng);
            assert!((3.0..5.0).contains(&d));
        }
    }

    #[test]
    fn test_melee_hitbox_opens_after_thirty_percent() {
        let pos = Position::new(400.0, GROUND_Y);
        assert!(melee_hitbox(Archetype::Drone, pos, Facing::Left, 5, 0.3).is_none());
        let hb = melee_hitbox(Archetype::Drone, pos, Facing::Left, 5, 0.31).expect("open");
        assert!(hb.area.x < pos.x);
        assert_eq!(hb.damage, 5);
        assert!(melee_hitbox(Archetype::Boss, pos, Facing::Right, 20, 0.9).is_some());
        assert!(
            melee_hitbox(Archetype::Injector, pos, Facing::Right, 10, 0.9).is_none(),
            "Injectors never melee"
        );
    }

    #[test]
    fn test_attack_progress_bounds() {
        assert_eq!(attack_progress(0.4, 0.4), 0.0);
        assert_eq!(attack_progress(0.0, 0.4), 1.0);
        assert_eq!(attack_progress(-0.1, 0.4), 1.0);
        assert_eq!(attack_progress(0.3, 0.0), 0.0);
    }

    #[test]
    fn test_profiles_defeat_bonus() {
        assert_eq!(get_profile(Archetype::Drone).defeat_bonus, DEFEAT_BONUS);
        assert_eq!(
            get_profile(Archetype::Boss).defeat_bonus,
            DEFEAT_BONUS + BOSS_DEFEAT_BONUS
        );
    }
}
