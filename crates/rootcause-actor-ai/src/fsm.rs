//! Enemy behavior finite state machine.
//!
//! Pure functions that compute AI-state transitions and steering for enemies
//! based on their archetype, current AI state, and the player's position.
//! No ECS dependency; operates on plain data.
//!
//! The shared gating (stun, attack lock, cooldown decay, bounds clamp) is the
//! caller's job and runs before [`evaluate`].

use glam::DVec2;
use rand::Rng;

use rootcause_core::constants::*;
use rootcause_core::enums::{AiState, Archetype, BossPhase, EnemyState, Facing};
use rootcause_core::types::{AttackBox, Hitbox, Position, Velocity};

use crate::profiles::{get_profile, ArchetypeProfile, MeleeReach};

/// Input to the enemy FSM for a single entity.
pub struct EnemyContext {
    pub archetype: Archetype,
    pub ai_state: AiState,
    pub position: Position,
    /// Player feet position.
    pub target: Position,
    /// Current, difficulty-scaled speed.
    pub speed: f64,
    pub attack_range: f64,
    pub attack_cooldown: f64,
    pub boss_phase: Option<BossPhase>,
}

/// What the enemy does beyond steering this tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum EnemyAction {
    /// Lock into an attack; the caller starts the attack timer and applies
    /// the new cooldown.
    BeginAttack { cooldown: f64 },
}

/// Output from the enemy FSM.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EnemyUpdate {
    pub ai_state: AiState,
    pub state: EnemyState,
    pub velocity: Velocity,
    pub action: Option<EnemyAction>,
}

/// Evaluate the FSM for one enemy. Returns the updated AI state, steering and
/// any attack it commits to.
pub fn evaluate<R: Rng>(ctx: &EnemyContext, rng: &mut R) -> EnemyUpdate {
    let profile = get_profile(ctx.archetype);
    let offset = ctx.target.as_dvec2() - ctx.position.as_dvec2();
    let dist = offset.length();
    let dir = offset.normalize_or_zero();

    match ctx.ai_state {
        AiState::Approach => match ctx.archetype {
            Archetype::Injector => evaluate_standoff(ctx, &profile, dir, dist),
            Archetype::Drone | Archetype::Boss => evaluate_approach(ctx, dir, dist),
        },
        AiState::Attack => begin_attack(ctx, &profile, rng),
        AiState::Retreat => evaluate_retreat(ctx, &profile, dir, dist, rng),
    }
}

/// Melee archetypes close the gap, then commit once the cooldown allows.
fn evaluate_approach(ctx: &EnemyContext, dir: DVec2, dist: f64) -> EnemyUpdate {
    if dist > ctx.attack_range {
        return EnemyUpdate {
            ai_state: AiState::Approach,
            state: EnemyState::Walk,
            velocity: Velocity::new(dir.x * ctx.speed, dir.y * ctx.speed * 0.5),
            action: None,
        };
    }

    if ctx.attack_cooldown <= 0.0 {
        return EnemyUpdate {
            ai_state: AiState::Attack,
            state: EnemyState::Idle,
            velocity: Velocity::default(),
            action: None,
        };
    }

    hold(AiState::Approach)
}

/// Ranged archetypes hold a band between `preferred - 50` and `preferred`.
fn evaluate_standoff(
    ctx: &EnemyContext,
    profile: &ArchetypeProfile,
    dir: DVec2,
    dist: f64,
) -> EnemyUpdate {
    let preferred = profile.preferred_range.unwrap_or(ctx.attack_range);

    if dist > preferred {
        return EnemyUpdate {
            ai_state: AiState::Approach,
            state: EnemyState::Walk,
            velocity: Velocity::new(dir.x * ctx.speed, dir.y * ctx.speed * 0.5),
            action: None,
        };
    }

    if dist < preferred - 50.0 {
        return EnemyUpdate {
            ai_state: AiState::Approach,
            state: EnemyState::Walk,
            velocity: Velocity::new(-dir.x * ctx.speed, 0.0),
            action: None,
        };
    }

    if ctx.attack_cooldown <= 0.0 {
        return EnemyUpdate {
            ai_state: AiState::Attack,
            state: EnemyState::Idle,
            velocity: Velocity::default(),
            action: None,
        };
    }

    hold(AiState::Approach)
}

fn begin_attack<R: Rng>(
    ctx: &EnemyContext,
    profile: &ArchetypeProfile,
    rng: &mut R,
) -> EnemyUpdate {
    let cooldown = match ctx.archetype {
        Archetype::Boss => boss_cooldown(ctx.boss_phase.unwrap_or_default()),
        Archetype::Drone | Archetype::Injector => {
            profile.cooldown_base + rng.gen::<f64>() * profile.cooldown_jitter
        }
    };

    EnemyUpdate {
        ai_state: AiState::Retreat,
        state: EnemyState::Attack,
        velocity: Velocity::default(),
        action: Some(EnemyAction::BeginAttack { cooldown }),
    }
}

/// Back away with random vertical drift until far enough or a re-engage roll hits.
fn evaluate_retreat<R: Rng>(
    ctx: &EnemyContext,
    profile: &ArchetypeProfile,
    dir: DVec2,
    dist: f64,
    rng: &mut R,
) -> EnemyUpdate {
    let vx = -dir.x * ctx.speed * profile.retreat_speed_factor;
    let vy = (rng.gen::<f64>() - 0.5) * ctx.speed;

    let reengage = dist > profile.reengage_distance || rng.gen_bool(profile.reengage_chance);

    EnemyUpdate {
        ai_state: if reengage {
            AiState::Approach
        } else {
            AiState::Retreat
        },
        state: EnemyState::Walk,
        velocity: Velocity::new(vx, vy),
        action: None,
    }
}

fn hold(ai_state: AiState) -> EnemyUpdate {
    EnemyUpdate {
        ai_state,
        state: EnemyState::Idle,
        velocity: Velocity::default(),
        action: None,
    }
}

/// Boss attack cooldown by phase.
pub fn boss_cooldown(phase: BossPhase) -> f64 {
    match phase {
        BossPhase::One => 1.5,
        BossPhase::Two => 0.8,
    }
}

/// Returns the new phase if the boss should escalate this tick.
/// Escalation is one-way; a boss already in phase two never changes again.
pub fn boss_phase_transition(
    health: u32,
    max_health: u32,
    phase: BossPhase,
) -> Option<BossPhase> {
    let threshold = f64::from(max_health) * BOSS_PHASE_TWO_FRACTION;
    if phase == BossPhase::One && f64::from(health) <= threshold {
        Some(BossPhase::Two)
    } else {
        None
    }
}

/// Pick a teleport destination beside the player, clamped to the field.
pub fn teleport_destination<R: Rng>(player: Position, rng: &mut R) -> Position {
    let side = if rng.gen::<f64>() > 0.5 { 1.0 } else { -1.0 };
    let x = player.x
        + side * (BOSS_TELEPORT_MIN_OFFSET + rng.gen::<f64>() * BOSS_TELEPORT_OFFSET_JITTER);
    let y = player.y + (rng.gen::<f64>() - 0.5) * BOSS_TELEPORT_DEPTH_JITTER;

    Position::new(
        x.clamp(BOSS_TELEPORT_EDGE, FIELD_WIDTH - BOSS_TELEPORT_EDGE),
        y.clamp(PLAY_AREA_TOP, PLAY_AREA_BOTTOM),
    )
}

/// Delay until the next phase-two teleport.
pub fn next_teleport_delay<R: Rng>(rng: &mut R) -> f64 {
    BOSS_TELEPORT_MIN_SECS + rng.gen::<f64>() * BOSS_TELEPORT_JITTER_SECS
}

/// Normalized attack progress: 0.0 at the start, 1.0 when the timer runs out.
pub fn attack_progress(remaining: f64, duration: f64) -> f64 {
    if duration <= 0.0 {
        return 0.0;
    }
    (1.0 - remaining / duration).clamp(0.0, 1.0)
}

/// Active melee hitbox for an enemy mid-swing, if any.
/// The box opens once progress passes [`ENEMY_HITBOX_OPEN`] and stays until
/// the swing ends. Ranged archetypes never produce one.
pub fn melee_hitbox(
    archetype: Archetype,
    position: Position,
    facing: Facing,
    damage: u32,
    progress: f64,
) -> Option<AttackBox> {
    let profile = get_profile(archetype);
    let reach: &MeleeReach = profile.melee.as_ref()?;
    if progress <= ENEMY_HITBOX_OPEN {
        return None;
    }

    Some(AttackBox {
        area: Hitbox::new(
            position.x + facing.sign() * reach.offset_x,
            position.y - reach.offset_y,
            reach.width,
            reach.height,
        ),
        damage,
        is_special: false,
    })
}
