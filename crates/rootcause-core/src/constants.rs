//! Simulation constants and tuning parameters.

// --- Timing ---

/// Upper bound on a single simulation step (seconds).
pub const MAX_DT: f64 = 0.1;

/// Nominal frame rate used by headless drivers (Hz).
pub const TICK_RATE: u32 = 60;

/// Seconds per tick at the nominal frame rate.
pub const DT: f64 = 1.0 / TICK_RATE as f64;

// --- Play field ---

pub const FIELD_WIDTH: f64 = 800.0;
pub const FIELD_HEIGHT: f64 = 600.0;

/// Baseline on which actors stand when spawned.
pub const GROUND_Y: f64 = 450.0;

/// Top of the walkable depth band.
pub const PLAY_AREA_TOP: f64 = 350.0;

/// Bottom of the walkable depth band.
pub const PLAY_AREA_BOTTOM: f64 = 550.0;

/// Two actors must be closer than this on the depth axis for a hit to count.
pub const DEPTH_TOLERANCE: f64 = 40.0;

// --- Player ---

pub const PLAYER_SPAWN_X: f64 = 100.0;
pub const PLAYER_WIDTH: f64 = 48.0;
pub const PLAYER_HEIGHT: f64 = 64.0;
pub const PLAYER_SPEED: f64 = 200.0;
pub const PLAYER_MAX_HEALTH: u32 = 100;

/// Component applied to both axes of a diagonal input.
pub const DIAGONAL_FACTOR: f64 = std::f64::consts::FRAC_1_SQRT_2;

/// Vertical offset from the player's feet to the centre of their body box.
pub const PLAYER_BODY_OFFSET_Y: f64 = 30.0;

pub const PUNCH_DURATION_SECS: f64 = 0.25;
pub const KICK_DURATION_SECS: f64 = 0.35;
pub const SPECIAL_DURATION_SECS: f64 = 0.5;
pub const SPECIAL_COOLDOWN_SECS: f64 = 3.0;

/// Attack progress at which the player's hitbox appears.
pub const PLAYER_HITBOX_OPEN: f64 = 0.2;

/// Attack progress after which the player's hitbox is withdrawn.
pub const PLAYER_HITBOX_CLOSE: f64 = 0.6;

pub const PUNCH_DAMAGE: u32 = 10;
pub const KICK_DAMAGE: u32 = 15;
pub const SPECIAL_DAMAGE: u32 = 25;

pub const PLAYER_INVINCIBLE_SECS: f64 = 1.0;
pub const PLAYER_HURT_SECS: f64 = 0.3;
pub const PLAYER_KNOCKBACK_SPEED: f64 = 200.0;

/// Per-tick velocity retention while knocked back or stunned.
pub const KNOCKBACK_DAMPING: f64 = 0.9;

// --- Enemies ---

pub const ENEMY_STUN_SECS: f64 = 0.3;
pub const ENEMY_KNOCKBACK_SPEED: f64 = 150.0;

/// Enemy melee hitboxes appear once attack progress passes this fraction.
pub const ENEMY_HITBOX_OPEN: f64 = 0.3;

/// Spawn distance outside the field edge for regular enemies.
pub const SPAWN_MARGIN: f64 = 50.0;

/// Horizontal spacing between enemies entering from the same side.
pub const SPAWN_STAGGER: f64 = 30.0;

/// Spawn distance outside the field edge for the boss.
pub const BOSS_SPAWN_MARGIN: f64 = 80.0;

/// Boss enters phase two at or below this fraction of max health.
pub const BOSS_PHASE_TWO_FRACTION: f64 = 0.5;

pub const BOSS_TELEPORT_MIN_SECS: f64 = 3.0;
pub const BOSS_TELEPORT_JITTER_SECS: f64 = 2.0;
pub const BOSS_TELEPORT_MIN_OFFSET: f64 = 100.0;
pub const BOSS_TELEPORT_OFFSET_JITTER: f64 = 100.0;
pub const BOSS_TELEPORT_DEPTH_JITTER: f64 = 100.0;

/// Boss x is kept at least this far from either field edge after a teleport.
pub const BOSS_TELEPORT_EDGE: f64 = 60.0;

/// Minimum attack cooldown imposed right after a teleport.
pub const BOSS_TELEPORT_DISENGAGE_SECS: f64 = 0.5;

// --- Projectiles ---

pub const PROJECTILE_SPEED: f64 = 200.0;
pub const PROJECTILE_LIFETIME_SECS: f64 = 3.0;

/// Delay between an Injector starting its cast and the projectile leaving.
pub const PROJECTILE_FIRE_DELAY_SECS: f64 = 0.2;

/// Forward offset of the muzzle from the Injector's position.
pub const PROJECTILE_MUZZLE_OFFSET: f64 = 20.0;

/// Half-extents of the projectile-vs-player hit test.
pub const PROJECTILE_HIT_HALF_WIDTH: f64 = 25.0;
pub const PROJECTILE_HIT_HALF_HEIGHT: f64 = 30.0;

/// Projectiles further than this outside the field are discarded.
pub const PROJECTILE_CULL_MARGIN: f64 = 50.0;

// --- Scoring ---

pub const HIT_SCORE_PER_COMBO: u64 = 100;
pub const DEFEAT_BONUS: u64 = 500;
pub const BOSS_DEFEAT_BONUS: u64 = 2000;
pub const COMBO_WINDOW_SECS: f64 = 2.0;

/// Countdowns within this of zero count as elapsed, so a window of N whole
/// ticks closes on tick N despite float residue.
pub const TIMER_EPSILON: f64 = 1e-9;

// --- Effects ---

pub const HIT_PAUSE_NORMAL_SECS: f64 = 0.05;
pub const HIT_PAUSE_SPECIAL_SECS: f64 = 0.08;
pub const HIT_PAUSE_DEFEAT_SECS: f64 = 0.1;

pub const SHAKE_SPECIAL: f64 = 12.0;
pub const SHAKE_DEFEAT: f64 = 8.0;
pub const SHAKE_PLAYER_HURT: f64 = 10.0;
pub const SHAKE_BOSS_PHASE: f64 = 15.0;
pub const SHAKE_DECAY: f64 = 0.9;

/// Shake magnitudes below this snap to zero.
pub const SHAKE_CUTOFF: f64 = 0.5;

// --- Encounter ---

pub const WAVE_INTRO_SECS: f64 = 2.0;
pub const WAVE_ADVANCE_DELAY_SECS: f64 = 2.0;
