//! Compile-time tuning.  `GameConfig::default()` mirrors the tunable subset;
//! pool capacities and collision radii are fixed here.

// ── World ─────────────────────────────────────────────────────────────────────

pub const SCREEN_WIDTH: f32 = 800.0;
pub const SCREEN_HEIGHT: f32 = 450.0;

// ── Pool capacities ───────────────────────────────────────────────────────────

pub const MAX_ASTEROIDS: usize = 20;
pub const MAX_SHOTS: usize = 10;
pub const MAX_LIVES: usize = 3;

/// Asteroids placed by a reset.  The rest of the pool is headroom for splits.
pub const INITIAL_ASTEROIDS: usize = 10;

// ── Player ────────────────────────────────────────────────────────────────────

/// Degrees per second.
pub const PLAYER_ROTATION_SPEED: f32 = 200.0;
pub const PLAYER_SPEED: f32 = 6.0;
/// Added to the throttle every frame thrust is held (not scaled by dt).
pub const PLAYER_THRUST_STEP: f32 = 0.04;
pub const PLAYER_MAX_ACCELERATION: f32 = 50.0;
/// Drawn at half scale, so the collision radius is a quarter of this.
pub const PLAYER_SPRITE_WIDTH: f32 = 56.0;
pub const INVINCIBILITY_DURATION: f32 = 2.0;

// ── Asteroids ─────────────────────────────────────────────────────────────────

pub const ASTEROID_SMALL_WIDTH: f32 = 28.0;
pub const ASTEROID_MEDIUM_WIDTH: f32 = 43.0;
pub const ASTEROID_LARGE_WIDTH: f32 = 98.0;
pub const ASTEROID_MIN_SPEED: i32 = 1;
pub const ASTEROID_MAX_SPEED: i32 = 2;

// ── Shots ─────────────────────────────────────────────────────────────────────

pub const SHOT_SPEED: f32 = 250.0;
pub const SHOT_RADIUS: f32 = 2.0;

// ── Super beam ────────────────────────────────────────────────────────────────

pub const BEAM_SPEED: f32 = 200.0;
/// Seconds between activation and detonation.
pub const BEAM_FUSE: f32 = 1.0;
/// Seconds the detonated blast stays live.
pub const BEAM_BLAST_DURATION: f32 = 0.5;
pub const BEAM_PRIMED_RADIUS: f32 = 10.0;
pub const BEAM_BLAST_RADIUS: f32 = 100.0;
/// Asteroids are treated as points against the blast.
pub const BEAM_TARGET_RADIUS: f32 = 2.0;
pub const BEAM_CHARGE_MAX: f32 = 100.0;
pub const BEAM_CHARGE_PER_HIT: f32 = 10.0;
