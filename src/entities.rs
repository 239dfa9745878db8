/// All game entity types — pure data, no simulation logic.
use nalgebra::Vector2;

use crate::config::GameConfig;
use crate::constants::{
    ASTEROID_LARGE_WIDTH, ASTEROID_MEDIUM_WIDTH, ASTEROID_SMALL_WIDTH, MAX_ASTEROIDS, MAX_LIVES,
    MAX_SHOTS, PLAYER_SPRITE_WIDTH,
};

// ── Shared motion record ──────────────────────────────────────────────────────

/// Motion fields every role shares.  An inactive body is a free pool slot and
/// its spatial fields are stale until the slot is reinitialised.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Body {
    pub position: Vector2<f32>,
    pub velocity: Vector2<f32>,
    /// Heading in degrees.
    pub rotation: f32,
    /// Scalar throttle applied to `velocity`.
    pub acceleration: f32,
    pub active: bool,
}

impl Default for Body {
    fn default() -> Self {
        Self {
            position: Vector2::zeros(),
            velocity: Vector2::zeros(),
            rotation: 0.0,
            acceleration: 0.0,
            active: false,
        }
    }
}

impl Body {
    /// Unit vector pointing along `rotation`.
    pub fn heading(&self) -> Vector2<f32> {
        heading_of(self.rotation)
    }
}

pub fn heading_of(rotation: f32) -> Vector2<f32> {
    let rad = rotation.to_radians();
    Vector2::new(rad.cos(), rad.sin())
}

// ── Asteroids ─────────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum AsteroidSize {
    #[default]
    Small,
    Medium,
    Large,
}

impl AsteroidSize {
    pub const ALL: [AsteroidSize; 3] = [AsteroidSize::Small, AsteroidSize::Medium, AsteroidSize::Large];

    pub fn sprite_width(self) -> f32 {
        match self {
            AsteroidSize::Small => ASTEROID_SMALL_WIDTH,
            AsteroidSize::Medium => ASTEROID_MEDIUM_WIDTH,
            AsteroidSize::Large => ASTEROID_LARGE_WIDTH,
        }
    }

    /// Radius used against shots.
    pub fn radius(self) -> f32 {
        self.sprite_width() / 2.0
    }

    /// Radius used against the player.  Small rocks get the larger divisor,
    /// so they are more forgiving than their sprite suggests.
    pub fn contact_radius(self) -> f32 {
        let divisor = match self {
            AsteroidSize::Small => 4.0,
            AsteroidSize::Medium | AsteroidSize::Large => 2.0,
        };
        self.sprite_width() / divisor
    }

    /// Number of Small fragments left behind when destroyed.
    pub fn fragments(self) -> usize {
        match self {
            AsteroidSize::Small => 0,
            AsteroidSize::Medium => 1,
            AsteroidSize::Large => 2,
        }
    }
}

/// For asteroids `body.velocity` holds per-axis speed magnitudes, not a
/// heading vector; see `kinematics::advance_asteroid`.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Asteroid {
    pub body: Body,
    pub size: AsteroidSize,
}

impl Asteroid {
    pub fn new(size: AsteroidSize, position: Vector2<f32>, rotation: f32, speed: Vector2<f32>) -> Self {
        Self {
            body: Body {
                position,
                velocity: speed,
                rotation,
                acceleration: 0.0,
                active: true,
            },
            size,
        }
    }
}

// ── Player & projectiles ──────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Player {
    pub body: Body,
}

impl Player {
    pub fn radius() -> f32 {
        PLAYER_SPRITE_WIDTH / 4.0
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Shot {
    pub body: Body,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum BeamPhase {
    /// Travelling as a small projectile; detonates once `fuse` drops below 0.
    Primed { fuse: f32 },
    /// Large blast radius, live for `remaining` more seconds.
    Detonated { remaining: f32 },
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Beam {
    pub body: Body,
    pub phase: BeamPhase,
}

impl Default for Beam {
    fn default() -> Self {
        Self {
            body: Body::default(),
            phase: BeamPhase::Primed { fuse: 0.0 },
        }
    }
}

impl Beam {
    pub fn is_detonated(&self) -> bool {
        self.body.active && matches!(self.phase, BeamPhase::Detonated { .. })
    }
}

/// One HUD token per remaining life.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct LifeMarker {
    pub body: Body,
}

// ── Master game state ─────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameStatus {
    Playing,
    GameOver,
}

/// The entire simulation.  Pools are fixed-size; slot index is identity.
#[derive(Clone, Debug)]
pub struct GameState {
    pub config: GameConfig,
    pub player: Player,
    pub asteroids: [Asteroid; MAX_ASTEROIDS],
    pub shots: [Shot; MAX_SHOTS],
    pub beam: Beam,
    pub life_markers: [LifeMarker; MAX_LIVES],
    pub score: u32,
    /// Authoritative remaining-asteroid count; the win check reads this, not
    /// a recount of the pool.
    pub live_asteroids: u32,
    pub lives: u32,
    pub beam_charge: f32,
    /// Seconds of post-respawn invincibility left.
    pub invincibility: f32,
    pub debug_overlay: bool,
    pub status: GameStatus,
    pub frame: u64,
}

impl GameState {
    pub fn is_game_over(&self) -> bool {
        self.status == GameStatus::GameOver
    }

    pub fn is_invincible(&self) -> bool {
        self.invincibility > 0.0
    }

    /// True when the run ended because the wave was cleared.
    pub fn is_cleared(&self) -> bool {
        self.is_game_over() && self.live_asteroids == 0
    }

    pub fn active_asteroids(&self) -> usize {
        self.asteroids.iter().filter(|a| a.body.active).count()
    }

    pub fn active_shots(&self) -> usize {
        self.shots.iter().filter(|s| s.body.active).count()
    }

    /// Charge as a fraction of the maximum, for the HUD bar.
    pub fn beam_charge_ratio(&self) -> f32 {
        (self.beam_charge / self.config.beam_charge_max).clamp(0.0, 1.0)
    }

    pub fn centre(&self) -> Vector2<f32> {
        Vector2::new(self.config.screen_width / 2.0, self.config.screen_height / 2.0)
    }
}
