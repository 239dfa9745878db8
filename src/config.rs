//! Runtime tuning loaded from an optional TOML file.
//!
//! [`GameConfig`] mirrors the tunable constants in [`crate::constants`].
//! Missing keys fall back to the compiled defaults, so a file only needs the
//! values it overrides.  Pool capacities are not tunable; the file may only
//! ask for fewer asteroids or lives than the pools hold.

use std::path::Path;

use serde::Deserialize;

use crate::constants::*;
use crate::error::ConfigError;

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    // ── World ────────────────────────────────────────────────────────────────
    pub screen_width: f32,
    pub screen_height: f32,

    // ── Wave ─────────────────────────────────────────────────────────────────
    pub initial_asteroids: usize,
    pub max_lives: u32,

    // ── Player ───────────────────────────────────────────────────────────────
    pub player_rotation_speed: f32,
    pub player_speed: f32,
    pub player_thrust_step: f32,
    pub player_max_acceleration: f32,
    pub invincibility_duration: f32,

    // ── Weapons ──────────────────────────────────────────────────────────────
    pub shot_speed: f32,
    pub beam_speed: f32,
    pub beam_fuse: f32,
    pub beam_blast_duration: f32,
    pub beam_charge_max: f32,
    pub beam_charge_per_hit: f32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            screen_width: SCREEN_WIDTH,
            screen_height: SCREEN_HEIGHT,
            initial_asteroids: INITIAL_ASTEROIDS,
            max_lives: MAX_LIVES as u32,
            player_rotation_speed: PLAYER_ROTATION_SPEED,
            player_speed: PLAYER_SPEED,
            player_thrust_step: PLAYER_THRUST_STEP,
            player_max_acceleration: PLAYER_MAX_ACCELERATION,
            invincibility_duration: INVINCIBILITY_DURATION,
            shot_speed: SHOT_SPEED,
            beam_speed: BEAM_SPEED,
            beam_fuse: BEAM_FUSE,
            beam_blast_duration: BEAM_BLAST_DURATION,
            beam_charge_max: BEAM_CHARGE_MAX,
            beam_charge_per_hit: BEAM_CHARGE_PER_HIT,
        }
    }
}

impl GameConfig {
    pub fn from_toml_str(contents: &str) -> Result<Self, ConfigError> {
        let config: GameConfig = toml::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    /// Reject values the fixed pools or the kinematics cannot honour.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let positive = [
            ("screen_width", self.screen_width),
            ("screen_height", self.screen_height),
            ("player_speed", self.player_speed),
            ("shot_speed", self.shot_speed),
            ("beam_speed", self.beam_speed),
            ("beam_charge_max", self.beam_charge_max),
        ];
        for (name, value) in positive {
            if value.is_nan() || value <= 0.0 {
                return Err(ConfigError::Invalid {
                    name,
                    reason: format!("must be positive, got {value}"),
                });
            }
        }

        let non_negative = [
            ("player_rotation_speed", self.player_rotation_speed),
            ("player_thrust_step", self.player_thrust_step),
            ("player_max_acceleration", self.player_max_acceleration),
            ("invincibility_duration", self.invincibility_duration),
            ("beam_fuse", self.beam_fuse),
            ("beam_blast_duration", self.beam_blast_duration),
            ("beam_charge_per_hit", self.beam_charge_per_hit),
        ];
        for (name, value) in non_negative {
            if value.is_nan() || value < 0.0 {
                return Err(ConfigError::Invalid {
                    name,
                    reason: format!("must not be negative, got {value}"),
                });
            }
        }

        if self.initial_asteroids == 0 || self.initial_asteroids > MAX_ASTEROIDS {
            return Err(ConfigError::Invalid {
                name: "initial_asteroids",
                reason: format!("must be in 1..={MAX_ASTEROIDS}, got {}", self.initial_asteroids),
            });
        }
        if self.max_lives == 0 || self.max_lives as usize > MAX_LIVES {
            return Err(ConfigError::Invalid {
                name: "max_lives",
                reason: format!("must be in 1..={MAX_LIVES}, got {}", self.max_lives),
            });
        }
        Ok(())
    }
}
