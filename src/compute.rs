/// Game-state controller.
///
/// `tick` advances one frame by mutating the state in place.  All
/// randomness comes through the injected `rng` so callers control
/// determinism (tests use a seeded RNG).
use log::{info, warn};
use nalgebra::Vector2;
use rand::Rng;

use crate::collision::resolve_collisions;
use crate::config::GameConfig;
use crate::constants::{MAX_ASTEROIDS, MAX_LIVES, MAX_SHOTS};
use crate::entities::{
    Asteroid, AsteroidSize, Beam, Body, GameState, GameStatus, LifeMarker, Player, Shot,
};
use crate::input::FrameInput;
use crate::kinematics::{advance_player, advance_pools};
use crate::spawn::{
    activate_beam, add_charge, advance_beam_phase, fire_shot, random_motion, random_size,
    spawn_asteroid,
};

// ── Constructors ─────────────────────────────────────────────────────────────

/// A state with every pool empty, the ship parked at the centre and full
/// lives.  `reset` fills in the wave.
pub fn new_state(config: GameConfig) -> GameState {
    let mut state = GameState {
        config,
        player: Player::default(),
        asteroids: [Asteroid::default(); MAX_ASTEROIDS],
        shots: [Shot::default(); MAX_SHOTS],
        beam: Beam::default(),
        life_markers: [LifeMarker::default(); MAX_LIVES],
        score: 0,
        live_asteroids: 0,
        lives: 0,
        beam_charge: 0.0,
        invincibility: 0.0,
        debug_overlay: false,
        status: GameStatus::Playing,
        frame: 0,
    };
    respawn_player(&mut state);
    restore_lives(&mut state);
    state
}

/// Reinitialise every pool and counter for a fresh run.
pub fn reset(state: &mut GameState, rng: &mut impl Rng) {
    respawn_player(state);
    restore_lives(state);

    let (width, height) = (state.config.screen_width, state.config.screen_height);
    let wave = state.config.initial_asteroids.min(MAX_ASTEROIDS);
    for (i, asteroid) in state.asteroids.iter_mut().enumerate() {
        if i < wave {
            let (rotation, speed) = random_motion(rng);
            let position = Vector2::new(
                rng.gen_range(0.0..=width),
                rng.gen_range(0.0..=height),
            );
            *asteroid = Asteroid::new(random_size(rng), position, rotation, speed);
        } else {
            asteroid.body.active = false;
        }
    }
    state.live_asteroids = wave as u32;

    for shot in state.shots.iter_mut() {
        shot.body.active = false;
    }
    state.beam = Beam::default();
    state.beam_charge = 0.0;
    state.score = 0;
    state.status = GameStatus::Playing;
    state.frame = 0;

    info!("new wave: {} asteroids, {} lives", state.live_asteroids, state.lives);
}

fn restore_lives(state: &mut GameState) {
    let lives = (state.config.max_lives as usize).min(MAX_LIVES);
    let width = state.config.screen_width;
    for (i, marker) in state.life_markers.iter_mut().enumerate() {
        marker.body = Body {
            position: Vector2::new(width - 20.0 - 30.0 * i as f32, 20.0),
            active: i < lives,
            ..Body::default()
        };
    }
    state.lives = lives as u32;
}

/// Centre of the screen, heading 0°, no throttle, invincible.
pub fn respawn_player(state: &mut GameState) {
    state.player.body = Body {
        position: state.centre(),
        active: true,
        ..Body::default()
    };
    state.invincibility = state.config.invincibility_duration;
}

// ── State transitions ────────────────────────────────────────────────────────

/// Leave Small fragments where a rock was destroyed: none for Small, one for
/// Medium, two for Large.  Each fragment takes the first free slot at the
/// time it spawns.  Returns how many were actually placed.
pub fn split_asteroid(
    state: &mut GameState,
    size: AsteroidSize,
    position: Vector2<f32>,
    rng: &mut impl Rng,
) -> usize {
    let wanted = size.fragments();
    let mut placed = 0;
    for _ in 0..wanted {
        if spawn_asteroid(state, AsteroidSize::Small, position, rng).is_some() {
            placed += 1;
        }
    }
    if placed < wanted {
        warn!(
            "asteroid pool full: {:?} split placed {placed} of {wanted} fragments",
            size
        );
    }
    placed
}

/// Ship destroyed.  Takes a life and its marker, then either respawns the
/// ship (with invincibility) or ends the run.  No-op once lives are gone.
pub fn lose_life(state: &mut GameState) {
    if state.lives == 0 {
        return;
    }
    state.lives -= 1;
    if let Some(marker) = state.life_markers.get_mut(state.lives as usize) {
        marker.body.active = false;
    }

    if state.lives > 0 {
        respawn_player(state);
    } else {
        end_run(state);
    }
}

fn end_run(state: &mut GameState) {
    if state.status == GameStatus::GameOver {
        return;
    }
    state.status = GameStatus::GameOver;
    if state.live_asteroids == 0 {
        info!("wave cleared, final score {}", state.score);
    } else {
        info!("out of lives, final score {}", state.score);
    }
}

// ── Per-frame tick ───────────────────────────────────────────────────────────

/// Advance the simulation by one frame of `dt` seconds.
///
/// While the run is over only the restart trigger (and the debug toggle)
/// are honoured.
pub fn tick(state: &mut GameState, input: &FrameInput, dt: f32, rng: &mut impl Rng) {
    if input.toggle_debug {
        state.debug_overlay = !state.debug_overlay;
    }

    if state.is_game_over() {
        if input.restart {
            reset(state, rng);
        }
        return;
    }

    state.frame += 1;
    state.invincibility = (state.invincibility - dt).max(0.0);

    // ── 1. Ship ──────────────────────────────────────────────────────────────
    advance_player(&mut state.player, input, &state.config, dt);

    // ── 2. Spawns ────────────────────────────────────────────────────────────
    if input.fire {
        fire_shot(state);
    }
    if input.beam {
        activate_beam(state);
    }
    advance_beam_phase(state, dt);

    // ── 3. Everything else moves ─────────────────────────────────────────────
    advance_pools(state, dt);

    // ── 4. Collisions ────────────────────────────────────────────────────────
    resolve_collisions(state, rng);

    // ── 5. Passive charge ────────────────────────────────────────────────────
    if state.beam_charge <= state.config.beam_charge_max {
        add_charge(state, dt);
    }

    // ── 6. Win / loss ────────────────────────────────────────────────────────
    if state.live_asteroids == 0 || state.lives == 0 {
        end_run(state);
    }
}
