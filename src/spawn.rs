/// Slot allocation for shots, the beam and asteroids.
///
/// Pools never grow.  A spawn claims the first inactive slot; when none is
/// free the spawn is dropped and the caller sees `None`.
use log::debug;
use nalgebra::Vector2;
use rand::Rng;

use crate::constants::{ASTEROID_MAX_SPEED, ASTEROID_MIN_SPEED};
use crate::entities::{Asteroid, AsteroidSize, BeamPhase, Body, GameState};

/// Index of the first inactive body in a pool.
pub fn first_free<T>(pool: &[T], body: impl Fn(&T) -> &Body) -> Option<usize> {
    pool.iter().position(|item| !body(item).active)
}

/// Fire a shot from the ship's nose.  Returns the slot used.
pub fn fire_shot(state: &mut GameState) -> Option<usize> {
    let Some(slot) = first_free(&state.shots, |s| &s.body) else {
        debug!("shot pool full, fire dropped");
        return None;
    };

    let origin = state.player.body;
    state.shots[slot].body = Body {
        position: origin.position,
        velocity: origin.heading() * state.config.shot_speed,
        rotation: origin.rotation,
        acceleration: 1.0,
        active: true,
    };
    Some(slot)
}

/// Launch the super beam if it is idle and fully charged.  Spends the charge.
pub fn activate_beam(state: &mut GameState) -> bool {
    if state.beam.body.active || state.beam_charge < state.config.beam_charge_max {
        return false;
    }

    let origin = state.player.body;
    state.beam.body = Body {
        position: origin.position,
        velocity: origin.heading() * state.config.beam_speed,
        rotation: origin.rotation,
        acceleration: 1.0,
        active: true,
    };
    state.beam.phase = BeamPhase::Primed {
        fuse: state.config.beam_fuse,
    };
    state.beam_charge = 0.0;
    debug!("beam primed at ({:.1}, {:.1})", origin.position.x, origin.position.y);
    true
}

/// Count down the fuse, detonate, and retire the blast when it has burnt out.
pub fn advance_beam_phase(state: &mut GameState, dt: f32) {
    if !state.beam.body.active {
        return;
    }

    match state.beam.phase {
        BeamPhase::Primed { fuse } => {
            let fuse = fuse - dt;
            state.beam.phase = if fuse < 0.0 {
                debug!("beam detonated");
                BeamPhase::Detonated {
                    remaining: state.config.beam_blast_duration,
                }
            } else {
                BeamPhase::Primed { fuse }
            };
        }
        BeamPhase::Detonated { remaining } => {
            let remaining = remaining - dt;
            if remaining <= 0.0 {
                state.beam.body.active = false;
            } else {
                state.beam.phase = BeamPhase::Detonated { remaining };
            }
        }
    }
}

/// Add to the beam meter, never past its maximum.
pub fn add_charge(state: &mut GameState, amount: f32) {
    state.beam_charge = (state.beam_charge + amount).min(state.config.beam_charge_max);
}

/// Random heading (0..=360) and per-axis drift speeds.
pub fn random_motion(rng: &mut impl Rng) -> (f32, Vector2<f32>) {
    let rotation = rng.gen_range(0..=360) as f32;
    let speed = Vector2::new(
        rng.gen_range(ASTEROID_MIN_SPEED..=ASTEROID_MAX_SPEED) as f32,
        rng.gen_range(ASTEROID_MIN_SPEED..=ASTEROID_MAX_SPEED) as f32,
    );
    (rotation, speed)
}

pub fn random_size(rng: &mut impl Rng) -> AsteroidSize {
    AsteroidSize::ALL[rng.gen_range(0..AsteroidSize::ALL.len())]
}

/// Place a new asteroid with random motion at `position` and count it as
/// live.  Returns the slot used.
pub fn spawn_asteroid(
    state: &mut GameState,
    size: AsteroidSize,
    position: Vector2<f32>,
    rng: &mut impl Rng,
) -> Option<usize> {
    let slot = first_free(&state.asteroids, |a| &a.body)?;
    let (rotation, speed) = random_motion(rng);
    state.asteroids[slot] = Asteroid::new(size, position, rotation, speed);
    state.live_asteroids += 1;
    Some(slot)
}
