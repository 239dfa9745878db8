/// Brute-force circle collision between the pools.
///
/// Resolution order each frame is shots, then the beam, then the player.
/// Inside each pass pools are scanned in slot order and each scan stops at
/// its first hit.
use nalgebra::Vector2;
use rand::Rng;

use crate::compute::{lose_life, split_asteroid};
use crate::constants::{BEAM_BLAST_RADIUS, BEAM_TARGET_RADIUS, SHOT_RADIUS};
use crate::entities::{GameState, Player};
use crate::spawn::add_charge;

/// Two circles touch when the centre distance is at most the radius sum.
pub fn circles_overlap(a: Vector2<f32>, ra: f32, b: Vector2<f32>, rb: f32) -> bool {
    (a - b).norm() <= ra + rb
}

/// Each live shot destroys at most one asteroid.  Returns the number of hits.
pub fn resolve_shots(state: &mut GameState, rng: &mut impl Rng) -> u32 {
    let mut hits = 0;

    for si in 0..state.shots.len() {
        if !state.shots[si].body.active {
            continue;
        }
        let shot_pos = state.shots[si].body.position;

        let target = state.asteroids.iter().position(|a| {
            a.body.active && circles_overlap(shot_pos, SHOT_RADIUS, a.body.position, a.size.radius())
        });

        if let Some(ai) = target {
            let destroyed = state.asteroids[ai];
            state.asteroids[ai].body.active = false;
            state.shots[si].body.active = false;
            state.score += 1;
            state.live_asteroids = state.live_asteroids.saturating_sub(1);
            let bonus = state.config.beam_charge_per_hit;
            add_charge(state, bonus);
            split_asteroid(state, destroyed.size, destroyed.body.position, rng);
            hits += 1;
        }
    }

    hits
}

/// A detonated beam destroys at most one asteroid per frame, the lowest slot
/// inside its blast.  Beam kills do not split and do not charge the meter.
pub fn resolve_beam(state: &mut GameState) -> bool {
    if !state.beam.is_detonated() {
        return false;
    }
    let centre = state.beam.body.position;

    let target = state.asteroids.iter().position(|a| {
        a.body.active && circles_overlap(centre, BEAM_BLAST_RADIUS, a.body.position, BEAM_TARGET_RADIUS)
    });

    match target {
        Some(ai) => {
            state.asteroids[ai].body.active = false;
            state.score += 1;
            state.live_asteroids = state.live_asteroids.saturating_sub(1);
            true
        }
        None => false,
    }
}

/// Ship against rocks, skipped while the invincibility window is open.
/// The rock survives the contact.
pub fn resolve_player(state: &mut GameState) -> bool {
    if state.is_invincible() {
        return false;
    }
    let ship = state.player.body.position;

    let hit = state.asteroids.iter().any(|a| {
        a.body.active && circles_overlap(ship, Player::radius(), a.body.position, a.size.contact_radius())
    });

    if hit {
        lose_life(state);
    }
    hit
}

/// Run all three passes in order.
pub fn resolve_collisions(state: &mut GameState, rng: &mut impl Rng) {
    resolve_shots(state, rng);
    resolve_beam(state);
    resolve_player(state);
}
