/// Position integration and screen-wrap for every pool.
///
/// Nothing here allocates; every function mutates bodies in place.
use crate::config::GameConfig;
use crate::entities::{heading_of, Asteroid, Beam, Body, GameState, Player, Shot};
use crate::input::FrameInput;

// ── Screen wrap ───────────────────────────────────────────────────────────────

/// Move a value that left `[0, bound]` to the opposite edge, keeping the
/// overflow.  Shifts by exactly `bound`, never by a modulo.
pub fn wrap_axis(value: f32, bound: f32) -> f32 {
    if value > bound {
        value - bound
    } else if value < 0.0 {
        value + bound
    } else {
        value
    }
}

/// Wrap each axis independently.  Velocity and rotation are left alone.
pub fn wrap_body(body: &mut Body, width: f32, height: f32) {
    body.position.x = wrap_axis(body.position.x, width);
    body.position.y = wrap_axis(body.position.y, height);
}

pub fn is_on_screen(body: &Body, width: f32, height: f32) -> bool {
    (0.0..=width).contains(&body.position.x) && (0.0..=height).contains(&body.position.y)
}

// ── Integration ───────────────────────────────────────────────────────────────

/// position += velocity · acceleration · dt
pub fn integrate(body: &mut Body, dt: f32) {
    body.position += body.velocity * (body.acceleration * dt);
}

/// Steer, throttle and move the ship, then wrap it.
///
/// Thrust adds a fixed step per frame regardless of `dt`; only rotation and
/// displacement are frame-time scaled.
pub fn advance_player(player: &mut Player, input: &FrameInput, config: &GameConfig, dt: f32) {
    let body = &mut player.body;

    if input.rotate_left {
        body.rotation -= config.player_rotation_speed * dt;
    }
    if input.rotate_right {
        body.rotation += config.player_rotation_speed * dt;
    }

    body.velocity = heading_of(body.rotation) * config.player_speed;

    if input.thrust && body.acceleration < config.player_max_acceleration {
        body.acceleration += config.player_thrust_step;
    }

    integrate(body, dt);
    wrap_body(body, config.screen_width, config.screen_height);
}

/// Asteroids drift a fixed amount per frame: each stored speed component is
/// scaled by the cosine/sine of the rock's own rotation.  Not scaled by `dt`.
pub fn advance_asteroid(asteroid: &mut Asteroid, config: &GameConfig) {
    let body = &mut asteroid.body;
    let direction = heading_of(body.rotation);
    body.position.x += body.velocity.x * direction.x;
    body.position.y += body.velocity.y * direction.y;
    wrap_body(body, config.screen_width, config.screen_height);
}

/// Shots fly straight and expire at the screen edge instead of wrapping.
pub fn advance_shot(shot: &mut Shot, config: &GameConfig, dt: f32) {
    integrate(&mut shot.body, dt);
    if !is_on_screen(&shot.body, config.screen_width, config.screen_height) {
        shot.body.active = false;
    }
}

/// The beam keeps integrating in both phases and never wraps.
pub fn advance_beam(beam: &mut Beam, dt: f32) {
    integrate(&mut beam.body, dt);
}

/// Move every active entity except the player.
pub fn advance_pools(state: &mut GameState, dt: f32) {
    let config = &state.config;

    for asteroid in state.asteroids.iter_mut().filter(|a| a.body.active) {
        advance_asteroid(asteroid, config);
    }
    for shot in state.shots.iter_mut().filter(|s| s.body.active) {
        advance_shot(shot, config, dt);
    }
    if state.beam.body.active {
        advance_beam(&mut state.beam, dt);
    }
}
