use approx::assert_relative_eq;
use nalgebra::Vector2;
use rand::rngs::StdRng;
use rand::SeedableRng;

use asteroids_rl::collision::resolve_shots;
use asteroids_rl::compute::*;
use asteroids_rl::config::GameConfig;
use asteroids_rl::constants::*;
use asteroids_rl::entities::*;
use asteroids_rl::input::FrameInput;
use asteroids_rl::spawn::{activate_beam, fire_shot};

fn seeded_rng() -> StdRng {
    StdRng::seed_from_u64(42)
}

/// Empty pools, ship at the centre with no invincibility, and one parked
/// rock in the top-left corner so the wave is never accidentally cleared.
fn make_state() -> GameState {
    let mut s = new_state(GameConfig::default());
    s.invincibility = 0.0;
    park(&mut s, 0, AsteroidSize::Small, 10.0, 10.0);
    s
}

fn park(s: &mut GameState, slot: usize, size: AsteroidSize, x: f32, y: f32) {
    s.asteroids[slot] = Asteroid::new(size, Vector2::new(x, y), 0.0, Vector2::zeros());
    s.live_asteroids += 1;
}

// ── new_state / reset ─────────────────────────────────────────────────────────

#[test]
fn new_state_is_empty_with_full_lives() {
    let s = new_state(GameConfig::default());
    assert_eq!(s.player.body.position, Vector2::new(400.0, 225.0));
    assert!(s.player.body.active);
    assert_eq!(s.lives, 3);
    assert!(s.life_markers.iter().all(|m| m.body.active));
    assert_eq!(s.active_asteroids(), 0);
    assert_eq!(s.active_shots(), 0);
    assert!(!s.beam.body.active);
    assert_eq!(s.status, GameStatus::Playing);
}

#[test]
fn reset_places_the_wave() {
    let mut s = new_state(GameConfig::default());
    reset(&mut s, &mut seeded_rng());

    assert_eq!(s.live_asteroids as usize, INITIAL_ASTEROIDS);
    for (i, a) in s.asteroids.iter().enumerate() {
        assert_eq!(a.body.active, i < INITIAL_ASTEROIDS);
    }
    for a in s.asteroids.iter().filter(|a| a.body.active) {
        assert!((0.0..=SCREEN_WIDTH).contains(&a.body.position.x));
        assert!((0.0..=SCREEN_HEIGHT).contains(&a.body.position.y));
        assert!((0.0..=360.0).contains(&a.body.rotation));
        assert!((1.0..=2.0).contains(&a.body.velocity.x));
        assert!((1.0..=2.0).contains(&a.body.velocity.y));
    }
}

#[test]
fn reset_restores_counters_and_pools() {
    let mut s = make_state();
    s.score = 12;
    s.lives = 1;
    s.life_markers[1].body.active = false;
    s.life_markers[2].body.active = false;
    s.beam_charge = 64.0;
    s.status = GameStatus::GameOver;
    fire_shot(&mut s);
    s.beam_charge = 100.0;
    activate_beam(&mut s);

    reset(&mut s, &mut seeded_rng());

    assert_eq!(s.score, 0);
    assert_eq!(s.lives, 3);
    assert!(s.life_markers.iter().all(|m| m.body.active));
    assert_relative_eq!(s.beam_charge, 0.0);
    assert_eq!(s.active_shots(), 0);
    assert!(!s.beam.body.active);
    assert_eq!(s.status, GameStatus::Playing);
    assert_relative_eq!(s.invincibility, INVINCIBILITY_DURATION);
    assert_eq!(s.frame, 0);
}

#[test]
fn reset_respects_configured_wave_and_lives() {
    let config = GameConfig {
        initial_asteroids: 4,
        max_lives: 2,
        ..GameConfig::default()
    };
    let mut s = new_state(config);
    reset(&mut s, &mut seeded_rng());
    assert_eq!(s.live_asteroids, 4);
    assert_eq!(s.active_asteroids(), 4);
    assert_eq!(s.lives, 2);
    assert!(!s.life_markers[2].body.active);
}

// ── tick — bookkeeping ────────────────────────────────────────────────────────

#[test]
fn tick_increments_frame() {
    let mut s = make_state();
    tick(&mut s, &FrameInput::idle(), 0.016, &mut seeded_rng());
    assert_eq!(s.frame, 1);
}

#[test]
fn tick_counts_down_invincibility_to_zero() {
    let mut s = make_state();
    s.invincibility = 0.3;
    tick(&mut s, &FrameInput::idle(), 0.25, &mut seeded_rng());
    assert_relative_eq!(s.invincibility, 0.05, epsilon = 1e-6);
    tick(&mut s, &FrameInput::idle(), 0.25, &mut seeded_rng());
    assert_relative_eq!(s.invincibility, 0.0);
}

#[test]
fn tick_accrues_charge_with_frame_time() {
    let mut s = make_state();
    tick(&mut s, &FrameInput::idle(), 0.5, &mut seeded_rng());
    assert_relative_eq!(s.beam_charge, 0.5);
}

#[test]
fn charge_never_exceeds_max() {
    let mut s = make_state();
    s.beam_charge = 99.9;
    tick(&mut s, &FrameInput::idle(), 0.5, &mut seeded_rng());
    assert_relative_eq!(s.beam_charge, BEAM_CHARGE_MAX);
    tick(&mut s, &FrameInput::idle(), 0.5, &mut seeded_rng());
    assert_relative_eq!(s.beam_charge, BEAM_CHARGE_MAX);
}

#[test]
fn debug_toggle_flips_even_after_game_over() {
    let mut s = make_state();
    let toggle = FrameInput {
        toggle_debug: true,
        ..FrameInput::default()
    };
    tick(&mut s, &toggle, 0.016, &mut seeded_rng());
    assert!(s.debug_overlay);
    s.status = GameStatus::GameOver;
    tick(&mut s, &toggle, 0.016, &mut seeded_rng());
    assert!(!s.debug_overlay);
}

// ── tick — firing ─────────────────────────────────────────────────────────────

#[test]
fn fire_spawns_shot_from_the_ship() {
    let mut s = make_state();
    s.player.body.rotation = 90.0;
    tick(&mut s, &FrameInput::fire(), 0.1, &mut seeded_rng());

    assert_eq!(s.active_shots(), 1);
    let shot = &s.shots[0].body;
    // spawned at the ship, then moved 25 units straight down this frame
    assert_relative_eq!(shot.position.x, 400.0, epsilon = 1e-3);
    assert_relative_eq!(shot.position.y, 250.0, epsilon = 1e-3);
    assert_relative_eq!(shot.rotation, 90.0);
}

#[test]
fn fire_takes_first_free_slot() {
    let mut s = make_state();
    assert_eq!(fire_shot(&mut s), Some(0));
    assert_eq!(fire_shot(&mut s), Some(1));
    s.shots[0].body.active = false;
    assert_eq!(fire_shot(&mut s), Some(0));
}

#[test]
fn fire_is_dropped_when_pool_is_full() {
    let mut s = make_state();
    for _ in 0..MAX_SHOTS {
        assert!(fire_shot(&mut s).is_some());
    }
    assert_eq!(fire_shot(&mut s), None);
    assert_eq!(s.active_shots(), MAX_SHOTS);
}

#[test]
fn shot_destroys_rock_ahead_of_the_ship() {
    let mut s = make_state();
    park(&mut s, 1, AsteroidSize::Small, 500.0, 225.0);
    let mut rng = seeded_rng();

    tick(&mut s, &FrameInput::fire(), 0.1, &mut rng);
    for _ in 0..10 {
        if !s.asteroids[1].body.active {
            break;
        }
        tick(&mut s, &FrameInput::idle(), 0.1, &mut rng);
    }

    assert!(!s.asteroids[1].body.active);
    assert_eq!(s.score, 1);
    assert_eq!(s.active_shots(), 0);
}

// ── tick — super beam ─────────────────────────────────────────────────────────

#[test]
fn beam_needs_full_charge() {
    let mut s = make_state();
    s.beam_charge = 99.0;
    tick(&mut s, &FrameInput::beam(), 0.1, &mut seeded_rng());
    assert!(!s.beam.body.active);
    assert_relative_eq!(s.beam_charge, 99.1, epsilon = 1e-4);
}

#[test]
fn beam_spends_charge_and_blocks_reactivation() {
    let mut s = make_state();
    let mut rng = seeded_rng();
    s.beam_charge = BEAM_CHARGE_MAX;

    tick(&mut s, &FrameInput::beam(), 0.1, &mut rng);
    assert!(s.beam.body.active);
    assert!(matches!(s.beam.phase, BeamPhase::Primed { .. }));
    // reset to zero, then this frame's passive charge
    assert_relative_eq!(s.beam_charge, 0.1, epsilon = 1e-6);

    // still in flight: a second press does nothing
    let before = s.beam;
    tick(&mut s, &FrameInput::beam(), 0.1, &mut rng);
    assert_relative_eq!(s.beam.body.rotation, before.body.rotation);
    assert!(s.beam_charge < 1.0);

    // let it burn out
    for _ in 0..40 {
        tick(&mut s, &FrameInput::idle(), 0.1, &mut rng);
    }
    assert!(!s.beam.body.active);

    // idle beam but not recharged: still blocked
    assert!(!activate_beam(&mut s));
    s.beam_charge = BEAM_CHARGE_MAX;
    assert!(activate_beam(&mut s));
    assert_relative_eq!(s.beam_charge, 0.0);
}

#[test]
fn beam_detonates_after_fuse_then_expires() {
    let mut s = make_state();
    let mut rng = seeded_rng();
    s.beam_charge = BEAM_CHARGE_MAX;
    tick(&mut s, &FrameInput::beam(), 0.25, &mut rng);

    let mut detonated_at = None;
    let mut expired_at = None;
    for frame in 1..=20 {
        tick(&mut s, &FrameInput::idle(), 0.25, &mut rng);
        if detonated_at.is_none() && s.beam.is_detonated() {
            detonated_at = Some(frame);
        }
        if expired_at.is_none() && !s.beam.body.active {
            expired_at = Some(frame);
        }
    }

    // fuse 1.0: 0.75, 0.5, 0.25, 0.0, -0.25 → detonates on the 4th idle frame
    assert_eq!(detonated_at, Some(4));
    // blast 0.5: 0.25, 0.0 → gone two frames later
    assert_eq!(expired_at, Some(6));
}

#[test]
fn detonated_beam_clears_nearby_rocks_one_per_frame() {
    let mut s = make_state();
    let mut rng = seeded_rng();
    // Three rocks where the beam will be: 200 units/s for ~1.25 s → x ≈ 650
    park(&mut s, 1, AsteroidSize::Large, 650.0, 225.0);
    park(&mut s, 2, AsteroidSize::Large, 660.0, 225.0);
    park(&mut s, 3, AsteroidSize::Large, 670.0, 225.0);
    s.beam_charge = BEAM_CHARGE_MAX;

    tick(&mut s, &FrameInput::beam(), 0.25, &mut rng);
    for _ in 0..4 {
        tick(&mut s, &FrameInput::idle(), 0.25, &mut rng);
    }
    // detonated on this frame and took exactly one rock
    assert!(s.beam.is_detonated());
    assert_eq!(s.score, 1);
    assert_eq!(s.live_asteroids, 3);

    tick(&mut s, &FrameInput::idle(), 0.25, &mut rng);
    assert_eq!(s.score, 2);
    assert_eq!(s.live_asteroids as usize, s.active_asteroids());
}

// ── Life & respawn ────────────────────────────────────────────────────────────

#[test]
fn no_collision_while_invincible_then_hit_on_expiry_frame() {
    let mut s = make_state();
    let mut rng = seeded_rng();
    park(&mut s, 1, AsteroidSize::Large, 400.0, 225.0);
    s.invincibility = 0.75;

    tick(&mut s, &FrameInput::idle(), 0.25, &mut rng); // 0.5 left
    assert_eq!(s.lives, 3);
    tick(&mut s, &FrameInput::idle(), 0.25, &mut rng); // 0.25 left
    assert_eq!(s.lives, 3);
    tick(&mut s, &FrameInput::idle(), 0.25, &mut rng); // expired: hit
    assert_eq!(s.lives, 2);
    assert!(s.is_invincible());
}

#[test]
fn game_over_exactly_on_third_hit() {
    let mut s = make_state();
    let mut rng = seeded_rng();
    park(&mut s, 1, AsteroidSize::Large, 400.0, 225.0);

    let mut hits = 0;
    for _ in 0..100 {
        let before = s.lives;
        tick(&mut s, &FrameInput::idle(), 0.25, &mut rng);
        if s.lives < before {
            hits += 1;
            assert_eq!(s.is_game_over(), hits == 3);
        }
        if s.is_game_over() {
            break;
        }
    }

    assert_eq!(hits, 3);
    assert_eq!(s.lives, 0);
    assert!(s.life_markers.iter().all(|m| !m.body.active));
    assert!(!s.is_cleared());
}

#[test]
fn updates_are_suspended_after_game_over() {
    let mut s = make_state();
    let mut rng = seeded_rng();
    park(&mut s, 1, AsteroidSize::Large, 400.0, 225.0);
    s.lives = 1;
    s.life_markers[1].body.active = false;
    s.life_markers[2].body.active = false;

    tick(&mut s, &FrameInput::idle(), 0.1, &mut rng);
    assert!(s.is_game_over());
    let frame = s.frame;

    for _ in 0..5 {
        tick(&mut s, &FrameInput::fire(), 0.1, &mut rng);
    }
    assert_eq!(s.lives, 0);
    assert_eq!(s.frame, frame);
    assert_eq!(s.active_shots(), 0);
}

#[test]
fn lose_life_never_goes_negative() {
    let mut s = make_state();
    s.lives = 0;
    lose_life(&mut s);
    assert_eq!(s.lives, 0);
}

#[test]
fn restart_only_works_after_game_over() {
    let mut s = make_state();
    let mut rng = seeded_rng();
    s.score = 5;
    tick(&mut s, &FrameInput::restart(), 0.1, &mut rng);
    assert_eq!(s.score, 5);

    s.status = GameStatus::GameOver;
    tick(&mut s, &FrameInput::restart(), 0.1, &mut rng);
    assert_eq!(s.score, 0);
    assert_eq!(s.status, GameStatus::Playing);
    assert_eq!(s.live_asteroids as usize, INITIAL_ASTEROIDS);
    assert_eq!(s.lives, 3);
}

// ── Win condition & scenarios ─────────────────────────────────────────────────

#[test]
fn clearing_the_last_rock_wins() {
    let mut s = new_state(GameConfig::default());
    s.invincibility = 0.0;
    park(&mut s, 0, AsteroidSize::Small, 450.0, 225.0);
    let mut rng = seeded_rng();

    tick(&mut s, &FrameInput::fire(), 0.1, &mut rng);
    assert!(!s.is_game_over());
    tick(&mut s, &FrameInput::idle(), 0.1, &mut rng);

    assert!(s.is_game_over());
    assert!(s.is_cleared());
    assert_eq!(s.score, 1);
}

#[test]
fn full_wave_including_fragments_must_be_destroyed() {
    let mut s = new_state(GameConfig::default());
    let mut rng = seeded_rng();
    reset(&mut s, &mut rng);

    let expected: usize = s
        .asteroids
        .iter()
        .filter(|a| a.body.active)
        .map(|a| 1 + a.size.fragments())
        .sum();

    for _ in 0..200 {
        let Some(target) = s.asteroids.iter().find(|a| a.body.active) else {
            break;
        };
        let at = target.body.position;
        s.shots[0].body = Body {
            position: at,
            active: true,
            ..Body::default()
        };
        assert_eq!(resolve_shots(&mut s, &mut rng), 1);
        assert_eq!(s.live_asteroids as usize, s.active_asteroids());
        if s.live_asteroids == 0 {
            break;
        }
    }

    assert_eq!(s.live_asteroids, 0);
    assert_eq!(s.score as usize, expected);
    assert!(s.score as usize >= INITIAL_ASTEROIDS);

    s.invincibility = 0.0;
    tick(&mut s, &FrameInput::idle(), 0.016, &mut rng);
    assert!(s.is_cleared());
}

#[test]
fn counter_never_drifts_during_play() {
    let mut s = new_state(GameConfig::default());
    let mut rng = seeded_rng();
    reset(&mut s, &mut rng);

    for frame in 0..1200u32 {
        let input = FrameInput {
            rotate_right: true,
            thrust: frame % 3 == 0,
            fire: frame % 4 == 0,
            beam: true,
            ..FrameInput::default()
        };
        tick(&mut s, &input, 1.0 / 60.0, &mut rng);
        assert_eq!(s.live_asteroids as usize, s.active_asteroids());
        if s.is_game_over() {
            break;
        }
    }
}
