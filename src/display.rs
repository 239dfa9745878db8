/// Rendering layer — all terminal I/O lives here.
///
/// Each function receives a mutable writer and an immutable view of the
/// game state.  No game logic is performed; this module only projects world
/// coordinates onto the character grid and queues terminal commands.
use std::io::Write;

use crossterm::{
    cursor,
    style::{self, Color, Print},
    terminal,
    QueueableCommand,
};
use nalgebra::Vector2;

use asteroids_rl::constants::{BEAM_BLAST_RADIUS, MAX_LIVES};
use asteroids_rl::entities::{AsteroidSize, BeamPhase, GameState};

// ── Colour palette ────────────────────────────────────────────────────────────

const C_BORDER: Color = Color::DarkBlue;
const C_HUD_SCORE: Color = Color::Yellow;
const C_HUD_LIVES: Color = Color::Red;
const C_PLAYER: Color = Color::White;
const C_PLAYER_INVINCIBLE: Color = Color::DarkYellow;
const C_ASTEROID_SMALL: Color = Color::Grey;
const C_ASTEROID_MEDIUM: Color = Color::DarkYellow;
const C_ASTEROID_LARGE: Color = Color::Red;
const C_SHOT: Color = Color::Cyan;
const C_BEAM: Color = Color::Magenta;
const C_CHARGING: Color = Color::Yellow;
const C_CHARGED: Color = Color::Green;
const C_DEBUG: Color = Color::Yellow;
const C_HINT: Color = Color::DarkGrey;

const CHARGE_BAR_WIDTH: usize = 10;

// ── World → terminal projection ───────────────────────────────────────────────

/// Maps the world rectangle onto the bordered play area of the terminal:
/// columns `1..cols-1`, rows `2..rows-2`.
#[derive(Clone, Copy, Debug)]
pub struct Viewport {
    pub cols: u16,
    pub rows: u16,
    world_width: f32,
    world_height: f32,
}

impl Viewport {
    pub fn new(cols: u16, rows: u16, state: &GameState) -> Self {
        Self {
            cols,
            rows,
            world_width: state.config.screen_width,
            world_height: state.config.screen_height,
        }
    }

    fn play_cols(&self) -> f32 {
        self.cols.saturating_sub(2).max(1) as f32
    }

    fn play_rows(&self) -> f32 {
        self.rows.saturating_sub(4).max(1) as f32
    }

    /// Cell for a world position, or `None` when it falls outside the play
    /// area (the beam is not wrapped and can leave it).
    pub fn cell(&self, position: Vector2<f32>) -> Option<(u16, u16)> {
        let fx = position.x / self.world_width;
        let fy = position.y / self.world_height;
        if !(0.0..=1.0).contains(&fx) || !(0.0..=1.0).contains(&fy) {
            return None;
        }
        let col = 1.0 + (fx * (self.play_cols() - 1.0)).round();
        let row = 2.0 + (fy * (self.play_rows() - 1.0)).round();
        Some((col as u16, row as u16))
    }
}

// ── Public entry points ───────────────────────────────────────────────────────

/// Render one complete frame.
pub fn render<W: Write>(out: &mut W, state: &GameState, view: &Viewport) -> std::io::Result<()> {
    out.queue(terminal::Clear(terminal::ClearType::All))?;

    draw_border(out, view)?;
    draw_hud(out, state, view)?;

    for asteroid in state.asteroids.iter().filter(|a| a.body.active) {
        draw_asteroid(out, view, asteroid.size, asteroid.body.position)?;
    }
    for shot in state.shots.iter().filter(|s| s.body.active) {
        put(out, view, shot.body.position, C_SHOT, "·")?;
    }
    draw_beam(out, state, view)?;
    draw_player(out, state, view)?;

    if state.debug_overlay {
        draw_debug_panel(out, state)?;
    }
    draw_controls_hint(out, view)?;

    if state.is_game_over() {
        draw_game_over(out, state, view)?;
    }

    // Park cursor in a harmless spot and flush
    out.queue(style::ResetColor)?;
    out.queue(cursor::MoveTo(0, view.rows.saturating_sub(1)))?;
    out.flush()?;
    Ok(())
}

/// Title screen shown before the first wave.
pub fn render_title<W: Write>(out: &mut W, cols: u16, rows: u16) -> std::io::Result<()> {
    out.queue(terminal::Clear(terminal::ClearType::All))?;

    let cx = cols / 2;
    let cy = rows / 2;

    let title = "✦  ASTEROIDS  RL  ✦";
    out.queue(cursor::MoveTo(
        cx.saturating_sub(title.chars().count() as u16 / 2),
        cy.saturating_sub(5),
    ))?;
    out.queue(style::SetForegroundColor(Color::Cyan))?;
    out.queue(Print(title))?;

    let legend: &[(&str, &str)] = &[
        ("A D / ← →", "Rotate"),
        ("W / ↑", "Thrust"),
        ("SPACE", "Fire"),
        ("B", "Super beam (when the bar is green)"),
        ("TAB", "Debug overlay"),
    ];
    for (i, (keys, action)) in legend.iter().enumerate() {
        out.queue(cursor::MoveTo(cx.saturating_sub(18), cy.saturating_sub(2) + i as u16))?;
        out.queue(style::SetForegroundColor(Color::White))?;
        out.queue(Print(format!("{:<10}", keys)))?;
        out.queue(style::SetForegroundColor(C_HINT))?;
        out.queue(Print(format!(" {}", action)))?;
    }

    let prompt = "ENTER : Start   Q : Quit";
    out.queue(cursor::MoveTo(
        cx.saturating_sub(prompt.chars().count() as u16 / 2),
        cy + 5,
    ))?;
    out.queue(style::SetForegroundColor(Color::Yellow))?;
    out.queue(Print(prompt))?;

    out.queue(style::ResetColor)?;
    out.flush()?;
    Ok(())
}

// ── Border ────────────────────────────────────────────────────────────────────

fn draw_border<W: Write>(out: &mut W, view: &Viewport) -> std::io::Result<()> {
    let w = view.cols as usize;
    let h = view.rows;

    out.queue(style::SetForegroundColor(C_BORDER))?;

    // Row 1 — top bar
    out.queue(cursor::MoveTo(0, 1))?;
    out.queue(Print(format!("┌{}┐", "─".repeat(w.saturating_sub(2)))))?;

    // Row h-2 — bottom bar
    out.queue(cursor::MoveTo(0, h.saturating_sub(2)))?;
    out.queue(Print(format!("└{}┘", "─".repeat(w.saturating_sub(2)))))?;

    // Side walls
    for row in 2..h.saturating_sub(2) {
        out.queue(cursor::MoveTo(0, row))?;
        out.queue(Print("│"))?;
        out.queue(cursor::MoveTo(view.cols.saturating_sub(1), row))?;
        out.queue(Print("│"))?;
    }

    Ok(())
}

// ── HUD (row 0) ───────────────────────────────────────────────────────────────

fn draw_hud<W: Write>(out: &mut W, state: &GameState, view: &Viewport) -> std::io::Result<()> {
    // Score and remaining rocks — left
    out.queue(cursor::MoveTo(1, 0))?;
    out.queue(style::SetForegroundColor(C_HUD_SCORE))?;
    out.queue(Print(format!(
        "Score:{:>4}  Asteroids:{:>3}",
        state.score, state.live_asteroids
    )))?;

    // Beam charge bar — centre
    let ratio = state.beam_charge_ratio();
    let filled = (ratio * CHARGE_BAR_WIDTH as f32).floor() as usize;
    let bar = format!(
        "Beam[{}{}]",
        "█".repeat(filled),
        "░".repeat(CHARGE_BAR_WIDTH - filled.min(CHARGE_BAR_WIDTH))
    );
    let bx = (view.cols / 2).saturating_sub(bar.chars().count() as u16 / 2);
    out.queue(cursor::MoveTo(bx, 0))?;
    out.queue(style::SetForegroundColor(if ratio >= 1.0 { C_CHARGED } else { C_CHARGING }))?;
    out.queue(Print(&bar))?;

    // One ship per active life marker — right
    let ships: String = state
        .life_markers
        .iter()
        .map(|m| if m.body.active { '▲' } else { ' ' })
        .collect();
    let lives_str = format!("Lives:{}", ships);
    let rx = view.cols.saturating_sub(lives_str.chars().count() as u16 + 1);
    out.queue(cursor::MoveTo(rx, 0))?;
    out.queue(style::SetForegroundColor(C_HUD_LIVES))?;
    out.queue(Print(&lives_str))?;

    Ok(())
}

// ── Entities ──────────────────────────────────────────────────────────────────

fn put<W: Write>(
    out: &mut W,
    view: &Viewport,
    position: Vector2<f32>,
    color: Color,
    glyph: &str,
) -> std::io::Result<()> {
    if let Some((col, row)) = view.cell(position) {
        out.queue(cursor::MoveTo(col, row))?;
        out.queue(style::SetForegroundColor(color))?;
        out.queue(Print(glyph))?;
    }
    Ok(())
}

fn draw_asteroid<W: Write>(
    out: &mut W,
    view: &Viewport,
    size: AsteroidSize,
    position: Vector2<f32>,
) -> std::io::Result<()> {
    let Some((col, row)) = view.cell(position) else {
        return Ok(());
    };
    match size {
        AsteroidSize::Small => {
            out.queue(cursor::MoveTo(col, row))?;
            out.queue(style::SetForegroundColor(C_ASTEROID_SMALL))?;
            out.queue(Print("o"))?;
        }
        AsteroidSize::Medium => {
            out.queue(cursor::MoveTo(col.saturating_sub(1).max(1), row))?;
            out.queue(style::SetForegroundColor(C_ASTEROID_MEDIUM))?;
            out.queue(Print("(@)"))?;
        }
        AsteroidSize::Large => {
            // Two-row sprite:
            //   /▓▓\
            //   \▓▓/
            let lx = col.saturating_sub(2).max(1);
            out.queue(style::SetForegroundColor(C_ASTEROID_LARGE))?;
            out.queue(cursor::MoveTo(lx, row))?;
            out.queue(Print("/▓▓\\"))?;
            if row + 1 < view.rows.saturating_sub(2) {
                out.queue(cursor::MoveTo(lx, row + 1))?;
                out.queue(Print("\\▓▓/"))?;
            }
        }
    }
    Ok(())
}

fn draw_beam<W: Write>(out: &mut W, state: &GameState, view: &Viewport) -> std::io::Result<()> {
    let beam = &state.beam;
    if !beam.body.active {
        return Ok(());
    }
    match beam.phase {
        BeamPhase::Primed { .. } => put(out, view, beam.body.position, C_BEAM, "◉")?,
        BeamPhase::Detonated { .. } => {
            // Outline of the blast radius
            for step in 0..48 {
                let angle = (step as f32 * 7.5).to_radians();
                let edge = beam.body.position
                    + Vector2::new(angle.cos(), angle.sin()) * BEAM_BLAST_RADIUS;
                put(out, view, edge, C_BEAM, "░")?;
            }
            put(out, view, beam.body.position, C_BEAM, "✸")?;
        }
    }
    Ok(())
}

/// Arrow pointing along the ship's heading.  World y grows downwards, so
/// 90° is straight down.
fn ship_glyph(rotation: f32) -> &'static str {
    const ARROWS: [&str; 8] = ["→", "↘", "↓", "↙", "←", "↖", "↑", "↗"];
    let octant = ((rotation.rem_euclid(360.0) + 22.5) / 45.0) as usize % 8;
    ARROWS[octant]
}

fn draw_player<W: Write>(out: &mut W, state: &GameState, view: &Viewport) -> std::io::Result<()> {
    let color = if state.is_invincible() {
        C_PLAYER_INVINCIBLE
    } else {
        C_PLAYER
    };
    put(
        out,
        view,
        state.player.body.position,
        color,
        ship_glyph(state.player.body.rotation),
    )
}

// ── Debug overlay ─────────────────────────────────────────────────────────────

fn draw_debug_panel<W: Write>(out: &mut W, state: &GameState) -> std::io::Result<()> {
    let body = &state.player.body;
    let beam = match (state.beam.body.active, state.beam.phase) {
        (false, _) => "idle".to_string(),
        (true, BeamPhase::Primed { fuse }) => format!("primed {:.2}s", fuse),
        (true, BeamPhase::Detonated { remaining }) => format!("blast {:.2}s", remaining),
    };
    let lines = [
        format!("- Player Rotation: ({:06.1})", body.rotation),
        format!("- Player Position: ({:06.1},{:06.1})", body.position.x, body.position.y),
        format!("- Throttle: ({:.2})", body.acceleration),
        format!("- Score: ({})", state.score),
        format!("- Current Asteroids: ({})", state.live_asteroids),
        format!("- Beam Charge: ({:.1}) {}", state.beam_charge, beam),
        format!("- Shots: ({}) Invincible: ({:.2})", state.active_shots(), state.invincibility),
        format!("- Lives: ({}/{})", state.lives, MAX_LIVES),
    ];

    out.queue(style::SetForegroundColor(C_DEBUG))?;
    for (i, line) in lines.iter().enumerate() {
        out.queue(cursor::MoveTo(2, 3 + i as u16))?;
        out.queue(Print(line))?;
    }
    Ok(())
}

// ── Controls hint (last row) ──────────────────────────────────────────────────

fn draw_controls_hint<W: Write>(out: &mut W, view: &Viewport) -> std::io::Result<()> {
    out.queue(cursor::MoveTo(1, view.rows.saturating_sub(1)))?;
    out.queue(style::SetForegroundColor(C_HINT))?;
    out.queue(Print(
        "A D : Rotate   W : Thrust   SPACE : Fire   B : Beam   TAB : Debug   Q : Quit",
    ))?;
    Ok(())
}

// ── Game-over overlay ─────────────────────────────────────────────────────────

const GAME_OVER_BOX: [&str; 3] = [
    "╔════════════════════╗",
    "║    GAME  OVER      ║",
    "╚════════════════════╝",
];

const CLEARED_BOX: [&str; 3] = [
    "╔════════════════════╗",
    "║    WAVE  CLEARED   ║",
    "╚════════════════════╝",
];

fn draw_game_over<W: Write>(out: &mut W, state: &GameState, view: &Viewport) -> std::io::Result<()> {
    let (lines, color) = if state.is_cleared() {
        (&CLEARED_BOX, Color::Green)
    } else {
        (&GAME_OVER_BOX, Color::Red)
    };

    let cx = view.cols / 2;
    let total_rows = lines.len() + 2; // box + score + hint
    let start_row = (view.rows / 2).saturating_sub(total_rows as u16 / 2);

    out.queue(style::SetForegroundColor(color))?;
    for (i, msg) in lines.iter().enumerate() {
        let col = cx.saturating_sub(msg.chars().count() as u16 / 2);
        out.queue(cursor::MoveTo(col, start_row + i as u16))?;
        out.queue(Print(*msg))?;
    }

    let score_line = format!("Final Score: {:>4}", state.score);
    let score_row = start_row + lines.len() as u16;
    out.queue(cursor::MoveTo(
        cx.saturating_sub(score_line.chars().count() as u16 / 2),
        score_row,
    ))?;
    out.queue(style::SetForegroundColor(Color::Yellow))?;
    out.queue(Print(&score_line))?;

    let hint = "R - Play Again  Q - Quit";
    out.queue(cursor::MoveTo(
        cx.saturating_sub(hint.chars().count() as u16 / 2),
        score_row + 1,
    ))?;
    out.queue(style::SetForegroundColor(Color::White))?;
    out.queue(Print(hint))?;

    Ok(())
}
