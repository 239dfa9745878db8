mod display;

use std::collections::HashMap;
use std::fs::File;
use std::io::{stdout, BufWriter, Write};
use std::path::PathBuf;
use std::sync::mpsc;
use std::thread;
use std::time::{Duration, Instant};

use crossterm::{
    cursor,
    event::{
        self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, KeyboardEnhancementFlags,
        PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
    },
    terminal, ExecutableCommand,
};
use log::{info, warn};
use rand::thread_rng;

use asteroids_rl::compute::{new_state, reset, tick};
use asteroids_rl::config::GameConfig;
use asteroids_rl::entities::GameState;
use asteroids_rl::error::{ConfigError, GameError};
use asteroids_rl::input::FrameInput;

use display::Viewport;

const FRAME: Duration = Duration::from_millis(16); // ≈60 FPS

/// Longest frame time fed to the simulation, so a stalled terminal does not
/// teleport everything across the screen.
const MAX_DT: f32 = 0.1;

/// A key is considered "held" if its last press/repeat event arrived within
/// this many frames.  Covers terminals that don't emit key-release events:
/// the OS key-repeat rate is ≥ 15 Hz, so a window of 8 frames (≈130 ms) is
/// always refreshed before expiry.
const HOLD_WINDOW: u64 = 8;

const DEFAULT_CONFIG_PATH: &str = "asteroids.toml";
const LOG_PATH: &str = "asteroids.log";

/// Returns true if any of `keys` was seen within the last `HOLD_WINDOW` frames.
fn is_held(key_frame: &HashMap<KeyCode, u64>, keys: &[KeyCode], frame: u64) -> bool {
    keys.iter().any(|key| {
        key_frame
            .get(key)
            .map(|&last| frame.saturating_sub(last) <= HOLD_WINDOW)
            .unwrap_or(false)
    })
}

// ── Ambient setup ─────────────────────────────────────────────────────────────

/// Log records go to a file so they never tear the terminal frame.  Nothing
/// is logged unless `RUST_LOG` is set.
fn init_logging() {
    if std::env::var_os("RUST_LOG").is_none() {
        return;
    }
    match File::create(LOG_PATH) {
        Ok(file) => env_logger::Builder::from_default_env()
            .target(env_logger::Target::Pipe(Box::new(file)))
            .init(),
        Err(e) => eprintln!("cannot open {LOG_PATH}: {e}; logging disabled"),
    }
}

/// `$ASTEROIDS_CONFIG` or `asteroids.toml`.  A missing file means defaults;
/// a broken one is reported and also falls back to defaults.
fn load_config() -> GameConfig {
    let path = std::env::var_os("ASTEROIDS_CONFIG")
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_PATH));

    match GameConfig::load(&path) {
        Ok(config) => {
            info!("loaded config from {}", path.display());
            config
        }
        Err(ConfigError::Io(e)) if e.kind() == std::io::ErrorKind::NotFound => {
            info!("no {} found; using compiled defaults", path.display());
            GameConfig::default()
        }
        Err(e) => {
            warn!("{}: {e}; using compiled defaults", path.display());
            GameConfig::default()
        }
    }
}

// ── Title ─────────────────────────────────────────────────────────────────────

enum TitleResult {
    Start,
    Quit,
}

fn show_title<W: Write>(out: &mut W, rx: &mpsc::Receiver<Event>) -> std::io::Result<TitleResult> {
    let (cols, rows) = terminal::size()?;
    display::render_title(out, cols, rows)?;

    // Block until the user makes a choice
    loop {
        match rx.recv() {
            Ok(Event::Key(KeyEvent {
                code,
                kind: KeyEventKind::Press,
                modifiers,
                ..
            })) => match code {
                KeyCode::Enter | KeyCode::Char(' ') => return Ok(TitleResult::Start),
                KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => {
                    return Ok(TitleResult::Quit)
                }
                KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => {
                    return Ok(TitleResult::Quit)
                }
                _ => {}
            },
            Ok(Event::Resize(cols, rows)) => display::render_title(out, cols, rows)?,
            Ok(_) => {}
            Err(_) => return Ok(TitleResult::Quit),
        }
    }
}

// ── Game loop ─────────────────────────────────────────────────────────────────

/// Runs until the player quits.
///
/// Input model: held keys (rotate, thrust) are tracked in a `key_frame` map
/// holding the frame each key was last seen, so several can be held at once
/// on terminals with or without key-release events.  Fire, beam, restart and
/// the debug toggle are edge-triggered: they act on `Press` events only.
fn game_loop<W: Write>(
    out: &mut W,
    state: &mut GameState,
    rx: &mpsc::Receiver<Event>,
) -> std::io::Result<()> {
    let mut rng = thread_rng();
    reset(state, &mut rng);

    let mut key_frame: HashMap<KeyCode, u64> = HashMap::new();
    let mut frame: u64 = 0;
    let mut last = Instant::now();
    let (mut cols, mut rows) = terminal::size()?;

    loop {
        let frame_start = Instant::now();
        frame += 1;
        let mut input = FrameInput::idle();

        // ── Drain all pending input events (non-blocking) ─────────────────────
        while let Ok(ev) = rx.try_recv() {
            let (code, kind, modifiers) = match ev {
                Event::Key(KeyEvent {
                    code,
                    kind,
                    modifiers,
                    ..
                }) => (code, kind, modifiers),
                Event::Resize(c, r) => {
                    (cols, rows) = (c, r);
                    continue;
                }
                _ => continue,
            };
            match kind {
                KeyEventKind::Press => {
                    key_frame.insert(code, frame);
                    match code {
                        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => return Ok(()),
                        KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => {
                            return Ok(())
                        }
                        KeyCode::Char(' ') => input.fire = true,
                        KeyCode::Char('b') | KeyCode::Char('B') => input.beam = true,
                        KeyCode::Char('r') | KeyCode::Char('R') => input.restart = true,
                        KeyCode::Tab => input.toggle_debug = true,
                        _ => {}
                    }
                }
                // Repeat: refresh timestamp so key stays "held"
                KeyEventKind::Repeat => {
                    key_frame.insert(code, frame);
                }
                // Release: remove key immediately (keyboard-enhancement path)
                KeyEventKind::Release => {
                    key_frame.remove(&code);
                }
            }
        }

        input.rotate_left = is_held(
            &key_frame,
            &[KeyCode::Left, KeyCode::Char('a'), KeyCode::Char('A')],
            frame,
        );
        input.rotate_right = is_held(
            &key_frame,
            &[KeyCode::Right, KeyCode::Char('d'), KeyCode::Char('D')],
            frame,
        );
        input.thrust = is_held(
            &key_frame,
            &[KeyCode::Up, KeyCode::Char('w'), KeyCode::Char('W')],
            frame,
        );

        let now = Instant::now();
        let dt = now.duration_since(last).as_secs_f32().min(MAX_DT);
        last = now;

        tick(state, &input, dt, &mut rng);

        display::render(out, state, &Viewport::new(cols, rows, state))?;

        let elapsed = frame_start.elapsed();
        if elapsed < FRAME {
            thread::sleep(FRAME - elapsed);
        }
    }
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() -> Result<(), GameError> {
    init_logging();
    let config = load_config();

    let raw_out = stdout();
    let mut out = BufWriter::new(raw_out);

    terminal::enable_raw_mode()?;
    out.execute(terminal::EnterAlternateScreen)?;
    out.execute(cursor::Hide)?;

    // Request key-release (and key-repeat) events from the terminal.
    // Kitty-protocol terminals support this; others fall back gracefully.
    let keyboard_enhanced = out
        .execute(PushKeyboardEnhancementFlags(
            KeyboardEnhancementFlags::REPORT_EVENT_TYPES,
        ))
        .is_ok();

    // Dedicate a thread exclusively to blocking event reads, sending them
    // through a channel so the game loop never has to block on I/O.
    let (tx, rx) = mpsc::channel::<Event>();
    thread::spawn(move || {
        while let Ok(ev) = event::read() {
            if tx.send(ev).is_err() {
                break; // receiver dropped → program exiting
            }
        }
    });

    let result = run(&mut out, &rx, config);

    // Always restore the terminal
    if keyboard_enhanced {
        let _ = out.execute(PopKeyboardEnhancementFlags);
    }
    let _ = out.execute(cursor::Show);
    let _ = out.execute(terminal::LeaveAlternateScreen);
    let _ = terminal::disable_raw_mode();

    result.map_err(GameError::from)
}

fn run<W: Write>(
    out: &mut W,
    rx: &mpsc::Receiver<Event>,
    config: GameConfig,
) -> std::io::Result<()> {
    match show_title(out, rx)? {
        TitleResult::Quit => Ok(()),
        TitleResult::Start => {
            let mut state = new_state(config);
            game_loop(out, &mut state, rx)?;
            info!("session ended with score {}", state.score);
            Ok(())
        }
    }
}
