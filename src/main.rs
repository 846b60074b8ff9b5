mod display;

use std::collections::HashMap;
use std::fs::File;
use std::io::{stdout, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::{mpsc, Mutex};
use std::thread;
use std::time::Instant;

use anyhow::Context;
use clap::Parser;
use crossterm::{
    cursor,
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind,
        KeyModifiers, KeyboardEnhancementFlags, MouseButton, MouseEvent, MouseEventKind,
        PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
    },
    terminal, ExecutableCommand,
};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use barrel_climb::camera::Viewport;
use barrel_climb::config::GameConfig;
use barrel_climb::game::ClimbScene;
use barrel_climb::input::{Key, PointerEvent};
use barrel_climb::physics::Vec2;
use barrel_climb::scene::SceneHost;

/// A key is considered "held" if its last press/repeat event arrived within
/// this many frames.  Covers terminals that don't emit key-release events:
/// the OS key-repeat rate is ≥ 15 Hz, so a window of 4 frames (≈133 ms) is
/// always refreshed before expiry.
const HOLD_WINDOW: u64 = 4;

/// Pointer positions outside the viewport map here, which no button contains.
const OFF_SCREEN: Vec2 = Vec2::new(-1.0, -1.0);

#[derive(Parser, Debug)]
#[command(name = "barrel_climb", about = "Climb the platforms, dodge the barrels, reach the goal")]
struct Args {
    /// Level description (JSON), relative to the asset root.
    #[arg(long, default_value = "data/level.json")]
    level: PathBuf,

    /// Directory assets are resolved against.
    #[arg(long, default_value = ".")]
    assets: PathBuf,

    /// Where log output goes; the terminal itself is taken by the game.
    #[arg(long, default_value = "barrel_climb.log")]
    log_file: PathBuf,
}

/// Returns true if `key` was seen within the last `HOLD_WINDOW` frames.
fn is_held(key_frame: &HashMap<KeyCode, u64>, key: &KeyCode, frame: u64) -> bool {
    key_frame
        .get(key)
        .map(|&last| frame.saturating_sub(last) <= HOLD_WINDOW)
        .unwrap_or(false)
}

fn any_held(key_frame: &HashMap<KeyCode, u64>, keys: &[KeyCode], frame: u64) -> bool {
    keys.iter().any(|k| is_held(key_frame, k, frame))
}

fn init_logging(path: &Path) -> anyhow::Result<()> {
    let file = File::create(path).with_context(|| format!("creating log file {}", path.display()))?;
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}

/// Map a mouse event onto the scene's pointer model, in camera space.
fn pointer_event(mouse: &MouseEvent, view: &Viewport) -> Option<PointerEvent> {
    let at = view
        .to_logical(mouse.column, mouse.row)
        .unwrap_or(OFF_SCREEN);
    match mouse.kind {
        MouseEventKind::Down(MouseButton::Left) => Some(PointerEvent::Down(at)),
        MouseEventKind::Up(MouseButton::Left) => Some(PointerEvent::Up(at)),
        MouseEventKind::Drag(MouseButton::Left) | MouseEventKind::Moved => {
            Some(PointerEvent::Moved(at))
        }
        _ => None,
    }
}

// ── Game loop ─────────────────────────────────────────────────────────────────

/// Runs until the player quits.
///
/// Input model: a `key_frame` map records the frame number of the last
/// press/repeat event for every key.  Each frame the scene is told which
/// direction keys are still "fresh", so held keys work the same on terminals
/// with and without key-release reporting.
fn game_loop<W: Write>(
    out: &mut W,
    host: &mut SceneHost<ClimbScene>,
    rx: &mpsc::Receiver<Event>,
) -> anyhow::Result<()> {
    let config = host.context().config.clone();
    let mut key_frame: HashMap<KeyCode, u64> = HashMap::new();
    let mut frame: u64 = 0;

    loop {
        let frame_start = Instant::now();
        frame += 1;

        let (width, height) = terminal::size()?;
        let view = display::viewport(host.context().scale, width, height);

        // ── Drain all pending input events (non-blocking) ─────────────────────
        while let Ok(ev) = rx.try_recv() {
            match ev {
                Event::Key(KeyEvent { code, kind, modifiers, .. }) => match kind {
                    KeyEventKind::Press => {
                        key_frame.insert(code, frame);
                        match code {
                            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => {
                                return Ok(());
                            }
                            KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => {
                                return Ok(());
                            }
                            _ => {}
                        }
                    }
                    KeyEventKind::Repeat => {
                        key_frame.insert(code, frame);
                    }
                    KeyEventKind::Release => {
                        key_frame.remove(&code);
                    }
                },
                Event::Mouse(mouse) => {
                    if let Some(pointer) = pointer_event(&mouse, &view) {
                        host.scene_mut().pointer(pointer);
                    }
                }
                _ => {}
            }
        }

        let left = any_held(&key_frame, &[KeyCode::Left, KeyCode::Char('a'), KeyCode::Char('A')], frame);
        let right = any_held(&key_frame, &[KeyCode::Right, KeyCode::Char('d'), KeyCode::Char('D')], frame);
        let up = any_held(
            &key_frame,
            &[KeyCode::Up, KeyCode::Char('w'), KeyCode::Char('W'), KeyCode::Char(' ')],
            frame,
        );
        let scene = host.scene_mut();
        scene.key(Key::Left, left);
        scene.key(Key::Right, right);
        scene.key(Key::Up, up);

        host.step(config.frame_secs())?;

        display::render(
            out,
            host.scene(),
            &host.context().camera,
            &view,
            host.restarts(),
            height,
        )?;

        let elapsed = frame_start.elapsed();
        if elapsed < config.frame {
            std::thread::sleep(config.frame - elapsed);
        }
    }
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    init_logging(&args.log_file)?;

    let config = GameConfig {
        asset_root: args.assets,
        level_path: args.level,
        ..GameConfig::default()
    };
    info!(level = %config.level_path.display(), assets = %config.asset_root.display(), "starting");

    // Boot before touching the terminal so asset and level errors print plainly.
    let scene_config = config.clone();
    let mut host = SceneHost::start(config, move || ClimbScene::new(&scene_config))?;

    let raw_out = stdout();
    let mut out = BufWriter::new(raw_out);

    terminal::enable_raw_mode()?;
    out.execute(terminal::EnterAlternateScreen)?;
    out.execute(cursor::Hide)?;
    out.execute(EnableMouseCapture)?;

    // Request key-release (and key-repeat) events from the terminal.
    // Ghostty / kitty-protocol terminals support this; others fall back gracefully.
    let keyboard_enhanced = out
        .execute(PushKeyboardEnhancementFlags(
            KeyboardEnhancementFlags::REPORT_EVENT_TYPES,
        ))
        .is_ok();
    if !keyboard_enhanced {
        warn!("terminal does not report key releases; using the hold window");
    }

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

    let result = game_loop(&mut out, &mut host, &rx);

    // Always restore the terminal
    if keyboard_enhanced {
        let _ = out.execute(PopKeyboardEnhancementFlags);
    }
    let _ = out.execute(DisableMouseCapture);
    let _ = out.execute(cursor::Show);
    let _ = out.execute(terminal::LeaveAlternateScreen);
    let _ = terminal::disable_raw_mode();

    info!(restarts = host.restarts(), "quit");
    result
}
