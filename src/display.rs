//! Rendering layer — all terminal output lives here.
//!
//! Each function receives a mutable writer and an immutable view of the
//! scene.  No game logic is performed; this module only translates world
//! rectangles into terminal cells through the camera and the viewport.

use std::io::Write;

use crossterm::{
    cursor,
    style::{self, Color, Print},
    terminal,
    QueueableCommand,
};
use barrel_climb::camera::{Camera, ScaleMode, Viewport};
use barrel_climb::compute;
use barrel_climb::config::{VIEW_HEIGHT, VIEW_WIDTH};
use barrel_climb::entities::{Facing, GameState, Player};
use barrel_climb::game::ClimbScene;
use barrel_climb::input::{OnscreenControls, TouchButton};
use barrel_climb::physics::{Rect, Vec2};

/// Terminal cells are roughly twice as tall as they are wide.
const CELL_ASPECT: f32 = 2.0;

// ── Colour palette ────────────────────────────────────────────────────────────

const C_FRAME: Color = Color::DarkBlue;
const C_GROUND: Color = Color::DarkGreen;
const C_PLATFORM: Color = Color::Red;
const C_GOAL: Color = Color::Yellow;
const C_BARREL: Color = Color::DarkYellow;
const C_PLAYER: Color = Color::White;
const C_FIRE: [Color; 2] = [Color::Red, Color::Yellow];
const C_BUTTON: Color = Color::DarkGrey;
const C_BUTTON_PRESSED: Color = Color::Grey;
const C_HINT: Color = Color::DarkGrey;
const C_STATUS: Color = Color::Cyan;

// Player spritesheet frames 0..=4; the art faces left.
const PLAYER_LEFT: [char; 5] = ['◄', '◀', '◂', '☺', '☻'];
const PLAYER_RIGHT: [char; 5] = ['►', '▶', '▸', '☺', '☻'];
const FIRE_FRAMES: [char; 2] = ['^', '*'];

/// Where the logical view lands on a `width`×`height` terminal.  The last
/// row is kept for the controls hint.
pub fn viewport(scale: ScaleMode, width: u16, height: u16) -> Viewport {
    scale.fit(
        Vec2::new(VIEW_WIDTH, VIEW_HEIGHT),
        width,
        height.saturating_sub(1),
        CELL_ASPECT,
    )
}

// ── Public entry point ────────────────────────────────────────────────────────

/// Render one complete frame.
pub fn render<W: Write>(
    out: &mut W,
    scene: &ClimbScene,
    camera: &Camera,
    view: &Viewport,
    restarts: u64,
    height: u16,
) -> std::io::Result<()> {
    out.queue(terminal::Clear(terminal::ClearType::All))?;

    draw_frame(out, view)?;

    if let Some(state) = scene.state() {
        draw_world(out, state, camera, view)?;
    }
    if let Some(controls) = scene.controls() {
        draw_controls(out, controls, view)?;
    }

    draw_hint(out, scene, restarts, height)?;

    // Park cursor in a harmless spot and flush
    out.queue(style::ResetColor)?;
    out.queue(cursor::MoveTo(0, height.saturating_sub(1)))?;
    out.flush()?;
    Ok(())
}

// ── Frame around the viewport ─────────────────────────────────────────────────

fn draw_frame<W: Write>(out: &mut W, view: &Viewport) -> std::io::Result<()> {
    if view.origin_col == 0 {
        return Ok(());
    }
    out.queue(style::SetForegroundColor(C_FRAME))?;
    let right = view.origin_col + view.cols;
    for row in view.origin_row..view.origin_row + view.rows {
        out.queue(cursor::MoveTo(view.origin_col - 1, row))?;
        out.queue(Print("│"))?;
        out.queue(cursor::MoveTo(right, row))?;
        out.queue(Print("│"))?;
    }
    Ok(())
}

// ── Entities ──────────────────────────────────────────────────────────────────

fn draw_world<W: Write>(
    out: &mut W,
    state: &GameState,
    camera: &Camera,
    view: &Viewport,
) -> std::io::Result<()> {
    let on_screen = |r: Rect| {
        let p = camera.world_to_screen(Vec2::new(r.x, r.y));
        Rect::new(p.x, p.y, r.width, r.height)
    };

    fill(out, view, on_screen(state.ground.body.rect()), '▓', C_GROUND)?;
    for platform in &state.platforms {
        fill(out, view, on_screen(platform.body.rect()), '═', C_PLATFORM)?;
    }
    fill(out, view, on_screen(state.goal.body.rect()), '♛', C_GOAL)?;

    for fire in state.fires.iter().filter(|f| f.sprite.exists) {
        let frame = usize::from(fire.animation.frame()) % FIRE_FRAMES.len();
        fill(
            out,
            view,
            on_screen(fire.sprite.body.rect()),
            FIRE_FRAMES[frame],
            C_FIRE[frame],
        )?;
    }

    for barrel in state.barrels.iter().filter(|b| b.is_alive()) {
        fill(out, view, on_screen(barrel.sprite.body.rect()), 'o', C_BARREL)?;
    }

    draw_player(out, &state.player, on_screen(state.player.sprite.body.rect()), view)
}

fn draw_player<W: Write>(
    out: &mut W,
    player: &Player,
    rect: Rect,
    view: &Viewport,
) -> std::io::Result<()> {
    let frame = usize::from(player.animation.frame()).min(PLAYER_LEFT.len() - 1);
    let glyph = match player.facing {
        Facing::Left => PLAYER_LEFT[frame],
        Facing::Right => PLAYER_RIGHT[frame],
    };
    fill(out, view, rect, glyph, C_PLAYER)
}

// ── On-screen buttons (camera space) ──────────────────────────────────────────

fn draw_controls<W: Write>(
    out: &mut W,
    controls: &OnscreenControls,
    view: &Viewport,
) -> std::io::Result<()> {
    draw_button(out, &controls.left, '←', view)?;
    draw_button(out, &controls.right, '→', view)?;
    draw_button(out, &controls.action, '⤒', view)
}

fn draw_button<W: Write>(
    out: &mut W,
    button: &TouchButton,
    label: char,
    view: &Viewport,
) -> std::io::Result<()> {
    // Half-transparent buttons render dim until pressed.
    let color = if button.is_pressed() || button.alpha >= 1.0 {
        C_BUTTON_PRESSED
    } else {
        C_BUTTON
    };
    fill(out, view, button.rect, '░', color)?;

    let r = button.rect;
    let centre = Vec2::new(r.x + r.width / 2.0, r.y + r.height / 2.0);
    if let Some((col, row)) = view.to_cell(centre) {
        out.queue(cursor::MoveTo(col, row))?;
        out.queue(style::SetForegroundColor(Color::White))?;
        out.queue(Print(label))?;
    }
    Ok(())
}

/// Paint every cell a screen-space rectangle covers.  Anything wider than
/// zero gets at least one cell so small sprites never vanish.
fn fill<W: Write>(
    out: &mut W,
    view: &Viewport,
    rect: Rect,
    glyph: char,
    color: Color,
) -> std::io::Result<()> {
    let x0 = rect.left().max(0.0);
    let y0 = rect.top().max(0.0);
    let x1 = rect.right().min(VIEW_WIDTH);
    let y1 = rect.bottom().min(VIEW_HEIGHT);
    if x1 <= x0 || y1 <= y0 {
        return Ok(());
    }

    let col0 = (x0 / view.px_per_col) as u16;
    let row0 = (y0 / view.px_per_row) as u16;
    let col1 = ((x1 / view.px_per_col).ceil() as u16).max(col0 + 1).min(view.cols);
    let row1 = ((y1 / view.px_per_row).ceil() as u16).max(row0 + 1).min(view.rows);
    if col0 >= col1 || row0 >= row1 {
        return Ok(());
    }

    let line: String = std::iter::repeat(glyph).take(usize::from(col1 - col0)).collect();
    out.queue(style::SetForegroundColor(color))?;
    for row in row0..row1 {
        out.queue(cursor::MoveTo(view.origin_col + col0, view.origin_row + row))?;
        out.queue(Print(&line))?;
    }
    Ok(())
}

// ── Controls hint (last row) ──────────────────────────────────────────────────

fn draw_hint<W: Write>(
    out: &mut W,
    scene: &ClimbScene,
    restarts: u64,
    height: u16,
) -> std::io::Result<()> {
    let row = height.saturating_sub(1);
    out.queue(cursor::MoveTo(1, row))?;
    out.queue(style::SetForegroundColor(C_HINT))?;
    out.queue(Print("← → / A D : Move   ↑ W SPACE : Jump   Mouse : Buttons   Q : Quit"))?;

    let barrels = scene
        .state()
        .map(compute::live_barrels)
        .unwrap_or(0);
    out.queue(style::SetForegroundColor(C_STATUS))?;
    out.queue(Print(format!("   Barrels:{:>2}  Attempts:{:>3}", barrels, restarts + 1)))?;
    Ok(())
}
