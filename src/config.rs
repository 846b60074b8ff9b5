//! Tunable constants for the scene, grouped into one struct so the binary
//! can override a few of them from the command line.

use std::path::PathBuf;
use std::time::Duration;

use crate::physics::{Rect, Vec2};

/// Logical size of the rendered view, in pixels.
pub const VIEW_WIDTH: f32 = 360.0;
pub const VIEW_HEIGHT: f32 = 592.0;

/// The world is taller than the view; the camera scrolls vertically.
pub const WORLD_WIDTH: f32 = 360.0;
pub const WORLD_HEIGHT: f32 = 700.0;

#[derive(Clone, Debug)]
pub struct GameConfig {
    /// Downward acceleration applied to every body that allows gravity (px/s²).
    pub gravity: f32,
    /// Horizontal player speed while a direction is held (px/s).
    pub running_speed: f32,
    /// Upward velocity applied on a successful jump (px/s).
    pub jumping_speed: f32,
    pub world_bounds: Rect,
    pub view: Rect,
    /// Top-left corner of the ground sprite.
    pub ground_origin: Vec2,
    /// Barrels whose top-left corner is left of `eject_x` and below `eject_y`
    /// are killed and returned to the pool.
    pub eject_x: f32,
    pub eject_y: f32,
    /// Camera-space positions of the left arrow, right arrow and action button.
    pub left_button: Vec2,
    pub right_button: Vec2,
    pub action_button: Vec2,
    pub button_alpha: f32,
    pub frame: Duration,
    /// Directory the `level` text asset and friends are resolved against.
    pub asset_root: PathBuf,
    pub level_path: PathBuf,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            gravity: 1000.0,
            running_speed: 180.0,
            jumping_speed: 550.0,
            world_bounds: Rect::new(0.0, 0.0, WORLD_WIDTH, WORLD_HEIGHT),
            view: Rect::new(0.0, 0.0, VIEW_WIDTH, VIEW_HEIGHT),
            ground_origin: Vec2::new(0.0, 638.0),
            eject_x: 10.0,
            eject_y: 600.0,
            left_button: Vec2::new(20.0, 535.0),
            right_button: Vec2::new(110.0, 535.0),
            action_button: Vec2::new(280.0, 535.0),
            button_alpha: 0.5,
            frame: Duration::from_millis(33), // ≈30 FPS
            asset_root: PathBuf::from("."),
            level_path: PathBuf::from("data/level.json"),
        }
    }
}

impl GameConfig {
    /// Frame length in seconds, as fed to the physics step.
    pub fn frame_secs(&self) -> f32 {
        self.frame.as_secs_f32()
    }
}
