//! All game entity types — pure data, no logic.

use crate::animation::{Animation, AnimationPlayer};
use crate::input::InputState;
use crate::level::LevelDescriptor;
use crate::physics::{Body, Vec2};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameStatus {
    Playing,
    /// The player reached the goal.
    Won,
    /// The player touched a barrel or a fire.
    Lost,
}

/// The player art faces left, so facing right mirrors it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Facing {
    Left,
    Right,
}

impl Facing {
    /// Horizontal scale applied when drawing.
    pub fn scale_x(&self) -> f32 {
        match self {
            Facing::Left => 1.0,
            Facing::Right => -1.0,
        }
    }
}

// ── Sprites ───────────────────────────────────────────────────────────────────

/// A drawable, physics-enabled object.  `key` names the asset it draws.
#[derive(Clone, Debug, PartialEq)]
pub struct Sprite {
    pub key: &'static str,
    pub body: Body,
    /// Dead sprites are skipped by physics, triggers and rendering.
    pub exists: bool,
}

impl Sprite {
    pub fn new(key: &'static str, body: Body) -> Self {
        Self {
            key,
            body,
            exists: true,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Player {
    pub sprite: Sprite,
    pub facing: Facing,
    pub animation: AnimationPlayer,
}

impl Player {
    /// Standing still shows this spritesheet frame.
    pub const IDLE_FRAME: u16 = 3;

    pub fn walking() -> Animation {
        Animation::new("walking", &[0, 1, 2, 1], 6.0, true)
    }

    /// The player is anchored at its centre.
    pub fn center(&self) -> Vec2 {
        self.sprite.body.center()
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Fire {
    pub sprite: Sprite,
    pub animation: AnimationPlayer,
}

impl Fire {
    pub fn flicker() -> Animation {
        Animation::new("fire", &[0, 1], 4.0, true)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Barrel {
    pub sprite: Sprite,
}

impl Barrel {
    pub fn is_alive(&self) -> bool {
        self.sprite.exists
    }
}

/// Pixel sizes of every sprite the scene builds, taken from the preloaded
/// assets.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SpriteSizes {
    pub ground: Vec2,
    pub platform: Vec2,
    pub goal: Vec2,
    pub barrel: Vec2,
    pub player: Vec2,
    pub fire: Vec2,
    pub arrow_button: Vec2,
    pub action_button: Vec2,
}

impl Default for SpriteSizes {
    fn default() -> Self {
        Self {
            ground: Vec2::new(360.0, 62.0),
            platform: Vec2::new(270.0, 20.0),
            goal: Vec2::new(34.0, 50.0),
            barrel: Vec2::new(22.0, 22.0),
            player: Vec2::new(28.0, 30.0),
            fire: Vec2::new(20.0, 21.0),
            arrow_button: Vec2::new(50.0, 50.0),
            action_button: Vec2::new(50.0, 50.0),
        }
    }
}

// ── Master game state ─────────────────────────────────────────────────────────

/// Everything one running scene owns.  Cloneable so the update rules can
/// return a new copy without mutating the original.
#[derive(Clone, Debug, PartialEq)]
pub struct GameState {
    pub ground: Sprite,
    pub platforms: Vec<Sprite>,
    pub fires: Vec<Fire>,
    pub goal: Sprite,
    pub player: Player,
    /// Barrel pool.  Dead entries are reused before the pool grows.
    pub barrels: Vec<Barrel>,
    pub barrel_size: Vec2,
    pub level: LevelDescriptor,
    pub input: InputState,
    pub status: GameStatus,
    pub frame: u64,
}
