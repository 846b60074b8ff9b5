//! Input resolution: physical keys and on-screen buttons feed one typed
//! intent struct owned by the scene.

use crate::physics::{Rect, Vec2};

/// Arrow keys currently held down.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CursorKeys {
    pub left: bool,
    pub right: bool,
    pub up: bool,
}

/// Movement intent set by the on-screen buttons (and jump latched by keys),
/// consumed by the update step.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct InputState {
    pub moving_left: bool,
    pub moving_right: bool,
    /// Latched on press, cleared on release or when a jump is performed.
    pub must_jump: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Key {
    Left,
    Right,
    Up,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Horizontal {
    Left,
    Right,
    Idle,
}

/// Keyboard OR touch, per direction.  Left wins when both are asserted.
pub fn horizontal(keys: &CursorKeys, intent: &InputState) -> Horizontal {
    if keys.left || intent.moving_left {
        Horizontal::Left
    } else if keys.right || intent.moving_right {
        Horizontal::Right
    } else {
        Horizontal::Idle
    }
}

/// Record the held state of a key.  Pressing up latches a jump and letting
/// go of it clears the latch; reporting an unchanged state does nothing, so a
/// jump requested by the action button survives the per-frame key report.
pub fn apply_key(keys: &mut CursorKeys, intent: &mut InputState, key: Key, pressed: bool) {
    match key {
        Key::Left => keys.left = pressed,
        Key::Right => keys.right = pressed,
        Key::Up => {
            // Only the press edge latches; holding up does not re-arm.
            if pressed && !keys.up {
                intent.must_jump = true;
            } else if !pressed && keys.up {
                intent.must_jump = false;
            }
            keys.up = pressed;
        }
    }
}

// ── On-screen buttons ─────────────────────────────────────────────────────────

/// Pointer positions are in camera (screen) space.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum PointerEvent {
    Down(Vec2),
    Up(Vec2),
    Moved(Vec2),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ButtonSignal {
    Down,
    Up,
    Over,
    Out,
}

#[derive(Clone, Debug, PartialEq)]
pub struct TouchButton {
    pub rect: Rect,
    pub alpha: f32,
    pressed: bool,
    hovered: bool,
}

impl TouchButton {
    pub fn new(origin: Vec2, size: Vec2, alpha: f32) -> Self {
        Self {
            rect: Rect::new(origin.x, origin.y, size.x, size.y),
            alpha,
            pressed: false,
            hovered: false,
        }
    }

    pub fn is_pressed(&self) -> bool {
        self.pressed
    }

    /// Translate a raw pointer event into the signal this button emits, if any.
    pub fn handle(&mut self, event: PointerEvent) -> Option<ButtonSignal> {
        match event {
            PointerEvent::Down(p) if self.rect.contains(p) => {
                self.pressed = true;
                self.hovered = true;
                Some(ButtonSignal::Down)
            }
            PointerEvent::Down(_) => None,
            PointerEvent::Up(_) if self.pressed => {
                self.pressed = false;
                Some(ButtonSignal::Up)
            }
            PointerEvent::Up(_) => None,
            PointerEvent::Moved(p) => {
                let inside = self.rect.contains(p);
                if inside && !self.hovered {
                    self.hovered = true;
                    Some(ButtonSignal::Over)
                } else if !inside && self.hovered {
                    self.hovered = false;
                    Some(ButtonSignal::Out)
                } else {
                    None
                }
            }
        }
    }
}

/// The two arrows and the action button, fixed to the camera.
#[derive(Clone, Debug, PartialEq)]
pub struct OnscreenControls {
    pub left: TouchButton,
    pub right: TouchButton,
    pub action: TouchButton,
}

impl OnscreenControls {
    /// Feed one pointer event to every button and fold the result into `intent`.
    ///
    /// Arrows treat over/out like down/up so a finger can slide between them;
    /// the action button is a plain tap button.
    pub fn apply(&mut self, event: PointerEvent, intent: &mut InputState) {
        match self.left.handle(event) {
            Some(ButtonSignal::Down | ButtonSignal::Over) => intent.moving_left = true,
            Some(ButtonSignal::Up | ButtonSignal::Out) => intent.moving_left = false,
            None => {}
        }
        match self.right.handle(event) {
            Some(ButtonSignal::Down | ButtonSignal::Over) => intent.moving_right = true,
            Some(ButtonSignal::Up | ButtonSignal::Out) => intent.moving_right = false,
            None => {}
        }
        match self.action.handle(event) {
            Some(ButtonSignal::Down) => intent.must_jump = true,
            Some(ButtonSignal::Up) => intent.must_jump = false,
            _ => {}
        }
    }
}
