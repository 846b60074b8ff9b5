//! Arcade-style physics: axis-aligned boxes, velocity integration with a
//! single downward gravity, world-bound clamping and solid separation
//! against immovable bodies.  No rotation, no constraint solving.
//!
//! Coordinates are logical pixels with the origin at the top-left of the
//! world and `y` growing downward.

use std::ops::{Add, AddAssign, Mul, Sub};

/// Bodies that were flush with a surface on the previous frame still count
/// as coming from that side if they drifted this far into it.
const EDGE_EPSILON: f32 = 0.01;

// ── Geometry ──────────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Vec2 {
    pub x: f32,
    pub y: f32,
}

impl Vec2 {
    pub const ZERO: Vec2 = Vec2 { x: 0.0, y: 0.0 };

    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

impl Add for Vec2 {
    type Output = Vec2;
    fn add(self, rhs: Vec2) -> Vec2 {
        Vec2::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl AddAssign for Vec2 {
    fn add_assign(&mut self, rhs: Vec2) {
        self.x += rhs.x;
        self.y += rhs.y;
    }
}

impl Sub for Vec2 {
    type Output = Vec2;
    fn sub(self, rhs: Vec2) -> Vec2 {
        Vec2::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Mul<f32> for Vec2 {
    type Output = Vec2;
    fn mul(self, rhs: f32) -> Vec2 {
        Vec2::new(self.x * rhs, self.y * rhs)
    }
}

/// Axis-aligned rectangle anchored at its top-left corner.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self { x, y, width, height }
    }

    pub fn left(&self) -> f32 {
        self.x
    }

    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    pub fn top(&self) -> f32 {
        self.y
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    /// Strict intersection: rectangles that merely share an edge do not overlap.
    pub fn intersects(&self, other: &Rect) -> bool {
        self.left() < other.right()
            && self.right() > other.left()
            && self.top() < other.bottom()
            && self.bottom() > other.top()
    }

    pub fn contains(&self, point: Vec2) -> bool {
        point.x >= self.left()
            && point.x < self.right()
            && point.y >= self.top()
            && point.y < self.bottom()
    }
}

// ── Bodies ────────────────────────────────────────────────────────────────────

/// Which sides of a body are in contact with something this frame.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Touching {
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
}

impl Touching {
    pub fn any(&self) -> bool {
        self.up || self.down || self.left || self.right
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Body {
    /// Top-left corner.
    pub position: Vec2,
    /// Position at the start of the current step, used to tell which side a
    /// collision came from.
    pub previous: Vec2,
    pub size: Vec2,
    pub velocity: Vec2,
    pub allow_gravity: bool,
    /// Immovable bodies are never pushed by `collide`.
    pub immovable: bool,
    pub collide_world_bounds: bool,
    /// Restitution per axis: 0 stops dead, 1 reflects with the same speed.
    pub bounce: Vec2,
    /// Contacts with other bodies, filled in by `ArcadeWorld::collide`.
    pub touching: Touching,
    /// Contacts with the world bounds.
    pub blocked: Touching,
}

impl Body {
    /// A dynamic body affected by gravity.
    pub fn new(position: Vec2, size: Vec2) -> Self {
        Self {
            position,
            previous: position,
            size,
            velocity: Vec2::ZERO,
            allow_gravity: true,
            immovable: false,
            collide_world_bounds: false,
            bounce: Vec2::ZERO,
            touching: Touching::default(),
            blocked: Touching::default(),
        }
    }

    /// A static, immovable body that ignores gravity (ground, platforms).
    pub fn fixed(position: Vec2, size: Vec2) -> Self {
        Self {
            allow_gravity: false,
            immovable: true,
            ..Self::new(position, size)
        }
    }

    pub fn rect(&self) -> Rect {
        Rect::new(self.position.x, self.position.y, self.size.x, self.size.y)
    }

    pub fn center(&self) -> Vec2 {
        self.position + self.size * 0.5
    }

    /// Teleport to `position` and drop all motion and contact state.
    pub fn reset(&mut self, position: Vec2) {
        self.position = position;
        self.previous = position;
        self.velocity = Vec2::ZERO;
        self.touching = Touching::default();
        self.blocked = Touching::default();
    }
}

// ── World ─────────────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq)]
pub struct ArcadeWorld {
    pub gravity_y: f32,
    pub bounds: Rect,
}

impl ArcadeWorld {
    pub fn new(gravity_y: f32, bounds: Rect) -> Self {
        Self { gravity_y, bounds }
    }

    /// Advance one body by `dt` seconds.  Contact flags from the previous
    /// step are cleared first.
    pub fn integrate(&self, body: &mut Body, dt: f32) {
        body.touching = Touching::default();
        body.blocked = Touching::default();
        body.previous = body.position;

        if body.allow_gravity && !body.immovable {
            body.velocity.y += self.gravity_y * dt;
        }
        body.position += body.velocity * dt;

        if body.collide_world_bounds {
            self.clamp_to_bounds(body);
        }
    }

    fn clamp_to_bounds(&self, body: &mut Body) {
        let b = self.bounds;

        if body.position.x < b.left() {
            body.position.x = b.left();
            body.velocity.x = -body.velocity.x * body.bounce.x;
            body.blocked.left = true;
        } else if body.position.x + body.size.x > b.right() {
            body.position.x = b.right() - body.size.x;
            body.velocity.x = -body.velocity.x * body.bounce.x;
            body.blocked.right = true;
        }

        if body.position.y < b.top() {
            body.position.y = b.top();
            body.velocity.y = -body.velocity.y * body.bounce.y;
            body.blocked.up = true;
        } else if body.position.y + body.size.y > b.bottom() {
            body.position.y = b.bottom() - body.size.y;
            body.velocity.y = -body.velocity.y * body.bounce.y;
            body.blocked.down = true;
        }
    }

    /// Solid collision: push `body` out of the immovable `solid` and reflect
    /// its velocity on the hit axis by its bounce.  Returns whether they
    /// touched.
    pub fn collide(&self, body: &mut Body, solid: &Body) -> bool {
        let current = body.rect();
        let other = solid.rect();
        if !current.intersects(&other) {
            return false;
        }

        let prev = Rect::new(body.previous.x, body.previous.y, body.size.x, body.size.y);

        if prev.bottom() <= other.top() + EDGE_EPSILON {
            land_on(body, &other);
        } else if prev.top() >= other.bottom() - EDGE_EPSILON {
            bump_under(body, &other);
        } else if prev.right() <= other.left() + EDGE_EPSILON {
            hit_from_left(body, &other);
        } else if prev.left() >= other.right() - EDGE_EPSILON {
            hit_from_right(body, &other);
        } else {
            // Started the step already overlapping: take the shallowest exit.
            let push_up = current.bottom() - other.top();
            let push_down = other.bottom() - current.top();
            let push_left = current.right() - other.left();
            let push_right = other.right() - current.left();
            let min = push_up.min(push_down).min(push_left).min(push_right);
            if min == push_up {
                land_on(body, &other);
            } else if min == push_down {
                bump_under(body, &other);
            } else if min == push_left {
                hit_from_left(body, &other);
            } else {
                hit_from_right(body, &other);
            }
        }
        true
    }

    /// Trigger test: reports overlap without moving anything.
    pub fn overlap(&self, a: &Body, b: &Body) -> bool {
        a.rect().intersects(&b.rect())
    }
}

fn land_on(body: &mut Body, solid: &Rect) {
    body.position.y = solid.top() - body.size.y;
    if body.velocity.y > 0.0 {
        body.velocity.y = -body.velocity.y * body.bounce.y;
    }
    body.touching.down = true;
}

fn bump_under(body: &mut Body, solid: &Rect) {
    body.position.y = solid.bottom();
    if body.velocity.y < 0.0 {
        body.velocity.y = -body.velocity.y * body.bounce.y;
    }
    body.touching.up = true;
}

fn hit_from_left(body: &mut Body, solid: &Rect) {
    body.position.x = solid.left() - body.size.x;
    if body.velocity.x > 0.0 {
        body.velocity.x = -body.velocity.x * body.bounce.x;
    }
    body.touching.right = true;
}

fn hit_from_right(body: &mut Body, solid: &Rect) {
    body.position.x = solid.right();
    if body.velocity.x < 0.0 {
        body.velocity.x = -body.velocity.x * body.bounce.x;
    }
    body.touching.left = true;
}
