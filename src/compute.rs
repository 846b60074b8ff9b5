//! Pure game-logic functions.
//!
//! Every public function takes an immutable reference to the current
//! `GameState` (plus the world, keys or config it needs) and returns a
//! brand-new `GameState`, or a verdict derived from it.  The scene calls them
//! in a fixed order once per frame.

use tracing::debug;

use crate::animation::AnimationPlayer;
use crate::config::GameConfig;
use crate::entities::{Barrel, Facing, Fire, GameState, GameStatus, Player, Sprite, SpriteSizes};
use crate::input::{self, CursorKeys, Horizontal, InputState};
use crate::level::LevelDescriptor;
use crate::physics::{ArcadeWorld, Body, Vec2};

// ── Constructors ─────────────────────────────────────────────────────────────

/// Build every entity the level describes.  The barrel pool starts empty.
pub fn build_state(level: LevelDescriptor, sizes: &SpriteSizes, config: &GameConfig) -> GameState {
    let ground = Sprite::new("ground", Body::fixed(config.ground_origin, sizes.ground));

    let platforms = level
        .platform_data
        .iter()
        .map(|p| Sprite::new("platform", Body::fixed((*p).into(), sizes.platform)))
        .collect();

    let fires = level
        .fire_data
        .iter()
        .map(|p| {
            let mut body = Body::new((*p).into(), sizes.fire);
            body.allow_gravity = false;
            let mut animation = AnimationPlayer::new(0);
            animation.play(&Fire::flicker());
            Fire {
                sprite: Sprite::new("fire", body),
                animation,
            }
        })
        .collect();

    let mut goal_body = Body::new(level.goal.into(), sizes.goal);
    goal_body.allow_gravity = false;
    let goal = Sprite::new("goal", goal_body);

    // Anchor 0.5: the start point is the player's centre.
    let start = Vec2::from(level.player_start) - sizes.player * 0.5;
    let mut player_body = Body::new(start, sizes.player);
    player_body.collide_world_bounds = true;
    let player = Player {
        sprite: Sprite::new("player", player_body),
        facing: Facing::Left,
        animation: AnimationPlayer::new(Player::IDLE_FRAME),
    };

    GameState {
        ground,
        platforms,
        fires,
        goal,
        player,
        barrels: Vec::new(),
        barrel_size: sizes.barrel,
        level,
        input: InputState::default(),
        status: GameStatus::Playing,
        frame: 0,
    }
}

// ── Hazards ──────────────────────────────────────────────────────────────────

/// Throw a barrel from the goal: reuse the first dead one, else grow the pool.
pub fn spawn_barrel(state: &GameState) -> GameState {
    let mut barrels = state.barrels.clone();
    let index = match barrels.iter().position(|b| !b.is_alive()) {
        Some(i) => i,
        None => {
            barrels.push(Barrel {
                sprite: Sprite::new("barrel", Body::new(Vec2::ZERO, state.barrel_size)),
            });
            barrels.len() - 1
        }
    };

    let sprite = &mut barrels[index].sprite;
    sprite.exists = true;
    sprite.body.collide_world_bounds = true;
    sprite.body.bounce = Vec2::new(1.0, 0.0);
    sprite.body.reset(state.level.goal.into());
    sprite.body.velocity.x = state.level.barrel_speed;

    debug!(slot = index, pool = barrels.len(), "barrel spawned");

    GameState {
        barrels,
        ..state.clone()
    }
}

/// Kill every live barrel that rolled into the bottom-left ejection zone.
pub fn recycle_barrels(state: &GameState, config: &GameConfig) -> GameState {
    let barrels = state
        .barrels
        .iter()
        .map(|b| {
            let p = b.sprite.body.position;
            if b.is_alive() && p.x < config.eject_x && p.y > config.eject_y {
                let mut dead = b.clone();
                dead.sprite.exists = false;
                dead.sprite.body.velocity = Vec2::ZERO;
                dead
            } else {
                b.clone()
            }
        })
        .collect();
    GameState {
        barrels,
        ..state.clone()
    }
}

pub fn live_barrels(state: &GameState) -> usize {
    state.barrels.iter().filter(|b| b.is_alive()).count()
}

// ── Per-frame steps ──────────────────────────────────────────────────────────

/// Integrate the moving bodies and advance animations by `dt` seconds.
pub fn step_physics(state: &GameState, world: &ArcadeWorld, dt: f32) -> GameState {
    let mut next = state.clone();
    next.frame += 1;

    world.integrate(&mut next.player.sprite.body, dt);
    next.player.animation.advance(dt);

    for barrel in next.barrels.iter_mut().filter(|b| b.is_alive()) {
        world.integrate(&mut barrel.sprite.body, dt);
    }
    for fire in &mut next.fires {
        fire.animation.advance(dt);
    }
    next
}

/// Separate the player and live barrels from the ground and the platforms.
pub fn collide_solids(state: &GameState, world: &ArcadeWorld) -> GameState {
    let mut next = state.clone();

    let player = &mut next.player.sprite.body;
    world.collide(player, &next.ground.body);
    for platform in &next.platforms {
        world.collide(player, &platform.body);
    }

    for barrel in next.barrels.iter_mut().filter(|b| b.is_alive()) {
        world.collide(&mut barrel.sprite.body, &next.ground.body);
        for platform in &next.platforms {
            world.collide(&mut barrel.sprite.body, &platform.body);
        }
    }
    next
}

/// Trigger overlaps: any barrel or fire loses, the goal wins.
pub fn resolve_triggers(state: &GameState, world: &ArcadeWorld) -> GameStatus {
    let player = &state.player.sprite.body;

    let hit_barrel = state
        .barrels
        .iter()
        .filter(|b| b.is_alive())
        .any(|b| world.overlap(player, &b.sprite.body));
    if hit_barrel {
        return GameStatus::Lost;
    }

    let burned = state
        .fires
        .iter()
        .filter(|f| f.sprite.exists)
        .any(|f| world.overlap(player, &f.sprite.body));
    if burned {
        return GameStatus::Lost;
    }

    if world.overlap(player, &state.goal.body) {
        return GameStatus::Won;
    }
    GameStatus::Playing
}

/// Horizontal velocity, facing and walk cycle from the merged input.
pub fn apply_movement(state: &GameState, keys: &CursorKeys, config: &GameConfig) -> GameState {
    let mut player = state.player.clone();
    player.sprite.body.velocity.x = 0.0;

    match input::horizontal(keys, &state.input) {
        Horizontal::Left => {
            player.sprite.body.velocity.x = -config.running_speed;
            player.facing = Facing::Left;
            player.animation.play(&Player::walking());
        }
        Horizontal::Right => {
            player.sprite.body.velocity.x = config.running_speed;
            player.facing = Facing::Right;
            player.animation.play(&Player::walking());
        }
        Horizontal::Idle => {
            player.animation.stop();
            player.animation.set_frame(Player::IDLE_FRAME);
        }
    }

    GameState {
        player,
        ..state.clone()
    }
}

/// Jump only from the ground, and consume the intent when it fires.
pub fn apply_jump(state: &GameState, config: &GameConfig) -> GameState {
    if !(state.input.must_jump && state.player.sprite.body.touching.down) {
        return state.clone();
    }

    let mut player = state.player.clone();
    player.sprite.body.velocity.y = -config.jumping_speed;
    GameState {
        player,
        input: InputState {
            must_jump: false,
            ..state.input
        },
        ..state.clone()
    }
}
