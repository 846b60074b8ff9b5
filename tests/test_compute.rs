use barrel_climb::compute::*;
use barrel_climb::config::GameConfig;
use barrel_climb::entities::*;
use barrel_climb::input::{CursorKeys, InputState};
use barrel_climb::level::{LevelDescriptor, Point};
use barrel_climb::physics::{ArcadeWorld, Vec2};

const DT: f32 = 1.0 / 30.0;

fn level() -> LevelDescriptor {
    LevelDescriptor {
        platform_data: vec![
            Point { x: 0.0, y: 430.0 },
            Point { x: 45.0, y: 560.0 },
            Point { x: 90.0, y: 290.0 },
        ],
        fire_data: vec![Point { x: 120.0, y: 409.0 }],
        goal: Point { x: 20.0, y: 90.0 },
        player_start: Point { x: 70.0, y: 610.0 },
        barrel_frequency: 3.0,
        barrel_speed: 120.0,
    }
}

/// Empty level with the goal low on the right, so barrels land on the
/// ground straight away.
fn open_level(barrel_speed: f32) -> LevelDescriptor {
    LevelDescriptor {
        platform_data: Vec::new(),
        fire_data: Vec::new(),
        goal: Point { x: 300.0, y: 600.0 },
        player_start: Point { x: 180.0, y: 100.0 },
        barrel_frequency: 3.0,
        barrel_speed,
    }
}

fn make_state() -> GameState {
    build_state(level(), &SpriteSizes::default(), &GameConfig::default())
}

fn world() -> ArcadeWorld {
    let config = GameConfig::default();
    ArcadeWorld::new(config.gravity, config.world_bounds)
}

// ── build_state ───────────────────────────────────────────────────────────────

#[test]
fn one_fixed_platform_per_entry() {
    let s = make_state();
    assert_eq!(s.platforms.len(), 3);
    for platform in &s.platforms {
        assert!(platform.body.immovable);
        assert!(!platform.body.allow_gravity);
    }
    assert_eq!(s.platforms[1].body.position, Vec2::new(45.0, 560.0));
}

#[test]
fn player_is_centred_on_start() {
    let s = make_state();
    assert_eq!(s.player.center(), Vec2::new(70.0, 610.0));
    assert!(s.player.sprite.body.collide_world_bounds);
    assert_eq!(s.player.animation.frame(), Player::IDLE_FRAME);
}

#[test]
fn initial_state_has_no_barrels_and_is_playing() {
    let s = make_state();
    assert!(s.barrels.is_empty());
    assert_eq!(s.status, GameStatus::Playing);
    assert_eq!(s.frame, 0);
    assert_eq!(s.input, InputState::default());
}

#[test]
fn fires_and_goal_float() {
    let s = make_state();
    assert_eq!(s.fires.len(), 1);
    assert!(!s.fires[0].sprite.body.allow_gravity);
    assert!(s.fires[0].animation.is_playing());
    assert!(!s.goal.body.allow_gravity);
    assert_eq!(s.ground.body.position, Vec2::new(0.0, 638.0));
}

// ── spawn_barrel ──────────────────────────────────────────────────────────────

#[test]
fn spawn_places_barrel_at_goal() {
    let s2 = spawn_barrel(&make_state());
    assert_eq!(s2.barrels.len(), 1);
    let body = &s2.barrels[0].sprite.body;
    assert_eq!(body.position, Vec2::new(20.0, 90.0));
    assert_eq!(body.velocity, Vec2::new(120.0, 0.0));
    assert_eq!(body.bounce, Vec2::new(1.0, 0.0));
    assert!(body.collide_world_bounds);
    assert!(s2.barrels[0].is_alive());
}

#[test]
fn spawn_grows_pool_when_all_alive() {
    let s = spawn_barrel(&spawn_barrel(&make_state()));
    assert_eq!(s.barrels.len(), 2);
    assert_eq!(live_barrels(&s), 2);
}

#[test]
fn spawn_reuses_first_dead_barrel() {
    let mut s = spawn_barrel(&spawn_barrel(&make_state()));
    s.barrels[0].sprite.exists = false;
    s.barrels[0].sprite.body.position = Vec2::new(3.0, 650.0);

    let s2 = spawn_barrel(&s);
    assert_eq!(s2.barrels.len(), 2);
    assert!(s2.barrels[0].is_alive());
    assert_eq!(s2.barrels[0].sprite.body.position, Vec2::new(20.0, 90.0));
}

#[test]
fn spawn_does_not_mutate_original() {
    let s = make_state();
    let _ = spawn_barrel(&s);
    assert!(s.barrels.is_empty());
}

// ── recycle_barrels ───────────────────────────────────────────────────────────

#[test]
fn recycle_kills_only_inside_ejection_zone() {
    let config = GameConfig::default();
    let mut s = make_state();
    for _ in 0..4 {
        s = spawn_barrel(&s);
    }
    s.barrels[0].sprite.body.position = Vec2::new(5.0, 616.0); // inside
    s.barrels[1].sprite.body.position = Vec2::new(10.0, 616.0); // x not < 10
    s.barrels[2].sprite.body.position = Vec2::new(5.0, 600.0); // y not > 600
    s.barrels[3].sprite.body.position = Vec2::new(200.0, 100.0);

    let s2 = recycle_barrels(&s, &config);
    let alive: Vec<bool> = s2.barrels.iter().map(|b| b.is_alive()).collect();
    assert_eq!(alive, vec![false, true, true, true]);
}

#[test]
fn barrel_rolling_left_is_recycled_and_reused() {
    let config = GameConfig::default();
    let w = world();
    let mut s = build_state(open_level(-120.0), &SpriteSizes::default(), &config);
    s = spawn_barrel(&s);

    for _ in 0..150 {
        s = step_physics(&s, &w, DT);
        s = collide_solids(&s, &w);
        s = recycle_barrels(&s, &config);
    }
    assert_eq!(live_barrels(&s), 0);
    assert_eq!(s.barrels.len(), 1);

    let s2 = spawn_barrel(&s);
    assert_eq!(s2.barrels.len(), 1);
    assert_eq!(live_barrels(&s2), 1);
}

// ── barrel motion ─────────────────────────────────────────────────────────────

#[test]
fn barrel_bounces_off_the_wall_elastically() {
    let config = GameConfig::default();
    let w = world();
    let mut s = build_state(open_level(120.0), &SpriteSizes::default(), &config);
    s = spawn_barrel(&s);

    let mut flips = 0;
    let mut last_vx = s.barrels[0].sprite.body.velocity.x;
    let mut last_x = s.barrels[0].sprite.body.position.x;
    for _ in 0..30 {
        s = step_physics(&s, &w, DT);
        s = collide_solids(&s, &w);
        let body = &s.barrels[0].sprite.body;
        assert_eq!(body.velocity.x.abs(), 120.0);
        if body.velocity.x.signum() != last_vx.signum() {
            flips += 1;
        } else if body.velocity.x > 0.0 {
            assert!(body.position.x >= last_x);
        }
        last_vx = body.velocity.x;
        last_x = body.position.x;
    }
    assert_eq!(flips, 1);
    assert!(last_vx < 0.0);
}

#[test]
fn barrels_come_to_rest_on_the_ground() {
    let config = GameConfig::default();
    let w = world();
    let mut s = build_state(open_level(120.0), &SpriteSizes::default(), &config);
    s = spawn_barrel(&s);
    for _ in 0..10 {
        s = step_physics(&s, &w, DT);
        s = collide_solids(&s, &w);
    }
    let body = &s.barrels[0].sprite.body;
    assert_eq!(body.position.y, 638.0 - 22.0);
    assert!(body.touching.down);
}

// ── step_physics / collide_solids ─────────────────────────────────────────────

#[test]
fn step_increments_frame() {
    let mut s = make_state();
    s.frame = 5;
    let s2 = step_physics(&s, &world(), DT);
    assert_eq!(s2.frame, 6);
}

#[test]
fn dead_barrels_do_not_move() {
    let mut s = spawn_barrel(&make_state());
    s.barrels[0].sprite.exists = false;
    let before = s.barrels[0].sprite.body.position;
    let s2 = step_physics(&s, &world(), DT);
    assert_eq!(s2.barrels[0].sprite.body.position, before);
}

#[test]
fn player_falls_onto_the_ground() {
    let w = world();
    let mut s = make_state();
    for _ in 0..30 {
        s = step_physics(&s, &w, DT);
        s = collide_solids(&s, &w);
    }
    let body = &s.player.sprite.body;
    assert_eq!(body.position.y, 638.0 - 30.0);
    assert!(body.touching.down);
}

// ── resolve_triggers ──────────────────────────────────────────────────────────

#[test]
fn nothing_touched_keeps_playing() {
    assert_eq!(resolve_triggers(&make_state(), &world()), GameStatus::Playing);
}

#[test]
fn touching_fire_loses() {
    let mut s = make_state();
    s.player.sprite.body.position = Vec2::new(120.0, 400.0);
    assert_eq!(resolve_triggers(&s, &world()), GameStatus::Lost);
}

#[test]
fn touching_live_barrel_loses() {
    let mut s = spawn_barrel(&make_state());
    s.barrels[0].sprite.body.position = s.player.sprite.body.position;
    assert_eq!(resolve_triggers(&s, &world()), GameStatus::Lost);
}

#[test]
fn dead_barrel_is_harmless() {
    let mut s = spawn_barrel(&make_state());
    s.barrels[0].sprite.body.position = s.player.sprite.body.position;
    s.barrels[0].sprite.exists = false;
    assert_eq!(resolve_triggers(&s, &world()), GameStatus::Playing);
}

#[test]
fn touching_goal_wins() {
    let mut s = make_state();
    s.player.sprite.body.position = Vec2::new(25.0, 95.0);
    assert_eq!(resolve_triggers(&s, &world()), GameStatus::Won);
}

// ── apply_movement ────────────────────────────────────────────────────────────

#[test]
fn left_wins_when_both_directions_are_asserted() {
    let config = GameConfig::default();
    let mut s = make_state();
    s.input.moving_left = true;
    s.input.moving_right = true;
    let s2 = apply_movement(&s, &CursorKeys::default(), &config);
    assert_eq!(s2.player.sprite.body.velocity.x, -180.0);
    assert_eq!(s2.player.facing, Facing::Left);

    let keys = CursorKeys { left: false, right: true, up: false };
    let mut s = make_state();
    s.input.moving_left = true;
    let s3 = apply_movement(&s, &keys, &config);
    assert_eq!(s3.player.sprite.body.velocity.x, -180.0);
}

#[test]
fn moving_right_faces_right_and_walks() {
    let keys = CursorKeys { left: false, right: true, up: false };
    let s2 = apply_movement(&make_state(), &keys, &GameConfig::default());
    assert_eq!(s2.player.sprite.body.velocity.x, 180.0);
    assert_eq!(s2.player.facing, Facing::Right);
    assert_eq!(s2.player.facing.scale_x(), -1.0);
    assert!(s2.player.animation.is_playing());
}

#[test]
fn no_input_stops_and_shows_idle_frame() {
    let mut s = make_state();
    s.player.sprite.body.velocity.x = 50.0;
    s.player.animation.play(&Player::walking());
    let s2 = apply_movement(&s, &CursorKeys::default(), &GameConfig::default());
    assert_eq!(s2.player.sprite.body.velocity.x, 0.0);
    assert!(!s2.player.animation.is_playing());
    assert_eq!(s2.player.animation.frame(), Player::IDLE_FRAME);
}

#[test]
fn movement_does_not_mutate_original() {
    let s = make_state();
    let keys = CursorKeys { left: true, right: false, up: false };
    let _ = apply_movement(&s, &keys, &GameConfig::default());
    assert_eq!(s.player.sprite.body.velocity.x, 0.0);
}

// ── apply_jump ────────────────────────────────────────────────────────────────

#[test]
fn jump_needs_ground_contact() {
    let mut s = make_state();
    s.input.must_jump = true;
    let s2 = apply_jump(&s, &GameConfig::default());
    assert_eq!(s2.player.sprite.body.velocity.y, 0.0);
    assert!(s2.input.must_jump); // still latched for when we land
}

#[test]
fn jump_from_ground_fires_once() {
    let config = GameConfig::default();
    let mut s = make_state();
    s.input.must_jump = true;
    s.player.sprite.body.touching.down = true;

    let s2 = apply_jump(&s, &config);
    assert_eq!(s2.player.sprite.body.velocity.y, -550.0);
    assert!(!s2.input.must_jump);

    // Same frame again: intent is gone, no second impulse.
    let mut s3 = s2.clone();
    s3.player.sprite.body.velocity.y = 0.0;
    let s4 = apply_jump(&s3, &config);
    assert_eq!(s4.player.sprite.body.velocity.y, 0.0);
}

#[test]
fn no_intent_no_jump() {
    let mut s = make_state();
    s.player.sprite.body.touching.down = true;
    let s2 = apply_jump(&s, &GameConfig::default());
    assert_eq!(s2.player.sprite.body.velocity.y, 0.0);
}
