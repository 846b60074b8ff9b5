use std::fs;

use barrel_climb::compute;
use barrel_climb::config::GameConfig;
use barrel_climb::entities::GameStatus;
use barrel_climb::game::ClimbScene;
use barrel_climb::input::{Key, PointerEvent};
use barrel_climb::physics::Vec2;
use barrel_climb::scene::{Phase, SceneCommand, SceneHost};
use tempfile::TempDir;

/// One high platform out of the way, the goal up in the right corner and the
/// player standing near the left edge of the ground.
const QUIET_LEVEL: &str = r#"{
  "platformData": [{"x": 0, "y": 430}],
  "fireData": [],
  "goal": {"x": 300, "y": 100},
  "playerStart": {"x": 40, "y": 610},
  "barrelFrequency": 0.5,
  "barrelSpeed": 120
}"#;

/// A fire sits right where the player appears.
const DEADLY_LEVEL: &str = r#"{
  "platformData": [],
  "fireData": [{"x": 30, "y": 600}],
  "goal": {"x": 300, "y": 100},
  "playerStart": {"x": 40, "y": 610},
  "barrelFrequency": 3,
  "barrelSpeed": 120
}"#;

/// The player appears overlapping the lower half of the goal, clear of the
/// barrel thrown from its top-left corner.
const GOAL_LEVEL: &str = r#"{
  "platformData": [],
  "fireData": [],
  "goal": {"x": 30, "y": 570},
  "playerStart": {"x": 40, "y": 610},
  "barrelFrequency": 3,
  "barrelSpeed": 120
}"#;

fn write_level(json: &str) -> (TempDir, GameConfig) {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("level.json"), json).unwrap();
    let config = GameConfig {
        asset_root: dir.path().to_path_buf(),
        level_path: "level.json".into(),
        ..GameConfig::default()
    };
    (dir, config)
}

fn start(json: &str) -> (TempDir, SceneHost<ClimbScene>) {
    let (dir, config) = write_level(json);
    let scene_config = config.clone();
    let host = SceneHost::start(config, move || ClimbScene::new(&scene_config)).unwrap();
    (dir, host)
}

fn run(host: &mut SceneHost<ClimbScene>, frames: usize) {
    let dt = host.context().config.frame_secs();
    for _ in 0..frames {
        assert_eq!(host.step(dt).unwrap(), SceneCommand::Continue);
    }
}

#[test]
fn start_runs_the_whole_lifecycle() {
    let (_dir, host) = start(QUIET_LEVEL);
    assert_eq!(host.phase(), Phase::Running);
    assert_eq!(host.restarts(), 0);

    let state = host.scene().state().unwrap();
    assert_eq!(state.platforms.len(), 1);
    assert_eq!(state.status, GameStatus::Playing);
    assert_eq!(compute::live_barrels(state), 1);
    assert!(host.scene().spawner_active());
    assert!(host.scene().controls().is_some());
    assert_eq!(host.context().world.gravity_y, 1000.0);
}

#[test]
fn spawner_throws_a_barrel_every_interval() {
    let (_dir, mut host) = start(QUIET_LEVEL);
    run(&mut host, 15);
    assert_eq!(compute::live_barrels(host.scene().state().unwrap()), 1);
    run(&mut host, 1);
    assert_eq!(compute::live_barrels(host.scene().state().unwrap()), 2);
}

#[test]
fn touching_fire_restarts_with_a_fresh_scene() {
    let (_dir, mut host) = start(DEADLY_LEVEL);
    let dt = host.context().config.frame_secs();

    assert_eq!(host.step(dt).unwrap(), SceneCommand::Restart);
    assert_eq!(host.restarts(), 1);
    assert_eq!(host.phase(), Phase::Running);

    let state = host.scene().state().unwrap();
    assert_eq!(state.frame, 0);
    assert_eq!(state.status, GameStatus::Playing);
    assert_eq!(state.player.center(), Vec2::new(40.0, 610.0));
    assert_eq!(compute::live_barrels(state), 1);
    assert!(host.scene().spawner_active());
}

#[test]
fn reaching_the_goal_restarts_from_the_start() {
    let (_dir, mut host) = start(GOAL_LEVEL);
    let dt = host.context().config.frame_secs();

    assert_eq!(host.step(dt).unwrap(), SceneCommand::Restart);
    assert_eq!(host.restarts(), 1);

    let state = host.scene().state().unwrap();
    assert_eq!(state.frame, 0);
    assert_eq!(state.player.center(), Vec2::new(40.0, 610.0));
}

#[test]
fn huge_barrel_interval_fails_to_start() {
    let json = QUIET_LEVEL.replace("0.5", "1e20");
    let (_dir, config) = write_level(&json);
    let scene_config = config.clone();
    let started = SceneHost::start(config, move || ClimbScene::new(&scene_config));
    assert!(started.is_err());
}

#[test]
fn missing_level_file_fails_to_start() {
    let dir = tempfile::tempdir().unwrap();
    let config = GameConfig {
        asset_root: dir.path().to_path_buf(),
        level_path: "missing.json".into(),
        ..GameConfig::default()
    };
    let scene_config = config.clone();
    let Err(err) = SceneHost::start(config, move || ClimbScene::new(&scene_config)) else {
        panic!("scene started without a level");
    };
    assert!(format!("{:#}", err).contains("missing.json"));
}

#[test]
fn left_arrow_button_walks_left() {
    let (_dir, mut host) = start(QUIET_LEVEL);
    host.scene_mut().pointer(PointerEvent::Down(Vec2::new(30.0, 550.0)));
    assert!(host.scene().state().unwrap().input.moving_left);

    run(&mut host, 1);
    let player = &host.scene().state().unwrap().player;
    assert_eq!(player.sprite.body.velocity.x, -180.0);

    host.scene_mut().pointer(PointerEvent::Up(Vec2::new(200.0, 100.0)));
    run(&mut host, 1);
    let player = &host.scene().state().unwrap().player;
    assert_eq!(player.sprite.body.velocity.x, 0.0);
}

#[test]
fn jump_fires_once_per_press() {
    let (_dir, mut host) = start(QUIET_LEVEL);
    run(&mut host, 10);
    assert!(host.scene().state().unwrap().player.sprite.body.touching.down);

    host.scene_mut().key(Key::Up, true);
    run(&mut host, 1);
    let state = host.scene().state().unwrap();
    assert_eq!(state.player.sprite.body.velocity.y, -550.0);
    assert!(!state.input.must_jump);

    // Still held: no second latch.
    host.scene_mut().key(Key::Up, true);
    assert!(!host.scene().state().unwrap().input.must_jump);
    run(&mut host, 1);
    assert!(host.scene().state().unwrap().player.sprite.body.velocity.y > -550.0);
}

#[test]
fn action_button_jumps_while_keys_are_reported_up() {
    let (_dir, mut host) = start(QUIET_LEVEL);
    run(&mut host, 10);

    let scene = host.scene_mut();
    scene.pointer(PointerEvent::Down(Vec2::new(300.0, 560.0)));
    scene.key(Key::Left, false);
    scene.key(Key::Right, false);
    scene.key(Key::Up, false);
    assert!(scene.state().unwrap().input.must_jump);

    run(&mut host, 1);
    let state = host.scene().state().unwrap();
    assert_eq!(state.player.sprite.body.velocity.y, -550.0);
    assert!(!state.input.must_jump);
}
