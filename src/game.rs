//! The climb-and-dodge scene: wires the gameplay rules in `compute` into the
//! scene lifecycle.

use std::path::PathBuf;
use std::time::Duration;

use anyhow::{ensure, Context};
use tracing::info;

use crate::assets::AssetLoader;
use crate::camera::ScaleMode;
use crate::compute;
use crate::config::GameConfig;
use crate::entities::{Fire, GameState, GameStatus, Player, SpriteSizes};
use crate::input::{self, CursorKeys, Key, OnscreenControls, PointerEvent, TouchButton};
use crate::level::LevelDescriptor;
use crate::physics::ArcadeWorld;
use crate::scene::{Scene, SceneCommand, SceneContext};
use crate::timer::{Scheduler, TimerHandle};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SceneTask {
    SpawnBarrel,
}

/// Everything that only exists once `create` has run.
struct Live {
    state: GameState,
    controls: OnscreenControls,
    barrel_creator: TimerHandle,
}

pub struct ClimbScene {
    level_path: PathBuf,
    cursor: CursorKeys,
    timers: Scheduler<SceneTask>,
    live: Option<Live>,
}

impl ClimbScene {
    pub fn new(config: &GameConfig) -> Self {
        Self {
            level_path: config.level_path.clone(),
            cursor: CursorKeys::default(),
            timers: Scheduler::new(),
            live: None,
        }
    }

    pub fn state(&self) -> Option<&GameState> {
        self.live.as_ref().map(|l| &l.state)
    }

    pub fn controls(&self) -> Option<&OnscreenControls> {
        self.live.as_ref().map(|l| &l.controls)
    }

    pub fn cursor(&self) -> CursorKeys {
        self.cursor
    }

    /// Whether the repeating barrel spawner is still scheduled.
    pub fn spawner_active(&self) -> bool {
        self.live
            .as_ref()
            .is_some_and(|l| self.timers.is_active(l.barrel_creator))
    }

    /// Report whether `key` is held.  Only changes of state affect the jump
    /// latch, so the frame loop can report every key each frame.
    pub fn key(&mut self, key: Key, pressed: bool) {
        if let Some(live) = self.live.as_mut() {
            input::apply_key(&mut self.cursor, &mut live.state.input, key, pressed);
        }
    }

    /// Pointer event in camera space, routed to the on-screen buttons.
    pub fn pointer(&mut self, event: PointerEvent) {
        if let Some(live) = self.live.as_mut() {
            live.controls.apply(event, &mut live.state.input);
        }
    }
}

impl Scene for ClimbScene {
    fn init(&mut self, ctx: &mut SceneContext) {
        ctx.scale = ScaleMode::ShowAll;
        ctx.world = ArcadeWorld::new(ctx.config.gravity, ctx.config.world_bounds);
        ctx.camera.bounds = ctx.config.world_bounds;
        self.cursor = CursorKeys::default();
    }

    fn preload(&mut self, loader: &mut AssetLoader) {
        let sizes = SpriteSizes::default();
        loader.image("ground", sizes.ground.x, sizes.ground.y);
        loader.image("platform", sizes.platform.x, sizes.platform.y);
        loader.image("goal", sizes.goal.x, sizes.goal.y);
        loader.image("arrowButton", sizes.arrow_button.x, sizes.arrow_button.y);
        loader.image("actionButton", sizes.action_button.x, sizes.action_button.y);
        loader.image("barrel", sizes.barrel.x, sizes.barrel.y);
        loader.spritesheet("player", 28.0, 30.0, 5);
        loader.spritesheet("fire", 20.0, 21.0, 2);
        loader.text("level", &self.level_path);
    }

    fn create(&mut self, ctx: &mut SceneContext) -> anyhow::Result<()> {
        let assets = &ctx.assets;
        let player_sheet = assets.sheet("player")?;
        let walking = Player::walking();
        ensure!(
            player_sheet.covers(&walking.frames) && player_sheet.covers(&[Player::IDLE_FRAME]),
            "player spritesheet has only {} frames",
            player_sheet.frames
        );
        let fire_sheet = assets.sheet("fire")?;
        ensure!(
            fire_sheet.covers(&Fire::flicker().frames),
            "fire spritesheet has only {} frames",
            fire_sheet.frames
        );
        let level = LevelDescriptor::from_json(assets.text("level")?).context("parsing level asset")?;
        let sizes = SpriteSizes {
            ground: assets.image_size("ground")?,
            platform: assets.image_size("platform")?,
            goal: assets.image_size("goal")?,
            barrel: assets.image_size("barrel")?,
            player: player_sheet.frame_size(),
            fire: fire_sheet.frame_size(),
            arrow_button: assets.image_size("arrowButton")?,
            action_button: assets.image_size("actionButton")?,
        };

        let config = &ctx.config;
        let state = compute::build_state(level, &sizes, config);
        ctx.camera.follow(state.player.center());

        let controls = OnscreenControls {
            left: TouchButton::new(config.left_button, sizes.arrow_button, config.button_alpha),
            right: TouchButton::new(config.right_button, sizes.arrow_button, config.button_alpha),
            action: TouchButton::new(config.action_button, sizes.action_button, config.button_alpha),
        };

        let state = compute::spawn_barrel(&state);
        let period = Duration::try_from_secs_f32(state.level.barrel_frequency)
            .context("barrel spawn interval")?;
        let barrel_creator = self.timers.every(period, SceneTask::SpawnBarrel);

        info!(
            platforms = state.platforms.len(),
            fires = state.fires.len(),
            barrel_every_secs = state.level.barrel_frequency,
            "scene created"
        );

        self.live = Some(Live {
            state,
            controls,
            barrel_creator,
        });
        Ok(())
    }

    fn update(&mut self, ctx: &mut SceneContext, dt: f32) -> SceneCommand {
        let Some(live) = self.live.as_mut() else {
            return SceneCommand::Continue;
        };

        let mut state = live.state.clone();
        for task in self.timers.advance(dt) {
            match task {
                SceneTask::SpawnBarrel => state = compute::spawn_barrel(&state),
            }
        }

        state = compute::step_physics(&state, &ctx.world, dt);
        state = compute::collide_solids(&state, &ctx.world);

        let status = compute::resolve_triggers(&state, &ctx.world);
        if status != GameStatus::Playing {
            state.status = status;
            match status {
                GameStatus::Won => info!(frame = state.frame, "goal reached"),
                _ => info!(frame = state.frame, "player killed"),
            }
            self.timers.cancel(live.barrel_creator);
            live.state = state;
            return SceneCommand::Restart;
        }

        state = compute::apply_movement(&state, &self.cursor, &ctx.config);
        state = compute::apply_jump(&state, &ctx.config);
        state = compute::recycle_barrels(&state, &ctx.config);

        ctx.camera.follow(state.player.center());
        live.state = state;
        SceneCommand::Continue
    }
}
