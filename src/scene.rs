//! Scene lifecycle and the host that drives it.
//!
//! A scene implements four capabilities and receives an explicit
//! `SceneContext` instead of reaching for globals.  The host owns both and
//! rebuilds them from scratch on restart.

use anyhow::Context;
use tracing::{debug, info};

use crate::assets::{AssetCache, AssetLoader};
use crate::camera::{Camera, ScaleMode};
use crate::config::GameConfig;
use crate::physics::ArcadeWorld;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SceneCommand {
    Continue,
    /// Tear the scene down and build a fresh one.
    Restart,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    Init,
    Preload,
    Create,
    Running,
}

/// Engine services a scene works against.  One context lives exactly as long
/// as the scene it was built for.
#[derive(Clone, Debug)]
pub struct SceneContext {
    pub config: GameConfig,
    pub world: ArcadeWorld,
    pub camera: Camera,
    pub scale: ScaleMode,
    pub assets: AssetCache,
}

impl SceneContext {
    /// Weightless world and an unscrolled camera; `Scene::init` tunes both.
    pub fn new(config: GameConfig) -> Self {
        Self {
            world: ArcadeWorld::new(0.0, config.world_bounds),
            camera: Camera::new(config.view, config.world_bounds),
            scale: ScaleMode::default(),
            assets: AssetCache::default(),
            config,
        }
    }
}

pub trait Scene {
    /// Configure scaling, physics and input bindings.
    fn init(&mut self, ctx: &mut SceneContext);

    /// Declare the assets `create` will need.
    fn preload(&mut self, loader: &mut AssetLoader);

    /// Build entities from the loaded assets.
    fn create(&mut self, ctx: &mut SceneContext) -> anyhow::Result<()>;

    /// Advance one frame of `dt` seconds.
    fn update(&mut self, ctx: &mut SceneContext, dt: f32) -> SceneCommand;
}

pub struct SceneHost<S> {
    factory: Box<dyn FnMut() -> S>,
    scene: S,
    ctx: SceneContext,
    phase: Phase,
    restarts: u64,
}

impl<S: Scene> SceneHost<S> {
    /// Build the first scene and run it through init, preload and create.
    pub fn start(config: GameConfig, mut factory: impl FnMut() -> S + 'static) -> anyhow::Result<Self> {
        let mut scene = factory();
        let mut phase = Phase::Init;
        let ctx = boot(&mut scene, config, &mut phase)?;
        Ok(Self {
            factory: Box::new(factory),
            scene,
            ctx,
            phase,
            restarts: 0,
        })
    }

    /// Run one update; a `Restart` verdict rebuilds the scene before returning.
    pub fn step(&mut self, dt: f32) -> anyhow::Result<SceneCommand> {
        let command = self.scene.update(&mut self.ctx, dt);
        if command == SceneCommand::Restart {
            self.restart()?;
        }
        Ok(command)
    }

    pub fn restart(&mut self) -> anyhow::Result<()> {
        let mut scene = (self.factory)();
        let ctx = boot(&mut scene, self.ctx.config.clone(), &mut self.phase)?;
        self.scene = scene;
        self.ctx = ctx;
        self.restarts += 1;
        info!(restarts = self.restarts, "scene restarted");
        Ok(())
    }

    pub fn scene(&self) -> &S {
        &self.scene
    }

    pub fn scene_mut(&mut self) -> &mut S {
        &mut self.scene
    }

    pub fn context(&self) -> &SceneContext {
        &self.ctx
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn restarts(&self) -> u64 {
        self.restarts
    }
}

fn boot<S: Scene>(scene: &mut S, config: GameConfig, phase: &mut Phase) -> anyhow::Result<SceneContext> {
    let mut ctx = SceneContext::new(config);

    *phase = Phase::Init;
    scene.init(&mut ctx);

    *phase = Phase::Preload;
    let mut loader = AssetLoader::new(ctx.config.asset_root.clone());
    scene.preload(&mut loader);
    debug!(assets = loader.pending(), "preloading");
    ctx.assets = loader.load().context("preloading scene assets")?;

    *phase = Phase::Create;
    scene.create(&mut ctx).context("creating scene")?;

    *phase = Phase::Running;
    Ok(ctx)
}
