pub mod animation;
pub mod assets;
pub mod camera;
pub mod compute;
pub mod config;
pub mod entities;
pub mod game;
pub mod input;
pub mod level;
pub mod physics;
pub mod scene;
pub mod timer;
