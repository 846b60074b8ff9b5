//! The static level description loaded at scene creation.

use std::path::Path;
use std::time::Duration;

use anyhow::{bail, Context};
use serde::{Deserialize, Serialize};

use crate::physics::Vec2;

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl From<Point> for Vec2 {
    fn from(p: Point) -> Vec2 {
        Vec2::new(p.x, p.y)
    }
}

/// Platform, fire and goal positions are top-left corners; `player_start`
/// is the player's centre.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LevelDescriptor {
    pub platform_data: Vec<Point>,
    pub fire_data: Vec<Point>,
    pub goal: Point,
    pub player_start: Point,
    /// Seconds between barrel spawns.
    pub barrel_frequency: f32,
    /// Signed horizontal barrel velocity (px/s); negative rolls left.
    pub barrel_speed: f32,
}

impl LevelDescriptor {
    pub fn from_json(text: &str) -> anyhow::Result<Self> {
        let level: LevelDescriptor =
            serde_json::from_str(text).context("malformed level description")?;
        level.validate()?;
        Ok(level)
    }

    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading level file {}", path.display()))?;
        Self::from_json(&text).with_context(|| format!("loading level {}", path.display()))
    }

    fn validate(&self) -> anyhow::Result<()> {
        if !self.barrel_frequency.is_finite() || self.barrel_frequency <= 0.0 {
            bail!(
                "barrelFrequency must be a positive number of seconds, got {}",
                self.barrel_frequency
            );
        }
        if Duration::try_from_secs_f32(self.barrel_frequency).is_err() {
            bail!(
                "barrelFrequency of {} seconds is too long",
                self.barrel_frequency
            );
        }
        if !self.barrel_speed.is_finite() {
            bail!("barrelSpeed must be finite, got {}", self.barrel_speed);
        }
        Ok(())
    }
}
