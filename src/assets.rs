//! Named asset declarations and the cache they load into.
//!
//! Images and spritesheets are drawn as terminal glyphs, so declaring one
//! only records its pixel dimensions; bodies are sized from them.  Text
//! assets are read from disk relative to the loader's root.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context};
use tracing::debug;

use crate::physics::Vec2;

#[derive(Clone, Debug, PartialEq)]
pub struct SpriteSheet {
    pub frame_width: f32,
    pub frame_height: f32,
    pub frames: u16,
}

impl SpriteSheet {
    pub fn frame_size(&self) -> Vec2 {
        Vec2::new(self.frame_width, self.frame_height)
    }

    /// Whether every index in `frames` names a frame of this sheet.
    pub fn covers(&self, frames: &[u16]) -> bool {
        frames.iter().all(|&f| f < self.frames)
    }
}

#[derive(Clone, Debug, PartialEq)]
enum Pending {
    Image(Vec2),
    SpriteSheet(SpriteSheet),
    Text(PathBuf),
}

/// Collects declarations during the preload phase; `load` resolves them.
#[derive(Clone, Debug)]
pub struct AssetLoader {
    root: PathBuf,
    queue: Vec<(String, Pending)>,
}

impl AssetLoader {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            queue: Vec::new(),
        }
    }

    pub fn image(&mut self, key: &str, width: f32, height: f32) {
        self.queue
            .push((key.to_string(), Pending::Image(Vec2::new(width, height))));
    }

    pub fn spritesheet(&mut self, key: &str, frame_width: f32, frame_height: f32, frames: u16) {
        self.queue.push((
            key.to_string(),
            Pending::SpriteSheet(SpriteSheet {
                frame_width,
                frame_height,
                frames,
            }),
        ));
    }

    pub fn text(&mut self, key: &str, path: impl AsRef<Path>) {
        self.queue
            .push((key.to_string(), Pending::Text(path.as_ref().to_path_buf())));
    }

    pub fn pending(&self) -> usize {
        self.queue.len()
    }

    pub fn load(self) -> anyhow::Result<AssetCache> {
        let mut cache = AssetCache::default();
        for (key, pending) in self.queue {
            match pending {
                Pending::Image(size) => {
                    cache.images.insert(key, size);
                }
                Pending::SpriteSheet(sheet) => {
                    cache.sheets.insert(key, sheet);
                }
                Pending::Text(path) => {
                    let full = self.root.join(&path);
                    let text = std::fs::read_to_string(&full)
                        .with_context(|| format!("loading text asset '{}' from {}", key, full.display()))?;
                    debug!(key = %key, path = %full.display(), bytes = text.len(), "text asset loaded");
                    cache.texts.insert(key, text);
                }
            }
        }
        Ok(cache)
    }
}

#[derive(Clone, Debug, Default)]
pub struct AssetCache {
    images: HashMap<String, Vec2>,
    sheets: HashMap<String, SpriteSheet>,
    texts: HashMap<String, String>,
}

impl AssetCache {
    pub fn image_size(&self, key: &str) -> anyhow::Result<Vec2> {
        self.images
            .get(key)
            .copied()
            .ok_or_else(|| anyhow!("image '{}' was not preloaded", key))
    }

    pub fn sheet(&self, key: &str) -> anyhow::Result<&SpriteSheet> {
        self.sheets
            .get(key)
            .ok_or_else(|| anyhow!("spritesheet '{}' was not preloaded", key))
    }

    pub fn text(&self, key: &str) -> anyhow::Result<&str> {
        self.texts
            .get(key)
            .map(String::as_str)
            .ok_or_else(|| anyhow!("text asset '{}' was not preloaded", key))
    }
}
