//! Frame-sequence animations for spritesheet sprites.

#[derive(Clone, Debug, PartialEq)]
pub struct Animation {
    pub name: &'static str,
    /// Spritesheet frame indices, in playback order.
    pub frames: Vec<u16>,
    pub fps: f32,
    pub looping: bool,
}

impl Animation {
    pub fn new(name: &'static str, frames: &[u16], fps: f32, looping: bool) -> Self {
        Self {
            name,
            frames: frames.to_vec(),
            fps,
            looping,
        }
    }
}

/// Plays at most one animation at a time and tracks the visible frame.
#[derive(Clone, Debug, PartialEq)]
pub struct AnimationPlayer {
    current: Option<Animation>,
    /// Position inside `current.frames`.
    cursor: usize,
    elapsed: f32,
    frame: u16,
}

impl AnimationPlayer {
    pub fn new(initial_frame: u16) -> Self {
        Self {
            current: None,
            cursor: 0,
            elapsed: 0.0,
            frame: initial_frame,
        }
    }

    /// Start `animation`.  Calling this again with the animation that is
    /// already running keeps its progress.
    pub fn play(&mut self, animation: &Animation) {
        if self.current.as_ref().map(|a| a.name) == Some(animation.name) {
            return;
        }
        self.cursor = 0;
        self.elapsed = 0.0;
        self.frame = animation.frames.first().copied().unwrap_or(self.frame);
        self.current = Some(animation.clone());
    }

    /// Freeze on the current frame.
    pub fn stop(&mut self) {
        self.current = None;
        self.cursor = 0;
        self.elapsed = 0.0;
    }

    pub fn set_frame(&mut self, frame: u16) {
        self.frame = frame;
    }

    pub fn frame(&self) -> u16 {
        self.frame
    }

    pub fn is_playing(&self) -> bool {
        self.current.is_some()
    }

    pub fn advance(&mut self, dt: f32) {
        let Some(anim) = &self.current else {
            return;
        };
        if anim.frames.is_empty() || anim.fps <= 0.0 {
            return;
        }

        let step = 1.0 / anim.fps;
        self.elapsed += dt;
        while self.elapsed >= step {
            self.elapsed -= step;
            if self.cursor + 1 < anim.frames.len() {
                self.cursor += 1;
            } else if anim.looping {
                self.cursor = 0;
            } else {
                self.elapsed = 0.0;
                break;
            }
        }
        self.frame = anim.frames[self.cursor];
    }
}
