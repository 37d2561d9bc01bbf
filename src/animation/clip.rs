use std::collections::HashMap;

use log::warn;

use super::{PoseSequence, Skeleton};

/// Plays named looping clips on a skeleton. Used by enemies.
#[derive(Clone, Debug, Default)]
pub struct ClipAnimator {
    clips: HashMap<String, PoseSequence>,
    current: Option<String>,
    progress: f32,
    pub speed: f32,
}

impl ClipAnimator {
    pub fn new() -> Self {
        Self { speed: 1.0, ..Self::default() }
    }

    pub fn add_clip(&mut self, name: impl Into<String>, clip: PoseSequence) {
        self.clips.insert(name.into(), clip);
    }

    pub fn has_clip(&self, name: &str) -> bool {
        self.clips.contains_key(name)
    }

    /// Switches clip and restarts it. Unknown clips are logged and ignored.
    pub fn set_clip(&mut self, name: &str) -> bool {
        if !self.clips.contains_key(name) {
            warn!("animation {name} not loaded");
            return false;
        }
        self.current = Some(name.to_string());
        self.progress = 0.0;
        true
    }

    pub fn current(&self) -> Option<&str> {
        self.current.as_deref()
    }

    pub fn progress(&self) -> f32 {
        self.progress
    }

    /// Advances the playhead; returns `true` when the clip looped this frame.
    pub fn update(&mut self, dt: f32, skeleton: &mut Skeleton) -> bool {
        let next = self.progress + dt * self.speed;
        let looped = next >= 1.0;
        self.progress = next.rem_euclid(1.0);
        if let Some(clip) = self.current.as_ref().and_then(|name| self.clips.get(name)) {
            skeleton.apply_pose(&clip.interpolate(self.progress));
        }
        looped
    }
}
