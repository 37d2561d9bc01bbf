use log::debug;

use super::{Pose, Skeleton, lerp_pose};

/// Two-phase recoil blend: start → recoil over one `duration`, then back to
/// start over another. Only one may run at a time.
#[derive(Clone, Debug)]
pub struct ShootAnimation {
    recoil: Option<Pose>,
    start: Pose,
    progress: f32,
    duration: f32,
    animating: bool,
}

impl ShootAnimation {
    /// Without a recoil pose the animation still times out normally but
    /// leaves the skeleton untouched.
    pub fn new(recoil: Option<Pose>, duration: f32) -> Self {
        if recoil.is_none() {
            debug!("no recoil pose, shoot animation will not move bones");
        }
        Self { recoil, start: Pose::new(), progress: 0.0, duration, animating: false }
    }

    pub fn is_animating(&self) -> bool {
        self.animating
    }

    /// Normalised progress in `[0, 2]`.
    pub fn progress(&self) -> f32 {
        self.progress
    }

    /// Captures the current pose and starts blending. Returns `false` and
    /// changes nothing if an animation is already running.
    pub fn try_start(&mut self, skeleton: &Skeleton) -> bool {
        if self.animating {
            return false;
        }
        self.animating = true;
        self.progress = 0.0;
        self.start = skeleton.capture_pose();
        true
    }

    pub fn update(&mut self, dt: f32, skeleton: &mut Skeleton) {
        if !self.animating {
            return;
        }
        self.progress += dt / self.duration;

        let t = if self.progress <= 1.0 {
            self.progress
        } else if self.progress <= 2.0 {
            2.0 - self.progress
        } else {
            self.animating = false;
            return;
        };
        if let Some(recoil) = &self.recoil {
            skeleton.apply_pose(&lerp_pose(&self.start, recoil, t));
        }
    }
}
