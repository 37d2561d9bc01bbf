use super::{Pose, PoseSequence};

/// Which way the walk cycle runs this frame.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Stride {
    Forward,
    Backward,
    /// Walking without a clear forward/backward component (strafing).
    InPlace,
}

/// Walk-cycle playhead over a cyclic pose sequence.
#[derive(Clone, Debug)]
pub struct WalkCycle {
    sequence: PoseSequence,
    progress: f32,
    pub speed: f32,
}

impl WalkCycle {
    pub fn new(sequence: PoseSequence, speed: f32) -> Self {
        Self { sequence, progress: 0.0, speed }
    }

    pub fn progress(&self) -> f32 {
        self.progress
    }

    pub fn set_progress(&mut self, progress: f32) {
        self.progress = wrap_unit(progress);
    }

    /// Moves the playhead and returns the pose to apply. Backward strides run
    /// the cycle in reverse; both directions wrap with the same modulo.
    pub fn advance(&mut self, dt: f32, stride: Stride) -> Pose {
        let delta = dt * self.speed;
        self.progress = match stride {
            Stride::Backward => wrap_unit(self.progress - delta),
            Stride::Forward | Stride::InPlace => wrap_unit(self.progress + delta),
        };
        self.sequence.interpolate(self.progress)
    }
}

/// `x mod 1` into `[0, 1)`.
fn wrap_unit(x: f32) -> f32 {
    let w = x.rem_euclid(1.0);
    // rem_euclid can round up to exactly 1.0 for tiny negative inputs.
    if w >= 1.0 { 0.0 } else { w }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::animation::BoneRotation;

    fn cycle() -> WalkCycle {
        let poses = (0..3)
            .map(|i| {
                let mut p = Pose::new();
                p.insert("a".into(), BoneRotation::new(i as f32, 0.0, 0.0));
                p
            })
            .collect();
        WalkCycle::new(PoseSequence::new(poses, true).unwrap(), 1.0)
    }

    #[test]
    fn forward_and_backward_wrap_symmetrically() {
        let mut walk = cycle();
        walk.advance(1.25, Stride::Forward);
        assert!((walk.progress() - 0.25).abs() < 1e-6);
        walk.advance(0.5, Stride::Backward);
        assert!((walk.progress() - 0.75).abs() < 1e-6);
        walk.advance(0.75, Stride::Backward);
        assert_eq!(walk.progress(), 0.0);
    }

    #[test]
    fn wrap_never_returns_one() {
        assert_eq!(wrap_unit(-1.0e-9), 0.0);
        assert!((wrap_unit(-0.25) - 0.75).abs() < 1e-6);
    }
}
