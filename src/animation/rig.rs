use glam::Vec3;
use log::{debug, warn};

use super::sequence::{BASE_POSE, RECOIL_POSE};
use super::walk::Stride;
use super::{CcdSolver, PoseLibrary, ShootAnimation, Skeleton, WalkCycle};
use crate::config::AnimationConfig;

/// The player's animation stack: walk cycle, then foot IK, then the shoot
/// blend, then one matrix recompute.
#[derive(Clone, Debug)]
pub struct AnimationRig {
    skeleton: Skeleton,
    walk: Option<WalkCycle>,
    ik: Option<CcdSolver>,
    shoot: ShootAnimation,
    floor_height: f32,
    needs_ik: bool,
}

impl AnimationRig {
    /// Missing poses degrade single writers: no walk cycle means no walking
    /// animation, no recoil pose means a motionless shoot blend.
    pub fn new(mut skeleton: Skeleton, library: &PoseLibrary, config: &AnimationConfig) -> Self {
        match library.get(BASE_POSE) {
            Some(base) => {
                skeleton.apply_pose(base);
            }
            None => debug!("no base pose in library"),
        }
        let walk = match library.walk_cycle() {
            Ok(seq) => Some(WalkCycle::new(seq, config.walk_speed)),
            Err(e) => {
                warn!("walk cycle unavailable: {e}");
                None
            }
        };
        let ik = CcdSolver::for_legs(&skeleton, config.ik_iterations, config.ik_min_angle, config.ik_max_angle);
        let shoot = ShootAnimation::new(library.get(RECOIL_POSE).cloned(), config.shoot_duration);
        skeleton.update_matrices();
        Self { skeleton, walk, ik, shoot, floor_height: config.floor_height, needs_ik: false }
    }

    pub fn skeleton(&self) -> &Skeleton {
        &self.skeleton
    }

    pub fn skeleton_mut(&mut self) -> &mut Skeleton {
        &mut self.skeleton
    }

    /// Requests a foot IK pass on the next update.
    pub fn set_needs_ik_update(&mut self) {
        self.needs_ik = true;
    }

    pub fn needs_ik_update(&self) -> bool {
        self.needs_ik
    }

    pub fn walk_progress(&self) -> Option<f32> {
        self.walk.as_ref().map(WalkCycle::progress)
    }

    pub fn is_shooting(&self) -> bool {
        self.shoot.is_animating()
    }

    pub fn shoot_progress(&self) -> f32 {
        self.shoot.progress()
    }

    /// `false` if a shoot blend is already running.
    pub fn try_start_shoot(&mut self) -> bool {
        self.shoot.try_start(&self.skeleton)
    }

    /// `stride` is `None` while standing still.
    pub fn update(&mut self, dt: f32, root: Vec3, yaw: f32, stride: Option<Stride>) {
        self.skeleton.set_root(root, yaw);

        if let (Some(stride), Some(walk)) = (stride, self.walk.as_mut()) {
            let pose = walk.advance(dt, stride);
            self.skeleton.apply_pose(&pose);
        }

        if self.needs_ik {
            if let Some(ik) = self.ik.as_mut() {
                ik.snap_targets_to_floor(&self.skeleton, self.floor_height);
                ik.solve(&mut self.skeleton);
                debug!("foot IK updated");
            }
            self.needs_ik = false;
        }

        self.shoot.update(dt, &mut self.skeleton);
        self.skeleton.update_matrices();
    }
}
