use glam::{Quat, Vec3};
use log::debug;

use super::skeleton::{self, Skeleton, euler_to_quat, quat_to_euler};

/// One effector and the bones that may rotate to reach its target, listed
/// from the effector's parent toward the root.
#[derive(Clone, Debug, PartialEq)]
pub struct IkChain {
    pub effector: usize,
    pub links: Vec<usize>,
    pub target: Vec3,
}

/// Cyclic coordinate descent over a set of chains.
#[derive(Clone, Debug)]
pub struct CcdSolver {
    pub chains: Vec<IkChain>,
    pub iterations: usize,
    /// Bounds on the rotation a single link may take in one step.
    pub min_angle: f32,
    pub max_angle: f32,
}

impl CcdSolver {
    pub fn new(chains: Vec<IkChain>, iterations: usize, min_angle: f32, max_angle: f32) -> Self {
        Self { chains, iterations, min_angle, max_angle }
    }

    /// Foot ← calf ← thigh ← hip, one chain per leg. `None` if the skeleton
    /// lacks any of those bones.
    pub fn for_legs(skeleton: &Skeleton, iterations: usize, min_angle: f32, max_angle: f32) -> Option<Self> {
        let chain = |foot: &str, calf: &str, thigh: &str| -> Option<IkChain> {
            let effector = skeleton.bone_index(foot)?;
            let links = vec![
                skeleton.bone_index(calf)?,
                skeleton.bone_index(thigh)?,
                skeleton.bone_index(skeleton::HIP)?,
            ];
            Some(IkChain { effector, links, target: Vec3::ZERO })
        };
        let left = chain(skeleton::L_FOOT, skeleton::L_CALF, skeleton::L_THIGH);
        let right = chain(skeleton::R_FOOT, skeleton::R_CALF, skeleton::R_THIGH);
        match (left, right) {
            (Some(l), Some(r)) => Some(Self::new(vec![l, r], iterations, min_angle, max_angle)),
            _ => {
                debug!("skeleton has no leg chains, foot IK disabled");
                None
            }
        }
    }

    /// Targets every effector at its current horizontal position on the
    /// plane `y = floor`.
    pub fn snap_targets_to_floor(&mut self, skeleton: &Skeleton, floor: f32) {
        for chain in &mut self.chains {
            let mut target = skeleton.world_position(chain.effector);
            target.y = floor;
            chain.target = target;
        }
    }

    /// Rotates link bones only; other bones keep whatever the pose wrote.
    pub fn solve(&self, skeleton: &mut Skeleton) {
        for chain in &self.chains {
            for _ in 0..self.iterations {
                let mut rotated = false;
                for &link in &chain.links {
                    let (_, link_rot, link_pos) = skeleton.solve_world(link).to_scale_rotation_translation();
                    let effector_pos = skeleton.world_position(chain.effector);
                    let inv = link_rot.inverse();
                    let to_effector = (inv * (effector_pos - link_pos)).normalize_or_zero();
                    let to_target = (inv * (chain.target - link_pos)).normalize_or_zero();
                    if to_effector == Vec3::ZERO || to_target == Vec3::ZERO {
                        continue;
                    }
                    let angle = to_effector.dot(to_target).clamp(-1.0, 1.0).acos();
                    if angle < 1.0e-5 {
                        continue;
                    }
                    let angle = angle.clamp(self.min_angle, self.max_angle);
                    let axis = to_effector.cross(to_target);
                    if axis.length_squared() < 1.0e-12 {
                        continue;
                    }
                    let Some(current) = skeleton.rotation(link) else { continue };
                    let step = Quat::from_axis_angle(axis.normalize(), angle);
                    let next = (euler_to_quat(current) * step).normalize();
                    skeleton.set_rotation(link, quat_to_euler(next));
                    rotated = true;
                }
                if !rotated {
                    break;
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::animation::BoneRotation;

    #[test]
    fn solver_pulls_foot_toward_target() {
        let mut skel = Skeleton::humanoid();
        let knee = skel.bone_index(skeleton::L_CALF).unwrap();
        skel.set_rotation(knee, BoneRotation::new(0.6, 0.0, 0.0));
        let mut solver = CcdSolver::for_legs(&skel, 10, 0.0, 1.0).unwrap();
        solver.chains.truncate(1);
        let foot = solver.chains[0].effector;
        let target = skel.world_position(foot) + Vec3::new(0.0, -0.01, 0.01);
        solver.chains[0].target = target;

        let before = skel.world_position(foot).distance(target);
        solver.solve(&mut skel);
        let after = skel.world_position(foot).distance(target);
        assert!(after < before, "{after} >= {before}");
    }

    #[test]
    fn solver_leaves_non_link_bones_alone() {
        let mut skel = Skeleton::humanoid();
        let head = skel.bone_index(skeleton::HEAD).unwrap();
        skel.set_rotation(head, BoneRotation::new(0.2, 0.1, 0.0));
        let mut solver = CcdSolver::for_legs(&skel, 10, 0.0, 1.0).unwrap();
        solver.snap_targets_to_floor(&skel, -0.05);
        solver.solve(&mut skel);
        assert_eq!(skel.rotation(head), Some(BoneRotation::new(0.2, 0.1, 0.0)));
    }
}
