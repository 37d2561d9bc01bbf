use std::collections::HashMap;

use glam::{EulerRot, Mat4, Quat, Vec3};
use log::debug;

use super::{BoneRotation, Pose};

pub const HIP: &str = "CC_Base_Hip";
pub const SPINE: &str = "CC_Base_Spine01";
pub const HEAD: &str = "CC_Base_Head";
pub const L_THIGH: &str = "CC_Base_L_Thigh";
pub const L_CALF: &str = "CC_Base_L_Calf";
pub const L_FOOT: &str = "CC_Base_L_Foot";
pub const R_THIGH: &str = "CC_Base_R_Thigh";
pub const R_CALF: &str = "CC_Base_R_Calf";
pub const R_FOOT: &str = "CC_Base_R_Foot";
pub const L_UPPERARM: &str = "CC_Base_L_Upperarm";
pub const L_FOREARM: &str = "CC_Base_L_Forearm";
pub const R_UPPERARM: &str = "CC_Base_R_Upperarm";
pub const R_FOREARM: &str = "CC_Base_R_Forearm";

#[derive(Clone, Debug, PartialEq)]
pub struct Bone {
    pub name: String,
    /// Parent index; always smaller than this bone's own index.
    pub parent: Option<usize>,
    /// Translation relative to the parent.
    pub offset: Vec3,
    pub rotation: BoneRotation,
}

impl Bone {
    pub fn new(name: impl Into<String>, parent: Option<usize>, offset: Vec3) -> Self {
        Self { name: name.into(), parent, offset, rotation: BoneRotation::default() }
    }

    fn local_matrix(&self) -> Mat4 {
        Mat4::from_rotation_translation(euler_to_quat(self.rotation), self.offset)
    }
}

pub fn euler_to_quat(r: BoneRotation) -> Quat {
    Quat::from_euler(EulerRot::XYZ, r.x, r.y, r.z)
}

pub fn quat_to_euler(q: Quat) -> BoneRotation {
    let (x, y, z) = q.to_euler(EulerRot::XYZ);
    BoneRotation { x, y, z }
}

/// Bone hierarchy with cached world matrices.
///
/// Pose writers change bone rotations freely; the cached matrices only move
/// when [`Skeleton::update_matrices`] runs. `revision` counts those runs.
#[derive(Clone, Debug)]
pub struct Skeleton {
    bones: Vec<Bone>,
    index: HashMap<String, usize>,
    root: Mat4,
    world: Vec<Mat4>,
    revision: u64,
}

impl Skeleton {
    /// Bones must be listed parents-first. A bone whose parent index does not
    /// precede it is re-rooted.
    pub fn new(mut bones: Vec<Bone>) -> Self {
        for (i, bone) in bones.iter_mut().enumerate() {
            if bone.parent.is_some_and(|p| p >= i) {
                debug!("bone {} has a forward parent reference, re-rooting", bone.name);
                bone.parent = None;
            }
        }
        let index = bones.iter().enumerate().map(|(i, b)| (b.name.clone(), i)).collect();
        let mut skeleton = Self { world: vec![Mat4::IDENTITY; bones.len()], bones, index, root: Mat4::IDENTITY, revision: 0 };
        skeleton.update_matrices();
        skeleton
    }

    /// Small humanoid rig using the character model's bone names.
    pub fn humanoid() -> Self {
        let bone = |name: &str, parent: Option<usize>, offset: Vec3| Bone::new(name, parent, offset);
        Self::new(vec![
            bone(HIP, None, Vec3::new(0.0, 0.09, 0.0)),                 // 0
            bone(L_THIGH, Some(0), Vec3::new(0.012, -0.005, 0.0)),      // 1
            bone(L_CALF, Some(1), Vec3::new(0.0, -0.04, 0.0)),          // 2
            bone(L_FOOT, Some(2), Vec3::new(0.0, -0.04, 0.0)),          // 3
            bone(R_THIGH, Some(0), Vec3::new(-0.012, -0.005, 0.0)),     // 4
            bone(R_CALF, Some(4), Vec3::new(0.0, -0.04, 0.0)),          // 5
            bone(R_FOOT, Some(5), Vec3::new(0.0, -0.04, 0.0)),          // 6
            bone(SPINE, Some(0), Vec3::new(0.0, 0.03, 0.0)),            // 7
            bone(HEAD, Some(7), Vec3::new(0.0, 0.05, 0.0)),             // 8
            bone(L_UPPERARM, Some(7), Vec3::new(0.02, 0.04, 0.0)),      // 9
            bone(L_FOREARM, Some(9), Vec3::new(0.0, -0.03, 0.0)),       // 10
            bone(R_UPPERARM, Some(7), Vec3::new(-0.02, 0.04, 0.0)),     // 11
            bone(R_FOREARM, Some(11), Vec3::new(0.0, -0.03, 0.0)),      // 12
        ])
    }

    pub fn bones(&self) -> &[Bone] {
        &self.bones
    }

    pub fn len(&self) -> usize {
        self.bones.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bones.is_empty()
    }

    pub fn bone_index(&self, name: &str) -> Option<usize> {
        self.index.get(name).copied()
    }

    pub fn rotation(&self, index: usize) -> Option<BoneRotation> {
        self.bones.get(index).map(|b| b.rotation)
    }

    pub fn set_rotation(&mut self, index: usize, rotation: BoneRotation) {
        if let Some(bone) = self.bones.get_mut(index) {
            bone.rotation = rotation;
        }
    }

    /// Places the whole rig in the world.
    pub fn set_root(&mut self, position: Vec3, yaw: f32) {
        self.root = Mat4::from_rotation_translation(Quat::from_rotation_y(yaw), position);
    }

    /// Writes every bone the skeleton knows; unknown names are skipped.
    /// Returns how many bones were written.
    pub fn apply_pose(&mut self, pose: &Pose) -> usize {
        let mut applied = 0;
        for (name, rotation) in pose {
            match self.index.get(name) {
                Some(&i) => {
                    self.bones[i].rotation = *rotation;
                    applied += 1;
                }
                None => debug!("pose references unknown bone {name}"),
            }
        }
        applied
    }

    pub fn capture_pose(&self) -> Pose {
        self.bones.iter().map(|b| (b.name.clone(), b.rotation)).collect()
    }

    /// Recomputes cached world matrices from the current rotations.
    pub fn update_matrices(&mut self) {
        for i in 0..self.bones.len() {
            let local = self.bones[i].local_matrix();
            self.world[i] = match self.bones[i].parent {
                Some(p) => self.world[p] * local,
                None => self.root * local,
            };
        }
        self.revision += 1;
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Cached world matrix as of the last [`Skeleton::update_matrices`].
    pub fn world_matrix(&self, index: usize) -> Option<Mat4> {
        self.world.get(index).copied()
    }

    /// World transform computed from the current rotations, ignoring the cache.
    pub fn solve_world(&self, index: usize) -> Mat4 {
        let mut chain = Vec::new();
        let mut cursor = Some(index);
        while let Some(i) = cursor {
            chain.push(i);
            cursor = self.bones[i].parent;
        }
        chain.iter().rev().fold(self.root, |acc, &i| acc * self.bones[i].local_matrix())
    }

    pub fn world_position(&self, index: usize) -> Vec3 {
        self.solve_world(index).w_axis.truncate()
    }

    pub fn world_rotation(&self, index: usize) -> Quat {
        let (_, rotation, _) = self.solve_world(index).to_scale_rotation_translation();
        rotation
    }
}
