// =============================================================================
// ANIMATION - pose data and the writers that drive a skeleton
//
// Per frame the rig runs its writers in a fixed order (walk cycle, foot IK,
// shoot blend) and then recomputes skeleton matrices exactly once.
// =============================================================================

pub mod clip;
pub mod ik;
pub mod rig;
pub mod sequence;
pub mod shoot;
pub mod skeleton;
pub mod walk;

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

pub use clip::ClipAnimator;
pub use ik::{CcdSolver, IkChain};
pub use rig::AnimationRig;
pub use sequence::{PoseLibrary, PoseSequence};
pub use shoot::ShootAnimation;
pub use skeleton::{Bone, Skeleton};
pub use walk::WalkCycle;

/// Euler XYZ rotation of one bone, in radians.
#[derive(Copy, Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct BoneRotation {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl BoneRotation {
    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    /// Component-wise linear blend. `t == 0` returns `self` bit-for-bit.
    pub fn lerp(self, other: Self, t: f32) -> Self {
        Self {
            x: self.x + (other.x - self.x) * t,
            y: self.y + (other.y - self.y) * t,
            z: self.z + (other.z - self.z) * t,
        }
    }
}

/// Bone name → rotation. Serialised as a plain JSON object.
pub type Pose = BTreeMap<String, BoneRotation>;

/// Blends every bone of `from` toward `to`. Bones missing from `to` keep
/// their `from` value.
pub fn lerp_pose(from: &Pose, to: &Pose, t: f32) -> Pose {
    from.iter()
        .map(|(name, a)| {
            let b = to.get(name).copied().unwrap_or(*a);
            (name.clone(), a.lerp(b, t))
        })
        .collect()
}
