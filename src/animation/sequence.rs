use std::collections::HashMap;
use std::f32::consts::TAU;
use std::fs;
use std::path::Path;

use log::{info, warn};
use walkdir::WalkDir;

use super::skeleton::{HEAD, HIP, L_CALF, L_FOREARM, L_THIGH, L_UPPERARM, R_CALF, R_FOREARM, R_THIGH, R_UPPERARM, SPINE};
use super::{BoneRotation, Pose};
use crate::error::{GameError, Result};

/// Order of the player's walk cycle in the pose library.
pub const WALK_CYCLE: [&str; 6] = ["base Pose", "walk1", "walk2", "walk3", "walk4", "walk5"];
pub const BASE_POSE: &str = "base Pose";
pub const RECOIL_POSE: &str = "shot";
pub const ENEMY_WALK: [&str; 2] = ["skeletonWalk2", "skeletonWalk3"];
pub const ENEMY_ATTACK: [&str; 2] = ["attack1", "attack2"];

/// Keyframes sampled uniformly over `[0, 1)`.
#[derive(Clone, Debug, PartialEq)]
pub struct PoseSequence {
    poses: Vec<Pose>,
}

impl PoseSequence {
    /// `cyclic` appends the first pose again so the wrap is seamless.
    pub fn new(mut poses: Vec<Pose>, cyclic: bool) -> Result<Self> {
        if cyclic {
            if let Some(first) = poses.first().cloned() {
                poses.push(first);
            }
        }
        if poses.len() < 2 {
            return Err(GameError::InvalidPoseSequence(poses.len()));
        }
        Ok(Self { poses })
    }

    pub fn len(&self) -> usize {
        self.poses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.poses.is_empty()
    }

    pub fn poses(&self) -> &[Pose] {
        &self.poses
    }

    /// Samples the sequence. `progress` is taken modulo 1.
    pub fn interpolate(&self, progress: f32) -> Pose {
        let n = self.poses.len();
        let p = progress.rem_euclid(1.0);
        let step = 1.0 / (n - 1) as f32;
        let index = ((p / step).floor() as usize).min(n - 1);
        let factor = (p % step) / step;
        let current = &self.poses[index];
        let next = &self.poses[(index + 1) % n];
        super::lerp_pose(current, next, factor)
    }
}

/// Named poses, usually loaded from a directory of `<name>.json` files.
#[derive(Clone, Debug, Default)]
pub struct PoseLibrary {
    poses: HashMap<String, Pose>,
}

impl PoseLibrary {
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads every `.json` file under `dir` (recursively); the file stem is
    /// the pose name. Unreadable or malformed files are logged and skipped.
    pub fn load_dir<P: AsRef<Path>>(dir: P) -> Result<Self> {
        let dir = dir.as_ref();
        if !dir.is_dir() {
            return Err(GameError::MissingAsset(dir.display().to_string()));
        }
        let mut library = Self::new();
        for entry in WalkDir::new(dir).into_iter() {
            let entry = match entry {
                Ok(e) => e,
                Err(e) => {
                    warn!("skipping pose entry: {e}");
                    continue;
                }
            };
            let path = entry.path();
            if !entry.file_type().is_file() || path.extension().and_then(|e| e.to_str()) != Some("json") {
                continue;
            }
            let Some(name) = path.file_stem().and_then(|s| s.to_str()) else { continue };
            let parsed = fs::read_to_string(path)
                .map_err(GameError::from)
                .and_then(|text| serde_json::from_str::<Pose>(&text).map_err(GameError::from));
            match parsed {
                Ok(pose) => {
                    library.poses.insert(name.to_string(), pose);
                }
                Err(e) => warn!("error loading pose {}: {e}", path.display()),
            }
        }
        info!("loaded {} poses from {}", library.len(), dir.display());
        Ok(library)
    }

    pub fn insert(&mut self, name: impl Into<String>, pose: Pose) {
        self.poses.insert(name.into(), pose);
    }

    pub fn get(&self, name: &str) -> Option<&Pose> {
        self.poses.get(name)
    }

    pub fn len(&self) -> usize {
        self.poses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.poses.is_empty()
    }

    /// Builds a sequence from the named poses, skipping (and logging) any that
    /// are missing.
    pub fn sequence(&self, names: &[&str], cyclic: bool) -> Result<PoseSequence> {
        let mut poses = Vec::with_capacity(names.len() + 1);
        for name in names {
            match self.poses.get(*name) {
                Some(pose) => poses.push(pose.clone()),
                None => warn!("pose {name} not found"),
            }
        }
        PoseSequence::new(poses, cyclic)
    }

    pub fn walk_cycle(&self) -> Result<PoseSequence> {
        self.sequence(&WALK_CYCLE, true)
    }

    /// Poses generated in code for runs without pose files on disk: a walk
    /// cycle swinging legs and arms, a recoil pose and the enemy clips.
    pub fn procedural() -> Self {
        let mut library = Self::new();
        for (i, name) in WALK_CYCLE.iter().enumerate() {
            let phase = i as f32 / WALK_CYCLE.len() as f32 * TAU;
            let swing = 0.45 * phase.sin();
            let knee = 0.3 * (phase.cos().max(0.0));
            let mut pose = Pose::new();
            pose.insert(HIP.into(), BoneRotation::default());
            pose.insert(L_THIGH.into(), BoneRotation::new(swing, 0.0, 0.0));
            pose.insert(R_THIGH.into(), BoneRotation::new(-swing, 0.0, 0.0));
            pose.insert(L_CALF.into(), BoneRotation::new(knee, 0.0, 0.0));
            pose.insert(R_CALF.into(), BoneRotation::new(0.3 - knee, 0.0, 0.0));
            pose.insert(L_UPPERARM.into(), BoneRotation::new(-swing * 0.5, 0.0, 0.0));
            pose.insert(R_UPPERARM.into(), BoneRotation::new(swing * 0.5, 0.0, 0.0));
            library.insert(*name, pose);
        }

        let mut shot = Pose::new();
        shot.insert(SPINE.into(), BoneRotation::new(-0.15, 0.0, 0.0));
        shot.insert(HEAD.into(), BoneRotation::new(-0.05, 0.0, 0.0));
        shot.insert(R_UPPERARM.into(), BoneRotation::new(-1.4, 0.0, 0.1));
        shot.insert(R_FOREARM.into(), BoneRotation::new(-0.3, 0.0, 0.0));
        shot.insert(L_FOREARM.into(), BoneRotation::new(-0.2, 0.0, 0.0));
        library.insert(RECOIL_POSE, shot);

        for (i, name) in ENEMY_WALK.iter().enumerate() {
            let s = if i == 0 { 0.35 } else { -0.35 };
            let mut pose = Pose::new();
            pose.insert(L_THIGH.into(), BoneRotation::new(s, 0.0, 0.0));
            pose.insert(R_THIGH.into(), BoneRotation::new(-s, 0.0, 0.0));
            library.insert(*name, pose);
        }
        for (i, name) in ENEMY_ATTACK.iter().enumerate() {
            let mut pose = Pose::new();
            pose.insert(R_UPPERARM.into(), BoneRotation::new(if i == 0 { -2.0 } else { -0.6 }, 0.0, 0.0));
            library.insert(*name, pose);
        }
        library
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn single(bone: &str, x: f32) -> Pose {
        let mut p = Pose::new();
        p.insert(bone.into(), BoneRotation::new(x, 0.0, 0.0));
        p
    }

    #[test]
    fn cyclic_sequence_closes_the_loop() {
        let seq = PoseSequence::new(vec![single("a", 0.0), single("a", 1.0)], true).unwrap();
        assert_eq!(seq.len(), 3);
        assert_eq!(seq.poses()[2], seq.poses()[0]);
    }

    #[test]
    fn empty_sequence_is_rejected() {
        assert!(matches!(PoseSequence::new(vec![], true), Err(GameError::InvalidPoseSequence(0))));
        assert!(matches!(PoseSequence::new(vec![single("a", 0.0)], false), Err(GameError::InvalidPoseSequence(1))));
    }

    #[test]
    fn midpoint_between_keys() {
        let seq = PoseSequence::new(vec![single("a", 0.0), single("a", 1.0)], true).unwrap();
        // Two intervals; 0.25 is halfway through the first.
        assert!((seq.interpolate(0.25)["a"].x - 0.5).abs() < 1e-6);
        assert!((seq.interpolate(0.75)["a"].x - 0.5).abs() < 1e-6);
    }

    #[test]
    fn procedural_library_has_every_named_pose() {
        let lib = PoseLibrary::procedural();
        assert!(lib.walk_cycle().is_ok());
        assert!(lib.get(RECOIL_POSE).is_some());
        assert!(lib.sequence(&ENEMY_WALK, true).is_ok());
        assert!(lib.sequence(&ENEMY_ATTACK, true).is_ok());
    }
}
