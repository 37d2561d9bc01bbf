/// Headless tests for pose data, the walk cycle, the shoot blend and the
/// player rig. None of them need a window or a model file.
use std::fs;

use glam::Vec3;
use viviel::GameError;
use viviel::animation::sequence::{BASE_POSE, ENEMY_WALK, RECOIL_POSE};
use viviel::animation::skeleton::{L_CALF, R_UPPERARM, SPINE};
use viviel::animation::walk::Stride;
use viviel::animation::{AnimationRig, BoneRotation, ClipAnimator, Pose, PoseLibrary, Skeleton, lerp_pose};
use viviel::config::AnimationConfig;

fn rig() -> AnimationRig {
    AnimationRig::new(Skeleton::humanoid(), &PoseLibrary::procedural(), &AnimationConfig::default())
}

// ── Sequences ────────────────────────────────────────────────────────────────

#[test]
fn walk_cycle_starts_and_ends_on_the_base_pose() {
    let lib = PoseLibrary::procedural();
    let seq = lib.walk_cycle().unwrap();
    assert_eq!(seq.len(), 7);
    let base = lib.get(BASE_POSE).unwrap();
    assert_eq!(&seq.interpolate(0.0), base);
    assert_eq!(seq.interpolate(1.0), seq.interpolate(0.0));
}

#[test]
fn missing_poses_are_skipped_not_fatal() {
    let lib = PoseLibrary::procedural();
    let seq = lib.sequence(&["walk1", "nope", "walk2"], false).unwrap();
    assert_eq!(seq.len(), 2);
    assert!(matches!(lib.sequence(&["nope"], true), Err(GameError::InvalidPoseSequence(0))));
}

#[test]
fn lerp_pose_halfway() {
    let mut a = Pose::new();
    a.insert(SPINE.into(), BoneRotation::new(0.0, 0.0, 0.0));
    let mut b = Pose::new();
    b.insert(SPINE.into(), BoneRotation::new(1.0, -1.0, 0.5));
    let mid = lerp_pose(&a, &b, 0.5);
    assert_eq!(mid[SPINE], BoneRotation::new(0.5, -0.5, 0.25));
}

#[test]
fn pose_library_loads_json_files_and_skips_bad_ones() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("base Pose.json"), r#"{ "CC_Base_Hip": { "x": 0.1, "y": 0.0, "z": 0.0 } }"#).unwrap();
    fs::create_dir(dir.path().join("enemy")).unwrap();
    fs::write(dir.path().join("enemy").join("attack1.json"), r#"{ "CC_Base_R_Upperarm": { "x": -2.0, "y": 0.0, "z": 0.0 } }"#)
        .unwrap();
    fs::write(dir.path().join("broken.json"), "{ not json").unwrap();
    fs::write(dir.path().join("notes.txt"), "ignored").unwrap();

    let lib = PoseLibrary::load_dir(dir.path()).unwrap();
    assert_eq!(lib.len(), 2);
    assert_eq!(lib.get(BASE_POSE).unwrap()["CC_Base_Hip"].x, 0.1);
    assert!(lib.get("attack1").is_some());
    assert!(lib.get("broken").is_none());
}

#[test]
fn pose_library_requires_a_directory() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("does-not-exist");
    assert!(matches!(PoseLibrary::load_dir(&missing), Err(GameError::MissingAsset(_))));
}

// ── Clips ────────────────────────────────────────────────────────────────────

#[test]
fn clip_animator_loops_and_ignores_unknown_clips() {
    let lib = PoseLibrary::procedural();
    let mut skel = Skeleton::humanoid();
    let mut anim = ClipAnimator::new();
    anim.add_clip("skeletonWalk", lib.sequence(&ENEMY_WALK, true).unwrap());

    assert!(!anim.set_clip("dance"));
    assert_eq!(anim.current(), None);
    assert!(anim.set_clip("skeletonWalk"));
    assert!(!anim.update(0.6, &mut skel));
    assert!(anim.update(0.6, &mut skel));
    assert!((anim.progress() - 0.2).abs() < 1e-5);
}

// ── Rig ──────────────────────────────────────────────────────────────────────

#[test]
fn rig_applies_base_pose_on_creation() {
    let rig = rig();
    let lib = PoseLibrary::procedural();
    let skel = rig.skeleton();
    for (name, rotation) in lib.get(BASE_POSE).unwrap() {
        let i = skel.bone_index(name).unwrap();
        assert_eq!(skel.rotation(i), Some(*rotation), "{name}");
    }
    let calf = skel.bone_index(L_CALF).unwrap();
    assert!((skel.rotation(calf).unwrap().x - 0.3).abs() < 1e-6);
}

#[test]
fn walk_progress_runs_both_ways_and_stops_when_idle() {
    let mut rig = rig();
    rig.update(0.25, Vec3::ZERO, 0.0, Some(Stride::Forward));
    assert!((rig.walk_progress().unwrap() - 0.25).abs() < 1e-6);
    rig.update(0.5, Vec3::ZERO, 0.0, Some(Stride::Backward));
    assert!((rig.walk_progress().unwrap() - 0.75).abs() < 1e-6);
    rig.update(0.5, Vec3::ZERO, 0.0, None);
    assert!((rig.walk_progress().unwrap() - 0.75).abs() < 1e-6);
}

#[test]
fn shoot_is_exclusive_until_it_finishes() {
    let mut rig = rig();
    assert!(rig.try_start_shoot());
    assert!(!rig.try_start_shoot());
    for _ in 0..5 {
        rig.update(0.1, Vec3::ZERO, 0.0, None);
    }
    assert!(!rig.is_shooting());
    assert!(rig.try_start_shoot());
}

#[test]
fn shoot_blend_reaches_recoil_at_half_time() {
    let mut rig = rig();
    let lib = PoseLibrary::procedural();
    let recoil = lib.get(RECOIL_POSE).unwrap()[R_UPPERARM];
    let arm = rig.skeleton().bone_index(R_UPPERARM).unwrap();
    let start = rig.skeleton().rotation(arm).unwrap();

    assert!(rig.try_start_shoot());
    rig.update(0.2, Vec3::ZERO, 0.0, None);
    assert!((rig.skeleton().rotation(arm).unwrap().x - recoil.x).abs() < 1e-5);
    rig.update(0.2, Vec3::ZERO, 0.0, None);
    assert!((rig.skeleton().rotation(arm).unwrap().x - start.x).abs() < 1e-5);
    assert!(rig.is_shooting());
}

#[test]
fn ik_request_is_consumed_by_the_next_update() {
    let mut rig = rig();
    assert!(!rig.needs_ik_update());
    rig.set_needs_ik_update();
    assert!(rig.needs_ik_update());
    rig.update(1.0 / 60.0, Vec3::new(0.0, -0.465, 0.0), 0.0, Some(Stride::Forward));
    assert!(!rig.needs_ik_update());
}

#[test]
fn rig_follows_its_root() {
    let mut rig = rig();
    let root = Vec3::new(1.0, -0.465, -1.0);
    rig.update(1.0 / 60.0, root, 0.0, None);
    let hip = rig.skeleton().world_position(0);
    assert!((hip - (root + Vec3::new(0.0, 0.09, 0.0))).length() < 1e-5);
}
