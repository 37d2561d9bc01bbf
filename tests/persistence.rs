use std::fs;

use viviel::animation::skeleton::L_CALF;
use viviel::animation::{BoneRotation, Pose};
use viviel::persistence::{self, FilePoseStore, MemoryPoseStore, PoseStore};
use viviel::{Game, GameConfig, GameError};

fn sample_pose() -> Pose {
    let mut pose = Pose::new();
    pose.insert(L_CALF.into(), BoneRotation::new(0.25, -0.5, 1.0));
    pose
}

#[test]
fn memory_store_keeps_poses_by_name() {
    let mut store = MemoryPoseStore::new();
    persistence::save_pose(&mut store, "crouch", &sample_pose()).unwrap();
    assert!(store.get("pose_crouch").unwrap().is_some());
    assert_eq!(persistence::load_pose(&store, "crouch").unwrap(), Some(sample_pose()));
    assert_eq!(persistence::load_pose(&store, "stand").unwrap(), None);
}

#[test]
fn file_store_writes_one_json_file_per_pose() {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path().join("poses");
    let mut store = FilePoseStore::open(&root).unwrap();
    persistence::save_pose(&mut store, "crouch", &sample_pose()).unwrap();

    let text = fs::read_to_string(root.join("pose_crouch.json")).unwrap();
    let parsed: Pose = serde_json::from_str(&text).unwrap();
    assert_eq!(parsed, sample_pose());

    let reopened = FilePoseStore::open(&root).unwrap();
    assert_eq!(persistence::load_pose(&reopened, "crouch").unwrap(), Some(sample_pose()));
    assert_eq!(persistence::load_pose(&reopened, "missing").unwrap(), None);
}

#[test]
fn corrupt_pose_is_an_error() {
    let mut store = MemoryPoseStore::new();
    store.set(&persistence::pose_key("bad"), "{ nope").unwrap();
    assert!(matches!(persistence::load_pose(&store, "bad"), Err(GameError::Json(_))));
}

#[test]
fn character_pose_round_trips_through_a_store() {
    let mut game = Game::headless(GameConfig::default()).unwrap();
    let mut store = MemoryPoseStore::new();
    assert_eq!(game.character().save_pose(&mut store, "early").unwrap(), None);
    assert!(!game.character_mut().load_pose(&store, "early").unwrap());

    for _ in 0..3 {
        game.tick(1.0 / 60.0);
    }
    let calf = {
        let rig = game.character_mut().rig_mut().unwrap();
        let skeleton = rig.skeleton_mut();
        let calf = skeleton.bone_index(L_CALF).unwrap();
        skeleton.set_rotation(calf, BoneRotation::new(1.0, 0.0, 0.0));
        calf
    };
    let saved = game.character().save_pose(&mut store, "kneel").unwrap().unwrap();
    assert_eq!(saved[L_CALF], BoneRotation::new(1.0, 0.0, 0.0));

    game.character_mut().rig_mut().unwrap().skeleton_mut().set_rotation(calf, BoneRotation::new(0.0, 0.0, 0.0));
    assert!(game.character_mut().load_pose(&store, "kneel").unwrap());
    let rotation = game.character().rig().unwrap().skeleton().rotation(calf).unwrap();
    assert_eq!(rotation, BoneRotation::new(1.0, 0.0, 0.0));
    assert!(!game.character_mut().load_pose(&store, "never").unwrap());
}
