//! The built-in seven-room layout and the models it needs.

use std::f32::consts::{FRAC_PI_2, PI};

use glam::Vec3;

use crate::assets::StaticAssets;
use crate::room::kinds::{FLOWER_MODEL, PETAL_MODEL, ROSE_MODEL};
use crate::room::{Compass, DOOR_MODEL, Door, RoomDescriptor, RoomId, RoomSize, RoomTag};

pub const START_ROOM: RoomId = 4;
pub const PLAYER_MODEL: &str = "models/character.glb";

const ROOM_SIZE: RoomSize = RoomSize { width: 3.0, height: 1.0, depth: 3.0 };
const DOOR_HEIGHT: f32 = -0.17;

fn door(x: f32, z: f32, rotation_y: f32, wall: Compass, target: RoomId) -> Door {
    Door::new(Vec3::new(x, DOOR_HEIGHT, z), rotation_y, target).on_wall(wall)
}

fn room(id: RoomId, kind: RoomTag, connections: &[RoomId], doors: Vec<Door>) -> RoomDescriptor {
    RoomDescriptor { id, kind, size: ROOM_SIZE, position: Vec3::ZERO, connections: connections.to_vec(), doors }
}

/// Rooms 1, 2, 4, 5, 7, 8 and 9. Every room shares the origin; only one is
/// ever active, so they never overlap in the physics world. Door walls
/// follow the door rotation, not the door position.
pub fn default_layout() -> Vec<RoomDescriptor> {
    vec![
        room(1, RoomTag::Trap, &[2], vec![door(-1.5, 0.0, FRAC_PI_2, Compass::East, 2)]),
        room(
            2,
            RoomTag::Petal,
            &[1, 4],
            vec![door(-1.5, 0.0, -FRAC_PI_2, Compass::West, 1), door(0.0, 1.5, 0.0, Compass::North, 4)],
        ),
        room(
            4,
            RoomTag::Hub,
            &[2, 5, 7, 9],
            vec![
                door(1.5, 0.0, FRAC_PI_2, Compass::East, 7),
                door(-1.5, 0.0, -FRAC_PI_2, Compass::West, 5),
                door(0.0, 1.5, 0.0, Compass::North, 2),
                door(0.0, -1.5, PI, Compass::South, 9),
            ],
        ),
        room(5, RoomTag::Combat, &[4], vec![door(-1.5, 0.0, -FRAC_PI_2, Compass::West, 4)]),
        room(
            7,
            RoomTag::Garden,
            &[4, 8],
            vec![door(-1.5, 0.0, -FRAC_PI_2, Compass::West, 8), door(0.0, 1.5, 0.0, Compass::North, 4)],
        ),
        room(
            8,
            RoomTag::Chase,
            &[7, 9],
            vec![door(-1.5, 0.0, FRAC_PI_2, Compass::East, 7), door(0.0, 1.5, 0.0, Compass::North, 9)],
        ),
        room(
            9,
            RoomTag::Lounge,
            &[8, 4],
            vec![door(-1.5, 0.0, FRAC_PI_2, Compass::East, 4), door(0.0, 1.5, PI, Compass::South, 8)],
        ),
    ]
}

/// Every model the default layout requests, each ready one frame after it
/// is first polled.
pub fn asset_manifest() -> StaticAssets {
    let mut assets = StaticAssets::new();
    for path in [DOOR_MODEL, PETAL_MODEL, ROSE_MODEL, FLOWER_MODEL, PLAYER_MODEL] {
        assets.insert(path, 1);
    }
    assets
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::room::RoomManager;

    #[test]
    fn default_layout_is_valid() {
        let layout = default_layout();
        assert_eq!(layout.len(), 7);
        RoomManager::validate(&layout).unwrap();
        assert!(layout.iter().any(|r| r.id == START_ROOM));
    }

    #[test]
    fn explicit_walls_agree_with_rotations() {
        for desc in default_layout() {
            for door in &desc.doors {
                assert_eq!(Compass::from_door_rotation(door.rotation_y, 1e-3), door.wall);
            }
        }
    }
}
