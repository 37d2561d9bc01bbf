use glam::Vec3;

use crate::physics::{BodyDesc, BodyHandle, GROUP_PLAYER, GROUP_PROPS, PhysicsWorld};
use crate::room::RoomShell;
use crate::scene::{ObjectId, ObjectKind, SceneGraph, SceneObject};

const CHASER_HALF_EXTENT: f32 = 0.1;

/// Hostile pumpkin that steers toward bait when there is any, else the
/// player. Its collider follows the mesh.
#[derive(Clone, Debug)]
pub struct RottenPumpkin {
    object: ObjectId,
    body: BodyHandle,
    position: Vec3,
    speed: f32,
    catch_radius: f32,
}

impl RottenPumpkin {
    pub fn spawn(
        shell: &mut RoomShell,
        physics: &mut dyn PhysicsWorld,
        scene: &mut SceneGraph,
        position: Vec3,
        speed: f32,
        catch_radius: f32,
    ) -> Self {
        let body = shell.add_body(
            physics,
            BodyDesc::fixed(position, Vec3::splat(CHASER_HALF_EXTENT)).with_filter(GROUP_PROPS, GROUP_PLAYER),
        );
        let object = shell.spawn_object(scene, SceneObject::new("rotten pumpkin", ObjectKind::Npc, position));
        Self { object, body, position, speed, catch_radius }
    }

    pub fn position(&self) -> Vec3 {
        self.position
    }

    /// Moves one step toward `bait` or the player. Returns `true` when the
    /// player is caught, which can only happen with no bait on the floor.
    pub fn update(
        &mut self,
        dt: f32,
        player: Vec3,
        bait: Option<Vec3>,
        physics: &mut dyn PhysicsWorld,
        scene: &mut SceneGraph,
    ) -> bool {
        let target = bait.unwrap_or(player);
        let to_target = target - self.position;
        let step = self.speed * dt;
        if to_target.length() <= step {
            self.position = target;
        } else {
            self.position += to_target.normalize_or_zero() * step;
        }

        physics.teleport(self.body, self.position);
        if let Some(obj) = scene.get_mut(self.object) {
            obj.position = self.position;
            if to_target.x != 0.0 || to_target.z != 0.0 {
                obj.rotation_y = to_target.x.atan2(to_target.z);
            }
        }

        bait.is_none() && self.position.distance(player) < self.catch_radius
    }
}
