use glam::Vec3;
use log::debug;

use super::{RoomDescriptor, RoomId};
use crate::assets::{AssetQueue, CompletedLoad, LoadOwner, Placement};
use crate::config::RoomConfig;
use crate::physics::{BodyDesc, BodyHandle, PhysicsWorld};
use crate::scene::{ObjectId, ObjectKind, SceneGraph, SceneObject};

/// A room's base geometry plus everything it created while active.
///
/// The shell object is spawned once and only attached or detached after
/// that. Bodies and decoration objects are tracked here so teardown can
/// remove all of them, whoever spawned them.
#[derive(Debug)]
pub struct RoomShell {
    room: RoomId,
    object: ObjectId,
    bodies: Vec<BodyHandle>,
    objects: Vec<ObjectId>,
    epoch: u64,
    active: bool,
}

impl RoomShell {
    pub fn new(room: RoomId, position: Vec3, scene: &mut SceneGraph) -> Self {
        let object = scene.spawn(SceneObject::new(format!("room {room}"), ObjectKind::RoomShell, position), false);
        Self { room, object, bodies: Vec::new(), objects: Vec::new(), epoch: 0, active: false }
    }

    pub fn room(&self) -> RoomId {
        self.room
    }

    pub fn object(&self) -> ObjectId {
        self.object
    }

    pub fn epoch(&self) -> u64 {
        self.epoch
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn body_handles(&self) -> &[BodyHandle] {
        &self.bodies
    }

    pub fn objects(&self) -> &[ObjectId] {
        &self.objects
    }

    /// Starts a new epoch and attaches the shell. Loads requested under an
    /// older epoch are stale from here on.
    pub fn activate(&mut self, scene: &mut SceneGraph) -> u64 {
        self.epoch += 1;
        self.active = true;
        scene.attach(self.object);
        self.epoch
    }

    /// Six static boxes: four walls, ceiling and floor, pushed `wall_inset`
    /// outside the room volume.
    pub fn create_physics(&mut self, physics: &mut dyn PhysicsWorld, descriptor: &RoomDescriptor, config: &RoomConfig) {
        let half = descriptor.size.half_extents();
        let t = config.wall_thickness / 2.0;
        let inset = config.wall_inset;
        let surfaces = [
            (Vec3::new(half.x, half.y, t), Vec3::new(0.0, 0.0, half.z + inset)),
            (Vec3::new(half.x, half.y, t), Vec3::new(0.0, 0.0, -half.z - inset)),
            (Vec3::new(t, half.y, half.z), Vec3::new(half.x + inset, 0.0, 0.0)),
            (Vec3::new(t, half.y, half.z), Vec3::new(-half.x - inset, 0.0, 0.0)),
            (Vec3::new(half.x, t, half.z), Vec3::new(0.0, half.y + inset, 0.0)),
            (Vec3::new(half.x, t, half.z), Vec3::new(0.0, -half.y - inset, 0.0)),
        ];
        for (half_extents, offset) in surfaces {
            self.add_body(physics, BodyDesc::fixed(descriptor.position + offset, half_extents));
        }
        debug!("room {} physics created ({} bodies)", self.room, self.bodies.len());
    }

    pub fn add_body(&mut self, physics: &mut dyn PhysicsWorld, desc: BodyDesc) -> BodyHandle {
        let handle = physics.add_body(desc);
        self.bodies.push(handle);
        handle
    }

    pub fn remove_body(&mut self, physics: &mut dyn PhysicsWorld, handle: BodyHandle) -> bool {
        self.bodies.retain(|h| *h != handle);
        physics.remove_body(handle)
    }

    /// Spawns an attached object owned by this room.
    pub fn spawn_object(&mut self, scene: &mut SceneGraph, object: SceneObject) -> ObjectId {
        let id = scene.spawn(object, true);
        self.objects.push(id);
        id
    }

    pub fn despawn_object(&mut self, scene: &mut SceneGraph, id: ObjectId) -> bool {
        self.objects.retain(|o| *o != id);
        scene.despawn(id).is_some()
    }

    /// Queues a model load tagged with the current epoch.
    pub fn request_model(&self, loads: &mut AssetQueue, path: &str, placement: Placement) -> bool {
        loads.request(path, LoadOwner::Room { room: self.room, epoch: self.epoch }, placement)
    }

    /// Spawns the object for a completed load.
    pub fn adopt_model(&mut self, scene: &mut SceneGraph, load: CompletedLoad) -> ObjectId {
        let placement = load.placement;
        let mut object = SceneObject::new(placement.name, ObjectKind::Model(load.model.path), placement.position)
            .with_rotation(placement.rotation_y);
        object.scale = placement.scale;
        self.spawn_object(scene, object)
    }

    /// Removes every body and decoration and detaches the shell.
    pub fn teardown(&mut self, physics: &mut dyn PhysicsWorld, scene: &mut SceneGraph) {
        for handle in self.bodies.drain(..) {
            physics.remove_body(handle);
        }
        for id in self.objects.drain(..) {
            scene.despawn(id);
        }
        scene.detach(self.object);
        self.active = false;
        debug!("room {} torn down", self.room);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::default_layout;
    use crate::physics::RapierWorld;

    #[test]
    fn teardown_removes_everything_but_the_shell() {
        let mut scene = SceneGraph::new();
        let mut physics = RapierWorld::default();
        let descriptor = default_layout().remove(0);
        let mut shell = RoomShell::new(descriptor.id, descriptor.position, &mut scene);
        assert!(!scene.is_attached(shell.object()));

        assert_eq!(shell.activate(&mut scene), 1);
        shell.create_physics(&mut physics, &descriptor, &RoomConfig::default());
        shell.spawn_object(&mut scene, SceneObject::new("prop", ObjectKind::Prop, Vec3::ZERO));
        assert_eq!(physics.body_count(), 6);

        shell.teardown(&mut physics, &mut scene);
        assert_eq!(physics.body_count(), 0);
        assert_eq!(scene.len(), 1);
        assert!(scene.contains(shell.object()));
        assert!(!scene.is_attached(shell.object()));
        assert_eq!(shell.activate(&mut scene), 2);
    }

    #[test]
    fn floor_top_sits_below_room_center() {
        let mut scene = SceneGraph::new();
        let mut physics = RapierWorld::default();
        let descriptor = default_layout().remove(0);
        let mut shell = RoomShell::new(descriptor.id, descriptor.position, &mut scene);
        let config = RoomConfig::default();
        shell.create_physics(&mut physics, &descriptor, &config);
        let floor = physics.position(shell.body_handles()[5]).unwrap();
        assert!((floor.y + config.wall_thickness / 2.0 - (-0.47)).abs() < 1e-5);
    }
}
