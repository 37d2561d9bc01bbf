pub mod movement;

use glam::Vec3;
use log::{debug, info};

pub use movement::{MovementController, MovementState};

use crate::animation::walk::Stride;
use crate::animation::{AnimationRig, Pose};
use crate::camera::FollowCamera;
use crate::config::GameConfig;
use crate::error::Result;
use crate::geometry::Ray;
use crate::input::{Action, ActionMap, InputState};
use crate::persistence::{self, PoseStore};
use crate::physics::{BodyDesc, BodyHandle, GROUP_ENVIRONMENT, GROUP_PLAYER, GROUP_PROPS, PhysicsWorld};
use crate::room::RoomId;
use crate::scene::{ObjectId, ObjectKind, SceneGraph, SceneObject};

pub const MAX_PETALS: u8 = 3;

/// Player collider half extents.
const BODY_HALF_EXTENTS: Vec3 = Vec3::new(0.03, 0.005, 0.03);
const BODY_MASS: f32 = 5.0;
const BODY_DAMPING: f32 = 0.5;
/// Root displacement that counts as movement for foot IK.
const IK_MOVE_THRESHOLD: f32 = 1.0e-5;

/// A fired shot, tagged with the room it was fired in.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Shot {
    pub ray: Ray,
    pub room: RoomId,
}

/// The player: body + mirrored mesh, movement, animation and progression.
pub struct Character {
    body: BodyHandle,
    object: ObjectId,
    position: Vec3,
    movement: MovementController,
    rig: Option<AnimationRig>,
    hp: i32,
    petals: u8,
    pub holding_flower: bool,
    current_room: Option<RoomId>,
    since_last_shot: f32,
    shoot_cooldown: f32,
    muzzle_drop: f32,
    aiming: bool,
}

impl Character {
    /// Creates the body and the attached player object at the spawn point.
    pub fn spawn(config: &GameConfig, physics: &mut dyn PhysicsWorld, scene: &mut SceneGraph) -> Self {
        let position = config.movement.spawn_position;
        let body = physics.add_body(BodyDesc {
            position,
            half_extents: BODY_HALF_EXTENTS,
            mass: BODY_MASS,
            damping: BODY_DAMPING,
            group: GROUP_PLAYER,
            mask: GROUP_ENVIRONMENT | GROUP_PROPS,
        });
        let object = scene.spawn(SceneObject::new("player", ObjectKind::Player, position), true);
        Self {
            body,
            object,
            position,
            movement: MovementController::new(&config.movement, &config.camera),
            rig: None,
            hp: config.combat.player_hp,
            petals: 0,
            holding_flower: false,
            current_room: None,
            since_last_shot: f32::INFINITY,
            shoot_cooldown: config.combat.shoot_cooldown,
            muzzle_drop: config.combat.muzzle_drop,
            aiming: false,
        }
    }

    pub fn body(&self) -> BodyHandle {
        self.body
    }

    pub fn object(&self) -> ObjectId {
        self.object
    }

    /// Mesh position as of the last sync with the body.
    pub fn position(&self) -> Vec3 {
        self.position
    }

    pub fn movement(&self) -> &MovementController {
        &self.movement
    }

    pub fn movement_mut(&mut self) -> &mut MovementController {
        &mut self.movement
    }

    pub fn attach_rig(&mut self, rig: AnimationRig) {
        self.rig = Some(rig);
    }

    pub fn rig(&self) -> Option<&AnimationRig> {
        self.rig.as_ref()
    }

    pub fn rig_mut(&mut self) -> Option<&mut AnimationRig> {
        self.rig.as_mut()
    }

    pub fn hp(&self) -> i32 {
        self.hp
    }

    pub fn take_damage(&mut self, amount: i32) {
        self.hp -= amount;
    }

    pub fn is_dead(&self) -> bool {
        self.hp <= 0
    }

    pub fn is_aiming(&self) -> bool {
        self.aiming
    }

    pub fn current_room(&self) -> Option<RoomId> {
        self.current_room
    }

    pub fn set_current_room(&mut self, room: RoomId) {
        self.current_room = Some(room);
        info!("character current room set to {room}");
    }

    pub fn petal_count(&self) -> u8 {
        self.petals
    }

    /// Adds a petal unless the player already has all of them. Returns
    /// whether the count changed.
    pub fn add_petal(&mut self) -> bool {
        if self.petals >= MAX_PETALS {
            return false;
        }
        self.petals += 1;
        true
    }

    pub fn has_all_petals_collected(&self) -> bool {
        self.petals >= MAX_PETALS
    }

    /// Moves body and mesh together and stops the body.
    pub fn teleport(&mut self, physics: &mut dyn PhysicsWorld, scene: &mut SceneGraph, position: Vec3) {
        physics.teleport(self.body, position);
        scene.set_position(self.object, position);
        self.position = position;
    }

    /// One frame of player logic. Returns a shot if one was fired.
    pub fn update(
        &mut self,
        dt: f32,
        input: &mut InputState,
        actions: &ActionMap<Action>,
        physics: &mut dyn PhysicsWorld,
        scene: &mut SceneGraph,
        camera: &mut FollowCamera,
    ) -> Option<Shot> {
        let state = self.movement.update(dt, input, actions, physics, self.body);

        let previous = self.position;
        if let Some(position) = physics.position(self.body) {
            self.position = position;
        }
        let yaw = self.movement.yaw();
        if let Some(obj) = scene.get_mut(self.object) {
            obj.position = self.position;
            obj.rotation_y = yaw;
        }
        self.movement.place_camera(self.position, physics, camera);

        if let Some(rig) = self.rig.as_mut() {
            if previous.distance_squared(self.position) > IK_MOVE_THRESHOLD * IK_MOVE_THRESHOLD {
                rig.set_needs_ik_update();
            }
            let stride = match (state.walking, state.forward, state.backward) {
                (false, _, _) => None,
                (true, _, true) => Some(Stride::Backward),
                (true, true, _) => Some(Stride::Forward),
                (true, false, false) => Some(Stride::InPlace),
            };
            rig.update(dt, self.position, yaw, stride);
        }

        self.aiming = actions.is_held(Action::Aim, input);
        camera.set_aiming(self.aiming);
        camera.tick(dt);

        self.since_last_shot += dt;
        if actions.is_held(Action::Shoot, input) {
            return self.try_shoot(camera);
        }
        None
    }

    fn try_shoot(&mut self, camera: &FollowCamera) -> Option<Shot> {
        if self.since_last_shot < self.shoot_cooldown {
            return None;
        }
        let room = self.current_room?;
        let rig = self.rig.as_mut()?;
        if !rig.try_start_shoot() {
            return None;
        }
        self.since_last_shot = 0.0;
        let origin = camera.position - Vec3::new(0.0, self.muzzle_drop, 0.0);
        debug!("shot fired in room {room}");
        Some(Shot { ray: Ray::new(origin, camera.forward()), room })
    }

    /// Stores the rig's current pose under `pose_<name>`.
    pub fn save_pose(&self, store: &mut dyn PoseStore, name: &str) -> Result<Option<Pose>> {
        let Some(rig) = self.rig.as_ref() else {
            debug!("no rig, pose {name} not saved");
            return Ok(None);
        };
        let pose = rig.skeleton().capture_pose();
        persistence::save_pose(store, name, &pose)?;
        info!("pose '{name}' saved");
        Ok(Some(pose))
    }

    /// Applies a stored pose. Returns `false` if nothing was stored or there
    /// is no rig.
    pub fn load_pose(&mut self, store: &dyn PoseStore, name: &str) -> Result<bool> {
        let Some(rig) = self.rig.as_mut() else {
            return Ok(false);
        };
        match persistence::load_pose(store, name)? {
            Some(pose) => {
                let skeleton = rig.skeleton_mut();
                skeleton.apply_pose(&pose);
                skeleton.update_matrices();
                Ok(true)
            }
            None => Ok(false),
        }
    }
}
