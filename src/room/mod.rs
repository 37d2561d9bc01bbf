// =============================================================================
// ROOM - level segments and their lifecycle
//
// A room is a descriptor (static data), a shell (scene object plus whatever
// bodies and objects it created while active) and a `RoomKind` carrying the
// per-room state. The `RoomManager` keeps exactly one room active.
// =============================================================================

pub mod kinds;
pub mod manager;
pub mod shell;

use std::f32::consts::{FRAC_PI_2, PI};

use glam::Vec3;
use serde::{Deserialize, Serialize};

pub use kinds::RoomKind;
pub use manager::{ManagerState, RoomManager};
pub use shell::RoomShell;

use crate::actors::PumpkinNpc;
use crate::animation::PoseLibrary;
use crate::assets::{AssetQueue, CompletedLoad, Placement};
use crate::character::Character;
use crate::config::{GameConfig, RoomConfig};
use crate::geometry::{Aabb, Ray, wrap_angle};
use crate::input::{Action, ActionMap, InputState};
use crate::physics::PhysicsWorld;
use crate::scene::{ObjectId, SceneGraph};
use crate::ui::UiState;

pub type RoomId = u32;

pub const DOOR_MODEL: &str = "models/door.glb";
const DOOR_SCALE: f32 = 0.0015;

// ── Compass ───────────────────────────────────────────────────────────────────

/// Room walls. North is +z, east is +x.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Compass {
    North,
    South,
    East,
    West,
}

impl Compass {
    pub const ALL: [Compass; 4] = [Compass::North, Compass::South, Compass::East, Compass::West];

    pub fn opposite(self) -> Self {
        match self {
            Compass::North => Compass::South,
            Compass::South => Compass::North,
            Compass::East => Compass::West,
            Compass::West => Compass::East,
        }
    }

    /// Wall a door with this yaw sits on: 0 → north, π → south, π/2 → east,
    /// −π/2 → west. Anything further than `tolerance` from those is `None`.
    pub fn from_door_rotation(rotation_y: f32, tolerance: f32) -> Option<Self> {
        let angle = wrap_angle(rotation_y);
        [(0.0, Compass::North), (PI, Compass::South), (FRAC_PI_2, Compass::East), (-FRAC_PI_2, Compass::West)]
            .into_iter()
            .find(|(canonical, _)| wrap_angle(angle - canonical).abs() <= tolerance)
            .map(|(_, side)| side)
    }
}

// ── Descriptors ───────────────────────────────────────────────────────────────

#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RoomSize {
    pub width: f32,
    pub height: f32,
    pub depth: f32,
}

impl RoomSize {
    pub fn half_extents(&self) -> Vec3 {
        Vec3::new(self.width, self.height, self.depth) * 0.5
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Door {
    /// Room-local position.
    pub position: Vec3,
    pub rotation_y: f32,
    pub target: RoomId,
    /// Wall the door belongs to. When absent it is derived from the rotation.
    #[serde(default)]
    pub wall: Option<Compass>,
}

impl Door {
    pub fn new(position: Vec3, rotation_y: f32, target: RoomId) -> Self {
        Self { position, rotation_y, target, wall: None }
    }

    pub fn on_wall(mut self, wall: Compass) -> Self {
        self.wall = Some(wall);
        self
    }

    /// Side of the destination room the player arrives on.
    pub fn entry_side(&self, tolerance: f32) -> Option<Compass> {
        self.wall
            .or_else(|| Compass::from_door_rotation(self.rotation_y, tolerance))
            .map(Compass::opposite)
    }
}

/// Which behavior a room runs.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RoomTag {
    /// Gas room: staying too long is fatal.
    Trap,
    /// Petal on a stand and a talking pumpkin.
    Petal,
    /// The rose; completes the game once every petal is back.
    Hub,
    /// Skeletons guarding a petal.
    Combat,
    /// Flower pickup.
    Garden,
    /// Rotten pumpkin chase plus a petal.
    Chase,
    /// Talking pumpkin and props.
    Lounge,
    Plain,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RoomDescriptor {
    pub id: RoomId,
    pub kind: RoomTag,
    pub size: RoomSize,
    pub position: Vec3,
    pub connections: Vec<RoomId>,
    pub doors: Vec<Door>,
}

impl RoomDescriptor {
    pub fn bounds(&self) -> Aabb {
        Aabb::from_center(self.position, self.size.half_extents())
    }

    /// Where the player lands when entering through `side`: `entry_offset`
    /// in from that wall, `entry_height_offset` below the room center.
    pub fn entry_position(&self, side: Compass, config: &RoomConfig) -> Vec3 {
        let half = self.size.half_extents();
        let inset = config.entry_offset;
        let y = self.position.y - config.entry_height_offset;
        let p = self.position;
        match side {
            Compass::North => Vec3::new(p.x, y, p.z + half.z - inset),
            Compass::South => Vec3::new(p.x, y, p.z - half.z + inset),
            Compass::East => Vec3::new(p.x + half.x - inset, y, p.z),
            Compass::West => Vec3::new(p.x - half.x + inset, y, p.z),
        }
    }

    pub fn door_to(&self, target: RoomId) -> Option<&Door> {
        self.doors.iter().find(|d| d.target == target)
    }
}

// ── Behavior ──────────────────────────────────────────────────────────────────

/// Outcome of a room update that the game has to act on.
#[derive(Clone, Debug, PartialEq)]
pub enum RoomSignal {
    None,
    GameOver(String),
    Completed,
}

impl RoomSignal {
    pub fn is_none(&self) -> bool {
        matches!(self, RoomSignal::None)
    }

    /// Keeps the first non-`None` signal.
    pub fn or(self, other: RoomSignal) -> RoomSignal {
        if self.is_none() { other } else { self }
    }
}

/// Everything a room may touch during a frame.
pub struct RoomCtx<'a> {
    pub dt: f32,
    /// Music clock in seconds.
    pub time: f32,
    pub input: &'a InputState,
    pub actions: &'a ActionMap<Action>,
    pub player: &'a mut Character,
    pub physics: &'a mut dyn PhysicsWorld,
    pub scene: &'a mut SceneGraph,
    pub ui: &'a mut UiState,
    pub loads: &'a mut AssetQueue,
    pub config: &'a GameConfig,
    pub poses: &'a PoseLibrary,
}

/// Lifecycle hooks shared by every room kind.
pub trait RoomBehavior {
    /// Spawns bodies and objects. Runs on every activation.
    fn decorate(&mut self, shell: &mut RoomShell, ctx: &mut RoomCtx<'_>);

    fn update(&mut self, _shell: &mut RoomShell, _ctx: &mut RoomCtx<'_>) -> RoomSignal {
        RoomSignal::None
    }

    fn on_shot(&mut self, _shell: &mut RoomShell, _ray: &Ray, _ctx: &mut RoomCtx<'_>) -> RoomSignal {
        RoomSignal::None
    }

    /// A model this room requested arrived and now lives in the scene.
    fn on_model_loaded(&mut self, _name: &str, _object: ObjectId) {}

    fn npcs_mut(&mut self) -> &mut [PumpkinNpc] {
        &mut []
    }

    /// Drops handles to things the shell is about to remove.
    fn teardown(&mut self) {}
}

// ── Room ──────────────────────────────────────────────────────────────────────

pub struct Room {
    descriptor: RoomDescriptor,
    shell: RoomShell,
    kind: RoomKind,
}

impl Room {
    /// Builds the shell, detached from the scene.
    pub fn new(descriptor: RoomDescriptor, scene: &mut SceneGraph) -> Self {
        let shell = RoomShell::new(descriptor.id, descriptor.position, scene);
        let kind = RoomKind::from_tag(descriptor.kind);
        Self { descriptor, shell, kind }
    }

    pub fn id(&self) -> RoomId {
        self.descriptor.id
    }

    pub fn descriptor(&self) -> &RoomDescriptor {
        &self.descriptor
    }

    pub fn shell(&self) -> &RoomShell {
        &self.shell
    }

    pub fn kind(&self) -> &RoomKind {
        &self.kind
    }

    pub fn kind_mut(&mut self) -> &mut RoomKind {
        &mut self.kind
    }

    pub fn is_active(&self) -> bool {
        self.shell.is_active()
    }

    pub fn epoch(&self) -> u64 {
        self.shell.epoch()
    }

    /// Attaches the shell, creates colliders, requests door models and runs
    /// the kind's decoration.
    pub fn activate(&mut self, ctx: &mut RoomCtx<'_>) {
        self.shell.activate(ctx.scene);
        self.shell.create_physics(ctx.physics, &self.descriptor, &ctx.config.rooms);
        for door in &self.descriptor.doors {
            let placement = Placement::at("door", door.position).rotated(door.rotation_y).scaled(DOOR_SCALE);
            self.shell.request_model(ctx.loads, DOOR_MODEL, placement);
        }
        self.kind.behavior_mut().decorate(&mut self.shell, ctx);
    }

    /// Removes everything the room created while active. The shell object
    /// stays alive, detached.
    pub fn deactivate(&mut self, physics: &mut dyn PhysicsWorld, scene: &mut SceneGraph) {
        self.kind.behavior_mut().teardown();
        self.shell.teardown(physics, scene);
    }

    pub fn update(&mut self, ctx: &mut RoomCtx<'_>) -> RoomSignal {
        self.kind.behavior_mut().update(&mut self.shell, ctx)
    }

    pub fn on_shot(&mut self, ray: &Ray, ctx: &mut RoomCtx<'_>) -> RoomSignal {
        self.kind.behavior_mut().on_shot(&mut self.shell, ray, ctx)
    }

    /// Puts a finished load into the scene and tells the kind about it.
    pub fn adopt_model(&mut self, scene: &mut SceneGraph, load: CompletedLoad) {
        let name = load.placement.name.clone();
        let object = self.shell.adopt_model(scene, load);
        self.kind.behavior_mut().on_model_loaded(&name, object);
    }

    pub fn npcs_mut(&mut self) -> &mut [PumpkinNpc] {
        self.kind.behavior_mut().npcs_mut()
    }
}
