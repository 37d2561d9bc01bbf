use std::collections::{BTreeMap, HashSet};

use log::{debug, error, info};

use super::{Room, RoomCtx, RoomDescriptor, RoomId, RoomSignal};
use crate::assets::{CompletedLoad, LoadOwner};
use crate::character::Shot;
use crate::config::RoomConfig;
use crate::error::{GameError, Result};
use crate::input::Action;
use crate::scene::{ObjectId, SceneGraph};

const DOOR_PROMPT: &str = "press P to enter the next room";
const TALK_PROMPT: &str = "Press T to talk to the pumpkin";

/// Externally visible manager state. A transition is atomic: there is no
/// loading state in between.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ManagerState {
    NoActiveRoom,
    RoomActive(RoomId),
}

/// Owns every room and keeps exactly one of them active.
pub struct RoomManager {
    rooms: BTreeMap<RoomId, Room>,
    current: Option<RoomId>,
    start_room: RoomId,
    ambient_light: Option<ObjectId>,
}

impl RoomManager {
    pub fn new(start_room: RoomId) -> Self {
        Self { rooms: BTreeMap::new(), current: None, start_room, ambient_light: None }
    }

    /// Light re-attached on every transition if something detached it.
    pub fn set_ambient_light(&mut self, light: ObjectId) {
        self.ambient_light = Some(light);
    }

    pub fn state(&self) -> ManagerState {
        match self.current {
            Some(id) => ManagerState::RoomActive(id),
            None => ManagerState::NoActiveRoom,
        }
    }

    pub fn current_room_id(&self) -> Option<RoomId> {
        self.current
    }

    pub fn room(&self, id: RoomId) -> Option<&Room> {
        self.rooms.get(&id)
    }

    pub fn room_mut(&mut self, id: RoomId) -> Option<&mut Room> {
        self.rooms.get_mut(&id)
    }

    pub fn active_room(&self) -> Option<&Room> {
        self.current.and_then(|id| self.rooms.get(&id))
    }

    pub fn active_room_mut(&mut self) -> Option<&mut Room> {
        self.current.and_then(|id| self.rooms.get_mut(&id))
    }

    pub fn room_ids(&self) -> impl Iterator<Item = RoomId> + '_ {
        self.rooms.keys().copied()
    }

    pub fn len(&self) -> usize {
        self.rooms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rooms.is_empty()
    }

    /// Rejects layouts with duplicate ids, doors into unknown rooms, or
    /// connections that have no door.
    pub fn validate(descriptors: &[RoomDescriptor]) -> Result<()> {
        let mut ids = HashSet::new();
        for desc in descriptors {
            if !ids.insert(desc.id) {
                return Err(GameError::DuplicateRoom(desc.id));
            }
        }
        for desc in descriptors {
            if let Some(door) = desc.doors.iter().find(|d| !ids.contains(&d.target)) {
                return Err(GameError::UnknownRoom(door.target));
            }
            if let Some(missing) = desc.connections.iter().find(|c| desc.door_to(**c).is_none()) {
                return Err(GameError::Config(format!("room {} lists connection {missing} without a door", desc.id)));
            }
        }
        Ok(())
    }

    /// Rejects rooms too small for the configured entry point: every side's
    /// entry must land strictly inside the room.
    pub fn validate_entries(descriptors: &[RoomDescriptor], config: &RoomConfig) -> Result<()> {
        for desc in descriptors {
            let half = desc.size.half_extents();
            let reach = half.x.min(half.z);
            if config.entry_offset <= 0.0 || config.entry_offset >= reach {
                return Err(GameError::Config(format!(
                    "rooms.entry_offset {} must lie in (0, {reach}) for room {}",
                    config.entry_offset, desc.id
                )));
            }
            if config.entry_height_offset.abs() >= half.y {
                return Err(GameError::Config(format!(
                    "rooms.entry_height_offset {} leaves room {} vertically",
                    config.entry_height_offset, desc.id
                )));
            }
        }
        Ok(())
    }

    /// Builds every room shell, then activates the start room.
    pub fn create_rooms(&mut self, descriptors: Vec<RoomDescriptor>, ctx: &mut RoomCtx<'_>) -> Result<()> {
        Self::validate(&descriptors)?;
        Self::validate_entries(&descriptors, &ctx.config.rooms)?;
        for desc in descriptors {
            if self.rooms.contains_key(&desc.id) {
                return Err(GameError::DuplicateRoom(desc.id));
            }
            let room = Room::new(desc, ctx.scene);
            self.rooms.insert(room.id(), room);
        }
        info!("created {} rooms", self.rooms.len());
        self.set_current_room(self.start_room, ctx)
    }

    /// Deactivates the current room (if any) and activates `id`. Unknown ids
    /// leave everything untouched.
    pub fn set_current_room(&mut self, id: RoomId, ctx: &mut RoomCtx<'_>) -> Result<()> {
        if !self.rooms.contains_key(&id) {
            error!("room {id} not found");
            return Err(GameError::UnknownRoom(id));
        }
        info!("transitioning to room {id}");

        if let Some(old) = self.current.take().and_then(|c| self.rooms.get_mut(&c)) {
            old.deactivate(ctx.physics, ctx.scene);
        }
        ctx.ui.hide_dialogue();

        let Some(room) = self.rooms.get_mut(&id) else {
            return Err(GameError::UnknownRoom(id));
        };
        room.activate(ctx);

        let player = ctx.player.object();
        if !ctx.scene.is_attached(player) {
            ctx.scene.attach(player);
        }
        if let Some(light) = self.ambient_light {
            if !ctx.scene.is_attached(light) {
                ctx.scene.attach(light);
            }
        }
        ctx.player.set_current_room(id);
        self.current = Some(id);
        info!("transition to room {id} complete");
        Ok(())
    }

    /// Prompts near a door; on the confirm edge moves the player to the
    /// destination's entry point and switches rooms. Returns the room entered.
    pub fn check_room_transition(&mut self, ctx: &mut RoomCtx<'_>) -> Result<Option<RoomId>> {
        let Some(current) = self.active_room() else {
            return Ok(None);
        };
        let player = ctx.player.position();
        let threshold = ctx.config.rooms.door_threshold;
        let origin = current.descriptor().position;
        let near = current
            .descriptor()
            .doors
            .iter()
            .find(|d| (origin + d.position).distance(player) < threshold)
            .cloned();
        let current_id = current.id();

        let Some(door) = near else {
            ctx.ui.clear_message();
            return Ok(None);
        };
        ctx.ui.show_message(DOOR_PROMPT);
        if !ctx.actions.is_pressed(Action::EnterDoor, ctx.input) {
            return Ok(None);
        }

        let Some(target) = self.rooms.get(&door.target) else {
            error!("door in room {current_id} leads to unknown room {}", door.target);
            return Err(GameError::UnknownRoom(door.target));
        };
        let Some(side) = door.entry_side(ctx.config.rooms.door_angle_tolerance) else {
            error!("door in room {current_id} to room {} has rotation {}", door.target, door.rotation_y);
            return Err(GameError::NoDoorOrientation { room: current_id, target: door.target });
        };
        let entry = target.descriptor().entry_position(side, &ctx.config.rooms);

        info!("player transitioning from room {current_id} to room {}", door.target);
        ctx.player.teleport(ctx.physics, ctx.scene, entry);
        self.set_current_room(door.target, ctx)?;
        Ok(Some(door.target))
    }

    /// Talk prompt and dialogue stepping for the active room's pumpkins.
    pub fn check_npc_interaction(&mut self, ctx: &mut RoomCtx<'_>) {
        let player = ctx.player.position();
        let threshold = ctx.config.rooms.npc_threshold;
        let talk = ctx.actions.is_pressed(Action::Talk, ctx.input);
        let Some(room) = self.active_room_mut() else {
            return;
        };
        for npc in room.npcs_mut() {
            if npc.is_near(player, threshold) {
                ctx.ui.show_message(TALK_PROMPT);
                if talk {
                    let line = if npc.is_talking() { npc.progress_dialogue() } else { npc.start_talking() };
                    if let Some(line) = line {
                        ctx.ui.show_dialogue(line);
                    }
                }
            } else if npc.is_talking() {
                npc.stop_talking();
                ctx.ui.hide_dialogue();
            }
        }
    }

    pub fn update(&mut self, ctx: &mut RoomCtx<'_>) -> RoomSignal {
        match self.active_room_mut() {
            Some(room) => room.update(ctx),
            None => RoomSignal::None,
        }
    }

    /// Hands a shot to the active room, and only if it was fired there.
    pub fn dispatch_shot(&mut self, shot: &Shot, ctx: &mut RoomCtx<'_>) -> RoomSignal {
        if self.current != Some(shot.room) {
            debug!("ignoring shot fired in room {}", shot.room);
            return RoomSignal::None;
        }
        match self.active_room_mut() {
            Some(room) => room.on_shot(&shot.ray, ctx),
            None => RoomSignal::None,
        }
    }

    /// Gives room loads to their rooms, dropping those whose room epoch has
    /// moved on. Loads owned by someone else are handed back.
    pub fn route_loads(&mut self, loads: Vec<CompletedLoad>, scene: &mut SceneGraph) -> Vec<CompletedLoad> {
        let mut others = Vec::new();
        for load in loads {
            let LoadOwner::Room { room, epoch } = load.owner else {
                others.push(load);
                continue;
            };
            match self.rooms.get_mut(&room) {
                Some(r) if r.is_active() && r.epoch() == epoch => r.adopt_model(scene, load),
                _ => debug!("discarding stale load {} for room {room} (epoch {epoch})", load.model.path),
            }
        }
        others
    }
}
