use glam::Vec3;

// ---------------------------------------------------------------------------
// ObjectId - generational index
// ---------------------------------------------------------------------------

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct ObjectId {
    id: u32,
    generation: u32,
}

impl ObjectId {
    pub fn id(self) -> u32 {
        self.id
    }

    pub fn generation(self) -> u32 {
        self.generation
    }
}

// ---------------------------------------------------------------------------
// SceneObject
// ---------------------------------------------------------------------------

/// What an object stands for. Rendering is external; the tag is enough for a
/// renderer to pick a mesh and for tests to find things.
#[derive(Clone, Debug, PartialEq)]
pub enum ObjectKind {
    Player,
    AmbientLight,
    RoomShell,
    Door,
    Npc,
    Enemy,
    Pickup,
    Prop,
    /// A model produced by an asset load.
    Model(String),
}

#[derive(Clone, Debug, PartialEq)]
pub struct SceneObject {
    pub name: String,
    pub kind: ObjectKind,
    pub position: Vec3,
    pub rotation_y: f32,
    pub scale: Vec3,
    pub visible: bool,
}

impl SceneObject {
    pub fn new(name: impl Into<String>, kind: ObjectKind, position: Vec3) -> Self {
        Self { name: name.into(), kind, position, rotation_y: 0.0, scale: Vec3::ONE, visible: true }
    }

    pub fn with_rotation(mut self, rotation_y: f32) -> Self {
        self.rotation_y = rotation_y;
        self
    }
}

// ---------------------------------------------------------------------------
// SceneGraph
// ---------------------------------------------------------------------------

struct Slot {
    generation: u32,
    object: Option<SceneObject>,
    attached: bool,
}

/// Flat scene graph shared by the player and every room.
///
/// Objects outlive attachment: detaching keeps the object (and its id) alive
/// so a room shell can be re-attached later. Despawning frees the slot and
/// bumps its generation so stale ids stop resolving.
#[derive(Default)]
pub struct SceneGraph {
    slots: Vec<Slot>,
    free: Vec<u32>,
}

impl SceneGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an object; `attached` decides whether it is rendered right away.
    pub fn spawn(&mut self, object: SceneObject, attached: bool) -> ObjectId {
        if let Some(id) = self.free.pop() {
            let slot = &mut self.slots[id as usize];
            slot.object = Some(object);
            slot.attached = attached;
            return ObjectId { id, generation: slot.generation };
        }
        self.slots.push(Slot { generation: 0, object: Some(object), attached });
        ObjectId { id: (self.slots.len() - 1) as u32, generation: 0 }
    }

    fn slot(&self, id: ObjectId) -> Option<&Slot> {
        self.slots
            .get(id.id as usize)
            .filter(|s| s.generation == id.generation && s.object.is_some())
    }

    fn slot_mut(&mut self, id: ObjectId) -> Option<&mut Slot> {
        self.slots
            .get_mut(id.id as usize)
            .filter(|s| s.generation == id.generation && s.object.is_some())
    }

    pub fn contains(&self, id: ObjectId) -> bool {
        self.slot(id).is_some()
    }

    pub fn is_attached(&self, id: ObjectId) -> bool {
        self.slot(id).is_some_and(|s| s.attached)
    }

    /// Returns `false` if the object no longer exists.
    pub fn attach(&mut self, id: ObjectId) -> bool {
        match self.slot_mut(id) {
            Some(slot) => {
                slot.attached = true;
                true
            }
            None => false,
        }
    }

    pub fn detach(&mut self, id: ObjectId) -> bool {
        match self.slot_mut(id) {
            Some(slot) => {
                slot.attached = false;
                true
            }
            None => false,
        }
    }

    pub fn despawn(&mut self, id: ObjectId) -> Option<SceneObject> {
        let slot = self.slot_mut(id)?;
        let object = slot.object.take();
        slot.attached = false;
        slot.generation = slot.generation.wrapping_add(1);
        self.free.push(id.id);
        object
    }

    pub fn get(&self, id: ObjectId) -> Option<&SceneObject> {
        self.slot(id).and_then(|s| s.object.as_ref())
    }

    pub fn get_mut(&mut self, id: ObjectId) -> Option<&mut SceneObject> {
        self.slot_mut(id).and_then(|s| s.object.as_mut())
    }

    pub fn set_position(&mut self, id: ObjectId, position: Vec3) {
        if let Some(obj) = self.get_mut(id) {
            obj.position = position;
        }
    }

    pub fn len(&self) -> usize {
        self.slots.iter().filter(|s| s.object.is_some()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Objects a renderer would draw this frame.
    pub fn attached(&self) -> impl Iterator<Item = (ObjectId, &SceneObject)> + '_ {
        self.slots.iter().enumerate().filter_map(|(i, s)| {
            if !s.attached {
                return None;
            }
            s.object.as_ref().map(|o| (ObjectId { id: i as u32, generation: s.generation }, o))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detach_keeps_object_alive() {
        let mut scene = SceneGraph::new();
        let id = scene.spawn(SceneObject::new("shell", ObjectKind::RoomShell, Vec3::ZERO), false);
        assert!(!scene.is_attached(id));
        assert!(scene.attach(id));
        assert!(scene.detach(id));
        assert!(scene.contains(id));
        assert_eq!(scene.attached().count(), 0);
    }

    #[test]
    fn despawn_invalidates_old_id() {
        let mut scene = SceneGraph::new();
        let old = scene.spawn(SceneObject::new("a", ObjectKind::Prop, Vec3::ZERO), true);
        scene.despawn(old);
        let new = scene.spawn(SceneObject::new("b", ObjectKind::Prop, Vec3::ZERO), true);
        assert_eq!(old.id(), new.id());
        assert!(scene.get(old).is_none());
        assert!(!scene.attach(old));
        assert_eq!(scene.get(new).map(|o| o.name.as_str()), Some("b"));
    }
}
