use std::f32::consts::{PI, TAU};

use glam::Vec3;
use log::debug;

use crate::physics::{BodyDesc, GROUP_PLAYER, GROUP_PROPS, PhysicsWorld};
use crate::room::RoomShell;
use crate::scene::{ObjectId, ObjectKind, SceneGraph, SceneObject};

const NPC_HALF_EXTENT: f32 = 0.1;

/// A talking pumpkin. Owns one static collider and a dialogue cursor.
#[derive(Clone, Debug)]
pub struct PumpkinNpc {
    object: ObjectId,
    position: Vec3,
    rotation_y: f32,
    dialogues: Vec<String>,
    index: usize,
    talking: bool,
    bpm: f32,
    sway: f32,
}

impl PumpkinNpc {
    pub fn spawn(
        shell: &mut RoomShell,
        physics: &mut dyn PhysicsWorld,
        scene: &mut SceneGraph,
        position: Vec3,
        rotation_y: f32,
        dialogues: &[&str],
        bpm: f32,
    ) -> Self {
        shell.add_body(
            physics,
            BodyDesc::fixed(position, Vec3::splat(NPC_HALF_EXTENT)).with_filter(GROUP_PROPS, GROUP_PLAYER),
        );
        let object = shell.spawn_object(
            scene,
            SceneObject::new("pumpkin", ObjectKind::Npc, position).with_rotation(rotation_y),
        );
        Self {
            object,
            position,
            rotation_y,
            dialogues: dialogues.iter().map(|s| s.to_string()).collect(),
            index: 0,
            talking: false,
            bpm,
            sway: 0.0,
        }
    }

    pub fn position(&self) -> Vec3 {
        self.position
    }

    pub fn is_near(&self, player: Vec3, threshold: f32) -> bool {
        self.position.distance(player) < threshold
    }

    pub fn is_talking(&self) -> bool {
        self.talking
    }

    pub fn dialogue_index(&self) -> usize {
        self.index
    }

    pub fn dialogues(&self) -> &[String] {
        &self.dialogues
    }

    pub fn current_line(&self) -> Option<&str> {
        self.dialogues.get(self.index).map(String::as_str)
    }

    /// Starts from the first line.
    pub fn start_talking(&mut self) -> Option<&str> {
        self.talking = true;
        self.index = 0;
        debug!("pumpkin starts talking");
        self.current_line()
    }

    /// Next line, wrapping to the first after the last.
    pub fn progress_dialogue(&mut self) -> Option<&str> {
        if !self.dialogues.is_empty() {
            self.index = (self.index + 1) % self.dialogues.len();
        }
        self.current_line()
    }

    pub fn stop_talking(&mut self) {
        self.talking = false;
        self.index = 0;
    }

    pub fn set_dialogue(&mut self, lines: Vec<String>) {
        self.dialogues = lines;
        self.index = 0;
    }

    /// Head sway angle of the last update.
    pub fn sway(&self) -> f32 {
        self.sway
    }

    /// Sways on the music beat. `time` is the music clock in seconds.
    pub fn update(&mut self, time: f32, scene: &mut SceneGraph) {
        let beat = (time * self.bpm / 60.0).rem_euclid(1.0);
        self.sway = (beat * TAU).sin() * PI / 8.0;
        if let Some(obj) = scene.get_mut(self.object) {
            obj.rotation_y = self.rotation_y + self.sway;
        }
    }
}
