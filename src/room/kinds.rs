use std::f32::consts::{FRAC_PI_2, PI};

use glam::Vec3;
use log::{debug, info};

use super::{RoomBehavior, RoomCtx, RoomShell, RoomSignal, RoomTag};
use crate::actors::{EnemySkeleton, PumpkinNpc, RottenPumpkin};
use crate::assets::Placement;
use crate::character::MAX_PETALS;
use crate::geometry::Ray;
use crate::input::Action;
use crate::physics::BodyDesc;
use crate::scene::{ObjectId, ObjectKind, SceneGraph, SceneObject};

pub const PETAL_MODEL: &str = "models/petal_flower_rose/scene.gltf";
pub const ROSE_MODEL: &str = "models/black_rose.glb";
pub const FLOWER_MODEL: &str = "models/generic_narcissus_flower/scene.gltf";

/// Seconds a pickup or reward message stays up.
const MESSAGE_HOLD: f32 = 2.0;
const COMBAT_INTRO_HOLD: f32 = 2.5;

pub const TRAP_GAME_OVER: &str = "GAME OVER. \n You died in the gas. \n Do not trust all pumpkins";
pub const COMBAT_GAME_OVER: &str = "GAME OVER. \n beware of the undeads";
pub const CHASE_GAME_OVER: &str = "GAME OVER. \n The rotten pumpkin caught you!";

const PETAL_PROMPT: &str = "Press E to pick up the petal";
const PETAL_PICKED: &str = "You picked up the petal!";
const ROSE_PROMPT: &str = "Press E to complete the game";
const ROSE_LOCKED: &str = "You need to collect all petals first";
const COMBAT_INTRO: &str = "Help the pumpkin, kill the skeletons";
const COMBAT_REWARD: &str = "All skeletons killed! The pumpkin rewards you with a petal.";
const FLOWER_PROMPT: &str = "Press E to pick up the flower";
const FLOWER_PICKED: &str = "You picked up the flower!";
const DROP_PROMPT: &str = "Press F to drop the flower";
const FLOWER_DROPPED: &str = "You dropped the flower!";

const PETAL_ROOM_LINES: [&str; 5] = [
    "Welcome to Room 2... You're not lost, are you?",
    "May you check the next room for me?",
    "... I know there are two petals in there ...",
    "I can't go there, but you can help me, right?",
    "Good luck... eheheh",
];
const HUB_LINES: [&str; 5] = [
    "Welcome to Room 4! I'm the guardian pumpkin.",
    "Did you know that the rose in this room is special?",
    "It would be nice if you could help us pumpkins rescue all its petals.",
    "When you have all the petals, bring them to the rose.",
    "Explore other rooms, but beware, some pumpkins are rotten by the radiations.",
];
const COMBAT_LINES: [&str; 4] = [
    "Help me! Please kill the skeletons!",
    "Be careful, they're dangerous!",
    "You're our only hope to defeat them.",
    "Thank you for your bravery!",
];
const COMBAT_REWARD_LINE: &str = "Thank you for defeating the skeletons! Here's a petal for your bravery.";
const GARDEN_LINES: [&str; 1] = ["test"];
const LOUNGE_LINES: [&str; 6] = [
    "Beware next door! There is a rotten pumpkin",
    "If you find the yellow flowers, you can go beyond, but be careful",
    "rotten pumpkins are dangerous",
    "they can calm down only with flowers",
    "We all pumpkins like flowers, but they...",
    "... they are obsessed with them",
];

/// Pumpkin spot shared by most rooms, against the west wall.
const WEST_NPC: Vec3 = Vec3::new(-0.99, -0.45, 0.5);
const SKELETON_SPAWNS: [Vec3; 4] = [
    Vec3::new(-1.0, 0.0, 1.0),
    Vec3::new(-1.2, 0.0, 1.0),
    Vec3::new(-1.0, 0.0, -1.0),
    Vec3::new(-1.0, 0.0, -1.2),
];

// ── Shared helpers ────────────────────────────────────────────────────────────

/// A single-use pickup whose model arrives asynchronously. It can only be
/// taken once the model is in the scene, and never twice.
#[derive(Clone, Debug)]
struct Pickup {
    name: &'static str,
    path: &'static str,
    position: Vec3,
    scale: f32,
    object: Option<ObjectId>,
    taken: bool,
}

impl Pickup {
    const fn new(name: &'static str, path: &'static str, position: Vec3, scale: f32) -> Self {
        Self { name, path, position, scale, object: None, taken: false }
    }

    fn request(&mut self, shell: &RoomShell, ctx: &mut RoomCtx<'_>) {
        self.object = None;
        if !self.taken {
            shell.request_model(ctx.loads, self.path, Placement::at(self.name, self.position).scaled(self.scale));
        }
    }

    fn adopt(&mut self, name: &str, object: ObjectId) -> bool {
        if name != self.name || self.taken {
            return false;
        }
        self.object = Some(object);
        true
    }

    fn is_within(&self, point: Vec3, radius: f32) -> bool {
        self.object.is_some() && self.position.distance(point) < radius
    }

    fn take(&mut self, shell: &mut RoomShell, scene: &mut SceneGraph) -> bool {
        match self.object.take() {
            Some(id) => {
                shell.despawn_object(scene, id);
                self.taken = true;
                true
            }
            None => false,
        }
    }
}

/// Static collider plus a placeholder object.
fn spawn_prop(shell: &mut RoomShell, ctx: &mut RoomCtx<'_>, name: &str, position: Vec3, half_extents: Vec3) {
    shell.add_body(ctx.physics, BodyDesc::fixed(position, half_extents));
    shell.spawn_object(ctx.scene, SceneObject::new(name, ObjectKind::Prop, position));
}

fn spawn_npc(shell: &mut RoomShell, ctx: &mut RoomCtx<'_>, position: Vec3, rotation_y: f32, lines: &[&str]) -> PumpkinNpc {
    PumpkinNpc::spawn(shell, ctx.physics, ctx.scene, position, rotation_y, lines, ctx.config.rooms.npc_bpm)
}

fn sway_npcs(npcs: &mut [PumpkinNpc], ctx: &mut RoomCtx<'_>) {
    for npc in npcs {
        npc.update(ctx.time, ctx.scene);
    }
}

fn petal_pickup(petal: &mut Pickup, shell: &mut RoomShell, ctx: &mut RoomCtx<'_>) {
    if !petal.is_within(ctx.player.position(), ctx.config.rooms.petal_pickup_radius) {
        return;
    }
    ctx.ui.show_message(PETAL_PROMPT);
    if ctx.actions.is_pressed(Action::Interact, ctx.input) && petal.take(shell, ctx.scene) {
        ctx.player.add_petal();
        ctx.ui.set_petals(ctx.player.petal_count());
        ctx.ui.flash(PETAL_PICKED, MESSAGE_HOLD);
        info!("petal picked up in room {} ({} / {MAX_PETALS})", shell.room(), ctx.player.petal_count());
    }
}

// ── Trap ──────────────────────────────────────────────────────────────────────

#[derive(Clone, Debug, Default)]
pub struct TrapRoom {
    elapsed: f32,
    triggered: bool,
}

impl TrapRoom {
    pub fn elapsed(&self) -> f32 {
        self.elapsed
    }
}

impl RoomBehavior for TrapRoom {
    fn decorate(&mut self, _shell: &mut RoomShell, _ctx: &mut RoomCtx<'_>) {
        self.elapsed = 0.0;
        self.triggered = false;
    }

    fn update(&mut self, _shell: &mut RoomShell, ctx: &mut RoomCtx<'_>) -> RoomSignal {
        self.elapsed += ctx.dt;
        if self.elapsed > ctx.config.rooms.trap_duration && !self.triggered {
            self.triggered = true;
            info!("gas trap triggered after {:.2}s", self.elapsed);
            return RoomSignal::GameOver(TRAP_GAME_OVER.into());
        }
        RoomSignal::None
    }
}

// ── Petal ─────────────────────────────────────────────────────────────────────

#[derive(Clone, Debug)]
pub struct PetalRoom {
    petal: Pickup,
    npcs: Vec<PumpkinNpc>,
}

impl Default for PetalRoom {
    fn default() -> Self {
        Self { petal: Pickup::new("petal", PETAL_MODEL, Vec3::new(0.5, -0.35, 0.5), 0.01), npcs: Vec::new() }
    }
}

impl PetalRoom {
    pub fn is_petal_collected(&self) -> bool {
        self.petal.taken
    }

    pub fn petal_position(&self) -> Vec3 {
        self.petal.position
    }
}

impl RoomBehavior for PetalRoom {
    fn decorate(&mut self, shell: &mut RoomShell, ctx: &mut RoomCtx<'_>) {
        spawn_prop(shell, ctx, "stand", Vec3::new(0.5, -0.5, 0.5), Vec3::new(0.05, 0.1, 0.05));
        spawn_prop(shell, ctx, "boxes", Vec3::new(0.9, -0.5, 1.2), Vec3::new(0.3, 0.15, 0.25));
        self.npcs = vec![spawn_npc(shell, ctx, WEST_NPC, FRAC_PI_2, &PETAL_ROOM_LINES)];
        self.petal.request(shell, ctx);
    }

    fn update(&mut self, shell: &mut RoomShell, ctx: &mut RoomCtx<'_>) -> RoomSignal {
        sway_npcs(&mut self.npcs, ctx);
        petal_pickup(&mut self.petal, shell, ctx);
        RoomSignal::None
    }

    fn on_model_loaded(&mut self, name: &str, object: ObjectId) {
        self.petal.adopt(name, object);
    }

    fn npcs_mut(&mut self) -> &mut [PumpkinNpc] {
        &mut self.npcs
    }

    fn teardown(&mut self) {
        self.npcs.clear();
        self.petal.object = None;
    }
}

// ── Hub ───────────────────────────────────────────────────────────────────────

const ROSE_POSITION: Vec3 = Vec3::new(0.0, -0.35, 0.0);

#[derive(Clone, Debug, Default)]
pub struct HubRoom {
    rose: Option<ObjectId>,
    completed: bool,
    npcs: Vec<PumpkinNpc>,
}

impl HubRoom {
    pub fn is_completed(&self) -> bool {
        self.completed
    }

    pub fn rose_position(&self) -> Vec3 {
        ROSE_POSITION
    }

    pub fn is_rose_loaded(&self) -> bool {
        self.rose.is_some()
    }
}

impl RoomBehavior for HubRoom {
    fn decorate(&mut self, shell: &mut RoomShell, ctx: &mut RoomCtx<'_>) {
        spawn_prop(shell, ctx, "pedestal", Vec3::new(0.0, -0.27, 0.0), Vec3::new(0.1, 0.25, 0.1));
        self.npcs = vec![spawn_npc(shell, ctx, Vec3::new(0.8, -0.45, 0.935), PI, &HUB_LINES)];
        let placement = Placement::at("rose", ROSE_POSITION);
        shell.request_model(ctx.loads, ROSE_MODEL, placement);
    }

    fn update(&mut self, _shell: &mut RoomShell, ctx: &mut RoomCtx<'_>) -> RoomSignal {
        sway_npcs(&mut self.npcs, ctx);
        if self.rose.is_none() || self.completed {
            return RoomSignal::None;
        }
        if ctx.player.position().distance(ROSE_POSITION) >= ctx.config.rooms.rose_radius {
            return RoomSignal::None;
        }
        if !ctx.player.has_all_petals_collected() {
            ctx.ui.show_message(ROSE_LOCKED);
            return RoomSignal::None;
        }
        ctx.ui.show_message(ROSE_PROMPT);
        if ctx.actions.is_pressed(Action::Interact, ctx.input) {
            self.completed = true;
            info!("rose restored, game completed");
            return RoomSignal::Completed;
        }
        RoomSignal::None
    }

    fn on_model_loaded(&mut self, name: &str, object: ObjectId) {
        if name == "rose" {
            self.rose = Some(object);
        }
    }

    fn npcs_mut(&mut self) -> &mut [PumpkinNpc] {
        &mut self.npcs
    }

    fn teardown(&mut self) {
        self.npcs.clear();
        self.rose = None;
    }
}

// ── Combat ────────────────────────────────────────────────────────────────────

#[derive(Clone, Debug, Default)]
pub struct CombatRoom {
    enemies: Vec<EnemySkeleton>,
    rewarded: bool,
    petal: Option<ObjectId>,
    npcs: Vec<PumpkinNpc>,
}

impl CombatRoom {
    pub fn enemies(&self) -> &[EnemySkeleton] {
        &self.enemies
    }

    pub fn is_rewarded(&self) -> bool {
        self.rewarded
    }

    pub fn petal(&self) -> Option<ObjectId> {
        self.petal
    }

    /// Grants the petal once every skeleton is gone. Returns `true` only on
    /// the call that actually granted it.
    pub fn check_all_defeated(&mut self, ctx: &mut RoomCtx<'_>) -> bool {
        if !self.enemies.is_empty() || self.rewarded {
            return false;
        }
        self.rewarded = true;
        ctx.ui.flash(COMBAT_REWARD, MESSAGE_HOLD);
        if ctx.player.petal_count() < MAX_PETALS {
            ctx.player.add_petal();
            ctx.ui.set_petals(ctx.player.petal_count());
        }
        for npc in &mut self.npcs {
            npc.set_dialogue(vec![COMBAT_REWARD_LINE.to_string()]);
        }
        self.hide_petal(ctx.scene);
        info!("all skeletons defeated, petal granted");
        true
    }

    fn hide_petal(&self, scene: &mut SceneGraph) {
        if let Some(obj) = self.petal.and_then(|id| scene.get_mut(id)) {
            obj.visible = false;
        }
    }
}

impl RoomBehavior for CombatRoom {
    fn decorate(&mut self, shell: &mut RoomShell, ctx: &mut RoomCtx<'_>) {
        spawn_prop(shell, ctx, "stand", Vec3::new(-0.5, -0.5, -0.5), Vec3::new(0.05, 0.1, 0.05));
        let placement = Placement::at("petal", Vec3::new(-0.5, -0.35, -0.5)).scaled(0.01);
        shell.request_model(ctx.loads, PETAL_MODEL, placement);

        if self.rewarded {
            self.npcs = vec![spawn_npc(shell, ctx, WEST_NPC, FRAC_PI_2, &[COMBAT_REWARD_LINE])];
            return;
        }
        self.npcs = vec![spawn_npc(shell, ctx, WEST_NPC, FRAC_PI_2, &COMBAT_LINES)];
        self.enemies.clear();
        for position in SKELETON_SPAWNS {
            let enemy = EnemySkeleton::spawn(shell, ctx.physics, ctx.scene, position, ctx.poses, &ctx.config.combat);
            self.enemies.push(enemy);
        }
        ctx.ui.flash(COMBAT_INTRO, COMBAT_INTRO_HOLD);
    }

    fn update(&mut self, _shell: &mut RoomShell, ctx: &mut RoomCtx<'_>) -> RoomSignal {
        sway_npcs(&mut self.npcs, ctx);
        if self.rewarded {
            self.hide_petal(ctx.scene);
        }
        let player = ctx.player.position();
        for enemy in &mut self.enemies {
            enemy.update(ctx.dt, player, ctx.physics, ctx.scene);
        }
        if self.enemies.iter().any(|e| e.is_hitting(player)) {
            ctx.player.take_damage(1);
            if ctx.player.is_dead() {
                info!("player killed by skeletons");
                return RoomSignal::GameOver(COMBAT_GAME_OVER.into());
            }
        }
        RoomSignal::None
    }

    fn on_shot(&mut self, shell: &mut RoomShell, ray: &Ray, ctx: &mut RoomCtx<'_>) -> RoomSignal {
        let mut hit_any = false;
        let mut i = 0;
        while i < self.enemies.len() {
            if ray.intersect_sphere(self.enemies[i].hit_sphere()).is_none() {
                i += 1;
                continue;
            }
            hit_any = true;
            if self.enemies[i].take_damage(1) {
                let dead = self.enemies.remove(i);
                dead.despawn(shell, ctx.physics, ctx.scene);
            } else {
                i += 1;
            }
        }
        if !hit_any {
            debug!("shot missed");
        }
        self.check_all_defeated(ctx);
        RoomSignal::None
    }

    fn on_model_loaded(&mut self, name: &str, object: ObjectId) {
        if name == "petal" {
            self.petal = Some(object);
        }
    }

    fn npcs_mut(&mut self) -> &mut [PumpkinNpc] {
        &mut self.npcs
    }

    fn teardown(&mut self) {
        self.enemies.clear();
        self.npcs.clear();
        self.petal = None;
    }
}

// ── Garden ────────────────────────────────────────────────────────────────────

#[derive(Clone, Debug)]
pub struct GardenRoom {
    flower: Pickup,
    npcs: Vec<PumpkinNpc>,
}

impl Default for GardenRoom {
    fn default() -> Self {
        Self { flower: Pickup::new("flower", FLOWER_MODEL, Vec3::new(0.5, -0.42, 1.0), 0.01), npcs: Vec::new() }
    }
}

impl GardenRoom {
    pub fn is_flower_picked(&self) -> bool {
        self.flower.taken
    }

    pub fn flower_position(&self) -> Vec3 {
        self.flower.position
    }
}

impl RoomBehavior for GardenRoom {
    fn decorate(&mut self, shell: &mut RoomShell, ctx: &mut RoomCtx<'_>) {
        self.npcs = vec![spawn_npc(shell, ctx, WEST_NPC, FRAC_PI_2, &GARDEN_LINES)];
        self.flower.request(shell, ctx);
    }

    fn update(&mut self, shell: &mut RoomShell, ctx: &mut RoomCtx<'_>) -> RoomSignal {
        sway_npcs(&mut self.npcs, ctx);
        if !self.flower.is_within(ctx.player.position(), ctx.config.rooms.flower_pickup_radius) {
            return RoomSignal::None;
        }
        ctx.ui.show_message(FLOWER_PROMPT);
        if ctx.actions.is_pressed(Action::Interact, ctx.input) && self.flower.take(shell, ctx.scene) {
            ctx.player.holding_flower = true;
            ctx.ui.flash(FLOWER_PICKED, MESSAGE_HOLD);
            info!("flower picked up");
        }
        RoomSignal::None
    }

    fn on_model_loaded(&mut self, name: &str, object: ObjectId) {
        self.flower.adopt(name, object);
    }

    fn npcs_mut(&mut self) -> &mut [PumpkinNpc] {
        &mut self.npcs
    }

    fn teardown(&mut self) {
        self.npcs.clear();
        self.flower.object = None;
    }
}

// ── Chase ─────────────────────────────────────────────────────────────────────

const CHASER_SPAWN: Vec3 = Vec3::new(0.0, -0.1, -1.1);

#[derive(Clone, Debug)]
pub struct ChaseRoom {
    petal: Pickup,
    chaser: Option<RottenPumpkin>,
    bait: Option<Vec3>,
    last_player: Option<Vec3>,
}

impl Default for ChaseRoom {
    fn default() -> Self {
        Self {
            petal: Pickup::new("petal", PETAL_MODEL, Vec3::new(0.5, -0.35, 0.5), 0.01),
            chaser: None,
            bait: None,
            last_player: None,
        }
    }
}

impl ChaseRoom {
    pub fn chaser(&self) -> Option<&RottenPumpkin> {
        self.chaser.as_ref()
    }

    pub fn bait(&self) -> Option<Vec3> {
        self.bait
    }

    pub fn is_petal_collected(&self) -> bool {
        self.petal.taken
    }

    pub fn petal_position(&self) -> Vec3 {
        self.petal.position
    }
}

impl RoomBehavior for ChaseRoom {
    fn decorate(&mut self, shell: &mut RoomShell, ctx: &mut RoomCtx<'_>) {
        spawn_prop(shell, ctx, "stand", Vec3::new(0.5, -0.5, 0.5), Vec3::new(0.05, 0.1, 0.05));
        self.petal.request(shell, ctx);
        self.chaser = Some(RottenPumpkin::spawn(
            shell,
            ctx.physics,
            ctx.scene,
            CHASER_SPAWN,
            ctx.config.rooms.chaser_speed,
            ctx.config.rooms.chaser_catch_radius,
        ));
        self.bait = None;
        self.last_player = None;
    }

    fn update(&mut self, shell: &mut RoomShell, ctx: &mut RoomCtx<'_>) -> RoomSignal {
        let player = ctx.player.position();
        let caught = match self.chaser.as_mut() {
            Some(chaser) => chaser.update(ctx.dt, player, self.bait, ctx.physics, ctx.scene),
            None => false,
        };

        if ctx.player.holding_flower {
            ctx.ui.show_message(DROP_PROMPT);
            if ctx.actions.is_pressed(Action::DropItem, ctx.input) {
                let spot = self.last_player.unwrap_or(player);
                shell.spawn_object(ctx.scene, SceneObject::new("flower", ObjectKind::Pickup, spot));
                self.bait = Some(spot);
                ctx.player.holding_flower = false;
                ctx.ui.flash(FLOWER_DROPPED, MESSAGE_HOLD);
                info!("flower dropped as bait at {spot}");
            }
        }
        self.last_player = Some(player);

        petal_pickup(&mut self.petal, shell, ctx);

        if caught {
            info!("player caught by the rotten pumpkin");
            return RoomSignal::GameOver(CHASE_GAME_OVER.into());
        }
        RoomSignal::None
    }

    fn on_model_loaded(&mut self, name: &str, object: ObjectId) {
        self.petal.adopt(name, object);
    }

    fn teardown(&mut self) {
        self.chaser = None;
        self.bait = None;
        self.petal.object = None;
    }
}

// ── Lounge ────────────────────────────────────────────────────────────────────

#[derive(Clone, Debug, Default)]
pub struct LoungeRoom {
    npcs: Vec<PumpkinNpc>,
}

impl RoomBehavior for LoungeRoom {
    fn decorate(&mut self, shell: &mut RoomShell, ctx: &mut RoomCtx<'_>) {
        spawn_prop(shell, ctx, "pumpkins", Vec3::new(0.0, -0.5, 0.0), Vec3::splat(0.2));
        self.npcs = vec![spawn_npc(shell, ctx, WEST_NPC, FRAC_PI_2, &LOUNGE_LINES)];
    }

    fn update(&mut self, _shell: &mut RoomShell, ctx: &mut RoomCtx<'_>) -> RoomSignal {
        sway_npcs(&mut self.npcs, ctx);
        RoomSignal::None
    }

    fn npcs_mut(&mut self) -> &mut [PumpkinNpc] {
        &mut self.npcs
    }

    fn teardown(&mut self) {
        self.npcs.clear();
    }
}

// ── Plain ─────────────────────────────────────────────────────────────────────

#[derive(Clone, Debug, Default)]
pub struct PlainRoom;

impl RoomBehavior for PlainRoom {
    fn decorate(&mut self, _shell: &mut RoomShell, _ctx: &mut RoomCtx<'_>) {}
}

// ── RoomKind ──────────────────────────────────────────────────────────────────

/// Per-kind state. State that must survive deactivation (collected pickups,
/// the combat reward) lives here, not in the shell.
#[derive(Clone, Debug)]
pub enum RoomKind {
    Trap(TrapRoom),
    Petal(PetalRoom),
    Hub(HubRoom),
    Combat(CombatRoom),
    Garden(GardenRoom),
    Chase(ChaseRoom),
    Lounge(LoungeRoom),
    Plain(PlainRoom),
}

impl RoomKind {
    pub fn from_tag(tag: RoomTag) -> Self {
        match tag {
            RoomTag::Trap => RoomKind::Trap(TrapRoom::default()),
            RoomTag::Petal => RoomKind::Petal(PetalRoom::default()),
            RoomTag::Hub => RoomKind::Hub(HubRoom::default()),
            RoomTag::Combat => RoomKind::Combat(CombatRoom::default()),
            RoomTag::Garden => RoomKind::Garden(GardenRoom::default()),
            RoomTag::Chase => RoomKind::Chase(ChaseRoom::default()),
            RoomTag::Lounge => RoomKind::Lounge(LoungeRoom::default()),
            RoomTag::Plain => RoomKind::Plain(PlainRoom),
        }
    }

    pub fn tag(&self) -> RoomTag {
        match self {
            RoomKind::Trap(_) => RoomTag::Trap,
            RoomKind::Petal(_) => RoomTag::Petal,
            RoomKind::Hub(_) => RoomTag::Hub,
            RoomKind::Combat(_) => RoomTag::Combat,
            RoomKind::Garden(_) => RoomTag::Garden,
            RoomKind::Chase(_) => RoomTag::Chase,
            RoomKind::Lounge(_) => RoomTag::Lounge,
            RoomKind::Plain(_) => RoomTag::Plain,
        }
    }

    pub fn behavior_mut(&mut self) -> &mut dyn RoomBehavior {
        match self {
            RoomKind::Trap(r) => r,
            RoomKind::Petal(r) => r,
            RoomKind::Hub(r) => r,
            RoomKind::Combat(r) => r,
            RoomKind::Garden(r) => r,
            RoomKind::Chase(r) => r,
            RoomKind::Lounge(r) => r,
            RoomKind::Plain(r) => r,
        }
    }
}
