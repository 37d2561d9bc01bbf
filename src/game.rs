//! Top-level context object. Owns every subsystem and advances them one
//! frame at a time; the windowed or scripted driver only feeds input and
//! wall-clock deltas.

use glam::Vec3;
use log::{error, info, warn};

use crate::animation::{AnimationRig, PoseLibrary, Skeleton};
use crate::assets::{AssetQueue, AssetSource, LoadOwner, Placement};
use crate::camera::FollowCamera;
use crate::character::{Character, Shot};
use crate::config::GameConfig;
use crate::error::Result;
use crate::input::{Action, ActionMap, InputState};
use crate::layout::{self, PLAYER_MODEL, START_ROOM};
use crate::physics::{PhysicsWorld, RapierWorld};
use crate::room::{RoomCtx, RoomDescriptor, RoomId, RoomManager, RoomSignal};
use crate::scene::{ObjectId, ObjectKind, SceneGraph, SceneObject};
use crate::ui::UiState;

const COMPLETED_TEXT: &str = "The rose is whole again";

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum GameStatus {
    Playing,
    Paused,
    GameOver(String),
    Completed,
}

impl GameStatus {
    /// Game over and completion are final.
    pub fn is_finished(&self) -> bool {
        matches!(self, Self::GameOver(_) | Self::Completed)
    }
}

pub struct Game {
    config: GameConfig,
    physics: Box<dyn PhysicsWorld>,
    scene: SceneGraph,
    input: InputState,
    actions: ActionMap<Action>,
    ui: UiState,
    assets: Box<dyn AssetSource>,
    loads: AssetQueue,
    poses: PoseLibrary,
    player: Character,
    rooms: RoomManager,
    camera: FollowCamera,
    light: ObjectId,
    status: GameStatus,
    accumulator: f32,
    clock: f32,
    frames: u64,
    animation_disabled: bool,
}

impl Game {
    /// Spawns the player and the ambient light, builds every room of
    /// `layout` and activates the start room.
    pub fn new(
        config: GameConfig,
        mut physics: Box<dyn PhysicsWorld>,
        assets: Box<dyn AssetSource>,
        poses: PoseLibrary,
        layout: Vec<RoomDescriptor>,
    ) -> Result<Self> {
        config.validate()?;
        let mut scene = SceneGraph::new();
        let light = scene.spawn(SceneObject::new("ambient light", ObjectKind::AmbientLight, Vec3::ZERO), true);
        let player = Character::spawn(&config, physics.as_mut(), &mut scene);

        let mut loads = AssetQueue::new();
        loads.request(PLAYER_MODEL, LoadOwner::Player, Placement::at("player", config.movement.spawn_position));

        let mut rooms = RoomManager::new(START_ROOM);
        rooms.set_ambient_light(light);

        let mut game = Self {
            camera: FollowCamera::new(config.camera.fov, config.camera.aim_fov_divisor),
            config,
            physics,
            scene,
            input: InputState::new(),
            actions: ActionMap::default_bindings(),
            ui: UiState::new(),
            assets,
            loads,
            poses,
            player,
            rooms,
            light,
            status: GameStatus::Playing,
            accumulator: 0.0,
            clock: 0.0,
            frames: 0,
            animation_disabled: false,
        };

        let (rooms, mut ctx) = game.split(0.0);
        rooms.create_rooms(layout, &mut ctx)?;
        game.ui.set_petals(game.player.petal_count());
        info!("game ready in room {START_ROOM}");
        Ok(game)
    }

    /// The built-in layout on the in-crate collaborators. Nothing here needs a
    /// window or a GPU.
    pub fn headless(config: GameConfig) -> Result<Self> {
        let physics = Box::new(RapierWorld::new(config.physics.gravity));
        Self::new(
            config,
            physics,
            Box::new(layout::asset_manifest()),
            PoseLibrary::procedural(),
            layout::default_layout(),
        )
    }

    /// Borrows the room manager apart from everything a room may touch.
    fn split(&mut self, dt: f32) -> (&mut RoomManager, RoomCtx<'_>) {
        let ctx = RoomCtx {
            dt,
            time: self.clock,
            input: &self.input,
            actions: &self.actions,
            player: &mut self.player,
            physics: self.physics.as_mut(),
            scene: &mut self.scene,
            ui: &mut self.ui,
            loads: &mut self.loads,
            config: &self.config,
            poses: &self.poses,
        };
        (&mut self.rooms, ctx)
    }

    // ── Frame ─────────────────────────────────────────────────────────────────

    /// Advances one frame of `frame_dt` wall-clock seconds.
    pub fn tick(&mut self, frame_dt: f32) {
        if self.actions.is_pressed(Action::Pause, &self.input) {
            self.toggle_pause();
        }
        if self.status != GameStatus::Playing {
            self.input.clear_frame_state();
            return;
        }

        let dt = frame_dt.clamp(0.0, self.config.physics.max_frame_dt);
        let fixed_dt = self.config.physics.fixed_step;
        self.accumulator += dt;
        while self.accumulator >= fixed_dt {
            self.physics.step(fixed_dt);
            self.accumulator -= fixed_dt;
        }
        self.clock += dt;
        self.frames += 1;
        self.ui.tick(dt);

        self.receive_loads();

        let shot = self.player.update(
            dt,
            &mut self.input,
            &self.actions,
            self.physics.as_mut(),
            &mut self.scene,
            &mut self.camera,
        );

        let (rooms, mut ctx) = self.split(dt);
        let mut signal = RoomSignal::None;
        if let Some(shot) = shot {
            signal = signal.or(rooms.dispatch_shot(&shot, &mut ctx));
        }
        if let Err(err) = rooms.check_room_transition(&mut ctx) {
            error!("room transition aborted: {err}");
        }
        signal = signal.or(rooms.update(&mut ctx));
        rooms.check_npc_interaction(&mut ctx);

        self.apply(signal);
        self.ui.set_petals(self.player.petal_count());
        self.input.clear_frame_state();
    }

    fn toggle_pause(&mut self) {
        self.status = match self.status {
            GameStatus::Playing => {
                info!("paused");
                GameStatus::Paused
            }
            GameStatus::Paused => {
                info!("resumed");
                GameStatus::Playing
            }
            ref finished => finished.clone(),
        };
    }

    fn receive_loads(&mut self) {
        let done = self.loads.poll(self.assets.as_mut());
        for load in self.rooms.route_loads(done, &mut self.scene) {
            if load.owner != LoadOwner::Player {
                continue;
            }
            let rig = AnimationRig::new(Skeleton::humanoid(), &self.poses, &self.config.animation);
            self.player.attach_rig(rig);
            info!("player model {} ready, animation enabled", load.model.path);
        }
        if !self.animation_disabled && self.player.rig().is_none() && self.loads.has_failed(PLAYER_MODEL) {
            self.animation_disabled = true;
            warn!("player model unavailable, continuing without animation");
        }
    }

    /// Game over and completion take effect once; later signals are ignored.
    fn apply(&mut self, signal: RoomSignal) {
        if self.status.is_finished() {
            return;
        }
        match signal {
            RoomSignal::None => {}
            RoomSignal::GameOver(reason) => {
                warn!("game over: {reason}");
                self.ui.show_alert(reason.clone());
                self.status = GameStatus::GameOver(reason);
            }
            RoomSignal::Completed => {
                info!("game completed after {} frames", self.frames);
                self.ui.show_alert(COMPLETED_TEXT);
                self.status = GameStatus::Completed;
            }
        }
    }

    // ── Direct control ────────────────────────────────────────────────────────

    /// Switches rooms without going through a door.
    pub fn enter_room(&mut self, id: RoomId) -> Result<()> {
        let (rooms, mut ctx) = self.split(0.0);
        rooms.set_current_room(id, &mut ctx)
    }

    /// Delivers a shot as if the player had fired it this frame.
    pub fn dispatch_shot(&mut self, shot: Shot) -> RoomSignal {
        let (rooms, mut ctx) = self.split(0.0);
        let signal = rooms.dispatch_shot(&shot, &mut ctx);
        self.apply(signal.clone());
        self.ui.set_petals(self.player.petal_count());
        signal
    }

    pub fn teleport_player(&mut self, position: Vec3) {
        self.player.teleport(self.physics.as_mut(), &mut self.scene, position);
    }

    // ── Accessors ─────────────────────────────────────────────────────────────

    pub fn input_mut(&mut self) -> &mut InputState {
        &mut self.input
    }

    pub fn status(&self) -> &GameStatus {
        &self.status
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn character(&self) -> &Character {
        &self.player
    }

    pub fn character_mut(&mut self) -> &mut Character {
        &mut self.player
    }

    pub fn rooms(&self) -> &RoomManager {
        &self.rooms
    }

    pub fn rooms_mut(&mut self) -> &mut RoomManager {
        &mut self.rooms
    }

    pub fn scene(&self) -> &SceneGraph {
        &self.scene
    }

    pub fn physics(&self) -> &dyn PhysicsWorld {
        self.physics.as_ref()
    }

    pub fn ui(&self) -> &UiState {
        &self.ui
    }

    pub fn camera(&self) -> &FollowCamera {
        &self.camera
    }

    pub fn ambient_light(&self) -> ObjectId {
        self.light
    }

    /// Simulated seconds since the game started, pauses excluded.
    pub fn clock(&self) -> f32 {
        self.clock
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assets::StaticAssets;
    use crate::input::KeyCode;

    #[test]
    fn escape_toggles_pause_and_freezes_the_clock() {
        let mut game = Game::headless(GameConfig::default()).unwrap();
        game.tick(1.0 / 60.0);
        let clock = game.clock();

        game.input_mut().press_key(KeyCode::Escape);
        game.tick(1.0 / 60.0);
        assert_eq!(game.status(), &GameStatus::Paused);
        game.input_mut().release_key(KeyCode::Escape);
        game.tick(1.0 / 60.0);
        assert_eq!(game.clock(), clock);

        game.input_mut().press_key(KeyCode::Escape);
        game.tick(1.0 / 60.0);
        assert_eq!(game.status(), &GameStatus::Playing);
    }

    #[test]
    fn long_frames_are_clamped() {
        let mut game = Game::headless(GameConfig::default()).unwrap();
        game.tick(2.0);
        assert!((game.clock() - 1.0 / 60.0).abs() < 1e-6);
    }

    #[test]
    fn missing_player_model_leaves_animation_off() {
        let assets = StaticAssets::new();
        let config = GameConfig::default();
        let physics = Box::new(RapierWorld::new(config.physics.gravity));
        let mut game = Game::new(
            config,
            physics,
            Box::new(assets),
            PoseLibrary::procedural(),
            layout::default_layout(),
        )
        .unwrap();
        for _ in 0..3 {
            game.tick(1.0 / 60.0);
        }
        assert!(game.character().rig().is_none());
        assert_eq!(game.status(), &GameStatus::Playing);
    }
}
