use std::f32::consts::TAU;
use std::path::Path;

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::error::{GameError, Result};

// ── Movement ──────────────────────────────────────────────────────────────────

/// Character locomotion tuning.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MovementConfig {
    /// Target horizontal speed in units per second.
    pub move_speed: f32,
    /// Fraction of the remaining velocity gap closed per 60 Hz frame.
    pub velocity_smoothing: f32,
    /// Yaw radians per pixel of horizontal mouse motion.
    pub mouse_sensitivity: f32,
    /// Yaw the character spawns with.
    pub initial_yaw: f32,
    /// Where the player spawns before the first room transition.
    pub spawn_position: Vec3,
}

impl Default for MovementConfig {
    fn default() -> Self {
        Self {
            move_speed: 8.0,
            velocity_smoothing: 0.1,
            mouse_sensitivity: 0.004,
            initial_yaw: TAU,
            spawn_position: Vec3::new(1.0, -0.47, -1.0),
        }
    }
}

// ── Camera ────────────────────────────────────────────────────────────────────

/// Follow-camera placement relative to the character.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    /// Desired camera offset from the character, before yaw rotation.
    pub offset: Vec3,
    /// Look target offset from the character, before yaw rotation.
    pub look_offset: Vec3,
    /// Upper bound on the camera distance when the view ray is obstructed.
    pub max_distance: f32,
    /// Gap kept between the camera and an obstructing surface.
    pub hit_margin: f32,
    /// Vertical field of view in degrees.
    pub fov: f32,
    /// The aimed FOV is `fov / aim_fov_divisor`.
    pub aim_fov_divisor: f32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            offset: Vec3::new(-0.1, 0.15, -0.32),
            look_offset: Vec3::new(0.0, 0.2, 0.35),
            max_distance: 0.2,
            hit_margin: 0.1,
            fov: 75.0,
            aim_fov_divisor: 1.5,
        }
    }
}

// ── Animation ─────────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnimationConfig {
    /// Walk-cycle progress per second.
    pub walk_speed: f32,
    /// World-space height foot IK targets are snapped to.
    pub floor_height: f32,
    pub ik_iterations: usize,
    pub ik_min_angle: f32,
    pub ik_max_angle: f32,
    /// Seconds for one half (start → recoil) of the shoot blend.
    pub shoot_duration: f32,
}

impl Default for AnimationConfig {
    fn default() -> Self {
        Self {
            walk_speed: 1.0,
            floor_height: -0.465_103_01,
            ik_iterations: 10,
            ik_min_angle: 0.0,
            ik_max_angle: 1.0,
            shoot_duration: 0.2,
        }
    }
}

// ── Rooms ─────────────────────────────────────────────────────────────────────

/// Proximity thresholds and timers used by room logic.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RoomConfig {
    pub door_threshold: f32,
    pub npc_threshold: f32,
    /// Distance kept from the entry wall when arriving in a room.
    pub entry_offset: f32,
    /// Entry height below the room center.
    pub entry_height_offset: f32,
    /// Radians of slack when deriving a compass side from a door rotation.
    pub door_angle_tolerance: f32,
    pub petal_pickup_radius: f32,
    pub flower_pickup_radius: f32,
    pub rose_radius: f32,
    /// Seconds the player survives in the gas room.
    pub trap_duration: f32,
    pub chaser_speed: f32,
    pub chaser_catch_radius: f32,
    pub npc_bpm: f32,
    /// Wall thickness of the generated room shell colliders.
    pub wall_thickness: f32,
    /// How far shell colliders are pushed outside the room box.
    pub wall_inset: f32,
}

impl Default for RoomConfig {
    fn default() -> Self {
        Self {
            door_threshold: 0.5,
            npc_threshold: 0.3,
            entry_offset: 0.5,
            entry_height_offset: 0.4,
            door_angle_tolerance: 1.0e-3,
            petal_pickup_radius: 0.3,
            flower_pickup_radius: 0.5,
            rose_radius: 0.5,
            trap_duration: 2.0,
            chaser_speed: 0.35,
            chaser_catch_radius: 0.3,
            npc_bpm: 78.0,
            wall_thickness: 0.2,
            wall_inset: 0.07,
        }
    }
}

// ── Combat ────────────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CombatConfig {
    pub player_hp: i32,
    /// Minimum seconds between two shots.
    pub shoot_cooldown: f32,
    /// Vertical offset of the muzzle relative to the camera.
    pub muzzle_drop: f32,
    pub enemy_hp: i32,
    pub enemy_hit_radius: f32,
    pub enemy_speed: f32,
    pub enemy_attack_range: f32,
    pub enemy_attack_cooldown: f32,
    /// Seconds an attack animation lasts before the enemy walks again.
    pub enemy_attack_duration: f32,
}

impl Default for CombatConfig {
    fn default() -> Self {
        Self {
            player_hp: 100,
            shoot_cooldown: 0.5,
            muzzle_drop: 0.1,
            enemy_hp: 20,
            enemy_hit_radius: 0.25,
            enemy_speed: 0.2,
            enemy_attack_range: 0.3,
            enemy_attack_cooldown: 2.0,
            enemy_attack_duration: 1.0,
        }
    }
}

// ── Physics ───────────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PhysicsConfig {
    pub fixed_step: f32,
    /// Upper bound on the simulated time of a single frame.
    pub max_frame_dt: f32,
    pub gravity: f32,
}

impl Default for PhysicsConfig {
    fn default() -> Self {
        Self { fixed_step: 1.0 / 60.0, max_frame_dt: 1.0 / 60.0, gravity: -9.82 }
    }
}

// ── GameConfig ────────────────────────────────────────────────────────────────

/// Complete tuning snapshot. Every section falls back to its defaults when a
/// JSON file leaves it out.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub movement: MovementConfig,
    pub camera: CameraConfig,
    pub animation: AnimationConfig,
    pub rooms: RoomConfig,
    pub combat: CombatConfig,
    pub physics: PhysicsConfig,
}

impl GameConfig {
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let text = std::fs::read_to_string(path.as_ref())?;
        Self::from_json_str(&text)
    }

    /// Rejects values that would break the frame loop or divide by zero.
    pub fn validate(&self) -> Result<()> {
        if self.physics.fixed_step <= 0.0 {
            return Err(GameError::Config("physics.fixed_step must be positive".into()));
        }
        if self.physics.max_frame_dt <= 0.0 {
            return Err(GameError::Config("physics.max_frame_dt must be positive".into()));
        }
        if self.animation.shoot_duration <= 0.0 {
            return Err(GameError::Config("animation.shoot_duration must be positive".into()));
        }
        if self.camera.aim_fov_divisor <= 0.0 {
            return Err(GameError::Config("camera.aim_fov_divisor must be positive".into()));
        }
        if self.rooms.entry_offset <= 0.0 {
            return Err(GameError::Config("rooms.entry_offset must be positive".into()));
        }
        Ok(())
    }
}

// ── Tests ──────────────────────────────────────────────────────────────────────
