use glam::Vec3;
use log::{debug, info};

use crate::animation::sequence::{ENEMY_ATTACK, ENEMY_WALK};
use crate::animation::{ClipAnimator, PoseLibrary, Skeleton};
use crate::config::CombatConfig;
use crate::geometry::{Sphere, wrap_angle};
use crate::physics::{BodyDesc, BodyHandle, GROUP_ENVIRONMENT, GROUP_PLAYER, PhysicsWorld};
use crate::room::RoomShell;
use crate::scene::{ObjectId, ObjectKind, SceneGraph, SceneObject};

pub const WALK_CLIP: &str = "skeletonWalk";
pub const ATTACK_CLIP: &str = "attack";

const ENEMY_HALF_EXTENTS: Vec3 = Vec3::new(0.05, 0.005, 0.05);
const ENEMY_MASS: f32 = 1.0;
/// Fraction of the heading gap closed per update.
const TURN_RATE: f32 = 0.1;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum EnemyState {
    Idle,
    Walk,
    Attack,
}

/// Undead skeleton: walks at the player, attacks in range.
#[derive(Clone, Debug)]
pub struct EnemySkeleton {
    object: ObjectId,
    body: BodyHandle,
    position: Vec3,
    heading: f32,
    hp: i32,
    state: EnemyState,
    since_attack: f32,
    attack_elapsed: f32,
    hit_sphere: Sphere,
    skeleton: Skeleton,
    animator: ClipAnimator,
    speed: f32,
    attack_range: f32,
    attack_cooldown: f32,
    attack_duration: f32,
}

impl EnemySkeleton {
    pub fn spawn(
        shell: &mut RoomShell,
        physics: &mut dyn PhysicsWorld,
        scene: &mut SceneGraph,
        position: Vec3,
        library: &PoseLibrary,
        combat: &CombatConfig,
    ) -> Self {
        // Same group as the player: the follow camera's ray ignores it.
        let body = shell.add_body(
            physics,
            BodyDesc {
                position,
                half_extents: ENEMY_HALF_EXTENTS,
                mass: ENEMY_MASS,
                damping: 0.0,
                group: GROUP_PLAYER,
                mask: GROUP_ENVIRONMENT,
            },
        );
        let object = shell.spawn_object(scene, SceneObject::new("skeleton", ObjectKind::Enemy, position));

        let mut animator = ClipAnimator::new();
        for (clip, names) in [(WALK_CLIP, &ENEMY_WALK), (ATTACK_CLIP, &ENEMY_ATTACK)] {
            match library.sequence(names, true) {
                Ok(seq) => animator.add_clip(clip, seq),
                Err(e) => debug!("enemy clip {clip} unavailable: {e}"),
            }
        }

        Self {
            object,
            body,
            position,
            heading: 0.0,
            hp: combat.enemy_hp,
            state: EnemyState::Idle,
            since_attack: f32::INFINITY,
            attack_elapsed: 0.0,
            hit_sphere: Sphere::new(position, combat.enemy_hit_radius),
            skeleton: Skeleton::humanoid(),
            animator,
            speed: combat.enemy_speed,
            attack_range: combat.enemy_attack_range,
            attack_cooldown: combat.enemy_attack_cooldown,
            attack_duration: combat.enemy_attack_duration,
        }
    }

    pub fn position(&self) -> Vec3 {
        self.position
    }

    pub fn hp(&self) -> i32 {
        self.hp
    }

    pub fn is_dead(&self) -> bool {
        self.hp <= 0
    }

    pub fn state(&self) -> EnemyState {
        self.state
    }

    pub fn hit_sphere(&self) -> &Sphere {
        &self.hit_sphere
    }

    pub fn skeleton(&self) -> &Skeleton {
        &self.skeleton
    }

    pub fn current_clip(&self) -> Option<&str> {
        self.animator.current()
    }

    /// Returns `true` once health reaches zero.
    pub fn take_damage(&mut self, amount: i32) -> bool {
        self.hp -= amount;
        if self.is_dead() {
            info!("skeleton defeated");
        }
        self.is_dead()
    }

    /// Whether this skeleton is hurting the player this frame.
    pub fn is_hitting(&self, player: Vec3) -> bool {
        self.state == EnemyState::Attack && self.position.distance(player) < self.attack_range
    }

    /// Removes the body and the object from the room.
    pub fn despawn(&self, shell: &mut RoomShell, physics: &mut dyn PhysicsWorld, scene: &mut SceneGraph) {
        shell.remove_body(physics, self.body);
        shell.despawn_object(scene, self.object);
    }

    pub fn update(&mut self, dt: f32, player: Vec3, physics: &mut dyn PhysicsWorld, scene: &mut SceneGraph) {
        if let Some(position) = physics.position(self.body) {
            self.position = position;
        }
        self.since_attack += dt;
        let distance = self.position.distance(player);
        let in_range = distance < self.attack_range;

        match self.state {
            EnemyState::Attack => {
                self.attack_elapsed += dt;
                if !in_range || self.attack_elapsed >= self.attack_duration {
                    self.set_state(EnemyState::Walk);
                }
            }
            _ if in_range && self.since_attack >= self.attack_cooldown => {
                self.since_attack = 0.0;
                self.attack_elapsed = 0.0;
                self.set_state(EnemyState::Attack);
            }
            _ => self.set_state(EnemyState::Walk),
        }

        let to_player = Vec3::new(player.x - self.position.x, 0.0, player.z - self.position.z);
        if self.state == EnemyState::Walk {
            let step = (to_player.normalize_or_zero() * self.speed * dt).clamp_length_max(to_player.length());
            let next = self.position + step;
            if physics.set_position(self.body, next) {
                self.position = next;
            }
        }
        if to_player.length_squared() > f32::EPSILON {
            let target = to_player.x.atan2(to_player.z);
            self.heading = wrap_angle(self.heading + wrap_angle(target - self.heading) * TURN_RATE);
        }

        self.hit_sphere.center = self.position;
        if let Some(obj) = scene.get_mut(self.object) {
            obj.position = self.position;
            obj.rotation_y = self.heading;
        }
        self.animator.update(dt, &mut self.skeleton);
        self.skeleton.set_root(self.position, self.heading);
        self.skeleton.update_matrices();
    }

    fn set_state(&mut self, state: EnemyState) {
        if self.state == state {
            return;
        }
        self.state = state;
        let clip = match state {
            EnemyState::Attack => ATTACK_CLIP,
            EnemyState::Walk => WALK_CLIP,
            EnemyState::Idle => return,
        };
        if self.animator.has_clip(clip) {
            self.animator.set_clip(clip);
        }
    }
}
