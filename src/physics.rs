// =============================================================================
// PHYSICS.RS - rigid body world used by the player, rooms and actors
//
// Gameplay code only talks to the `PhysicsWorld` trait: add/remove bodies,
// a fixed-step `step`, and a closest-hit raycast. `RapierWorld` backs it with
// rapier3d: every body is a single cuboid collider, static geometry is fixed,
// and collision groups map onto rapier's interaction groups.
// =============================================================================

use glam::Vec3;
use rapier3d::na as nalgebra;
use rapier3d::prelude::{
    CCDSolver, CoefficientCombineRule, ColliderBuilder, ColliderSet, DefaultBroadPhase, Group, ImpulseJointSet,
    IntegrationParameters, InteractionGroups, IslandManager, MultibodyJointSet, NarrowPhase, PhysicsPipeline,
    QueryFilter, QueryPipeline, RigidBodyBuilder, RigidBodyHandle, RigidBodySet, point, vector,
};

/// Collision group bit of static room geometry.
pub const GROUP_ENVIRONMENT: u32 = 1;
/// Collision group bit of the player.
pub const GROUP_PLAYER: u32 = 2;
/// Collision group bit of props and NPC colliders.
pub const GROUP_PROPS: u32 = 4;

/// Handle to a body. Stale handles never alias a newer body.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct BodyHandle(RigidBodyHandle);

/// Everything needed to create a body. `mass == 0` makes it fixed.
#[derive(Clone, Debug, PartialEq)]
pub struct BodyDesc {
    pub position: Vec3,
    pub half_extents: Vec3,
    pub mass: f32,
    /// Linear damping coefficient.
    pub damping: f32,
    pub group: u32,
    pub mask: u32,
}

impl BodyDesc {
    pub fn fixed(position: Vec3, half_extents: Vec3) -> Self {
        Self {
            position,
            half_extents,
            mass: 0.0,
            damping: 0.0,
            group: GROUP_ENVIRONMENT,
            mask: GROUP_PLAYER,
        }
    }

    pub fn with_filter(mut self, group: u32, mask: u32) -> Self {
        self.group = group;
        self.mask = mask;
        self
    }

    pub fn is_fixed(&self) -> bool {
        self.mass <= 0.0
    }
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct RayHit {
    pub body: BodyHandle,
    pub point: Vec3,
    pub distance: f32,
}

pub trait PhysicsWorld {
    fn add_body(&mut self, desc: BodyDesc) -> BodyHandle;
    /// Returns `false` if the handle was already gone.
    fn remove_body(&mut self, handle: BodyHandle) -> bool;
    fn contains(&self, handle: BodyHandle) -> bool;
    fn position(&self, handle: BodyHandle) -> Option<Vec3>;
    fn velocity(&self, handle: BodyHandle) -> Option<Vec3>;
    fn set_velocity(&mut self, handle: BodyHandle, velocity: Vec3) -> bool;
    /// Moves a body, keeping its velocity.
    fn set_position(&mut self, handle: BodyHandle, position: Vec3) -> bool;
    fn step(&mut self, dt: f32);
    /// Closest body between `from` and `to` whose group intersects `mask`.
    fn raycast_closest(&self, from: Vec3, to: Vec3, mask: u32) -> Option<RayHit>;
    fn body_count(&self) -> usize;

    /// Moves a body without simulating, clearing its velocity.
    fn teleport(&mut self, handle: BodyHandle, position: Vec3) -> bool {
        self.set_position(handle, position) && self.set_velocity(handle, Vec3::ZERO)
    }
}

fn to_vector(v: Vec3) -> rapier3d::prelude::Vector<f32> {
    vector![v.x, v.y, v.z]
}

fn from_vector(v: &rapier3d::prelude::Vector<f32>) -> Vec3 {
    Vec3::new(v.x, v.y, v.z)
}

fn groups(group: u32, mask: u32) -> InteractionGroups {
    InteractionGroups::new(Group::from_bits_truncate(group), Group::from_bits_truncate(mask))
}

// ── RapierWorld ───────────────────────────────────────────────────────────────

pub struct RapierWorld {
    gravity: Vec3,
    bodies: RigidBodySet,
    colliders: ColliderSet,
    params: IntegrationParameters,
    pipeline: PhysicsPipeline,
    islands: IslandManager,
    broad_phase: DefaultBroadPhase,
    narrow_phase: NarrowPhase,
    impulse_joints: ImpulseJointSet,
    multibody_joints: MultibodyJointSet,
    ccd: CCDSolver,
    queries: QueryPipeline,
}

impl RapierWorld {
    pub fn new(gravity_y: f32) -> Self {
        Self {
            gravity: Vec3::new(0.0, gravity_y, 0.0),
            bodies: RigidBodySet::new(),
            colliders: ColliderSet::new(),
            params: IntegrationParameters::default(),
            pipeline: PhysicsPipeline::new(),
            islands: IslandManager::new(),
            broad_phase: DefaultBroadPhase::new(),
            narrow_phase: NarrowPhase::new(),
            impulse_joints: ImpulseJointSet::new(),
            multibody_joints: MultibodyJointSet::new(),
            ccd: CCDSolver::new(),
            queries: QueryPipeline::new(),
        }
    }
}

impl Default for RapierWorld {
    fn default() -> Self {
        Self::new(-9.82)
    }
}

impl PhysicsWorld for RapierWorld {
    fn add_body(&mut self, desc: BodyDesc) -> BodyHandle {
        let builder = if desc.is_fixed() {
            RigidBodyBuilder::fixed()
        } else {
            RigidBodyBuilder::dynamic().lock_rotations().ccd_enabled(true).linear_damping(desc.damping)
        };
        let handle = self.bodies.insert(builder.translation(to_vector(desc.position)).build());

        let half = desc.half_extents;
        let mut collider = ColliderBuilder::cuboid(half.x, half.y, half.z)
            .collision_groups(groups(desc.group, desc.mask))
            .friction(0.0)
            .friction_combine_rule(CoefficientCombineRule::Min);
        if !desc.is_fixed() {
            collider = collider.mass(desc.mass);
        }
        self.colliders.insert_with_parent(collider.build(), handle, &mut self.bodies);
        self.queries.update(&self.colliders);
        BodyHandle(handle)
    }

    fn remove_body(&mut self, handle: BodyHandle) -> bool {
        let removed = self.bodies.remove(
            handle.0,
            &mut self.islands,
            &mut self.colliders,
            &mut self.impulse_joints,
            &mut self.multibody_joints,
            true,
        );
        if removed.is_some() {
            self.queries.update(&self.colliders);
        }
        removed.is_some()
    }

    fn contains(&self, handle: BodyHandle) -> bool {
        self.bodies.contains(handle.0)
    }

    fn position(&self, handle: BodyHandle) -> Option<Vec3> {
        self.bodies.get(handle.0).map(|rb| from_vector(rb.translation()))
    }

    fn velocity(&self, handle: BodyHandle) -> Option<Vec3> {
        self.bodies.get(handle.0).map(|rb| from_vector(rb.linvel()))
    }

    fn set_velocity(&mut self, handle: BodyHandle, velocity: Vec3) -> bool {
        match self.bodies.get_mut(handle.0) {
            Some(rb) => {
                rb.set_linvel(to_vector(velocity), true);
                true
            }
            None => false,
        }
    }

    fn set_position(&mut self, handle: BodyHandle, position: Vec3) -> bool {
        match self.bodies.get_mut(handle.0) {
            Some(rb) => {
                rb.set_translation(to_vector(position), true);
                true
            }
            None => false,
        }
    }

    fn step(&mut self, dt: f32) {
        self.params.dt = dt;
        self.pipeline.step(
            &to_vector(self.gravity),
            &self.params,
            &mut self.islands,
            &mut self.broad_phase,
            &mut self.narrow_phase,
            &mut self.bodies,
            &mut self.colliders,
            &mut self.impulse_joints,
            &mut self.multibody_joints,
            &mut self.ccd,
            Some(&mut self.queries),
            &(),
            &(),
        );
    }

    fn raycast_closest(&self, from: Vec3, to: Vec3, mask: u32) -> Option<RayHit> {
        let length = from.distance(to);
        if length <= f32::EPSILON {
            return None;
        }
        let direction = (to - from) / length;
        let ray = rapier3d::prelude::Ray::new(point![from.x, from.y, from.z], to_vector(direction));
        // Only the body's membership matters here, so the ray itself belongs
        // to every group.
        let filter = QueryFilter::default().groups(groups(u32::MAX, mask));
        let (collider, distance) = self.queries.cast_ray(&self.bodies, &self.colliders, &ray, length, true, filter)?;
        let body = self.colliders.get(collider)?.parent()?;
        Some(RayHit { body: BodyHandle(body), point: from + direction * distance, distance })
    }

    fn body_count(&self) -> usize {
        self.bodies.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FRAME: f32 = 1.0 / 60.0;

    fn player_desc(position: Vec3) -> BodyDesc {
        BodyDesc {
            position,
            half_extents: Vec3::new(0.03, 0.005, 0.03),
            mass: 5.0,
            damping: 0.5,
            group: GROUP_PLAYER,
            mask: GROUP_ENVIRONMENT | GROUP_PROPS,
        }
    }

    #[test]
    fn stale_handle_does_not_alias() {
        let mut world = RapierWorld::default();
        let a = world.add_body(BodyDesc::fixed(Vec3::ZERO, Vec3::ONE));
        assert!(world.remove_body(a));
        let b = world.add_body(BodyDesc::fixed(Vec3::X, Vec3::ONE));
        assert!(!world.contains(a));
        assert!(world.contains(b));
        assert!(!world.remove_body(a));
        assert!(world.position(a).is_none());
        assert_eq!(world.body_count(), 1);
    }

    #[test]
    fn dynamic_body_rests_on_floor() {
        let mut world = RapierWorld::default();
        world.add_body(BodyDesc::fixed(Vec3::new(0.0, -0.57, 0.0), Vec3::new(1.5, 0.1, 1.5)));
        let p = world.add_body(player_desc(Vec3::new(0.0, -0.4, 0.0)));
        for _ in 0..120 {
            world.step(FRAME);
        }
        let y = world.position(p).unwrap().y;
        assert!((y - (-0.465)).abs() < 5e-3, "y = {y}");
    }

    #[test]
    fn fixed_bodies_never_move() {
        let mut world = RapierWorld::default();
        let wall = world.add_body(BodyDesc::fixed(Vec3::new(0.0, 1.0, 0.0), Vec3::splat(0.5)));
        for _ in 0..30 {
            world.step(FRAME);
        }
        assert_eq!(world.position(wall), Some(Vec3::new(0.0, 1.0, 0.0)));
    }

    #[test]
    fn fast_body_is_stopped_by_a_thin_wall() {
        let mut world = RapierWorld::new(0.0);
        world.add_body(BodyDesc::fixed(Vec3::new(0.0, 0.0, 1.57), Vec3::new(1.5, 0.5, 0.1)));
        let p = world.add_body(player_desc(Vec3::new(0.0, 0.0, 1.0)));
        for _ in 0..60 {
            world.set_velocity(p, Vec3::new(0.0, 0.0, 8.0));
            world.step(FRAME);
        }
        let z = world.position(p).unwrap().z;
        assert!(z < 1.47 && z > 1.3, "z = {z}");
    }

    #[test]
    fn teleport_clears_velocity() {
        let mut world = RapierWorld::default();
        let p = world.add_body(player_desc(Vec3::ZERO));
        world.set_velocity(p, Vec3::new(1.0, 2.0, 3.0));
        assert!(world.teleport(p, Vec3::new(0.0, 5.0, 0.0)));
        assert_eq!(world.position(p), Some(Vec3::new(0.0, 5.0, 0.0)));
        assert_eq!(world.velocity(p), Some(Vec3::ZERO));
    }

    #[test]
    fn raycast_respects_mask() {
        let mut world = RapierWorld::default();
        let wall = world.add_body(BodyDesc::fixed(Vec3::new(0.0, 0.0, 2.0), Vec3::splat(0.5)));
        world.add_body(player_desc(Vec3::new(0.0, 0.0, 1.0)));
        let hit = world.raycast_closest(Vec3::ZERO, Vec3::new(0.0, 0.0, 5.0), GROUP_ENVIRONMENT).unwrap();
        assert_eq!(hit.body, wall);
        assert!((hit.distance - 1.5).abs() < 1e-4);
        assert!((hit.point.z - 1.5).abs() < 1e-4);
        assert!(world.raycast_closest(Vec3::ZERO, Vec3::new(0.0, 0.0, 1.0), GROUP_ENVIRONMENT).is_none());
    }
}
