// =============================================================================
// GEOMETRY.RS - 3D primitives shared by movement, combat and rooms
//
// - Yaw rotation (the only rotation gameplay code cares about)
// - Rays, spheres and axis-aligned boxes
// - Ray/sphere test used for hit scans
// =============================================================================

use glam::{Quat, Vec3};

/// Squared length below which a direction counts as "no movement".
pub const MOVEMENT_EPSILON: f32 = 0.001;

/// Rotate `v` around the world Y axis by `yaw` radians.
#[inline]
pub fn rotate_y(v: Vec3, yaw: f32) -> Vec3 {
    Quat::from_rotation_y(yaw) * v
}

/// Horizontal (XZ-plane) distance between two points.
#[inline]
pub fn distance_xz(a: Vec3, b: Vec3) -> f32 {
    let dx = a.x - b.x;
    let dz = a.z - b.z;
    (dx * dx + dz * dz).sqrt()
}

/// Normalise an angle into `(-π, π]`.
pub fn wrap_angle(angle: f32) -> f32 {
    use std::f32::consts::{PI, TAU};
    let a = (angle + PI).rem_euclid(TAU) - PI;
    if a <= -PI { a + TAU } else { a }
}

// =============================================================================
// RAY
// =============================================================================

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Ray {
    pub origin: Vec3,
    /// Unit-length direction.
    pub direction: Vec3,
}

impl Ray {
    /// Builds a ray, normalising `direction`. A zero direction stays zero and
    /// never hits anything.
    pub fn new(origin: Vec3, direction: Vec3) -> Self {
        Self { origin, direction: direction.normalize_or_zero() }
    }

    pub fn at(&self, t: f32) -> Vec3 {
        self.origin + self.direction * t
    }

    /// Distance along the ray to the first point on `sphere`, if any.
    ///
    /// A ray starting inside the sphere hits at its origin (`t = 0`).
    pub fn intersect_sphere(&self, sphere: &Sphere) -> Option<f32> {
        if self.direction == Vec3::ZERO {
            return None;
        }
        let to_center = sphere.center - self.origin;
        let tca = to_center.dot(self.direction);
        let d2 = to_center.length_squared() - tca * tca;
        let r2 = sphere.radius * sphere.radius;
        if d2 > r2 {
            return None;
        }
        let thc = (r2 - d2).sqrt();
        let t0 = tca - thc;
        let t1 = tca + thc;
        if t1 < 0.0 {
            return None;
        }
        Some(if t0 < 0.0 { 0.0 } else { t0 })
    }
}

// =============================================================================
// VOLUMES
// =============================================================================

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Sphere {
    pub center: Vec3,
    pub radius: f32,
}

impl Sphere {
    pub fn new(center: Vec3, radius: f32) -> Self {
        Self { center, radius }
    }

    pub fn contains(&self, point: Vec3) -> bool {
        self.center.distance_squared(point) <= self.radius * self.radius
    }
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Aabb {
    pub min: Vec3,
    pub max: Vec3,
}

impl Aabb {
    pub fn from_center(center: Vec3, half_extents: Vec3) -> Self {
        Self { min: center - half_extents, max: center + half_extents }
    }

    /// True if `point` lies strictly inside the box.
    pub fn contains_strict(&self, point: Vec3) -> bool {
        point.cmpgt(self.min).all() && point.cmplt(self.max).all()
    }
}
