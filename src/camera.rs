use glam::Vec3;

/// Third-person follow camera. Placement is written by the movement
/// controller each frame; the camera itself only animates its FOV.
#[derive(Clone, Debug)]
pub struct FollowCamera {
    pub position: Vec3,
    /// Point the camera looks at.
    pub look_at: Vec3,
    /// Current vertical field of view in degrees.
    pub fov: f32,
    /// Smooth-zoom target; `set_aiming` writes here.
    pub(crate) target_fov: f32,
    default_fov: f32,
    aim_divisor: f32,
}

impl FollowCamera {
    pub fn new(fov: f32, aim_divisor: f32) -> Self {
        Self {
            position: Vec3::ZERO,
            look_at: Vec3::NEG_Z,
            fov,
            target_fov: fov,
            default_fov: fov,
            aim_divisor,
        }
    }

    pub fn place(&mut self, position: Vec3, look_at: Vec3) {
        self.position = position;
        self.look_at = look_at;
    }

    /// Unit view direction. Falls back to -Z if the camera sits on its target.
    pub fn forward(&self) -> Vec3 {
        let dir = (self.look_at - self.position).normalize_or_zero();
        if dir == Vec3::ZERO { Vec3::NEG_Z } else { dir }
    }

    pub fn set_aiming(&mut self, aiming: bool) {
        self.target_fov = if aiming { self.default_fov / self.aim_divisor } else { self.default_fov };
    }

    pub fn target_fov(&self) -> f32 {
        self.target_fov
    }

    /// Advance the FOV easing by `dt` seconds (converges at ~8× per second).
    pub fn tick(&mut self, dt: f32) {
        let speed = 8.0_f32;
        self.fov += (self.target_fov - self.fov) * (speed * dt).min(1.0);
    }
}
