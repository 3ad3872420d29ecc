use super::Color;
use cgmath::{InnerSpace, Point3, Vector3};

/// Lifetime in seconds a particle gets when it is respawned.
pub const PARTICLE_LIFETIME: f32 = 1.0;

/// Sort key of a particle that is not rendered.
pub const DEAD_DISTANCE: f32 = -1.0;

/// Alpha lost per second, 100 units on the 0 - 255 scale.
pub const ALPHA_FADE_PER_SEC: f32 = 100. / 255.;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Particle {
    pub position: Vector3<f32>,
    pub velocity: Vector3<f32>,
    pub color: Color,
    pub size: f32,
    /// Remaining life in seconds. Dead when <= 0.
    pub life: f32,
    /// Squared distance to the camera, [`DEAD_DISTANCE`] when dead.
    pub camera_distance_sq: f32,
}

impl Default for Particle {
    fn default() -> Self {
        Self {
            position: Vector3::new(0., 0., 0.),
            velocity: Vector3::new(0., 0., 0.),
            color: Color::rgba(255, 255, 255, 255),
            size: 0.,
            life: 0.,
            camera_distance_sq: DEAD_DISTANCE,
        }
    }
}

impl Particle {
    pub fn is_alive(&self) -> bool {
        self.life > 0.
    }

    pub fn kill(&mut self) {
        self.life = 0.;
        self.camera_distance_sq = DEAD_DISTANCE;
    }

    pub fn update_camera_distance(&mut self, camera_position: Point3<f32>) {
        let camera_position = Vector3::new(camera_position.x, camera_position.y, camera_position.z);
        self.camera_distance_sq = (self.position - camera_position).magnitude2();
    }

    pub fn fade(&mut self, delta_sec: f32) {
        self.color.a = (self.color.a - ALPHA_FADE_PER_SEC * delta_sec).max(0.);
    }

    /// Position and size as one instance attribute.
    pub fn position_size(&self) -> [f32; 4] {
        [self.position.x, self.position.y, self.position.z, self.size]
    }
}
