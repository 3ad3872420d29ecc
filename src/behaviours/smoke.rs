use super::{jitter, random_grey, Integration, ParticleBehaviour};
use crate::model::{Color, Particle, PARTICLE_LIFETIME};
use cgmath::Vector3;
use rand::RngCore;

#[derive(Debug, Clone, Copy)]
pub struct Smoke {
    pub origin: Vector3<f32>,
    pub velocity: Vector3<f32>,
    pub size: f32,
}

impl Default for Smoke {
    fn default() -> Self {
        Self {
            origin: Vector3::new(4., 4., 4.),
            velocity: Vector3::new(0., 2., 0.),
            size: 0.025,
        }
    }
}

impl ParticleBehaviour for Smoke {
    fn respawn(&self, particle: &mut Particle, offset: Vector3<f32>, rng: &mut dyn RngCore) {
        particle.life = PARTICLE_LIFETIME;
        particle.position = self.origin + offset;
        particle.velocity = self.velocity;
        particle.color = Color::grey(random_grey(rng));
        particle.size = self.size;
    }

    fn integrate(&self, particle: &mut Particle, delta_sec: f32, rng: &mut dyn RngCore) -> Integration {
        particle.position += particle.velocity * delta_sec;

        particle.position.x += jitter(rng, 3, 0, 8.) * delta_sec;
        particle.position.y += jitter(rng, 5, -2, 16.) * delta_sec;
        particle.position.z += jitter(rng, 7, -2, 8.) * delta_sec;

        Integration::Alive
    }
}
