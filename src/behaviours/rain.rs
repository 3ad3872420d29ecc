use super::{jitter, random_grey, Integration, ParticleBehaviour};
use crate::model::{Color, Particle, PARTICLE_LIFETIME};
use cgmath::Vector3;
use rand::{Rng, RngCore};

const GRAVITY: Vector3<f32> = Vector3::new(0., -9.81, 0.);

/// Axis aligned box, bounds are exclusive.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CollisionBox {
    pub min: Vector3<f32>,
    pub max: Vector3<f32>,
}

impl CollisionBox {
    pub fn contains(&self, pos: Vector3<f32>) -> bool {
        self.min.x < pos.x
            && pos.x < self.max.x
            && self.min.y < pos.y
            && pos.y < self.max.y
            && self.min.z < pos.z
            && pos.z < self.max.z
    }
}

impl Default for CollisionBox {
    /// The table top of the demo scene.
    fn default() -> Self {
        Self {
            min: Vector3::new(-0.25, -0.065, 2.425),
            max: Vector3::new(0.15, 0.065, 2.805),
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct Rain {
    /// Half the edge of the cube drops spawn in.
    pub spawn_extent: f32,
    pub size: f32,
    pub collision: Option<CollisionBox>,
}

impl Default for Rain {
    fn default() -> Self {
        Self {
            spawn_extent: 1.,
            size: 0.005,
            collision: Some(CollisionBox::default()),
        }
    }
}

impl ParticleBehaviour for Rain {
    fn respawn(&self, particle: &mut Particle, offset: Vector3<f32>, rng: &mut dyn RngCore) {
        let mut coord = || rng.gen_range(-1000..1000) as f32 / 1000. * self.spawn_extent;
        let position = Vector3::new(coord(), coord(), coord());

        particle.life = PARTICLE_LIFETIME;
        particle.position = position + offset;
        particle.velocity = Vector3::new(0., 0., 0.);
        particle.color = Color::grey(random_grey(rng));
        particle.size = self.size;
    }

    fn integrate(&self, particle: &mut Particle, delta_sec: f32, rng: &mut dyn RngCore) -> Integration {
        particle.velocity += GRAVITY * delta_sec * 0.5;
        particle.position += particle.velocity * delta_sec;

        // Wind
        particle.position.x += jitter(rng, 3, -2, 10.) * delta_sec;
        particle.position.y += jitter(rng, 3, -2, 10.) * delta_sec;
        particle.position.z += jitter(rng, 3, -2, 10.) * delta_sec;

        match self.collision {
            Some(collision) if collision.contains(particle.position) => Integration::Killed,
            _ => Integration::Alive,
        }
    }
}
