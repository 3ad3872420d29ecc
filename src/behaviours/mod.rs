pub mod rain;
pub mod smoke;

pub use rain::{CollisionBox, Rain};
pub use smoke::Smoke;

use crate::model::Particle;
use cgmath::Vector3;
use rand::{Rng, RngCore};

/// Outcome of moving a particle for one frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Integration {
    Alive,
    /// Hit something, the particle dies this frame.
    Killed,
}

/// Spawn and motion rules of a particle effect. Life, fading and sorting are shared.
pub trait ParticleBehaviour {
    fn respawn(&self, particle: &mut Particle, offset: Vector3<f32>, rng: &mut dyn RngCore);

    /// Only called for particles that are still alive after their life was reduced.
    fn integrate(&self, particle: &mut Particle, delta_sec: f32, rng: &mut dyn RngCore)
        -> Integration;
}

/// Grey between 200 and 255.
pub(crate) fn random_grey(rng: &mut dyn RngCore) -> u8 {
    rng.gen_range(200..=255)
}

/// `-(k + shift) / divisor`, with `k` uniform in `0..range`.
pub(crate) fn jitter(rng: &mut dyn RngCore, range: i32, shift: i32, divisor: f32) -> f32 {
    -((rng.gen_range(0..range) + shift) as f32) / divisor
}
