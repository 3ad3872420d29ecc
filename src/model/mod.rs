pub mod camera;
pub mod clock;
pub mod color;
pub mod emitter;
pub mod generator;
pub mod gfx_state;
pub mod mesh;
pub mod particle;
pub mod pool;
pub mod staging;
pub mod state;

pub use camera::{Camera, CameraCtx, CameraMovement};
pub use clock::Clock;
pub use color::Color;
pub use emitter::Emitter;
pub use generator::{CreateGeneratorOptions, ParticleGenerator, RainGenerator, SmokeGenerator};
pub use gfx_state::GfxState;
pub use mesh::{Mesh, Model, ModelVertex};
pub use particle::{Particle, ALPHA_FADE_PER_SEC, DEAD_DISTANCE, PARTICLE_LIFETIME};
pub use pool::ParticlePool;
pub use staging::FrameStaging;
pub use state::State;
