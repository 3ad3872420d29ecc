use super::{FrameStaging, ParticlePool, DEAD_DISTANCE};
use crate::behaviours::{Integration, ParticleBehaviour};
use cgmath::{Point3, Vector3};
use rand::{rngs::StdRng, SeedableRng};
use std::num::NonZeroUsize;

/// CPU simulation of one particle effect: spawning, moving, sorting and staging.
pub struct Emitter<B: ParticleBehaviour> {
    pool: ParticlePool,
    staging: FrameStaging,
    behaviour: B,
    rng: StdRng,
}

impl<B: ParticleBehaviour> Emitter<B> {
    /// A `seed` makes the effect reproducible, otherwise entropy is used.
    pub fn new(behaviour: B, capacity: NonZeroUsize, seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        Self {
            pool: ParticlePool::new(capacity),
            staging: FrameStaging::new(capacity.get()),
            behaviour,
            rng,
        }
    }

    pub fn update(
        &mut self,
        delta_sec: f32,
        spawn_count: u32,
        camera_position: Point3<f32>,
        spawn_offset: Vector3<f32>,
    ) {
        let Self {
            pool,
            staging,
            behaviour,
            rng,
        } = self;

        for _ in 0..spawn_count {
            let idx = pool.acquire_dead_slot();
            behaviour.respawn(&mut pool[idx], spawn_offset, &mut *rng);
        }

        for particle in pool.iter_mut().filter(|p| p.is_alive()) {
            particle.life -= delta_sec;
            particle.fade(delta_sec);

            if !particle.is_alive() {
                particle.camera_distance_sq = DEAD_DISTANCE;
                continue;
            }

            match behaviour.integrate(particle, delta_sec, &mut *rng) {
                Integration::Alive => particle.update_camera_distance(camera_position),
                Integration::Killed => particle.kill(),
            }
        }

        pool.sort_by_depth();

        staging.clear();
        for particle in pool.iter().filter(|p| p.is_alive()) {
            staging.push(particle);
        }

        // Sorted, so the first dead slot directly follows the live ones
        pool.reseat_cursor(staging.live_count());
    }

    pub fn pool(&self) -> &ParticlePool {
        &self.pool
    }

    pub fn staging(&self) -> &FrameStaging {
        &self.staging
    }

    pub fn live_count(&self) -> usize {
        self.staging.live_count()
    }

    pub fn capacity(&self) -> usize {
        self.pool.capacity()
    }

    pub fn behaviour(&self) -> &B {
        &self.behaviour
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::behaviours::{Rain, Smoke};
    use crate::model::PARTICLE_LIFETIME;
    use proptest::prelude::*;

    const ORIGIN: Vector3<f32> = Vector3::new(0., 0., 0.);

    fn camera() -> Point3<f32> {
        Point3::new(0., 0., 10.)
    }

    fn rain(capacity: usize) -> Emitter<Rain> {
        let rain = Rain {
            collision: None,
            ..Default::default()
        };
        Emitter::new(rain, NonZeroUsize::new(capacity).unwrap(), Some(42))
    }

    fn smoke(capacity: usize) -> Emitter<Smoke> {
        Emitter::new(Smoke::default(), NonZeroUsize::new(capacity).unwrap(), Some(42))
    }

    #[test]
    fn new_emitter_is_empty() {
        let emitter = smoke(8);

        assert_eq!(emitter.capacity(), 8);
        assert_eq!(emitter.live_count(), 0);
        assert_eq!(emitter.pool().alive_count(), 0);
    }

    #[test]
    fn zero_spawn_on_empty_pool_is_a_noop() {
        let mut emitter = smoke(8);
        emitter.update(0.016, 0, camera(), ORIGIN);

        assert_eq!(emitter.live_count(), 0);
        assert!(emitter.staging().positions().is_empty());
    }

    #[test]
    fn spawned_particles_get_a_sort_key() {
        let mut emitter = smoke(8);
        emitter.update(0.016, 3, camera(), ORIGIN);

        assert_eq!(emitter.live_count(), 3);

        for particle in emitter.pool().iter().take(3) {
            assert!(particle.life > 0. && particle.life < PARTICLE_LIFETIME);
            assert!(particle.camera_distance_sq >= 0.);
        }
    }

    #[test]
    fn full_lifetime_step_kills_everything() {
        let mut emitter = smoke(10);
        emitter.update(PARTICLE_LIFETIME, 10, camera(), ORIGIN);

        assert_eq!(emitter.live_count(), 0);
        assert!(emitter.pool().iter().all(|p| p.camera_distance_sq == DEAD_DISTANCE));

        emitter.update(0.016, 1, camera(), ORIGIN);

        assert_eq!(emitter.live_count(), 1);
        assert!(emitter.pool()[0].is_alive());
        assert_eq!(emitter.pool().last_used(), 1);
    }

    #[test]
    fn dead_particles_are_left_untouched() {
        let mut emitter = smoke(4);
        emitter.update(PARTICLE_LIFETIME, 1, camera(), ORIGIN);
        let before: Vec<_> = emitter.pool().iter().copied().collect();

        emitter.update(0.5, 0, camera(), ORIGIN);

        for (old, new) in before.iter().zip(emitter.pool().iter()) {
            assert_eq!(old.position, new.position);
            assert_eq!(old.velocity, new.velocity);
            assert_eq!(new.camera_distance_sq, DEAD_DISTANCE);
        }
    }

    #[test]
    fn overflow_recycles_instead_of_failing() {
        let mut emitter = rain(4);
        emitter.update(0.01, 10, camera(), ORIGIN);

        assert_eq!(emitter.live_count(), 4);
    }

    #[test]
    fn staged_data_is_back_to_front() {
        let mut emitter = rain(32);
        emitter.update(0.01, 32, camera(), Vector3::new(0., 0., -5.));

        let cam = camera();
        let distances: Vec<f32> = emitter
            .staging()
            .positions()
            .iter()
            .map(|p| (p[0] - cam.x).powi(2) + (p[1] - cam.y).powi(2) + (p[2] - cam.z).powi(2))
            .collect();

        assert_eq!(distances.len(), 32);
        assert!(distances.windows(2).all(|w| w[0] >= w[1] - 1e-3));
    }

    #[test]
    fn rain_collision_removes_particle_from_frame() {
        let mut emitter = Emitter::new(Rain::default(), NonZeroUsize::new(4).unwrap(), Some(9));
        emitter.update(0.001, 1, camera(), Vector3::new(0., 50., 0.));
        assert_eq!(emitter.live_count(), 1);

        let particle = &mut emitter.pool[0];
        particle.position = Vector3::new(-0.05, 0., 2.6);
        particle.velocity = ORIGIN;

        emitter.update(0.001, 0, camera(), ORIGIN);

        assert_eq!(emitter.live_count(), 0);
        assert_eq!(emitter.pool()[0].life, 0.);
        assert_eq!(emitter.pool()[0].camera_distance_sq, DEAD_DISTANCE);
    }

    #[test]
    fn same_seed_same_frame() {
        let mut a = rain(16);
        let mut b = rain(16);

        for _ in 0..5 {
            a.update(0.05, 4, camera(), ORIGIN);
            b.update(0.05, 4, camera(), ORIGIN);
        }

        assert_eq!(a.staging().positions(), b.staging().positions());
        assert_eq!(a.staging().colors(), b.staging().colors());
    }

    proptest! {
        #[test]
        fn staging_mirrors_live_particles(
            capacity in 1usize..48,
            frames in prop::collection::vec((0.0f32..0.4, 0u32..12), 1..20),
        ) {
            let mut emitter = smoke(capacity);

            for (delta_sec, spawn_count) in frames {
                emitter.update(delta_sec, spawn_count, camera(), ORIGIN);

                let alive: Vec<_> = emitter.pool().iter().filter(|p| p.is_alive()).collect();
                prop_assert_eq!(emitter.live_count(), alive.len());

                for (particle, staged) in alive.iter().zip(emitter.staging().positions()) {
                    prop_assert_eq!(particle.position_size(), *staged);
                }

                let keys: Vec<f32> = emitter.pool().iter().map(|p| p.camera_distance_sq).collect();
                prop_assert!(keys.windows(2).all(|w| w[0] >= w[1]));
            }
        }
    }
}
