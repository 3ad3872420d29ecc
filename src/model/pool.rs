use super::Particle;
use std::num::NonZeroUsize;
use std::ops::{Index, IndexMut};

/// Fixed amount of particle slots. Slots are never added or removed, dead ones get respawned.
#[derive(Debug)]
pub struct ParticlePool {
    particles: Vec<Particle>,
    last_used: usize,
}

impl ParticlePool {
    pub fn new(capacity: NonZeroUsize) -> Self {
        Self {
            particles: vec![Particle::default(); capacity.get()],
            last_used: 0,
        }
    }

    pub fn capacity(&self) -> usize {
        self.particles.len()
    }

    pub fn last_used(&self) -> usize {
        self.last_used
    }

    /// Returns the first dead slot, starting at the last used one and wrapping around.
    /// When every slot is alive slot 0 gets overwritten.
    pub fn acquire_dead_slot(&mut self) -> usize {
        let is_dead = |p: &Particle| !p.is_alive();
        let start = self.last_used;

        let found = self.particles[start..]
            .iter()
            .position(is_dead)
            .map(|i| start + i)
            .or_else(|| self.particles[..start].iter().position(is_dead));

        self.last_used = match found {
            Some(idx) => idx,
            None => {
                log::debug!(
                    "All {} particles alive, recycling slot 0",
                    self.particles.len()
                );
                0
            }
        };

        self.last_used
    }

    /// Farthest from the camera first, dead particles end up last.
    pub fn sort_by_depth(&mut self) {
        self.particles
            .sort_by(|a, b| b.camera_distance_sq.total_cmp(&a.camera_distance_sq));
    }

    /// Moves the recycle cursor, e.g. to the first dead slot after sorting.
    pub fn reseat_cursor(&mut self, idx: usize) {
        self.last_used = idx.min(self.particles.len() - 1);
    }

    pub fn alive_count(&self) -> usize {
        self.particles.iter().filter(|p| p.is_alive()).count()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Particle> {
        self.particles.iter()
    }

    pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, Particle> {
        self.particles.iter_mut()
    }
}

impl Index<usize> for ParticlePool {
    type Output = Particle;

    fn index(&self, idx: usize) -> &Self::Output {
        &self.particles[idx]
    }
}

impl IndexMut<usize> for ParticlePool {
    fn index_mut(&mut self, idx: usize) -> &mut Self::Output {
        &mut self.particles[idx]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::DEAD_DISTANCE;
    use proptest::prelude::*;

    fn pool(capacity: usize) -> ParticlePool {
        ParticlePool::new(NonZeroUsize::new(capacity).unwrap())
    }

    fn revive(pool: &mut ParticlePool, idx: usize) {
        pool[idx].life = 1.;
        pool[idx].camera_distance_sq = 0.;
    }

    #[test]
    fn new_pool_is_all_dead() {
        let pool = pool(16);

        assert_eq!(pool.capacity(), 16);
        assert_eq!(pool.alive_count(), 0);
        assert!(pool.iter().all(|p| p.camera_distance_sq == DEAD_DISTANCE));
    }

    #[test]
    fn acquire_moves_forward_from_cursor() {
        let mut pool = pool(4);

        for expected in 0..4 {
            let idx = pool.acquire_dead_slot();
            assert_eq!(idx, expected);
            revive(&mut pool, idx);
        }
    }

    #[test]
    fn acquire_wraps_to_front() {
        let mut pool = pool(4);
        for idx in 0..4 {
            revive(&mut pool, idx);
        }
        pool.reseat_cursor(3);
        pool[1].kill();

        assert_eq!(pool.acquire_dead_slot(), 1);
        assert_eq!(pool.last_used(), 1);
    }

    #[test]
    fn full_pool_recycles_slot_zero() {
        let mut pool = pool(3);
        for idx in 0..3 {
            revive(&mut pool, idx);
        }
        pool.reseat_cursor(2);

        assert_eq!(pool.acquire_dead_slot(), 0);
        assert_eq!(pool.last_used(), 0);
    }

    #[test]
    fn cursor_is_clamped() {
        let mut pool = pool(3);
        pool.reseat_cursor(3);

        assert_eq!(pool.last_used(), 2);
    }

    proptest! {
        #[test]
        fn acquire_returns_dead_slot_when_one_exists(
            alive in prop::collection::vec(any::<bool>(), 1..64),
            cursor in 0usize..64,
        ) {
            let mut pool = pool(alive.len());
            for (idx, is_alive) in alive.iter().enumerate() {
                if *is_alive {
                    revive(&mut pool, idx);
                }
            }
            pool.reseat_cursor(cursor);

            let idx = pool.acquire_dead_slot();

            if alive.iter().all(|a| *a) {
                prop_assert_eq!(idx, 0);
            } else {
                prop_assert!(!pool[idx].is_alive());
            }
        }

        #[test]
        fn sort_puts_far_particles_first(
            keys in prop::collection::vec(prop_oneof![Just(-1f32), 0f32..1000.], 1..64),
        ) {
            let mut pool = pool(keys.len());
            for (idx, key) in keys.iter().enumerate() {
                if *key >= 0. {
                    revive(&mut pool, idx);
                }
                pool[idx].camera_distance_sq = *key;
            }

            pool.sort_by_depth();

            let sorted: Vec<f32> = pool.iter().map(|p| p.camera_distance_sq).collect();
            prop_assert!(sorted.windows(2).all(|w| w[0] >= w[1]));

            let first_dead = sorted.iter().position(|k| *k == DEAD_DISTANCE).unwrap_or(sorted.len());
            prop_assert!(sorted[first_dead..].iter().all(|k| *k == DEAD_DISTANCE));
        }
    }
}
