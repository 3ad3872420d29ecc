use super::Particle;

/// CPU side copy of the live particles, laid out as the instance buffers expect it.
#[derive(Debug)]
pub struct FrameStaging {
    positions: Vec<[f32; 4]>,
    colors: Vec<[u8; 4]>,
    live_count: usize,
}

impl FrameStaging {
    pub fn new(capacity: usize) -> Self {
        Self {
            positions: vec![[0.; 4]; capacity],
            colors: vec![[0; 4]; capacity],
            live_count: 0,
        }
    }

    pub fn clear(&mut self) {
        self.live_count = 0;
    }

    /// Appends one particle. Ignored once every slot is filled.
    pub fn push(&mut self, particle: &Particle) {
        let idx = self.live_count;

        if idx >= self.positions.len() {
            return;
        }

        self.positions[idx] = particle.position_size();
        self.colors[idx] = particle.color.to_rgba8();
        self.live_count += 1;
    }

    pub fn live_count(&self) -> usize {
        self.live_count
    }

    /// x, y, z and size of every live particle.
    pub fn positions(&self) -> &[[f32; 4]] {
        &self.positions[..self.live_count]
    }

    pub fn colors(&self) -> &[[u8; 4]] {
        &self.colors[..self.live_count]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Color;
    use cgmath::Vector3;

    fn particle(x: f32) -> Particle {
        Particle {
            position: Vector3::new(x, 1., 2.),
            size: 0.5,
            color: Color::grey(200),
            life: 1.,
            ..Default::default()
        }
    }

    #[test]
    fn only_pushed_entries_are_visible() {
        let mut staging = FrameStaging::new(4);
        staging.push(&particle(1.));
        staging.push(&particle(2.));

        assert_eq!(staging.live_count(), 2);
        assert_eq!(staging.positions(), &[[1., 1., 2., 0.5], [2., 1., 2., 0.5]]);
        assert_eq!(staging.colors(), &[[200, 200, 200, 255]; 2]);
    }

    #[test]
    fn clear_resets_live_count() {
        let mut staging = FrameStaging::new(2);
        staging.push(&particle(1.));
        staging.clear();

        assert_eq!(staging.live_count(), 0);
        assert!(staging.positions().is_empty());
    }

    #[test]
    fn push_past_capacity_is_dropped() {
        let mut staging = FrameStaging::new(1);
        staging.push(&particle(1.));
        staging.push(&particle(2.));

        assert_eq!(staging.live_count(), 1);
        assert_eq!(staging.positions()[0][0], 1.);
    }
}
