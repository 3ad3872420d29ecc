use std::time::{Duration, Instant};

const FPS_LOG_INTERVAL: usize = 120;

pub struct Clock {
    instant: Instant,
    last_update: Duration,
    current_delta: Duration,
    frame: usize,
}

impl Default for Clock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock {
    pub fn new() -> Self {
        Self {
            instant: Instant::now(),
            last_update: Duration::ZERO,
            current_delta: Duration::ZERO,
            frame: 0,
        }
    }

    pub fn update(&mut self) {
        let now = self.instant.elapsed();
        self.advance(now);
    }

    fn advance(&mut self, now: Duration) {
        self.current_delta = now.saturating_sub(self.last_update);
        self.last_update = now;
        self.frame += 1;

        if self.frame % FPS_LOG_INTERVAL == 0 && self.delta_sec() > 0. {
            log::debug!(
                "Frame {}: {:.0} FPS, {:.2} ms",
                self.frame,
                1. / self.delta_sec(),
                self.delta_sec() * 1000.
            );
        }
    }

    pub fn delta(&self) -> Duration {
        self.current_delta
    }

    pub fn delta_sec(&self) -> f32 {
        self.current_delta.as_secs_f32()
    }

    pub fn elapsed_sec(&self) -> f32 {
        self.instant.elapsed().as_secs_f32()
    }

    pub fn frame(&self) -> usize {
        self.frame
    }
}
