use std::time::{Duration, Instant};

pub struct FrameStats {
    interval: Duration,
    frames: u32,
    since: Option<Instant>,
}

impl FrameStats {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            frames: 0,
            since: None,
        }
    }

    /// Counts one frame. Returns frames per second once every interval.
    pub fn frame(&mut self, now: Instant) -> Option<f64> {
        let since = *self.since.get_or_insert(now);
        self.frames += 1;

        let elapsed = now.saturating_duration_since(since);
        if elapsed < self.interval || elapsed.is_zero() {
            return None;
        }

        let fps = self.frames as f64 / elapsed.as_secs_f64();
        self.frames = 0;
        self.since = Some(now);

        Some(fps)
    }
}

impl Default for FrameStats {
    fn default() -> Self {
        Self::new(Duration::from_secs(5))
    }
}
