use std::time::Instant;

const FPS_UPDATE_INTERVAL: f32 = 1.0;

/// Frame clock - tracks delta time and a rolling FPS figure
#[derive(Debug)]
pub struct Clock {
    last_tick: Instant,
    frame_count: u32,
    fps_timer: f32,
    fps: f32,
}

impl Clock {
    /// Create new clock starting now
    pub fn new() -> Self {
        Self {
            last_tick: Instant::now(),
            frame_count: 0,
            fps_timer: 0.0,
            fps: 0.0,
        }
    }

    /// Get delta time since last tick and advance clock
    /// Returns delta in seconds
    pub fn tick(&mut self) -> f32 {
        let now = Instant::now();
        let delta = now.duration_since(self.last_tick).as_secs_f32();
        self.last_tick = now;
        self.record_frame(delta);
        delta
    }

    /// Count one frame of `delta` seconds. Returns the new FPS value once per
    /// update interval.
    pub fn record_frame(&mut self, delta: f32) -> Option<f32> {
        self.frame_count += 1;
        self.fps_timer += delta;

        if self.fps_timer < FPS_UPDATE_INTERVAL {
            return None;
        }
        self.fps = self.frame_count as f32 / self.fps_timer;
        self.frame_count = 0;
        self.fps_timer = 0.0;
        log::debug!("FPS: {:.1}", self.fps);
        Some(self.fps)
    }

    pub fn fps(&self) -> f32 {
        self.fps
    }

    /// Reset clock to current time
    pub fn reset(&mut self) {
        self.last_tick = Instant::now();
    }
}

impl Default for Clock {
    fn default() -> Self {
        Self::new()
    }
}
