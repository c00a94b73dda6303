use std::collections::VecDeque;
use tokio::time::Instant;

/// Frames remembered for the measured-fps diagnostic.
pub const TIMING_WINDOW: usize = 24;

/// Timestamps of the most recent frames, for measuring the real frame rate.
#[derive(Debug, Clone)]
pub struct FrameTimingWindow {
    frames:   VecDeque<Instant>,
    capacity: usize,
}

impl Default for FrameTimingWindow {
    fn default() -> Self {
        Self::new(TIMING_WINDOW)
    }
}

impl FrameTimingWindow {
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            frames: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    pub fn record(&mut self, at: Instant) {
        if self.frames.len() == self.capacity {
            self.frames.pop_front();
        }
        self.frames.push_back(at);
    }

    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn is_full(&self) -> bool {
        self.frames.len() == self.capacity
    }

    /// Frames per second over the window, measured up to `now`.
    /// `None` until a frame exists and some time has passed since the oldest.
    pub fn fps(&self, now: Instant) -> Option<f32> {
        let first = self.frames.front()?;
        let span = now.saturating_duration_since(*first).as_secs_f32();
        if span <= 0.0 {
            return None;
        }
        Some(self.frames.len() as f32 / span)
    }
}
