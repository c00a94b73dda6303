use crate::timing::FrameTimingWindow;
use overlay_core::Result;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::{self, Instant};
use tracing::{debug, info, warn};

/// Shortest pause between frames, even when a frame ran over budget.
pub const MIN_FRAME_SLEEP: Duration = Duration::from_millis(1);

/// Time available to one frame at `fps` frames per second, in whole milliseconds.
#[must_use]
pub fn frame_budget(fps: u32) -> Duration {
    Duration::from_millis(1_000 / u64::from(fps.max(1)))
}

/// How long to sleep after a frame that took `elapsed`.
#[must_use]
pub fn frame_delay(budget: Duration, elapsed: Duration) -> Duration {
    budget.saturating_sub(elapsed).max(MIN_FRAME_SLEEP)
}

/// Cooperative stop signal, checked once at the top of every frame.
#[derive(Debug, Clone, Default)]
pub struct ShutdownFlag(Arc<AtomicBool>);

impl ShutdownFlag {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn request(&self) {
        self.0.store(true, Ordering::Release);
    }

    pub fn is_requested(&self) -> bool {
        self.0.load(Ordering::Acquire)
    }
}

/// Drives a render step at a fixed cadence.
///
/// Each iteration runs the step with the frame's start time, then sleeps for
/// whatever is left of the frame budget.  A failing step is logged and the
/// next frame runs as usual.
#[derive(Debug)]
pub struct FramePacer {
    budget:   Duration,
    shutdown: ShutdownFlag,
    timing:   FrameTimingWindow,
}

impl FramePacer {
    pub fn new(target_fps: u32, shutdown: ShutdownFlag) -> Self {
        Self {
            budget: frame_budget(target_fps),
            shutdown,
            timing: FrameTimingWindow::default(),
        }
    }

    /// Run the loop on a background Tokio task.  The handle resolves to the
    /// number of frames run once the shutdown flag is observed.
    pub fn spawn<F>(self, step: F) -> JoinHandle<u64>
    where
        F: FnMut(Instant) -> Result<()> + Send + 'static,
    {
        tokio::spawn(self.run(step))
    }

    pub async fn run<F>(mut self, mut step: F) -> u64
    where
        F: FnMut(Instant) -> Result<()>,
    {
        info!("Frame pacer started ({} ms/frame)", self.budget.as_millis());
        let mut frames: u64 = 0;

        while !self.shutdown.is_requested() {
            let start = Instant::now();
            if let Err(e) = step(start) {
                warn!("Frame {frames} failed: {e}");
            }
            frames += 1;

            let now = Instant::now();
            self.timing.record(now);
            if self.timing.is_full() && frames % self.timing.len() as u64 == 0 {
                if let Some(fps) = self.timing.fps(now) {
                    debug!(fps, "measured frame rate");
                }
            }

            time::sleep(frame_delay(self.budget, now - start)).await;
        }

        info!("Frame pacer stopped after {frames} frames");
        frames
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use overlay_core::OverlayError;
    use std::sync::Mutex;

    #[test]
    fn budget_for_thirty_fps() {
        assert_eq!(frame_budget(30), Duration::from_millis(33));
        assert_eq!(frame_budget(0), Duration::from_millis(1_000));
    }

    #[test]
    fn delay_is_remaining_budget() {
        let budget = Duration::from_millis(33);
        assert_eq!(frame_delay(budget, Duration::ZERO), budget);
        assert_eq!(frame_delay(budget, Duration::from_millis(5)), Duration::from_millis(28));
    }

    #[test]
    fn delay_never_below_minimum() {
        let budget = Duration::from_millis(33);
        assert_eq!(frame_delay(budget, budget), MIN_FRAME_SLEEP);
        assert_eq!(frame_delay(budget, Duration::from_millis(500)), MIN_FRAME_SLEEP);
    }

    #[tokio::test(start_paused = true)]
    async fn frames_start_one_budget_apart() {
        let shutdown = ShutdownFlag::new();
        let starts = Arc::new(Mutex::new(Vec::new()));

        let pacer = FramePacer::new(30, shutdown.clone());
        let recorded = Arc::clone(&starts);
        let frames = pacer
            .spawn(move |start| {
                let mut starts = recorded.lock().unwrap();
                starts.push(start);
                if starts.len() == 5 {
                    shutdown.request();
                }
                Ok(())
            })
            .await
            .unwrap();

        assert_eq!(frames, 5);
        let starts = starts.lock().unwrap();
        for pair in starts.windows(2) {
            assert_eq!(pair[1] - pair[0], Duration::from_millis(33));
        }
    }

    #[tokio::test(start_paused = true)]
    async fn failed_frame_does_not_stop_the_loop() {
        let shutdown = ShutdownFlag::new();
        let calls = Arc::new(Mutex::new(0u32));

        let counter = Arc::clone(&calls);
        let stop = shutdown.clone();
        let frames = FramePacer::new(30, shutdown)
            .run(move |_| {
                let mut calls = counter.lock().unwrap();
                *calls += 1;
                if *calls == 6 {
                    stop.request();
                }
                if *calls == 2 {
                    return Err(OverlayError::Render("surface lost".into()));
                }
                Ok(())
            })
            .await;

        assert_eq!(frames, 6);
        assert_eq!(*calls.lock().unwrap(), 6);
    }

    #[tokio::test(start_paused = true)]
    async fn shutdown_before_start_runs_no_frames() {
        let shutdown = ShutdownFlag::new();
        shutdown.request();
        let frames = FramePacer::new(30, shutdown).run(|_| Ok(())).await;
        assert_eq!(frames, 0);
    }
}
