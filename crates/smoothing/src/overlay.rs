use crate::interpolator::{InterpolationState, RateInterpolator};
use crate::pacer::{FramePacer, ShutdownFlag};
use overlay_config::OverlayConfig;
use overlay_core::{Channel, Frame, FrameSink, Result, Sample, TrafficReading};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tokio::task::JoinHandle;
use tokio::time::Instant;
use tracing::{info, warn};

/// Monotonic millisecond clock anchored at overlay construction.
#[derive(Debug, Clone, Copy)]
struct Clock {
    epoch: Instant,
}

impl Clock {
    fn new() -> Self {
        Self { epoch: Instant::now() }
    }

    fn millis_at(&self, at: Instant) -> u64 {
        u64::try_from(at.saturating_duration_since(self.epoch).as_millis()).unwrap_or(u64::MAX)
    }
}

struct Shared<S> {
    interpolator: Mutex<RateInterpolator>,
    sink:         Mutex<S>,
    clock:        Clock,
    interpolate:  bool,
    target_fps:   u32,
    full_scale:   u64,
}

/// Lock, ignoring poisoning from a panicked holder.
fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

impl<S: FrameSink> Shared<S> {
    /// Build the frame for `now_ms` (or the raw newest values when `None`) and
    /// hand it to the sink.  Nothing is drawn while the history is empty.
    ///
    /// The emitted values only become the interpolation state once the sink
    /// accepts the frame.
    fn render(&self, now_ms: Option<u64>) -> Result<()> {
        let (frame, previous) = {
            let mut interpolator = lock(&self.interpolator);
            let newest = match interpolator.history().last() {
                Ok(sample) => *sample,
                Err(_) => return Ok(()),
            };
            let previous = interpolator.state();
            let (upload_percent, download_percent) = match now_ms {
                Some(now) => interpolator.evaluate(now)?,
                None      => interpolator.passthrough()?,
            };
            let frame = Frame {
                upload_percent,
                download_percent,
                upload_raw:   newest.raw(Channel::Upload),
                download_raw: newest.raw(Channel::Download),
            };
            (frame, previous)
        };

        let rendered = lock(&self.sink).render(&frame);
        if rendered.is_err() {
            // Pushes never touch the state, so nothing was lost in between.
            lock(&self.interpolator).restore_state(previous);
        }
        rendered
    }
}

/// The rate-smoothing engine behind a traffic overlay.
///
/// Samples come in through [`push_sample`](Self::push_sample) or
/// [`push_reading`](Self::push_reading).  In interpolated mode a
/// [`FramePacer`] started with [`start`](Self::start) renders smoothed frames
/// at the target rate; in direct mode every pushed sample is rendered
/// immediately with its raw values.
///
/// Cloning is cheap and every clone drives the same engine.
pub struct TrafficOverlay<S> {
    shared: Arc<Shared<S>>,
}

impl<S> Clone for TrafficOverlay<S> {
    fn clone(&self) -> Self {
        Self { shared: Arc::clone(&self.shared) }
    }
}

impl<S: FrameSink + 'static> TrafficOverlay<S> {
    pub fn new(config: &OverlayConfig, sink: S) -> Self {
        let smoothing = &config.smoothing;
        Self {
            shared: Arc::new(Shared {
                interpolator: Mutex::new(RateInterpolator::new(smoothing.history_capacity)),
                sink:         Mutex::new(sink),
                clock:        Clock::new(),
                interpolate:  smoothing.interpolate,
                target_fps:   smoothing.target_fps,
                full_scale:   config.monitor.full_scale_bytes,
            }),
        }
    }

    pub fn is_interpolated(&self) -> bool {
        self.shared.interpolate
    }

    /// Milliseconds since the overlay was created.
    pub fn now_ms(&self) -> u64 {
        self.shared.clock.millis_at(Instant::now())
    }

    /// Record a sample.  Timestamps must strictly increase.
    ///
    /// In direct mode the sample is rendered before this returns; a render
    /// failure is logged and does not undo the push.
    pub fn push_sample(&self, sample: Sample) -> Result<()> {
        lock(&self.shared.interpolator).push(sample)?;

        if !self.shared.interpolate {
            if let Err(e) = self.shared.render(None) {
                warn!("Direct render failed: {e}");
            }
        }
        Ok(())
    }

    /// Timestamp a monitor reading with the overlay clock and record it.
    pub fn push_reading(&self, reading: TrafficReading) -> Result<()> {
        let sample = reading.to_sample(self.now_ms(), self.shared.full_scale);
        self.push_sample(sample)
    }

    /// Values most recently handed to the sink.
    pub fn state(&self) -> InterpolationState {
        lock(&self.shared.interpolator).state()
    }

    pub fn history_len(&self) -> usize {
        lock(&self.shared.interpolator).history().len()
    }

    /// Start the frame pacer.  Returns `None` in direct mode, where frames
    /// follow sample arrivals instead.
    pub fn start(&self) -> Option<PacerHandle> {
        if !self.shared.interpolate {
            info!("Interpolation disabled; rendering once per sample");
            return None;
        }

        let shutdown = ShutdownFlag::new();
        let shared = Arc::clone(&self.shared);
        let pacer = FramePacer::new(self.shared.target_fps, shutdown.clone());
        let join = pacer.spawn(move |start| {
            let now = shared.clock.millis_at(start);
            shared.render(Some(now))
        });

        Some(PacerHandle { shutdown, join: Some(join) })
    }
}

/// Owns a running frame pacer.  Dropping the handle asks the loop to stop
/// at its next iteration.
#[derive(Debug)]
pub struct PacerHandle {
    shutdown: ShutdownFlag,
    join:     Option<JoinHandle<u64>>,
}

impl PacerHandle {
    /// Stop the loop and wait for it.  Returns the number of frames rendered.
    pub async fn stop(mut self) -> u64 {
        self.shutdown.request();
        match self.join.take() {
            Some(join) => join.await.unwrap_or_else(|e| {
                warn!("Frame pacer task ended abnormally: {e}");
                0
            }),
            None => 0,
        }
    }
}

impl Drop for PacerHandle {
    fn drop(&mut self) {
        self.shutdown.request();
    }
}
