//! Rate-smoothing engine for the traffic overlay.
//!
//! - [`SampleHistory`]: bounded window of recent samples
//! - [`RateInterpolator`]: Lagrange smoothing with convergence and overshoot limits
//! - [`FramePacer`]: fixed-cadence render loop
//! - [`TrafficOverlay`]: the lock-guarded engine tying them to a [`FrameSink`]
//!
//! [`FrameSink`]: overlay_core::FrameSink

pub mod history;
pub mod interpolator;
pub mod overlay;
pub mod pacer;
pub mod timing;

pub use history::SampleHistory;
pub use interpolator::{lagrange, InterpolationState, RateInterpolator};
pub use overlay::{PacerHandle, TrafficOverlay};
pub use pacer::{frame_budget, frame_delay, FramePacer, ShutdownFlag};
pub use timing::FrameTimingWindow;
