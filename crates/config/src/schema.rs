use overlay_core::{OverlayError, Result};
use serde::{Deserialize, Serialize};

/// Largest history window accepted.  Lagrange evaluation over many widely
/// spaced abscissae loses precision quickly.
pub const MAX_HISTORY_CAPACITY: usize = 5;

/// Root configuration structure parsed from `overlay.toml`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OverlayConfig {
    /// Smoothing engine and frame pacing.
    pub smoothing: SmoothingConfig,
    /// Traffic polling.
    pub monitor: MonitorConfig,
}

impl OverlayConfig {
    /// Reject settings the engine cannot run with.
    pub fn validate(&self) -> Result<()> {
        let s = &self.smoothing;
        if s.target_fps == 0 {
            return Err(OverlayError::Config("smoothing.target_fps must be > 0".into()));
        }
        if !(1..=MAX_HISTORY_CAPACITY).contains(&s.history_capacity) {
            return Err(OverlayError::Config(format!(
                "smoothing.history_capacity must be within 1..={MAX_HISTORY_CAPACITY}, got {}",
                s.history_capacity
            )));
        }

        let m = &self.monitor;
        if m.poll_interval_ms == 0 {
            return Err(OverlayError::Config("monitor.poll_interval_ms must be > 0".into()));
        }
        if m.full_scale_bytes == 0 {
            return Err(OverlayError::Config("monitor.full_scale_bytes must be > 0".into()));
        }
        Ok(())
    }
}

/// Settings for the rate-smoothing engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SmoothingConfig {
    /// `true` = paced, interpolated animation.  `false` = redraw once per
    /// sample with the raw values.
    pub interpolate: bool,
    /// Frame rate of the pacing loop.
    pub target_fps: u32,
    /// Number of samples the interpolating polynomial passes through.
    pub history_capacity: usize,
}

impl Default for SmoothingConfig {
    fn default() -> Self {
        Self {
            interpolate:      true,
            target_fps:       30,
            history_capacity: 3,
        }
    }
}

/// Settings for the background traffic monitor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MonitorConfig {
    /// How often interface counters are sampled.
    pub poll_interval_ms: u64,
    /// Byte rate that fills a gauge completely.
    pub full_scale_bytes: u64,
    /// Interface names to include, e.g. `["wlan0"]`.  Empty = all interfaces.
    pub interfaces: Vec<String>,
}

impl Default for MonitorConfig {
    fn default() -> Self {
        Self {
            poll_interval_ms: 1_000,
            full_scale_bytes: 10 * 1024 * 1024,
            interfaces:       Vec::new(),
        }
    }
}
