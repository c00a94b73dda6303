//! Smoothed gauge values from a short window of irregular samples.
//!
//! Samples arrive once per measurement tick but frames are drawn far more
//! often, so each frame evaluates the Lagrange polynomial through the whole
//! history window at a point slightly behind "now".  Two local rules keep the
//! curve honest:
//!
//! - **Convergence**: once more than three sampling intervals have passed
//!   since the newest sample, the raw value is shown as-is.
//! - **Overshoot limiting**: while the gauge is moving in one direction it may
//!   not pass the newest measured value.

use crate::history::SampleHistory;
use overlay_core::{Channel, OverlayError, Result, Sample, GAUGE_MAX};

/// Staleness threshold, in multiples of the newest sampling interval.
const CONVERGENCE_INTERVALS: i128 = 3;

/// Last value emitted per channel.  Starts at zero.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InterpolationState {
    pub last_upload:   u16,
    pub last_download: u16,
}

impl InterpolationState {
    #[must_use]
    pub fn last(&self, channel: Channel) -> u16 {
        match channel {
            Channel::Upload   => self.last_upload,
            Channel::Download => self.last_download,
        }
    }

    fn record(&mut self, channel: Channel, value: u16) {
        match channel {
            Channel::Upload   => self.last_upload = value,
            Channel::Download => self.last_download = value,
        }
    }
}

/// Owns the sample window and the emitted-value state.
#[derive(Debug, Clone, Default)]
pub struct RateInterpolator {
    history: SampleHistory,
    state:   InterpolationState,
}

impl RateInterpolator {
    pub fn new(capacity: usize) -> Self {
        Self {
            history: SampleHistory::new(capacity),
            state:   InterpolationState::default(),
        }
    }

    pub fn history(&self) -> &SampleHistory {
        &self.history
    }

    pub fn state(&self) -> InterpolationState {
        self.state
    }

    /// Put back a state captured with [`state`](Self::state), discarding
    /// values emitted since.
    pub fn restore_state(&mut self, state: InterpolationState) {
        self.state = state;
    }

    /// Append a sample.  Timestamps must strictly increase: two equal
    /// abscissae make the interpolating polynomial undefined.
    pub fn push(&mut self, sample: Sample) -> Result<()> {
        if let Ok(last) = self.history.last() {
            if sample.timestamp <= last.timestamp {
                return Err(OverlayError::DuplicateTimestamp {
                    timestamp: sample.timestamp,
                    last:      last.timestamp,
                });
            }
        }
        self.history.push(sample);
        Ok(())
    }

    /// Newest raw gauge values, recorded as the last emitted ones.
    pub fn passthrough(&mut self) -> Result<(u16, u16)> {
        let newest = *self.history.last()?;
        Ok((
            self.emit(Channel::Upload, newest.upload_percent),
            self.emit(Channel::Download, newest.download_percent),
        ))
    }

    /// Smoothed `(upload, download)` gauge values at `now` (monotonic ms).
    pub fn evaluate(&mut self, now: u64) -> Result<(u16, u16)> {
        let newest = *self.history.last()?;
        let n = self.history.len() - 1;
        if n < 2 {
            return self.passthrough();
        }

        let previous = self.history.at(n - 1)?;
        let last_interval = wide_ms(newest.timestamp) - wide_ms(previous.timestamp);
        let elapsed = wide_ms(now) - wide_ms(newest.timestamp);
        if elapsed > CONVERGENCE_INTERVALS * last_interval {
            return self.passthrough();
        }

        // Half an interval behind `now`.
        let at = wide_ms(now) - last_interval / 2;
        // Abscissae relative to the newest sample.
        let origin = wide_ms(newest.timestamp);
        let xs: Vec<f64> = self
            .history
            .iter()
            .map(|s| (wide_ms(s.timestamp) - origin) as f64)
            .collect();
        let x = (at - origin) as f64;

        let mut out = [0u16; 2];
        for (slot, channel) in out.iter_mut().zip(Channel::ALL) {
            let ys: Vec<f64> = self.history.iter().map(|s| f64::from(s.percent(channel))).collect();
            let current = newest.percent(channel);
            let p = lagrange(&xs, &ys, x);
            // Abscissae that collapse in f64 leave no usable polynomial.
            let value = if p.is_finite() {
                settle(p, self.state.last(channel), current)
            } else {
                current
            };
            *slot = self.emit(channel, value);
        }
        Ok((out[0], out[1]))
    }

    fn emit(&mut self, channel: Channel, value: u16) -> u16 {
        self.state.record(channel, value);
        value
    }
}

/// Every `u64` timestamp and any difference of two fits without overflow.
fn wide_ms(ms: u64) -> i128 {
    i128::from(ms)
}

/// Value at `x` of the polynomial through every `(xs[i], ys[i])`.
///
/// `xs` must be pairwise distinct.
pub fn lagrange(xs: &[f64], ys: &[f64], x: f64) -> f64 {
    debug_assert_eq!(xs.len(), ys.len());
    xs.iter()
        .zip(ys)
        .enumerate()
        .map(|(i, (&xi, &yi))| {
            let (num, den) = xs
                .iter()
                .enumerate()
                .filter(|&(j, _)| j != i)
                .fold((1.0, 1.0), |(num, den), (_, &xj)| {
                    (num * (x - xj), den * (xi - xj))
                });
            yi * num / den
        })
        .sum()
}

/// Turn a raw polynomial value into a gauge value.
///
/// Out-of-range values are pinned to the gauge bounds.  In range, a value
/// moving away from `last` may not pass `current`, the newest measurement.
fn settle(p: f64, last: u16, current: u16) -> u16 {
    // Rounded, not truncated: float error must not turn a constant 500 into 499.
    let p = p.round() as i64;
    if p < 0 {
        return 0;
    }
    if p > i64::from(GAUGE_MAX) {
        return GAUGE_MAX;
    }

    let current = i64::from(current);
    let direction = p - i64::from(last);
    let overshot = (direction > 0 && p > current) || (direction < 0 && p < current);
    if overshot {
        current as u16
    } else {
        p as u16
    }
}
