use overlay_core::{OverlayError, Result, Sample};
use std::collections::VecDeque;

/// Number of samples kept when nothing else is configured.
pub const DEFAULT_CAPACITY: usize = 3;

/// Rolling window of the most recent throughput samples, oldest first.
#[derive(Debug, Clone)]
pub struct SampleHistory {
    samples:  VecDeque<Sample>,
    capacity: usize,
}

impl Default for SampleHistory {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}

impl SampleHistory {
    /// A zero capacity is raised to one so the newest sample is always kept.
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            samples: VecDeque::with_capacity(capacity + 1),
            capacity,
        }
    }

    /// Push a new sample, evicting the oldest until back at capacity.
    pub fn push(&mut self, sample: Sample) {
        self.samples.push_back(sample);
        while self.samples.len() > self.capacity {
            self.samples.pop_front();
        }
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Sample at `index`, `0` being the oldest.
    pub fn at(&self, index: usize) -> Result<&Sample> {
        if self.samples.is_empty() {
            return Err(OverlayError::EmptyHistory);
        }
        self.samples.get(index).ok_or(OverlayError::IndexOutOfRange {
            index,
            len: self.samples.len(),
        })
    }

    /// Most recently pushed sample.
    pub fn last(&self) -> Result<&Sample> {
        self.samples.back().ok_or(OverlayError::EmptyHistory)
    }

    pub fn iter(&self) -> impl ExactSizeIterator<Item = &Sample> + '_ {
        self.samples.iter()
    }
}
