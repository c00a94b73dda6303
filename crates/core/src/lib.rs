pub mod error;
pub mod sample;
pub mod sink;

pub use error::{OverlayError, Result};
pub use sample::{per_mille, Channel, Frame, Sample, TrafficReading, GAUGE_MAX};
pub use sink::FrameSink;
