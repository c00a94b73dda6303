/// Upper bound of a per-mille gauge value.
pub const GAUGE_MAX: u16 = 1000;

/// Which direction of traffic a gauge value belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Channel {
    Upload,
    Download,
}

impl Channel {
    pub const ALL: [Channel; 2] = [Channel::Upload, Channel::Download];
}

/// Convert a byte rate into a per-mille gauge value against `full_scale`.
///
/// Rates at or above `full_scale` saturate at [`GAUGE_MAX`].  A zero
/// `full_scale` reads as an empty gauge.
#[must_use]
pub fn per_mille(bytes_per_sec: u64, full_scale: u64) -> u16 {
    if full_scale == 0 {
        return 0;
    }
    let scaled = u128::from(bytes_per_sec) * u128::from(GAUGE_MAX) / u128::from(full_scale);
    scaled.min(u128::from(GAUGE_MAX)) as u16
}

/// One raw throughput reading from the system monitor, before gauge conversion.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TrafficReading {
    /// Transmit rate in bytes/second.
    pub upload: u64,
    /// Receive rate in bytes/second.
    pub download: u64,
}

impl TrafficReading {
    /// Stamp this reading and scale both rates against `full_scale`.
    #[must_use]
    pub fn to_sample(&self, timestamp: u64, full_scale: u64) -> Sample {
        Sample::new(
            timestamp,
            self.upload,
            per_mille(self.upload, full_scale),
            self.download,
            per_mille(self.download, full_scale),
        )
    }
}

/// A timestamped throughput measurement.
///
/// Percent fields are per-mille gauge values (`0..=1000`) used for bar fill;
/// raw fields are bytes/second and only feed the text labels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Sample {
    /// Monotonic milliseconds.
    pub timestamp:        u64,
    pub upload_raw:       u64,
    pub upload_percent:   u16,
    pub download_raw:     u64,
    pub download_percent: u16,
}

impl Sample {
    pub fn new(
        timestamp: u64,
        upload_raw: u64,
        upload_percent: u16,
        download_raw: u64,
        download_percent: u16,
    ) -> Self {
        Self {
            timestamp,
            upload_raw,
            upload_percent: upload_percent.min(GAUGE_MAX),
            download_raw,
            download_percent: download_percent.min(GAUGE_MAX),
        }
    }

    /// Gauge value for one channel.
    #[must_use]
    pub fn percent(&self, channel: Channel) -> u16 {
        match channel {
            Channel::Upload   => self.upload_percent,
            Channel::Download => self.download_percent,
        }
    }

    /// Byte rate for one channel.
    #[must_use]
    pub fn raw(&self, channel: Channel) -> u64 {
        match channel {
            Channel::Upload   => self.upload_raw,
            Channel::Download => self.download_raw,
        }
    }
}

/// Everything a renderer needs to draw one frame.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Frame {
    pub upload_percent:   u16,
    pub download_percent: u16,
    /// Newest sample's upload rate, for the label.
    pub upload_raw:       u64,
    /// Newest sample's download rate, for the label.
    pub download_raw:     u64,
}

impl Frame {
    /// Gauge fill as a fraction in `[0, 1]`.
    #[must_use]
    pub fn fill(&self, channel: Channel) -> f32 {
        let p = match channel {
            Channel::Upload   => self.upload_percent,
            Channel::Download => self.download_percent,
        };
        f32::from(p.min(GAUGE_MAX)) / f32::from(GAUGE_MAX)
    }
}
