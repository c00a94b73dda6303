use thiserror::Error;

/// Top-level error type used across the entire overlay.
#[derive(Debug, Error)]
pub enum OverlayError {
    #[error("config error: {0}")]
    Config(String),

    #[error("system error: {0}")]
    System(String),

    #[error("render error: {0}")]
    Render(String),

    #[error("sample history is empty")]
    EmptyHistory,

    #[error("sample index {index} out of range (history holds {len})")]
    IndexOutOfRange { index: usize, len: usize },

    /// A sample was pushed whose timestamp does not advance past the newest one.
    /// Interpolation divides by timestamp differences, so this is rejected at push time.
    #[error("sample timestamp {timestamp} ms does not advance past {last} ms")]
    DuplicateTimestamp { timestamp: u64, last: u64 },

    #[error("I/O error: {source}")]
    Io {
        #[from]
        source: std::io::Error,
    },
}

pub type Result<T, E = OverlayError> = std::result::Result<T, E>;
