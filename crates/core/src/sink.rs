use crate::{error::Result, sample::Frame};

/// The drawing side of the overlay.
///
/// The smoothing engine never touches pixels: it hands every finished
/// [`Frame`] to a sink, which owns layout, colors and text formatting.
/// A returned error is logged by the caller and the next frame proceeds.
pub trait FrameSink: Send {
    fn render(&mut self, frame: &Frame) -> Result<()>;
}

impl<F> FrameSink for F
where
    F: FnMut(&Frame) -> Result<()> + Send,
{
    fn render(&mut self, frame: &Frame) -> Result<()> {
        self(frame)
    }
}
