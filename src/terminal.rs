use overlay_core::{Channel, Frame, FrameSink, Result};
use overlay_system::format_rate;
use std::io::Write;

/// Renders frames as a single, continuously rewritten line of text gauges:
///
/// ```text
/// ↑ [######··············]    12.3KB/s  ↓ [#############·······]   840.0KB/s
/// ```
pub struct TerminalSink<W> {
    out:   W,
    width: usize,
}

impl TerminalSink<std::io::Stdout> {
    pub fn stdout(width: usize) -> Self {
        Self::new(std::io::stdout(), width)
    }
}

impl<W: Write> TerminalSink<W> {
    pub fn new(out: W, width: usize) -> Self {
        Self { out, width: width.max(1) }
    }

    fn gauge(&self, frame: &Frame, channel: Channel) -> String {
        let filled = (frame.fill(channel) * self.width as f32).round() as usize;
        let filled = filled.min(self.width);
        format!("[{}{}]", "#".repeat(filled), "·".repeat(self.width - filled))
    }

    fn line(&self, frame: &Frame) -> String {
        format!(
            "↑ {} {:>12}  ↓ {} {:>12}",
            self.gauge(frame, Channel::Upload),
            format_rate(frame.upload_raw),
            self.gauge(frame, Channel::Download),
            format_rate(frame.download_raw),
        )
    }
}

impl<W: Write + Send> FrameSink for TerminalSink<W> {
    fn render(&mut self, frame: &Frame) -> Result<()> {
        let line = self.line(frame);
        write!(self.out, "\r{line}")?;
        self.out.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_both_gauges_and_labels() {
        let mut sink = TerminalSink::new(Vec::new(), 10);
        let frame = Frame {
            upload_percent:   500,
            download_percent: 1000,
            upload_raw:       1536,
            download_raw:     0,
        };
        sink.render(&frame).unwrap();

        let text = String::from_utf8(sink.out).unwrap();
        assert!(text.starts_with('\r'));
        assert!(text.contains("↑ [#####·····]"));
        assert!(text.contains("↓ [##########]"));
        assert!(text.contains("1.5KB/s"));
        assert!(text.contains("0.0KB/s"));
    }

    #[test]
    fn empty_frame_draws_empty_gauges() {
        let sink = TerminalSink::new(Vec::new(), 4);
        let line = sink.line(&Frame::default());
        assert!(line.contains("↑ [····]"));
        assert!(line.contains("↓ [····]"));
    }
}
