/// Format a byte rate for a gauge label, e.g. `"1.5KB/s"`.
///
/// Always KiB with one truncated decimal so the label width stays stable
/// while the value animates.
pub fn format_rate(bytes_per_sec: u64) -> String {
    const KIB: u64 = 1 << 10;

    let whole  = bytes_per_sec / KIB;
    let tenths = (bytes_per_sec % KIB) * 10 / KIB;
    format!("{whole}.{tenths}KB/s")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_rate_kib() {
        assert_eq!(format_rate(1536), "1.5KB/s");
        assert_eq!(format_rate(10 * 1024), "10.0KB/s");
    }

    #[test]
    fn format_rate_small() {
        assert_eq!(format_rate(0), "0.0KB/s");
        assert_eq!(format_rate(1023), "0.9KB/s");
    }
}
