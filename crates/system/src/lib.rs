pub mod format;

pub use format::format_rate;

use overlay_config::MonitorConfig;
use overlay_core::TrafficReading;
use sysinfo::Networks;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::time;
use tracing::debug;

/// Spawn a background Tokio task that polls interface counters every
/// `poll_interval_ms` milliseconds and forwards [`TrafficReading`]s through
/// the returned channel.
///
/// The task stops automatically when the receiver is dropped.
pub fn spawn_monitor(config: &MonitorConfig) -> mpsc::Receiver<TrafficReading> {
    let (tx, rx) = mpsc::channel(4);
    let interval = Duration::from_millis(config.poll_interval_ms.max(1));
    let interval_secs = interval.as_secs_f64();
    let interfaces = config.interfaces.clone();

    tokio::spawn(async move {
        let mut networks = Networks::new_with_refreshed_list();
        let mut ticker   = time::interval(interval);
        // The first tick completes immediately; its deltas cover the time since
        // the list was built rather than a full interval.
        ticker.tick().await;
        networks.refresh(false);

        loop {
            ticker.tick().await;
            networks.refresh(false); // false = keep existing interfaces list

            let reading = take_reading(&networks, &interfaces, interval_secs);
            debug!(up = reading.upload, down = reading.download, "traffic sample");

            if tx.send(reading).await.is_err() {
                break; // all receivers dropped
            }
        }
    });

    rx
}

fn take_reading(networks: &Networks, interfaces: &[String], interval_secs: f64) -> TrafficReading {
    // `received()` / `transmitted()` are deltas since the last refresh.
    // Dividing by the interval gives bytes/second.
    let (raw_rx, raw_tx) = networks
        .iter()
        .filter(|(name, _)| selected(name, interfaces))
        .fold((0u64, 0u64), |(rx, tx), (_, d)| {
            (rx.saturating_add(d.received()), tx.saturating_add(d.transmitted()))
        });

    TrafficReading {
        upload:   (raw_tx as f64 / interval_secs) as u64,
        download: (raw_rx as f64 / interval_secs) as u64,
    }
}

/// An empty filter selects every interface.
fn selected(name: &str, interfaces: &[String]) -> bool {
    interfaces.is_empty() || interfaces.iter().any(|i| i == name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_filter_selects_all() {
        assert!(selected("eth0", &[]));
        assert!(selected("lo", &[]));
    }

    #[test]
    fn filter_matches_exact_names() {
        let filter = vec!["wlan0".to_string()];
        assert!(selected("wlan0", &filter));
        assert!(!selected("wlan", &filter));
        assert!(!selected("eth0", &filter));
    }
}
