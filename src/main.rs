//! overlay — live network-traffic gauges with smoothed animation.
//!
//! Run with:  `RUST_LOG=info overlay`

mod terminal;

use anyhow::Result;
use overlay_smoothing::TrafficOverlay;
use terminal::TerminalSink;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

/// Characters per gauge bar.
const GAUGE_WIDTH: usize = 20;

#[tokio::main]
async fn main() -> Result<()> {
    // Structured logging — RUST_LOG controls verbosity (default: info).
    // Logs go to stderr so they don't tear the gauge line on stdout.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    info!("overlay v{} starting", env!("CARGO_PKG_VERSION"));

    let config = overlay_config::load(overlay_config::default_path())?;
    let overlay = TrafficOverlay::new(&config, TerminalSink::stdout(GAUGE_WIDTH));
    info!(
        "Rendering {} at {} fps target",
        if overlay.is_interpolated() { "interpolated" } else { "direct" },
        config.smoothing.target_fps,
    );
    let pacer = overlay.start();

    let mut readings = overlay_system::spawn_monitor(&config.monitor);
    let ctrl_c = tokio::signal::ctrl_c();
    tokio::pin!(ctrl_c);

    loop {
        tokio::select! {
            reading = readings.recv() => match reading {
                Some(reading) => {
                    if let Err(e) = overlay.push_reading(reading) {
                        warn!("Dropped traffic sample: {e}");
                    }
                }
                None => {
                    warn!("Traffic monitor stopped");
                    break;
                }
            },
            _ = &mut ctrl_c => {
                info!("Shutdown requested");
                break;
            }
        }
    }

    if let Some(pacer) = pacer {
        let frames = pacer.stop().await;
        info!("Rendered {frames} frames");
    }
    println!();
    Ok(())
}
