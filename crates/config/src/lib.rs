pub mod schema;

pub use schema::{MonitorConfig, OverlayConfig, SmoothingConfig, MAX_HISTORY_CAPACITY};

use overlay_core::{OverlayError, Result};
use std::path::{Path, PathBuf};

/// Load configuration from a TOML file.  Returns `OverlayConfig::default()` if
/// the file doesn't exist so the overlay always has sensible defaults.
///
/// The loaded config is validated before it is returned.
pub fn load(path: impl AsRef<Path>) -> Result<OverlayConfig> {
    let path = path.as_ref();
    if !path.exists() {
        tracing::warn!(
            "Config file not found at '{}'; using defaults.",
            path.display()
        );
        return Ok(OverlayConfig::default());
    }

    let raw = std::fs::read_to_string(path)
        .map_err(|e| OverlayError::Config(format!("cannot read '{}': {e}", path.display())))?;

    let config: OverlayConfig =
        toml::from_str(&raw).map_err(|e| OverlayError::Config(format!("TOML parse error: {e}")))?;
    config.validate()?;
    Ok(config)
}

/// Return the default config path, honouring `$XDG_CONFIG_HOME`.
pub fn default_path() -> PathBuf {
    let base = std::env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| {
            let home = std::env::var("HOME").unwrap_or_else(|_| ".".to_string());
            PathBuf::from(home).join(".config")
        });
    base.join("traffic-overlay").join("overlay.toml")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scratch_file(name: &str, contents: &str) -> PathBuf {
        let path = std::env::temp_dir().join(format!(
            "overlay-config-{}-{name}.toml",
            std::process::id()
        ));
        std::fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn missing_file_yields_defaults() {
        let path = std::env::temp_dir().join("overlay-config-does-not-exist.toml");
        assert_eq!(load(path).unwrap(), OverlayConfig::default());
    }

    #[test]
    fn loads_file_from_disk() {
        let path = scratch_file("valid", "[smoothing]\ntarget_fps = 60\n");
        let cfg = load(&path).unwrap();
        std::fs::remove_file(&path).ok();
        assert_eq!(cfg.smoothing.target_fps, 60);
    }

    #[test]
    fn invalid_values_are_rejected_on_load() {
        let path = scratch_file("invalid", "[smoothing]\nhistory_capacity = 9\n");
        let result = load(&path);
        std::fs::remove_file(&path).ok();
        assert!(matches!(result, Err(OverlayError::Config(_))));
    }

    #[test]
    fn malformed_toml_is_a_config_error() {
        let path = scratch_file("malformed", "[smoothing\n");
        let result = load(&path);
        std::fs::remove_file(&path).ok();
        assert!(matches!(result, Err(OverlayError::Config(_))));
    }
}
