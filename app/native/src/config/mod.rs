//! Configuration module for Lumen.
//!
//! The configuration file supports JSONC format (JSON with comments).
//! Both single-line (`//`) and multi-line (`/* */`) comments are allowed.
//! The loaded configuration is process-wide and read-only once initialized.

pub mod types;

use std::path::PathBuf;
use std::sync::OnceLock;

pub use types::{
    ConfigError, LumenConfig, ObserverConfig, ParallaxConfig, ScrollConfig, WidgetsConfig,
    config_paths, load_config as load_config_default, load_config_from_path, parse_config,
};

/// Global configuration instance, loaded once at startup.
static CONFIG: OnceLock<LumenConfig> = OnceLock::new();

/// Path to the currently loaded configuration file.
static CONFIG_PATH: OnceLock<PathBuf> = OnceLock::new();

/// Custom config path override (set via CLI --config flag).
static CUSTOM_CONFIG_PATH: OnceLock<PathBuf> = OnceLock::new();

/// Sets a custom configuration file path to use instead of the default search paths.
///
/// This must be called before `get_config()` to take effect.
///
/// Returns `false` if a path was already set.
pub fn set_custom_config_path(path: PathBuf) -> bool { CUSTOM_CONFIG_PATH.set(path).is_ok() }

/// Loads the configuration from disk, falling back to defaults.
fn load_or_default() -> LumenConfig {
    let result = CUSTOM_CONFIG_PATH.get().map_or_else(load_config_default, load_config_from_path);

    match result {
        Ok((config, path)) => {
            tracing::debug!(path = %path.display(), "configuration loaded");
            let _ = CONFIG_PATH.set(path);
            config
        }
        Err(ConfigError::NotFound) => {
            tracing::debug!("no configuration file, using defaults");
            LumenConfig::default()
        }
        Err(err) => {
            tracing::warn!(error = %err, "failed to load configuration, using defaults");
            LumenConfig::default()
        }
    }
}

/// Returns the global configuration instance, initializing it if necessary.
pub fn get_config() -> &'static LumenConfig { CONFIG.get_or_init(load_or_default) }

/// Returns the path to the loaded configuration file, if any.
pub fn get_config_path() -> Option<&'static PathBuf> { CONFIG_PATH.get() }

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_error() {
        let err = ConfigError::NotFound;
        assert!(err.to_string().contains("No configuration file found"));
    }

    #[test]
    fn test_section_defaults_are_reexported() {
        let config = LumenConfig::default();
        assert_eq!(config.scroll, ScrollConfig::default());
        assert_eq!(config.parallax, ParallaxConfig::default());
        assert_eq!(config.observer, ObserverConfig::default());
        assert_eq!(config.widgets, WidgetsConfig::default());
    }
}
