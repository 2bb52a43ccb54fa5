//! Configuration types for Lumen.
//!
//! The configuration file supports JSONC format (JSON with comments).
//! Every field has a default, so an empty object or a missing file yields the
//! stock behavior.

use std::fs;
use std::path::{Path, PathBuf};

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::constants::{observer, parallax, scroll, widgets};

// ============================================================================
// Sections
// ============================================================================

/// Scroll offsets that toggle discrete presentation state.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default, rename_all = "camelCase")]
pub struct ScrollConfig {
    /// Offset (px) past which the header becomes compact.
    pub header_compact_threshold: f64,

    /// Offset (px) past which the back-to-top button is shown.
    pub back_to_top_threshold: f64,
}

impl Default for ScrollConfig {
    fn default() -> Self {
        Self {
            header_compact_threshold: scroll::HEADER_COMPACT_THRESHOLD,
            back_to_top_threshold: scroll::BACK_TO_TOP_THRESHOLD,
        }
    }
}

/// Hero background parallax.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default, rename_all = "camelCase")]
pub struct ParallaxConfig {
    /// Vertical offset per scrolled pixel.
    pub factor: f64,

    /// Maximum vertical offset (px).
    pub max_offset: f64,

    /// Scale applied together with the translation.
    pub scale: f64,
}

impl Default for ParallaxConfig {
    fn default() -> Self {
        Self {
            factor: parallax::FACTOR,
            max_offset: parallax::MAX_OFFSET,
            scale: parallax::SCALE,
        }
    }
}

/// Visibility observation thresholds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default, rename_all = "camelCase")]
pub struct ObserverConfig {
    /// Visible fraction at which a reveal candidate is revealed.
    pub reveal_threshold: f64,

    /// Visible fractions reported for page sections.
    pub section_thresholds: Vec<f64>,
}

impl Default for ObserverConfig {
    fn default() -> Self {
        Self {
            reveal_threshold: observer::REVEAL_THRESHOLD,
            section_thresholds: observer::SECTION_THRESHOLDS.to_vec(),
        }
    }
}

/// Collaborator widget settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(default, rename_all = "camelCase")]
pub struct WidgetsConfig {
    /// Recipient of the contact form.
    pub contact_recipient: String,

    /// Phone link used when the page has no `tel:` link.
    pub fallback_phone: String,

    /// Accessible label of the floating call link.
    pub call_label: String,

    /// Text of the floating call link.
    pub call_text: String,

    /// Accessible label of the back-to-top button.
    pub back_to_top_label: String,
}

impl Default for WidgetsConfig {
    fn default() -> Self {
        Self {
            contact_recipient: widgets::CONTACT_RECIPIENT.to_string(),
            fallback_phone: widgets::FALLBACK_PHONE.to_string(),
            call_label: widgets::CALL_LABEL.to_string(),
            call_text: widgets::CALL_TEXT.to_string(),
            back_to_top_label: widgets::BACK_TO_TOP_LABEL.to_string(),
        }
    }
}

// ============================================================================
// Root
// ============================================================================

/// Root configuration structure for Lumen.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default, rename_all = "camelCase")]
pub struct LumenConfig {
    /// JSON Schema reference, ignored at runtime.
    #[serde(rename = "$schema", skip_serializing_if = "Option::is_none")]
    pub schema: Option<String>,

    /// Scroll thresholds.
    pub scroll: ScrollConfig,

    /// Parallax parameters.
    pub parallax: ParallaxConfig,

    /// Observation thresholds.
    pub observer: ObserverConfig,

    /// Widget settings.
    pub widgets: WidgetsConfig,
}

// ============================================================================
// Loading
// ============================================================================

/// Errors that can occur when loading the configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// No configuration file was found in any of the expected locations.
    #[error(
        "No configuration file found. Expected at $XDG_CONFIG_HOME/lumen/config.jsonc or ~/.lumen.jsonc"
    )]
    NotFound,
    /// The configuration file exists but could not be read.
    #[error("Failed to read configuration file: {0}")]
    IoError(#[from] std::io::Error),
    /// The configuration file contains invalid JSON.
    #[error("Failed to parse configuration file: {0}")]
    ParseError(#[from] serde_json::Error),
}

/// Configuration file names searched in each config directory.
const CONFIG_FILE_NAMES: &[&str] = &["config.jsonc", "config.json"];

/// Configuration file names searched in the home directory.
const HOME_CONFIG_FILE_NAMES: &[&str] = &[".lumen.jsonc", ".lumen.json"];

/// Returns the possible configuration file paths in priority order.
///
/// 1. `$XDG_CONFIG_HOME/lumen/`
/// 2. `~/.config/lumen/`
/// 3. The platform config directory
/// 4. `~/.lumen.jsonc` and `~/.lumen.json`
#[must_use]
pub fn config_paths() -> Vec<PathBuf> {
    let mut paths: Vec<PathBuf> = Vec::new();

    if let Ok(xdg_config) = std::env::var("XDG_CONFIG_HOME")
        && !xdg_config.is_empty()
    {
        push_dir(PathBuf::from(xdg_config).join("lumen"), &mut paths);
    }

    if let Some(home) = dirs::home_dir() {
        push_dir(home.join(".config").join("lumen"), &mut paths);
    }

    if let Some(config_dir) = dirs::config_dir() {
        push_dir(config_dir.join("lumen"), &mut paths);
    }

    if let Some(home) = dirs::home_dir() {
        for filename in HOME_CONFIG_FILE_NAMES {
            paths.push(home.join(filename));
        }
    }

    paths
}

/// Appends the config file names in `dir`, skipping duplicates.
fn push_dir(dir: PathBuf, paths: &mut Vec<PathBuf>) {
    for filename in CONFIG_FILE_NAMES {
        let path = dir.join(filename);
        // XDG_CONFIG_HOME is often ~/.config
        if !paths.contains(&path) {
            paths.push(path);
        }
    }
}

/// Parses configuration text, stripping comments first.
///
/// # Errors
///
/// Returns `ConfigError::ParseError` if the text is not valid JSONC.
pub fn parse_config(text: &str) -> Result<LumenConfig, ConfigError> {
    let reader = json_comments::StripComments::new(text.as_bytes());
    Ok(serde_json::from_reader(reader)?)
}

/// Loads the configuration from a specific file.
///
/// # Errors
///
/// Returns an error if the file cannot be read or parsed.
pub fn load_config_from_path(path: &PathBuf) -> Result<(LumenConfig, PathBuf), ConfigError> {
    let config = read_config(path)?;
    Ok((config, path.clone()))
}

/// Loads the configuration from the first existing default location.
///
/// # Errors
///
/// Returns `ConfigError::NotFound` if no file exists, or a read or parse error.
pub fn load_config() -> Result<(LumenConfig, PathBuf), ConfigError> {
    for path in config_paths() {
        if path.exists() {
            let config = read_config(&path)?;
            return Ok((config, path));
        }
    }

    Err(ConfigError::NotFound)
}

fn read_config(path: &Path) -> Result<LumenConfig, ConfigError> {
    let file = fs::File::open(path)?;
    // Strip comments from JSONC before parsing
    let reader = json_comments::StripComments::new(file);
    Ok(serde_json::from_reader(reader)?)
}
