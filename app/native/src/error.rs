//! Error types for Lumen.
//!
//! The page controller itself never fails: missing elements and capabilities
//! degrade silently. These errors cover the host side (configuration, scenario
//! files, and the CLI).

use serde::Serialize;
use thiserror::Error;

/// Errors that can occur while hosting the controller.
///
/// Serializes with a `kind` tag so `--json` output carries structured errors.
#[derive(Debug, Error, Serialize)]
#[serde(tag = "kind", content = "message")]
pub enum LumenError {
    /// Invalid command arguments.
    #[error("{0}")]
    InvalidArguments(String),
    /// Configuration error.
    #[error("Configuration error: {0}")]
    ConfigError(String),
    /// Scenario file could not be loaded or replayed.
    #[error("Scenario error: {0}")]
    ScenarioError(String),
    /// IO error.
    #[error("IO error: {0}")]
    IoError(String),
    /// Generic command error.
    #[error("{0}")]
    CommandError(String),
}

impl From<std::io::Error> for LumenError {
    fn from(err: std::io::Error) -> Self { Self::IoError(err.to_string()) }
}

impl From<serde_json::Error> for LumenError {
    fn from(err: serde_json::Error) -> Self { Self::CommandError(err.to_string()) }
}

impl From<crate::config::ConfigError> for LumenError {
    fn from(err: crate::config::ConfigError) -> Self { Self::ConfigError(err.to_string()) }
}

impl From<String> for LumenError {
    fn from(msg: String) -> Self { Self::CommandError(msg) }
}

impl From<&str> for LumenError {
    fn from(msg: &str) -> Self { Self::CommandError(msg.to_string()) }
}
