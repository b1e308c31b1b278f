//! Configuration errors
//!
//! Sample ingestion never fails. The only fallible surface is turning
//! presentation-layer option payloads into settings.

use thiserror::Error;

/// Errors raised while parsing tracker configuration
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("unknown sensitivity tier: {0:?} (expected low, medium or high)")]
    UnknownSensitivity(String),

    #[error("unknown step detector: {0:?} (expected adaptive or threshold)")]
    UnknownDetector(String),

    #[error("invalid tracker options: {0}")]
    InvalidOptions(#[from] serde_json::Error),
}
