//! Boundary validation errors.
//!
//! The simulation step itself cannot fail. Everything that could poison it
//! (malformed timestamps, nonsense field sizes) is rejected here, before it
//! reaches `sim`.

use std::fmt;

/// Errors raised at the edge between the host and the core
#[derive(Debug)]
pub enum GameError {
    /// Frame timestamp was NaN/infinite or went backwards.
    InvalidTimestamp {
        /// The rejected timestamp (ms).
        now_ms: f64,
        /// The previous accepted timestamp, if any.
        last_ms: Option<f64>,
    },

    /// A configuration value is outside its accepted range.
    InvalidConfig {
        /// Name of the offending field.
        field: &'static str,
        /// The rejected value.
        value: f64,
        /// Human-readable description of the accepted range.
        reason: &'static str,
    },

    /// Configuration JSON could not be parsed.
    ConfigParse(serde_json::Error),

    /// Configuration file could not be read.
    ConfigRead {
        /// Path as given by the caller.
        path: String,
        source: std::io::Error,
    },
}

impl fmt::Display for GameError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameError::InvalidTimestamp { now_ms, last_ms } => match last_ms {
                Some(last) => write!(
                    f,
                    "invalid frame timestamp {} ms (previous frame at {} ms)",
                    now_ms, last
                ),
                None => write!(f, "invalid frame timestamp {} ms", now_ms),
            },
            GameError::InvalidConfig {
                field,
                value,
                reason,
            } => write!(f, "invalid config value {} = {}: {}", field, value, reason),
            GameError::ConfigParse(e) => write!(f, "failed to parse config: {}", e),
            GameError::ConfigRead { path, source } => {
                write!(f, "failed to read config {}: {}", path, source)
            }
        }
    }
}

impl std::error::Error for GameError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            GameError::ConfigParse(e) => Some(e),
            GameError::ConfigRead { source, .. } => Some(source),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for GameError {
    fn from(e: serde_json::Error) -> Self {
        GameError::ConfigParse(e)
    }
}
