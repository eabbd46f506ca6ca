//! Error types for store mutations and configuration loading.

use std::path::PathBuf;

/// A mutation refused at the store boundary. The store is left untouched.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum StoreError {
    #[error("waypoint coordinates must be finite, got ({x}, {y})")]
    NonFiniteWaypoint { x: f64, y: f64 },

    #[error("radar target field `{field}` must be finite")]
    NonFiniteTarget { field: &'static str },

    #[error("radar target list is full ({limit} contacts)")]
    TargetLimit { limit: usize },

    #[error("speed must be finite, got {0}")]
    NonFiniteSpeed(f64),
}

/// Configuration could not be loaded or failed validation.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed config: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("invalid config value `{field}`: {reason}")]
    Invalid { field: &'static str, reason: String },
}

impl ConfigError {
    pub(crate) fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        Self::Invalid {
            field,
            reason: reason.into(),
        }
    }
}
