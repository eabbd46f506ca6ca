//! Host-side errors.

use dashboard_core::error::ConfigError;

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("frame output failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("frame serialization failed: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("failed to spawn host loop thread: {0}")]
    Spawn(#[source] std::io::Error),

    #[error("dashboard already running")]
    AlreadyRunning,

    #[error("dashboard not started")]
    NotStarted,

    #[error("host loop has stopped")]
    LoopStopped,

    #[error("host loop panicked")]
    LoopPanicked,

    #[error("shared state lock poisoned")]
    Poisoned,
}

impl<T> From<std::sync::PoisonError<T>> for AppError {
    fn from(_: std::sync::PoisonError<T>) -> Self {
        AppError::Poisoned
    }
}
