use thiserror::Error;

/// Construction-time failures. Gameplay itself never errors: illegal
/// actions are no-ops or informational log entries.
#[derive(Debug, Error)]
pub enum GameError {
    #[error("map must be at least 5x5, got {width}x{height}")]
    InvalidDimensions { width: i32, height: i32 },
    #[error("tick interval must be greater than zero")]
    InvalidTickInterval,
    #[error("invalid config: {0}")]
    Config(#[from] serde_json::Error),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}
