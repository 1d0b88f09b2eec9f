use thiserror::Error;

/// Main error type for the console log handler
#[derive(Debug, Error)]
pub enum ConsoleError {
    // Configuration errors
    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Invalid configuration file: {0}")]
    InvalidConfig(String),

    #[error("Configuration validation failed: {0}")]
    ConfigValidationError(String),

    // Lookup errors
    #[error("Unknown log level: {0}")]
    UnknownLevel(String),

    #[error("Unknown color: {0}")]
    UnknownColor(String),

    // Handler lifecycle errors
    #[error("Handler is already running")]
    HandlerAlreadyRunning,

    #[error("Failed to start handler: {0}")]
    HandlerSpawn(String),

    // IO errors (automatically converted from std::io::Error)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for console log operations
pub type Result<T> = std::result::Result<T, ConsoleError>;
