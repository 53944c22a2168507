//! Error types for the autonomous runner

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;

/// Autonomous runner error types
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration file could not be parsed
    #[error("Config parse error: {0}")]
    ConfigParse(#[from] toml::de::Error),

    /// Configuration could not be serialized
    #[error("Config encode error: {0}")]
    ConfigEncode(#[from] toml::ser::Error),

    /// A named device is missing from the wiring map
    #[error("Device not found in hardware map: {0}")]
    DeviceNotFound(String),

    /// Invalid parameter
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    /// Generic error with message
    #[error("{0}")]
    Other(String),
}
