//! Error types for the inspector

use depth_core::DepthError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum InspectorError {
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Invalid snapshot: {0}")]
    InvalidSnapshot(String),

    #[error("IO error: {0}")]
    IoError(String),

    #[error("Serialization error: {0}")]
    SerializationError(String),

    #[error("Depth error: {0}")]
    Depth(#[from] DepthError),
}

/// Result type for inspector operations
pub type InspectorResult<T> = Result<T, InspectorError>;

impl From<std::io::Error> for InspectorError {
    fn from(err: std::io::Error) -> Self {
        InspectorError::IoError(err.to_string())
    }
}

impl From<serde_json::Error> for InspectorError {
    fn from(err: serde_json::Error) -> Self {
        InspectorError::SerializationError(err.to_string())
    }
}

impl From<toml::de::Error> for InspectorError {
    fn from(err: toml::de::Error) -> Self {
        InspectorError::SerializationError(err.to_string())
    }
}

impl From<toml::ser::Error> for InspectorError {
    fn from(err: toml::ser::Error) -> Self {
        InspectorError::SerializationError(err.to_string())
    }
}
