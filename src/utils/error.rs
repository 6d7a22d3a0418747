use thiserror::Error;

#[derive(Error, Debug)]
pub enum MaintenanceError {
    /// Raw report data did not match the `maintenance` schema.
    #[error("Invalid maintenance data: {message}")]
    InvalidData { message: String },

    #[error("Duplicate entries: {}", .repo_ids.join(", "))]
    DuplicateEntries { repo_ids: Vec<String> },

    #[error("Validation error for '{field}': {message}")]
    ValidationError { field: String, message: String },

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

impl MaintenanceError {
    pub fn invalid_data(message: impl Into<String>) -> Self {
        Self::InvalidData {
            message: message.into(),
        }
    }

    /// True for errors caused by bad external input rather than by the caller.
    pub fn is_invalid_data(&self) -> bool {
        matches!(self, Self::InvalidData { .. })
    }
}

pub type Result<T> = std::result::Result<T, MaintenanceError>;
