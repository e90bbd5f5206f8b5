/// Core error types for Lumen
use thiserror::Error;

/// Result type alias using `LumenError`
pub type Result<T> = std::result::Result<T, LumenError>;

/// Core error type for Lumen
#[derive(Error, Debug)]
pub enum LumenError {
    /// Entity not found
    #[error("{entity} not found: {id}")]
    NotFound {
        /// Entity kind ("Playlist", "Monitor", ...)
        entity: String,
        /// Identifier that failed to resolve
        id: String,
    },

    /// Duplicate entry (e.g. a playlist already linked to a monitor)
    #[error("Duplicate entry: {0}")]
    Duplicate(String),

    /// Storage-related errors
    #[error("Storage error: {0}")]
    Storage(String),

    /// Database errors (for storage implementations)
    #[error("Database error: {0}")]
    Database(String),
}

impl LumenError {
    /// Create a storage error
    pub fn storage(msg: impl Into<String>) -> Self {
        Self::Storage(msg.into())
    }

    /// Create a not found error
    pub fn not_found(entity: impl Into<String>, id: impl Into<String>) -> Self {
        Self::NotFound {
            entity: entity.into(),
            id: id.into(),
        }
    }

    /// Create a duplicate entry error
    pub fn duplicate(msg: impl Into<String>) -> Self {
        Self::Duplicate(msg.into())
    }
}

#[cfg(feature = "sqlx-support")]
impl From<sqlx::Error> for LumenError {
    fn from(err: sqlx::Error) -> Self {
        Self::Database(err.to_string())
    }
}
