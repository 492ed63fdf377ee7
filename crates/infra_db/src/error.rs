//! Database error types

use thiserror::Error;

/// Errors that can occur during database operations
#[derive(Debug, Error)]
pub enum DatabaseError {
    /// Failed to establish a database connection
    #[error("Failed to connect to database: {0}")]
    ConnectionFailed(String),

    /// Entity not found
    #[error("Entity not found: {0}")]
    NotFound(String),

    /// A stored value could not be mapped back to a domain type
    #[error("Corrupt stored value: {0}")]
    CorruptValue(String),

    /// Unique constraint violation
    #[error("Duplicate entry: {0}")]
    DuplicateEntry(String),

    /// Generic SQL error
    #[error("SQL error: {0}")]
    Sql(#[from] sqlx::Error),
}

impl DatabaseError {
    /// Creates a not found error for a specific entity type and identifier
    pub fn not_found(entity: &str, id: impl std::fmt::Display) -> Self {
        DatabaseError::NotFound(format!("{} with id '{}' not found", entity, id))
    }

    /// Checks if this error indicates a record was not found
    pub fn is_not_found(&self) -> bool {
        matches!(self, DatabaseError::NotFound(_))
            || matches!(self, DatabaseError::Sql(sqlx::Error::RowNotFound))
    }
}

impl From<domain_schedule::ScheduleError> for DatabaseError {
    fn from(err: domain_schedule::ScheduleError) -> Self {
        DatabaseError::CorruptValue(err.to_string())
    }
}
