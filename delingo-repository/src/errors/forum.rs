//! Error types for the forum repository.
use thiserror::Error;

/// Represents errors that can occur within the forum repository.
#[derive(Debug, Error)]
pub enum ForumRepositoryError {
    #[error("Database error: {0}")]
    DatabaseError(#[from] sqlx::Error),

    #[error("{entity} {id} not found")]
    NotFound { entity: &'static str, id: i64 },
}

impl ForumRepositoryError {
    pub fn not_found(entity: &'static str, id: i64) -> Self {
        Self::NotFound { entity, id }
    }
}
