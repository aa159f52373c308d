//! Error types for the votes repository.
use thiserror::Error;

/// Represents errors that can occur within the votes repository.
#[derive(Debug, Error)]
pub enum VotesRepositoryError {
    #[error("Database error: {0}")]
    DatabaseError(#[from] sqlx::Error),

    #[error("Invalid target kind: {0}")]
    InvalidTargetKind(i16),

    #[error("Invalid vote value: {0}")]
    InvalidVoteValue(i16),

    /// The vote row kept changing under concurrent casts.
    #[error("Vote could not be applied after {attempts} attempts")]
    Contention { attempts: usize },
}
