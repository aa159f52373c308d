//! Error types for the vote ledger.
use delingo_repository::VotesRepositoryError;
use delingo_shared::types::InvalidVoteValue;
use thiserror::Error;

/// Represents errors that can occur when casting or reading votes.
#[derive(Debug, Error)]
pub enum LedgerError {
    /// The request was rejected before touching the store.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Storage error: {0}")]
    Storage(#[from] VotesRepositoryError),
}

impl From<InvalidVoteValue> for LedgerError {
    fn from(error: InvalidVoteValue) -> Self {
        LedgerError::InvalidInput(error.to_string())
    }
}
