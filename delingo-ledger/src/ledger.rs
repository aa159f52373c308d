//! This module defines the `VoteLedger`, the single entry point for voting on
//! threads and posts.
use std::sync::Arc;

use delingo_repository::VotesRepository;
use delingo_shared::types::{
    Ballot, Target, TargetKind, UserId, Vote, VoteOutcome, VoteTally, VoteValue,
};
use tracing::{error, info, instrument};

use crate::errors::LedgerError;

/// `VoteLedger` maintains at most one vote per user and target.
///
/// Thread and post votes go through the same operation, parameterized by
/// [`TargetKind`]. The caller is responsible for resolving `user_id` from an
/// authenticated identity. Target existence is not verified.
#[derive(Clone)]
pub struct VoteLedger {
    votes_repository: Arc<dyn VotesRepository>,
}

impl VoteLedger {
    /// Creates a new `VoteLedger` instance.
    ///
    /// # Arguments
    ///
    /// * `votes_repository` - The store the ledger reads and writes votes through
    pub fn new(votes_repository: Arc<dyn VotesRepository>) -> Self {
        Self { votes_repository }
    }

    /// Casts `value` on behalf of `user_id` on the given target.
    ///
    /// - No existing vote: one is created (`Created`).
    /// - Existing vote with the same value: it is deleted (`Retracted`).
    /// - Existing vote with the other value: it is flipped (`Updated`).
    ///
    /// # Errors
    ///
    /// * `LedgerError::InvalidInput` - `value` is not `1` or `-1`; the store is not touched
    /// * `LedgerError::Storage` - The lookup or the write failed; nothing was applied
    #[instrument(skip(self))]
    pub async fn cast_vote(
        &self,
        user_id: UserId,
        target_kind: TargetKind,
        target_id: i64,
        value: i64,
    ) -> Result<VoteOutcome, LedgerError> {
        let value = VoteValue::try_from(value)?;
        let ballot = Ballot {
            user_id,
            target: Target {
                kind: target_kind,
                id: target_id,
            },
            value,
        };

        match self.votes_repository.cast_vote(&ballot).await {
            Ok(outcome) => {
                info!(outcome = outcome.label(), "Vote cast");
                Ok(outcome)
            }
            Err(e) => {
                error!(error = %e, "Failed to cast vote");
                Err(e.into())
            }
        }
    }

    /// Returns the vote `user_id` currently holds on a thread or post, if any.
    pub async fn user_vote(
        &self,
        user_id: UserId,
        target_kind: TargetKind,
        target_id: i64,
    ) -> Result<Option<Vote>, LedgerError> {
        let target = Target {
            kind: target_kind,
            id: target_id,
        };
        Ok(self.votes_repository.get_vote(user_id, target).await?)
    }

    /// Returns every vote cast by `user_id`, newest first.
    pub async fn user_votes(&self, user_id: UserId) -> Result<Vec<Vote>, LedgerError> {
        Ok(self.votes_repository.get_user_votes(user_id).await?)
    }

    /// Returns the up and down counts for a thread or post.
    pub async fn tally(&self, target_kind: TargetKind, target_id: i64) -> Result<VoteTally, LedgerError> {
        let target = Target {
            kind: target_kind,
            id: target_id,
        };
        Ok(self.votes_repository.get_tally(target).await?)
    }
}
