//! This module defines the `VotesRepository` trait, which provides an interface
//! for storing at most one vote per user and target and for reading votes back.
use async_trait::async_trait;
use delingo_shared::types::{Ballot, Target, UserId, Vote, VoteOutcome, VoteTally};

use crate::errors::VotesRepositoryError;

/// A trait that defines the interface for interacting with the votes store.
///
/// Implementors must keep the `(user, target)` pair unique even under
/// concurrent casts from the same user.
#[async_trait]
pub trait VotesRepository: Send + Sync {
    /// Applies a ballot to the store atomically.
    ///
    /// Looks up the caller's existing vote on the ballot's target and, in the
    /// same atomic section, creates, flips or deletes it according to
    /// [`VoteTransition::resolve`](delingo_shared::types::VoteTransition::resolve).
    ///
    /// # Arguments
    ///
    /// * `ballot` - A validated vote request
    ///
    /// # Returns
    ///
    /// The outcome of the cast, or a `VotesRepositoryError` if the lookup or
    /// the write fails. Nothing is mutated on error.
    async fn cast_vote(&self, ballot: &Ballot) -> Result<VoteOutcome, VotesRepositoryError>;

    /// Returns the vote `user_id` has on `target`, if any.
    async fn get_vote(
        &self,
        user_id: UserId,
        target: Target,
    ) -> Result<Option<Vote>, VotesRepositoryError>;

    /// Returns every vote cast by `user_id`, newest first.
    async fn get_user_votes(&self, user_id: UserId) -> Result<Vec<Vote>, VotesRepositoryError>;

    /// Returns the up and down counts for `target`.
    async fn get_tally(&self, target: Target) -> Result<VoteTally, VotesRepositoryError>;
}
