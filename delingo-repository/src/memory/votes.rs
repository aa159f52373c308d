use std::collections::HashMap;

use async_trait::async_trait;
use chrono::Utc;
use delingo_shared::types::{
    Ballot, Target, UserId, Vote, VoteOutcome, VoteTally, VoteTransition,
};
use tokio::sync::Mutex;

use crate::{VotesRepository, VotesRepositoryError};

#[derive(Default)]
struct VotesState {
    next_id: i64,
    votes: HashMap<(UserId, Target), Vote>,
}

/// In-memory votes store.
#[derive(Default)]
pub struct InMemoryVotesRepository {
    state: Mutex<VotesState>,
}

impl InMemoryVotesRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of votes currently stored.
    pub async fn len(&self) -> usize {
        self.state.lock().await.votes.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

#[async_trait]
impl VotesRepository for InMemoryVotesRepository {
    async fn cast_vote(&self, ballot: &Ballot) -> Result<VoteOutcome, VotesRepositoryError> {
        let mut state = self.state.lock().await;
        let key = (ballot.user_id, ballot.target);
        let now = Utc::now();

        let existing = state.votes.get(&key).cloned();

        match (VoteTransition::resolve(existing.as_ref(), ballot.value), existing) {
            (VoteTransition::Retract, Some(_)) => {
                state.votes.remove(&key);
                Ok(VoteOutcome::Retracted)
            }
            (VoteTransition::Update, Some(existing)) => {
                let vote = Vote {
                    value: ballot.value,
                    updated_at: now,
                    ..existing
                };
                state.votes.insert(key, vote.clone());
                Ok(VoteOutcome::Updated(vote))
            }
            _ => {
                state.next_id += 1;
                let vote = Vote {
                    id: state.next_id,
                    user_id: ballot.user_id,
                    target_kind: ballot.target.kind,
                    target_id: ballot.target.id,
                    value: ballot.value,
                    created_at: now,
                    updated_at: now,
                };
                state.votes.insert(key, vote.clone());
                Ok(VoteOutcome::Created(vote))
            }
        }
    }

    async fn get_vote(
        &self,
        user_id: UserId,
        target: Target,
    ) -> Result<Option<Vote>, VotesRepositoryError> {
        Ok(self.state.lock().await.votes.get(&(user_id, target)).cloned())
    }

    async fn get_user_votes(&self, user_id: UserId) -> Result<Vec<Vote>, VotesRepositoryError> {
        let state = self.state.lock().await;
        let mut votes: Vec<Vote> = state
            .votes
            .values()
            .filter(|vote| vote.user_id == user_id)
            .cloned()
            .collect();
        votes.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
        Ok(votes)
    }

    async fn get_tally(&self, target: Target) -> Result<VoteTally, VotesRepositoryError> {
        let state = self.state.lock().await;
        Ok(VoteTally::from_votes(target, state.votes.values()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use delingo_shared::types::VoteValue;

    fn ballot(user_id: UserId, target: Target, value: VoteValue) -> Ballot {
        Ballot { user_id, target, value }
    }

    #[tokio::test]
    async fn test_cast_vote_create_flip_retract() {
        let repository = InMemoryVotesRepository::new();
        let target = Target::post(42);

        let created = repository.cast_vote(&ballot(1, target, VoteValue::Up)).await.unwrap();
        let VoteOutcome::Created(vote) = created else {
            panic!("expected Created");
        };

        let updated = repository.cast_vote(&ballot(1, target, VoteValue::Down)).await.unwrap();
        let VoteOutcome::Updated(flipped) = updated else {
            panic!("expected Updated");
        };
        assert_eq!(flipped.id, vote.id);
        assert_eq!(flipped.value, VoteValue::Down);

        let retracted = repository.cast_vote(&ballot(1, target, VoteValue::Down)).await.unwrap();
        assert_eq!(retracted, VoteOutcome::Retracted);
        assert!(repository.is_empty().await);
    }

    #[tokio::test]
    async fn test_user_votes_are_scoped_to_user() {
        let repository = InMemoryVotesRepository::new();
        repository.cast_vote(&ballot(1, Target::thread(1), VoteValue::Up)).await.unwrap();
        repository.cast_vote(&ballot(1, Target::post(1), VoteValue::Down)).await.unwrap();
        repository.cast_vote(&ballot(2, Target::post(1), VoteValue::Up)).await.unwrap();

        let votes = repository.get_user_votes(1).await.unwrap();
        assert_eq!(votes.len(), 2);
        assert!(votes.iter().all(|vote| vote.user_id == 1));

        let tally = repository.get_tally(Target::post(1)).await.unwrap();
        assert_eq!((tally.upvotes, tally.downvotes), (1, 1));
    }
}
