use serde::{Deserialize, Serialize};

use crate::types::{Vote, VoteValue};

/// What casting a vote does to the existing vote on the same target, if any.
///
/// Every vote store resolves this inside its own atomic section so that the
/// create / flip / retract rule lives in exactly one place.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VoteTransition {
    /// No vote exists yet: insert one.
    Create,
    /// A vote with the opposite value exists: flip it.
    Update,
    /// A vote with the same value exists: delete it.
    Retract,
}

impl VoteTransition {
    pub fn resolve(existing: Option<&Vote>, value: VoteValue) -> Self {
        match existing {
            None => VoteTransition::Create,
            Some(vote) if vote.value == value => VoteTransition::Retract,
            Some(_) => VoteTransition::Update,
        }
    }
}

/// The result of casting a vote.
///
/// `Retracted` carries no vote since the row no longer exists.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "outcome", content = "vote", rename_all = "lowercase")]
pub enum VoteOutcome {
    Created(Vote),
    Updated(Vote),
    Retracted,
}

impl VoteOutcome {
    pub fn vote(&self) -> Option<&Vote> {
        match self {
            VoteOutcome::Created(vote) | VoteOutcome::Updated(vote) => Some(vote),
            VoteOutcome::Retracted => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            VoteOutcome::Created(_) => "created",
            VoteOutcome::Updated(_) => "updated",
            VoteOutcome::Retracted => "retracted",
        }
    }

    /// Human readable confirmation returned to API clients.
    pub fn message(&self) -> &'static str {
        match self {
            VoteOutcome::Created(_) => "Vote created",
            VoteOutcome::Updated(_) => "Vote updated",
            VoteOutcome::Retracted => "Vote removed",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::TargetKind;
    use chrono::Utc;

    fn vote_with(value: VoteValue) -> Vote {
        Vote {
            id: 1,
            user_id: 1,
            target_kind: TargetKind::Thread,
            target_id: 9,
            value,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_resolve_creates_when_no_vote_exists() {
        assert_eq!(VoteTransition::resolve(None, VoteValue::Up), VoteTransition::Create);
        assert_eq!(VoteTransition::resolve(None, VoteValue::Down), VoteTransition::Create);
    }

    #[test]
    fn test_resolve_retracts_on_same_value() {
        let existing = vote_with(VoteValue::Down);
        assert_eq!(
            VoteTransition::resolve(Some(&existing), VoteValue::Down),
            VoteTransition::Retract
        );
    }

    #[test]
    fn test_resolve_updates_on_opposite_value() {
        let existing = vote_with(VoteValue::Up);
        assert_eq!(
            VoteTransition::resolve(Some(&existing), VoteValue::Down),
            VoteTransition::Update
        );
    }

    #[test]
    fn test_outcome_exposes_vote_only_when_it_exists() {
        let vote = vote_with(VoteValue::Up);
        assert_eq!(VoteOutcome::Created(vote.clone()).vote(), Some(&vote));
        assert_eq!(VoteOutcome::Retracted.vote(), None);
        assert_eq!(VoteOutcome::Retracted.message(), "Vote removed");
    }
}
