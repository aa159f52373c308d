use serde::{Deserialize, Serialize};

use crate::types::{Target, TargetKind, Vote, VoteValue};

/// Aggregated up and down votes for a thread or post.
///
/// Computed from the stored votes on request, never persisted.
/// `score` is always `upvotes - downvotes`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct VoteTally {
    pub target_kind: TargetKind,
    pub target_id: i64,
    pub upvotes: i64,
    pub downvotes: i64,
    pub score: i64,
}

impl VoteTally {
    pub fn new(target: Target, upvotes: i64, downvotes: i64) -> Self {
        Self {
            target_kind: target.kind,
            target_id: target.id,
            upvotes,
            downvotes,
            score: upvotes - downvotes,
        }
    }

    pub fn target(&self) -> Target {
        Target {
            kind: self.target_kind,
            id: self.target_id,
        }
    }

    /// Builds a tally from the votes on `target`, ignoring votes on anything else.
    pub fn from_votes<'a>(target: Target, votes: impl IntoIterator<Item = &'a Vote>) -> Self {
        let (upvotes, downvotes) = votes
            .into_iter()
            .filter(|vote| vote.target() == target)
            .fold((0, 0), |(up, down), vote| match vote.value {
                VoteValue::Up => (up + 1, down),
                VoteValue::Down => (up, down + 1),
            });
        Self::new(target, upvotes, downvotes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn vote(user_id: i64, kind: TargetKind, target_id: i64, value: VoteValue) -> Vote {
        Vote {
            id: user_id,
            user_id,
            target_kind: kind,
            target_id,
            value,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_tally_counts_only_matching_target() {
        let votes = vec![
            vote(1, TargetKind::Post, 42, VoteValue::Up),
            vote(2, TargetKind::Post, 42, VoteValue::Up),
            vote(3, TargetKind::Post, 42, VoteValue::Down),
            vote(4, TargetKind::Thread, 42, VoteValue::Down),
            vote(5, TargetKind::Post, 7, VoteValue::Down),
        ];

        let tally = VoteTally::from_votes(Target::post(42), &votes);
        assert_eq!(tally.upvotes, 2);
        assert_eq!(tally.downvotes, 1);
        assert_eq!(tally.score, 1);
        assert_eq!(tally.target(), Target::post(42));
    }

    #[test]
    fn test_tally_serializes_target_and_score() {
        let tally = VoteTally::new(Target::thread(3), 1, 4);
        let json = serde_json::to_value(tally).unwrap();

        assert_eq!(
            json,
            serde_json::json!({
                "target_kind": "thread",
                "target_id": 3,
                "upvotes": 1,
                "downvotes": 4,
                "score": -3,
            })
        );
    }
}
