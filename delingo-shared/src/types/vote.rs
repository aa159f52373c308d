use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::types::UserId;

/// The kind of forum object a vote applies to.
///
/// Persisted as a `SMALLINT`: `0` for threads, `1` for posts.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum TargetKind {
    Thread,
    Post,
}

impl TargetKind {
    pub fn as_i16(self) -> i16 {
        match self {
            TargetKind::Thread => 0,
            TargetKind::Post => 1,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            TargetKind::Thread => "thread",
            TargetKind::Post => "post",
        }
    }
}

impl TryFrom<i16> for TargetKind {
    type Error = i16;

    fn try_from(value: i16) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(TargetKind::Thread),
            1 => Ok(TargetKind::Post),
            other => Err(other),
        }
    }
}

impl std::fmt::Display for TargetKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when a vote value is anything other than `1` or `-1`.
#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
#[error("vote value must be 1 or -1, got {0}")]
pub struct InvalidVoteValue(pub i64);

/// A signed unit vote. Serialized as the integer `1` or `-1`.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(into = "i16", try_from = "i16")]
pub enum VoteValue {
    /// An upvote, `+1`.
    Up,
    /// A downvote, `-1`.
    Down,
}

impl VoteValue {
    pub fn as_i16(self) -> i16 {
        match self {
            VoteValue::Up => 1,
            VoteValue::Down => -1,
        }
    }
}

impl TryFrom<i64> for VoteValue {
    type Error = InvalidVoteValue;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(VoteValue::Up),
            -1 => Ok(VoteValue::Down),
            other => Err(InvalidVoteValue(other)),
        }
    }
}

impl TryFrom<i16> for VoteValue {
    type Error = InvalidVoteValue;

    fn try_from(value: i16) -> Result<Self, Self::Error> {
        VoteValue::try_from(i64::from(value))
    }
}

impl From<VoteValue> for i16 {
    fn from(value: VoteValue) -> Self {
        value.as_i16()
    }
}

/// A thread or post that can be voted on.
///
/// Existence of the referenced object is not checked when voting.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct Target {
    pub kind: TargetKind,
    pub id: i64,
}

impl Target {
    pub fn thread(id: i64) -> Self {
        Self { kind: TargetKind::Thread, id }
    }

    pub fn post(id: i64) -> Self {
        Self { kind: TargetKind::Post, id }
    }
}

/// A validated request by a user to vote on a target.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Ballot {
    pub user_id: UserId,
    pub target: Target,
    pub value: VoteValue,
}

/// A user's stored vote on a thread or post.
///
/// At most one vote exists per `(user_id, target_kind, target_id)`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Vote {
    pub id: i64,
    pub user_id: UserId,
    pub target_kind: TargetKind,
    pub target_id: i64,
    pub value: VoteValue,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Vote {
    pub fn target(&self) -> Target {
        Target {
            kind: self.target_kind,
            id: self.target_id,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vote_value_accepts_only_unit_values() {
        assert_eq!(VoteValue::try_from(1i64), Ok(VoteValue::Up));
        assert_eq!(VoteValue::try_from(-1i64), Ok(VoteValue::Down));
        assert_eq!(VoteValue::try_from(0i64), Err(InvalidVoteValue(0)));
        assert_eq!(VoteValue::try_from(2i64), Err(InvalidVoteValue(2)));
    }

    #[test]
    fn test_target_kind_round_trips_through_storage_code() {
        for kind in [TargetKind::Thread, TargetKind::Post] {
            assert_eq!(TargetKind::try_from(kind.as_i16()), Ok(kind));
        }
        assert_eq!(TargetKind::try_from(7), Err(7));
    }

    #[test]
    fn test_vote_serializes_value_as_integer() {
        let vote = Vote {
            id: 3,
            user_id: 1,
            target_kind: TargetKind::Post,
            target_id: 42,
            value: VoteValue::Down,
            created_at: DateTime::from_timestamp(1_755_182_913, 0).unwrap(),
            updated_at: DateTime::from_timestamp(1_755_182_913, 0).unwrap(),
        };

        let json = serde_json::to_value(&vote).unwrap();
        assert_eq!(json["value"], -1);
        assert_eq!(json["target_kind"], "post");
    }

    #[test]
    fn test_vote_value_rejects_zero_when_deserializing() {
        let result: Result<VoteValue, _> = serde_json::from_str("0");
        assert!(result.is_err());
    }
}
