mod forum;
mod tally;
mod transition;
mod vote;

pub use forum::{Comment, Post, SearchResults, Thread, ThreadWithPosts};
pub use tally::VoteTally;
pub use transition::{VoteOutcome, VoteTransition};
pub use vote::{Ballot, InvalidVoteValue, Target, TargetKind, Vote, VoteValue};

/// Identifier of a forum user, as resolved from the bearer token.
pub type UserId = i64;
