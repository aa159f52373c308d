//! Error types for the forum repositories.
//! Consolidates and re-exports error types related to vote and forum persistence.
mod forum;
mod votes;

pub use forum::ForumRepositoryError;
pub use votes::VotesRepositoryError;
