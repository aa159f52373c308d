//! In-memory backends for the forum repositories.
//!
//! These hold all state behind a single async mutex, which makes every
//! operation atomic. Use them for tests and local development without a
//! database.
mod forum;
mod votes;

pub use forum::InMemoryForumRepository;
pub use votes::InMemoryVotesRepository;
