//! This module defines and re-exports the interfaces for the forum repositories.
mod forum;
mod votes;

pub use forum::ForumRepository;
pub use votes::VotesRepository;
