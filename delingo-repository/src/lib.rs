//! # Delingo Repository
//! This crate provides traits and implementations for persisting forum data:
//! threads, posts, comments and votes. It includes definitions for errors,
//! interfaces, a PostgreSQL backend and an in-memory backend for tests and
//! local development.
pub mod errors;
pub mod interfaces;
pub mod memory;
pub mod postgres;

pub use errors::{ForumRepositoryError, VotesRepositoryError};
pub use interfaces::{ForumRepository, VotesRepository};
pub use memory::{InMemoryForumRepository, InMemoryVotesRepository};
pub use postgres::{PostgresForumRepository, PostgresVotesRepository};
