//! # Delingo Shared
//! This crate defines the data structures shared across the Delingo forum backend.
//! It includes the forum entities (threads, posts, comments), votes and the
//! transition rules that decide what a cast vote does to an existing one.
pub mod types;
