//! Delingo API Library
//!
//! This library provides the HTTP surface of the Delingo forum, including
//! configuration management, error handling, dependency injection and the
//! axum router.

pub mod config;
pub mod errors;
pub mod server;

pub use config::{Dependencies, Settings};
pub use errors::StartupError;
