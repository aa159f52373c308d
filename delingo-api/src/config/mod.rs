//! Configuration module for the Delingo API.
//! Defines and manages application-wide settings and dependencies.
mod cors;
mod dependencies;
mod settings;

pub use cors::create_cors_layer;
pub use dependencies::Dependencies;
pub use settings::{LogFormat, Settings};
