//! Error types for the Delingo API binary.
//! Covers everything that can stop the service from starting or serving.
#[derive(Debug, thiserror::Error)]
pub enum StartupError {
    #[error("Configuration error: {0}")]
    Config(String),
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
    #[error("Database schema is not initialized, apply the forum migrations first")]
    SchemaMissing,
    #[error("Server error: {0}")]
    Server(#[from] std::io::Error),
}
