//! This module defines the `Dependencies` struct, which wires the storage
//! backends the API handlers run against.
use std::sync::Arc;

use delingo_ledger::VoteLedger;
use delingo_repository::postgres::check_tables_created;
use delingo_repository::{
    ForumRepository, InMemoryForumRepository, InMemoryVotesRepository, PostgresForumRepository,
    PostgresVotesRepository,
};
use sqlx::postgres::PgPoolOptions;
use tracing::info;

use crate::config::Settings;
use crate::errors::StartupError;

/// Holds the forum store and the vote ledger shared by every request.
pub struct Dependencies {
    pub forum_repository: Arc<dyn ForumRepository>,
    pub vote_ledger: VoteLedger,
}

impl Dependencies {
    /// Connects to PostgreSQL and builds the production dependencies.
    ///
    /// The schema is not created here. Startup fails with
    /// `StartupError::SchemaMissing` if the forum tables are absent.
    ///
    /// # Errors
    ///
    /// * `StartupError::Database` - The pool could not be created or the schema check failed
    /// * `StartupError::SchemaMissing` - The forum migrations were never applied
    pub async fn new(settings: &Settings) -> Result<Self, StartupError> {
        info!(
            max_connections = settings.database_max_connections,
            "Connecting to database"
        );
        let pool = PgPoolOptions::new()
            .max_connections(settings.database_max_connections)
            .connect(&settings.database_url)
            .await?;

        if !check_tables_created(&pool).await? {
            return Err(StartupError::SchemaMissing);
        }

        let forum_repository = Arc::new(PostgresForumRepository::new(pool.clone()));
        let votes_repository = Arc::new(PostgresVotesRepository::new(pool));

        Ok(Self {
            forum_repository,
            vote_ledger: VoteLedger::new(votes_repository),
        })
    }

    /// Builds dependencies backed by process memory. Nothing is persisted.
    pub fn in_memory() -> Self {
        Self {
            forum_repository: Arc::new(InMemoryForumRepository::new()),
            vote_ledger: VoteLedger::new(Arc::new(InMemoryVotesRepository::new())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::LogFormat;

    fn settings(database_url: &str) -> Settings {
        Settings {
            database_url: database_url.to_string(),
            database_max_connections: 1,
            server_host: "127.0.0.1".parse().unwrap(),
            server_port: 0,
            jwt_secret: "secret".to_string(),
            cors_allowed_origins: vec![],
            log_format: LogFormat::Pretty,
        }
    }

    #[tokio::test]
    async fn test_invalid_database_url_fails() {
        let result = Dependencies::new(&settings("invalid-database-url")).await;
        assert!(matches!(result, Err(StartupError::Database(_))));
    }

    #[tokio::test]
    async fn test_in_memory_dependencies_are_usable() {
        let dependencies = Dependencies::in_memory();
        assert!(dependencies.forum_repository.ping().await.is_ok());
        assert!(dependencies.forum_repository.list_threads().await.unwrap().is_empty());
    }
}
