//! PostgreSQL backends for the forum repositories.
//!
//! The schema lives in `migrations/` and is applied by operators (and by the
//! `sqlx::test` harness in integration tests). The service only verifies that
//! the expected tables exist.
mod forum_repository;
mod votes_repository;

pub use forum_repository::PostgresForumRepository;
pub use votes_repository::{PostgresVotesRepository, VOTE_MAX_ATTEMPTS};

/// Tables the backends expect to find.
pub const REQUIRED_TABLES: [&str; 4] = ["threads", "posts", "comments", "votes"];

/// Checks if the tables are created in the database.
///
/// # Returns
///
/// * `Ok(true)` - If every table in `REQUIRED_TABLES` exists
/// * `Ok(false)` - If at least one is missing
/// * `Err(sqlx::Error)` - Database query failure
pub async fn check_tables_created(pool: &sqlx::PgPool) -> Result<bool, sqlx::Error> {
    for table in REQUIRED_TABLES {
        let table_exists: bool = sqlx::query_scalar(
            "SELECT EXISTS(SELECT 1 FROM information_schema.tables WHERE table_name = $1)",
        )
        .bind(table)
        .fetch_one(pool)
        .await?;
        if !table_exists {
            return Ok(false);
        }
    }
    Ok(true)
}
