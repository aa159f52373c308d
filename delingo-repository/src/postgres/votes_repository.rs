//! PostgreSQL implementation of the votes repository.
//!
//! ## Key Features
//!
//! - Connection pooling with `sqlx::PgPool`
//! - One transaction per cast: insert-or-lock, then update or delete
//! - `UNIQUE (user_id, target_kind, target_id)` as the final guard against duplicates
//!
//! ## Database Tables
//!
//! - `votes`: One row per user and target
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use delingo_shared::types::{
    Ballot, Target, TargetKind, UserId, Vote, VoteOutcome, VoteTally, VoteTransition, VoteValue,
};
use tracing::debug;

use crate::{VotesRepository, VotesRepositoryError};

/// How many times a cast is retried when the row it conflicted with is
/// deleted before it could be locked.
pub const VOTE_MAX_ATTEMPTS: usize = 3;

#[derive(sqlx::FromRow)]
struct VoteRow {
    id: i64,
    user_id: i64,
    target_kind: i16,
    target_id: i64,
    value: i16,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<VoteRow> for Vote {
    type Error = VotesRepositoryError;

    fn try_from(row: VoteRow) -> Result<Self, Self::Error> {
        Ok(Vote {
            id: row.id,
            user_id: row.user_id,
            target_kind: TargetKind::try_from(row.target_kind)
                .map_err(VotesRepositoryError::InvalidTargetKind)?,
            target_id: row.target_id,
            value: VoteValue::try_from(row.value)
                .map_err(|_| VotesRepositoryError::InvalidVoteValue(row.value))?,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

/// PostgreSQL implementation of the votes repository.
pub struct PostgresVotesRepository {
    pool: sqlx::PgPool,
}

impl PostgresVotesRepository {
    /// Creates a new PostgreSQL repository instance.
    ///
    /// # Arguments
    ///
    /// * `pool` - Configured PostgreSQL connection pool with the `votes` table
    pub fn new(pool: sqlx::PgPool) -> Self {
        Self { pool }
    }

    /// Applies a ballot within an active transaction.
    ///
    /// Tries to insert first so that concurrent casts on a target nobody has
    /// voted on serialize on the unique constraint. When the insert conflicts
    /// the existing row is locked and the transition applied to it.
    ///
    /// # Returns
    ///
    /// * `Ok(Some(outcome))` - The ballot was applied
    /// * `Ok(None)` - The conflicting row was deleted before it could be locked; retry
    /// * `Err(VotesRepositoryError)` - Database or decoding error
    async fn cast_vote_tx(
        &self,
        ballot: &Ballot,
        tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
    ) -> Result<Option<VoteOutcome>, VotesRepositoryError> {
        let inserted = sqlx::query_as::<_, VoteRow>(
            r#"
            INSERT INTO votes (user_id, target_kind, target_id, value)
            VALUES ($1, $2, $3, $4)
            ON CONFLICT (user_id, target_kind, target_id) DO NOTHING
            RETURNING id, user_id, target_kind, target_id, value, created_at, updated_at
            "#,
        )
        .bind(ballot.user_id)
        .bind(ballot.target.kind.as_i16())
        .bind(ballot.target.id)
        .bind(ballot.value.as_i16())
        .fetch_optional(&mut **tx)
        .await?;

        if let Some(row) = inserted {
            return Ok(Some(VoteOutcome::Created(row.try_into()?)));
        }

        let existing = sqlx::query_as::<_, VoteRow>(
            r#"
            SELECT id, user_id, target_kind, target_id, value, created_at, updated_at
            FROM votes
            WHERE user_id = $1 AND target_kind = $2 AND target_id = $3
            FOR UPDATE
            "#,
        )
        .bind(ballot.user_id)
        .bind(ballot.target.kind.as_i16())
        .bind(ballot.target.id)
        .fetch_optional(&mut **tx)
        .await?
        .map(Vote::try_from)
        .transpose()?;

        match (VoteTransition::resolve(existing.as_ref(), ballot.value), existing) {
            (VoteTransition::Retract, Some(vote)) => {
                sqlx::query("DELETE FROM votes WHERE id = $1")
                    .bind(vote.id)
                    .execute(&mut **tx)
                    .await?;
                Ok(Some(VoteOutcome::Retracted))
            }
            (VoteTransition::Update, Some(vote)) => {
                let row = sqlx::query_as::<_, VoteRow>(
                    r#"
                    UPDATE votes SET value = $2, updated_at = now()
                    WHERE id = $1
                    RETURNING id, user_id, target_kind, target_id, value, created_at, updated_at
                    "#,
                )
                .bind(vote.id)
                .bind(ballot.value.as_i16())
                .fetch_one(&mut **tx)
                .await?;
                Ok(Some(VoteOutcome::Updated(row.try_into()?)))
            }
            _ => Ok(None),
        }
    }
}

#[async_trait]
impl VotesRepository for PostgresVotesRepository {
    /// Applies a ballot in its own transaction, retrying when a concurrent
    /// retraction removed the row between the insert attempt and the lock.
    async fn cast_vote(&self, ballot: &Ballot) -> Result<VoteOutcome, VotesRepositoryError> {
        for attempt in 1..=VOTE_MAX_ATTEMPTS {
            let mut tx = self.pool.begin().await?;
            match self.cast_vote_tx(ballot, &mut tx).await? {
                Some(outcome) => {
                    tx.commit().await?;
                    return Ok(outcome);
                }
                None => {
                    tx.rollback().await?;
                    debug!(
                        attempt,
                        user_id = ballot.user_id,
                        target_kind = %ballot.target.kind,
                        target_id = ballot.target.id,
                        "Vote row vanished during cast, retrying"
                    );
                }
            }
        }
        Err(VotesRepositoryError::Contention {
            attempts: VOTE_MAX_ATTEMPTS,
        })
    }

    async fn get_vote(
        &self,
        user_id: UserId,
        target: Target,
    ) -> Result<Option<Vote>, VotesRepositoryError> {
        sqlx::query_as::<_, VoteRow>(
            r#"
            SELECT id, user_id, target_kind, target_id, value, created_at, updated_at
            FROM votes
            WHERE user_id = $1 AND target_kind = $2 AND target_id = $3
            "#,
        )
        .bind(user_id)
        .bind(target.kind.as_i16())
        .bind(target.id)
        .fetch_optional(&self.pool)
        .await?
        .map(Vote::try_from)
        .transpose()
    }

    async fn get_user_votes(&self, user_id: UserId) -> Result<Vec<Vote>, VotesRepositoryError> {
        let rows = sqlx::query_as::<_, VoteRow>(
            r#"
            SELECT id, user_id, target_kind, target_id, value, created_at, updated_at
            FROM votes
            WHERE user_id = $1
            ORDER BY created_at DESC, id DESC
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(Vote::try_from).collect()
    }

    async fn get_tally(&self, target: Target) -> Result<VoteTally, VotesRepositoryError> {
        let (upvotes, downvotes): (i64, i64) = sqlx::query_as(
            r#"
            SELECT
                COUNT(*) FILTER (WHERE value = 1) AS upvotes,
                COUNT(*) FILTER (WHERE value = -1) AS downvotes
            FROM votes
            WHERE target_kind = $1 AND target_id = $2
            "#,
        )
        .bind(target.kind.as_i16())
        .bind(target.id)
        .fetch_one(&self.pool)
        .await?;

        Ok(VoteTally::new(target, upvotes, downvotes))
    }
}
