//! Integration tests for the PostgreSQL votes repository.
//!
//! These tests require a real PostgreSQL database and use SQLx test macros
//! to ensure proper test isolation and cleanup.
//!
//! Run with: `cargo test --test postgres_votes`

use std::sync::Arc;

use delingo_repository::{PostgresVotesRepository, VotesRepository, VotesRepositoryError};
use delingo_shared::types::{Ballot, Target, VoteOutcome, VoteValue};

fn ballot(user_id: i64, target: Target, value: VoteValue) -> Ballot {
    Ballot {
        user_id,
        target,
        value,
    }
}

async fn count_votes(pool: &sqlx::PgPool, user_id: i64, target: Target) -> i64 {
    sqlx::query_scalar(
        "SELECT COUNT(*) FROM votes WHERE user_id = $1 AND target_kind = $2 AND target_id = $3",
    )
    .bind(user_id)
    .bind(target.kind.as_i16())
    .bind(target.id)
    .fetch_one(pool)
    .await
    .unwrap()
}

#[sqlx::test(migrations = "src/postgres/migrations")]
async fn test_first_vote_is_created(pool: sqlx::PgPool) {
    let repository = PostgresVotesRepository::new(pool.clone());
    let target = Target::post(42);

    let outcome = repository.cast_vote(&ballot(1, target, VoteValue::Up)).await.unwrap();

    let VoteOutcome::Created(vote) = outcome else {
        panic!("expected Created");
    };
    assert_eq!(vote.user_id, 1);
    assert_eq!(vote.target(), target);
    assert_eq!(vote.value, VoteValue::Up);
    assert_eq!(count_votes(&pool, 1, target).await, 1);
}

#[sqlx::test(migrations = "src/postgres/migrations")]
async fn test_same_value_twice_retracts(pool: sqlx::PgPool) {
    let repository = PostgresVotesRepository::new(pool.clone());
    let target = Target::thread(7);

    repository.cast_vote(&ballot(1, target, VoteValue::Up)).await.unwrap();
    let outcome = repository.cast_vote(&ballot(1, target, VoteValue::Up)).await.unwrap();

    assert_eq!(outcome, VoteOutcome::Retracted);
    assert_eq!(count_votes(&pool, 1, target).await, 0);
    assert!(repository.get_vote(1, target).await.unwrap().is_none());
}

#[sqlx::test(migrations = "src/postgres/migrations")]
async fn test_opposite_value_flips_vote(pool: sqlx::PgPool) {
    let repository = PostgresVotesRepository::new(pool.clone());
    let target = Target::post(3);

    repository.cast_vote(&ballot(1, target, VoteValue::Up)).await.unwrap();
    repository.cast_vote(&ballot(1, target, VoteValue::Down)).await.unwrap();

    let stored = repository.get_vote(1, target).await.unwrap().unwrap();
    assert_eq!(stored.value, VoteValue::Down);
    assert_eq!(count_votes(&pool, 1, target).await, 1);
}

#[sqlx::test(migrations = "src/postgres/migrations")]
async fn test_vote_lifecycle_on_post(pool: sqlx::PgPool) {
    let repository = PostgresVotesRepository::new(pool);
    let target = Target::post(42);

    let VoteOutcome::Created(first) = repository.cast_vote(&ballot(1, target, VoteValue::Up)).await.unwrap() else {
        panic!("expected Created");
    };
    assert_eq!(first.value, VoteValue::Up);

    let retracted = repository.cast_vote(&ballot(1, target, VoteValue::Up)).await.unwrap();
    assert_eq!(retracted, VoteOutcome::Retracted);

    let VoteOutcome::Created(second) = repository.cast_vote(&ballot(1, target, VoteValue::Down)).await.unwrap() else {
        panic!("expected Created");
    };
    assert_eq!(second.value, VoteValue::Down);
    assert_ne!(second.id, first.id);

    let VoteOutcome::Updated(third) = repository.cast_vote(&ballot(1, target, VoteValue::Up)).await.unwrap() else {
        panic!("expected Updated");
    };
    assert_eq!(third.value, VoteValue::Up);
    assert_eq!(third.id, second.id);
    assert!(third.updated_at >= second.updated_at);
}

#[sqlx::test(migrations = "src/postgres/migrations")]
async fn test_thread_and_post_votes_are_independent(pool: sqlx::PgPool) {
    let repository = PostgresVotesRepository::new(pool);

    repository.cast_vote(&ballot(1, Target::thread(5), VoteValue::Up)).await.unwrap();
    let outcome = repository.cast_vote(&ballot(1, Target::post(5), VoteValue::Up)).await.unwrap();

    assert!(matches!(outcome, VoteOutcome::Created(_)));
    assert_eq!(repository.get_user_votes(1).await.unwrap().len(), 2);
}

#[sqlx::test(migrations = "src/postgres/migrations")]
async fn test_concurrent_casts_never_duplicate_rows(pool: sqlx::PgPool) {
    let repository = Arc::new(PostgresVotesRepository::new(pool.clone()));
    let target = Target::post(99);

    let handles: Vec<_> = (0..16)
        .map(|_| {
            let repository = repository.clone();
            tokio::spawn(async move {
                repository.cast_vote(&ballot(1, target, VoteValue::Up)).await
            })
        })
        .collect();

    let mut created = 0i64;
    let mut retracted = 0i64;
    for handle in handles {
        match handle.await.unwrap() {
            Ok(VoteOutcome::Created(_)) => created += 1,
            Ok(VoteOutcome::Retracted) => retracted += 1,
            Ok(VoteOutcome::Updated(_)) => panic!("same value never flips"),
            // Nothing was applied, so the counts stay consistent
            Err(VotesRepositoryError::Contention { .. }) => {}
            Err(e) => panic!("unexpected error: {e}"),
        }
    }

    let rows = count_votes(&pool, 1, target).await;
    assert!(rows <= 1);
    assert_eq!(created - retracted, rows);
}

#[sqlx::test(migrations = "src/postgres/migrations")]
async fn test_tally_counts_votes_per_target(pool: sqlx::PgPool) {
    let repository = PostgresVotesRepository::new(pool);
    let target = Target::thread(11);

    repository.cast_vote(&ballot(1, target, VoteValue::Up)).await.unwrap();
    repository.cast_vote(&ballot(2, target, VoteValue::Up)).await.unwrap();
    repository.cast_vote(&ballot(3, target, VoteValue::Down)).await.unwrap();
    repository.cast_vote(&ballot(4, Target::post(11), VoteValue::Down)).await.unwrap();

    let tally = repository.get_tally(target).await.unwrap();
    assert_eq!(tally.upvotes, 2);
    assert_eq!(tally.downvotes, 1);
    assert_eq!(tally.score, 1);

    let empty = repository.get_tally(Target::thread(12)).await.unwrap();
    assert_eq!((empty.upvotes, empty.downvotes), (0, 0));
}

#[sqlx::test(migrations = "src/postgres/migrations")]
async fn test_unique_constraint_rejects_manual_duplicates(pool: sqlx::PgPool) {
    let insert = "INSERT INTO votes (user_id, target_kind, target_id, value) VALUES (1, 1, 8, 1)";
    sqlx::query(insert).execute(&pool).await.unwrap();

    let duplicate = sqlx::query(insert).execute(&pool).await;
    assert!(duplicate.is_err());
}

#[sqlx::test(migrations = "src/postgres/migrations")]
async fn test_schema_is_detected(pool: sqlx::PgPool) {
    assert!(delingo_repository::postgres::check_tables_created(&pool).await.unwrap());
}
