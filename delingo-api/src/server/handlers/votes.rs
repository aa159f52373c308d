use axum::Json;
use axum::extract::State;
use delingo_shared::types::{TargetKind, UserId, Vote, VoteOutcome, VoteTally};
use serde::{Deserialize, Serialize};

use crate::server::auth::AuthUser;
use crate::server::error::ApiError;
use crate::server::extract::{ApiJson, ApiPath};
use crate::server::state::AppState;

#[derive(Debug, Deserialize)]
pub struct VoteRequest {
    pub vote_value: i64,
}

#[derive(Debug, Serialize)]
pub struct VoteResponse {
    pub message: &'static str,
    pub outcome: &'static str,
    pub vote: Option<Vote>,
}

impl From<VoteOutcome> for VoteResponse {
    fn from(outcome: VoteOutcome) -> Self {
        Self {
            message: outcome.message(),
            outcome: outcome.label(),
            vote: outcome.vote().cloned(),
        }
    }
}

async fn cast(
    state: &AppState,
    user_id: UserId,
    target_kind: TargetKind,
    target_id: i64,
    request: VoteRequest,
) -> Result<Json<VoteResponse>, ApiError> {
    let outcome = state
        .ledger
        .cast_vote(user_id, target_kind, target_id, request.vote_value)
        .await?;
    Ok(Json(outcome.into()))
}

pub async fn vote_on_thread(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    ApiPath(thread_id): ApiPath<i64>,
    ApiJson(body): ApiJson<VoteRequest>,
) -> Result<Json<VoteResponse>, ApiError> {
    cast(&state, user_id, TargetKind::Thread, thread_id, body).await
}

pub async fn vote_on_post(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    ApiPath(post_id): ApiPath<i64>,
    ApiJson(body): ApiJson<VoteRequest>,
) -> Result<Json<VoteResponse>, ApiError> {
    cast(&state, user_id, TargetKind::Post, post_id, body).await
}

/// The caller's current vote on a target, `{"vote": Vote|null}`.
#[derive(Debug, Serialize)]
pub struct MyVoteResponse {
    pub vote: Option<Vote>,
}

pub async fn my_thread_vote(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    ApiPath(thread_id): ApiPath<i64>,
) -> Result<Json<MyVoteResponse>, ApiError> {
    let vote = state.ledger.user_vote(user_id, TargetKind::Thread, thread_id).await?;
    Ok(Json(MyVoteResponse { vote }))
}

pub async fn my_post_vote(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    ApiPath(post_id): ApiPath<i64>,
) -> Result<Json<MyVoteResponse>, ApiError> {
    let vote = state.ledger.user_vote(user_id, TargetKind::Post, post_id).await?;
    Ok(Json(MyVoteResponse { vote }))
}

pub async fn user_votes(
    State(state): State<AppState>,
    ApiPath(user_id): ApiPath<UserId>,
) -> Result<Json<Vec<Vote>>, ApiError> {
    Ok(Json(state.ledger.user_votes(user_id).await?))
}

pub async fn thread_tally(
    State(state): State<AppState>,
    ApiPath(thread_id): ApiPath<i64>,
) -> Result<Json<VoteTally>, ApiError> {
    Ok(Json(state.ledger.tally(TargetKind::Thread, thread_id).await?))
}

pub async fn post_tally(
    State(state): State<AppState>,
    ApiPath(post_id): ApiPath<i64>,
) -> Result<Json<VoteTally>, ApiError> {
    Ok(Json(state.ledger.tally(TargetKind::Post, post_id).await?))
}
