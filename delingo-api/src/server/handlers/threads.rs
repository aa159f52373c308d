use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use delingo_shared::types::{Thread, ThreadWithPosts};
use serde::Deserialize;
use tracing::info;

use super::{deleted, required_text};
use crate::server::auth::AuthUser;
use crate::server::error::ApiError;
use crate::server::extract::{ApiJson, ApiPath};
use crate::server::state::AppState;

#[derive(Debug, Deserialize)]
pub struct ThreadRequest {
    pub title: String,
}

pub async fn create_thread(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    ApiJson(body): ApiJson<ThreadRequest>,
) -> Result<(StatusCode, Json<Thread>), ApiError> {
    let title = required_text("title", &body.title)?;
    let thread = state.forum.create_thread(user_id, &title).await?;
    info!(thread_id = thread.id, user_id, "Thread created");
    Ok((StatusCode::CREATED, Json(thread)))
}

pub async fn list_threads(State(state): State<AppState>) -> Result<Json<Vec<Thread>>, ApiError> {
    Ok(Json(state.forum.list_threads().await?))
}

/// Returns the thread together with its posts, oldest post first.
pub async fn get_thread(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i64>,
) -> Result<Json<ThreadWithPosts>, ApiError> {
    let thread = state.forum.get_thread(id).await?;
    let posts = state.forum.list_posts(id).await?;
    Ok(Json(ThreadWithPosts { thread, posts }))
}

pub async fn update_thread(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    ApiPath(id): ApiPath<i64>,
    ApiJson(body): ApiJson<ThreadRequest>,
) -> Result<Json<Thread>, ApiError> {
    let title = required_text("title", &body.title)?;
    let thread = state.forum.update_thread(id, &title).await?;
    info!(thread_id = id, user_id, "Thread updated");
    Ok(Json(thread))
}

pub async fn delete_thread(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    ApiPath(id): ApiPath<i64>,
) -> Result<Json<serde_json::Value>, ApiError> {
    state.forum.delete_thread(id).await?;
    info!(thread_id = id, user_id, "Thread deleted");
    Ok(deleted("Thread"))
}
