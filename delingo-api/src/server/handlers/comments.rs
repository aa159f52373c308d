use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use delingo_shared::types::Comment;
use serde::Deserialize;
use tracing::info;

use super::{deleted, required_text};
use crate::server::auth::AuthUser;
use crate::server::error::ApiError;
use crate::server::extract::{ApiJson, ApiPath};
use crate::server::state::AppState;

#[derive(Debug, Deserialize)]
pub struct CommentRequest {
    pub content: String,
}

/// `POST /forum/comment/:id` where `id` is the post being commented on.
pub async fn create_comment(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    ApiPath(post_id): ApiPath<i64>,
    ApiJson(body): ApiJson<CommentRequest>,
) -> Result<(StatusCode, Json<Comment>), ApiError> {
    let content = required_text("content", &body.content)?;
    let comment = state.forum.create_comment(user_id, post_id, &content).await?;
    info!(comment_id = comment.id, post_id, user_id, "Comment created");
    Ok((StatusCode::CREATED, Json(comment)))
}

pub async fn get_comment(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i64>,
) -> Result<Json<Comment>, ApiError> {
    Ok(Json(state.forum.get_comment(id).await?))
}

pub async fn list_comments(
    State(state): State<AppState>,
    ApiPath(post_id): ApiPath<i64>,
) -> Result<Json<Vec<Comment>>, ApiError> {
    Ok(Json(state.forum.list_comments(post_id).await?))
}

pub async fn update_comment(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    ApiPath(id): ApiPath<i64>,
    ApiJson(body): ApiJson<CommentRequest>,
) -> Result<Json<Comment>, ApiError> {
    let content = required_text("content", &body.content)?;
    let comment = state.forum.update_comment(id, &content).await?;
    info!(comment_id = id, user_id, "Comment updated");
    Ok(Json(comment))
}

pub async fn delete_comment(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    ApiPath(id): ApiPath<i64>,
) -> Result<Json<serde_json::Value>, ApiError> {
    state.forum.delete_comment(id).await?;
    info!(comment_id = id, user_id, "Comment deleted");
    Ok(deleted("Comment"))
}
