use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use delingo_shared::types::Post;
use serde::Deserialize;
use tracing::info;

use super::{deleted, required_text};
use crate::server::auth::AuthUser;
use crate::server::error::ApiError;
use crate::server::extract::{ApiJson, ApiPath};
use crate::server::state::AppState;

#[derive(Debug, Deserialize)]
pub struct CreatePostRequest {
    pub thread_id: i64,
    pub content: String,
}

#[derive(Debug, Deserialize)]
pub struct UpdatePostRequest {
    pub content: String,
}

pub async fn create_post(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    ApiJson(body): ApiJson<CreatePostRequest>,
) -> Result<(StatusCode, Json<Post>), ApiError> {
    let content = required_text("content", &body.content)?;
    let post = state
        .forum
        .create_post(user_id, body.thread_id, &content)
        .await?;
    info!(post_id = post.id, thread_id = post.thread_id, user_id, "Post created");
    Ok((StatusCode::CREATED, Json(post)))
}

pub async fn get_post(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i64>,
) -> Result<Json<Post>, ApiError> {
    Ok(Json(state.forum.get_post(id).await?))
}

pub async fn list_posts(
    State(state): State<AppState>,
    ApiPath(thread_id): ApiPath<i64>,
) -> Result<Json<Vec<Post>>, ApiError> {
    Ok(Json(state.forum.list_posts(thread_id).await?))
}

pub async fn update_post(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    ApiPath(id): ApiPath<i64>,
    ApiJson(body): ApiJson<UpdatePostRequest>,
) -> Result<Json<Post>, ApiError> {
    let content = required_text("content", &body.content)?;
    let post = state.forum.update_post(id, &content).await?;
    info!(post_id = id, user_id, "Post updated");
    Ok(Json(post))
}

pub async fn delete_post(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    ApiPath(id): ApiPath<i64>,
) -> Result<Json<serde_json::Value>, ApiError> {
    state.forum.delete_post(id).await?;
    info!(post_id = id, user_id, "Post deleted");
    Ok(deleted("Post"))
}
