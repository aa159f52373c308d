use axum::Json;
use axum::extract::State;
use delingo_shared::types::SearchResults;
use serde::Deserialize;

use super::required_text;
use crate::server::error::ApiError;
use crate::server::extract::ApiQuery;
use crate::server::state::AppState;

#[derive(Debug, Deserialize)]
pub struct SearchParams {
    #[serde(default)]
    pub query: String,
}

/// Case-insensitive substring search over thread titles and post contents.
pub async fn search_forum(
    State(state): State<AppState>,
    ApiQuery(params): ApiQuery<SearchParams>,
) -> Result<Json<SearchResults>, ApiError> {
    let query = required_text("query", &params.query)?;
    Ok(Json(state.forum.search(&query).await?))
}
