// Extractors whose rejections render as `ApiError`
use axum::extract::{FromRequest, FromRequestParts};

use crate::server::error::ApiError;

/// JSON body. Malformed or mistyped bodies are a 400.
#[derive(FromRequest)]
#[from_request(via(axum::Json), rejection(ApiError))]
pub struct ApiJson<T>(pub T);

/// Path parameters. Non-numeric ids are a 400.
#[derive(FromRequestParts)]
#[from_request(via(axum::extract::Path), rejection(ApiError))]
pub struct ApiPath<T>(pub T);

#[derive(FromRequestParts)]
#[from_request(via(axum::extract::Query), rejection(ApiError))]
pub struct ApiQuery<T>(pub T);
