use axum::http::{HeaderValue, Method, header};
use tower_http::cors::CorsLayer;

use crate::errors::StartupError;

/// Create the CORS layer for the configured browser origins.
pub fn create_cors_layer(origins: &[String]) -> Result<CorsLayer, StartupError> {
    let origins = origins
        .iter()
        .map(|origin| {
            origin
                .parse::<HeaderValue>()
                .map_err(|_| StartupError::Config(format!("invalid CORS origin: {origin}")))
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok(CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION]))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_origin_with_invalid_header_chars() {
        let result = create_cors_layer(&["http://bad\norigin".to_string()]);
        assert!(matches!(result, Err(StartupError::Config(_))));
    }

    #[test]
    fn test_accepts_empty_origin_list() {
        assert!(create_cors_layer(&[]).is_ok());
    }
}
