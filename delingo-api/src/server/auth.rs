//! Bearer token authentication.
//!
//! Tokens are HS256 JWTs issued elsewhere. The only claim the API relies on
//! is `user_id`, which becomes the acting user of a mutating request.
use axum::async_trait;
use axum::extract::FromRequestParts;
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;
use delingo_shared::types::UserId;
use jsonwebtoken::{Algorithm, DecodingKey, Validation, decode};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::server::error::ApiError;
use crate::server::state::AppState;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub user_id: UserId,
    pub exp: usize,
}

/// Verifies bearer tokens against the shared secret.
pub struct TokenVerifier {
    key: DecodingKey,
    validation: Validation,
}

impl TokenVerifier {
    pub fn new(secret: &[u8]) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_required_spec_claims(&["exp"]);
        Self {
            key: DecodingKey::from_secret(secret),
            validation,
        }
    }

    /// Returns the user the token was issued to.
    pub fn verify(&self, token: &str) -> Result<UserId, ApiError> {
        decode::<Claims>(token, &self.key, &self.validation)
            .map(|data| data.claims.user_id)
            .map_err(|e| {
                debug!(error = %e, "Rejected bearer token");
                ApiError::Unauthorized("Invalid or expired token".to_string())
            })
    }
}

/// The authenticated caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuthUser(pub UserId);

#[async_trait]
impl FromRequestParts<AppState> for AuthUser {
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let token = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .and_then(bearer_token)
            .ok_or_else(|| ApiError::Unauthorized("Missing bearer token".to_string()))?;

        state.tokens.verify(token).map(AuthUser)
    }
}

/// Extracts the credentials of a `Bearer` authorization header.
/// The scheme name is matched case-insensitively.
fn bearer_token(header: &str) -> Option<&str> {
    let (scheme, token) = header.trim().split_once(' ')?;
    let token = token.trim();
    (scheme.eq_ignore_ascii_case("bearer") && !token.is_empty()).then_some(token)
}

#[cfg(test)]
mod tests {
    use super::*;
    use jsonwebtoken::{EncodingKey, Header, encode};

    const SECRET: &[u8] = b"test-secret";

    fn token(claims: &Claims, secret: &[u8]) -> String {
        encode(&Header::default(), claims, &EncodingKey::from_secret(secret)).unwrap()
    }

    fn in_one_hour() -> usize {
        (chrono::Utc::now().timestamp() + 3600) as usize
    }

    #[test]
    fn test_valid_token_yields_user_id() {
        let verifier = TokenVerifier::new(SECRET);
        let jwt = token(&Claims { user_id: 17, exp: in_one_hour() }, SECRET);

        assert_eq!(verifier.verify(&jwt).unwrap(), 17);
    }

    #[test]
    fn test_token_signed_with_other_secret_is_rejected() {
        let verifier = TokenVerifier::new(SECRET);
        let jwt = token(&Claims { user_id: 17, exp: in_one_hour() }, b"other-secret");

        assert!(matches!(verifier.verify(&jwt), Err(ApiError::Unauthorized(_))));
    }

    #[test]
    fn test_expired_token_is_rejected() {
        let verifier = TokenVerifier::new(SECRET);
        let expired = (chrono::Utc::now().timestamp() - 3600) as usize;
        let jwt = token(&Claims { user_id: 17, exp: expired }, SECRET);

        assert!(matches!(verifier.verify(&jwt), Err(ApiError::Unauthorized(_))));
    }

    #[test]
    fn test_bearer_scheme_is_case_insensitive() {
        assert_eq!(bearer_token("Bearer abc"), Some("abc"));
        assert_eq!(bearer_token("bearer abc"), Some("abc"));
        assert_eq!(bearer_token("BEARER  abc "), Some("abc"));
        assert_eq!(bearer_token("Basic abc"), None);
        assert_eq!(bearer_token("Bearer"), None);
        assert_eq!(bearer_token("Bearer   "), None);
    }

    #[test]
    fn test_garbage_is_rejected() {
        let verifier = TokenVerifier::new(SECRET);
        assert!(verifier.verify("not.a.jwt").is_err());
    }
}
