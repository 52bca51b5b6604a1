//! Authentication middleware for Axum

use axum::{
    extract::{FromRequestParts, Request, State},
    http::request::Parts,
    middleware::Next,
    response::Response,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{debug, warn};

use crate::cookie::{TOKEN_COOKIE, extract_cookie};
use crate::error::AuthError;
use crate::jwt::{Claims, JwtManager};

/// Authenticated user information
///
/// Inserted into request extensions by [`auth_middleware`] and read back by
/// handlers through the extractor impl.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthUser {
    pub user_id: String,
}

impl AuthUser {
    /// Create from JWT claims
    pub fn from_claims(claims: &Claims) -> Self {
        Self {
            user_id: claims.sub.clone(),
        }
    }
}

/// Authentication middleware
///
/// Requires a valid token in the `token` cookie. On success the resolved
/// [`AuthUser`] is added to the request extensions; otherwise the request is
/// rejected with 401 before reaching the wrapped handler.
pub async fn auth_middleware(
    State(jwt_manager): State<Arc<JwtManager>>,
    mut request: Request,
    next: Next,
) -> Result<Response, AuthError> {
    let token = extract_cookie(request.headers(), TOKEN_COOKIE).ok_or_else(|| {
        warn!("Request to {} without token cookie", request.uri().path());
        AuthError::MissingToken
    })?;

    let claims = jwt_manager.validate_token(&token).map_err(|e| {
        warn!("Rejected token for {}: {}", request.uri().path(), e);
        e
    })?;
    let user = AuthUser::from_claims(&claims);

    debug!("Authenticated user: {}", user.user_id);

    request.extensions_mut().insert(user);

    Ok(next.run(request).await)
}

impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
{
    type Rejection = AuthError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<AuthUser>()
            .cloned()
            .ok_or(AuthError::MissingToken)
    }
}
