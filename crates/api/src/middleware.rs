use axum::{
    Json,
    extract::{Request, State},
    http::{HeaderMap, StatusCode, header},
    middleware::Next,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use std::sync::Arc;

use crate::AppState;
use bazaar_auth::{AuthError, AuthenticatedUser};

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

/// The undifferentiated 401 every token failure collapses into.
fn unauthorized_response() -> Response {
    let error = ErrorResponse {
        error: "Could not validate credentials".to_string(),
    };
    (
        StatusCode::UNAUTHORIZED,
        [(header::WWW_AUTHENTICATE, "Bearer")],
        Json(error),
    )
        .into_response()
}

/// Map an auth failure to its HTTP shape: a disabled account is a 400,
/// every other failure is the same 401 bearer challenge.
pub fn auth_error_response(err: &AuthError) -> Response {
    tracing::debug!(reason = %err, "rejecting credentials");
    match err {
        AuthError::AccountDisabled => {
            let error = ErrorResponse {
                error: "Inactive user".to_string(),
            };
            (StatusCode::BAD_REQUEST, Json(error)).into_response()
        }
        _ => unauthorized_response(),
    }
}

/// Extract the bearer token from the Authorization header and resolve
/// it to a user.
pub fn extract_user_from_token(
    state: &AppState,
    headers: &HeaderMap,
) -> Result<AuthenticatedUser, Response> {
    let token = headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .ok_or_else(|| {
            tracing::debug!("missing or malformed Authorization header");
            unauthorized_response()
        })?;

    state
        .auth
        .current_user(token)
        .map_err(|e| auth_error_response(&e))
}

/// Middleware to require a valid bearer token
pub async fn require_auth(
    State(state): State<Arc<AppState>>,
    mut request: Request,
    next: Next,
) -> Result<Response, Response> {
    let user = extract_user_from_token(&state, request.headers())?;

    // Store user in request extensions for handlers to access
    request.extensions_mut().insert(user);

    Ok(next.run(request).await)
}

/// Extractor for the resolved user.
/// Use this in handlers behind the auth middleware.
#[derive(Debug, Clone)]
pub struct CurrentUser(pub AuthenticatedUser);

impl<S> axum::extract::FromRequestParts<S> for CurrentUser
where
    S: Send + Sync,
{
    type Rejection = (StatusCode, Json<ErrorResponse>);

    async fn from_request_parts(
        parts: &mut axum::http::request::Parts,
        _state: &S,
    ) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<AuthenticatedUser>()
            .cloned()
            .map(CurrentUser)
            .ok_or_else(|| {
                let error = ErrorResponse {
                    error: "User not authenticated".to_string(),
                };
                (StatusCode::UNAUTHORIZED, Json(error))
            })
    }
}
