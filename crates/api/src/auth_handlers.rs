use axum::{
    Form, Json,
    extract::State,
    http::{StatusCode, header},
    response::IntoResponse,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::AppState;
use crate::middleware::CurrentUser;
use bazaar_auth::AuthError;

#[derive(Debug, Deserialize)]
pub struct LoginForm {
    pub username: String,
    pub password: String,
}

/// Body of a successful login.
#[derive(Debug, Serialize)]
pub struct TokenResponse {
    pub access_token: String,
    pub token_type: String,
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

/// POST /token - exchange a username/password form for a bearer token
pub async fn login(
    State(state): State<Arc<AppState>>,
    Form(form): Form<LoginForm>,
) -> impl IntoResponse {
    match state.auth.login(&form.username, &form.password) {
        Ok(access_token) => {
            let response = TokenResponse {
                access_token,
                token_type: "bearer".to_string(),
            };
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(AuthError::InvalidCredentials) => {
            tracing::debug!(username = %form.username, "login rejected");
            let error = ErrorResponse {
                error: "Incorrect username or password".to_string(),
            };
            (
                StatusCode::UNAUTHORIZED,
                [(header::WWW_AUTHENTICATE, "Bearer")],
                Json(error),
            )
                .into_response()
        }
        Err(e) => {
            tracing::error!(reason = %e, "token issuance failed");
            let error = ErrorResponse {
                error: "Internal server error".to_string(),
            };
            (StatusCode::INTERNAL_SERVER_ERROR, Json(error)).into_response()
        }
    }
}

/// GET /user/me - the user resolved from the presented bearer token
pub async fn read_user_me(CurrentUser(user): CurrentUser) -> impl IntoResponse {
    Json(user)
}
