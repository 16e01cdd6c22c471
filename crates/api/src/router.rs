use axum::{
    Json, Router,
    http::StatusCode,
    middleware,
    routing::{get, post, put},
};
use serde_json::json;
use std::sync::Arc;

use crate::{AppState, auth_handlers, file_handlers, item_handlers, middleware as auth_middleware};

pub fn router(state: Arc<AppState>) -> Router {
    // Public routes (no authentication required)
    let public_routes = Router::new()
        .route(
            "/",
            get(|| async { (StatusCode::IM_A_TEAPOT, Json(json!({ "Hello,": "world!" }))) }),
        )
        .route("/items/{item_id}/name", get(item_handlers::read_item_name))
        .route(
            "/items/{item_id}/public",
            get(item_handlers::read_item_public),
        )
        .route("/items/", post(item_handlers::create_item))
        .route(
            "/items/{item_id}",
            put(item_handlers::update_item).patch(item_handlers::patch_item),
        )
        .route("/offers/", post(item_handlers::create_offer))
        .route("/uploadfile/", post(file_handlers::create_upload_file))
        .route("/token", post(auth_handlers::login));

    // Protected routes (require a valid bearer token)
    let protected_routes = Router::new()
        .route("/user/me", get(auth_handlers::read_user_me))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            auth_middleware::require_auth,
        ));

    // Combine all routes
    Router::new()
        .merge(public_routes)
        .merge(protected_routes)
        .with_state(state)
}
