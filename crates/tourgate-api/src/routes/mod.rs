//! API routes

mod auth;
mod health;
mod me;
mod pages;
pub mod types;

use axum::{Router, middleware};
use tourgate_auth::auth_middleware;
use tower_http::{limit::RequestBodyLimitLayer, timeout::TimeoutLayer};

use crate::state::AppState;

/// Largest request body accepted by the API
const MAX_BODY_BYTES: usize = 64 * 1024;

/// Create the main router
pub fn create_router(state: AppState) -> Router {
    let gate = middleware::from_fn_with_state(state.jwt.clone(), auth_middleware);
    let request_timeout = state.settings.request_timeout;
    let ui_dir = state.settings.ui_dir.clone();

    Router::new()
        // Health check
        .merge(health::routes())
        // Registration and login
        .merge(auth::routes())
        // Routes behind the access gate
        .merge(me::routes().route_layer(gate))
        // HTML pages and static assets
        .merge(pages::routes(&ui_dir))
        .with_state(state)
        .layer(RequestBodyLimitLayer::new(MAX_BODY_BYTES))
        .layer(TimeoutLayer::new(request_timeout))
}
