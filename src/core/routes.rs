// HTTP routes configuration

use crate::core::state::AppState;
use crate::handlers::{auth, fallback, gifts, health, lists, users};
use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;

pub fn build_router(state: Arc<AppState>) -> Router {
    Router::new()
        // Public endpoints
        .route("/health", get(health::health_handler))
        .route("/login", post(auth::login_handler))

        // Everything below needs a bearer token
        .route("/logout", post(auth::logout_handler))
        .route("/users", get(users::users_handler))
        .route("/lists", get(lists::lists_handler).post(lists::create_list_handler))
        .route("/lists/{id}", get(lists::list_view_handler))
        .route("/lists/{id}/gifts", post(lists::add_gift_handler))
        .route("/gifts/{id}/status", post(gifts::status_handler))
        .route(
            "/gifts/{id}/comments",
            get(gifts::comments_handler).post(gifts::add_comment_handler),
        )

        .fallback(fallback::fallback_handler)

        .with_state(state)
}
