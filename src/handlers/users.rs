use crate::core::state::AppState;
use crate::handlers::auth::CurrentUser;
use crate::models::user::UserProfile;
use axum::{extract::State, response::Json};
use std::sync::Arc;

/// Everyone who can be named as a recipient
///
/// GET /users
pub async fn users_handler(State(state): State<Arc<AppState>>, _user: CurrentUser) -> Json<Vec<UserProfile>> {
    Json(state.users.profiles())
}
