use crate::core::error::{ApiError, AuthError};
use crate::core::state::AppState;
use crate::models::api::{LoginRequest, LoginResponse, SuccessResponse};
use crate::utils::auth::bearer_token;
use axum::{
    extract::{FromRequestParts, State},
    http::request::Parts,
    response::Json,
};
use std::sync::Arc;
use tracing::{info, warn};

/// The logged-in user behind a request's bearer token
#[derive(Debug, Clone)]
pub struct CurrentUser {
    pub username: String,
    pub token: String,
}

impl FromRequestParts<Arc<AppState>> for CurrentUser {
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &Arc<AppState>) -> Result<Self, Self::Rejection> {
        let token = bearer_token(&parts.headers).ok_or(AuthError::MissingToken)?;

        let username = state
            .sessions
            .username(token)
            .ok_or(AuthError::InvalidToken)?;

        Ok(CurrentUser {
            username,
            token: token.to_string(),
        })
    }
}

/// Exchange a username and password for a session token
///
/// POST /login
pub async fn login_handler(
    State(state): State<Arc<AppState>>,
    Json(request): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, ApiError> {
    let user = match state.users.authenticate(&request.username, &request.password) {
        Some(user) => user,
        None => {
            warn!(username = %request.username, "Login rejected");
            return Err(AuthError::InvalidCredentials.into());
        }
    };

    let token = state.sessions.create(&user.username);

    info!(username = %user.username, "User logged in");

    Ok(Json(LoginResponse {
        token,
        username: user.username.clone(),
        display_name: user.display_name.clone(),
    }))
}

/// End the caller's session
///
/// POST /logout
pub async fn logout_handler(
    State(state): State<Arc<AppState>>,
    user: CurrentUser,
) -> Json<SuccessResponse> {
    state.sessions.revoke(&user.token);

    info!(username = %user.username, "User logged out");

    Json(SuccessResponse {
        success: true,
        message: "Logged out".to_string(),
    })
}
