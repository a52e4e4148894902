use crate::core::error::ApiError;
use crate::core::state::AppState;
use crate::handlers::auth::CurrentUser;
use crate::models::api::{CommentRequest, StatusRequest};
use crate::models::comment::Comment;
use crate::models::gift::Gift;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
};
use std::sync::Arc;
use tracing::{debug, error, info};

/// Change a gift's purchase status
///
/// The caller is not checked against the list's recipients; only clients
/// hide these actions from recipients.
///
/// POST /gifts/{id}/status
pub async fn status_handler(
    State(state): State<Arc<AppState>>,
    user: CurrentUser,
    Path(gift_id): Path<i64>,
    Json(request): Json<StatusRequest>,
) -> Result<Json<Gift>, ApiError> {
    debug!(gift_id, actor = %user.username, "Applying status without recipient check");

    let gift = state
        .store
        .update_gift_status(gift_id, request.status, &user.username)
        .await
        .inspect_err(|e| error!(error = %e, gift_id, "Failed to update gift status"))?;

    info!(
        gift_id,
        list_id = gift.list_id,
        status = %gift.status,
        actor = %user.username,
        "Gift status changed"
    );

    Ok(Json(gift))
}

/// GET /gifts/{id}/comments
pub async fn comments_handler(
    State(state): State<Arc<AppState>>,
    _user: CurrentUser,
    Path(gift_id): Path<i64>,
) -> Result<Json<Vec<Comment>>, ApiError> {
    let comments = state
        .store
        .list_comments(gift_id)
        .await
        .inspect_err(|e| error!(error = %e, gift_id, "Failed to load comments"))?;

    Ok(Json(comments))
}

/// POST /gifts/{id}/comments
pub async fn add_comment_handler(
    State(state): State<Arc<AppState>>,
    user: CurrentUser,
    Path(gift_id): Path<i64>,
    Json(request): Json<CommentRequest>,
) -> Result<(StatusCode, Json<Comment>), ApiError> {
    let text = request.validate()?;

    let comment = state
        .store
        .add_comment(gift_id, &text, &user.username)
        .await
        .inspect_err(|e| error!(error = %e, gift_id, "Failed to add comment"))?;

    info!(comment_id = comment.id, gift_id, author = %user.username, "Comment added");

    Ok((StatusCode::CREATED, Json(comment)))
}
