use crate::core::error::ApiError;
use crate::core::state::AppState;
use crate::handlers::auth::CurrentUser;
use crate::models::api::{AddGiftRequest, CreateListRequest, GiftView, ListView};
use crate::models::gift::Gift;
use crate::models::gift_list::GiftList;
use crate::policy::visibility::{is_recipient, visible_gifts};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
};
use std::sync::Arc;
use tracing::{error, info};

/// All lists, newest first
///
/// GET /lists
pub async fn lists_handler(
    State(state): State<Arc<AppState>>,
    _user: CurrentUser,
) -> Result<Json<Vec<GiftList>>, ApiError> {
    let lists = state.store.list_all_lists().await.inspect_err(|e| {
        error!(error = %e, "Failed to load lists");
    })?;

    Ok(Json(lists))
}

/// POST /lists
pub async fn create_list_handler(
    State(state): State<Arc<AppState>>,
    user: CurrentUser,
    Json(request): Json<CreateListRequest>,
) -> Result<(StatusCode, Json<GiftList>), ApiError> {
    let validated = request.validate(&state.users)?;

    let list = state
        .store
        .create_list(&validated.name, &validated.recipients, &user.username)
        .await
        .inspect_err(|e| error!(error = %e, "Failed to create list"))?;

    info!(
        list_id = list.id,
        name = %list.name,
        recipients = ?list.recipients,
        created_by = %user.username,
        "List created"
    );

    Ok((StatusCode::CREATED, Json(list)))
}

/// One list as the caller may see it
///
/// Recipients get only the gifts they added, without status, buyers or
/// comments. Everyone else gets every gift with full tracking.
///
/// GET /lists/{id}
pub async fn list_view_handler(
    State(state): State<Arc<AppState>>,
    user: CurrentUser,
    Path(list_id): Path<i64>,
) -> Result<Json<ListView>, ApiError> {
    let list = state
        .store
        .get_list(list_id)
        .await
        .inspect_err(|e| error!(error = %e, list_id, "Failed to load list"))?
        .ok_or_else(|| ApiError::NotFound(format!("List {list_id}")))?;

    // Separate round trip; a list removed in between just yields no gifts
    let gifts = state
        .store
        .list_gifts(list_id)
        .await
        .inspect_err(|e| error!(error = %e, list_id, "Failed to load gifts"))?;

    let recipient = is_recipient(&list, &user.username);
    let visible: Vec<Gift> = visible_gifts(&list, gifts, &user.username);

    let mut views = Vec::with_capacity(visible.len());
    for gift in visible {
        if recipient {
            views.push(GiftView::redacted(gift));
        } else {
            let comments = state
                .store
                .list_comments(gift.id)
                .await
                .inspect_err(|e| error!(error = %e, gift_id = gift.id, "Failed to load comments"))?;
            views.push(GiftView::tracked(gift, comments));
        }
    }

    Ok(Json(ListView {
        list,
        is_recipient: recipient,
        gifts: views,
    }))
}

/// Anyone, recipients included, may suggest a gift
///
/// POST /lists/{id}/gifts
pub async fn add_gift_handler(
    State(state): State<Arc<AppState>>,
    user: CurrentUser,
    Path(list_id): Path<i64>,
    Json(request): Json<AddGiftRequest>,
) -> Result<(StatusCode, Json<Gift>), ApiError> {
    let validated = request.validate()?;

    let gift = state
        .store
        .add_gift(list_id, &validated.name, validated.description.as_deref(), &user.username)
        .await
        .inspect_err(|e| error!(error = %e, list_id, "Failed to add gift"))?;

    info!(
        gift_id = gift.id,
        list_id,
        name = %gift.name,
        added_by = %user.username,
        "Gift added"
    );

    Ok((StatusCode::CREATED, Json(gift)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::error::{StoreError, ValidationError};
    use crate::handlers::test_support::{as_user, create_test_state, create_test_state_with_store};
    use crate::models::comment::Comment;
    use crate::models::gift::GiftStatus;
    use crate::stores::gift_store::GiftStore;
    use crate::stores::memory_store::MemoryStore;
    use async_trait::async_trait;

    /// Deletes each list right after it is looked up, as a concurrent
    /// delete would. Gifts of a deleted list go with it.
    struct VanishingLists(MemoryStore);

    #[async_trait]
    impl GiftStore for VanishingLists {
        async fn list_all_lists(&self) -> Result<Vec<GiftList>, StoreError> {
            self.0.list_all_lists().await
        }

        async fn get_list(&self, id: i64) -> Result<Option<GiftList>, StoreError> {
            let list = self.0.get_list(id).await?;
            self.0.remove_list(id);
            Ok(list)
        }

        async fn list_gifts(&self, list_id: i64) -> Result<Vec<Gift>, StoreError> {
            if self.0.get_list(list_id).await?.is_none() {
                return Ok(Vec::new());
            }
            self.0.list_gifts(list_id).await
        }

        async fn create_list(
            &self,
            name: &str,
            recipients: &[String],
            created_by: &str,
        ) -> Result<GiftList, StoreError> {
            self.0.create_list(name, recipients, created_by).await
        }

        async fn add_gift(
            &self,
            list_id: i64,
            name: &str,
            description: Option<&str>,
            added_by: &str,
        ) -> Result<Gift, StoreError> {
            self.0.add_gift(list_id, name, description, added_by).await
        }

        async fn update_gift_status(
            &self,
            gift_id: i64,
            status: GiftStatus,
            actor: &str,
        ) -> Result<Gift, StoreError> {
            self.0.update_gift_status(gift_id, status, actor).await
        }

        async fn add_comment(&self, gift_id: i64, text: &str, author: &str) -> Result<Comment, StoreError> {
            self.0.add_comment(gift_id, text, author).await
        }

        async fn list_comments(&self, gift_id: i64) -> Result<Vec<Comment>, StoreError> {
            self.0.list_comments(gift_id).await
        }

        async fn check_tables(&self) -> Result<(), StoreError> {
            self.0.check_tables().await
        }
    }

    async fn seed_list(state: &Arc<AppState>) -> (GiftList, Gift, Gift) {
        let list = state
            .store
            .create_list("Christmas", &["alice".to_string()], "carol")
            .await
            .unwrap();
        let own = state.store.add_gift(list.id, "Scarf", None, "alice").await.unwrap();
        let surprise = state.store.add_gift(list.id, "Watch", None, "bob").await.unwrap();
        state
            .store
            .update_gift_status(surprise.id, GiftStatus::Bought, "bob")
            .await
            .unwrap();
        state.store.add_comment(surprise.id, "Got it!", "bob").await.unwrap();
        (list, own, surprise)
    }

    #[tokio::test]
    async fn test_recipient_view_is_filtered_and_redacted() {
        let state = create_test_state();
        let (list, own, _) = seed_list(&state).await;

        let Json(view) = list_view_handler(State(state), as_user("alice"), Path(list.id))
            .await
            .unwrap();

        assert!(view.is_recipient);
        assert_eq!(view.gifts.len(), 1);
        assert_eq!(view.gifts[0].id, own.id);
        assert!(view.gifts[0].tracking.is_none());

        let json = serde_json::to_string(&view).unwrap();
        assert!(!json.contains("bought"));
        assert!(!json.contains("Got it!"));
    }

    #[tokio::test]
    async fn test_non_recipient_view_has_everything() {
        let state = create_test_state();
        let (list, own, surprise) = seed_list(&state).await;

        let Json(view) = list_view_handler(State(state), as_user("bob"), Path(list.id))
            .await
            .unwrap();

        assert!(!view.is_recipient);
        let ids: Vec<i64> = view.gifts.iter().map(|g| g.id).collect();
        assert_eq!(ids, vec![own.id, surprise.id]);

        let tracking = view.gifts[1].tracking.as_ref().unwrap();
        assert_eq!(tracking.status, GiftStatus::Bought);
        assert_eq!(tracking.bought_by.as_deref(), Some("bob"));
        assert_eq!(tracking.comments.len(), 1);
        assert_eq!(tracking.comments[0].comment, "Got it!");
    }

    #[tokio::test]
    async fn test_view_missing_list() {
        let state = create_test_state();

        let result = list_view_handler(State(state), as_user("bob"), Path(404)).await;
        assert!(matches!(result, Err(ApiError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_view_of_list_removed_mid_request_is_empty() {
        let store = Arc::new(VanishingLists(MemoryStore::new()));
        let state = create_test_state_with_store(store.clone());
        let (list, _, _) = seed_list(&state).await;

        let Json(view) = list_view_handler(State(state), as_user("bob"), Path(list.id))
            .await
            .unwrap();

        assert_eq!(view.list.id, list.id);
        assert!(!view.is_recipient);
        assert!(view.gifts.is_empty());
        assert!(store.0.get_list(list.id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_create_list() {
        let state = create_test_state();
        let request = CreateListRequest {
            name: " Birthday ".to_string(),
            recipients: vec!["bob".to_string(), "bob".to_string()],
        };

        let (status, Json(list)) = create_list_handler(State(state.clone()), as_user("alice"), Json(request))
            .await
            .unwrap();

        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(list.name, "Birthday");
        assert_eq!(list.recipients, vec!["bob".to_string()]);
        assert_eq!(list.created_by, "alice");

        let Json(lists) = lists_handler(State(state), as_user("carol")).await.unwrap();
        assert_eq!(lists, vec![list]);
    }

    #[tokio::test]
    async fn test_create_list_rejects_unknown_recipient() {
        let state = create_test_state();
        let request = CreateListRequest {
            name: "Birthday".to_string(),
            recipients: vec!["mallory".to_string()],
        };

        let result = create_list_handler(State(state.clone()), as_user("alice"), Json(request)).await;
        assert!(matches!(
            result,
            Err(ApiError::Validation(ValidationError::UnknownUser(_)))
        ));
        assert!(state.store.list_all_lists().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_lists_newest_first() {
        let state = create_test_state();
        let first = state.store.create_list("A", &["alice".to_string()], "bob").await.unwrap();
        let second = state.store.create_list("B", &["bob".to_string()], "alice").await.unwrap();

        let Json(lists) = lists_handler(State(state), as_user("carol")).await.unwrap();
        assert_eq!(lists.iter().map(|l| l.id).collect::<Vec<_>>(), vec![second.id, first.id]);
    }

    #[tokio::test]
    async fn test_recipient_can_add_gift() {
        let state = create_test_state();
        let (list, _, _) = seed_list(&state).await;
        let request = AddGiftRequest {
            name: "Board game".to_string(),
            description: Some("  ".to_string()),
        };

        let (status, Json(gift)) = add_gift_handler(State(state), as_user("alice"), Path(list.id), Json(request))
            .await
            .unwrap();

        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(gift.added_by, "alice");
        assert_eq!(gift.status, GiftStatus::Available);
        assert!(gift.description.is_none());
    }

    #[tokio::test]
    async fn test_add_gift_requires_name() {
        let state = create_test_state();
        let (list, _, _) = seed_list(&state).await;
        let request = AddGiftRequest {
            name: "".to_string(),
            description: None,
        };

        let result = add_gift_handler(State(state), as_user("bob"), Path(list.id), Json(request)).await;
        assert!(matches!(result, Err(ApiError::Validation(_))));
    }

    #[tokio::test]
    async fn test_add_gift_to_missing_list_surfaces_store_error() {
        let state = create_test_state();
        let request = AddGiftRequest {
            name: "Scarf".to_string(),
            description: None,
        };

        let result = add_gift_handler(State(state), as_user("bob"), Path(77), Json(request)).await;
        assert!(matches!(result, Err(ApiError::Store(StoreError::Rejected { .. }))));
    }
}
