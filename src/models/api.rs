use crate::models::comment::Comment;
use crate::models::gift::{Gift, GiftStatus};
use crate::models::gift_list::GiftList;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct LoginResponse {
    pub token: String,
    pub username: String,
    pub display_name: String,
}

#[derive(Deserialize)]
pub struct CreateListRequest {
    pub name: String,
    #[serde(default)]
    pub recipients: Vec<String>,
}

#[derive(Deserialize)]
pub struct AddGiftRequest {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
}

#[derive(Deserialize)]
pub struct StatusRequest {
    pub status: GiftStatus,
}

#[derive(Deserialize)]
pub struct CommentRequest {
    pub comment: String,
}

#[derive(Serialize)]
pub struct SuccessResponse {
    pub success: bool,
    pub message: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub success: bool,
    pub error: String,
}

/// Purchase tracking shown to everyone except the list's recipients.
#[derive(Debug, Serialize, Deserialize)]
pub struct GiftTracking {
    pub status: GiftStatus,
    pub interested_buyer: Option<String>,
    pub bought_by: Option<String>,
    pub bought_at: Option<DateTime<Utc>>,
    pub comments: Vec<Comment>,
}

/// A gift as rendered for one viewer.
#[derive(Debug, Serialize, Deserialize)]
pub struct GiftView {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
    pub added_by: String,
    pub created_at: DateTime<Utc>,
    #[serde(flatten)]
    pub tracking: Option<GiftTracking>,
}

impl GiftView {
    /// Recipient view: the gift row with every tracking field dropped.
    pub fn redacted(gift: Gift) -> Self {
        Self {
            id: gift.id,
            name: gift.name,
            description: gift.description,
            added_by: gift.added_by,
            created_at: gift.created_at,
            tracking: None,
        }
    }

    pub fn tracked(gift: Gift, comments: Vec<Comment>) -> Self {
        Self {
            id: gift.id,
            name: gift.name,
            description: gift.description,
            added_by: gift.added_by,
            created_at: gift.created_at,
            tracking: Some(GiftTracking {
                status: gift.status,
                interested_buyer: gift.interested_buyer,
                bought_by: gift.bought_by,
                bought_at: gift.bought_at,
                comments,
            }),
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ListView {
    pub list: GiftList,
    pub is_recipient: bool,
    pub gifts: Vec<GiftView>,
}
