use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A note left on a gift. Comments are never edited or deleted.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Comment {
    pub id: i64,
    pub gift_id: i64,
    pub username: String,
    pub comment: String,
    pub created_at: DateTime<Utc>,
}

/// Insert payload for the `gift_comments` table.
#[derive(Clone, Debug, Serialize)]
pub struct NewComment {
    pub gift_id: i64,
    pub comment: String,
    pub username: String,
    pub created_at: DateTime<Utc>,
}

impl NewComment {
    pub fn into_comment(self, id: i64) -> Comment {
        Comment {
            id,
            gift_id: self.gift_id,
            username: self.username,
            comment: self.comment,
            created_at: self.created_at,
        }
    }
}
