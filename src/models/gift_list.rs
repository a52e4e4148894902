use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A shared list of gift suggestions for one or more recipients.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GiftList {
    pub id: i64,
    pub name: String,
    /// Usernames the list is for
    pub recipients: Vec<String>,
    pub created_by: String,
    pub created_at: DateTime<Utc>,
}

impl GiftList {
    pub fn has_recipient(&self, username: &str) -> bool {
        self.recipients.iter().any(|r| r == username)
    }
}

/// Insert payload for the `gift_lists` table.
#[derive(Clone, Debug, Serialize)]
pub struct NewGiftList {
    pub name: String,
    pub recipients: Vec<String>,
    pub created_by: String,
    pub created_at: DateTime<Utc>,
}

impl NewGiftList {
    /// Duplicate recipients are collapsed, keeping the first occurrence.
    pub fn new(name: &str, recipients: &[String], created_by: &str, created_at: DateTime<Utc>) -> Self {
        let mut unique: Vec<String> = Vec::with_capacity(recipients.len());
        for recipient in recipients {
            if !unique.contains(recipient) {
                unique.push(recipient.clone());
            }
        }

        Self {
            name: name.to_string(),
            recipients: unique,
            created_by: created_by.to_string(),
            created_at,
        }
    }

    pub fn into_list(self, id: i64) -> GiftList {
        GiftList {
            id,
            name: self.name,
            recipients: self.recipients,
            created_by: self.created_by,
            created_at: self.created_at,
        }
    }
}
