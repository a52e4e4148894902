use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Purchase lifecycle of a gift suggestion.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GiftStatus {
    #[default]
    Available,
    WantToBuy,
    WantToBuyShared,
    Bought,
}

impl GiftStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            GiftStatus::Available => "available",
            GiftStatus::WantToBuy => "want_to_buy",
            GiftStatus::WantToBuyShared => "want_to_buy_shared",
            GiftStatus::Bought => "bought",
        }
    }
}

impl fmt::Display for GiftStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A gift suggestion on a list.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Gift {
    pub id: i64,
    /// Owning list
    pub list_id: i64,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    /// Username of whoever suggested the gift
    pub added_by: String,
    /// Missing in a row means the column default
    #[serde(default)]
    pub status: GiftStatus,
    #[serde(default)]
    pub interested_buyer: Option<String>,
    #[serde(default)]
    pub bought_by: Option<String>,
    #[serde(default)]
    pub bought_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

/// Insert payload for the `gifts` table.
#[derive(Clone, Debug, Serialize)]
pub struct NewGift {
    pub list_id: i64,
    pub name: String,
    pub description: Option<String>,
    pub added_by: String,
    pub status: GiftStatus,
    pub created_at: DateTime<Utc>,
}

impl NewGift {
    /// New gifts always start out available.
    pub fn new(
        list_id: i64,
        name: &str,
        description: Option<&str>,
        added_by: &str,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            list_id,
            name: name.to_string(),
            description: description.map(str::to_string),
            added_by: added_by.to_string(),
            status: GiftStatus::Available,
            created_at,
        }
    }

    pub fn into_gift(self, id: i64) -> Gift {
        Gift {
            id,
            list_id: self.list_id,
            name: self.name,
            description: self.description,
            added_by: self.added_by,
            status: self.status,
            interested_buyer: None,
            bought_by: None,
            bought_at: None,
            created_at: self.created_at,
        }
    }
}
