use crate::models::gift::{Gift, GiftStatus};
use chrono::{DateTime, Utc};
use serde::Serialize;

/// The columns a status change writes. Fields left as `None` are not sent
/// to the store and keep whatever value the gift already had.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct StatusUpdate {
    pub status: GiftStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub interested_buyer: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bought_by: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bought_at: Option<DateTime<Utc>>,
}

/// Work out what moving a gift to `status` writes.
///
/// Any transition is accepted from any current status and the last writer
/// wins. `actor` is not checked against the list's recipients.
pub fn apply_status(status: GiftStatus, actor: &str, now: DateTime<Utc>) -> StatusUpdate {
    let mut update = StatusUpdate {
        status,
        interested_buyer: None,
        bought_by: None,
        bought_at: None,
    };

    match status {
        GiftStatus::WantToBuy | GiftStatus::WantToBuyShared => {
            update.interested_buyer = Some(actor.to_string());
        }
        GiftStatus::Bought => {
            update.bought_by = Some(actor.to_string());
            update.bought_at = Some(now);
        }
        GiftStatus::Available => {}
    }

    update
}

impl StatusUpdate {
    /// Overwrite the written columns on an in-memory gift.
    pub fn apply_to(&self, gift: &mut Gift) {
        gift.status = self.status;
        if let Some(buyer) = &self.interested_buyer {
            gift.interested_buyer = Some(buyer.clone());
        }
        if let Some(bought_by) = &self.bought_by {
            gift.bought_by = Some(bought_by.clone());
        }
        if let Some(bought_at) = self.bought_at {
            gift.bought_at = Some(bought_at);
        }
    }
}
