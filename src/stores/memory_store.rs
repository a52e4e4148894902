use crate::core::error::StoreError;
use crate::models::comment::{Comment, NewComment};
use crate::models::gift::{Gift, GiftStatus, NewGift};
use crate::models::gift_list::{GiftList, NewGiftList};
use crate::policy::status::apply_status;
use crate::stores::gift_store::GiftStore;
use async_trait::async_trait;
use chrono::Utc;
use dashmap::DashMap;
use std::sync::atomic::{AtomicI64, Ordering};

/// In-process record store with the same ordering and update semantics as
/// the hosted one. Ids come from one shared counter.
pub struct MemoryStore {
    lists: DashMap<i64, GiftList>,
    gifts: DashMap<i64, Gift>,
    comments: DashMap<i64, Comment>,
    next_id: AtomicI64,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self {
            lists: DashMap::new(),
            gifts: DashMap::new(),
            comments: DashMap::new(),
            next_id: AtomicI64::new(1),
        }
    }

    fn allocate_id(&self) -> i64 {
        self.next_id.fetch_add(1, Ordering::Relaxed)
    }

    /// Drop a list, leaving its gifts behind
    pub fn remove_list(&self, id: i64) -> Option<GiftList> {
        self.lists.remove(&id).map(|(_, list)| list)
    }

    pub fn len(&self) -> usize {
        self.lists.len() + self.gifts.len() + self.comments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl GiftStore for MemoryStore {
    async fn list_all_lists(&self) -> Result<Vec<GiftList>, StoreError> {
        let mut lists: Vec<GiftList> = self.lists.iter().map(|entry| entry.value().clone()).collect();
        lists.sort_by(|a, b| (b.created_at, b.id).cmp(&(a.created_at, a.id)));
        Ok(lists)
    }

    async fn get_list(&self, id: i64) -> Result<Option<GiftList>, StoreError> {
        Ok(self.lists.get(&id).map(|entry| entry.value().clone()))
    }

    async fn list_gifts(&self, list_id: i64) -> Result<Vec<Gift>, StoreError> {
        let mut gifts: Vec<Gift> = self
            .gifts
            .iter()
            .filter(|entry| entry.value().list_id == list_id)
            .map(|entry| entry.value().clone())
            .collect();
        gifts.sort_by_key(|gift| (gift.created_at, gift.id));
        Ok(gifts)
    }

    async fn create_list(
        &self,
        name: &str,
        recipients: &[String],
        created_by: &str,
    ) -> Result<GiftList, StoreError> {
        let list = NewGiftList::new(name, recipients, created_by, Utc::now()).into_list(self.allocate_id());
        self.lists.insert(list.id, list.clone());
        Ok(list)
    }

    async fn add_gift(
        &self,
        list_id: i64,
        name: &str,
        description: Option<&str>,
        added_by: &str,
    ) -> Result<Gift, StoreError> {
        // Mirrors the foreign key on gifts.list_id
        if !self.lists.contains_key(&list_id) {
            return Err(StoreError::Rejected {
                status: 409,
                message: format!("list {list_id} does not exist"),
            });
        }

        let gift = NewGift::new(list_id, name, description, added_by, Utc::now()).into_gift(self.allocate_id());
        self.gifts.insert(gift.id, gift.clone());
        Ok(gift)
    }

    async fn update_gift_status(
        &self,
        gift_id: i64,
        status: GiftStatus,
        actor: &str,
    ) -> Result<Gift, StoreError> {
        let mut entry = self
            .gifts
            .get_mut(&gift_id)
            .ok_or_else(|| StoreError::NotFound(format!("Gift {gift_id}")))?;

        apply_status(status, actor, Utc::now()).apply_to(entry.value_mut());
        Ok(entry.value().clone())
    }

    async fn add_comment(&self, gift_id: i64, text: &str, author: &str) -> Result<Comment, StoreError> {
        if !self.gifts.contains_key(&gift_id) {
            return Err(StoreError::Rejected {
                status: 409,
                message: format!("gift {gift_id} does not exist"),
            });
        }

        let comment = NewComment {
            gift_id,
            comment: text.to_string(),
            username: author.to_string(),
            created_at: Utc::now(),
        }
        .into_comment(self.allocate_id());

        self.comments.insert(comment.id, comment.clone());
        Ok(comment)
    }

    async fn list_comments(&self, gift_id: i64) -> Result<Vec<Comment>, StoreError> {
        let mut comments: Vec<Comment> = self
            .comments
            .iter()
            .filter(|entry| entry.value().gift_id == gift_id)
            .map(|entry| entry.value().clone())
            .collect();
        comments.sort_by_key(|comment| (comment.created_at, comment.id));
        Ok(comments)
    }

    async fn check_tables(&self) -> Result<(), StoreError> {
        Ok(())
    }
}
