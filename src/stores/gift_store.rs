use crate::core::error::StoreError;
use crate::models::comment::Comment;
use crate::models::gift::{Gift, GiftStatus};
use crate::models::gift_list::GiftList;
use async_trait::async_trait;

/// The three tables backing the service
pub const TABLES: [&str; 3] = ["gift_lists", "gifts", "gift_comments"];

/// CRUD over lists, gifts and comments.
///
/// Each method is one round trip with no retries and no business logic
/// beyond stamping timestamps. Visibility filtering happens in
/// [`crate::policy`].
#[async_trait]
pub trait GiftStore: Send + Sync {
    /// All lists, newest first
    async fn list_all_lists(&self) -> Result<Vec<GiftList>, StoreError>;

    async fn get_list(&self, id: i64) -> Result<Option<GiftList>, StoreError>;

    /// Raw gifts of a list, oldest first
    async fn list_gifts(&self, list_id: i64) -> Result<Vec<Gift>, StoreError>;

    async fn create_list(
        &self,
        name: &str,
        recipients: &[String],
        created_by: &str,
    ) -> Result<GiftList, StoreError>;

    /// New gifts start out available
    async fn add_gift(
        &self,
        list_id: i64,
        name: &str,
        description: Option<&str>,
        added_by: &str,
    ) -> Result<Gift, StoreError>;

    /// Writes the columns chosen by [`crate::policy::status::apply_status`]
    async fn update_gift_status(
        &self,
        gift_id: i64,
        status: GiftStatus,
        actor: &str,
    ) -> Result<Gift, StoreError>;

    async fn add_comment(&self, gift_id: i64, text: &str, author: &str) -> Result<Comment, StoreError>;

    /// Comments on a gift, oldest first
    async fn list_comments(&self, gift_id: i64) -> Result<Vec<Comment>, StoreError>;

    /// Check that every table answers a zero-row select
    async fn check_tables(&self) -> Result<(), StoreError>;
}
