use crate::core::config::StoreConfig;
use crate::core::error::StoreError;
use crate::models::comment::{Comment, NewComment};
use crate::models::gift::{Gift, GiftStatus, NewGift};
use crate::models::gift_list::{GiftList, NewGiftList};
use crate::policy::status::apply_status;
use crate::stores::gift_store::{GiftStore, TABLES};
use async_trait::async_trait;
use chrono::Utc;
use reqwest::{Method, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::debug;

const REST_PATH: &str = "rest/v1";
const ORDER_OLDEST_FIRST: &str = "created_at.asc,id.asc";
const ORDER_NEWEST_FIRST: &str = "created_at.desc,id.desc";

/// Client for the hosted record store's REST interface.
///
/// Every call is a single request with no retries. TLS uses reqwest's
/// default certificate verification.
pub struct RestStore {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl RestStore {
    pub fn new(config: &StoreConfig) -> Result<Self, StoreError> {
        let client = reqwest::Client::builder()
            .build()
            .map_err(|e| StoreError::Transport(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self {
            client,
            base_url: config.endpoint.trim_end_matches('/').to_string(),
            api_key: config.api_key.clone(),
        })
    }

    pub fn table_url(&self, table: &str) -> String {
        format!("{}/{}/{}", self.base_url, REST_PATH, table)
    }

    fn request(&self, method: Method, table: &str) -> RequestBuilder {
        self.client
            .request(method, self.table_url(table))
            .header("apikey", &self.api_key)
            .bearer_auth(&self.api_key)
    }

    /// Send and decode the rows in the response body
    async fn fetch<T: DeserializeOwned>(&self, builder: RequestBuilder) -> Result<Vec<T>, StoreError> {
        let response = check_status(builder.send().await?).await?;

        let body = response.bytes().await?;
        serde_json::from_slice(&body).map_err(|e| StoreError::Decode(e.to_string()))
    }

    /// Insert one row and return it as stored
    async fn insert<B: Serialize, T: DeserializeOwned>(&self, table: &str, row: &B) -> Result<T, StoreError> {
        let builder = self
            .request(Method::POST, table)
            .header("Prefer", "return=representation")
            .json(row);

        self.fetch::<T>(builder)
            .await?
            .into_iter()
            .next()
            .ok_or(StoreError::EmptyResponse)
    }
}

async fn check_status(response: Response) -> Result<Response, StoreError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let message = response.text().await.unwrap_or_default();
    Err(StoreError::Rejected {
        status: status.as_u16(),
        message,
    })
}

fn eq(value: i64) -> String {
    format!("eq.{value}")
}

#[async_trait]
impl GiftStore for RestStore {
    async fn list_all_lists(&self) -> Result<Vec<GiftList>, StoreError> {
        let builder = self
            .request(Method::GET, "gift_lists")
            .query(&[("select", "*"), ("order", ORDER_NEWEST_FIRST)]);

        self.fetch(builder).await
    }

    async fn get_list(&self, id: i64) -> Result<Option<GiftList>, StoreError> {
        let builder = self
            .request(Method::GET, "gift_lists")
            .query(&[("select", "*".to_string()), ("id", eq(id))]);

        let rows: Vec<GiftList> = self.fetch(builder).await?;
        Ok(rows.into_iter().next())
    }

    async fn list_gifts(&self, list_id: i64) -> Result<Vec<Gift>, StoreError> {
        let builder = self.request(Method::GET, "gifts").query(&[
            ("select", "*".to_string()),
            ("list_id", eq(list_id)),
            ("order", ORDER_OLDEST_FIRST.to_string()),
        ]);

        self.fetch(builder).await
    }

    async fn create_list(
        &self,
        name: &str,
        recipients: &[String],
        created_by: &str,
    ) -> Result<GiftList, StoreError> {
        let row = NewGiftList::new(name, recipients, created_by, Utc::now());
        self.insert("gift_lists", &row).await
    }

    async fn add_gift(
        &self,
        list_id: i64,
        name: &str,
        description: Option<&str>,
        added_by: &str,
    ) -> Result<Gift, StoreError> {
        let row = NewGift::new(list_id, name, description, added_by, Utc::now());
        self.insert("gifts", &row).await
    }

    async fn update_gift_status(
        &self,
        gift_id: i64,
        status: GiftStatus,
        actor: &str,
    ) -> Result<Gift, StoreError> {
        let update = apply_status(status, actor, Utc::now());

        let builder = self
            .request(Method::PATCH, "gifts")
            .query(&[("id", eq(gift_id))])
            .header("Prefer", "return=representation")
            .json(&update);

        // An update matching no row comes back as an empty array
        self.fetch::<Gift>(builder)
            .await?
            .into_iter()
            .next()
            .ok_or_else(|| StoreError::NotFound(format!("Gift {gift_id}")))
    }

    async fn add_comment(&self, gift_id: i64, text: &str, author: &str) -> Result<Comment, StoreError> {
        let row = NewComment {
            gift_id,
            comment: text.to_string(),
            username: author.to_string(),
            created_at: Utc::now(),
        };
        self.insert("gift_comments", &row).await
    }

    async fn list_comments(&self, gift_id: i64) -> Result<Vec<Comment>, StoreError> {
        let builder = self.request(Method::GET, "gift_comments").query(&[
            ("select", "*".to_string()),
            ("gift_id", eq(gift_id)),
            ("order", ORDER_OLDEST_FIRST.to_string()),
        ]);

        self.fetch(builder).await
    }

    async fn check_tables(&self) -> Result<(), StoreError> {
        for table in TABLES {
            let builder = self
                .request(Method::GET, table)
                .query(&[("select", "*"), ("limit", "0")]);

            check_status(builder.send().await?).await?;
            debug!(table, "Table reachable");
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_test_store(endpoint: &str) -> RestStore {
        RestStore::new(&StoreConfig {
            endpoint: endpoint.to_string(),
            api_key: "test-api-key".to_string(),
        })
        .unwrap()
    }

    #[test]
    fn test_table_url() {
        let store = create_test_store("https://example.supabase.co/");
        assert_eq!(
            store.table_url("gifts"),
            "https://example.supabase.co/rest/v1/gifts"
        );
    }

    #[test]
    fn test_request_headers_and_query() {
        let store = create_test_store("https://example.supabase.co");
        let request = store
            .request(Method::GET, "gifts")
            .query(&[("list_id", eq(4)), ("order", ORDER_OLDEST_FIRST.to_string())])
            .build()
            .unwrap();

        assert_eq!(request.method(), Method::GET);
        assert_eq!(request.headers()["apikey"], "test-api-key");
        assert_eq!(request.headers()["authorization"], "Bearer test-api-key");
        assert_eq!(
            request.url().as_str(),
            "https://example.supabase.co/rest/v1/gifts?list_id=eq.4&order=created_at.asc%2Cid.asc"
        );
    }

    #[test]
    fn test_insert_payload() {
        let row = NewGift::new(4, "Scarf", None, "alice", Utc::now());
        let json = serde_json::to_value(&row).unwrap();

        assert_eq!(json["list_id"], 4);
        assert_eq!(json["status"], "available");
        assert!(json["description"].is_null());
        assert!(json.get("id").is_none());
    }

    #[tokio::test]
    async fn test_unreachable_store_is_transport_error() {
        // Nothing listens on port 1 locally
        let store = create_test_store("http://127.0.0.1:1");
        let result = store.list_all_lists().await;
        assert!(matches!(result, Err(StoreError::Transport(_))));
    }
}
