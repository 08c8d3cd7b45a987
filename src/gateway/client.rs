use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT};
use serde::de::DeserializeOwned;
use serde_json::Value;

use super::types::{RawCollection, RawResource, RawTransaction, COLLECTIONS_RESOURCE};

/// Read-only access to the blockchain node.
///
/// Every call is one-shot: upstream failures are logged and reported as `None`,
/// never as errors, so callers can degrade to an unverified result.
#[async_trait]
pub trait NodeApi: Send + Sync {
    /// All resources owned by `address`.
    async fn fetch_account_resources(&self, address: &str) -> Option<Vec<RawResource>>;

    /// The most recent `limit` transactions sent by `address`.
    async fn fetch_account_transactions(
        &self,
        address: &str,
        limit: u32,
    ) -> Option<Vec<RawTransaction>>;

    /// The collection named `collection_name` created by `creator`.
    async fn fetch_collection(&self, creator: &str, collection_name: &str)
        -> Option<RawCollection>;
}

/// `NodeApi` backed by the fullnode REST API.
pub struct NodeClient {
    http: reqwest::Client,
    api_url: String,
}

impl NodeClient {
    pub fn new(api_url: &str) -> eyre::Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        let http = reqwest::Client::builder()
            .default_headers(headers)
            .build()
            .map_err(|e| eyre::eyre!("Failed to build HTTP client: {}", e))?;

        Ok(Self {
            http,
            api_url: api_url.trim_end_matches('/').to_string(),
        })
    }

    /// GET `url` and decode the body. Any failure is logged and becomes `None`.
    async fn get_json<T: DeserializeOwned>(&self, url: &str, what: &str) -> Option<T> {
        let response = match self.http.get(url).send().await {
            Ok(response) => response,
            Err(e) => {
                tracing::error!(%url, error = %e, "Error fetching {}", what);
                return None;
            }
        };

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::error!(%url, status = status.as_u16(), %body, "Failed to fetch {}", what);
            return None;
        }

        match response.json::<T>().await {
            Ok(decoded) => Some(decoded),
            Err(e) => {
                tracing::error!(%url, error = %e, "Undecodable {} response", what);
                None
            }
        }
    }
}

#[async_trait]
impl NodeApi for NodeClient {
    async fn fetch_account_resources(&self, address: &str) -> Option<Vec<RawResource>> {
        let url = format!("{}/accounts/{}/resources", self.api_url, address);
        self.get_json(&url, "account resources").await
    }

    async fn fetch_account_transactions(
        &self,
        address: &str,
        limit: u32,
    ) -> Option<Vec<RawTransaction>> {
        let url = format!(
            "{}/accounts/{}/transactions?limit={}",
            self.api_url, address, limit
        );
        self.get_json(&url, "transactions").await
    }

    async fn fetch_collection(
        &self,
        creator: &str,
        collection_name: &str,
    ) -> Option<RawCollection> {
        let url = format!(
            "{}/accounts/{}/resource/{}",
            self.api_url, creator, COLLECTIONS_RESOURCE
        );
        let resource: Value = self.get_json(&url, "collection data").await?;

        let collection = find_collection(&resource, collection_name);
        if collection.is_none() {
            tracing::info!(
                creator = %creator,
                collection = %collection_name,
                "Collection not found for creator"
            );
        }
        collection
    }
}

/// Scan `data.collections` of a Collections resource for an exact name match.
pub fn find_collection(resource: &Value, collection_name: &str) -> Option<RawCollection> {
    resource
        .get("data")?
        .get("collections")?
        .as_object()?
        .values()
        .filter_map(Value::as_object)
        .find(|c| c.get("name").and_then(Value::as_str) == Some(collection_name))
        .cloned()
}
