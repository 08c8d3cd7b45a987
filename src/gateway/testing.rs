use std::collections::HashMap;

use async_trait::async_trait;
use serde_json::Value;

use super::client::NodeApi;
use super::types::{RawCollection, RawResource, RawTransaction};

/// In-memory node. Addresses without an entry behave like a failed upstream call.
#[derive(Default)]
pub struct FakeNode {
    pub resources: HashMap<String, Vec<RawResource>>,
    pub transactions: HashMap<String, Vec<RawTransaction>>,
    pub collections: HashMap<(String, String), RawCollection>,
}

impl FakeNode {
    pub fn with_resource(mut self, address: &str, resource_type: &str, data: Value) -> Self {
        self.resources
            .entry(address.to_string())
            .or_default()
            .push(RawResource {
                resource_type: resource_type.to_string(),
                data: data.as_object().cloned().unwrap_or_default(),
            });
        self
    }

    pub fn with_transactions(mut self, address: &str, transactions: Vec<RawTransaction>) -> Self {
        self.transactions.insert(address.to_string(), transactions);
        self
    }

    pub fn with_collection(mut self, creator: &str, name: &str, collection: Value) -> Self {
        self.collections.insert(
            (creator.to_string(), name.to_string()),
            collection.as_object().cloned().unwrap_or_default(),
        );
        self
    }
}

#[async_trait]
impl NodeApi for FakeNode {
    async fn fetch_account_resources(&self, address: &str) -> Option<Vec<RawResource>> {
        self.resources.get(address).cloned()
    }

    async fn fetch_account_transactions(
        &self,
        address: &str,
        limit: u32,
    ) -> Option<Vec<RawTransaction>> {
        self.transactions
            .get(address)
            .map(|txs| txs.iter().take(limit as usize).cloned().collect())
    }

    async fn fetch_collection(
        &self,
        creator: &str,
        collection_name: &str,
    ) -> Option<RawCollection> {
        self.collections
            .get(&(creator.to_string(), collection_name.to_string()))
            .cloned()
    }
}

pub fn transfer_transactions(count: usize) -> Vec<RawTransaction> {
    (0..count)
        .map(|_| RawTransaction {
            tx_type: "token_transfer".to_string(),
            timestamp: Some("2020-01-01T00:00:00Z".to_string()),
            success: Some(true),
            events: Vec::new(),
        })
        .collect()
}
