use serde::Serialize;
use serde_json::{json, Map, Value};

use crate::gateway::types::{RawCollection, RawResource};

use super::fields::{
    lookup, lookup_or, COLLECTION_KEYS, CREATOR_KEYS, NAME_KEYS, OWNER_KEYS, PLACEHOLDER,
    TOKEN_ID_KEYS,
};

pub const UNNAMED_NFT: &str = "Unnamed NFT";
pub const UNNAMED_ITEM: &str = "Unnamed Item";
pub const UNNAMED_TOKEN: &str = "Unnamed Token";

/// An NFT in the shape the frontend expects.
///
/// `name`, `id`, `collection` and `creator` keep the upstream JSON type
/// (token ids are sometimes objects) and are never `null`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NormalizedNft {
    pub name: Value,
    pub id: Value,
    pub collection: Value,
    pub creator: Value,
    pub metadata: Map<String, Value>,
    pub resource_type: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub uri: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<Value>,
}

/// A single token looked up inside a collection's `tokens` list.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CollectionToken {
    pub name: Value,
    pub id: Value,
    pub owner: Value,
    pub creator: String,
    pub collection: String,
    pub metadata: Map<String, Value>,
}

/// Every resource whose type mentions "token", in input order.
pub fn normalize_nfts(resources: &[RawResource]) -> Vec<NormalizedNft> {
    resources
        .iter()
        .filter(|r| r.resource_type.contains("token"))
        .map(normalize_nft)
        .collect()
}

fn normalize_nft(resource: &RawResource) -> NormalizedNft {
    let data = &resource.data;
    tracing::debug!(resource_type = %resource.resource_type, ?data, "Raw NFT data");

    NormalizedNft {
        name: lookup_or(data, NAME_KEYS, UNNAMED_NFT),
        id: lookup_or(data, TOKEN_ID_KEYS, PLACEHOLDER),
        collection: lookup_or(data, COLLECTION_KEYS, PLACEHOLDER),
        creator: lookup_or(data, CREATOR_KEYS, PLACEHOLDER),
        metadata: data.clone(),
        resource_type: resource.resource_type.clone(),
        uri: lookup(data, &["uri"]).cloned(),
        description: lookup(data, &["description"]).cloned(),
    }
}

/// Reshape `items` into `{name, id, owner, metadata}` entries when it is a list.
/// Collections without an `items` list are returned unchanged.
pub fn normalize_collection_items(mut collection: RawCollection) -> RawCollection {
    if let Some(Value::Array(items)) = collection.get_mut("items") {
        let reshaped = items.drain(..).map(reshape_item).collect();
        *items = reshaped;
    }
    collection
}

fn reshape_item(item: Value) -> Value {
    let empty = Map::new();
    let fields = item.as_object().unwrap_or(&empty);

    let name = lookup_or(fields, NAME_KEYS, UNNAMED_ITEM);
    let id = lookup_or(fields, TOKEN_ID_KEYS, PLACEHOLDER);
    let owner = lookup_or(fields, OWNER_KEYS, PLACEHOLDER);

    json!({
        "name": name,
        "id": id,
        "owner": owner,
        "metadata": item,
    })
}

/// Build the token view attached to a collection report.
pub fn normalize_collection_token(
    token: &Map<String, Value>,
    creator: &str,
    collection: &str,
) -> CollectionToken {
    CollectionToken {
        name: lookup_or(token, NAME_KEYS, UNNAMED_TOKEN),
        id: lookup_or(token, TOKEN_ID_KEYS, PLACEHOLDER),
        owner: lookup_or(token, OWNER_KEYS, PLACEHOLDER),
        creator: creator.to_string(),
        collection: collection.to_string(),
        metadata: token.clone(),
    }
}
