use serde::Deserialize;
use serde_json::{Map, Value};

/// An account-owned resource as returned by `/accounts/{addr}/resources`.
/// The shape of `data` depends on `resource_type` and is never validated.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawResource {
    #[serde(rename = "type", default)]
    pub resource_type: String,
    #[serde(default)]
    pub data: Map<String, Value>,
}

/// A committed transaction from `/accounts/{addr}/transactions`.
/// Only the fields the verifier inspects are kept.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawTransaction {
    #[serde(rename = "type", default)]
    pub tx_type: String,
    #[serde(default)]
    pub timestamp: Option<String>,
    #[serde(default)]
    pub success: Option<bool>,
    #[serde(default)]
    pub events: Vec<RawEvent>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawEvent {
    #[serde(rename = "type", default)]
    pub event_type: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// One entry of a creator's `0x3::token::Collections` resource.
pub type RawCollection = Map<String, Value>;

/// Resource type holding every collection created by an account.
pub const COLLECTIONS_RESOURCE: &str = "0x3::token::Collections";
