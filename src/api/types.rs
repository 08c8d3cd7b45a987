use serde::{Deserialize, Serialize};

// ============================================================
// Query params
// ============================================================

#[derive(Debug, Deserialize)]
pub struct CollectionParams {
    pub creator_address: String,
    pub collection_name: String,
    pub token_id: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct NftParams {
    pub owner_address: Option<String>,
    pub creator_address: Option<String>,
    pub collection_name: Option<String>,
    pub token_id: Option<String>,
}

// ============================================================
// Response types
// ============================================================

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub known_scammers: usize,
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}
