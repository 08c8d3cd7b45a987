use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use std::sync::Arc;

use crate::verifier::{CollectionVerification, NftQuery, NftVerification, OwnerVerification};

use super::types::*;
use super::AppState;

type ApiResult<T> = Result<Json<T>, (StatusCode, Json<ErrorResponse>)>;

const INSUFFICIENT_PARAMETERS: &str =
    "Insufficient parameters. Provide either owner_address or (creator_address AND collection_name)";

fn api_error(status: StatusCode, msg: impl Into<String>) -> (StatusCode, Json<ErrorResponse>) {
    let error = msg.into();
    tracing::warn!(status = status.as_u16(), %error, "HTTP error");
    (status, Json(ErrorResponse { error }))
}

fn internal_error(e: eyre::Report) -> (StatusCode, Json<ErrorResponse>) {
    tracing::error!(error = ?e, "Unexpected error");
    api_error(StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error")
}

// ============================================================
// Health
// ============================================================

pub async fn health(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        known_scammers: state.verifier.registry().len(),
    })
}

// ============================================================
// Verification
// ============================================================

pub async fn verify_owner(
    State(state): State<Arc<AppState>>,
    Path(owner_address): Path<String>,
) -> ApiResult<OwnerVerification> {
    tracing::info!(owner = %owner_address, "Verifying NFTs for owner");

    let result = state.verifier.verify_owner(&owner_address).await;
    if result.nfts().is_empty() {
        return Err(api_error(StatusCode::NOT_FOUND, "No NFTs found for this owner"));
    }
    Ok(Json(result))
}

pub async fn verify_collection(
    State(state): State<Arc<AppState>>,
    Query(params): Query<CollectionParams>,
) -> ApiResult<CollectionVerification> {
    let token_id = params.token_id.as_deref().filter(|t| !t.is_empty());
    tracing::info!(
        creator = %params.creator_address,
        collection = %params.collection_name,
        token_id = ?token_id,
        "Verifying collection"
    );

    let result = state
        .verifier
        .verify_collection(&params.creator_address, &params.collection_name, token_id)
        .await
        .map_err(internal_error)?;

    if !result.is_found() {
        return Err(api_error(StatusCode::NOT_FOUND, "Collection not found"));
    }
    Ok(Json(result))
}

pub async fn verify_nft(
    State(state): State<Arc<AppState>>,
    Query(params): Query<NftParams>,
) -> ApiResult<NftVerification> {
    tracing::info!(?params, "Verifying NFT");

    let query = NftQuery::resolve(
        params.owner_address,
        params.creator_address,
        params.collection_name,
        params.token_id,
    )
    .ok_or_else(|| api_error(StatusCode::BAD_REQUEST, INSUFFICIENT_PARAMETERS))?;

    state
        .verifier
        .verify_nft(query)
        .await
        .map(Json)
        .map_err(internal_error)
}
