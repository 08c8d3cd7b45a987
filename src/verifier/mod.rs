pub mod query;
pub mod report;

use std::sync::Arc;

use serde_json::{Map, Value};

use crate::gateway::NodeApi;
use crate::normalize::activity::parse_account_activities;
use crate::normalize::balances::normalize_token_balances;
use crate::normalize::fields::id_string;
use crate::normalize::nft::{normalize_collection_items, normalize_collection_token, normalize_nfts};
use crate::registry::ScammerRegistry;
use crate::risk::{aggregate_nft_verification, score_collection, score_nft};

pub use query::NftQuery;
pub use report::{
    CollectionReport, CollectionVerification, NftVerification, OwnerReport, OwnerVerification,
    TokenLookup, TokenVerification,
};

/// Composes node lookups, normalization and scoring for each request.
///
/// Upstream calls for one request are issued one after another.
pub struct Verifier {
    node: Arc<dyn NodeApi>,
    registry: Arc<ScammerRegistry>,
    transactions_limit: u32,
}

impl Verifier {
    pub fn new(
        node: Arc<dyn NodeApi>,
        registry: Arc<ScammerRegistry>,
        transactions_limit: u32,
    ) -> Self {
        Self {
            node,
            registry,
            transactions_limit,
        }
    }

    pub fn registry(&self) -> &ScammerRegistry {
        &self.registry
    }

    /// Verify every NFT held by `owner_address`.
    pub async fn verify_owner(&self, owner_address: &str) -> OwnerVerification {
        let is_scammer = self.registry.is_scammer(owner_address);

        let resources = match self.node.fetch_account_resources(owner_address).await {
            Some(resources) if !resources.is_empty() => resources,
            _ => {
                tracing::info!(owner = %owner_address, "No resources found for owner");
                return OwnerVerification::no_resources(owner_address, is_scammer);
            }
        };

        let nfts = normalize_nfts(&resources);
        let token_balances = normalize_token_balances(&resources);

        let tx_history = self
            .node
            .fetch_account_transactions(owner_address, self.transactions_limit)
            .await;
        let account_activities = parse_account_activities(tx_history.as_deref());
        let verification_results = aggregate_nft_verification(&nfts, tx_history.as_deref());

        tracing::info!(
            owner = %owner_address,
            nfts = nfts.len(),
            token_balances = token_balances.len(),
            is_scammer,
            "Verified owner"
        );

        OwnerVerification::Report(OwnerReport {
            owner_address: owner_address.to_string(),
            nfts,
            token_balances,
            account_activities,
            is_scammer,
            verification_results,
        })
    }

    /// Verify a collection and, when `token_id` is given, one of its tokens.
    ///
    /// Fails only if the creator's history carries an unparseable timestamp.
    pub async fn verify_collection(
        &self,
        creator_address: &str,
        collection_name: &str,
        token_id: Option<&str>,
    ) -> eyre::Result<CollectionVerification> {
        let Some(collection) = self
            .node
            .fetch_collection(creator_address, collection_name)
            .await
        else {
            return Ok(CollectionVerification::not_found());
        };

        let collection_data = normalize_collection_items(collection);
        let tx_history = self
            .node
            .fetch_account_transactions(creator_address, self.transactions_limit)
            .await;
        let verification_results = score_collection(&collection_data, tx_history.as_deref())?;

        let token = token_id.map(|token_id| {
            tracing::info!(token_id, "Filtering collection for token ID");

            match find_token(&collection_data, token_id) {
                Some(raw_token) => {
                    let token =
                        normalize_collection_token(raw_token, creator_address, collection_name);
                    let risk_assessment = score_nft(&token, tx_history.as_deref());
                    tracing::info!(token_id, "Token ID found and verified");

                    TokenLookup {
                        token_data: Some(token),
                        token_verification: TokenVerification::Assessed {
                            is_verified: !risk_assessment.is_high_risk,
                            risk_assessment,
                        },
                    }
                }
                None => {
                    tracing::warn!(
                        token_id,
                        collection = %collection_name,
                        "Token ID not found in collection"
                    );
                    TokenLookup {
                        token_data: None,
                        token_verification: TokenVerification::NotFound {
                            is_verified: false,
                            reason: report::TOKEN_NOT_FOUND_REASON,
                        },
                    }
                }
            }
        });

        tracing::info!(
            creator = %creator_address,
            collection = %collection_name,
            risk_score = verification_results.assessment.risk_score,
            "Verified collection"
        );

        Ok(CollectionVerification::Report(Box::new(CollectionReport {
            creator_address: creator_address.to_string(),
            collection_name: collection_name.to_string(),
            is_scammer: self.registry.is_scammer(creator_address),
            collection_data,
            verification_results,
            token,
        })))
    }

    /// Dispatch a single-NFT lookup by owner or by collection.
    pub async fn verify_nft(&self, query: NftQuery) -> eyre::Result<NftVerification> {
        match query {
            NftQuery::Owner {
                owner_address,
                token_id,
            } => {
                let mut result = self.verify_owner(&owner_address).await;
                if let Some(token_id) = token_id {
                    result.retain_token(&token_id);
                }
                Ok(NftVerification::Owner(result))
            }
            NftQuery::Collection {
                creator_address,
                collection_name,
                token_id,
            } => self
                .verify_collection(&creator_address, &collection_name, token_id.as_deref())
                .await
                .map(NftVerification::Collection),
        }
    }
}

/// First entry of the collection's `tokens` list whose `id` reads as `token_id`.
fn find_token<'a>(
    collection: &'a Map<String, Value>,
    token_id: &str,
) -> Option<&'a Map<String, Value>> {
    collection
        .get("tokens")?
        .as_array()?
        .iter()
        .filter_map(Value::as_object)
        .find(|token| token.get("id").map(id_string).as_deref() == Some(token_id))
}
