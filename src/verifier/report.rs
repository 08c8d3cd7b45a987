use serde::Serialize;

use crate::gateway::types::RawCollection;
use crate::normalize::activity::ActivitySummary;
use crate::normalize::balances::TokenBalance;
use crate::normalize::fields::id_string;
use crate::normalize::nft::{CollectionToken, NormalizedNft};
use crate::risk::{CollectionAssessment, RiskAssessment, VerificationResult};

pub const NO_RESOURCES_REASON: &str = "No resources found";
pub const COLLECTION_NOT_FOUND_REASON: &str = "Collection not found";
pub const TOKEN_NOT_FOUND_REASON: &str = "Token ID not found in collection";

/// Everything known about an account and the NFTs it holds.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OwnerReport {
    pub owner_address: String,
    pub nfts: Vec<NormalizedNft>,
    pub token_balances: Vec<TokenBalance>,
    pub account_activities: ActivitySummary,
    pub is_scammer: bool,
    pub verification_results: VerificationResult,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum OwnerVerification {
    Report(OwnerReport),
    NoResources {
        owner_address: String,
        nfts: Vec<NormalizedNft>,
        is_scammer: bool,
        is_verified: bool,
        reason: &'static str,
    },
}

impl OwnerVerification {
    pub(crate) fn no_resources(owner_address: &str, is_scammer: bool) -> Self {
        Self::NoResources {
            owner_address: owner_address.to_string(),
            nfts: Vec::new(),
            is_scammer,
            is_verified: false,
            reason: NO_RESOURCES_REASON,
        }
    }

    pub fn nfts(&self) -> &[NormalizedNft] {
        match self {
            Self::Report(report) => &report.nfts,
            Self::NoResources { nfts, .. } => nfts,
        }
    }

    pub fn is_scammer(&self) -> bool {
        match self {
            Self::Report(report) => report.is_scammer,
            Self::NoResources { is_scammer, .. } => *is_scammer,
        }
    }

    /// Keep only the NFTs whose id reads as `token_id`.
    pub fn retain_token(&mut self, token_id: &str) {
        if let Self::Report(report) = self {
            report.nfts.retain(|nft| id_string(&nft.id) == token_id);
        }
    }
}

/// A collection, its risk verdict and optionally one of its tokens.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CollectionReport {
    pub creator_address: String,
    pub collection_name: String,
    pub collection_data: RawCollection,
    pub is_scammer: bool,
    pub verification_results: CollectionAssessment,
    #[serde(flatten)]
    pub token: Option<TokenLookup>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TokenLookup {
    pub token_data: Option<CollectionToken>,
    pub token_verification: TokenVerification,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum TokenVerification {
    Assessed {
        risk_assessment: RiskAssessment,
        is_verified: bool,
    },
    NotFound {
        is_verified: bool,
        reason: &'static str,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum CollectionVerification {
    Report(Box<CollectionReport>),
    NotFound {
        collection_data: Option<RawCollection>,
        is_verified: bool,
        reason: &'static str,
    },
}

impl CollectionVerification {
    pub(crate) fn not_found() -> Self {
        Self::NotFound {
            collection_data: None,
            is_verified: false,
            reason: COLLECTION_NOT_FOUND_REASON,
        }
    }

    pub fn is_found(&self) -> bool {
        matches!(self, Self::Report(_))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum NftVerification {
    Owner(OwnerVerification),
    Collection(CollectionVerification),
}
