use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::normalize::nft::NormalizedNft;

/// Categorical reasons a score was raised.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RiskFactor {
    IncompleteMetadata,
    HighTransferVelocity,
    NewCreatorAccount,
    ZeroSupply,
    VeryLowSupply,
}

impl RiskFactor {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::IncompleteMetadata => "INCOMPLETE_METADATA",
            Self::HighTransferVelocity => "HIGH_TRANSFER_VELOCITY",
            Self::NewCreatorAccount => "NEW_CREATOR_ACCOUNT",
            Self::ZeroSupply => "ZERO_SUPPLY",
            Self::VeryLowSupply => "VERY_LOW_SUPPLY",
        }
    }
}

/// Accumulated score for one NFT, token or collection.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RiskAssessment {
    pub risk_score: u32,
    pub risk_factors: Vec<RiskFactor>,
    pub is_high_risk: bool,
}

impl RiskAssessment {
    /// Add `points` for `factor`. Each factor is listed once.
    pub fn raise(&mut self, factor: RiskFactor, points: u32) {
        self.risk_score = self.risk_score.saturating_add(points);
        if !self.risk_factors.contains(&factor) {
            self.risk_factors.push(factor);
        }
    }

    /// Settle the verdict against a fixed threshold.
    pub fn judge(mut self, high_risk_threshold: u32) -> Self {
        self.is_high_risk = self.risk_score >= high_risk_threshold;
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CollectionAssessment {
    #[serde(flatten)]
    pub assessment: RiskAssessment,
    pub is_verified: bool,
    pub verification_timestamp: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QuestionableNft {
    pub nft_data: NormalizedNft,
    pub risk_assessment: RiskAssessment,
}

/// Aggregate verdict over every NFT an account holds.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VerificationResult {
    pub average_risk_score: f64,
    pub questionable_nfts: Vec<QuestionableNft>,
    pub is_verified: bool,
    pub verification_timestamp: DateTime<Utc>,
}
