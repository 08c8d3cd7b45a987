use chrono::Utc;

use crate::gateway::types::RawTransaction;
use crate::normalize::nft::NormalizedNft;

use super::rules::score_nft;
use super::types::{QuestionableNft, RiskFactor, VerificationResult};

/// Score every NFT and summarize. An empty list is verified with an average of 0.
pub fn aggregate_nft_verification(
    nfts: &[NormalizedNft],
    tx_history: Option<&[RawTransaction]>,
) -> VerificationResult {
    let mut total: f64 = 0.0;
    let mut questionable_nfts = Vec::new();

    for nft in nfts {
        let assessment = score_nft(nft, tx_history);
        total += f64::from(assessment.risk_score);

        if assessment.is_high_risk {
            tracing::warn!(
                nft = %nft.name,
                id = %nft.id,
                risk_score = assessment.risk_score,
                factors = %assessment
                    .risk_factors
                    .iter()
                    .map(RiskFactor::as_str)
                    .collect::<Vec<_>>()
                    .join(","),
                "Questionable NFT"
            );
            questionable_nfts.push(QuestionableNft {
                nft_data: nft.clone(),
                risk_assessment: assessment,
            });
        }
    }

    let average_risk_score = if nfts.is_empty() {
        0.0
    } else {
        total / nfts.len() as f64
    };

    VerificationResult {
        average_risk_score,
        is_verified: questionable_nfts.is_empty(),
        questionable_nfts,
        verification_timestamp: Utc::now(),
    }
}
