pub mod engine;
pub mod rules;
pub mod types;

pub use engine::aggregate_nft_verification;
pub use rules::{score_collection, score_nft};
pub use types::{CollectionAssessment, RiskAssessment, RiskFactor, VerificationResult};
