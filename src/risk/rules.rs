use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde_json::{Map, Value};

use crate::gateway::types::{RawCollection, RawTransaction};
use crate::normalize::fields::{is_truthy, lookup};
use crate::normalize::nft::{CollectionToken, NormalizedNft};

use super::types::{CollectionAssessment, RiskAssessment, RiskFactor};

pub const NFT_HIGH_RISK_THRESHOLD: u32 = 70;
pub const COLLECTION_HIGH_RISK_THRESHOLD: u32 = 60;

pub const INCOMPLETE_NFT_METADATA_WEIGHT: u32 = 40;
pub const TRANSFER_VELOCITY_FREE_TRANSFERS: u32 = 3;
pub const TRANSFER_VELOCITY_WEIGHT: u32 = 20;

pub const NEW_CREATOR_ACCOUNT_WEIGHT: u32 = 25;
pub const NEW_CREATOR_ACCOUNT_MAX_AGE_DAYS: i64 = 30;
pub const ZERO_SUPPLY_WEIGHT: u32 = 50;
pub const VERY_LOW_SUPPLY_WEIGHT: u32 = 15;
pub const VERY_LOW_SUPPLY_LIMIT: f64 = 5.0;
pub const INCOMPLETE_COLLECTION_METADATA_WEIGHT: u32 = 30;

/// Anything that can be checked for NFT metadata completeness.
pub trait NftRecord {
    /// Both `name` and `id` are present.
    fn has_identity(&self) -> bool;

    /// The nested `metadata` map, if the record carries one.
    fn nested_metadata(&self) -> Option<&Map<String, Value>>;
}

impl NftRecord for NormalizedNft {
    fn has_identity(&self) -> bool {
        !self.name.is_null() && !self.id.is_null()
    }

    fn nested_metadata(&self) -> Option<&Map<String, Value>> {
        Some(&self.metadata)
    }
}

impl NftRecord for CollectionToken {
    fn has_identity(&self) -> bool {
        !self.name.is_null() && !self.id.is_null()
    }

    fn nested_metadata(&self) -> Option<&Map<String, Value>> {
        Some(&self.metadata)
    }
}

impl NftRecord for Map<String, Value> {
    fn has_identity(&self) -> bool {
        lookup(self, &["name"]).is_some() && lookup(self, &["id"]).is_some()
    }

    fn nested_metadata(&self) -> Option<&Map<String, Value>> {
        self.get("metadata").and_then(Value::as_object)
    }
}

fn has_complete_metadata(nft: &impl NftRecord) -> bool {
    if !nft.has_identity() {
        return false;
    }
    match nft.nested_metadata() {
        Some(metadata) => lookup(metadata, &["uri", "description"]).is_some(),
        None => true,
    }
}

/// Transactions that look like transfers.
///
/// This does not correlate a transaction with the NFT being scored: every
/// transfer in the account's history counts against every NFT it holds, which
/// couples the scores of all NFTs in one account and likely overstates
/// velocity per NFT.
fn count_transfers(tx_history: &[RawTransaction]) -> u32 {
    let count = tx_history
        .iter()
        .filter(|tx| tx.tx_type.to_lowercase().contains("transfer"))
        .count();
    u32::try_from(count).unwrap_or(u32::MAX)
}

/// Score a single NFT or token. High risk at 70 points.
pub fn score_nft(nft: &impl NftRecord, tx_history: Option<&[RawTransaction]>) -> RiskAssessment {
    let mut assessment = RiskAssessment::default();

    if !has_complete_metadata(nft) {
        assessment.raise(RiskFactor::IncompleteMetadata, INCOMPLETE_NFT_METADATA_WEIGHT);
    }

    if let Some(history) = tx_history.filter(|h| !h.is_empty()) {
        let transfers = count_transfers(history);
        if transfers > TRANSFER_VELOCITY_FREE_TRANSFERS {
            let excess = transfers - TRANSFER_VELOCITY_FREE_TRANSFERS;
            assessment.raise(
                RiskFactor::HighTransferVelocity,
                TRANSFER_VELOCITY_WEIGHT.saturating_mul(excess),
            );
        }
    }

    assessment.judge(NFT_HIGH_RISK_THRESHOLD)
}

/// Score a collection against the creator's history. High risk at 60 points.
///
/// Fails if a transaction carries a timestamp that cannot be parsed.
pub fn score_collection(
    collection: &RawCollection,
    tx_history: Option<&[RawTransaction]>,
) -> eyre::Result<CollectionAssessment> {
    score_collection_at(collection, tx_history, Utc::now())
}

pub fn score_collection_at(
    collection: &RawCollection,
    tx_history: Option<&[RawTransaction]>,
    now: DateTime<Utc>,
) -> eyre::Result<CollectionAssessment> {
    let mut assessment = RiskAssessment::default();

    if let Some(history) = tx_history.filter(|h| !h.is_empty()) {
        if let Some(oldest) = oldest_timestamp(history)? {
            let age_days = (now - oldest).num_days();
            if age_days < NEW_CREATOR_ACCOUNT_MAX_AGE_DAYS {
                assessment.raise(RiskFactor::NewCreatorAccount, NEW_CREATOR_ACCOUNT_WEIGHT);
            }
        }
    }

    let supply = collection_supply(collection);
    if supply == 0.0 {
        assessment.raise(RiskFactor::ZeroSupply, ZERO_SUPPLY_WEIGHT);
    } else if supply < VERY_LOW_SUPPLY_LIMIT {
        assessment.raise(RiskFactor::VeryLowSupply, VERY_LOW_SUPPLY_WEIGHT);
    }

    if !is_truthy(collection.get("description")) || !is_truthy(collection.get("uri")) {
        assessment.raise(
            RiskFactor::IncompleteMetadata,
            INCOMPLETE_COLLECTION_METADATA_WEIGHT,
        );
    }

    let assessment = assessment.judge(COLLECTION_HIGH_RISK_THRESHOLD);
    Ok(CollectionAssessment {
        is_verified: !assessment.is_high_risk,
        assessment,
        verification_timestamp: now,
    })
}

/// `supply` as a number. The node encodes u64 values as strings.
/// Missing or unreadable supply counts as zero.
fn collection_supply(collection: &RawCollection) -> f64 {
    match collection.get("supply") {
        Some(Value::Number(n)) => n.as_f64().unwrap_or(0.0),
        Some(Value::String(s)) => s.trim().parse::<f64>().unwrap_or(0.0),
        _ => 0.0,
    }
}

/// Earliest timestamp in the history; transactions without one are skipped.
fn oldest_timestamp(tx_history: &[RawTransaction]) -> eyre::Result<Option<DateTime<Utc>>> {
    let mut oldest: Option<DateTime<Utc>> = None;
    for raw in tx_history.iter().filter_map(|tx| tx.timestamp.as_deref()) {
        let ts = parse_timestamp(raw)?;
        match oldest {
            Some(current) if current <= ts => {}
            _ => oldest = Some(ts),
        }
    }
    Ok(oldest)
}

/// Parse a transaction timestamp.
///
/// Accepts RFC 3339, naive ISO 8601 (read as UTC) and the node's
/// microseconds-since-epoch integer strings.
pub fn parse_timestamp(raw: &str) -> eyre::Result<DateTime<Utc>> {
    let raw = raw.trim();

    if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
        return Ok(ts.with_timezone(&Utc));
    }

    for format in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(raw, format) {
            return Ok(naive.and_utc());
        }
    }

    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        if let Some(midnight) = date.and_hms_opt(0, 0, 0) {
            return Ok(midnight.and_utc());
        }
    }

    if !raw.is_empty() && raw.bytes().all(|b| b.is_ascii_digit()) {
        if let Some(ts) = raw
            .parse::<i64>()
            .ok()
            .and_then(DateTime::from_timestamp_micros)
        {
            return Ok(ts);
        }
    }

    Err(eyre::eyre!("Malformed transaction timestamp '{}'", raw))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};
    use serde_json::json;

    fn object(value: Value) -> Map<String, Value> {
        value.as_object().cloned().unwrap()
    }

    fn transfers(count: usize) -> Vec<RawTransaction> {
        (0..count)
            .map(|_| RawTransaction {
                tx_type: "coin_transfer".to_string(),
                ..Default::default()
            })
            .collect()
    }

    fn tx_at(timestamp: &str) -> RawTransaction {
        RawTransaction {
            tx_type: "user_transaction".to_string(),
            timestamp: Some(timestamp.to_string()),
            ..Default::default()
        }
    }

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap()
    }

    #[test]
    fn test_nft_without_metadata_map_is_clean() {
        let nft = object(json!({"name": "X", "id": "1"}));
        let assessment = score_nft(&nft, None);

        assert_eq!(assessment.risk_score, 0);
        assert!(assessment.risk_factors.is_empty());
        assert!(!assessment.is_high_risk);
    }

    #[test]
    fn test_nft_missing_identity() {
        let nft = object(json!({"name": "X"}));
        let assessment = score_nft(&nft, None);

        assert_eq!(assessment.risk_score, INCOMPLETE_NFT_METADATA_WEIGHT);
        assert_eq!(assessment.risk_factors, vec![RiskFactor::IncompleteMetadata]);
    }

    #[test]
    fn test_nft_metadata_needs_uri_or_description() {
        let bare = object(json!({"name": "X", "id": "1", "metadata": {"other": 1}}));
        assert_eq!(score_nft(&bare, None).risk_score, 40);

        let with_uri = object(json!({"name": "X", "id": "1", "metadata": {"uri": "ipfs://x"}}));
        assert_eq!(score_nft(&with_uri, None).risk_score, 0);

        let with_description =
            object(json!({"name": "X", "id": "1", "metadata": {"description": "d"}}));
        assert_eq!(score_nft(&with_description, None).risk_score, 0);
    }

    #[test]
    fn test_transfer_velocity() {
        let nft = object(json!({"name": "X", "id": "1"}));

        let history = transfers(5);
        let assessment = score_nft(&nft, Some(&history));
        assert_eq!(assessment.risk_score, 40);
        assert_eq!(assessment.risk_factors, vec![RiskFactor::HighTransferVelocity]);
        assert!(!assessment.is_high_risk);

        let history = transfers(3);
        assert_eq!(score_nft(&nft, Some(&history)).risk_score, 0);
    }

    #[test]
    fn test_transfer_velocity_ignores_token_identity() {
        let first = object(json!({"name": "A", "id": "1"}));
        let second = object(json!({"name": "B", "id": "2"}));
        let history = transfers(7);

        assert_eq!(
            score_nft(&first, Some(&history)),
            score_nft(&second, Some(&history))
        );
    }

    #[test]
    fn test_incomplete_and_fast_nft_is_high_risk() {
        let nft = object(json!({"id": "1"}));
        let history = transfers(5);
        let assessment = score_nft(&nft, Some(&history));

        assert_eq!(assessment.risk_score, 80);
        assert!(assessment.is_high_risk);
        assert_eq!(
            assessment.risk_factors,
            vec![RiskFactor::IncompleteMetadata, RiskFactor::HighTransferVelocity]
        );
    }

    #[test]
    fn test_zero_supply_without_metadata() {
        let collection = object(json!({"supply": 0, "description": null, "uri": null}));
        let result = score_collection_at(&collection, Some(&[]), now()).unwrap();

        assert_eq!(result.assessment.risk_score, 80);
        assert!(result.assessment.is_high_risk);
        assert!(!result.is_verified);
        assert_eq!(
            result.assessment.risk_factors,
            vec![RiskFactor::ZeroSupply, RiskFactor::IncompleteMetadata]
        );
    }

    #[test]
    fn test_low_supply_string() {
        let collection = object(json!({"supply": "3", "description": "d", "uri": "u"}));
        let result = score_collection_at(&collection, None, now()).unwrap();

        assert_eq!(result.assessment.risk_score, VERY_LOW_SUPPLY_WEIGHT);
        assert_eq!(result.assessment.risk_factors, vec![RiskFactor::VeryLowSupply]);
        assert!(result.is_verified);
    }

    #[test]
    fn test_healthy_collection() {
        let collection = object(json!({"supply": 500, "description": "d", "uri": "u"}));
        let history = vec![tx_at("2020-01-01T00:00:00")];
        let result = score_collection_at(&collection, Some(&history), now()).unwrap();

        assert_eq!(result.assessment.risk_score, 0);
        assert!(result.is_verified);
    }

    #[test]
    fn test_new_creator_account_uses_oldest_transaction() {
        let collection = object(json!({"supply": 500, "description": "d", "uri": "u"}));

        let recent = (now() - Duration::days(10)).to_rfc3339();
        let history = vec![tx_at(&recent)];
        let result = score_collection_at(&collection, Some(&history), now()).unwrap();
        assert_eq!(result.assessment.risk_factors, vec![RiskFactor::NewCreatorAccount]);
        assert_eq!(result.assessment.risk_score, NEW_CREATOR_ACCOUNT_WEIGHT);

        let history = vec![tx_at(&recent), tx_at("2023-01-01T00:00:00")];
        let result = score_collection_at(&collection, Some(&history), now()).unwrap();
        assert!(result.assessment.risk_factors.is_empty());
    }

    #[test]
    fn test_new_creator_with_zero_supply_is_high_risk() {
        let collection = object(json!({"supply": 0, "description": "d", "uri": "u"}));
        let micros = (now() - Duration::days(2)).timestamp_micros().to_string();
        let history = vec![tx_at(&micros)];
        let result = score_collection_at(&collection, Some(&history), now()).unwrap();

        assert_eq!(result.assessment.risk_score, 75);
        assert!(result.assessment.is_high_risk);
    }

    #[test]
    fn test_malformed_timestamp_is_an_error() {
        let collection = object(json!({"supply": 10, "description": "d", "uri": "u"}));
        let history = vec![tx_at("yesterday")];
        assert!(score_collection_at(&collection, Some(&history), now()).is_err());
    }

    #[test]
    fn test_missing_timestamps_are_skipped() {
        let collection = object(json!({"supply": 10, "description": "d", "uri": "u"}));
        let history = vec![RawTransaction::default()];
        let result = score_collection_at(&collection, Some(&history), now()).unwrap();
        assert_eq!(result.assessment.risk_score, 0);
    }

    #[test]
    fn test_parse_timestamp_formats() {
        let expected = Utc.with_ymd_and_hms(2024, 1, 2, 3, 4, 5).unwrap();

        assert_eq!(parse_timestamp("2024-01-02T03:04:05Z").unwrap(), expected);
        assert_eq!(parse_timestamp("2024-01-02T05:04:05+02:00").unwrap(), expected);
        assert_eq!(parse_timestamp("2024-01-02T03:04:05").unwrap(), expected);
        assert_eq!(parse_timestamp("2024-01-02 03:04:05").unwrap(), expected);
        assert_eq!(
            parse_timestamp(&expected.timestamp_micros().to_string()).unwrap(),
            expected
        );
        assert!(parse_timestamp("").is_err());
        assert!(parse_timestamp("not a date").is_err());
    }
}
