use serde::Serialize;

use crate::gateway::types::RawTransaction;

const RECENT_TRANSACTIONS_LIMIT: usize = 5;

/// What an account has been doing, derived from its transaction history.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ActivitySummary {
    pub nft_staking: bool,
    pub token_swaps: SwapActivity,
    pub nft_transfers: TransferActivity,
    pub property_modifications: u64,
    pub recent_transactions: Vec<TransactionPreview>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SwapActivity {
    pub swap_count: u64,
    pub listing_count: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TransferActivity {
    pub deposit_count: u64,
    pub withdraw_count: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TransactionPreview {
    #[serde(rename = "type")]
    pub tx_type: String,
    pub timestamp: String,
    pub success: bool,
}

/// Single pass over the history. Missing history gives an empty summary.
pub fn parse_account_activities(tx_history: Option<&[RawTransaction]>) -> ActivitySummary {
    let mut activities = ActivitySummary::default();

    for tx in tx_history.unwrap_or_default() {
        let tx_type = tx.tx_type.to_lowercase();
        let event_types: Vec<String> = tx
            .events
            .iter()
            .map(|e| e.event_type.to_lowercase())
            .collect();
        let mentions =
            |keyword: &str| tx_type.contains(keyword) || event_types.iter().any(|e| e.contains(keyword));

        if mentions("stake") {
            activities.nft_staking = true;
        }
        if mentions("swap") {
            activities.token_swaps.swap_count += 1;
        }
        if mentions("list") {
            activities.token_swaps.listing_count += 1;
        }

        for event_type in &event_types {
            if event_type.contains("deposit") {
                activities.nft_transfers.deposit_count += 1;
            }
            if event_type.contains("withdraw") {
                activities.nft_transfers.withdraw_count += 1;
            }
            if event_type.contains("property") {
                activities.property_modifications += 1;
            }
        }

        if activities.recent_transactions.len() < RECENT_TRANSACTIONS_LIMIT {
            activities.recent_transactions.push(TransactionPreview {
                tx_type: if tx.tx_type.is_empty() {
                    "Unknown".to_string()
                } else {
                    tx.tx_type.clone()
                },
                timestamp: tx.timestamp.clone().unwrap_or_default(),
                success: tx.success.unwrap_or(true),
            });
        }
    }

    activities
}
