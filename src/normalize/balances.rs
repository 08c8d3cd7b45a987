use serde::Serialize;
use serde_json::{Map, Value};

use crate::gateway::types::RawResource;

use super::fields::lookup;

/// A fungible balance held by the account.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TokenBalance {
    pub name: String,
    pub amount: Value,
    pub resource_type: String,
}

/// Balances from every coin/token resource that carries an amount.
pub fn normalize_token_balances(resources: &[RawResource]) -> Vec<TokenBalance> {
    resources
        .iter()
        .filter(|r| {
            let lowered = r.resource_type.to_lowercase();
            lowered.contains("coin") || lowered.contains("token")
        })
        .filter_map(|r| {
            let amount = balance_amount(&r.data)?;
            Some(TokenBalance {
                name: extract_token_name(&r.resource_type),
                amount,
                resource_type: r.resource_type.clone(),
            })
        })
        .collect()
}

/// `value`, else `amount`; `null` reads as 0. `None` when neither key is present.
fn balance_amount(data: &Map<String, Value>) -> Option<Value> {
    if !data.contains_key("value") && !data.contains_key("amount") {
        return None;
    }
    Some(
        lookup(data, &["value", "amount"])
            .cloned()
            .unwrap_or(Value::from(0)),
    )
}

/// Short token name from a Move type string.
///
/// `0x1::coin::CoinStore<0x1::aptos_coin::AptosCoin>` gives `AptosCoin`,
/// `0x1::a::B` gives `B`. An empty extraction such as `0x1::coin::` gives back
/// the whole type string rather than `""`.
pub fn extract_token_name(resource_type: &str) -> String {
    let name = generic_argument_name(resource_type).unwrap_or_else(|| {
        let parts: Vec<&str> = resource_type.split("::").collect();
        if parts.len() >= 3 {
            parts[2].split('<').next().unwrap_or_default()
        } else {
            parts.last().copied().unwrap_or_default()
        }
    });

    if name.is_empty() {
        tracing::warn!(%resource_type, "Could not extract token name, using full type");
        return resource_type.to_string();
    }
    name.to_string()
}

/// Last path segment of the first generic argument, if it is a qualified type.
fn generic_argument_name(resource_type: &str) -> Option<&str> {
    if !resource_type.contains('>') {
        return None;
    }
    let (_, after) = resource_type.split_once('<')?;
    let inner = after.split(['<', '>']).next()?;
    if !inner.contains("::") {
        return None;
    }
    inner.rsplit("::").next()
}
