use serde_json::{Map, Value};

pub const NAME_KEYS: &[&str] = &["name"];
pub const TOKEN_ID_KEYS: &[&str] = &["token_id", "id"];
pub const COLLECTION_KEYS: &[&str] = &["collection_name", "collection"];
pub const CREATOR_KEYS: &[&str] = &["creator_address", "creator"];
pub const OWNER_KEYS: &[&str] = &["owner"];

pub const PLACEHOLDER: &str = "N/A";

/// Return the value of the first candidate key that is present and not `null`.
pub fn lookup<'a>(map: &'a Map<String, Value>, candidates: &[&str]) -> Option<&'a Value> {
    candidates
        .iter()
        .filter_map(|key| map.get(*key))
        .find(|value| !value.is_null())
}

/// Like [`lookup`], falling back to `default` as a JSON string when every candidate misses.
pub fn lookup_or(map: &Map<String, Value>, candidates: &[&str], default: &str) -> Value {
    lookup(map, candidates)
        .cloned()
        .unwrap_or_else(|| Value::String(default.to_string()))
}

/// String form of an identifier, used when matching a requested token id.
/// Strings compare by content, everything else by its JSON text (`5`, `true`, ...).
pub fn id_string(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Loose truthiness: `null`, `false`, `0`, `""`, `[]` and `{}` are all falsy.
pub fn is_truthy(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => false,
        Some(Value::Bool(b)) => *b,
        Some(Value::Number(n)) => n.as_f64().map(|f| f != 0.0).unwrap_or(true),
        Some(Value::String(s)) => !s.is_empty(),
        Some(Value::Array(a)) => !a.is_empty(),
        Some(Value::Object(o)) => !o.is_empty(),
    }
}
