use std::collections::HashSet;
use std::io::Read;

use crate::config::RegistryConfig;

/// Addresses known to belong to scammers.
///
/// Built once at startup and never mutated afterwards, so it is shared
/// between requests without locking.
#[derive(Debug, Default)]
pub struct ScammerRegistry {
    addresses: HashSet<String>,
}

impl ScammerRegistry {
    pub fn new<I, S>(addresses: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let addresses = addresses
            .into_iter()
            .map(|a| canonical(a.as_ref()))
            .filter(|a| !a.is_empty())
            .collect();
        Self { addresses }
    }

    /// Build the registry from inline config addresses plus the optional CSV list.
    /// An unreadable CSV file is logged and skipped.
    pub fn load(config: &RegistryConfig) -> Self {
        let mut addresses = config.addresses.clone();

        if let Some(path) = &config.scammer_list_path {
            match parse_scammer_csv(path) {
                Ok(listed) => addresses.extend(listed),
                Err(e) => {
                    tracing::warn!(error = %e, "Failed to load scammer list, continuing without");
                }
            }
        }

        let registry = Self::new(addresses);
        tracing::info!(addresses = registry.len(), "Loaded known-scammer registry");
        registry
    }

    pub fn is_scammer(&self, address: &str) -> bool {
        self.addresses.contains(&canonical(address))
    }

    pub fn len(&self) -> usize {
        self.addresses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.addresses.is_empty()
    }
}

/// Addresses compare case-insensitively, ignoring surrounding whitespace.
fn canonical(address: &str) -> String {
    address.trim().to_lowercase()
}

/// Read a scammer list CSV.
/// Expected columns: address, label (optional). The first row is a header.
pub fn parse_scammer_csv(path: &str) -> eyre::Result<Vec<String>> {
    let file = std::fs::File::open(path)
        .map_err(|e| eyre::eyre!("Failed to open scammer list '{}': {}", path, e))?;
    parse_scammer_records(file)
}

pub fn parse_scammer_records<R: Read>(reader: R) -> eyre::Result<Vec<String>> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(reader);

    let mut addresses = Vec::new();
    for result in reader.records() {
        let record = result?;
        let address = record.get(0).unwrap_or("").trim();
        if address.is_empty() {
            continue;
        }
        addresses.push(address.to_string());
    }

    tracing::debug!(addresses = addresses.len(), "Parsed scammer list");
    Ok(addresses)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_membership_is_case_insensitive() {
        let registry = ScammerRegistry::new(["0xDEADbeef", "  0xabc  ", ""]);

        assert_eq!(registry.len(), 2);
        assert!(registry.is_scammer("0xdeadbeef"));
        assert!(registry.is_scammer("0xDEADBEEF"));
        assert!(registry.is_scammer("0xABC"));
        assert!(!registry.is_scammer("0x1"));
    }

    #[test]
    fn test_parse_records() {
        let csv = "address,label\n0xaaa,drainer\n,empty\n0xbbb\n";
        let addresses = parse_scammer_records(csv.as_bytes()).unwrap();
        assert_eq!(addresses, vec!["0xaaa", "0xbbb"]);
    }

    #[test]
    fn test_load_merges_inline_and_file() {
        let path = std::env::temp_dir().join(format!("scammers-{}.csv", std::process::id()));
        std::fs::write(&path, "address,label\n0xfile,phishing\n").unwrap();

        let config = RegistryConfig {
            scammer_list_path: Some(path.to_string_lossy().into_owned()),
            addresses: vec!["0xinline".to_string()],
        };
        let registry = ScammerRegistry::load(&config);
        std::fs::remove_file(&path).unwrap();

        assert!(registry.is_scammer("0xfile"));
        assert!(registry.is_scammer("0xinline"));
    }

    #[test]
    fn test_load_survives_missing_file() {
        let config = RegistryConfig {
            scammer_list_path: Some("/nonexistent/scammers.csv".to_string()),
            addresses: vec!["0x1".to_string()],
        };
        let registry = ScammerRegistry::load(&config);
        assert_eq!(registry.len(), 1);
    }
}
