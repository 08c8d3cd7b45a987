use serde::Deserialize;

#[derive(Debug, Deserialize, Clone, Default)]
pub struct Config {
    #[serde(default)]
    pub node: NodeConfig,
    #[serde(default)]
    pub registry: RegistryConfig,
    #[serde(default)]
    pub api: ApiConfig,
}

// ============================================================
// Node Config
// ============================================================

#[derive(Debug, Deserialize, Clone)]
pub struct NodeConfig {
    #[serde(default = "default_api_url")]
    pub api_url: String,
    #[serde(default = "default_transactions_limit")]
    pub transactions_limit: u32,
}

impl Default for NodeConfig {
    fn default() -> Self {
        Self {
            api_url: default_api_url(),
            transactions_limit: default_transactions_limit(),
        }
    }
}

fn default_api_url() -> String {
    "https://fullnode.mainnet.aptoslabs.com/v1".to_string()
}

fn default_transactions_limit() -> u32 {
    25
}

// ============================================================
// Scammer Registry Config
// ============================================================

#[derive(Debug, Deserialize, Clone, Default)]
pub struct RegistryConfig {
    pub scammer_list_path: Option<String>,
    #[serde(default)]
    pub addresses: Vec<String>,
}

// ============================================================
// API Config
// ============================================================

#[derive(Debug, Deserialize, Clone)]
pub struct ApiConfig {
    #[serde(default = "default_api_port")]
    pub port: u16,
    #[serde(default = "default_api_host")]
    pub host: String,
    pub static_dir: Option<String>,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            port: default_api_port(),
            host: default_api_host(),
            static_dir: None,
        }
    }
}

fn default_api_port() -> u16 {
    8000
}

fn default_api_host() -> String {
    "0.0.0.0".to_string()
}

impl Config {
    pub fn load(path: &str) -> eyre::Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| eyre::eyre!("Failed to read config file '{}': {}", path, e))?;
        let config: Config = toml::from_str(&content)
            .map_err(|e| eyre::eyre!("Failed to parse config file '{}': {}", path, e))?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> eyre::Result<()> {
        let url = &self.node.api_url;
        if !url.starts_with("http://") && !url.starts_with("https://") {
            return Err(eyre::eyre!("Invalid node api_url '{}'", url));
        }
        if self.node.transactions_limit == 0 {
            return Err(eyre::eyre!("node.transactions_limit must be greater than zero"));
        }
        if self.registry.addresses.iter().any(|a| a.trim().is_empty()) {
            return Err(eyre::eyre!("registry.addresses must not contain blank entries"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_config() {
        let toml_str = r#"
[node]
api_url = "https://fullnode.testnet.aptoslabs.com/v1"

[registry]
scammer_list_path = "scammers.csv"
addresses = ["0xbad"]

[api]
port = 9000
static_dir = "static"
"#;

        let config: Config = toml::from_str(toml_str).unwrap();
        assert_eq!(config.node.api_url, "https://fullnode.testnet.aptoslabs.com/v1");
        assert_eq!(config.node.transactions_limit, 25); // default
        assert_eq!(config.registry.scammer_list_path.as_deref(), Some("scammers.csv"));
        assert_eq!(config.registry.addresses, vec!["0xbad"]);
        assert_eq!(config.api.port, 9000);
        assert_eq!(config.api.host, "0.0.0.0"); // default
        assert_eq!(config.api.static_dir.as_deref(), Some("static"));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_empty_config_uses_defaults() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config.node.api_url, "https://fullnode.mainnet.aptoslabs.com/v1");
        assert_eq!(config.api.port, 8000);
        assert!(config.registry.addresses.is_empty());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_bad_url() {
        let config = Config {
            node: NodeConfig {
                api_url: "fullnode.mainnet.aptoslabs.com".to_string(),
                transactions_limit: 25,
            },
            ..Config::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_zero_limit() {
        let config = Config {
            node: NodeConfig {
                transactions_limit: 0,
                ..NodeConfig::default()
            },
            ..Config::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_blank_address() {
        let config = Config {
            registry: RegistryConfig {
                scammer_list_path: None,
                addresses: vec!["  ".to_string()],
            },
            ..Config::default()
        };
        assert!(config.validate().is_err());
    }
}
