mod logging;
mod network;
mod node;
mod types;

pub use logging::LoggingConfig;
pub use network::{Explorer, ExplorerConfig, Network};
pub use node::{default_data_dir, NodeConfig, RedactedConfig};
pub use types::*;

pub const DEFAULT_VERIFY_DELAY_SECS: u64 = 30;

pub const MAX_VERIFY_DELAY_SECS: u64 = 600;

pub const DEFAULT_CACHE_CAPACITY_BYTES: u64 = 16 * 1024 * 1024;

pub const DEFAULT_FLUSH_EVERY_MS: u64 = 1000;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_validation() {
        let config = NodeConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.network, Network::Localhost);
        assert_eq!(config.explorer.verify_delay_secs, 30);
    }

    #[test]
    fn test_excessive_delay_rejected() {
        let mut config = NodeConfig::default();
        config.explorer.verify_delay_secs = MAX_VERIFY_DELAY_SECS + 1;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_bad_explorer_url_rejected() {
        let mut config = NodeConfig::default();
        config.explorer.api_url = Some("ftp://example.org".into());
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_zero_cache_rejected() {
        let mut config = NodeConfig::default();
        config.cache_capacity_bytes = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_networks() {
        assert_eq!(Network::Optimism.chain_id(), 10);
        assert_eq!(Network::Base.chain_id(), 8453);
        assert_eq!(Network::Arbitrum.chain_id(), 42161);
        assert_eq!(Network::Sepolia.chain_id(), 11155111);
        assert!(Network::Localhost.explorer().is_none());
        assert_eq!(Network::Base.explorer().unwrap().name, "Basescan");
        assert_eq!(Network::Arbitrum.explorer().unwrap().name, "Arbiscan");

        for network in Network::ALL {
            assert_eq!(Network::parse(&network.to_string()).unwrap(), network);
        }
        assert_eq!(Network::parse("hardhat").unwrap(), Network::Localhost);
        assert!(Network::parse("polygon").is_err());
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let config = NodeConfig::from_toml(
            r#"
            network = "base"

            [explorer]
            api_key = "KEY"
            "#,
        )
        .unwrap();

        assert_eq!(config.network, Network::Base);
        assert_eq!(config.explorer.api_key.as_deref(), Some("KEY"));
        assert_eq!(config.explorer.verify_delay_secs, DEFAULT_VERIFY_DELAY_SECS);
        assert!(!config.logging.json);
    }

    #[test]
    fn test_config_serialization() {
        let mut config = NodeConfig::default();
        config.network = Network::Arbitrum;
        let toml_str = toml::to_string_pretty(&config).expect("Failed to serialize");
        let parsed = NodeConfig::from_toml(&toml_str).expect("Failed to parse");
        assert_eq!(parsed.network, Network::Arbitrum);
        assert_eq!(parsed.data_dir, config.data_dir);
    }

    #[test]
    fn test_save_and_load() {
        let dir = std::env::temp_dir().join(format!("secretlock-config-{}", uuid::Uuid::new_v4()));
        let path = dir.join("config.toml");

        let mut config = NodeConfig::default();
        config.data_dir = dir.clone();
        config.network = Network::Optimism;
        config.save(&path).unwrap();

        let loaded = NodeConfig::load(&path).unwrap();
        assert_eq!(loaded.network, Network::Optimism);

        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_env_overrides() {
        std::env::set_var("SECRETLOCK_EXPLORER_API_KEY", "from-env");
        std::env::set_var("SECRETLOCK_VERIFY_DELAY_SECS", "45");

        let mut config = NodeConfig::default();
        config.apply_env_overrides();

        std::env::remove_var("SECRETLOCK_EXPLORER_API_KEY");
        std::env::remove_var("SECRETLOCK_VERIFY_DELAY_SECS");

        assert_eq!(config.explorer.api_key.as_deref(), Some("from-env"));
        assert_eq!(config.explorer.verify_delay_secs, 45);

        std::env::set_var("SECRETLOCK_VERIFY_DELAY_SECS", "soon");
        std::env::set_var("SECRETLOCK_LOG_JSON", "false");
        let mut config = NodeConfig::default();
        config.apply_env_overrides();
        assert_eq!(config.explorer.verify_delay_secs, DEFAULT_VERIFY_DELAY_SECS);
        assert!(!config.logging.json);

        std::env::set_var("SECRETLOCK_LOG_JSON", "TRUE");
        config.apply_env_overrides();
        assert!(config.logging.json);

        std::env::set_var("SECRETLOCK_LOG_JSON", "maybe");
        config.apply_env_overrides();
        assert!(config.logging.json);

        std::env::remove_var("SECRETLOCK_VERIFY_DELAY_SECS");
        std::env::remove_var("SECRETLOCK_LOG_JSON");
    }

    #[test]
    fn test_redacted_config_hides_key() {
        let mut config = NodeConfig::default();
        config.explorer.api_key = Some("super-secret".into());
        let shown = config.redacted().to_string();
        assert!(shown.contains("API key: set"));
        assert!(!shown.contains("super-secret"));
    }
}
