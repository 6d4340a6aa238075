use secretlock_types::{LockError, LockResult};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{info, warn};

use super::logging::LoggingConfig;
use super::network::{ExplorerConfig, Network};
use super::types::LogLevel;
use super::{DEFAULT_CACHE_CAPACITY_BYTES, DEFAULT_FLUSH_EVERY_MS, MAX_VERIFY_DELAY_SECS};

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct NodeConfig {
    pub data_dir: PathBuf,
    pub network: Network,
    pub cache_capacity_bytes: u64,
    pub flush_every_ms: Option<u64>,
    pub explorer: ExplorerConfig,
    pub logging: LoggingConfig,
}

impl Default for NodeConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            network: Network::default(),
            cache_capacity_bytes: DEFAULT_CACHE_CAPACITY_BYTES,
            flush_every_ms: Some(DEFAULT_FLUSH_EVERY_MS),
            explorer: ExplorerConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

pub fn default_data_dir() -> PathBuf {
    dirs::home_dir()
        .map(|h| h.join(".secretlock"))
        .unwrap_or_else(|| PathBuf::from("/var/lib/secretlock"))
}

impl NodeConfig {
    pub fn load(path: impl AsRef<Path>) -> LockResult<Self> {
        let path = path.as_ref();

        let mut config = if path.exists() {
            let contents = std::fs::read_to_string(path)
                .map_err(|e| LockError::Config(format!("Failed to read config: {}", e)))?;

            Self::from_toml(&contents)?
        } else {
            info!("Config file not found, using defaults");
            Self::default()
        };

        config.apply_env_overrides();
        config.validate()?;

        Ok(config)
    }

    pub fn from_toml(contents: &str) -> LockResult<Self> {
        toml::from_str(contents)
            .map_err(|e| LockError::Config(format!("Failed to parse config: {}", e)))
    }

    pub fn save(&self, path: impl AsRef<Path>) -> LockResult<()> {
        let contents = toml::to_string_pretty(self)
            .map_err(|e| LockError::Config(format!("Failed to serialize config: {}", e)))?;

        if let Some(parent) = path.as_ref().parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| LockError::Config(format!("Failed to create config dir: {}", e)))?;
        }

        std::fs::write(path.as_ref(), contents)
            .map_err(|e| LockError::Config(format!("Failed to write config: {}", e)))?;

        info!("Configuration saved to {:?}", path.as_ref());
        Ok(())
    }

    pub fn apply_env_overrides(&mut self) {
        if let Ok(dir) = std::env::var("SECRETLOCK_DATA_DIR") {
            self.data_dir = PathBuf::from(dir);
        }

        if let Ok(network) = std::env::var("SECRETLOCK_NETWORK") {
            match Network::parse(&network) {
                Ok(n) => self.network = n,
                Err(_) => warn!("Ignoring unknown SECRETLOCK_NETWORK value: {}", network),
            }
        }

        if let Ok(key) = std::env::var("SECRETLOCK_EXPLORER_API_KEY") {
            self.explorer.api_key = Some(key);
        }

        if let Ok(url) = std::env::var("SECRETLOCK_EXPLORER_URL") {
            self.explorer.api_url = Some(url);
        }

        if let Ok(delay) = std::env::var("SECRETLOCK_VERIFY_DELAY_SECS") {
            match delay.trim().parse() {
                Ok(d) => self.explorer.verify_delay_secs = d,
                Err(_) => warn!("Ignoring invalid SECRETLOCK_VERIFY_DELAY_SECS value: {}", delay),
            }
        }

        if let Ok(level) = std::env::var("SECRETLOCK_LOG_LEVEL") {
            self.logging.level = LogLevel::parse(&level);
        }

        if let Ok(json) = std::env::var("SECRETLOCK_LOG_JSON") {
            match parse_env_bool(&json) {
                Some(enabled) => self.logging.json = enabled,
                None => warn!("Ignoring invalid SECRETLOCK_LOG_JSON value: {}", json),
            }
        }
    }

    pub fn validate(&self) -> LockResult<()> {
        if self.data_dir.as_os_str().is_empty() {
            return Err(LockError::Config("Data directory cannot be empty".into()));
        }

        if self.cache_capacity_bytes == 0 {
            return Err(LockError::Config("Cache capacity cannot be 0".into()));
        }

        if self.explorer.verify_delay_secs > MAX_VERIFY_DELAY_SECS {
            return Err(LockError::Config(format!(
                "Verification delay cannot exceed {} seconds",
                MAX_VERIFY_DELAY_SECS
            )));
        }

        if self.explorer.request_timeout_secs == 0 {
            return Err(LockError::Config("Explorer request timeout cannot be 0".into()));
        }

        if let Some(url) = &self.explorer.api_url {
            if !url.starts_with("http://") && !url.starts_with("https://") {
                return Err(LockError::Config(format!("Invalid explorer URL: {}", url)));
            }
        }

        if self.explorer.enabled
            && self.network.explorer().is_some()
            && self.explorer.api_key.is_none()
        {
            warn!(
                "No explorer API key configured for {}; source verification will likely fail",
                self.network
            );
        }

        Ok(())
    }

    pub fn storage_path(&self) -> PathBuf {
        self.data_dir.join("db").join(self.network.to_string())
    }

    pub fn redacted(&self) -> RedactedConfig {
        RedactedConfig {
            data_dir: self.data_dir.clone(),
            network: self.network,
            chain_id: self.network.chain_id(),
            explorer_enabled: self.explorer.enabled,
            explorer_key_set: self.explorer.api_key.is_some(),
            verify_delay_secs: self.explorer.verify_delay_secs,
            log_level: self.logging.level,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct RedactedConfig {
    pub data_dir: PathBuf,
    pub network: Network,
    pub chain_id: u64,
    pub explorer_enabled: bool,
    pub explorer_key_set: bool,
    pub verify_delay_secs: u64,
    pub log_level: LogLevel,
}

impl std::fmt::Display for RedactedConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "SecretLock Configuration")?;
        writeln!(f, "========================")?;
        writeln!(f, "Data dir: {:?}", self.data_dir)?;
        writeln!(f, "Network: {} (chain {})", self.network, self.chain_id)?;
        writeln!(
            f,
            "Explorer verification: {} (API key: {})",
            if self.explorer_enabled { "ON" } else { "OFF" },
            if self.explorer_key_set { "set" } else { "unset" }
        )?;
        writeln!(f, "Verification delay: {}s", self.verify_delay_secs)?;
        writeln!(f, "Log level: {}", self.log_level)?;
        Ok(())
    }
}

fn parse_env_bool(value: &str) -> Option<bool> {
    match value.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "" | "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
