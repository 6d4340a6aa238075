use crate::config::Network;
use chrono::{DateTime, Utc};
use secretlock_types::{Address, LockEvent};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone)]
pub struct StorageConfig {
    pub path: PathBuf,
    pub cache_capacity_bytes: u64,
    pub flush_every_ms: Option<u64>,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("data"),
            cache_capacity_bytes: crate::config::DEFAULT_CACHE_CAPACITY_BYTES,
            flush_every_ms: Some(crate::config::DEFAULT_FLUSH_EVERY_MS),
        }
    }
}

impl From<&crate::config::NodeConfig> for StorageConfig {
    fn from(config: &crate::config::NodeConfig) -> Self {
        Self {
            path: config.storage_path(),
            cache_capacity_bytes: config.cache_capacity_bytes,
            flush_every_ms: config.flush_every_ms,
        }
    }
}

/// Where and by whom a lock instance was initialized.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeploymentRecord {
    pub network: Network,
    pub chain_id: u64,
    pub address: Address,
    pub owner: Address,
    pub nonce: u64,
    pub deployed_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredEvent {
    pub seq: u64,
    pub recorded_at: i64,
    pub event: LockEvent,
}
