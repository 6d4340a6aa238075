#![allow(missing_docs)]
#![warn(clippy::all)]

pub mod config;
pub mod deploy;
pub mod explorer;
pub mod service;
pub mod storage;

pub use config::{LogLevel, LoggingConfig, Network, NodeConfig};
pub use deploy::{deploy, instance_address, schedule_source_verification, Deployment};
pub use explorer::{ExplorerClient, VerificationRequest};
pub use service::LockService;
pub use storage::{DeploymentRecord, LockStorage, StorageConfig, StoredEvent};
