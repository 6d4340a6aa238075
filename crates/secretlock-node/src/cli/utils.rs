use super::commands::{Cli, OutputFormat};
use secretlock_node::{LockService, LockStorage, LoggingConfig, Network, NodeConfig, StorageConfig};
use secretlock_types::{Address, LockError, LockResult, Secp256k1PrivateKey};
use std::path::PathBuf;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

pub fn init_logging(cli: &Cli, logging: &LoggingConfig) -> LockResult<()> {
    let level = if cli.quiet {
        "warn".to_string()
    } else {
        match cli.verbose {
            0 => logging.level.to_string(),
            1 => "info,secretlock_node=debug,secretlock_core=debug".to_string(),
            2 => "debug".to_string(),
            _ => "trace".to_string(),
        }
    };

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    let subscriber = tracing_subscriber::registry().with(env_filter);

    let log_file = cli.log_file.clone().or_else(|| logging.file.clone());
    let result = match (log_file, logging.json) {
        (Some(path), json) => {
            let file = std::fs::OpenOptions::new()
                .create(true)
                .append(true)
                .open(&path)
                .map_err(|e| LockError::Config(format!("Failed to open log file {:?}: {}", path, e)))?;
            let writer = std::sync::Mutex::new(file);
            if json {
                subscriber
                    .with(fmt::layer().json().with_writer(writer))
                    .try_init()
            } else {
                subscriber
                    .with(fmt::layer().with_writer(writer).with_ansi(false))
                    .try_init()
            }
        }
        (None, true) => subscriber
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .try_init(),
        (None, false) => subscriber
            .with(
                fmt::layer()
                    .with_target(cli.verbose >= 2)
                    .with_writer(std::io::stderr),
            )
            .try_init(),
    };

    result.map_err(|e| LockError::Config(format!("Failed to initialize logging: {}", e)))
}

pub fn config_path(cli: &Cli) -> PathBuf {
    cli.config.clone().unwrap_or_else(|| {
        cli.data_dir
            .clone()
            .unwrap_or_else(secretlock_node::config::default_data_dir)
            .join("config.toml")
    })
}

/// Effective configuration: file, then environment, then command-line flags.
pub fn load_config(cli: &Cli) -> LockResult<NodeConfig> {
    let mut config = NodeConfig::load(config_path(cli))?;
    if let Some(dir) = &cli.data_dir {
        config.data_dir = dir.clone();
    }
    if let Some(network) = &cli.network {
        config.network = Network::parse(network)?;
    }
    config.validate()?;

    Ok(config)
}

pub fn caller_key(cli: &Cli) -> LockResult<Secp256k1PrivateKey> {
    let hex = cli.key.as_deref().ok_or_else(|| {
        LockError::InvalidKey("No caller key; pass --key or set SECRETLOCK_PRIVATE_KEY".into())
    })?;
    Secp256k1PrivateKey::from_hex(hex)
}

pub fn caller_address(cli: &Cli) -> LockResult<Address> {
    secretlock_crypto::derive_address_from_private(&caller_key(cli)?)
}

pub fn open_storage(config: &NodeConfig) -> LockResult<LockStorage> {
    let storage_config = StorageConfig::from(config);
    if let Some(parent) = storage_config.path.parent() {
        std::fs::create_dir_all(parent)
            .map_err(|e| LockError::Storage(format!("Failed to create data dir: {}", e)))?;
    }
    LockStorage::open(&storage_config)
}

pub fn open_service(config: &NodeConfig) -> LockResult<LockService> {
    LockService::open(open_storage(config)?)
}

pub fn print_json(value: &serde_json::Value) -> LockResult<()> {
    let rendered = serde_json::to_string_pretty(value)
        .map_err(|e| LockError::Serialization(format!("Failed to render output: {}", e)))?;
    println!("{}", rendered);
    Ok(())
}

/// Prints `value` as JSON, or `text` otherwise.
pub fn emit(format: OutputFormat, value: serde_json::Value, text: impl FnOnce()) -> LockResult<()> {
    match format {
        OutputFormat::Json => print_json(&value),
        OutputFormat::Text => {
            text();
            Ok(())
        }
    }
}

pub fn ok_mark(message: impl std::fmt::Display) {
    println!("\x1b[38;5;46m[+]\x1b[0m {}", message);
}

pub fn fail_mark(message: impl std::fmt::Display) {
    println!("\x1b[38;5;196m[-]\x1b[0m {}", message);
}
