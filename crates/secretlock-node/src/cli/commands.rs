use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

const BUILD_VERSION: &str = env!("CARGO_PKG_VERSION");

#[derive(Parser)]
#[command(name = "secretlock")]
#[command(version = BUILD_VERSION)]
#[command(about = "SecretLock - signer-attested commitment verification")]
#[command(long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[arg(short, long, global = true, value_name = "FILE", help = "Path to config file")]
    pub config: Option<PathBuf>,

    #[arg(short = 'd', long, global = true, value_name = "DIR", env = "SECRETLOCK_DATA_DIR", help = "Data directory path")]
    pub data_dir: Option<PathBuf>,

    #[arg(short, long, global = true, value_name = "NAME", help = "Target network (localhost, sepolia, optimism, base, arbitrum)")]
    pub network: Option<String>,

    #[arg(short, long, global = true, value_name = "HEX", env = "SECRETLOCK_PRIVATE_KEY", hide_env_values = true, help = "Caller private key")]
    pub key: Option<String>,

    #[arg(short, long, action = clap::ArgAction::Count, global = true, help = "Increase verbosity (-v, -vv, -vvv)")]
    pub verbose: u8,

    #[arg(short, long, global = true, help = "Suppress non-error output")]
    pub quiet: bool,

    #[arg(long, global = true, value_name = "FILE", help = "Write logs to file")]
    pub log_file: Option<PathBuf>,

    #[arg(long, global = true, default_value = "text", help = "Output format")]
    pub format: OutputFormat,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Subcommand)]
pub enum Commands {
    #[command(about = "Deploy a new lock owned by the caller")]
    #[command(long_about = "Deploy a new lock owned by the caller.\n\nOn networks with a block explorer, source verification is submitted after the configured delay. Verification failures are logged and do not fail the deployment.")]
    Deploy {
        #[arg(short, long, help = "Replace an existing deployment in this data directory")]
        force: bool,
        #[arg(long, help = "Do not wait for explorer verification to finish")]
        no_wait: bool,
    },

    #[command(about = "Show the caller address")]
    Address,

    #[command(about = "Generate a new private key")]
    Keygen,

    #[command(about = "Show the lock owner and deployment")]
    Owner,

    #[command(about = "Authorize a signer (owner only)")]
    AddSigner {
        #[arg(help = "Signer address (0x...)")]
        signer: String,
    },

    #[command(about = "Revoke a signer (owner only)")]
    RemoveSigner {
        #[arg(help = "Signer address (0x...)")]
        signer: String,
    },

    #[command(about = "Check whether an address is an authorized signer")]
    IsAuthorized {
        #[arg(help = "Signer address (0x...)")]
        signer: String,
    },

    #[command(about = "Check whether a commitment has been consumed")]
    IsUsed {
        #[arg(help = "Commitment (0x-prefixed 32-byte hex)")]
        commitment: String,
    },

    #[command(about = "Verify and consume a commitment as the caller")]
    Verify {
        #[arg(long, help = "Commitment (0x-prefixed 32-byte hex)")]
        commitment: String,
        #[arg(long, help = "65-byte signature (hex)")]
        signature: String,
        #[arg(long, help = "Claimed signer address (0x...)")]
        signer: String,
    },

    #[command(about = "Sign a commitment for a recipient with the caller key")]
    Sign {
        #[arg(long, help = "Commitment (0x-prefixed 32-byte hex)")]
        commitment: String,
        #[arg(long, help = "Recipient address (0x...)")]
        recipient: String,
    },

    #[command(about = "Compute the commitment of a content identifier")]
    Commitment {
        #[arg(help = "Content identifier, e.g. an IPFS CID")]
        content: String,
    },

    #[command(about = "Show recorded lock events")]
    Events {
        #[arg(long, default_value = "20", help = "Number of entries to show")]
        limit: usize,
    },

    #[command(about = "Manage configuration")]
    Config {
        #[command(subcommand)]
        action: Option<ConfigAction>,
    },
}

#[derive(Clone, Copy, Subcommand)]
pub enum ConfigAction {
    #[command(about = "Show effective configuration")]
    Show,
    #[command(about = "Validate configuration")]
    Validate,
    #[command(about = "Write the effective configuration to the config file")]
    Init,
}
