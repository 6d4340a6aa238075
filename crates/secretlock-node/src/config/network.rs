use secretlock_types::{LockError, LockResult};
use serde::{Deserialize, Serialize};

/// Target environment a lock is deployed to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Network {
    #[default]
    Localhost,
    Sepolia,
    Optimism,
    Base,
    Arbitrum,
}

/// Block explorer that accepts source verification for a network.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Explorer {
    pub name: &'static str,
    pub api_url: &'static str,
}

impl Network {
    pub const ALL: [Network; 5] = [
        Network::Localhost,
        Network::Sepolia,
        Network::Optimism,
        Network::Base,
        Network::Arbitrum,
    ];

    pub fn chain_id(&self) -> u64 {
        match self {
            Network::Localhost => 31337,
            Network::Sepolia => 11155111,
            Network::Optimism => 10,
            Network::Base => 8453,
            Network::Arbitrum => 42161,
        }
    }

    pub fn explorer(&self) -> Option<Explorer> {
        match self {
            Network::Localhost => None,
            Network::Sepolia => Some(Explorer {
                name: "Etherscan",
                api_url: "https://api-sepolia.etherscan.io/api",
            }),
            Network::Optimism => Some(Explorer {
                name: "Etherscan",
                api_url: "https://api-optimistic.etherscan.io/api",
            }),
            Network::Base => Some(Explorer {
                name: "Basescan",
                api_url: "https://api.basescan.org/api",
            }),
            Network::Arbitrum => Some(Explorer {
                name: "Arbiscan",
                api_url: "https://api.arbiscan.io/api",
            }),
        }
    }

    pub fn parse(s: &str) -> LockResult<Self> {
        match s.to_lowercase().as_str() {
            "localhost" | "hardhat" | "local" => Ok(Network::Localhost),
            "sepolia" => Ok(Network::Sepolia),
            "optimism" => Ok(Network::Optimism),
            "base" => Ok(Network::Base),
            "arbitrum" => Ok(Network::Arbitrum),
            other => Err(LockError::Config(format!("Unknown network: {}", other))),
        }
    }
}

impl std::fmt::Display for Network {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Network::Localhost => write!(f, "localhost"),
            Network::Sepolia => write!(f, "sepolia"),
            Network::Optimism => write!(f, "optimism"),
            Network::Base => write!(f, "base"),
            Network::Arbitrum => write!(f, "arbitrum"),
        }
    }
}

impl std::str::FromStr for Network {
    type Err = LockError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct ExplorerConfig {
    pub enabled: bool,
    pub api_key: Option<String>,
    /// Overrides the network's built-in explorer endpoint.
    pub api_url: Option<String>,
    pub verify_delay_secs: u64,
    pub request_timeout_secs: u64,
}

impl Default for ExplorerConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            api_key: None,
            api_url: None,
            verify_delay_secs: super::DEFAULT_VERIFY_DELAY_SECS,
            request_timeout_secs: 30,
        }
    }
}
