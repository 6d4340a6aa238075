use crate::config::{ExplorerConfig, Network};
use reqwest::Client;
use secretlock_types::{Address, LockError, LockResult};
use serde::Deserialize;
use std::time::Duration;
use tracing::debug;

pub const CONTRACT_NAME: &str = "SecretLock";

/// Source-verification submission for one deployed instance.
#[derive(Clone, Debug)]
pub struct VerificationRequest {
    pub address: Address,
    pub chain_id: u64,
    pub contract_name: String,
    pub compiler_version: String,
    pub constructor_arguments: String,
}

impl VerificationRequest {
    pub fn new(address: Address, chain_id: u64) -> Self {
        Self {
            address,
            chain_id,
            contract_name: CONTRACT_NAME.to_string(),
            compiler_version: format!("secretlock-v{}", env!("CARGO_PKG_VERSION")),
            constructor_arguments: String::new(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct ExplorerResponse {
    status: String,
    message: String,
    #[serde(default)]
    result: serde_json::Value,
}

/// Client for an Etherscan-style `verifysourcecode` endpoint.
pub struct ExplorerClient {
    client: Client,
    name: String,
    api_url: String,
    api_key: Option<String>,
}

impl ExplorerClient {
    pub fn new(
        name: impl Into<String>,
        api_url: impl Into<String>,
        api_key: Option<String>,
        timeout: Duration,
    ) -> LockResult<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| LockError::Network(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            name: name.into(),
            api_url: api_url.into(),
            api_key,
        })
    }

    /// `None` when the network has no explorer or verification is disabled.
    pub fn for_network(network: Network, config: &ExplorerConfig) -> LockResult<Option<Self>> {
        if !config.enabled {
            return Ok(None);
        }
        let Some(explorer) = network.explorer() else {
            return Ok(None);
        };

        let api_url = config
            .api_url
            .clone()
            .unwrap_or_else(|| explorer.api_url.to_string());
        reqwest::Url::parse(&api_url)
            .map_err(|e| LockError::Config(format!("Invalid explorer URL {}: {}", api_url, e)))?;

        Self::new(
            explorer.name,
            api_url,
            config.api_key.clone(),
            Duration::from_secs(config.request_timeout_secs),
        )
        .map(Some)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Submits the request and returns the explorer's tracking id.
    pub async fn submit(&self, request: &VerificationRequest) -> LockResult<String> {
        let form = [
            ("module", "contract".to_string()),
            ("action", "verifysourcecode".to_string()),
            ("apikey", self.api_key.clone().unwrap_or_default()),
            ("chainid", request.chain_id.to_string()),
            ("contractaddress", request.address.to_checksum()),
            ("contractname", request.contract_name.clone()),
            ("compilerversion", request.compiler_version.clone()),
            ("constructorArguements", request.constructor_arguments.clone()),
        ];

        debug!("HTTP POST: {}", self.api_url);
        let response = self
            .client
            .post(&self.api_url)
            .form(&form)
            .send()
            .await
            .map_err(|e| LockError::Network(format!("{} request failed: {}", self.name, e)))?;

        let status = response.status();
        if !status.is_success() {
            return Err(LockError::Network(format!(
                "{} returned HTTP {}",
                self.name, status
            )));
        }

        let body: ExplorerResponse = response
            .json()
            .await
            .map_err(|e| LockError::Network(format!("Invalid {} response: {}", self.name, e)))?;

        let result = match &body.result {
            serde_json::Value::String(s) => s.clone(),
            other => other.to_string(),
        };

        if body.status != "1" {
            return Err(LockError::Network(format!(
                "{} rejected verification: {} ({})",
                self.name, body.message, result
            )));
        }

        Ok(result)
    }
}
