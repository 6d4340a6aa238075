use crate::config::NodeConfig;
use crate::explorer::{ExplorerClient, VerificationRequest};
use crate::storage::{DeploymentRecord, LockStorage};
use secretlock_core::SecretLock;
use secretlock_crypto::{derive_address_from_private, keccak256};
use secretlock_types::{Address, LockResult, Secp256k1PrivateKey};
use std::time::Duration;
use tokio::task::JoinHandle;
use tracing::{error, info};

/// Outcome of a deployment. `verification` resolves to the explorer's
/// tracking id, or `None` if submission failed.
pub struct Deployment {
    pub record: DeploymentRecord,
    pub verification: Option<JoinHandle<Option<String>>>,
}

/// Address of the `nonce`-th instance created by `deployer` on `chain_id`.
pub fn instance_address(deployer: &Address, chain_id: u64, nonce: u64) -> Address {
    let mut preimage = Vec::with_capacity(20 + 8 + 8);
    preimage.extend_from_slice(deployer.as_bytes());
    preimage.extend_from_slice(&chain_id.to_be_bytes());
    preimage.extend_from_slice(&nonce.to_be_bytes());

    let hash = keccak256(&preimage);
    let mut address = [0u8; 20];
    address.copy_from_slice(&hash[12..]);
    Address::from_bytes(address)
}

/// Creates a lock owned by the holder of `key` and, where the network has an
/// explorer, schedules source verification in the background.
///
/// Must be called from within a tokio runtime.
pub async fn deploy(
    storage: &LockStorage,
    config: &NodeConfig,
    key: &Secp256k1PrivateKey,
    force: bool,
) -> LockResult<Deployment> {
    let owner = derive_address_from_private(key)?;
    let network = config.network;
    let chain_id = network.chain_id();
    let nonce = storage.deploy_nonce()?;

    let lock = SecretLock::new(owner);
    let record = DeploymentRecord {
        network,
        chain_id,
        address: instance_address(&owner, chain_id, nonce),
        owner,
        nonce,
        deployed_at: chrono::Utc::now(),
    };

    // Explorer errors never fail a deployment.
    let explorer = match ExplorerClient::for_network(network, &config.explorer) {
        Ok(explorer) => explorer,
        Err(e) => {
            error!(%network, "Source verification disabled: {}", e);
            None
        }
    };

    storage.initialize(&lock.state(), &record, force)?;

    info!(address = %record.address, owner = %owner, %network, "SecretLock deployed");

    let verification = match explorer {
        Some(client) => Some(schedule_source_verification(
            client,
            VerificationRequest::new(record.address, chain_id),
            Duration::from_secs(config.explorer.verify_delay_secs),
        )),
        None => {
            info!(%network, "No explorer verification for this network");
            None
        }
    };

    Ok(Deployment {
        record,
        verification,
    })
}

/// Waits `delay` for the explorer to index the instance, then submits it.
/// Failures are logged and never surface to the deployer.
pub fn schedule_source_verification(
    client: ExplorerClient,
    request: VerificationRequest,
    delay: Duration,
) -> JoinHandle<Option<String>> {
    info!(
        "Verifying {} on {} in {}s",
        request.address,
        client.name(),
        delay.as_secs()
    );

    tokio::spawn(async move {
        tokio::time::sleep(delay).await;

        match client.submit(&request).await {
            Ok(guid) => {
                info!(address = %request.address, guid = %guid, "Source verification submitted");
                Some(guid)
            }
            Err(e) => {
                error!(address = %request.address, "Source verification failed: {}", e);
                None
            }
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Network;
    use crate::explorer::tests::serve_once;
    use secretlock_types::LockError;

    fn key() -> Secp256k1PrivateKey {
        let mut bytes = [0u8; 32];
        bytes[31] = 1;
        Secp256k1PrivateKey::from_bytes(bytes)
    }

    fn config(network: Network, api_url: Option<String>) -> NodeConfig {
        let mut config = NodeConfig::default();
        config.network = network;
        config.explorer.api_url = api_url;
        config.explorer.verify_delay_secs = 0;
        config.explorer.request_timeout_secs = 5;
        config
    }

    #[test]
    fn test_instance_address_depends_on_nonce_and_chain() {
        let deployer = Address::from_bytes([1; 20]);
        let a = instance_address(&deployer, 31337, 0);

        assert_eq!(a, instance_address(&deployer, 31337, 0));
        assert_ne!(a, instance_address(&deployer, 31337, 1));
        assert_ne!(a, instance_address(&deployer, 8453, 0));
        assert_ne!(a, instance_address(&Address::from_bytes([2; 20]), 31337, 0));
    }

    #[tokio::test]
    async fn test_localhost_deploy_skips_verification() {
        let storage = LockStorage::in_memory().unwrap();
        let deployment = deploy(&storage, &config(Network::Localhost, None), &key(), false)
            .await
            .unwrap();

        assert!(deployment.verification.is_none());
        assert_eq!(
            deployment.record.owner.to_checksum(),
            "0x7E5F4552091A69125d5DfCb7b8C2659029395Bdf"
        );
        assert_eq!(storage.load_state().unwrap().owner, deployment.record.owner);
    }

    #[tokio::test]
    async fn test_redeploy_requires_force() {
        let storage = LockStorage::in_memory().unwrap();
        let config = config(Network::Localhost, None);

        let first = deploy(&storage, &config, &key(), false).await.unwrap();
        assert!(matches!(
            deploy(&storage, &config, &key(), false).await,
            Err(LockError::AlreadyDeployed(_))
        ));

        let second = deploy(&storage, &config, &key(), true).await.unwrap();
        assert_eq!(second.record.nonce, 1);
        assert_ne!(first.record.address, second.record.address);
    }

    #[tokio::test]
    async fn test_verification_failure_does_not_fail_deploy() {
        let storage = LockStorage::in_memory().unwrap();
        let config = config(Network::Base, Some("http://127.0.0.1:1/api".into()));

        let deployment = deploy(&storage, &config, &key(), false).await.unwrap();
        assert!(storage.is_deployed().unwrap());

        let handle = deployment.verification.unwrap();
        assert_eq!(handle.await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_bad_explorer_endpoint_does_not_fail_deploy() {
        let storage = LockStorage::in_memory().unwrap();
        let config = config(Network::Optimism, Some("not a url".into()));

        let deployment = deploy(&storage, &config, &key(), false).await.unwrap();

        assert!(deployment.verification.is_none());
        assert_eq!(storage.deployment().unwrap(), Some(deployment.record));
    }

    #[tokio::test]
    async fn test_verification_submitted() {
        let url = serve_once(r#"{"status":"1","message":"OK","result":"abc"}"#).await;
        let storage = LockStorage::in_memory().unwrap();

        let deployment = deploy(&storage, &config(Network::Arbitrum, Some(url)), &key(), false)
            .await
            .unwrap();

        let handle = deployment.verification.unwrap();
        assert_eq!(handle.await.unwrap(), Some("abc".to_string()));
    }
}
