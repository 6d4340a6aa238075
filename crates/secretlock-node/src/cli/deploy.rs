use super::commands::Cli;
use super::utils::{caller_key, emit, ok_mark, open_storage};
use secretlock_node::NodeConfig;
use secretlock_types::LockResult;
use tracing::info;

pub async fn handle_deploy(cli: &Cli, config: &NodeConfig, force: bool, no_wait: bool) -> LockResult<()> {
    let key = caller_key(cli)?;
    let storage = open_storage(config)?;

    let deployment = secretlock_node::deploy(&storage, config, &key, force).await?;
    let record = &deployment.record;

    emit(
        cli.format,
        serde_json::json!({
            "address": record.address.to_checksum(),
            "owner": record.owner.to_checksum(),
            "network": record.network.to_string(),
            "chain_id": record.chain_id,
            "nonce": record.nonce,
            "verification_scheduled": deployment.verification.is_some(),
        }),
        || {
            ok_mark(format!("SecretLock deployed to {}", record.address));
            println!("    Owner:   {}", record.owner);
            println!("    Network: {} (chain {})", record.network, record.chain_id);
        },
    )?;

    if let Some(handle) = deployment.verification {
        if no_wait {
            info!("Not waiting for source verification");
            handle.abort();
        } else {
            // Errors were already logged by the verification task.
            let _ = handle.await;
        }
    }

    Ok(())
}
