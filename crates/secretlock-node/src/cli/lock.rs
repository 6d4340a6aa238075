use super::commands::{Cli, OutputFormat};
use super::utils::{caller_address, emit, ok_mark, open_service};
use secretlock_node::NodeConfig;
use secretlock_types::{Address, Commitment, LockEvent, LockResult};

pub fn show_owner(config: &NodeConfig, format: OutputFormat) -> LockResult<()> {
    let service = open_service(config)?;
    let deployment = service.deployment();

    emit(
        format,
        serde_json::json!({
            "owner": service.owner().to_checksum(),
            "address": deployment.address.to_checksum(),
            "network": deployment.network.to_string(),
            "chain_id": deployment.chain_id,
            "deployed_at": deployment.deployed_at.to_rfc3339(),
        }),
        || {
            println!("Owner:       {}", service.owner());
            println!("Lock:        {}", deployment.address);
            println!("Network:     {} (chain {})", deployment.network, deployment.chain_id);
            println!("Deployed at: {}", deployment.deployed_at.to_rfc3339());
        },
    )
}

pub fn set_signer(
    cli: &Cli,
    config: &NodeConfig,
    signer: &str,
    authorized: bool,
) -> LockResult<()> {
    let caller = caller_address(cli)?;
    let signer = Address::from_hex(signer)?;
    let mut service = open_service(config)?;

    let event = if authorized {
        service.add_signer(&caller, signer)?
    } else {
        service.remove_signer(&caller, signer)?
    };

    emit(cli.format, event_json(&event), || ok_mark(&event))
}

pub fn is_authorized(config: &NodeConfig, signer: &str, format: OutputFormat) -> LockResult<()> {
    let signer = Address::from_hex(signer)?;
    let authorized = open_service(config)?.is_authorized(&signer);

    emit(
        format,
        serde_json::json!({ "signer": signer.to_checksum(), "authorized": authorized }),
        || println!("{}", authorized),
    )
}

pub fn is_used(config: &NodeConfig, commitment: &str, format: OutputFormat) -> LockResult<()> {
    let commitment = Commitment::from_hex(commitment)?;
    let used = open_service(config)?.is_commitment_used(&commitment);

    emit(
        format,
        serde_json::json!({ "commitment": commitment.to_hex(), "used": used }),
        || println!("{}", used),
    )
}

pub fn verify(
    cli: &Cli,
    config: &NodeConfig,
    commitment: &str,
    signature: &str,
    signer: &str,
) -> LockResult<()> {
    let caller = caller_address(cli)?;
    let commitment = Commitment::from_hex(commitment)?;
    let claimed = Address::from_hex(signer)?;
    let signature = hex::decode(signature.trim_start_matches("0x")).map_err(|e| {
        secretlock_types::LockError::InvalidSignature(format!("Signature is not hex: {}", e))
    })?;

    let mut service = open_service(config)?;
    let event = service.verify_commitment(&caller, commitment, &signature, &claimed)?;

    emit(cli.format, event_json(&event), || ok_mark(&event))
}

pub fn show_events(config: &NodeConfig, limit: usize, format: OutputFormat) -> LockResult<()> {
    let events = open_service(config)?.events(limit)?;

    let json: Vec<_> = events
        .iter()
        .map(|stored| {
            let mut value = event_json(&stored.event);
            value["seq"] = stored.seq.into();
            value["recorded_at"] = stored.recorded_at.into();
            value
        })
        .collect();

    emit(format, serde_json::Value::Array(json), || {
        if events.is_empty() {
            println!("\x1b[38;5;245mNo events recorded\x1b[0m");
        }
        for stored in &events {
            let when = chrono::DateTime::from_timestamp(stored.recorded_at, 0)
                .map(|t| t.to_rfc3339())
                .unwrap_or_default();
            println!("#{:<5} {}  {}", stored.seq, when, stored.event);
        }
    })
}

fn event_json(event: &LockEvent) -> serde_json::Value {
    match event {
        LockEvent::SignerUpdated { signer, authorized } => serde_json::json!({
            "event": event.name(),
            "signer": signer.to_checksum(),
            "authorized": authorized,
        }),
        LockEvent::CommitmentVerified { recipient, commitment } => serde_json::json!({
            "event": event.name(),
            "recipient": recipient.to_checksum(),
            "commitment": commitment.to_hex(),
        }),
    }
}
