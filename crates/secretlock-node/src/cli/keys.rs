use super::commands::{Cli, OutputFormat};
use super::utils::{caller_key, emit};
use secretlock_crypto::{
    commitment_message_hash, derive_address_from_private, generate_private_key, sign_commitment,
};
use secretlock_types::{Address, Commitment, LockResult};

pub fn show_address(cli: &Cli) -> LockResult<()> {
    let address = derive_address_from_private(&caller_key(cli)?)?;

    emit(
        cli.format,
        serde_json::json!({ "address": address.to_checksum() }),
        || println!("{}", address),
    )
}

pub fn keygen(format: OutputFormat) -> LockResult<()> {
    let key = generate_private_key();
    let address = derive_address_from_private(&key)?;
    let key_hex = format!("0x{}", key.to_hex());

    emit(
        format,
        serde_json::json!({ "address": address.to_checksum(), "private_key": key_hex }),
        || {
            println!("Address:     {}", address);
            println!("Private key: {}", key_hex);
            println!();
            println!("\x1b[38;5;196mStore the private key securely. It cannot be recovered.\x1b[0m");
        },
    )
}

pub fn sign(cli: &Cli, commitment: &str, recipient: &str) -> LockResult<()> {
    let key = caller_key(cli)?;
    let signer = derive_address_from_private(&key)?;
    let commitment = Commitment::from_hex(commitment)?;
    let recipient = Address::from_hex(recipient)?;
    let signature = sign_commitment(&key, &commitment, &recipient)?;

    emit(
        cli.format,
        serde_json::json!({
            "signer": signer.to_checksum(),
            "recipient": recipient.to_checksum(),
            "commitment": commitment.to_hex(),
            "message_hash": format!("0x{}", hex::encode(commitment_message_hash(&commitment, &recipient))),
            "signature": signature.to_hex(),
        }),
        || println!("{}", signature.to_hex()),
    )
}

pub fn commitment(content: &str, format: OutputFormat) -> LockResult<()> {
    let commitment = Commitment::from_content(content);

    emit(
        format,
        serde_json::json!({ "content": content, "commitment": commitment.to_hex() }),
        || println!("{}", commitment.to_hex()),
    )
}
