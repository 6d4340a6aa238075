use crate::address::Address;
use crate::crypto::Commitment;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LockError {
    /// Caller is not the owner on an owner-gated operation.
    #[error("Unauthorized account: {0}")]
    Unauthorized(Address),

    /// Signature bytes failed structural or cryptographic recovery.
    #[error("Invalid signature: {0}")]
    InvalidSignature(String),

    /// Recovered signer does not match the claim, or the claimed signer is not authorized.
    #[error("Invalid signer")]
    InvalidSigner,

    #[error("Commitment already used: {0}")]
    CommitmentAlreadyUsed(Commitment),

    #[error("Invalid address: {0}")]
    InvalidAddress(String),

    #[error("Invalid commitment: {0}")]
    InvalidCommitment(String),

    #[error("Invalid key format: {0}")]
    InvalidKey(String),

    #[error("Cryptographic error: {0}")]
    Crypto(String),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Lock already deployed at {0}")]
    AlreadyDeployed(Address),

    #[error("No lock deployed in {0}")]
    NotDeployed(String),
}

pub type LockResult<T> = Result<T, LockError>;
