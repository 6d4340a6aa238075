use crate::address::Address;
use crate::crypto::Commitment;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Notification emitted by a lock on a successful mutation.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum LockEvent {
    SignerUpdated { signer: Address, authorized: bool },
    CommitmentVerified { recipient: Address, commitment: Commitment },
}

impl LockEvent {
    pub fn name(&self) -> &'static str {
        match self {
            LockEvent::SignerUpdated { .. } => "SignerUpdated",
            LockEvent::CommitmentVerified { .. } => "CommitmentVerified",
        }
    }
}

impl fmt::Display for LockEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LockEvent::SignerUpdated { signer, authorized } => {
                write!(f, "SignerUpdated({}, {})", signer, authorized)
            }
            LockEvent::CommitmentVerified { recipient, commitment } => {
                write!(f, "CommitmentVerified({}, {})", recipient, commitment)
            }
        }
    }
}
