#![forbid(unsafe_code)]
#![warn(clippy::all)]

//! Commitment verification lock.
//!
//! An owner maintains a set of authorized signers. Anyone may present a
//! commitment together with a signature over `(commitment, caller)` from one
//! of those signers; the lock accepts each commitment at most once.

pub mod access;
pub mod ledger;
pub mod lock;
pub mod registry;
pub mod shared;
pub mod state;

pub use access::AccessController;
pub use ledger::CommitmentLedger;
pub use lock::SecretLock;
pub use registry::SignerRegistry;
pub use shared::SharedLock;
pub use state::LockState;
