use crate::lock::SecretLock;
use crate::state::LockState;
use parking_lot::Mutex;
use secretlock_types::{Address, Commitment, LockEvent, LockResult};
use std::sync::Arc;

/// Thread-safe handle that admits calls to one lock in a single total order.
#[derive(Clone)]
pub struct SharedLock {
    inner: Arc<Mutex<SecretLock>>,
}

impl SharedLock {
    pub fn new(lock: SecretLock) -> Self {
        Self {
            inner: Arc::new(Mutex::new(lock)),
        }
    }

    pub fn owner(&self) -> Address {
        self.inner.lock().owner()
    }

    pub fn is_authorized(&self, signer: &Address) -> bool {
        self.inner.lock().is_authorized(signer)
    }

    pub fn is_commitment_used(&self, commitment: &Commitment) -> bool {
        self.inner.lock().is_commitment_used(commitment)
    }

    pub fn add_signer(&self, caller: &Address, signer: Address) -> LockResult<LockEvent> {
        self.inner.lock().add_signer(caller, signer)
    }

    pub fn remove_signer(&self, caller: &Address, signer: Address) -> LockResult<LockEvent> {
        self.inner.lock().remove_signer(caller, signer)
    }

    pub fn verify_commitment(
        &self,
        caller: &Address,
        commitment: Commitment,
        signature: &[u8],
        claimed_signer: &Address,
    ) -> LockResult<LockEvent> {
        self.inner
            .lock()
            .verify_commitment(caller, commitment, signature, claimed_signer)
    }

    pub fn state(&self) -> LockState {
        self.inner.lock().state()
    }

    pub fn drain_events(&self) -> Vec<LockEvent> {
        self.inner.lock().drain_events()
    }
}
