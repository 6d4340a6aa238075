use crate::storage::{DeploymentRecord, LockStorage, StoredEvent};
use secretlock_core::SecretLock;
use secretlock_types::{Address, Commitment, LockError, LockEvent, LockResult};
use tracing::{error, info};

/// A deployed lock bound to its durable store.
///
/// Each mutation runs against the in-memory lock first and is then written
/// to storage in a single transaction. If the write fails, the in-memory
/// lock is reloaded from storage so the two never diverge.
pub struct LockService {
    lock: SecretLock,
    storage: LockStorage,
    deployment: DeploymentRecord,
}

impl LockService {
    pub fn open(storage: LockStorage) -> LockResult<Self> {
        let deployment = storage
            .deployment()?
            .ok_or_else(|| LockError::NotDeployed("this data directory".into()))?;
        let lock = SecretLock::from_state(storage.load_state()?);

        info!(address = %deployment.address, network = %deployment.network, "Loaded lock");
        Ok(Self {
            lock,
            storage,
            deployment,
        })
    }

    pub fn deployment(&self) -> &DeploymentRecord {
        &self.deployment
    }

    pub fn owner(&self) -> Address {
        self.lock.owner()
    }

    pub fn is_authorized(&self, signer: &Address) -> bool {
        self.lock.is_authorized(signer)
    }

    pub fn is_commitment_used(&self, commitment: &Commitment) -> bool {
        self.lock.is_commitment_used(commitment)
    }

    pub fn add_signer(&mut self, caller: &Address, signer: Address) -> LockResult<LockEvent> {
        let result = self.lock.add_signer(caller, signer);
        self.persist(result)
    }

    pub fn remove_signer(&mut self, caller: &Address, signer: Address) -> LockResult<LockEvent> {
        let result = self.lock.remove_signer(caller, signer);
        self.persist(result)
    }

    pub fn verify_commitment(
        &mut self,
        caller: &Address,
        commitment: Commitment,
        signature: &[u8],
        claimed_signer: &Address,
    ) -> LockResult<LockEvent> {
        let result = self
            .lock
            .verify_commitment(caller, commitment, signature, claimed_signer);
        self.persist(result)
    }

    pub fn events(&self, limit: usize) -> LockResult<Vec<StoredEvent>> {
        self.storage.load_events(limit)
    }

    fn persist(&mut self, result: LockResult<LockEvent>) -> LockResult<LockEvent> {
        let event = result?;
        self.lock.drain_events();

        if let Err(e) = self.storage.record_event(&event) {
            error!(error = %e, "Failed to persist {}, reloading lock from storage", event.name());
            self.lock = SecretLock::from_state(self.storage.load_state()?);
            return Err(e);
        }

        Ok(event)
    }
}
