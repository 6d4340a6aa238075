mod types;

pub use types::*;

use secretlock_core::LockState;
use secretlock_types::{Address, Commitment, LockError, LockEvent, LockResult, ADDRESS_SIZE, COMMITMENT_SIZE};
use sled::transaction::{ConflictableTransactionError, TransactionError};
use sled::{Db, IVec, Transactional, Tree};
use tracing::{debug, error, info};

const CURRENT_SCHEMA_VERSION: u32 = 1;
const SCHEMA_KEY: &[u8] = b"__schema_version__";
const OWNER_KEY: &[u8] = b"owner";
const DEPLOYMENT_KEY: &[u8] = b"deployment";
const EVENT_SEQ_KEY: &[u8] = b"event_seq";
const DEPLOY_NONCE_KEY: &[u8] = b"deploy_nonce";

/// Durable state of one lock instance.
///
/// Trees:
/// - `meta`: owner, deployment record, counters, schema version
/// - `signers`: address -> 0/1
/// - `commitments`: commitment -> 1
/// - `events`: big-endian sequence number -> bincode [`StoredEvent`]
pub struct LockStorage {
    db: Db,
    meta: Tree,
    signers: Tree,
    commitments: Tree,
    events: Tree,
}

impl LockStorage {
    pub fn open(config: &StorageConfig) -> LockResult<Self> {
        info!("Opening storage at {:?}", config.path);

        let db = sled::Config::new()
            .path(&config.path)
            .cache_capacity(config.cache_capacity_bytes)
            .flush_every_ms(config.flush_every_ms)
            .open()
            .map_err(|e| LockError::Storage(format!("Failed to open database: {}", e)))?;

        Self::from_db(db)
    }

    pub fn in_memory() -> LockResult<Self> {
        let db = sled::Config::new()
            .temporary(true)
            .open()
            .map_err(|e| LockError::Storage(format!("Failed to open temp database: {}", e)))?;

        Self::from_db(db)
    }

    fn from_db(db: Db) -> LockResult<Self> {
        let storage = Self {
            meta: Self::open_tree(&db, "meta")?,
            signers: Self::open_tree(&db, "signers")?,
            commitments: Self::open_tree(&db, "commitments")?,
            events: Self::open_tree(&db, "events")?,
            db,
        };
        storage.ensure_schema()?;
        Ok(storage)
    }

    fn open_tree(db: &Db, name: &str) -> LockResult<Tree> {
        db.open_tree(name)
            .map_err(|e| LockError::Storage(format!("Failed to open {} tree: {}", name, e)))
    }

    fn ensure_schema(&self) -> LockResult<()> {
        match self.meta.get(SCHEMA_KEY).map_err(storage_err)? {
            Some(bytes) => {
                let version = u32::from_be_bytes(
                    bytes
                        .as_ref()
                        .try_into()
                        .map_err(|_| LockError::Storage("Corrupt schema version".into()))?,
                );
                if version > CURRENT_SCHEMA_VERSION {
                    return Err(LockError::Storage(format!(
                        "Database schema {} is newer than supported {}",
                        version, CURRENT_SCHEMA_VERSION
                    )));
                }
            }
            None => {
                self.meta
                    .insert(SCHEMA_KEY, &CURRENT_SCHEMA_VERSION.to_be_bytes()[..])
                    .map_err(storage_err)?;
            }
        }
        Ok(())
    }

    pub fn is_deployed(&self) -> LockResult<bool> {
        self.meta.contains_key(OWNER_KEY).map_err(storage_err)
    }

    pub fn deployment(&self) -> LockResult<Option<DeploymentRecord>> {
        match self.meta.get(DEPLOYMENT_KEY).map_err(storage_err)? {
            Some(bytes) => Ok(Some(bincode::deserialize(&bytes).map_err(|e| {
                LockError::Serialization(format!("Failed to decode deployment: {}", e))
            })?)),
            None => Ok(None),
        }
    }

    /// Number of deployments previously written to this store.
    pub fn deploy_nonce(&self) -> LockResult<u64> {
        Ok(self
            .meta
            .get(DEPLOY_NONCE_KEY)
            .map_err(storage_err)?
            .map(|v| decode_u64(&v))
            .unwrap_or(0))
    }

    /// Writes a freshly initialized lock. With `force`, any previous instance
    /// in this store is discarded first.
    ///
    /// The wipe and the new writes commit in one transaction, so a failure
    /// leaves either the old instance intact or the new one complete.
    pub fn initialize(
        &self,
        state: &LockState,
        record: &DeploymentRecord,
        force: bool,
    ) -> LockResult<()> {
        if let Some(existing) = self.deployment()? {
            if !force {
                return Err(LockError::AlreadyDeployed(existing.address));
            }
            info!(previous = %existing.address, "Discarding previous deployment");
        }

        let encoded = bincode::serialize(record)
            .map_err(|e| LockError::Serialization(format!("Failed to encode deployment: {}", e)))?;
        let stale_signers = tree_keys(&self.signers)?;
        let stale_commitments = tree_keys(&self.commitments)?;
        let stale_events = tree_keys(&self.events)?;

        let result: Result<(), TransactionError<LockError>> =
            (&self.meta, &self.signers, &self.commitments, &self.events).transaction(
                |(meta, signers, commitments, events)| {
                    for key in &stale_signers {
                        signers.remove(&key[..])?;
                    }
                    for key in &stale_commitments {
                        commitments.remove(&key[..])?;
                    }
                    for key in &stale_events {
                        events.remove(&key[..])?;
                    }
                    meta.remove(EVENT_SEQ_KEY)?;

                    for (signer, authorized) in &state.signers {
                        signers.insert(&signer.0[..], &[*authorized as u8][..])?;
                    }
                    for commitment in &state.used_commitments {
                        commitments.insert(&commitment.0[..], &[1u8][..])?;
                    }

                    meta.insert(DEPLOYMENT_KEY, encoded.clone())?;
                    meta.insert(DEPLOY_NONCE_KEY, &(record.nonce + 1).to_be_bytes()[..])?;
                    meta.insert(OWNER_KEY, &state.owner.0[..])?;
                    Ok(())
                },
            );
        result.map_err(transaction_err)?;

        after_commit((), self.flush(), "deployment");
        debug!(address = %record.address, "Stored deployment");
        Ok(())
    }

    pub fn load_state(&self) -> LockResult<LockState> {
        let owner = self
            .meta
            .get(OWNER_KEY)
            .map_err(storage_err)?
            .ok_or_else(|| LockError::NotDeployed("this data directory".into()))?;
        let mut state = LockState::new(decode_address(&owner)?);

        for entry in self.signers.iter() {
            let (key, value) = entry.map_err(storage_err)?;
            let authorized = value.first().copied().unwrap_or(0) == 1;
            state.signers.push((decode_address(&key)?, authorized));
        }

        for entry in self.commitments.iter() {
            let (key, _) = entry.map_err(storage_err)?;
            state.used_commitments.push(decode_commitment(&key)?);
        }

        Ok(state)
    }

    /// Applies the state change an event describes and appends the event to
    /// the log, in one transaction.
    pub fn record_event(&self, event: &LockEvent) -> LockResult<u64> {
        let recorded_at = chrono::Utc::now().timestamp();

        let result = (&self.meta, &self.signers, &self.commitments, &self.events).transaction(
            |(meta, signers, commitments, events)| {
                match event {
                    LockEvent::SignerUpdated { signer, authorized } => {
                        signers.insert(&signer.0[..], &[*authorized as u8][..])?;
                    }
                    LockEvent::CommitmentVerified { commitment, .. } => {
                        if commitments.get(&commitment.0[..])?.is_some() {
                            return Err(ConflictableTransactionError::Abort(
                                LockError::CommitmentAlreadyUsed(*commitment),
                            ));
                        }
                        commitments.insert(&commitment.0[..], &[1u8][..])?;
                    }
                }

                let seq = meta
                    .get(EVENT_SEQ_KEY)?
                    .map(|v| decode_u64(&v))
                    .unwrap_or(0)
                    + 1;
                meta.insert(EVENT_SEQ_KEY, &seq.to_be_bytes()[..])?;

                let stored = StoredEvent {
                    seq,
                    recorded_at,
                    event: event.clone(),
                };
                let encoded = bincode::serialize(&stored).map_err(|e| {
                    ConflictableTransactionError::Abort(LockError::Serialization(e.to_string()))
                })?;
                events.insert(&seq.to_be_bytes()[..], encoded)?;

                Ok(seq)
            },
        );

        let seq = result.map_err(transaction_err)?;

        let seq = after_commit(seq, self.flush(), "event");
        debug!(seq, event = event.name(), "Recorded event");
        Ok(seq)
    }

    /// The most recent `limit` events, oldest first.
    pub fn load_events(&self, limit: usize) -> LockResult<Vec<StoredEvent>> {
        let mut results = Vec::with_capacity(limit.min(1024));

        for entry in self.events.iter().rev().take(limit) {
            let (_, value) = entry.map_err(storage_err)?;
            let stored: StoredEvent = bincode::deserialize(&value)
                .map_err(|e| LockError::Serialization(format!("Failed to decode event: {}", e)))?;
            results.push(stored);
        }

        results.reverse();
        Ok(results)
    }

    pub fn event_count(&self) -> usize {
        self.events.len()
    }

    pub fn flush(&self) -> LockResult<()> {
        self.db
            .flush()
            .map_err(|e| LockError::Storage(format!("Flush error: {}", e)))?;
        Ok(())
    }
}

fn storage_err(e: sled::Error) -> LockError {
    LockError::Storage(e.to_string())
}

fn transaction_err(e: TransactionError<LockError>) -> LockError {
    match e {
        TransactionError::Abort(err) => err,
        TransactionError::Storage(err) => LockError::Storage(err.to_string()),
    }
}

/// Resolves a write whose transaction has already committed. A failed flush
/// only delays durability until sled's periodic flush, so the caller still
/// sees the committed result.
fn after_commit<T>(value: T, flushed: LockResult<()>, what: &str) -> T {
    if let Err(e) = flushed {
        error!(error = %e, "Flush after committed {} failed", what);
    }
    value
}

fn tree_keys(tree: &Tree) -> LockResult<Vec<IVec>> {
    tree.iter().keys().collect::<Result<_, _>>().map_err(storage_err)
}

fn decode_u64(bytes: &IVec) -> u64 {
    bytes
        .as_ref()
        .try_into()
        .map(u64::from_be_bytes)
        .unwrap_or(0)
}

fn decode_address(bytes: &IVec) -> LockResult<Address> {
    let arr: [u8; ADDRESS_SIZE] = bytes
        .as_ref()
        .try_into()
        .map_err(|_| LockError::Storage("Invalid address key".into()))?;
    Ok(Address::from_bytes(arr))
}

fn decode_commitment(bytes: &IVec) -> LockResult<Commitment> {
    let arr: [u8; COMMITMENT_SIZE] = bytes
        .as_ref()
        .try_into()
        .map_err(|_| LockError::Storage("Invalid commitment key".into()))?;
    Ok(Commitment::from_bytes(arr))
}
