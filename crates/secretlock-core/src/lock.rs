use crate::access::AccessController;
use crate::ledger::CommitmentLedger;
use crate::registry::SignerRegistry;
use crate::state::LockState;
use secretlock_crypto::{commitment_digest, recover_signer};
use secretlock_types::{Address, Commitment, LockError, LockEvent, LockResult};
use tracing::{debug, info, warn};

/// A single lock instance: owner gate, signer registry, commitment ledger and
/// the notification list of everything that succeeded.
///
/// Mutators take `&mut self`, so calls on one instance are strictly
/// serialized. Every call either applies all of its effects or returns an
/// error having changed nothing.
#[derive(Clone, Debug)]
pub struct SecretLock {
    access: AccessController,
    signers: SignerRegistry,
    ledger: CommitmentLedger,
    events: Vec<LockEvent>,
}

impl SecretLock {
    /// Initializes a lock owned by `caller`.
    pub fn new(caller: Address) -> Self {
        info!(owner = %caller, "Initialized lock");
        Self {
            access: AccessController::new(caller),
            signers: SignerRegistry::new(),
            ledger: CommitmentLedger::new(),
            events: Vec::new(),
        }
    }

    /// Restores a lock from a snapshot. No events are replayed.
    pub fn from_state(state: LockState) -> Self {
        let mut signers = SignerRegistry::new();
        for (signer, authorized) in state.signers {
            signers.set(signer, authorized);
        }

        let mut ledger = CommitmentLedger::new();
        for commitment in state.used_commitments {
            // duplicates in a snapshot are harmless
            let _ = ledger.mark_used(commitment);
        }

        Self {
            access: AccessController::new(state.owner),
            signers,
            ledger,
            events: Vec::new(),
        }
    }

    pub fn state(&self) -> LockState {
        let mut state = LockState {
            owner: self.access.owner(),
            signers: self.signers.entries().map(|(s, a)| (*s, *a)).collect(),
            used_commitments: self.ledger.iter().copied().collect(),
        };
        state.normalize();
        state
    }

    pub fn owner(&self) -> Address {
        self.access.owner()
    }

    pub fn is_authorized(&self, signer: &Address) -> bool {
        self.signers.is_authorized(signer)
    }

    pub fn is_commitment_used(&self, commitment: &Commitment) -> bool {
        self.ledger.is_used(commitment)
    }

    pub fn signers(&self) -> &SignerRegistry {
        &self.signers
    }

    pub fn ledger(&self) -> &CommitmentLedger {
        &self.ledger
    }

    pub fn add_signer(&mut self, caller: &Address, signer: Address) -> LockResult<LockEvent> {
        self.update_signer(caller, signer, true)
    }

    pub fn remove_signer(&mut self, caller: &Address, signer: Address) -> LockResult<LockEvent> {
        self.update_signer(caller, signer, false)
    }

    fn update_signer(
        &mut self,
        caller: &Address,
        signer: Address,
        authorized: bool,
    ) -> LockResult<LockEvent> {
        self.access.require_owner(caller)?;

        self.signers.set(signer, authorized);
        debug!(%signer, authorized, "Signer updated");

        Ok(self.emit(LockEvent::SignerUpdated { signer, authorized }))
    }

    /// Runs every check of [`verify_commitment`](Self::verify_commitment)
    /// without consuming the commitment.
    pub fn check_commitment(
        &self,
        caller: &Address,
        commitment: &Commitment,
        signature: &[u8],
        claimed_signer: &Address,
    ) -> LockResult<()> {
        let digest = commitment_digest(commitment, caller);

        let recovered = recover_signer(&digest, signature).map_err(|e| {
            warn!(recipient = %caller, %commitment, error = %e, "Rejected malformed signature");
            e
        })?;

        if recovered != *claimed_signer {
            warn!(%recovered, claimed = %claimed_signer, "Recovered signer does not match claim");
            return Err(LockError::InvalidSigner);
        }

        if !self.signers.is_authorized(claimed_signer) {
            warn!(signer = %claimed_signer, "Signer is not authorized");
            return Err(LockError::InvalidSigner);
        }

        if self.ledger.is_used(commitment) {
            warn!(%commitment, "Commitment replayed");
            return Err(LockError::CommitmentAlreadyUsed(*commitment));
        }

        Ok(())
    }

    /// Accepts `commitment` for `caller` (the recipient) if `signature` is an
    /// authorized `claimed_signer`'s signature over `(commitment, caller)`.
    ///
    /// Signature and signer checks run before the replay check, so a replay
    /// of a valid submission fails with `CommitmentAlreadyUsed` and a bad
    /// signature on a fresh commitment fails for the signature.
    pub fn verify_commitment(
        &mut self,
        caller: &Address,
        commitment: Commitment,
        signature: &[u8],
        claimed_signer: &Address,
    ) -> LockResult<LockEvent> {
        self.check_commitment(caller, &commitment, signature, claimed_signer)?;
        self.ledger.mark_used(commitment)?;

        info!(recipient = %caller, %commitment, signer = %claimed_signer, "Commitment verified");

        Ok(self.emit(LockEvent::CommitmentVerified {
            recipient: *caller,
            commitment,
        }))
    }

    fn emit(&mut self, event: LockEvent) -> LockEvent {
        self.events.push(event.clone());
        event
    }

    pub fn events(&self) -> &[LockEvent] {
        &self.events
    }

    pub fn drain_events(&mut self) -> Vec<LockEvent> {
        std::mem::take(&mut self.events)
    }
}
