use secretlock_types::{Address, Commitment};
use serde::{Deserialize, Serialize};

/// Serializable snapshot of a lock, sorted so equal locks produce equal snapshots.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LockState {
    pub owner: Address,
    pub signers: Vec<(Address, bool)>,
    pub used_commitments: Vec<Commitment>,
}

impl LockState {
    pub fn new(owner: Address) -> Self {
        Self {
            owner,
            signers: Vec::new(),
            used_commitments: Vec::new(),
        }
    }

    pub(crate) fn normalize(&mut self) {
        self.signers.sort_by(|a, b| a.0.cmp(&b.0));
        self.signers.dedup_by(|a, b| a.0 == b.0);
        self.used_commitments.sort();
        self.used_commitments.dedup();
    }
}
