use secretlock_types::{Commitment, LockError, LockResult};
use std::collections::HashSet;

/// Set of consumed commitments. Membership is one-way.
#[derive(Clone, Debug, Default)]
pub struct CommitmentLedger {
    used: HashSet<Commitment>,
}

impl CommitmentLedger {
    pub fn new() -> Self {
        Self {
            used: HashSet::with_capacity(1024),
        }
    }

    pub fn is_used(&self, commitment: &Commitment) -> bool {
        self.used.contains(commitment)
    }

    pub(crate) fn mark_used(&mut self, commitment: Commitment) -> LockResult<()> {
        if !self.used.insert(commitment) {
            return Err(LockError::CommitmentAlreadyUsed(commitment));
        }
        Ok(())
    }

    pub fn iter(&self) -> impl Iterator<Item = &Commitment> {
        self.used.iter()
    }

    pub fn len(&self) -> usize {
        self.used.len()
    }

    pub fn is_empty(&self) -> bool {
        self.used.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mark_used_once() {
        let mut ledger = CommitmentLedger::new();
        let commitment = Commitment::from_content("once");

        assert!(!ledger.is_used(&commitment));
        ledger.mark_used(commitment).unwrap();
        assert!(ledger.is_used(&commitment));

        assert_eq!(
            ledger.mark_used(commitment),
            Err(LockError::CommitmentAlreadyUsed(commitment))
        );
        assert!(ledger.is_used(&commitment));
        assert_eq!(ledger.len(), 1);
    }
}
