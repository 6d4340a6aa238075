use secretlock_types::{Address, LockError, LockResult};
use tracing::warn;

/// Holds the single owner identity, fixed at construction.
#[derive(Clone, Debug)]
pub struct AccessController {
    owner: Address,
}

impl AccessController {
    pub fn new(owner: Address) -> Self {
        Self { owner }
    }

    pub fn owner(&self) -> Address {
        self.owner
    }

    pub fn require_owner(&self, caller: &Address) -> LockResult<()> {
        if *caller != self.owner {
            warn!(%caller, "Rejected owner-only call");
            return Err(LockError::Unauthorized(*caller));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_require_owner() {
        let owner = Address::from_bytes([1; 20]);
        let other = Address::from_bytes([2; 20]);
        let access = AccessController::new(owner);

        assert_eq!(access.owner(), owner);
        assert!(access.require_owner(&owner).is_ok());
        assert_eq!(
            access.require_owner(&other),
            Err(LockError::Unauthorized(other))
        );
    }
}
