use secretlock_types::Address;
use std::collections::HashMap;

/// signer -> authorized. Absent entries read as unauthorized; entries are
/// never removed, only toggled.
#[derive(Clone, Debug, Default)]
pub struct SignerRegistry {
    authorized: HashMap<Address, bool>,
}

impl SignerRegistry {
    pub fn new() -> Self {
        Self {
            authorized: HashMap::with_capacity(16),
        }
    }

    pub fn is_authorized(&self, signer: &Address) -> bool {
        self.authorized.get(signer).copied().unwrap_or(false)
    }

    /// Callers must have passed the owner check.
    pub(crate) fn set(&mut self, signer: Address, authorized: bool) {
        self.authorized.insert(signer, authorized);
    }

    pub fn authorized_signers(&self) -> impl Iterator<Item = &Address> {
        self.authorized
            .iter()
            .filter(|(_, authorized)| **authorized)
            .map(|(signer, _)| signer)
    }

    pub fn entries(&self) -> impl Iterator<Item = (&Address, &bool)> {
        self.authorized.iter()
    }

    pub fn len(&self) -> usize {
        self.authorized.len()
    }

    pub fn is_empty(&self) -> bool {
        self.authorized.is_empty()
    }
}
