//! Construction of the message a signer authorizes for a commitment.
//!
//! The signed digest is built in two hashing steps and must match what
//! wallet clients produce byte for byte:
//!
//! 1. `message_hash = keccak256(commitment ‖ recipient)`, a tight 32 + 20 byte pack.
//! 2. `digest = keccak256("\x19Ethereum Signed Message:\n32" ‖ message_hash)`.

use crate::secp256k1_ops::{keccak256, personal_message_hash, sign_personal_message};
use secretlock_types::{
    Address, Commitment, EcdsaSignature, LockResult, Secp256k1PrivateKey, ADDRESS_SIZE,
    COMMITMENT_MESSAGE_SIZE, COMMITMENT_SIZE,
};

pub fn commitment_message(
    commitment: &Commitment,
    recipient: &Address,
) -> [u8; COMMITMENT_MESSAGE_SIZE] {
    let mut message = [0u8; COMMITMENT_MESSAGE_SIZE];
    message[..COMMITMENT_SIZE].copy_from_slice(commitment.as_bytes());
    message[COMMITMENT_SIZE..COMMITMENT_SIZE + ADDRESS_SIZE].copy_from_slice(recipient.as_bytes());
    message
}

pub fn commitment_message_hash(commitment: &Commitment, recipient: &Address) -> [u8; 32] {
    keccak256(&commitment_message(commitment, recipient))
}

/// The digest the signer's key actually signs.
pub fn commitment_digest(commitment: &Commitment, recipient: &Address) -> [u8; 32] {
    personal_message_hash(&commitment_message_hash(commitment, recipient))
}

/// Client-side signing of a `(commitment, recipient)` pair.
pub fn sign_commitment(
    private_key: &Secp256k1PrivateKey,
    commitment: &Commitment,
    recipient: &Address,
) -> LockResult<EcdsaSignature> {
    sign_personal_message(private_key, &commitment_message_hash(commitment, recipient))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::secp256k1_ops::{derive_address_from_private, generate_private_key, recover_signer};
    use proptest::prelude::*;

    #[test]
    fn test_message_layout() {
        let commitment = Commitment::from_bytes([0xaa; 32]);
        let recipient = Address::from_bytes([0xbb; 20]);
        let message = commitment_message(&commitment, &recipient);

        assert_eq!(message.len(), 52);
        assert!(message[..32].iter().all(|b| *b == 0xaa));
        assert!(message[32..].iter().all(|b| *b == 0xbb));
    }

    #[test]
    fn test_digest_applies_prefix_over_hash() {
        let commitment = Commitment::from_content("QmXnnyufdzQX7iJbf1YQ8tgfXGeQCiHnRx7xNBqYJi9z67");
        let recipient = Address::from_bytes([0x11; 20]);

        let message_hash = commitment_message_hash(&commitment, &recipient);
        let mut prefixed = b"\x19Ethereum Signed Message:\n32".to_vec();
        prefixed.extend_from_slice(&message_hash);

        assert_eq!(commitment_digest(&commitment, &recipient), keccak256(&prefixed));
    }

    #[test]
    fn test_recipient_is_bound() {
        let commitment = Commitment::from_content("bound");
        let a = commitment_digest(&commitment, &Address::from_bytes([1; 20]));
        let b = commitment_digest(&commitment, &Address::from_bytes([2; 20]));
        assert_ne!(a, b);
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(32))]

        #[test]
        fn signed_commitment_recovers_signer(
            commitment in any::<[u8; 32]>(),
            recipient in any::<[u8; 20]>(),
        ) {
            let key = generate_private_key();
            let signer = derive_address_from_private(&key).unwrap();
            let commitment = Commitment::from_bytes(commitment);
            let recipient = Address::from_bytes(recipient);

            let signature = sign_commitment(&key, &commitment, &recipient).unwrap();
            let digest = commitment_digest(&commitment, &recipient);
            prop_assert_eq!(recover_signer(&digest, &signature.to_bytes()).unwrap(), signer);
        }
    }
}
