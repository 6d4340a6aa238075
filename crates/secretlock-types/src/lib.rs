#![forbid(unsafe_code)]
#![warn(clippy::all)]

pub mod address;
pub mod constants;
pub mod crypto;
pub mod error;
pub mod event;

pub use address::*;
pub use constants::*;
pub use crypto::*;
pub use error::*;
pub use event::*;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_address_hex_roundtrip() {
        let addr = Address::from_hex("0x7E5F4552091A69125d5DfCb7b8C2659029395Bdf").unwrap();
        assert_eq!(addr.to_hex(), "0x7e5f4552091a69125d5dfcb7b8c2659029395bdf");
        assert_eq!(Address::from_hex(&addr.to_hex()).unwrap(), addr);
    }

    #[test]
    fn test_address_checksum() {
        // EIP-55 reference vectors
        for expected in [
            "0x5aAeb6053F3E94C9b9A09f33669435E7Ef1BeAed",
            "0xfB6916095ca1df60bB79Ce92cE3Ea74c37c5d359",
            "0xdbF03B407c01E7cD3CBea99509d93f8DDDC8C6FB",
            "0xD1220A0cf47c7B9Be7A2E6BA89F429762e7b9aDb",
        ] {
            let addr = Address::from_hex(expected).unwrap();
            assert_eq!(addr.to_checksum(), expected);
        }
    }

    #[test]
    fn test_address_rejects_bad_length() {
        assert!(matches!(
            Address::from_hex("0x1234"),
            Err(LockError::InvalidAddress(_))
        ));
        assert!(Address::from_hex("0xzz5F4552091A69125d5DfCb7b8C2659029395Bdf").is_err());
    }

    #[test]
    fn test_commitment_from_content() {
        let commitment = Commitment::from_content("QmXnnyufdzQX7iJbf1YQ8tgfXGeQCiHnRx7xNBqYJi9z67");
        assert_eq!(commitment.to_hex().len(), 66);
        assert_eq!(
            commitment,
            Commitment::from_content("QmXnnyufdzQX7iJbf1YQ8tgfXGeQCiHnRx7xNBqYJi9z67")
        );
        assert_ne!(commitment, Commitment::from_content("QmOther"));
    }

    #[test]
    fn test_commitment_keccak_of_empty() {
        let commitment = Commitment::from_content("");
        assert_eq!(
            commitment.to_hex(),
            "0xc5d2460186f7233c927e7db2dcc703c0e500b653ca82273b7bfad8045d85a470"
        );
    }

    #[test]
    fn test_commitment_rejects_malformed_hex() {
        assert!(matches!(
            Commitment::from_hex("0x1234"),
            Err(LockError::InvalidCommitment(_))
        ));
        assert!(matches!(
            Commitment::from_hex("not hex at all"),
            Err(LockError::InvalidCommitment(_))
        ));

        let commitment = Commitment::from_content("roundtrip");
        assert_eq!(Commitment::from_hex(&commitment.to_hex()).unwrap(), commitment);
    }

    #[test]
    fn test_signature_bytes() {
        let sig = EcdsaSignature::new([1u8; 32], [2u8; 32], 27);
        let bytes = sig.to_bytes();
        assert_eq!(bytes.len(), ECDSA_SIGNATURE_SIZE);
        assert_eq!(bytes[64], 27);

        let parsed = EcdsaSignature::from_slice(&bytes).unwrap();
        assert_eq!(parsed, sig);
        assert!(matches!(
            EcdsaSignature::from_slice(&bytes[..64]),
            Err(LockError::InvalidSignature(_))
        ));
    }

    #[test]
    fn test_private_key_debug_redacted() {
        let key = Secp256k1PrivateKey::from_bytes([7u8; 32]);
        assert_eq!(format!("{:?}", key), "Secp256k1PrivateKey([REDACTED])");
    }

    #[test]
    fn test_event_display() {
        let event = LockEvent::SignerUpdated {
            signer: Address::zero(),
            authorized: true,
        };
        assert!(event.to_string().starts_with("SignerUpdated("));
        assert_eq!(event.name(), "SignerUpdated");
    }
}
