use secp256k1::ecdsa::{RecoverableSignature, RecoveryId};
use secp256k1::{Message, PublicKey, Secp256k1, SecretKey};
use secretlock_types::{
    Address, EcdsaSignature, LockError, LockResult, Secp256k1PrivateKey, Secp256k1PublicKey,
    ADDRESS_SIZE, KECCAK256_SIZE, PERSONAL_MESSAGE_PREFIX, SECP256K1_HALF_ORDER, SECP256K1_ORDER,
    SECP256K1_PRIVATE_KEY_SIZE, SECP256K1_PUBLIC_KEY_UNCOMPRESSED_SIZE,
};
use sha3::{Digest, Keccak256};

thread_local! {
    static SECP256K1_CTX: Secp256k1<secp256k1::All> = Secp256k1::new();
}

pub fn generate_private_key() -> Secp256k1PrivateKey {
    loop {
        let bytes = crate::random_bytes::<SECP256K1_PRIVATE_KEY_SIZE>();
        if validate_private_key(&bytes) {
            return Secp256k1PrivateKey::from_bytes(bytes);
        }
    }
}

pub fn derive_public_key(private_key: &Secp256k1PrivateKey) -> LockResult<Secp256k1PublicKey> {
    SECP256K1_CTX.with(|ctx| {
        let secret = SecretKey::from_slice(&private_key.0)
            .map_err(|e| LockError::InvalidKey(e.to_string()))?;
        let public = PublicKey::from_secret_key(ctx, &secret);
        Ok(Secp256k1PublicKey::from_bytes(public.serialize()))
    })
}

fn address_of(public: &PublicKey) -> Address {
    let uncompressed: [u8; SECP256K1_PUBLIC_KEY_UNCOMPRESSED_SIZE] = public.serialize_uncompressed();
    let hash = Keccak256::digest(&uncompressed[1..]);

    let mut address = [0u8; ADDRESS_SIZE];
    address.copy_from_slice(&hash[12..]);
    Address::from_bytes(address)
}

pub fn derive_address(public_key: &Secp256k1PublicKey) -> LockResult<Address> {
    let pubkey = PublicKey::from_slice(&public_key.0)
        .map_err(|e| LockError::InvalidKey(e.to_string()))?;
    Ok(address_of(&pubkey))
}

pub fn derive_address_from_private(private_key: &Secp256k1PrivateKey) -> LockResult<Address> {
    let public_key = derive_public_key(private_key)?;
    derive_address(&public_key)
}

pub fn keccak256(data: &[u8]) -> [u8; KECCAK256_SIZE] {
    Keccak256::digest(data).into()
}

/// `keccak256("\x19Ethereum Signed Message:\n" ‖ len ‖ message)`
pub fn personal_message_hash(message: &[u8]) -> [u8; KECCAK256_SIZE] {
    let prefix = format!("{}{}", PERSONAL_MESSAGE_PREFIX, message.len());
    let mut hasher = Keccak256::new();
    hasher.update(prefix.as_bytes());
    hasher.update(message);
    hasher.finalize().into()
}

pub fn sign_digest(
    private_key: &Secp256k1PrivateKey,
    digest: &[u8; 32],
) -> LockResult<EcdsaSignature> {
    SECP256K1_CTX.with(|ctx| {
        let secret = SecretKey::from_slice(&private_key.0)
            .map_err(|e| LockError::InvalidKey(e.to_string()))?;
        let message = Message::from_digest(*digest);

        let (recovery_id, signature) = ctx
            .sign_ecdsa_recoverable(&message, &secret)
            .serialize_compact();

        let mut r = [0u8; 32];
        let mut s = [0u8; 32];
        r.copy_from_slice(&signature[..32]);
        s.copy_from_slice(&signature[32..]);

        let v = recovery_id.to_i32() as u8 + 27;

        Ok(EcdsaSignature::new(r, s, v))
    })
}

/// Signs `message` under the personal-message convention, as wallet
/// `signMessage` implementations do.
pub fn sign_personal_message(
    private_key: &Secp256k1PrivateKey,
    message: &[u8],
) -> LockResult<EcdsaSignature> {
    let hash = personal_message_hash(message);
    sign_digest(private_key, &hash)
}

fn is_zero(scalar: &[u8; 32]) -> bool {
    scalar.iter().all(|b| *b == 0)
}

/// Structural checks applied before recovery. Rejects non-canonical `s`
/// so a signature has exactly one accepted encoding.
pub fn check_signature(signature: &EcdsaSignature) -> LockResult<RecoveryId> {
    let v = match signature.v {
        0 | 1 => signature.v,
        27 | 28 => signature.v - 27,
        other => {
            return Err(LockError::InvalidSignature(format!(
                "invalid recovery parameter {}",
                other
            )))
        }
    };

    if is_zero(&signature.r) || signature.r >= SECP256K1_ORDER {
        return Err(LockError::InvalidSignature("r out of range".into()));
    }
    if is_zero(&signature.s) || signature.s >= SECP256K1_ORDER {
        return Err(LockError::InvalidSignature("s out of range".into()));
    }
    if signature.s > SECP256K1_HALF_ORDER {
        return Err(LockError::InvalidSignature("non-canonical s value".into()));
    }

    RecoveryId::from_i32(v as i32).map_err(|e| LockError::InvalidSignature(e.to_string()))
}

pub fn recover_public_key(
    signature: &EcdsaSignature,
    digest: &[u8; 32],
) -> LockResult<Secp256k1PublicKey> {
    let recovery_id = check_signature(signature)?;

    SECP256K1_CTX.with(|ctx| {
        let mut sig_bytes = [0u8; 64];
        sig_bytes[..32].copy_from_slice(&signature.r);
        sig_bytes[32..].copy_from_slice(&signature.s);

        let recoverable_sig = RecoverableSignature::from_compact(&sig_bytes, recovery_id)
            .map_err(|e| LockError::InvalidSignature(e.to_string()))?;

        let message = Message::from_digest(*digest);

        let public_key = ctx
            .recover_ecdsa(&message, &recoverable_sig)
            .map_err(|e| LockError::InvalidSignature(e.to_string()))?;

        Ok(Secp256k1PublicKey::from_bytes(public_key.serialize()))
    })
}

/// Recovers the address that produced `signature` over `digest`.
///
/// Every malformed input fails with [`LockError::InvalidSignature`]:
/// - wrong length
/// - bad `v`
/// - out-of-range or high `s`
/// - an `r` that is not on the curve
pub fn recover_signer(digest: &[u8; 32], signature: &[u8]) -> LockResult<Address> {
    let signature = EcdsaSignature::from_slice(signature)?;
    let public_key = recover_public_key(&signature, digest)?;
    derive_address(&public_key)
}

pub fn verify_signature(
    signature: &EcdsaSignature,
    digest: &[u8; 32],
    expected_address: &Address,
) -> LockResult<bool> {
    let recovered_pubkey = recover_public_key(signature, digest)?;
    let recovered_address = derive_address(&recovered_pubkey)?;
    Ok(recovered_address == *expected_address)
}

pub fn validate_private_key(key: &[u8; 32]) -> bool {
    SecretKey::from_slice(key).is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key_one() -> Secp256k1PrivateKey {
        let mut bytes = [0u8; 32];
        bytes[31] = 1;
        Secp256k1PrivateKey::from_bytes(bytes)
    }

    #[test]
    fn test_known_address_derivation() {
        let address = derive_address_from_private(&key_one()).unwrap();
        assert_eq!(
            address.to_checksum(),
            "0x7E5F4552091A69125d5DfCb7b8C2659029395Bdf"
        );
    }

    #[test]
    fn test_personal_message_hash_vector() {
        let hash = personal_message_hash(b"Hello World");
        assert_eq!(
            hex::encode(hash),
            "a1de988600a42c4b4ab089b619297c17d53cffae5d5120d82d8a92d0bb3b78f2"
        );
    }

    #[test]
    fn test_sign_and_recover() {
        let private_key = generate_private_key();
        let address = derive_address_from_private(&private_key).unwrap();

        let digest = keccak256(b"secretlock commitment");
        let signature = sign_digest(&private_key, &digest).unwrap();
        assert!(signature.v == 27 || signature.v == 28);

        let recovered = recover_signer(&digest, &signature.to_bytes()).unwrap();
        assert_eq!(recovered, address);
        assert!(verify_signature(&signature, &digest, &address).unwrap());

        let wrong = keccak256(b"another message");
        assert!(!verify_signature(&signature, &wrong, &address).unwrap_or(true));
    }

    #[test]
    fn test_raw_recovery_id_accepted() {
        let private_key = generate_private_key();
        let address = derive_address_from_private(&private_key).unwrap();
        let digest = keccak256(b"raw v");

        let mut signature = sign_digest(&private_key, &digest).unwrap();
        signature.v -= 27;
        assert_eq!(recover_signer(&digest, &signature.to_bytes()).unwrap(), address);
    }

    #[test]
    fn test_personal_message_signing() {
        let private_key = generate_private_key();
        let address = derive_address_from_private(&private_key).unwrap();

        let message = b"Sign this message to prove ownership";
        let signature = sign_personal_message(&private_key, message).unwrap();

        let digest = personal_message_hash(message);
        assert!(verify_signature(&signature, &digest, &address).unwrap());
    }

    #[test]
    fn test_rejects_wrong_length() {
        let digest = keccak256(b"length");
        for len in [0usize, 64, 66] {
            let bytes = vec![1u8; len];
            assert!(matches!(
                recover_signer(&digest, &bytes),
                Err(LockError::InvalidSignature(_))
            ));
        }
    }

    #[test]
    fn test_rejects_bad_recovery_parameter() {
        let private_key = generate_private_key();
        let digest = keccak256(b"bad v");
        let mut signature = sign_digest(&private_key, &digest).unwrap();

        for v in [2u8, 26, 29, 35, 255] {
            signature.v = v;
            assert!(matches!(
                recover_signer(&digest, &signature.to_bytes()),
                Err(LockError::InvalidSignature(_))
            ));
        }
    }

    #[test]
    fn test_rejects_high_s() {
        let private_key = generate_private_key();
        let digest = keccak256(b"malleable");
        let signature = sign_digest(&private_key, &digest).unwrap();

        // s' = n - s is the malleated twin; it recovers the same key with the
        // opposite parity, but must not be accepted.
        let mut high_s = [0u8; 32];
        let mut borrow = 0i16;
        for i in (0..32).rev() {
            let diff = SECP256K1_ORDER[i] as i16 - signature.s[i] as i16 - borrow;
            if diff < 0 {
                high_s[i] = (diff + 256) as u8;
                borrow = 1;
            } else {
                high_s[i] = diff as u8;
                borrow = 0;
            }
        }
        let flipped_v = if signature.v == 27 { 28 } else { 27 };
        let malleated = EcdsaSignature::new(signature.r, high_s, flipped_v);

        assert!(matches!(
            recover_signer(&digest, &malleated.to_bytes()),
            Err(LockError::InvalidSignature(_))
        ));
    }

    #[test]
    fn test_rejects_zero_scalars() {
        let digest = keccak256(b"zero");
        let zero_r = EcdsaSignature::new([0u8; 32], [1u8; 32], 27);
        let zero_s = EcdsaSignature::new([1u8; 32], [0u8; 32], 27);
        assert!(recover_signer(&digest, &zero_r.to_bytes()).is_err());
        assert!(recover_signer(&digest, &zero_s.to_bytes()).is_err());
    }

    #[test]
    fn test_key_validation() {
        assert!(validate_private_key(&[1u8; 32]));
        assert!(!validate_private_key(&[0u8; 32]));
        assert!(!validate_private_key(&SECP256K1_ORDER));
    }
}
