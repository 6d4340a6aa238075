pub const ADDRESS_SIZE: usize = 20;

pub const COMMITMENT_SIZE: usize = 32;

pub const KECCAK256_SIZE: usize = 32;

pub const SECP256K1_PRIVATE_KEY_SIZE: usize = 32;

pub const SECP256K1_PUBLIC_KEY_SIZE: usize = 33;

pub const SECP256K1_PUBLIC_KEY_UNCOMPRESSED_SIZE: usize = 65;

/// `r ‖ s ‖ v`
pub const ECDSA_SIGNATURE_SIZE: usize = 65;

/// Packed `(commitment, recipient)` message length.
pub const COMMITMENT_MESSAGE_SIZE: usize = COMMITMENT_SIZE + ADDRESS_SIZE;

pub const PERSONAL_MESSAGE_PREFIX: &str = "\x19Ethereum Signed Message:\n";

/// secp256k1 group order n.
pub const SECP256K1_ORDER: [u8; 32] = [
    0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xfe,
    0xba, 0xae, 0xdc, 0xe6, 0xaf, 0x48, 0xa0, 0x3b, 0xbf, 0xd2, 0x5e, 0x8c, 0xd0, 0x36, 0x41, 0x41,
];

/// n / 2, the largest canonical `s`.
pub const SECP256K1_HALF_ORDER: [u8; 32] = [
    0x7f, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff,
    0x5d, 0x57, 0x6e, 0x73, 0x57, 0xa4, 0x50, 0x1d, 0xdf, 0xe9, 0x2f, 0x46, 0x68, 0x1b, 0x20, 0xa0,
];
