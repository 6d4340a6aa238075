#![deny(unsafe_code)]
#![warn(clippy::all)]

pub mod message;
pub mod secp256k1_ops;

pub use message::*;
pub use secp256k1_ops::*;

pub fn random_bytes<const N: usize>() -> [u8; N] {
    use rand::RngCore;
    let mut bytes = [0u8; N];
    rand::thread_rng().fill_bytes(&mut bytes);
    bytes
}
