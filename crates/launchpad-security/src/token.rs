//! Opaque random tokens. Only the digest is ever stored.

use rand::RngCore;
use sha2::{Digest, Sha256};

pub fn generate_token() -> String {
    let mut bytes = [0u8; 32];
    rand::rng().fill_bytes(&mut bytes);
    hex::encode(bytes)
}

pub fn digest_token(token: &str) -> String {
    hex::encode(Sha256::digest(token.trim().as_bytes()))
}
