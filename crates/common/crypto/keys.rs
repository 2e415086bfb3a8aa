use rand::rngs::OsRng;
use secp256k1::{PublicKey, SecretKey};
use sha3::{Digest, Keccak256};
use statesync_common::Address;

use crate::provider::CryptoError;

pub fn generate_secret_key() -> SecretKey {
    SecretKey::new(&mut OsRng)
}

/// Derives the account address of a public key: the last 20 bytes of the
/// Keccak-256 hash of its uncompressed form, without the `0x04` tag.
pub fn public_key_to_address(public_key: &PublicKey) -> Address {
    let hash = Keccak256::digest(&public_key.serialize_uncompressed()[1..]);
    Address::from_slice(&hash[12..])
}

/// Parses a compressed (33 bytes) or uncompressed (65 bytes) public key.
pub fn public_key_from_slice(bytes: &[u8]) -> Result<PublicKey, CryptoError> {
    PublicKey::from_slice(bytes).map_err(|_| CryptoError::InvalidPublicKey)
}

pub fn secret_key_from_slice(bytes: &[u8]) -> Result<SecretKey, CryptoError> {
    SecretKey::from_slice(bytes).map_err(|_| CryptoError::InvalidSecretKey)
}
