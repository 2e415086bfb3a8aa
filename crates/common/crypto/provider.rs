use secp256k1::{PublicKey, SecretKey};
use statesync_common::H256;

/// Errors from crypto operations. Opaque — does not leak library-specific types.
#[derive(Debug, thiserror::Error)]
pub enum CryptoError {
    #[error("invalid signature")]
    InvalidSignature,
    #[error("invalid public key")]
    InvalidPublicKey,
    #[error("invalid secret key")]
    InvalidSecretKey,
    #[error("{0}")]
    Other(String),
}

/// Signing capability used to authenticate protocol messages.
///
/// Implementations may wrap a context that is not safe to use concurrently; they
/// are responsible for serialising access to it. Callers only see `&self`.
pub trait CryptoBackend: Send + Sync + core::fmt::Debug {
    /// Signs a 32-byte message digest, returning the serialised signature.
    fn sign(&self, message_hash: &H256, secret_key: &SecretKey) -> Result<Vec<u8>, CryptoError>;

    /// Checks `signature` over `message_hash` against `public_key`.
    /// Malformed signatures verify as `false`.
    fn verify(&self, message_hash: &H256, signature: &[u8], public_key: &PublicKey) -> bool;

    /// Derives the public key matching `secret_key`.
    fn public_key(&self, secret_key: &SecretKey) -> PublicKey;
}
