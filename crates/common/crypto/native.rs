use secp256k1::{
    All, Message, PublicKey, Secp256k1, SecretKey, ecdsa::Signature as EcdsaSignature,
};
use statesync_common::H256;
use std::sync::{Mutex, MutexGuard, PoisonError};
use tracing::trace;

use crate::provider::{CryptoBackend, CryptoError};

/// secp256k1 ECDSA backend producing DER-serialised signatures.
///
/// The backend owns one signing context. Only one sign or verify call runs
/// against it at a time; the lock is held for the duration of that single call.
#[derive(Debug)]
pub struct Secp256k1Backend {
    context: Mutex<Secp256k1<All>>,
}

impl Default for Secp256k1Backend {
    fn default() -> Self {
        Self::new()
    }
}

impl Secp256k1Backend {
    pub fn new() -> Self {
        Self {
            context: Mutex::new(Secp256k1::new()),
        }
    }

    fn context(&self) -> MutexGuard<'_, Secp256k1<All>> {
        // A panic while the guard was held cannot leave the context half-updated,
        // so a poisoned lock is still safe to reuse.
        self.context.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl CryptoBackend for Secp256k1Backend {
    fn sign(&self, message_hash: &H256, secret_key: &SecretKey) -> Result<Vec<u8>, CryptoError> {
        let message = Message::from_digest(message_hash.0);
        let signature = self.context().sign_ecdsa(&message, secret_key);
        let der = signature.serialize_der().to_vec();
        trace!(
            hash = format_args!("{message_hash:#x}"),
            len = der.len(),
            "Signed message digest"
        );
        Ok(der)
    }

    fn verify(&self, message_hash: &H256, signature: &[u8], public_key: &PublicKey) -> bool {
        let Ok(signature) = EcdsaSignature::from_der(signature) else {
            trace!(
                hash = format_args!("{message_hash:#x}"),
                "Rejecting signature that is not valid DER"
            );
            return false;
        };
        let message = Message::from_digest(message_hash.0);
        let verified = self
            .context()
            .verify_ecdsa(&message, &signature, public_key)
            .is_ok();
        trace!(
            hash = format_args!("{message_hash:#x}"),
            verified,
            "Verified message digest"
        );
        verified
    }

    fn public_key(&self, secret_key: &SecretKey) -> PublicKey {
        PublicKey::from_secret_key(&*self.context(), secret_key)
    }
}
