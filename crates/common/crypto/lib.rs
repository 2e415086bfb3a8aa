//! # statesync-crypto
//!
//! Message authentication for the state-sync protocol.
//!
//! Everything that signs or verifies goes through [`CryptoBackend`], which is
//! injected where it is needed (usually as an `Arc<dyn CryptoBackend>`) instead of
//! living in a global. [`Secp256k1Backend`] is the production implementation: it
//! owns a single secp256k1 context and serialises every operation on it.
//!
//! ```rust
//! use statesync_common::utils::sha256;
//! use statesync_crypto::{CryptoBackend, Secp256k1Backend, keys::generate_secret_key};
//!
//! let backend = Secp256k1Backend::new();
//! let secret_key = generate_secret_key();
//! let public_key = backend.public_key(&secret_key);
//!
//! let hash = sha256(b"payload");
//! let signature = backend.sign(&hash, &secret_key).unwrap();
//! assert!(backend.verify(&hash, &signature, &public_key));
//! ```

pub mod keys;
pub mod native;
pub mod provider;

pub use native::Secp256k1Backend;
pub use provider::{CryptoBackend, CryptoError};
pub use secp256k1::{PublicKey, SecretKey};
