use hex_literal::hex;
use statesync_common::{Address, utils::sha256};
use statesync_crypto::{
    CryptoBackend, CryptoError, Secp256k1Backend,
    keys::{generate_secret_key, public_key_from_slice, public_key_to_address, secret_key_from_slice},
};
use std::{sync::Arc, thread};

#[test]
fn test_address_derivation_known_key() {
    let backend = Secp256k1Backend::new();
    let secret_key = secret_key_from_slice(&hex!(
        "0000000000000000000000000000000000000000000000000000000000000001"
    ))
    .unwrap();
    assert_eq!(
        public_key_to_address(&backend.public_key(&secret_key)),
        Address::from(hex!("7e5f4552091a69125d5dfcb7b8c2659029395bdf"))
    );
}

#[test]
fn test_signatures_are_der_encoded() {
    let backend = Secp256k1Backend::new();
    let secret_key = generate_secret_key();
    let signature = backend.sign(&sha256(b"payload"), &secret_key).unwrap();
    assert_eq!(signature[0], 0x30);
    assert_eq!(usize::from(signature[1]) + 2, signature.len());
}

#[test]
fn test_invalid_keys_are_rejected() {
    assert!(matches!(
        secret_key_from_slice(&[0u8; 32]),
        Err(CryptoError::InvalidSecretKey)
    ));
    assert!(matches!(
        public_key_from_slice(&[0x02; 10]),
        Err(CryptoError::InvalidPublicKey)
    ));
}

#[test]
fn test_public_key_round_trips_through_bytes() {
    let backend = Secp256k1Backend::new();
    let public_key = backend.public_key(&generate_secret_key());
    assert_eq!(
        public_key_from_slice(&public_key.serialize()).unwrap(),
        public_key
    );
    assert_eq!(
        public_key_from_slice(&public_key.serialize_uncompressed()).unwrap(),
        public_key
    );
}

#[test]
fn test_backend_is_shared_across_threads() {
    let backend: Arc<dyn CryptoBackend> = Arc::new(Secp256k1Backend::new());

    let handles: Vec<_> = (0..8u8)
        .map(|i| {
            let backend = Arc::clone(&backend);
            thread::spawn(move || {
                let secret_key = generate_secret_key();
                let public_key = backend.public_key(&secret_key);
                (0..16u8).all(|j| {
                    let hash = sha256(&[i, j]);
                    let signature = backend.sign(&hash, &secret_key).unwrap();
                    backend.verify(&hash, &signature, &public_key)
                })
            })
        })
        .collect();

    for handle in handles {
        assert!(handle.join().unwrap());
    }
}
