use bytes::Bytes;
use num_bigint::BigInt;
use statesync_codec::{Value, decode::ValueDecode, encode::ValueEncode};
use statesync_common::{Address, H256, utils::sha256};
use statesync_crypto::{
    CryptoBackend, CryptoError, PublicKey, SecretKey,
    keys::{public_key_from_slice, public_key_to_address},
};
use std::fmt::Display;

use crate::{error::DescriptorError, frame::Frame};

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Endpoint {
    pub host: String,
    pub port: u16,
}

impl Endpoint {
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self {
            host: host.into(),
            port,
        }
    }
}

impl Display for Endpoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.host, self.port)
    }
}

/// A node as it describes itself in the messages it sends.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Peer {
    pub public_key: PublicKey,
    pub endpoint: Endpoint,
}

impl Peer {
    pub fn new(public_key: PublicKey, endpoint: Endpoint) -> Self {
        Self {
            public_key,
            endpoint,
        }
    }

    pub fn address(&self) -> Address {
        public_key_to_address(&self.public_key)
    }

    pub fn to_frame(&self) -> Frame {
        let endpoint = Value::dictionary([
            ("host", Value::from(self.endpoint.host.as_str())),
            ("port", Value::from(self.endpoint.port)),
        ]);
        let value = Value::dictionary([
            ("endpoint", endpoint),
            (
                "public_key",
                Value::from(&self.public_key.serialize()[..]),
            ),
        ]);
        Frame::from(value.encode_to_vec())
    }

    pub fn from_frame(frame: &[u8]) -> Result<Self, DescriptorError> {
        let value = Value::decode(frame)?;
        let public_key = public_key_from_slice(binary_field(&value, "public_key")?)?;
        let endpoint = value
            .get("endpoint")
            .ok_or(DescriptorError::InvalidField("endpoint"))?;
        let host = endpoint
            .get("host")
            .and_then(Value::as_text)
            .ok_or(DescriptorError::InvalidField("host"))?;
        let port = integer_field(endpoint, "port")
            .and_then(|port| u16::try_from(port).ok())
            .ok_or(DescriptorError::InvalidField("port"))?;
        Ok(Self::new(public_key, Endpoint::new(host, port)))
    }
}

impl Display for Peer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:#x}@{}", self.address(), self.endpoint)
    }
}

/// Protocol version a node speaks, stamped with the signature of whoever
/// released it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppProtocolVersion {
    pub version: i32,
    pub signer: PublicKey,
    pub signature: Bytes,
}

impl AppProtocolVersion {
    pub fn sign(
        version: i32,
        backend: &dyn CryptoBackend,
        secret_key: &SecretKey,
    ) -> Result<Self, CryptoError> {
        let signature = backend.sign(&Self::digest(version), secret_key)?;
        Ok(Self {
            version,
            signer: backend.public_key(secret_key),
            signature: Bytes::from(signature),
        })
    }

    pub fn verify(&self, backend: &dyn CryptoBackend) -> bool {
        backend.verify(&Self::digest(self.version), &self.signature, &self.signer)
    }

    pub fn signer_address(&self) -> Address {
        public_key_to_address(&self.signer)
    }

    fn digest(version: i32) -> H256 {
        sha256(&version.to_be_bytes())
    }

    pub fn to_frame(&self) -> Frame {
        let value = Value::dictionary([
            ("signature", Value::from(self.signature.clone())),
            ("signer", Value::from(&self.signer.serialize()[..])),
            ("version", Value::from(self.version)),
        ]);
        Frame::from(value.encode_to_vec())
    }

    pub fn from_frame(frame: &[u8]) -> Result<Self, DescriptorError> {
        let value = Value::decode(frame)?;
        let version = integer_field(&value, "version")
            .and_then(|version| i32::try_from(version).ok())
            .ok_or(DescriptorError::InvalidField("version"))?;
        let signer = public_key_from_slice(binary_field(&value, "signer")?)?;
        let signature = Bytes::copy_from_slice(binary_field(&value, "signature")?);
        Ok(Self {
            version,
            signer,
            signature,
        })
    }
}

fn binary_field<'a>(value: &'a Value, field: &'static str) -> Result<&'a [u8], DescriptorError> {
    value
        .get(field)
        .and_then(Value::as_binary)
        .map(|bytes| &bytes[..])
        .ok_or(DescriptorError::InvalidField(field))
}

fn integer_field<'a>(value: &'a Value, field: &str) -> Option<&'a BigInt> {
    value.get(field).and_then(Value::as_integer)
}
