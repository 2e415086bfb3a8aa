//! Error types for the state-sync wire protocol.
//!
//! Decoding failures are always local to the one inbound message: a failed decode
//! produces no message, and the caller drops the interaction with the peer.

use statesync_codec::error::DecodeError;
use statesync_common::{Address, errors::AddressError};
use statesync_crypto::CryptoError;
use thiserror::Error;

use crate::message::MessageType;

/// Errors raised while reading the frames of a payload.
#[derive(Debug, Error)]
pub enum FrameError {
    /// A fixed-size frame has the wrong length.
    #[error("Malformed frame #{index} ({field}): expected {expected} bytes, got {got}")]
    MalformedFrame {
        field: &'static str,
        index: usize,
        expected: usize,
        got: usize,
    },
    /// Fewer frames are present than the declared counts require.
    #[error("Truncated message: frame #{index} ({field}) is missing")]
    TruncatedMessage { field: &'static str, index: usize },
    #[error("Invalid address encoding in frame #{index}: {source}")]
    InvalidAddressEncoding {
        index: usize,
        #[source]
        source: AddressError,
    },
    /// A value frame could not be inflated, or did not hold a valid encoded value.
    #[error("Failed to decompress value in frame #{index}: {reason}")]
    DecompressionFailure { index: usize, reason: String },
    #[error("Invalid count {count} in frame #{index} ({field})")]
    InvalidCount {
        field: &'static str,
        index: usize,
        count: i32,
    },
    #[error("Duplicate {field} in frame #{index}")]
    DuplicateEntry { field: &'static str, index: usize },
    #[error("{count} unexpected trailing frame(s)")]
    UnexpectedTrailingFrames { count: usize },
}

#[derive(Debug, Error)]
pub enum EncodeError {
    #[error("Too many entries for {field}: {count}")]
    TooManyEntries { field: &'static str, count: usize },
    #[error("Failed to compress value: {0}")]
    Compression(#[from] std::io::Error),
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum RecentStatesError {
    /// Block states and state references must be given together, or not at all.
    #[error(
        "Partial state data (block states given: {block_states}, state references given: {state_references})"
    )]
    PartialStateData {
        block_states: bool,
        state_references: bool,
    },
}

/// Errors decoding a peer or version descriptor frame.
#[derive(Debug, Error)]
pub enum DescriptorError {
    #[error(transparent)]
    Codec(#[from] DecodeError),
    #[error("Missing or invalid field: {0}")]
    InvalidField(&'static str),
    #[error(transparent)]
    Crypto(#[from] CryptoError),
}

#[derive(Debug, Error)]
pub enum EnvelopeError {
    #[error("Expected at least {expected} frames, got {got}")]
    TooFewFrames { expected: usize, got: usize },
    #[error("Invalid message type frame: {0:02x?}")]
    InvalidMessageType(Vec<u8>),
    #[error("Invalid version descriptor: {0}")]
    InvalidVersion(#[source] DescriptorError),
    #[error("Invalid peer descriptor: {0}")]
    InvalidPeer(#[source] DescriptorError),
    #[error("Version mismatch: expected {expected}, got {got}")]
    VersionMismatch { expected: i32, got: i32 },
    #[error("Version stamp has an invalid signature")]
    InvalidVersionSignature,
    #[error("Version stamp signed by untrusted signer {0:#x}")]
    UntrustedVersionSigner(Address),
    #[error("Message signature does not match the sender")]
    SignatureInvalid,
    #[error("Signing key does not belong to the sending peer")]
    PeerKeyMismatch,
    #[error("Invalid {kind} payload: {source}")]
    Payload {
        kind: MessageType,
        #[source]
        source: FrameError,
    },
    #[error(transparent)]
    Encode(#[from] EncodeError),
    #[error(transparent)]
    Crypto(#[from] CryptoError),
}
