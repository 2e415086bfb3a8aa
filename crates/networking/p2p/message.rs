use bytes::BufMut;
use statesync_common::{H256, utils::sha256};
use statesync_crypto::{CryptoBackend, SecretKey};
use std::fmt::Display;
use tracing::{debug, trace};

use crate::{
    config::SyncConfig,
    error::{EncodeError, EnvelopeError, FrameError},
    frame::Frame,
    messages::{Ping, Pong, RecentStates},
    types::{AppProtocolVersion, Peer},
};

/// Number of frames every message starts with: version, type, peer and signature.
pub const COMMON_FRAMES: usize = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum MessageType {
    Ping = 0x01,
    RecentStates = 0x13,
    Pong = 0x14,
}

impl MessageType {
    pub fn code(self) -> u8 {
        self as u8
    }
}

impl TryFrom<u8> for MessageType {
    type Error = u8;

    fn try_from(code: u8) -> Result<Self, Self::Error> {
        match code {
            0x01 => Ok(MessageType::Ping),
            0x13 => Ok(MessageType::RecentStates),
            0x14 => Ok(MessageType::Pong),
            other => Err(other),
        }
    }
}

impl Display for MessageType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MessageType::Ping => "Ping".fmt(f),
            MessageType::RecentStates => "RecentStates".fmt(f),
            MessageType::Pong => "Pong".fmt(f),
        }
    }
}

/// The frames a message contributes after the common ones.
pub trait Payload: Sized {
    const KIND: MessageType;

    fn encode_payload(&self) -> Result<Vec<Frame>, EncodeError>;

    fn decode_payload(frames: &[Frame]) -> Result<Self, FrameError>;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Message {
    Ping(Ping),
    Pong(Pong),
    RecentStates(RecentStates),
}

impl Message {
    pub fn kind(&self) -> MessageType {
        match self {
            Message::Ping(_) => Ping::KIND,
            Message::Pong(_) => Pong::KIND,
            Message::RecentStates(_) => RecentStates::KIND,
        }
    }

    pub fn encode_payload(&self) -> Result<Vec<Frame>, EncodeError> {
        match self {
            Message::Ping(msg) => msg.encode_payload(),
            Message::Pong(msg) => msg.encode_payload(),
            Message::RecentStates(msg) => msg.encode_payload(),
        }
    }

    pub fn decode_payload(kind: MessageType, frames: &[Frame]) -> Result<Self, FrameError> {
        match kind {
            MessageType::Ping => Ok(Message::Ping(Ping::decode_payload(frames)?)),
            MessageType::Pong => Ok(Message::Pong(Pong::decode_payload(frames)?)),
            MessageType::RecentStates => Ok(Message::RecentStates(
                RecentStates::decode_payload(frames)?,
            )),
        }
    }
}

impl Display for Message {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.kind().fmt(f)
    }
}

impl From<Ping> for Message {
    fn from(msg: Ping) -> Self {
        Message::Ping(msg)
    }
}

impl From<Pong> for Message {
    fn from(msg: Pong) -> Self {
        Message::Pong(msg)
    }
}

impl From<RecentStates> for Message {
    fn from(msg: RecentStates) -> Self {
        Message::RecentStates(msg)
    }
}

/// A message together with the common frames that authenticate it.
///
/// ```text
/// [version, type, peer, signature, payload...]
/// ```
///
/// The signature is made by the sending peer over the type frame, the peer
/// frame and every payload frame (see [`signing_hash`]).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Envelope {
    pub version: AppProtocolVersion,
    pub peer: Peer,
    pub message: Message,
}

impl Envelope {
    pub fn new(version: AppProtocolVersion, peer: Peer, message: impl Into<Message>) -> Self {
        Self {
            version,
            peer,
            message: message.into(),
        }
    }

    /// Signs the message with `secret_key`, which must belong to `self.peer`.
    pub fn to_frames(
        &self,
        backend: &dyn CryptoBackend,
        secret_key: &SecretKey,
    ) -> Result<Vec<Frame>, EnvelopeError> {
        if backend.public_key(secret_key) != self.peer.public_key {
            return Err(EnvelopeError::PeerKeyMismatch);
        }

        let payload = self.message.encode_payload()?;
        let type_frame = Frame::copy_from_slice(&[self.message.kind().code()]);
        let peer_frame = self.peer.to_frame();
        let hash = signing_hash(&type_frame, &peer_frame, &payload);
        let signature = Frame::from(backend.sign(&hash, secret_key)?);

        let mut frames = Vec::with_capacity(COMMON_FRAMES + payload.len());
        frames.push(self.version.to_frame());
        frames.push(type_frame);
        frames.push(peer_frame);
        frames.push(signature);
        frames.extend(payload);
        trace!(msg = %self.message, frames = frames.len(), "Encoded message");
        Ok(frames)
    }

    /// Checks the version stamp, then the sender's signature, and only then
    /// decodes the payload.
    pub fn parse(
        frames: &[Frame],
        backend: &dyn CryptoBackend,
        config: &SyncConfig,
    ) -> Result<Self, EnvelopeError> {
        let result = Self::parse_unlogged(frames, backend, config);
        if let Err(err) = &result {
            debug!(%err, frames = frames.len(), "Rejected inbound message");
        }
        result
    }

    fn parse_unlogged(
        frames: &[Frame],
        backend: &dyn CryptoBackend,
        config: &SyncConfig,
    ) -> Result<Self, EnvelopeError> {
        let [version_frame, type_frame, peer_frame, signature, payload @ ..] = frames else {
            return Err(EnvelopeError::TooFewFrames {
                expected: COMMON_FRAMES,
                got: frames.len(),
            });
        };

        let version =
            AppProtocolVersion::from_frame(version_frame).map_err(EnvelopeError::InvalidVersion)?;
        if version.version != config.app_protocol_version {
            return Err(EnvelopeError::VersionMismatch {
                expected: config.app_protocol_version,
                got: version.version,
            });
        }
        if !version.verify(backend) {
            return Err(EnvelopeError::InvalidVersionSignature);
        }
        let signer = version.signer_address();
        if !config.trusts_signer(&signer) {
            return Err(EnvelopeError::UntrustedVersionSigner(signer));
        }

        let kind = match &type_frame[..] {
            [code] => MessageType::try_from(*code)
                .map_err(|code| EnvelopeError::InvalidMessageType(vec![code]))?,
            other => return Err(EnvelopeError::InvalidMessageType(other.to_vec())),
        };
        let peer = Peer::from_frame(peer_frame).map_err(EnvelopeError::InvalidPeer)?;

        let hash = signing_hash(type_frame, peer_frame, payload);
        if !backend.verify(&hash, signature, &peer.public_key) {
            return Err(EnvelopeError::SignatureInvalid);
        }

        let message = Message::decode_payload(kind, payload)
            .map_err(|source| EnvelopeError::Payload { kind, source })?;
        trace!(msg = %message, %peer, "Parsed message");
        Ok(Self {
            version,
            peer,
            message,
        })
    }
}

/// SHA-256 over the type frame, the peer frame and the payload frames, each
/// preceded by its length as a big-endian `u32`.
pub fn signing_hash(type_frame: &[u8], peer_frame: &[u8], payload: &[Frame]) -> H256 {
    let mut buf = Vec::new();
    for frame in [type_frame, peer_frame]
        .into_iter()
        .chain(payload.iter().map(|frame| &frame[..]))
    {
        buf.put_u32(frame.len() as u32);
        buf.put_slice(frame);
    }
    sha256(&buf)
}
