use crate::{
    error::{EncodeError, FrameError},
    frame::{Frame, FrameReader},
    message::{MessageType, Payload},
};

/// Liveness probe. Carries no payload frames.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ping;

/// Answer to a [`Ping`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pong;

impl Payload for Ping {
    const KIND: MessageType = MessageType::Ping;

    fn encode_payload(&self) -> Result<Vec<Frame>, EncodeError> {
        Ok(Vec::new())
    }

    fn decode_payload(frames: &[Frame]) -> Result<Self, FrameError> {
        FrameReader::new(frames).finish()?;
        Ok(Ping)
    }
}

impl Payload for Pong {
    const KIND: MessageType = MessageType::Pong;

    fn encode_payload(&self) -> Result<Vec<Frame>, EncodeError> {
        Ok(Vec::new())
    }

    fn decode_payload(frames: &[Frame]) -> Result<Self, FrameError> {
        FrameReader::new(frames).finish()?;
        Ok(Pong)
    }
}
