//! Frames are the opaque byte buffers a message is split into on the wire.
//!
//! Integers are fixed-width big-endian, hashes are their 32 raw bytes and
//! addresses travel as 40 lowercase hex characters.

use bytes::Bytes;
use statesync_common::{
    Address, H256,
    constants::HASH_LENGTH,
    errors::AddressError,
    types::{address_from_hex, address_to_hex},
};

use crate::error::FrameError;

pub type Frame = Bytes;

pub const I32_LENGTH: usize = 4;
pub const I64_LENGTH: usize = 8;

pub fn hash_frame(hash: &H256) -> Frame {
    Frame::copy_from_slice(hash.as_bytes())
}

pub fn i32_frame(value: i32) -> Frame {
    Frame::copy_from_slice(&value.to_be_bytes())
}

pub fn address_frame(address: &Address) -> Frame {
    Frame::from(address_to_hex(address))
}

/// Reads frames in order, failing with the index and name of the field that
/// could not be read.
///
/// ```rust
/// use statesync_p2p::frame::{FrameReader, i32_frame};
///
/// let frames = [i32_frame(-1)];
/// let mut reader = FrameReader::new(&frames);
/// assert_eq!(reader.read_i32("count").unwrap(), -1);
/// reader.finish().unwrap();
/// ```
#[derive(Debug)]
pub struct FrameReader<'a> {
    frames: &'a [Frame],
    position: usize,
}

impl<'a> FrameReader<'a> {
    pub fn new(frames: &'a [Frame]) -> Self {
        Self {
            frames,
            position: 0,
        }
    }

    /// Index of the next frame to be read.
    pub fn position(&self) -> usize {
        self.position
    }

    pub fn remaining(&self) -> usize {
        self.frames.len() - self.position
    }

    pub fn is_empty(&self) -> bool {
        self.remaining() == 0
    }

    pub fn read_frame(&mut self, field: &'static str) -> Result<&'a Frame, FrameError> {
        let frame = self
            .frames
            .get(self.position)
            .ok_or(FrameError::TruncatedMessage {
                field,
                index: self.position,
            })?;
        self.position += 1;
        Ok(frame)
    }

    /// Reads a frame that must be exactly `N` bytes long.
    pub fn read_fixed<const N: usize>(
        &mut self,
        field: &'static str,
    ) -> Result<[u8; N], FrameError> {
        let index = self.position;
        let frame = self.read_frame(field)?;
        <[u8; N]>::try_from(&frame[..]).map_err(|_| FrameError::MalformedFrame {
            field,
            index,
            expected: N,
            got: frame.len(),
        })
    }

    pub fn read_hash(&mut self, field: &'static str) -> Result<H256, FrameError> {
        self.read_fixed::<HASH_LENGTH>(field).map(H256)
    }

    pub fn read_i32(&mut self, field: &'static str) -> Result<i32, FrameError> {
        self.read_fixed::<I32_LENGTH>(field).map(i32::from_be_bytes)
    }

    /// Reads a non-negative `i32` count.
    pub fn read_count(&mut self, field: &'static str) -> Result<usize, FrameError> {
        let index = self.position;
        let count = self.read_i32(field)?;
        usize::try_from(count).map_err(|_| FrameError::InvalidCount {
            field,
            index,
            count,
        })
    }

    pub fn read_address(&mut self, field: &'static str) -> Result<Address, FrameError> {
        let index = self.position;
        let frame = self.read_frame(field)?;
        let hex = std::str::from_utf8(frame).map_err(|err| FrameError::InvalidAddressEncoding {
            index,
            source: AddressError::InvalidHex(err.to_string()),
        })?;
        address_from_hex(hex).map_err(|source| FrameError::InvalidAddressEncoding { index, source })
    }

    /// Fails if any frame is left unread.
    pub fn finish(self) -> Result<(), FrameError> {
        match self.remaining() {
            0 => Ok(()),
            count => Err(FrameError::UnexpectedTrailingFrames { count }),
        }
    }
}
