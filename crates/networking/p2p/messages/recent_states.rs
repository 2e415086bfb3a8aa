//! Reply to a recent-states request.
//!
//! Payload layout (frame by frame):
//!
//! ```text
//! tip hash                      32 bytes
//! account count                 i32, or -1 when the sender has nothing to offer
//! per account:
//!   address                     40 hex characters
//!   reference count k           i32
//!   k block hashes              32 bytes each, oldest first
//! block state count m           i32
//! per block state:
//!   block hash                  32 bytes
//!   state count j               i32
//!   j x (address, value)        hex address, DEFLATE-compressed encoded value
//! pagination                    i64 offset || i32 iteration
//! ```
//!
//! A missing reply stops after the account count. Decoders accept replies
//! without the pagination frame and fall back to [`Pagination::default`].

use bytes::{BufMut, BytesMut};
use statesync_blockchain::{BlockStates, StateReferences};
use statesync_codec::{Value, decode::ValueDecode, encode::ValueEncode};
use statesync_common::{Address, BlockHash, H256};
use std::collections::BTreeMap;
use tracing::trace;

use crate::{
    error::{EncodeError, FrameError, RecentStatesError},
    frame::{Frame, FrameReader, I32_LENGTH, I64_LENGTH, address_frame, hash_frame, i32_frame},
    message::{MessageType, Payload},
    utils::{deflate_compress, deflate_decompress},
};

/// Count written in place of the account count when the reply is missing.
pub const MISSING_SENTINEL: i32 = -1;

pub const DEFAULT_COMPRESSION_LEVEL: u32 = 6;

const PAGINATION_LENGTH: usize = I64_LENGTH + I32_LENGTH;

/// What the account-count frame announces.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PayloadKind {
    Missing,
    Present(u32),
}

impl PayloadKind {
    fn from_count(count: i32, index: usize) -> Result<Self, FrameError> {
        match count {
            MISSING_SENTINEL => Ok(PayloadKind::Missing),
            count => u32::try_from(count)
                .map(PayloadKind::Present)
                .map_err(|_| FrameError::InvalidCount {
                    field: "account count",
                    index,
                    count,
                }),
        }
    }

    fn to_count(self) -> Result<i32, EncodeError> {
        match self {
            PayloadKind::Missing => Ok(MISSING_SENTINEL),
            PayloadKind::Present(count) => {
                i32::try_from(count).map_err(|_| EncodeError::TooManyEntries {
                    field: "account count",
                    count: count as usize,
                })
            }
        }
    }
}

/// Position of a reply in a sequence of replies covering one large state set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    pub offset: i64,
    pub iteration: i32,
}

impl Default for Pagination {
    fn default() -> Self {
        Self {
            offset: -1,
            iteration: 1,
        }
    }
}

impl Pagination {
    fn to_frame(self) -> Frame {
        let mut buf = BytesMut::with_capacity(PAGINATION_LENGTH);
        buf.put_i64(self.offset);
        buf.put_i32(self.iteration);
        buf.freeze()
    }

    fn from_bytes(bytes: [u8; PAGINATION_LENGTH]) -> Self {
        let (offset, iteration) = bytes.split_at(I64_LENGTH);
        let mut offset_bytes = [0; I64_LENGTH];
        offset_bytes.copy_from_slice(offset);
        let mut iteration_bytes = [0; I32_LENGTH];
        iteration_bytes.copy_from_slice(iteration);
        Self {
            offset: i64::from_be_bytes(offset_bytes),
            iteration: i32::from_be_bytes(iteration_bytes),
        }
    }
}

#[derive(Debug, Clone)]
pub struct RecentStates {
    tip_hash: BlockHash,
    pagination: Pagination,
    missing: bool,
    state_references: StateReferences,
    block_states: BlockStates,
    compression_level: u32,
    /// Value frames exactly as received, re-emitted unchanged on encode.
    value_frames: BTreeMap<(BlockHash, Address), Frame>,
}

impl PartialEq for RecentStates {
    fn eq(&self, other: &Self) -> bool {
        self.tip_hash == other.tip_hash
            && self.pagination == other.pagination
            && self.missing == other.missing
            && self.state_references == other.state_references
            && self.block_states == other.block_states
    }
}

impl Eq for RecentStates {}

impl RecentStates {
    /// Builds a reply. Both maps must be given, or neither (a missing reply).
    pub fn new(
        tip_hash: BlockHash,
        offset: i64,
        iteration: i32,
        block_states: Option<BlockStates>,
        state_references: Option<StateReferences>,
    ) -> Result<Self, RecentStatesError> {
        let pagination = Pagination { offset, iteration };
        match (block_states, state_references) {
            (Some(block_states), Some(state_references)) => {
                Ok(Self::present(tip_hash, state_references, block_states)
                    .with_pagination(pagination))
            }
            (None, None) => Ok(Self::missing(tip_hash).with_pagination(pagination)),
            (block_states, state_references) => Err(RecentStatesError::PartialStateData {
                block_states: block_states.is_some(),
                state_references: state_references.is_some(),
            }),
        }
    }

    /// Reply for a tip the sender knows nothing about.
    pub fn missing(tip_hash: BlockHash) -> Self {
        Self {
            tip_hash,
            pagination: Pagination::default(),
            missing: true,
            state_references: StateReferences::new(),
            block_states: BlockStates::new(),
            compression_level: DEFAULT_COMPRESSION_LEVEL,
            value_frames: BTreeMap::new(),
        }
    }

    pub fn present(
        tip_hash: BlockHash,
        state_references: StateReferences,
        block_states: BlockStates,
    ) -> Self {
        Self {
            tip_hash,
            pagination: Pagination::default(),
            missing: false,
            state_references,
            block_states,
            compression_level: DEFAULT_COMPRESSION_LEVEL,
            value_frames: BTreeMap::new(),
        }
    }

    pub fn with_pagination(mut self, pagination: Pagination) -> Self {
        self.pagination = pagination;
        self
    }

    /// DEFLATE level (0-9) used for value frames. Not part of the message itself.
    ///
    /// A decoded reply re-encodes its value frames as they were received; setting
    /// a level drops those and compresses every value again.
    pub fn with_compression_level(mut self, level: u32) -> Self {
        self.compression_level = level;
        self.value_frames.clear();
        self
    }

    pub fn tip_hash(&self) -> BlockHash {
        self.tip_hash
    }

    pub fn is_missing(&self) -> bool {
        self.missing
    }

    /// What the account-count frame will announce. Fails for replies with more
    /// accounts than the frame can hold.
    pub fn kind(&self) -> Result<PayloadKind, EncodeError> {
        if self.missing {
            return Ok(PayloadKind::Missing);
        }
        let count = self.state_references.len();
        let kind = u32::try_from(count)
            .map(PayloadKind::Present)
            .map_err(|_| EncodeError::TooManyEntries {
                field: "account count",
                count,
            })?;
        kind.to_count()?;
        Ok(kind)
    }

    pub fn pagination(&self) -> Pagination {
        self.pagination
    }

    pub fn offset(&self) -> i64 {
        self.pagination.offset
    }

    pub fn iteration(&self) -> i32 {
        self.pagination.iteration
    }

    /// Empty for a missing reply.
    pub fn state_references(&self) -> &StateReferences {
        &self.state_references
    }

    /// Empty for a missing reply.
    pub fn block_states(&self) -> &BlockStates {
        &self.block_states
    }

    /// Newest state of `address` carried by this reply: walks the account's
    /// references from the newest block back and returns the first one whose
    /// state was included.
    pub fn latest_state(&self, address: &Address) -> Option<(BlockHash, &Value)> {
        self.state_references
            .get(address)?
            .iter()
            .rev()
            .find_map(|hash| {
                self.block_states
                    .get(hash)
                    .and_then(|states| states.get(address))
                    .map(|value| (*hash, value))
            })
    }
}

fn count_frame(field: &'static str, count: usize) -> Result<Frame, EncodeError> {
    i32::try_from(count)
        .map(i32_frame)
        .map_err(|_| EncodeError::TooManyEntries { field, count })
}

fn compress_value(value: &Value, level: u32) -> Result<Frame, EncodeError> {
    Ok(Frame::from(deflate_compress(&value.encode_to_vec(), level)?))
}

fn decompress_value(reader: &mut FrameReader<'_>) -> Result<(Value, Frame), FrameError> {
    let index = reader.position();
    let frame = reader.read_frame("state value")?;
    let inflated = deflate_decompress(frame).map_err(|err| FrameError::DecompressionFailure {
        index,
        reason: err.to_string(),
    })?;
    let value = Value::decode(&inflated).map_err(|err| FrameError::DecompressionFailure {
        index,
        reason: err.to_string(),
    })?;
    Ok((value, frame.clone()))
}

impl Payload for RecentStates {
    const KIND: MessageType = MessageType::RecentStates;

    fn encode_payload(&self) -> Result<Vec<Frame>, EncodeError> {
        let kind = self.kind()?;
        let mut frames = vec![hash_frame(&self.tip_hash), i32_frame(kind.to_count()?)];
        if kind == PayloadKind::Missing {
            return Ok(frames);
        }

        for (address, hashes) in &self.state_references {
            frames.push(address_frame(address));
            frames.push(count_frame("reference count", hashes.len())?);
            frames.extend(hashes.iter().map(hash_frame));
        }

        frames.push(count_frame("block state count", self.block_states.len())?);
        for (block_hash, states) in &self.block_states {
            frames.push(hash_frame(block_hash));
            frames.push(count_frame("state count", states.len())?);
            for (address, value) in states {
                frames.push(address_frame(address));
                match self.value_frames.get(&(*block_hash, *address)) {
                    Some(frame) => frames.push(frame.clone()),
                    None => frames.push(compress_value(value, self.compression_level)?),
                }
            }
        }

        frames.push(self.pagination.to_frame());
        trace!(
            tip = format_args!("{:#x}", self.tip_hash),
            accounts = self.state_references.len(),
            blocks = self.block_states.len(),
            frames = frames.len(),
            "Encoded recent states"
        );
        Ok(frames)
    }

    fn decode_payload(frames: &[Frame]) -> Result<Self, FrameError> {
        let mut reader = FrameReader::new(frames);
        let tip_hash = reader.read_hash("tip hash")?;
        let count_index = reader.position();
        let count = reader.read_i32("account count")?;
        let accounts = match PayloadKind::from_count(count, count_index)? {
            PayloadKind::Missing => {
                reader.finish()?;
                return Ok(Self::missing(tip_hash));
            }
            PayloadKind::Present(accounts) => accounts,
        };

        let mut state_references = StateReferences::new();
        for _ in 0..accounts {
            let index = reader.position();
            let address = reader.read_address("account address")?;
            let count = reader.read_count("reference count")?;
            let mut hashes = Vec::with_capacity(count.min(reader.remaining()));
            for _ in 0..count {
                hashes.push(reader.read_hash("state reference")?);
            }
            if state_references.insert(address, hashes).is_some() {
                return Err(FrameError::DuplicateEntry {
                    field: "account address",
                    index,
                });
            }
        }

        let mut block_states = BlockStates::new();
        let mut value_frames = BTreeMap::new();
        let blocks = reader.read_count("block state count")?;
        for _ in 0..blocks {
            let index = reader.position();
            let block_hash: H256 = reader.read_hash("block hash")?;
            let count = reader.read_count("state count")?;
            let mut states = BTreeMap::new();
            for _ in 0..count {
                let address_index = reader.position();
                let address = reader.read_address("state address")?;
                let (value, frame) = decompress_value(&mut reader)?;
                value_frames.insert((block_hash, address), frame);
                if states.insert(address, value).is_some() {
                    return Err(FrameError::DuplicateEntry {
                        field: "state address",
                        index: address_index,
                    });
                }
            }
            if block_states.insert(block_hash, states).is_some() {
                return Err(FrameError::DuplicateEntry {
                    field: "block hash",
                    index,
                });
            }
        }

        let pagination = if reader.is_empty() {
            Pagination::default()
        } else {
            Pagination::from_bytes(reader.read_fixed::<PAGINATION_LENGTH>("pagination")?)
        };
        reader.finish()?;

        let mut decoded =
            Self::present(tip_hash, state_references, block_states).with_pagination(pagination);
        decoded.value_frames = value_frames;
        Ok(decoded)
    }
}
