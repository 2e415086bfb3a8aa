use bytes::Bytes;
use statesync_codec::{Key, Value, encode::ValueEncode};
use statesync_common::{Address, BlockHash, H256, utils::sha256};
use std::collections::BTreeMap;

/// Account states written by a single block, keyed by the account they belong to.
pub type BlockStateMap = BTreeMap<Address, Value>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlockHeader {
    pub index: u64,
    pub previous_hash: Option<BlockHash>,
    pub timestamp: u64,
    pub hash: BlockHash,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Block {
    pub header: BlockHeader,
    /// States of the accounts this block modified.
    pub states: BlockStateMap,
}

impl Block {
    pub fn genesis(timestamp: u64, states: BlockStateMap) -> Self {
        Self::new(0, None, timestamp, states)
    }

    /// Builds the block that follows `parent`.
    pub fn child_of(parent: &Block, timestamp: u64, states: BlockStateMap) -> Self {
        Self::new(
            parent.header.index + 1,
            Some(parent.hash()),
            timestamp,
            states,
        )
    }

    fn new(
        index: u64,
        previous_hash: Option<BlockHash>,
        timestamp: u64,
        states: BlockStateMap,
    ) -> Self {
        let hash = compute_block_hash(index, previous_hash, timestamp, &states);
        Self {
            header: BlockHeader {
                index,
                previous_hash,
                timestamp,
                hash,
            },
            states,
        }
    }

    pub fn hash(&self) -> BlockHash {
        self.header.hash
    }

    pub fn index(&self) -> u64 {
        self.header.index
    }

    /// Returns true if this block wrote a state for `address`.
    pub fn modifies(&self, address: &Address) -> bool {
        self.states.contains_key(address)
    }
}

/// SHA-256 of the compact encoding of the header fields and the written states.
pub fn compute_block_hash(
    index: u64,
    previous_hash: Option<BlockHash>,
    timestamp: u64,
    states: &BlockStateMap,
) -> H256 {
    let states = Value::dictionary(
        states
            .iter()
            .map(|(address, value)| (Key::from(address.as_bytes()), value.clone())),
    );
    let previous_hash = previous_hash.map(|hash| Bytes::copy_from_slice(hash.as_bytes()));
    let content = Value::dictionary([
        ("index", Value::from(index)),
        ("previous_hash", Value::from(previous_hash)),
        ("states", states),
        ("timestamp", Value::from(timestamp)),
    ]);
    sha256(&content.encode_to_vec())
}
