use statesync_blockchain::{Chain, StateReferences};
use statesync_common::BlockHash;
use std::collections::BTreeSet;

/// Decides which referenced blocks get their states included in a reply.
/// Blocks left out are expected to be known to the receiver already.
pub trait SnapshotPolicy: Send + Sync + std::fmt::Debug {
    fn select(&self, chain: &Chain, references: &StateReferences) -> BTreeSet<BlockHash>;
}

/// Includes only the newest referenced block of each account.
#[derive(Debug, Clone, Copy, Default)]
pub struct LatestPerAccount;

impl SnapshotPolicy for LatestPerAccount {
    fn select(&self, _chain: &Chain, references: &StateReferences) -> BTreeSet<BlockHash> {
        references
            .values()
            .filter_map(|hashes| hashes.last().copied())
            .collect()
    }
}

/// Includes every referenced block after the receiver's last known checkpoint.
#[derive(Debug, Clone, Copy)]
pub struct AfterCheckpoint {
    pub checkpoint_index: u64,
}

impl SnapshotPolicy for AfterCheckpoint {
    fn select(&self, chain: &Chain, references: &StateReferences) -> BTreeSet<BlockHash> {
        references
            .values()
            .flatten()
            .filter(|hash| {
                chain
                    .get(hash)
                    .is_some_and(|block| block.index() > self.checkpoint_index)
            })
            .copied()
            .collect()
    }
}
