use statesync_blockchain::{BlockStates, Chain, build_state_references};
use statesync_common::{Address, BlockHash};
use std::collections::{BTreeMap, BTreeSet};
use tracing::debug;

use super::selector::SnapshotPolicy;
use crate::{
    config::SyncConfig,
    messages::{Pagination, RecentStates},
};

/// What a peer asked for: the states reachable from `tip_hash`, optionally
/// restricted to some accounts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecentStatesQuery {
    pub tip_hash: BlockHash,
    pub accounts: Option<BTreeSet<Address>>,
    pub pagination: Pagination,
}

impl RecentStatesQuery {
    pub fn new(tip_hash: BlockHash) -> Self {
        Self {
            tip_hash,
            accounts: None,
            pagination: Pagination::default(),
        }
    }

    pub fn with_accounts(mut self, accounts: impl IntoIterator<Item = Address>) -> Self {
        self.accounts = Some(accounts.into_iter().collect());
        self
    }
}

/// Answers [`RecentStatesQuery`]s from a local chain.
#[derive(Debug)]
pub struct RecentStatesResponder<P> {
    policy: P,
    compression_level: u32,
}

impl<P: SnapshotPolicy> RecentStatesResponder<P> {
    pub fn new(policy: P, config: &SyncConfig) -> Self {
        Self {
            policy,
            compression_level: config.compression_level,
        }
    }

    /// Builds the reply for `query`. A tip that is not on `chain` yields a
    /// missing reply.
    pub fn respond(&self, chain: &Chain, query: &RecentStatesQuery) -> RecentStates {
        let Some(references) =
            build_state_references(chain, &query.tip_hash, query.accounts.as_ref())
        else {
            debug!(
                tip = format_args!("{:#x}", query.tip_hash),
                "Unknown tip, replying with missing states"
            );
            return RecentStates::missing(query.tip_hash).with_pagination(query.pagination);
        };

        let mut block_states = BlockStates::new();
        for hash in self.policy.select(chain, &references) {
            let Some(block) = chain.get(&hash) else {
                continue;
            };
            let states: BTreeMap<_, _> = block
                .states
                .iter()
                .filter(|(address, _)| references.contains_key(*address))
                .map(|(address, value)| (*address, value.clone()))
                .collect();
            block_states.insert(hash, states);
        }

        debug!(
            tip = format_args!("{:#x}", query.tip_hash),
            accounts = references.len(),
            blocks = block_states.len(),
            "Prepared recent states"
        );
        RecentStates::present(query.tip_hash, references, block_states)
            .with_pagination(query.pagination)
            .with_compression_level(self.compression_level)
    }
}
