use statesync_codec::Value;
use statesync_common::{Address, BlockHash};
use std::collections::{BTreeMap, BTreeSet};

use crate::chain::Chain;

/// Blocks that modified each account, oldest first.
pub type StateReferences = BTreeMap<Address, Vec<BlockHash>>;

/// Account states carried for a set of blocks.
pub type BlockStates = BTreeMap<BlockHash, BTreeMap<Address, Value>>;

/// Walks the chain from the genesis up to `tip_hash` and records, per account,
/// every block that wrote its state.
///
/// Only accounts in `accounts` are considered when it is given. Accounts that no
/// block modified are left out. Returns `None` if `tip_hash` is not on the chain.
pub fn build_state_references(
    chain: &Chain,
    tip_hash: &BlockHash,
    accounts: Option<&BTreeSet<Address>>,
) -> Option<StateReferences> {
    let mut references = StateReferences::new();
    for block in chain.blocks_until(tip_hash)? {
        for address in block.states.keys() {
            if accounts.is_some_and(|accounts| !accounts.contains(address)) {
                continue;
            }
            references.entry(*address).or_default().push(block.hash());
        }
    }
    Some(references)
}
