use rand::{Rng, thread_rng};
use statesync_blockchain::{Block, BlockStateMap, Chain};
use statesync_codec::Value;
use statesync_common::{Address, H256};

pub fn random_address() -> Address {
    Address::from(thread_rng().r#gen::<[u8; 20]>())
}

pub fn random_hash() -> H256 {
    H256::from(thread_rng().r#gen::<[u8; 32]>())
}

/// State written for `address` by the `n`-th block of a test chain.
pub fn account_state(address: &Address, n: u64) -> Value {
    Value::dictionary([
        ("address", Value::from(address.as_bytes())),
        ("balance", Value::from(n * 100)),
    ])
}

/// Chain whose block `i` (from 1 to `blocks`) writes the state of
/// `accounts[(i - 1) % accounts.len()]`.
pub fn round_robin_chain(accounts: &[Address], blocks: u64) -> Chain {
    let mut chain = Chain::new(Block::genesis(0, BlockStateMap::new()));
    for index in 1..=blocks {
        let address = accounts[((index - 1) % accounts.len() as u64) as usize];
        let block = Block::child_of(
            chain.tip(),
            index,
            BlockStateMap::from([(address, account_state(&address, index))]),
        );
        chain.append(block).expect("round robin blocks link to the tip");
    }
    chain
}
