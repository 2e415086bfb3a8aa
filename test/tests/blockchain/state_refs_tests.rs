use statesync_blockchain::build_state_references;
use statesync_test::fixtures::{random_address, random_hash, round_robin_chain};
use std::collections::BTreeSet;

#[test]
fn test_references_follow_chain_order() {
    let accounts = [random_address(), random_address(), random_address()];
    let chain = round_robin_chain(&accounts, 7);
    let hash = |index: u64| chain.block_at(index).unwrap().hash();

    let references = build_state_references(&chain, &chain.tip().hash(), None).unwrap();
    assert_eq!(references.len(), 3);
    assert_eq!(references[&accounts[0]], vec![hash(1), hash(4), hash(7)]);
    assert_eq!(references[&accounts[1]], vec![hash(2), hash(5)]);
    assert_eq!(references[&accounts[2]], vec![hash(3), hash(6)]);
}

#[test]
fn test_references_stop_at_the_requested_tip() {
    let accounts = [random_address(), random_address(), random_address()];
    let chain = round_robin_chain(&accounts, 7);
    let hash = |index: u64| chain.block_at(index).unwrap().hash();

    let references = build_state_references(&chain, &hash(4), None).unwrap();
    assert_eq!(references[&accounts[0]], vec![hash(1), hash(4)]);
    assert_eq!(references[&accounts[1]], vec![hash(2)]);
    assert_eq!(references[&accounts[2]], vec![hash(3)]);
}

#[test]
fn test_references_only_cover_requested_accounts() {
    let accounts = [random_address(), random_address()];
    let chain = round_robin_chain(&accounts, 4);
    let tip = chain.tip().hash();

    let only_second = BTreeSet::from([accounts[1]]);
    let references = build_state_references(&chain, &tip, Some(&only_second)).unwrap();
    assert_eq!(references.keys().collect::<Vec<_>>(), vec![&accounts[1]]);

    // untouched accounts are absent rather than mapped to an empty list
    let untouched = BTreeSet::from([random_address()]);
    let references = build_state_references(&chain, &tip, Some(&untouched)).unwrap();
    assert!(references.is_empty());

    assert!(build_state_references(&chain, &random_hash(), None).is_none());
}
