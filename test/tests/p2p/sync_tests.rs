use statesync_blockchain::{Chain, build_state_references};
use statesync_common::{Address, BlockHash};
use statesync_p2p::{
    Payload, SyncConfig,
    messages::{Pagination, RecentStates},
    sync::{
        AfterCheckpoint, LatestPerAccount, RecentStatesQuery, RecentStatesResponder,
        SnapshotPolicy,
    },
};
use statesync_test::fixtures::{random_address, random_hash, round_robin_chain};
use std::collections::BTreeSet;

fn setup() -> (Vec<Address>, Chain) {
    let accounts: Vec<Address> = (0..5).map(|_| random_address()).collect();
    let chain = round_robin_chain(&accounts, 10);
    (accounts, chain)
}

fn hashes_at(chain: &Chain, indices: impl IntoIterator<Item = u64>) -> BTreeSet<BlockHash> {
    indices
        .into_iter()
        .map(|index| chain.block_at(index).unwrap().hash())
        .collect()
}

#[test]
fn test_latest_per_account_selects_newest_reference() {
    let (_, chain) = setup();
    let references = build_state_references(&chain, &chain.tip().hash(), None).unwrap();
    assert_eq!(
        LatestPerAccount.select(&chain, &references),
        hashes_at(&chain, 6..=10)
    );
}

#[test]
fn test_after_checkpoint_selects_newer_blocks() {
    let (_, chain) = setup();
    let references = build_state_references(&chain, &chain.tip().hash(), None).unwrap();
    let policy = AfterCheckpoint {
        checkpoint_index: 3,
    };
    assert_eq!(policy.select(&chain, &references), hashes_at(&chain, 4..=10));

    let policy = AfterCheckpoint {
        checkpoint_index: 10,
    };
    assert!(policy.select(&chain, &references).is_empty());
}

#[test]
fn test_responder_builds_full_reply() {
    let (accounts, chain) = setup();
    let tip = chain.tip().hash();
    let responder = RecentStatesResponder::new(LatestPerAccount, &SyncConfig::default());
    let reply = responder.respond(&chain, &RecentStatesQuery::new(tip));

    assert!(!reply.is_missing());
    assert_eq!(reply.tip_hash(), tip);
    assert_eq!(reply.state_references().len(), 5);
    assert_eq!(reply.block_states().len(), 5);
    for (i, account) in accounts.iter().enumerate() {
        let index = i as u64 + 1;
        assert_eq!(
            reply.state_references()[account],
            vec![
                chain.block_at(index).unwrap().hash(),
                chain.block_at(index + 5).unwrap().hash()
            ]
        );
        let (hash, value) = reply.latest_state(account).unwrap();
        assert_eq!(hash, chain.block_at(index + 5).unwrap().hash());
        assert_eq!(Some(value), chain.state_at(account, &tip));
    }

    let frames = reply.encode_payload().unwrap();
    assert_eq!(frames.len(), 44);
    assert_eq!(RecentStates::decode_payload(&frames).unwrap(), reply);
}

#[test]
fn test_responder_answers_older_tips() {
    let (accounts, chain) = setup();
    let tip = chain.block_at(7).unwrap().hash();
    let responder = RecentStatesResponder::new(LatestPerAccount, &SyncConfig::default());
    let reply = responder.respond(&chain, &RecentStatesQuery::new(tip));

    // blocks 8 to 10 are past the requested tip
    assert_eq!(reply.state_references()[&accounts[2]].len(), 1);
    assert_eq!(reply.state_references()[&accounts[1]].len(), 2);
    assert_eq!(
        reply.latest_state(&accounts[2]).map(|(hash, _)| hash),
        Some(chain.block_at(3).unwrap().hash())
    );
}

#[test]
fn test_responder_filters_accounts() {
    let (accounts, chain) = setup();
    let responder = RecentStatesResponder::new(LatestPerAccount, &SyncConfig::default());
    let query = RecentStatesQuery::new(chain.tip().hash()).with_accounts([accounts[0]]);
    let reply = responder.respond(&chain, &query);

    assert_eq!(
        reply.state_references().keys().collect::<Vec<_>>(),
        vec![&accounts[0]]
    );
    assert_eq!(
        reply.block_states().keys().copied().collect::<BTreeSet<_>>(),
        hashes_at(&chain, [6])
    );

    let query = RecentStatesQuery::new(chain.tip().hash()).with_accounts([random_address()]);
    let reply = responder.respond(&chain, &query);
    assert!(!reply.is_missing());
    assert!(reply.state_references().is_empty());
    assert!(reply.block_states().is_empty());
}

#[test]
fn test_unknown_tip_yields_missing_reply() {
    let (_, chain) = setup();
    let responder = RecentStatesResponder::new(
        AfterCheckpoint {
            checkpoint_index: 0,
        },
        &SyncConfig::default(),
    );
    let tip = random_hash();
    let reply = responder.respond(&chain, &RecentStatesQuery::new(tip));

    assert!(reply.is_missing());
    assert_eq!(reply.tip_hash(), tip);
    assert_eq!(reply.encode_payload().unwrap().len(), 2);
}

#[test]
fn test_responder_echoes_pagination() {
    let (_, chain) = setup();
    let responder = RecentStatesResponder::new(LatestPerAccount, &SyncConfig::default());
    let mut query = RecentStatesQuery::new(chain.tip().hash());
    query.pagination = Pagination {
        offset: 100,
        iteration: 4,
    };
    let reply = responder.respond(&chain, &query);
    assert_eq!(reply.pagination(), query.pagination);
}

#[test]
fn test_compression_level_does_not_change_contents() {
    let (_, chain) = setup();
    let query = RecentStatesQuery::new(chain.tip().hash());
    let stored = SyncConfig {
        compression_level: 0,
        ..SyncConfig::default()
    };
    let best = SyncConfig {
        compression_level: 9,
        ..SyncConfig::default()
    };
    let stored = RecentStatesResponder::new(LatestPerAccount, &stored).respond(&chain, &query);
    let best = RecentStatesResponder::new(LatestPerAccount, &best).respond(&chain, &query);
    assert_eq!(stored, best);

    let decoded = RecentStates::decode_payload(&stored.encode_payload().unwrap()).unwrap();
    assert_eq!(decoded, best);
}
