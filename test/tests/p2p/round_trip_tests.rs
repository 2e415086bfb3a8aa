use bytes::Bytes;
use num_bigint::BigInt;
use proptest::{
    collection::{btree_map, vec},
    prelude::{BoxedStrategy, Just, Strategy, any, prop_oneof},
    proptest,
};
use statesync_blockchain::{BlockStates, StateReferences};
use statesync_codec::{Key, Value, decode::ValueDecode, encode::ValueEncode};
use statesync_common::{Address, H256};
use statesync_p2p::{
    Payload,
    messages::{Pagination, RecentStates},
};

fn key() -> impl Strategy<Value = Key> {
    prop_oneof![
        vec(any::<u8>(), 0..8).prop_map(|bytes| Key::Binary(Bytes::from(bytes))),
        "[a-z0-9]{0,8}".prop_map(Key::Text),
    ]
}

fn value() -> BoxedStrategy<Value> {
    let leaf = prop_oneof![
        Just(Value::Null),
        any::<bool>().prop_map(Value::from),
        vec(any::<u8>(), 0..24).prop_map(|bytes| Value::from(BigInt::from_signed_bytes_be(&bytes))),
        vec(any::<u8>(), 0..32).prop_map(Value::from),
        any::<String>().prop_map(Value::from),
    ];
    leaf.prop_recursive(4, 64, 6, |inner| {
        prop_oneof![
            vec(inner.clone(), 0..6).prop_map(Value::List),
            btree_map(key(), inner, 0..6).prop_map(Value::Dictionary),
        ]
    })
    .boxed()
}

fn address() -> impl Strategy<Value = Address> {
    any::<[u8; 20]>().prop_map(Address::from)
}

fn hash() -> impl Strategy<Value = H256> {
    any::<[u8; 32]>().prop_map(H256::from)
}

fn state_references() -> impl Strategy<Value = StateReferences> {
    btree_map(address(), vec(hash(), 0..4), 0..6)
}

fn block_states() -> impl Strategy<Value = BlockStates> {
    btree_map(hash(), btree_map(address(), value(), 0..3), 0..4)
}

fn pagination() -> impl Strategy<Value = Pagination> {
    (any::<i64>(), any::<i32>()).prop_map(|(offset, iteration)| Pagination { offset, iteration })
}

proptest! {

    #[test]
    fn proptest_value_round_trip(value in value()) {
        let encoded = value.encode_to_vec();
        let decoded = Value::decode(&encoded).unwrap();
        assert_eq!(decoded.encode_to_vec(), encoded);
        assert_eq!(decoded, value);
    }

    #[test]
    fn proptest_recent_states_round_trip(
        tip in hash(),
        state_references in state_references(),
        block_states in block_states(),
        pagination in pagination(),
        level in 0u32..=9,
    ) {
        let reply = RecentStates::present(tip, state_references, block_states)
            .with_pagination(pagination)
            .with_compression_level(level);
        let frames = reply.encode_payload().unwrap();
        let decoded = RecentStates::decode_payload(&frames).unwrap();
        assert_eq!(decoded, reply);
        assert_eq!(decoded.encode_payload().unwrap(), frames);
    }

    #[test]
    fn proptest_missing_reply_round_trip(tip in hash()) {
        let reply = RecentStates::missing(tip);
        let frames = reply.encode_payload().unwrap();
        let decoded = RecentStates::decode_payload(&frames).unwrap();
        assert_eq!(decoded, reply);
        assert_eq!(decoded.encode_payload().unwrap(), frames);
    }
}
