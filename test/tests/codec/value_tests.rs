use bytes::Bytes;
use num_bigint::BigInt;
use statesync_codec::{
    Key, Value,
    decode::{MAX_DEPTH, ValueDecode},
    encode::{ValueEncode, encode},
    error::DecodeError,
};
use std::collections::BTreeMap;

fn account() -> Value {
    Value::dictionary([
        (Key::from(&b"\x00\x01"[..]), Value::from(true)),
        (Key::from("balance"), Value::from(BigInt::from(u128::MAX) * 4)),
        (
            Key::from("history"),
            Value::from(vec![Value::Null, Value::from(-7i64), Value::from("é")]),
        ),
        (Key::from("name"), Value::from("alice")),
        (Key::from("raw"), Value::from(Bytes::from_static(b"\xff\x00"))),
    ])
}

#[test]
fn test_nested_value_survives_decoding() {
    let value = account();
    let encoded = encode(&value);
    assert_eq!(Value::decode(&encoded).unwrap(), value);
    assert_eq!(Value::decode(&encoded).unwrap().encode_to_vec(), encoded);
}

#[test]
fn test_dictionary_encoding_is_canonical() {
    let value = Value::dictionary([("b", Value::from(2u8)), ("a", Value::from(1u8))]);
    assert_eq!(value.encode_to_vec(), b"du1:ai1eu1:bi2ee");
}

#[test]
fn test_accessors() {
    let value = account();
    assert_eq!(value.get("name").and_then(Value::as_text), Some("alice"));
    assert_eq!(
        value.get("history").and_then(Value::as_list).map(<[Value]>::len),
        Some(3)
    );
    assert!(value.get("missing").is_none());
    assert!(Value::from(None::<u8>).is_null());
    assert_eq!(Value::from(Some(3u8)), Value::from(3u8));
    assert_eq!(
        Value::from(BTreeMap::from([(Key::from("k"), Value::Null)])),
        Value::dictionary([("k", Value::Null)])
    );
}

#[test]
fn test_unsorted_keys_are_rejected() {
    assert_eq!(
        Value::decode(b"du1:bnu1:ane"),
        Err(DecodeError::UnsortedKeys { offset: 6 })
    );
    // text keys must come after binary keys
    assert_eq!(
        Value::decode(b"du1:an1:bne"),
        Err(DecodeError::UnsortedKeys { offset: 6 })
    );
}

#[test]
fn test_duplicate_keys_are_rejected() {
    assert_eq!(
        Value::decode(b"du1:anu1:ane"),
        Err(DecodeError::UnsortedKeys { offset: 6 })
    );
}

#[test]
fn test_trailing_bytes_are_rejected() {
    assert_eq!(
        Value::decode(b"nn"),
        Err(DecodeError::TrailingBytes { remaining: 1 })
    );
    let (value, rest) = Value::decode_unfinished(b"i1etail").unwrap();
    assert_eq!(value, Value::from(1u8));
    assert_eq!(rest, b"tail");
}

#[test]
fn test_invalid_input() {
    assert_eq!(
        Value::decode(b"x"),
        Err(DecodeError::InvalidPrefix { byte: b'x', offset: 0 })
    );
    assert_eq!(
        Value::decode(b"u2:\xff\xfe"),
        Err(DecodeError::InvalidUtf8 { offset: 3 })
    );
    assert_eq!(
        Value::decode(b"5:abc"),
        Err(DecodeError::UnexpectedEnd { offset: 5 })
    );
    assert_eq!(
        Value::decode(b"dnne"),
        Err(DecodeError::InvalidKey { byte: b'n', offset: 1 })
    );
    assert_eq!(Value::decode(b""), Err(DecodeError::UnexpectedEnd { offset: 0 }));
}

/// Wraps `Null` in `depth` containers, alternating lists and single-key dictionaries.
fn nested(depth: usize) -> Value {
    (0..depth).fold(Value::Null, |inner, level| {
        if level % 2 == 0 {
            Value::from(vec![inner])
        } else {
            Value::dictionary([("k", inner)])
        }
    })
}

#[test]
fn test_nesting_up_to_max_depth() {
    assert_eq!(nested(3).encode_to_vec(), b"ldu1:klneee");

    let deepest = nested(MAX_DEPTH);
    let encoded = deepest.encode_to_vec();
    assert_eq!(Value::decode(&encoded).unwrap(), deepest);
    assert_eq!(Value::decode(&encoded).unwrap().encode_to_vec(), encoded);

    let mut lists = vec![b'l'; MAX_DEPTH];
    lists.push(b'n');
    lists.extend(vec![b'e'; MAX_DEPTH]);
    assert!(Value::decode(&lists).is_ok());

    let mut too_deep = vec![b'l'; MAX_DEPTH + 1];
    too_deep.extend(vec![b'e'; MAX_DEPTH + 1]);
    assert_eq!(
        Value::decode(&too_deep),
        Err(DecodeError::DepthExceeded {
            max: MAX_DEPTH,
            offset: MAX_DEPTH
        })
    );
    assert!(matches!(
        Value::decode(&nested(MAX_DEPTH + 1).encode_to_vec()),
        Err(DecodeError::DepthExceeded { .. })
    ));
}
