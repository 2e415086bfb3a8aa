use bytes::BufMut;

use super::{
    constants::{
        DICTIONARY_PREFIX, END, FALSE, INTEGER_PREFIX, LENGTH_SEPARATOR, LIST_PREFIX, NULL,
        TEXT_PREFIX, TRUE,
    },
    value::{Key, Value},
};

/// Function for encoding a value.
/// For encoding the value into a buffer directly, use [`ValueEncode::encode`].
pub fn encode<T: ValueEncode + ?Sized>(value: &T) -> Vec<u8> {
    value.encode_to_vec()
}

pub trait ValueEncode {
    fn encode(&self, buf: &mut dyn BufMut);

    fn encode_to_vec(&self) -> Vec<u8> {
        let mut buf = Vec::new();
        self.encode(&mut buf);
        buf
    }
}

/// Writes `<length>:<bytes>`, optionally preceded by a type prefix.
fn encode_length_prefixed(prefix: Option<u8>, bytes: &[u8], buf: &mut dyn BufMut) {
    if let Some(prefix) = prefix {
        buf.put_u8(prefix);
    }
    buf.put_slice(bytes.len().to_string().as_bytes());
    buf.put_u8(LENGTH_SEPARATOR);
    buf.put_slice(bytes);
}

impl ValueEncode for Key {
    fn encode(&self, buf: &mut dyn BufMut) {
        match self {
            Key::Binary(bytes) => encode_length_prefixed(None, bytes, buf),
            Key::Text(text) => encode_length_prefixed(Some(TEXT_PREFIX), text.as_bytes(), buf),
        }
    }
}

impl ValueEncode for Value {
    fn encode(&self, buf: &mut dyn BufMut) {
        match self {
            Value::Null => buf.put_u8(NULL),
            Value::Boolean(true) => buf.put_u8(TRUE),
            Value::Boolean(false) => buf.put_u8(FALSE),
            Value::Integer(integer) => {
                buf.put_u8(INTEGER_PREFIX);
                buf.put_slice(integer.to_string().as_bytes());
                buf.put_u8(END);
            }
            Value::Binary(bytes) => encode_length_prefixed(None, bytes, buf),
            Value::Text(text) => encode_length_prefixed(Some(TEXT_PREFIX), text.as_bytes(), buf),
            Value::List(values) => {
                buf.put_u8(LIST_PREFIX);
                for value in values {
                    value.encode(buf);
                }
                buf.put_u8(END);
            }
            Value::Dictionary(entries) => {
                // BTreeMap iteration already follows the canonical key order
                buf.put_u8(DICTIONARY_PREFIX);
                for (key, value) in entries {
                    key.encode(buf);
                    value.encode(buf);
                }
                buf.put_u8(END);
            }
        }
    }
}
