use super::{
    constants::{
        DICTIONARY_PREFIX, END, FALSE, INTEGER_PREFIX, LENGTH_SEPARATOR, LIST_PREFIX, NULL,
        TEXT_PREFIX, TRUE,
    },
    error::DecodeError,
    value::{Key, Value},
};
use bytes::Bytes;
use num_bigint::BigInt;
use std::collections::BTreeMap;

/// Maximum nesting of lists and dictionaries accepted when decoding.
/// Well-formed state values are shallow, so deeper inputs are either bugs or malicious.
pub const MAX_DEPTH: usize = 256;

/// Trait for decoding encoded slices of data.
/// The [`decode_unfinished`](ValueDecode::decode_unfinished) method decodes one value and
/// returns the bytes that follow it.
/// The [`decode`](ValueDecode::decode) method decodes one value and fails if any bytes remain.
pub trait ValueDecode: Sized {
    fn decode_unfinished(buf: &[u8]) -> Result<(Self, &[u8]), DecodeError>;

    fn decode(buf: &[u8]) -> Result<Self, DecodeError> {
        let (decoded, remaining) = Self::decode_unfinished(buf)?;
        if !remaining.is_empty() {
            return Err(DecodeError::TrailingBytes {
                remaining: remaining.len(),
            });
        }

        Ok(decoded)
    }
}

impl ValueDecode for Value {
    fn decode_unfinished(buf: &[u8]) -> Result<(Self, &[u8]), DecodeError> {
        let mut cursor = Cursor::new(buf);
        let value = cursor.value(0)?;
        Ok((value, cursor.rest()))
    }
}

/// Reads values out of an input slice, keeping track of the offset for error reporting.
struct Cursor<'a> {
    input: &'a [u8],
    position: usize,
}

impl<'a> Cursor<'a> {
    fn new(input: &'a [u8]) -> Self {
        Self { input, position: 0 }
    }

    fn rest(&self) -> &'a [u8] {
        &self.input[self.position..]
    }

    fn peek(&self) -> Result<u8, DecodeError> {
        self.input
            .get(self.position)
            .copied()
            .ok_or(DecodeError::UnexpectedEnd {
                offset: self.position,
            })
    }

    fn next_byte(&mut self) -> Result<u8, DecodeError> {
        let byte = self.peek()?;
        self.position += 1;
        Ok(byte)
    }

    fn take(&mut self, len: usize) -> Result<&'a [u8], DecodeError> {
        let end = self
            .position
            .checked_add(len)
            .filter(|end| *end <= self.input.len())
            .ok_or(DecodeError::UnexpectedEnd {
                offset: self.input.len(),
            })?;
        let bytes = &self.input[self.position..end];
        self.position = end;
        Ok(bytes)
    }

    fn value(&mut self, depth: usize) -> Result<Value, DecodeError> {
        let offset = self.position;
        match self.peek()? {
            NULL => {
                self.position += 1;
                Ok(Value::Null)
            }
            TRUE => {
                self.position += 1;
                Ok(Value::Boolean(true))
            }
            FALSE => {
                self.position += 1;
                Ok(Value::Boolean(false))
            }
            INTEGER_PREFIX => {
                self.position += 1;
                self.integer().map(Value::Integer)
            }
            TEXT_PREFIX => {
                self.position += 1;
                self.text().map(Value::Text)
            }
            b'0'..=b'9' => self.binary().map(Value::Binary),
            LIST_PREFIX => {
                self.enter(depth, offset)?;
                self.position += 1;
                let mut values = Vec::new();
                while self.peek()? != END {
                    values.push(self.value(depth + 1)?);
                }
                self.position += 1;
                Ok(Value::List(values))
            }
            DICTIONARY_PREFIX => {
                self.enter(depth, offset)?;
                self.position += 1;
                self.dictionary(depth + 1).map(Value::Dictionary)
            }
            byte => Err(DecodeError::InvalidPrefix { byte, offset }),
        }
    }

    fn enter(&self, depth: usize, offset: usize) -> Result<(), DecodeError> {
        if depth >= MAX_DEPTH {
            return Err(DecodeError::DepthExceeded {
                max: MAX_DEPTH,
                offset,
            });
        }
        Ok(())
    }

    fn dictionary(&mut self, depth: usize) -> Result<BTreeMap<Key, Value>, DecodeError> {
        let mut entries = BTreeMap::new();
        let mut previous: Option<Key> = None;
        while self.peek()? != END {
            let offset = self.position;
            let key = match self.peek()? {
                TEXT_PREFIX => {
                    self.position += 1;
                    Key::Text(self.text()?)
                }
                b'0'..=b'9' => Key::Binary(self.binary()?),
                byte => return Err(DecodeError::InvalidKey { byte, offset }),
            };
            if previous.as_ref().is_some_and(|previous| *previous >= key) {
                return Err(DecodeError::UnsortedKeys { offset });
            }
            let value = self.value(depth)?;
            previous = Some(key.clone());
            entries.insert(key, value);
        }
        self.position += 1;
        Ok(entries)
    }

    /// Parses `<digits>:` where digits has no leading zeros.
    fn length(&mut self) -> Result<usize, DecodeError> {
        let offset = self.position;
        let mut length: usize = 0;
        let mut digits = 0;
        loop {
            match self.next_byte()? {
                LENGTH_SEPARATOR if digits > 0 => return Ok(length),
                digit @ b'0'..=b'9' => {
                    if digits == 1 && length == 0 {
                        return Err(DecodeError::MalformedLength { offset });
                    }
                    length = length
                        .checked_mul(10)
                        .and_then(|length| length.checked_add(usize::from(digit - b'0')))
                        .ok_or(DecodeError::MalformedLength { offset })?;
                    digits += 1;
                }
                _ => return Err(DecodeError::MalformedLength { offset }),
            }
        }
    }

    fn binary(&mut self) -> Result<Bytes, DecodeError> {
        let length = self.length()?;
        Ok(Bytes::copy_from_slice(self.take(length)?))
    }

    fn text(&mut self) -> Result<String, DecodeError> {
        let length = self.length()?;
        let offset = self.position;
        let bytes = self.take(length)?;
        String::from_utf8(bytes.to_vec()).map_err(|_| DecodeError::InvalidUtf8 { offset })
    }

    fn integer(&mut self) -> Result<BigInt, DecodeError> {
        let offset = self.position;
        let start = self.position;
        while self.peek()? != END {
            self.position += 1;
        }
        let literal = &self.input[start..self.position];
        self.position += 1;

        let malformed = DecodeError::MalformedInteger { offset };
        let digits = literal.strip_prefix(b"-").unwrap_or(literal);
        let canonical = match digits {
            [] => false,
            [b'0'] => literal.len() == 1,
            [first, ..] => *first != b'0' && digits.iter().all(u8::is_ascii_digit),
        };
        if !canonical {
            return Err(malformed);
        }
        std::str::from_utf8(literal)
            .ok()
            .and_then(|literal| literal.parse().ok())
            .ok_or(malformed)
    }
}
