use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum DecodeError {
    #[error("Unexpected end of input at offset {offset}")]
    UnexpectedEnd { offset: usize },
    #[error("Invalid value prefix 0x{byte:02x} at offset {offset}")]
    InvalidPrefix { byte: u8, offset: usize },
    #[error("Invalid dictionary key prefix 0x{byte:02x} at offset {offset}")]
    InvalidKey { byte: u8, offset: usize },
    #[error("Malformed integer at offset {offset}")]
    MalformedInteger { offset: usize },
    #[error("Malformed length at offset {offset}")]
    MalformedLength { offset: usize },
    #[error("Invalid UTF-8 text at offset {offset}")]
    InvalidUtf8 { offset: usize },
    #[error("Dictionary keys are not in strictly ascending order at offset {offset}")]
    UnsortedKeys { offset: usize },
    #[error("Nesting depth exceeds {max} at offset {offset}")]
    DepthExceeded { max: usize, offset: usize },
    #[error("{remaining} trailing bytes after value")]
    TrailingBytes { remaining: usize },
}
