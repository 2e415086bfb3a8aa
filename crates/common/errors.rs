use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum AddressError {
    #[error("Invalid address length: expected {expected} hex characters, got {0}", expected = crate::constants::ADDRESS_HEX_LENGTH)]
    InvalidLength(usize),
    #[error("Invalid address hex: {0}")]
    InvalidHex(String),
}
