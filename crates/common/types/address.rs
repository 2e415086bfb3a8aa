use crate::{
    Address,
    constants::{ADDRESS_HEX_LENGTH, ADDRESS_LENGTH},
    errors::AddressError,
};

/// Renders an address as 40 lowercase hex characters, without a `0x` prefix.
///
/// This is the form used for account keys on the wire.
pub fn address_to_hex(address: &Address) -> String {
    hex::encode(address.as_bytes())
}

/// Parses an address from exactly 40 hex characters (either case, no prefix).
pub fn address_from_hex(hex_str: &str) -> Result<Address, AddressError> {
    if hex_str.len() != ADDRESS_HEX_LENGTH {
        return Err(AddressError::InvalidLength(hex_str.len()));
    }
    let mut bytes = [0u8; ADDRESS_LENGTH];
    hex::decode_to_slice(hex_str, &mut bytes)
        .map_err(|err| AddressError::InvalidHex(err.to_string()))?;
    Ok(Address::from(bytes))
}
